//! # authhub-entity
//!
//! Domain entity models for AuthHub. Every struct in this crate represents
//! a persisted record or a domain value object. The user directory trait
//! lives here too, since the persistence layer behind it is an external
//! collaborator rather than part of this workspace.

pub mod session;
pub mod user;
