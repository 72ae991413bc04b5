//! HTTP middleware.

pub mod authz;
