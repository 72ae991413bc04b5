//! # authhub-api
//!
//! HTTP API layer for AuthHub built on Axum.
//!
//! Routes, the per-method authorization middleware, session and claims
//! extractors, DTOs, and error mapping.

pub mod dto;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod middleware;
pub mod router;
pub mod state;

pub use error::ApiError;
pub use router::build_router;
pub use state::AppState;
