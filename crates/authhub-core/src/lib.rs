//! # authhub-core
//!
//! Core crate for AuthHub. Contains the unified error system, configuration
//! schemas, and the TTL-capable key-value store trait the rest of the
//! workspace is built against.
//!
//! This crate has **no** internal dependencies on other AuthHub crates.

pub mod config;
pub mod error;
pub mod result;
pub mod traits;

pub use error::AppError;
pub use result::AppResult;
