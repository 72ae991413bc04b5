//! # authhub-cache
//!
//! Key-value store provider implementations for AuthHub:
//!
//! - **memory**: In-process store using [moka](https://crates.io/crates/moka)
//! - **redis**: Redis-backed store using the [redis](https://crates.io/crates/redis) crate
//!
//! The provider is selected at runtime based on configuration. Both back
//! the session records and the one-shot OAuth state markers, so both must
//! implement an atomic get-and-delete.

pub mod keys;
#[cfg(feature = "memory")]
pub mod memory;
pub mod provider;
#[cfg(feature = "redis-backend")]
pub mod redis;

pub use provider::CacheManager;
