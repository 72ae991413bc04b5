//! # authhub-directory
//!
//! User directory backends for AuthHub. The directory is the system of
//! record for user accounts; authentication and authorization layers only
//! reach it through the [`UserDirectory`] trait.

pub mod memory;

pub use authhub_entity::user::UserDirectory;
pub use memory::MemoryDirectory;
