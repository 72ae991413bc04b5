//! Server-side session lifecycle.

pub mod store;

pub use store::SessionStore;
