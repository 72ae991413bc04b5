//! # authhub-auth
//!
//! Credential handling and access control for AuthHub.
//!
//! ## Modules
//!
//! - `password`: Argon2id password hashing and verification
//! - `jwt`: stateless bearer token issuance and validation
//! - `session`: server-side session lifecycle over the key-value store
//! - `acl`: per-method access control table and request interceptor

pub mod acl;
pub mod jwt;
pub mod password;
pub mod session;

pub use acl::{AclTable, AuthDecision, AuthInterceptor};
pub use jwt::{Claims, JwtDecoder, JwtEncoder};
pub use password::PasswordHasher;
pub use session::SessionStore;
