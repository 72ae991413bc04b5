//! # authhub-oauth
//!
//! Federated login for AuthHub: anti-replay state handling, the
//! [`IdentityProvider`] abstraction, and its GitHub implementation.
//!
//! ## Modules
//!
//! - `state`: CSRF state codec and one-shot consumption over the store
//! - `provider`: provider trait and the shared account-matching rule
//! - `github`: GitHub OAuth provider
//! - `registry`: provider lookup by name

pub mod github;
pub mod provider;
pub mod registry;
pub mod state;

pub use provider::{IdentityProvider, Profile};
pub use registry::ProviderRegistry;
pub use state::{OAuthState, StateManager};
