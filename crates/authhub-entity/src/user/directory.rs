//! User directory trait: the persistence collaborator behind authentication.
//!
//! The relational store backing this trait is outside the scope of this
//! workspace; `authhub-directory` ships an in-memory implementation for
//! development and testing.

use async_trait::async_trait;

use authhub_core::result::AppResult;

use super::model::{NewUser, User, UserPatch};

/// Lookup, creation, and update of user records.
///
/// Lookups return `Ok(None)` for absent records; `Err` is reserved for
/// store failures. Mutations of a non-existent user return
/// `ErrorKind::NotFound`.
#[async_trait]
pub trait UserDirectory: Send + Sync + 'static {
    /// Find a user by id.
    async fn find_by_id(&self, id: i64) -> AppResult<Option<User>>;

    /// Find a user by email address.
    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>>;

    /// Find a user by linked federated identity id.
    async fn find_by_federated_id(&self, federated_id: &str) -> AppResult<Option<User>>;

    /// Create a new user and return it with its assigned id.
    async fn create(&self, user: NewUser) -> AppResult<User>;

    /// Apply a partial update and return the updated user.
    async fn update(&self, id: i64, patch: UserPatch) -> AppResult<User>;

    /// Attach a federated identity to an existing account.
    async fn link_federated_id(&self, id: i64, federated_id: &str) -> AppResult<User>;

    /// Replace the stored password record.
    async fn set_password(&self, id: i64, password_hash: &str) -> AppResult<()>;

    /// Delete a user. Returns `true` if a record was removed.
    async fn delete(&self, id: i64) -> AppResult<bool>;

    /// List users, paginated. Pages are 1-based.
    async fn list(&self, page: u64, page_size: u64) -> AppResult<Vec<User>>;
}
