//! User entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::role::UserRole;

/// A registered user in the AuthHub directory.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    /// Unique user identifier.
    pub id: i64,
    /// Human-readable display name.
    pub name: String,
    /// Email address, unique across the directory.
    pub email: String,
    /// User role (access control).
    pub role: UserRole,
    /// Linked federated identity id (e.g. `github_42`), if any.
    pub federated_id: Option<String>,
    /// Encoded password record, if a password is set.
    #[serde(skip_serializing, default)]
    pub password_hash: Option<String>,
    /// Avatar image URL from the identity provider, if any.
    pub avatar_url: Option<String>,
    /// When the user was created.
    pub created_at: DateTime<Utc>,
    /// When the user was last updated.
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Check if this user has admin privileges.
    pub fn is_admin(&self) -> bool {
        self.role.is_admin()
    }

    /// Check if the user can authenticate with a password.
    pub fn has_password(&self) -> bool {
        self.password_hash
            .as_deref()
            .is_some_and(|h| !h.is_empty())
    }

    /// Check if the user is linked to a federated identity.
    pub fn has_federated_id(&self) -> bool {
        self.federated_id
            .as_deref()
            .is_some_and(|id| !id.is_empty())
    }
}

/// Data required to create a new user.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewUser {
    /// Display name.
    pub name: String,
    /// Email address.
    pub email: String,
    /// Assigned role.
    pub role: UserRole,
    /// Pre-hashed password record, if registering with a password.
    pub password_hash: Option<String>,
    /// Federated identity id, if created from an OAuth login.
    pub federated_id: Option<String>,
    /// Avatar URL from the identity provider.
    pub avatar_url: Option<String>,
}

/// Partial update for an existing user.
///
/// Outer `None` leaves a field untouched; for the clearable fields the
/// inner `None` clears the stored value.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UserPatch {
    /// New display name.
    pub name: Option<String>,
    /// New email address.
    pub email: Option<String>,
    /// New role.
    pub role: Option<UserRole>,
    /// Set or clear the federated identity link.
    pub federated_id: Option<Option<String>>,
    /// Set or clear the password record.
    pub password_hash: Option<Option<String>>,
}
