//! Response DTOs.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use authhub_entity::user::User;

/// Standard success response wrapper.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    /// Whether the request was successful.
    pub success: bool,
    /// Response data.
    pub data: T,
}

impl<T: Serialize> ApiResponse<T> {
    /// Creates a successful response.
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data,
        }
    }
}

/// Plain message payload.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageResponse {
    /// Human-readable message.
    pub message: String,
}

/// Successful authentication payload.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginResponse {
    /// Bearer token for RPC calls.
    pub token: String,
    /// Token expiration.
    pub expires_at: DateTime<Utc>,
    /// Authenticated user.
    pub user: UserResponse,
}

/// User summary for responses. Never carries the password record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserResponse {
    /// User id.
    pub id: i64,
    /// Display name.
    pub name: String,
    /// Email address.
    pub email: String,
    /// Role name.
    pub role: String,
    /// Avatar image URL, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avatar_url: Option<String>,
    /// Whether a federated identity is linked.
    pub has_federated_identity: bool,
    /// When the user was created.
    pub created_at: DateTime<Utc>,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            name: user.name,
            email: user.email,
            role: user.role.to_string(),
            avatar_url: user.avatar_url,
            has_federated_identity: user.federated_id.is_some(),
            created_at: user.created_at,
        }
    }
}
