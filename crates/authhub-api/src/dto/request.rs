//! Request DTOs.

use serde::{Deserialize, Serialize};

/// Body of `POST /api/auth/register`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterRequest {
    /// Display name.
    pub name: String,
    /// Email address.
    pub email: String,
    /// Plaintext password.
    pub password: String,
}

/// Body of `POST /api/auth/login`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    /// Email address.
    pub email: String,
    /// Plaintext password.
    pub password: String,
}

/// Query parameters of the OAuth callback.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CallbackQuery {
    /// Authorization code from the provider.
    pub code: String,
    /// Encoded state issued at login start.
    pub state: String,
}

/// Body of `PUT /api/users/{id}`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateUserRequest {
    /// New display name.
    pub name: Option<String>,
    /// New email address.
    pub email: Option<String>,
    /// New role name (`USER` or `ADMIN`).
    pub role: Option<String>,
}

/// Pagination query parameters. Pages are 1-based.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Pagination {
    /// Page number.
    #[serde(default = "default_page")]
    pub page: u64,
    /// Items per page.
    #[serde(default = "default_page_size")]
    pub page_size: u64,
}

impl Default for Pagination {
    fn default() -> Self {
        Self {
            page: default_page(),
            page_size: default_page_size(),
        }
    }
}

fn default_page() -> u64 {
    1
}

fn default_page_size() -> u64 {
    20
}
