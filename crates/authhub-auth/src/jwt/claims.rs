//! JWT claims structure embedded in bearer tokens.

use chrono::Utc;
use serde::{Deserialize, Serialize};

use authhub_entity::user::UserRole;

/// Claims payload carried by every issued token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Subject, the user id.
    pub sub: i64,
    /// User role at the time of issuance.
    pub role: UserRole,
    /// Issuer.
    pub iss: String,
    /// Issued-at timestamp (seconds since epoch).
    pub iat: i64,
    /// Expiration timestamp (seconds since epoch).
    pub exp: i64,
}

impl Claims {
    /// Checks whether this token has expired.
    pub fn is_expired(&self) -> bool {
        Utc::now().timestamp() >= self.exp
    }
}
