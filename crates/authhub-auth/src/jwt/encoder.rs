//! JWT token creation with configurable signing and TTL.

use chrono::{DateTime, Utc};
use jsonwebtoken::{EncodingKey, Header, encode};

use authhub_core::config::auth::AuthConfig;
use authhub_core::error::AppError;
use authhub_core::result::AppResult;
use authhub_entity::user::UserRole;

use super::claims::Claims;

/// Creates signed bearer tokens.
#[derive(Clone)]
pub struct JwtEncoder {
    /// HMAC secret key for signing.
    encoding_key: EncodingKey,
    /// Issuer embedded in every token.
    issuer: String,
    /// Token TTL in hours.
    token_ttl_hours: i64,
}

impl std::fmt::Debug for JwtEncoder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtEncoder")
            .field("issuer", &self.issuer)
            .field("token_ttl_hours", &self.token_ttl_hours)
            .finish()
    }
}

impl JwtEncoder {
    /// Creates a new encoder from auth configuration.
    pub fn new(config: &AuthConfig) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(config.jwt_secret.as_bytes()),
            issuer: config.jwt_issuer.clone(),
            token_ttl_hours: config.token_ttl_hours as i64,
        }
    }

    /// Issues a signed token for the given user.
    ///
    /// Returns the encoded token together with its expiration timestamp.
    pub fn issue(&self, user_id: i64, role: UserRole) -> AppResult<(String, DateTime<Utc>)> {
        let now = Utc::now();
        let expires_at = now + chrono::Duration::hours(self.token_ttl_hours);

        let claims = Claims {
            sub: user_id,
            role,
            iss: self.issuer.clone(),
            iat: now.timestamp(),
            exp: expires_at.timestamp(),
        };

        let token = encode(&Header::default(), &claims, &self.encoding_key)
            .map_err(|e| AppError::internal(format!("Failed to encode token: {e}")))?;

        Ok((token, expires_at))
    }
}
