//! JWT token validation.

use jsonwebtoken::{Algorithm, DecodingKey, Validation, decode};

use authhub_core::config::auth::AuthConfig;
use authhub_core::error::AppError;
use authhub_core::result::AppResult;

use super::claims::Claims;

/// Validates bearer tokens.
///
/// Validation is purely computational: signature, expiration, and issuer
/// are all checked from the token itself with no store lookup.
#[derive(Clone)]
pub struct JwtDecoder {
    /// HMAC secret key for verification.
    decoding_key: DecodingKey,
    /// Validation configuration.
    validation: Validation,
}

impl std::fmt::Debug for JwtDecoder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtDecoder")
            .field("validation", &self.validation)
            .finish()
    }
}

impl JwtDecoder {
    /// Creates a new decoder from auth configuration.
    pub fn new(config: &AuthConfig) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = true;
        validation.leeway = 5; // seconds of clock skew tolerance
        validation.set_issuer(&[&config.jwt_issuer]);

        Self {
            decoding_key: DecodingKey::from_secret(config.jwt_secret.as_bytes()),
            validation,
        }
    }

    /// Decodes and validates a token string.
    pub fn decode(&self, token: &str) -> AppResult<Claims> {
        let token_data =
            decode::<Claims>(token, &self.decoding_key, &self.validation).map_err(|e| {
                match e.kind() {
                    jsonwebtoken::errors::ErrorKind::ExpiredSignature => {
                        AppError::unauthenticated("Token has expired")
                    }
                    jsonwebtoken::errors::ErrorKind::InvalidToken => {
                        AppError::unauthenticated("Invalid token format")
                    }
                    jsonwebtoken::errors::ErrorKind::InvalidSignature => {
                        AppError::unauthenticated("Invalid token signature")
                    }
                    jsonwebtoken::errors::ErrorKind::InvalidIssuer => {
                        AppError::unauthenticated("Invalid token issuer")
                    }
                    _ => AppError::unauthenticated(format!("Token validation failed: {e}")),
                }
            })?;

        Ok(token_data.claims)
    }

    /// Validates an `Authorization` header value of the form `Bearer <token>`.
    pub fn decode_bearer(&self, header_value: &str) -> AppResult<Claims> {
        let token = header_value
            .strip_prefix("Bearer ")
            .ok_or_else(|| AppError::unauthenticated("Authorization header must be a bearer token"))?;
        self.decode(token.trim())
    }
}
