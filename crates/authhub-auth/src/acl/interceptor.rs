//! Authorization gate applied in front of every method dispatch.

use std::sync::Arc;

use tracing::{debug, warn};

use authhub_core::error::AppError;
use authhub_core::result::AppResult;

use super::table::AclTable;
use crate::jwt::{Claims, JwtDecoder};

/// Outcome of a successful authorization check.
#[derive(Debug, Clone)]
pub enum AuthDecision {
    /// The method is public; no credential was required.
    Public,
    /// The caller presented a valid credential and passed the ACL.
    Authenticated(Claims),
}

impl AuthDecision {
    /// Claims attached to the call, if any.
    pub fn claims(&self) -> Option<&Claims> {
        match self {
            Self::Public => None,
            Self::Authenticated(claims) => Some(claims),
        }
    }
}

/// Checks each incoming call against the public-method set and the ACL.
#[derive(Debug, Clone)]
pub struct AuthInterceptor {
    /// Static access control table.
    table: AclTable,
    /// Token validator.
    decoder: Arc<JwtDecoder>,
}

impl AuthInterceptor {
    /// Creates a new interceptor.
    pub fn new(table: AclTable, decoder: Arc<JwtDecoder>) -> Self {
        Self { table, decoder }
    }

    /// Authorizes a call to `method` with an optional `Authorization`
    /// header value.
    ///
    /// Public methods pass without a credential. For every other method
    /// the credential must be present and valid, and the caller's role
    /// must appear in the method's ACL entry. A method with no entry is
    /// denied for every role.
    pub fn authorize(
        &self,
        method: &str,
        authorization: Option<&str>,
    ) -> AppResult<AuthDecision> {
        if self.table.is_public(method) {
            return Ok(AuthDecision::Public);
        }

        let header = authorization
            .ok_or_else(|| AppError::unauthenticated("Missing authorization credential"))?;
        let claims = self.decoder.decode_bearer(header)?;

        if !self.table.has_rule(method) {
            warn!(method, "Denying method with no access rule");
            return Err(AppError::permission_denied(format!(
                "Method '{method}' is not permitted for any role"
            )));
        }

        if !self.table.allows(method, claims.role) {
            debug!(method, user_id = claims.sub, role = %claims.role, "Role not permitted for method");
            return Err(AppError::permission_denied(format!(
                "Role '{}' is not permitted to call '{method}'",
                claims.role
            )));
        }

        Ok(AuthDecision::Authenticated(claims))
    }
}
