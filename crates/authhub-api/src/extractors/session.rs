//! `SessionUser` extractor: resolves the browser session cookie to a user.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use axum_extra::extract::cookie::CookieJar;

use authhub_core::error::AppError;
use authhub_entity::session::Session;
use authhub_entity::user::User;

use crate::error::ApiError;
use crate::state::AppState;

/// Authenticated browser user, resolved from the session cookie.
#[derive(Debug, Clone)]
pub struct SessionUser {
    /// The live session record.
    pub session: Session,
    /// The user the session belongs to.
    pub user: User,
}

impl FromRequestParts<AppState> for SessionUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let jar = CookieJar::from_headers(&parts.headers);
        let session_id = jar
            .get(state.sessions.cookie_name())
            .map(|c| c.value().to_string())
            .ok_or_else(|| AppError::unauthenticated("No session cookie"))?;

        let session = state
            .sessions
            .get(&session_id)
            .await?
            .ok_or_else(|| AppError::unauthenticated("Session is unknown or expired"))?;

        // A session for a since-deleted user is treated the same as no
        // session at all.
        let user = state
            .directory
            .find_by_id(session.user_id)
            .await?
            .ok_or_else(|| AppError::unauthenticated("Session is unknown or expired"))?;

        Ok(Self { session, user })
    }
}
