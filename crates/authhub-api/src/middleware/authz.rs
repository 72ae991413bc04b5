//! Per-method authorization middleware.
//!
//! Every `/api` route passes through here. The route template (not the
//! concrete path, so `/api/users/7` checks as `/api/users/{id}`) combined
//! with the HTTP verb is the method name looked up in the public-method
//! set and the ACL table.

use axum::extract::{MatchedPath, Request, State};
use axum::http::header::AUTHORIZATION;
use axum::middleware::Next;
use axum::response::Response;

use authhub_core::error::AppError;

use crate::error::ApiError;
use crate::state::AppState;

/// Builds the ACL method name for a request.
pub fn method_name(verb: &axum::http::Method, route_template: &str) -> String {
    format!("{verb} {route_template}")
}

/// Authorizes the request before any handler code runs.
///
/// On success the validated claims (if any) are attached to the request
/// extensions for handlers to read.
pub async fn authorize(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let route_template = request
        .extensions()
        .get::<MatchedPath>()
        .map(|p| p.as_str().to_string())
        .ok_or_else(|| AppError::internal("Route template missing from request"))?;
    let method = method_name(request.method(), &route_template);

    let authorization = request
        .headers()
        .get(AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);

    let decision = state
        .interceptor
        .authorize(&method, authorization.as_deref())?;

    if let Some(claims) = decision.claims() {
        request.extensions_mut().insert(claims.clone());
    }

    Ok(next.run(request).await)
}
