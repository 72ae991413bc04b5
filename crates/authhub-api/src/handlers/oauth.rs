//! Federated login handlers.

use axum::Json;
use axum::extract::{Path, Query, State};
use axum::response::Redirect;
use axum_extra::extract::cookie::CookieJar;
use tracing::info;

use authhub_core::error::AppError;

use crate::dto::request::CallbackQuery;
use crate::dto::response::{ApiResponse, LoginResponse};
use crate::error::ApiError;
use crate::handlers::auth::establish_login;
use crate::state::AppState;

/// GET /api/auth/{provider}/login
///
/// Issues a one-shot state marker and redirects the browser to the
/// provider's authorization page.
pub async fn oauth_login(
    State(state): State<AppState>,
    Path(provider_name): Path<String>,
) -> Result<Redirect, ApiError> {
    let provider = state.providers.get(&provider_name)?;
    let encoded_state = state.states.issue(provider.name()).await?;
    let url = provider.auth_url(&encoded_state)?;

    Ok(Redirect::temporary(&url))
}

/// GET /api/auth/{provider}/callback
///
/// Consumes the state, exchanges the code, resolves the profile to an
/// account, and establishes a session plus bearer token.
pub async fn oauth_callback(
    State(state): State<AppState>,
    Path(provider_name): Path<String>,
    Query(query): Query<CallbackQuery>,
    jar: CookieJar,
) -> Result<(CookieJar, Json<ApiResponse<LoginResponse>>), ApiError> {
    let provider = state.providers.get(&provider_name)?;

    // The state must be consumed before anything else; a replayed or
    // cross-provider state never reaches the token exchange.
    let oauth_state = state.states.consume(&query.state).await?;
    if oauth_state.provider != provider.name() {
        return Err(AppError::unauthenticated("OAuth state was issued for a different provider").into());
    }

    let access_token = provider.exchange(&query.code).await?;
    let profile = provider.user_info(&access_token).await?;
    let user = provider.login(&profile).await?;

    info!(user_id = user.id, provider = provider.name(), "Federated login");
    let (jar, response) = establish_login(&state, jar, user).await?;
    Ok((jar, Json(ApiResponse::ok(response))))
}
