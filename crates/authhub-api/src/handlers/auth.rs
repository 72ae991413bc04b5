//! Auth handlers: register, login, logout, me.

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use tracing::info;

use authhub_auth::jwt::Claims;
use authhub_core::error::AppError;
use authhub_entity::user::{NewUser, User, UserRole};

use crate::dto::request::{LoginRequest, RegisterRequest};
use crate::dto::response::{ApiResponse, LoginResponse, MessageResponse, UserResponse};
use crate::error::ApiError;
use crate::extractors::SessionUser;
use crate::state::AppState;

/// Builds the session cookie for a fresh session id.
pub fn session_cookie(state: &AppState, session_id: String) -> Cookie<'static> {
    Cookie::build((state.sessions.cookie_name().to_string(), session_id))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .max_age(time::Duration::seconds(state.sessions.ttl_seconds() as i64))
        .build()
}

fn removal_cookie(state: &AppState) -> Cookie<'static> {
    Cookie::build((state.sessions.cookie_name().to_string(), ""))
        .path("/")
        .build()
}

/// Creates a session and a bearer token for an authenticated user.
pub async fn establish_login(
    state: &AppState,
    jar: CookieJar,
    user: User,
) -> Result<(CookieJar, LoginResponse), ApiError> {
    let session = state.sessions.create(user.id).await?;
    let (token, expires_at) = state.encoder.issue(user.id, user.role)?;
    let jar = jar.add(session_cookie(state, session.id));

    Ok((
        jar,
        LoginResponse {
            token,
            expires_at,
            user: user.into(),
        },
    ))
}

/// POST /api/auth/register
pub async fn register(
    State(state): State<AppState>,
    Json(req): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<ApiResponse<UserResponse>>), ApiError> {
    if req.name.trim().is_empty() || req.email.trim().is_empty() {
        return Err(AppError::invalid_argument("Name and email are required").into());
    }
    if req.password.len() < 8 {
        return Err(AppError::invalid_argument("Password must be at least 8 characters").into());
    }

    let password_hash = state.hasher.hash_password(&req.password)?;

    let user = match state.directory.find_by_email(&req.email).await? {
        Some(existing) if existing.has_password() => {
            return Err(AppError::conflict("Email is already registered").into());
        }
        // A federated-only account claims the email: attach the password
        // as a second login method instead of rejecting.
        Some(existing) => {
            state
                .directory
                .set_password(existing.id, &password_hash)
                .await?;
            info!(user_id = existing.id, "Attached password to federated account");
            existing
        }
        None => {
            let user = state
                .directory
                .create(NewUser {
                    name: req.name,
                    email: req.email,
                    role: UserRole::User,
                    password_hash: Some(password_hash),
                    federated_id: None,
                    avatar_url: None,
                })
                .await?;
            info!(user_id = user.id, "Registered new user");
            user
        }
    };

    Ok((StatusCode::CREATED, Json(ApiResponse::ok(user.into()))))
}

/// POST /api/auth/login
pub async fn login(
    State(state): State<AppState>,
    jar: CookieJar,
    Json(req): Json<LoginRequest>,
) -> Result<(CookieJar, Json<ApiResponse<LoginResponse>>), ApiError> {
    let user = state.directory.find_by_email(&req.email).await?;

    // One message for unknown email, password-less account, and wrong
    // password: the response must not reveal which accounts exist.
    let Some(user) = user.filter(|u| u.has_password()) else {
        return Err(AppError::unauthenticated("Invalid email or password").into());
    };
    let hash = user
        .password_hash
        .as_deref()
        .ok_or_else(|| AppError::unauthenticated("Invalid email or password"))?;
    if !state.hasher.verify_password(&req.password, hash)? {
        return Err(AppError::unauthenticated("Invalid email or password").into());
    }

    info!(user_id = user.id, "Password login");
    let (jar, response) = establish_login(&state, jar, user).await?;
    Ok((jar, Json(ApiResponse::ok(response))))
}

/// POST /api/auth/logout
pub async fn logout(
    State(state): State<AppState>,
    jar: CookieJar,
) -> Result<(CookieJar, Json<ApiResponse<MessageResponse>>), ApiError> {
    if let Some(cookie) = jar.get(state.sessions.cookie_name()) {
        state.sessions.delete(cookie.value()).await?;
    }
    let jar = jar.remove(removal_cookie(&state));

    Ok((
        jar,
        Json(ApiResponse::ok(MessageResponse {
            message: "Logged out".to_string(),
        })),
    ))
}

/// GET /api/auth/session
///
/// Browser self-check: resolves the session cookie to the current user.
pub async fn session_me(
    session_user: SessionUser,
) -> Json<ApiResponse<UserResponse>> {
    Json(ApiResponse::ok(session_user.user.into()))
}

/// GET /api/auth/me
///
/// Bearer-token self-check: claims are attached by the authorization
/// middleware.
pub async fn me(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
) -> Result<Json<ApiResponse<UserResponse>>, ApiError> {
    let user = state
        .directory
        .find_by_id(claims.sub)
        .await?
        .ok_or_else(|| AppError::unauthenticated("Account no longer exists"))?;

    Ok(Json(ApiResponse::ok(user.into())))
}
