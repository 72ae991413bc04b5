//! Route definitions for the AuthHub HTTP API.
//!
//! All RPC-style routes live under `/api` and pass through the
//! authorization middleware; method names in the ACL configuration are
//! `"<VERB> <route template>"`, e.g. `"GET /api/users/{id}"`.

use axum::{
    Router,
    middleware as axum_middleware,
    routing::{delete, get, post, put},
};
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::middleware;
use crate::state::AppState;

/// Build the complete Axum router with all routes and middleware.
pub fn build_router(state: AppState) -> Router {
    let api_routes = Router::new()
        .merge(auth_routes())
        .merge(user_routes())
        .layer(axum_middleware::from_fn_with_state(
            state.clone(),
            middleware::authz::authorize,
        ));

    Router::new()
        .nest("/api", api_routes)
        .route("/healthz", get(handlers::health::health))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Auth endpoints: password login, federated login, logout, self-checks.
fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/auth/register", post(handlers::auth::register))
        .route("/auth/login", post(handlers::auth::login))
        .route("/auth/logout", post(handlers::auth::logout))
        .route("/auth/session", get(handlers::auth::session_me))
        .route("/auth/me", get(handlers::auth::me))
        .route("/auth/{provider}/login", get(handlers::oauth::oauth_login))
        .route(
            "/auth/{provider}/callback",
            get(handlers::oauth::oauth_callback),
        )
}

/// User administration endpoints.
fn user_routes() -> Router<AppState> {
    Router::new()
        .route("/users", get(handlers::user::list_users))
        .route("/users/{id}", get(handlers::user::get_user))
        .route("/users/{id}", put(handlers::user::update_user))
        .route("/users/{id}", delete(handlers::user::delete_user))
}
