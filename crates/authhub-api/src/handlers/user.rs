//! User administration handlers.

use axum::Json;
use axum::extract::{Path, Query, State};
use tracing::info;

use authhub_core::error::AppError;
use authhub_entity::user::{UserPatch, UserRole};

use crate::dto::request::{Pagination, UpdateUserRequest};
use crate::dto::response::{ApiResponse, MessageResponse, UserResponse};
use crate::error::ApiError;
use crate::state::AppState;

/// GET /api/users
pub async fn list_users(
    State(state): State<AppState>,
    Query(pagination): Query<Pagination>,
) -> Result<Json<ApiResponse<Vec<UserResponse>>>, ApiError> {
    let page_size = pagination.page_size.clamp(1, 100);
    let users = state
        .directory
        .list(pagination.page.max(1), page_size)
        .await?;

    Ok(Json(ApiResponse::ok(
        users.into_iter().map(UserResponse::from).collect(),
    )))
}

/// GET /api/users/{id}
pub async fn get_user(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<ApiResponse<UserResponse>>, ApiError> {
    let user = state
        .directory
        .find_by_id(id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("User {id} not found")))?;

    Ok(Json(ApiResponse::ok(user.into())))
}

/// PUT /api/users/{id}
pub async fn update_user(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(req): Json<UpdateUserRequest>,
) -> Result<Json<ApiResponse<UserResponse>>, ApiError> {
    let role = req
        .role
        .map(|r| {
            r.parse::<UserRole>()
                .map_err(|_| AppError::invalid_argument(format!("Unknown role '{r}'")))
        })
        .transpose()?;

    let patch = UserPatch {
        name: req.name,
        email: req.email,
        role,
        ..Default::default()
    };
    let user = state.directory.update(id, patch).await?;

    info!(user_id = id, "Updated user");
    Ok(Json(ApiResponse::ok(user.into())))
}

/// DELETE /api/users/{id}
pub async fn delete_user(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<ApiResponse<MessageResponse>>, ApiError> {
    if !state.directory.delete(id).await? {
        return Err(AppError::not_found(format!("User {id} not found")).into());
    }

    info!(user_id = id, "Deleted user");
    Ok(Json(ApiResponse::ok(MessageResponse {
        message: "User deleted".to_string(),
    })))
}
