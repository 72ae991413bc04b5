//! Health check handler.

use axum::Json;
use axum::extract::State;
use serde::{Deserialize, Serialize};

use authhub_core::traits::CacheProvider;

use crate::state::AppState;

/// Health check payload.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Overall status.
    pub status: String,
    /// Whether the key-value store responded.
    pub store: bool,
}

/// GET /healthz
pub async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    let store = state.cache.health_check().await.unwrap_or(false);
    Json(HealthResponse {
        status: if store { "ok" } else { "degraded" }.to_string(),
        store,
    })
}
