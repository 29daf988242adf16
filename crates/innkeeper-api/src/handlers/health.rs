//! Health check handlers.

use axum::extract::State;
use axum::Json;

use crate::dto::response::{DetailedHealthResponse, HealthResponse};
use crate::state::AppState;

/// Liveness probe; always succeeds while the process is up.
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// Readiness probe including database connectivity.
///
/// Reports degraded rather than failing the request, so monitoring can see
/// which dependency is down.
pub async fn health_detailed(State(state): State<AppState>) -> Json<DetailedHealthResponse> {
    let database_up = state.db.health_check().await.unwrap_or(false);

    Json(DetailedHealthResponse {
        status: if database_up { "ok" } else { "degraded" }.to_string(),
        database: if database_up { "up" } else { "down" }.to_string(),
    })
}
