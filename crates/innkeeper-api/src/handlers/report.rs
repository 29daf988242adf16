//! Reporting handlers.

use axum::extract::{Query, State};
use axum::Json;

use innkeeper_service::report::{DashboardSummary, OccupancyReport};

use crate::dto::request::OccupancyQuery;
use crate::dto::response::ApiResponse;
use crate::error::ApiResult;
use crate::extractors::AuthUser;
use crate::state::AppState;

/// `GET /api/reports/dashboard`
///
/// Served from a short-lived cache; `generated_at` in the body tells the
/// client how fresh the snapshot is.
pub async fn dashboard(
    State(state): State<AppState>,
    AuthUser(_ctx): AuthUser,
) -> ApiResult<Json<ApiResponse<DashboardSummary>>> {
    let summary = state.reports.dashboard().await?;
    Ok(Json(ApiResponse::ok((*summary).clone())))
}

/// `GET /api/reports/occupancy`
pub async fn occupancy(
    State(state): State<AppState>,
    AuthUser(_ctx): AuthUser,
    Query(query): Query<OccupancyQuery>,
) -> ApiResult<Json<ApiResponse<OccupancyReport>>> {
    let range = query.range()?;
    let report = state.reports.occupancy(&range).await?;
    Ok(Json(ApiResponse::ok(report)))
}
