//! Reservation lifecycle handlers.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use uuid::Uuid;

use innkeeper_entity::reservation::Reservation;

use crate::dto::request::{
    CancelReservationRequest, CreateReservationRequest, ReservationListQuery,
    UpdateReservationRequest,
};
use crate::dto::response::{ApiResponse, PaginatedResponse};
use crate::dto::validate_payload;
use crate::error::ApiResult;
use crate::extractors::AuthUser;
use crate::state::AppState;

/// `GET /api/reservations`
pub async fn list_reservations(
    State(state): State<AppState>,
    AuthUser(_ctx): AuthUser,
    Query(query): Query<ReservationListQuery>,
) -> ApiResult<Json<PaginatedResponse<Reservation>>> {
    let page = state
        .reservations
        .list_reservations(&query.filters(), &query.page_request())
        .await?;
    Ok(Json(page.into()))
}

/// `GET /api/reservations/{id}`
pub async fn get_reservation(
    State(state): State<AppState>,
    AuthUser(_ctx): AuthUser,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<ApiResponse<Reservation>>> {
    let reservation = state.reservations.get_reservation(id).await?;
    Ok(Json(ApiResponse::ok(reservation)))
}

/// `POST /api/reservations`
pub async fn create_reservation(
    State(state): State<AppState>,
    AuthUser(ctx): AuthUser,
    Json(payload): Json<CreateReservationRequest>,
) -> ApiResult<(StatusCode, Json<ApiResponse<Reservation>>)> {
    validate_payload(&payload)?;
    let data = payload.try_into()?;
    let reservation = state.reservations.create_reservation(&ctx, data).await?;
    Ok((StatusCode::CREATED, Json(ApiResponse::ok(reservation))))
}

/// `PUT /api/reservations/{id}`
pub async fn update_reservation(
    State(state): State<AppState>,
    AuthUser(ctx): AuthUser,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateReservationRequest>,
) -> ApiResult<Json<ApiResponse<Reservation>>> {
    let data = payload.try_into()?;
    let reservation = state
        .reservations
        .update_reservation(&ctx, id, data)
        .await?;
    Ok(Json(ApiResponse::ok(reservation)))
}

/// `POST /api/reservations/{id}/check-in`
pub async fn check_in(
    State(state): State<AppState>,
    AuthUser(ctx): AuthUser,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<ApiResponse<Reservation>>> {
    let reservation = state.reservations.check_in(&ctx, id).await?;
    Ok(Json(ApiResponse::ok(reservation)))
}

/// `POST /api/reservations/{id}/check-out`
pub async fn check_out(
    State(state): State<AppState>,
    AuthUser(ctx): AuthUser,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<ApiResponse<Reservation>>> {
    let reservation = state.reservations.check_out(&ctx, id).await?;
    Ok(Json(ApiResponse::ok(reservation)))
}

/// `POST /api/reservations/{id}/cancel`
pub async fn cancel_reservation(
    State(state): State<AppState>,
    AuthUser(ctx): AuthUser,
    Path(id): Path<Uuid>,
    Json(payload): Json<CancelReservationRequest>,
) -> ApiResult<Json<ApiResponse<Reservation>>> {
    let reservation = state
        .reservations
        .cancel_reservation(&ctx, id, payload.reason)
        .await?;
    Ok(Json(ApiResponse::ok(reservation)))
}
