//! Guest directory handlers.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use uuid::Uuid;

use innkeeper_entity::guest::Guest;

use crate::dto::request::{CreateGuestRequest, GuestListQuery, UpdateGuestRequest};
use crate::dto::response::{ApiResponse, MessageResponse, PaginatedResponse};
use crate::dto::validate_payload;
use crate::error::ApiResult;
use crate::extractors::AuthUser;
use crate::state::AppState;

/// `GET /api/guests`
pub async fn list_guests(
    State(state): State<AppState>,
    AuthUser(_ctx): AuthUser,
    Query(query): Query<GuestListQuery>,
) -> ApiResult<Json<PaginatedResponse<Guest>>> {
    let page = state
        .guests
        .list_guests(query.search.as_deref(), &query.page_request())
        .await?;
    Ok(Json(page.into()))
}

/// `GET /api/guests/{id}`
pub async fn get_guest(
    State(state): State<AppState>,
    AuthUser(_ctx): AuthUser,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<ApiResponse<Guest>>> {
    let guest = state.guests.get_guest(id).await?;
    Ok(Json(ApiResponse::ok(guest)))
}

/// `POST /api/guests`
pub async fn create_guest(
    State(state): State<AppState>,
    AuthUser(ctx): AuthUser,
    Json(payload): Json<CreateGuestRequest>,
) -> ApiResult<(StatusCode, Json<ApiResponse<Guest>>)> {
    validate_payload(&payload)?;
    let guest = state.guests.create_guest(&ctx, payload.into()).await?;
    Ok((StatusCode::CREATED, Json(ApiResponse::ok(guest))))
}

/// `PUT /api/guests/{id}`
pub async fn update_guest(
    State(state): State<AppState>,
    AuthUser(ctx): AuthUser,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateGuestRequest>,
) -> ApiResult<Json<ApiResponse<Guest>>> {
    validate_payload(&payload)?;
    let guest = state.guests.update_guest(&ctx, id, payload.into()).await?;
    Ok(Json(ApiResponse::ok(guest)))
}

/// `DELETE /api/guests/{id}`
pub async fn delete_guest(
    State(state): State<AppState>,
    AuthUser(ctx): AuthUser,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<ApiResponse<MessageResponse>>> {
    state.guests.delete_guest(&ctx, id).await?;
    Ok(Json(ApiResponse::ok(MessageResponse::new(
        "Guest record deleted",
    ))))
}
