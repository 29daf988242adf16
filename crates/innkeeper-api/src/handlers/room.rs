//! Room inventory handlers.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;

use innkeeper_entity::room::Room;

use crate::dto::request::{
    AvailabilityQuery, CreateRoomRequest, RoomListQuery, UpdateRoomRequest,
    UpdateRoomStatusRequest,
};
use crate::dto::response::{ApiResponse, MessageResponse, PaginatedResponse};
use crate::dto::validate_payload;
use crate::error::ApiResult;
use crate::extractors::AuthUser;
use crate::state::AppState;

/// `GET /api/rooms`
pub async fn list_rooms(
    State(state): State<AppState>,
    AuthUser(_ctx): AuthUser,
    Query(query): Query<RoomListQuery>,
) -> ApiResult<Json<PaginatedResponse<Room>>> {
    let page = state
        .rooms
        .list_rooms(&query.filters(), &query.page_request())
        .await?;
    Ok(Json(page.into()))
}

/// `GET /api/rooms/available`
///
/// Rooms free over the requested half-open date range, ordered by type,
/// price, then room number. An empty list is a normal answer.
pub async fn available_rooms(
    State(state): State<AppState>,
    AuthUser(_ctx): AuthUser,
    Query(query): Query<AvailabilityQuery>,
) -> ApiResult<Json<ApiResponse<Vec<Room>>>> {
    let stay = query.stay()?;
    let rooms = state
        .availability
        .find_available_rooms(&stay, &query.filters())
        .await?;
    Ok(Json(ApiResponse::ok(rooms)))
}

/// `GET /api/rooms/{number}`
pub async fn get_room(
    State(state): State<AppState>,
    AuthUser(_ctx): AuthUser,
    Path(number): Path<i32>,
) -> ApiResult<Json<ApiResponse<Room>>> {
    let room = state.rooms.get_room(number).await?;
    Ok(Json(ApiResponse::ok(room)))
}

/// `POST /api/rooms`
pub async fn create_room(
    State(state): State<AppState>,
    AuthUser(ctx): AuthUser,
    Json(payload): Json<CreateRoomRequest>,
) -> ApiResult<(StatusCode, Json<ApiResponse<Room>>)> {
    validate_payload(&payload)?;
    let room = state.rooms.create_room(&ctx, payload.into()).await?;
    Ok((StatusCode::CREATED, Json(ApiResponse::ok(room))))
}

/// `PUT /api/rooms/{number}`
pub async fn update_room(
    State(state): State<AppState>,
    AuthUser(ctx): AuthUser,
    Path(number): Path<i32>,
    Json(payload): Json<UpdateRoomRequest>,
) -> ApiResult<Json<ApiResponse<Room>>> {
    let room = state.rooms.update_room(&ctx, number, payload.into()).await?;
    Ok(Json(ApiResponse::ok(room)))
}

/// `PUT /api/rooms/{number}/status`
pub async fn set_room_status(
    State(state): State<AppState>,
    AuthUser(ctx): AuthUser,
    Path(number): Path<i32>,
    Json(payload): Json<UpdateRoomStatusRequest>,
) -> ApiResult<Json<ApiResponse<Room>>> {
    let room = state
        .rooms
        .set_room_status(&ctx, number, payload.status)
        .await?;
    Ok(Json(ApiResponse::ok(room)))
}

/// `DELETE /api/rooms/{number}`
pub async fn delete_room(
    State(state): State<AppState>,
    AuthUser(ctx): AuthUser,
    Path(number): Path<i32>,
) -> ApiResult<Json<ApiResponse<MessageResponse>>> {
    state.rooms.delete_room(&ctx, number).await?;
    Ok(Json(ApiResponse::ok(MessageResponse::new(format!(
        "Room {number} deleted"
    )))))
}
