//! Staff user administration handlers.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use uuid::Uuid;

use crate::dto::request::{
    CreateUserRequest, PageQuery, UpdateRoleRequest, UpdateUserStatusRequest,
};
use crate::dto::response::{ApiResponse, PaginatedResponse, UserResponse};
use crate::dto::validate_payload;
use crate::error::ApiResult;
use crate::extractors::AuthUser;
use crate::state::AppState;

/// `GET /api/admin/users`
pub async fn list_users(
    State(state): State<AppState>,
    AuthUser(ctx): AuthUser,
    Query(query): Query<PageQuery>,
) -> ApiResult<Json<PaginatedResponse<UserResponse>>> {
    let page = state
        .users
        .list_users(&ctx, &query.to_page_request())
        .await?;

    let items = page.items.iter().map(UserResponse::from).collect();
    Ok(Json(PaginatedResponse {
        items,
        page: page.page,
        page_size: page.page_size,
        total_items: page.total_items,
        total_pages: page.total_pages,
    }))
}

/// `POST /api/admin/users`
pub async fn create_user(
    State(state): State<AppState>,
    AuthUser(ctx): AuthUser,
    Json(payload): Json<CreateUserRequest>,
) -> ApiResult<(StatusCode, Json<ApiResponse<UserResponse>>)> {
    validate_payload(&payload)?;
    let user = state
        .users
        .create_user(
            &ctx,
            &payload.name,
            &payload.email,
            &payload.password,
            payload.role,
        )
        .await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::ok(UserResponse::from(&user))),
    ))
}

/// `PUT /api/admin/users/{id}/role`
pub async fn set_role(
    State(state): State<AppState>,
    AuthUser(ctx): AuthUser,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateRoleRequest>,
) -> ApiResult<Json<ApiResponse<UserResponse>>> {
    let user = state.users.set_role(&ctx, id, payload.role).await?;
    Ok(Json(ApiResponse::ok(UserResponse::from(&user))))
}

/// `PUT /api/admin/users/{id}/status`
pub async fn set_user_status(
    State(state): State<AppState>,
    AuthUser(ctx): AuthUser,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateUserStatusRequest>,
) -> ApiResult<Json<ApiResponse<UserResponse>>> {
    let user = state.users.set_status(&ctx, id, payload.status).await?;
    Ok(Json(ApiResponse::ok(UserResponse::from(&user))))
}
