//! Authentication handlers.

use axum::extract::State;
use axum::Json;

use crate::dto::request::{LoginRequest, RefreshRequest};
use crate::dto::response::{ApiResponse, LoginResponse, UserResponse};
use crate::dto::validate_payload;
use crate::error::ApiResult;
use crate::extractors::AuthUser;
use crate::state::AppState;

/// `POST /api/auth/login`
pub async fn login(
    State(state): State<AppState>,
    Json(payload): Json<LoginRequest>,
) -> ApiResult<Json<ApiResponse<LoginResponse>>> {
    validate_payload(&payload)?;
    let (user, tokens) = state.users.login(&payload.email, &payload.password).await?;
    Ok(Json(ApiResponse::ok(LoginResponse::new(&user, tokens))))
}

/// `POST /api/auth/refresh`
pub async fn refresh(
    State(state): State<AppState>,
    Json(payload): Json<RefreshRequest>,
) -> ApiResult<Json<ApiResponse<LoginResponse>>> {
    validate_payload(&payload)?;
    let (user, tokens) = state.users.refresh(&payload.refresh_token).await?;
    Ok(Json(ApiResponse::ok(LoginResponse::new(&user, tokens))))
}

/// `GET /api/auth/me`
pub async fn me(
    State(state): State<AppState>,
    AuthUser(ctx): AuthUser,
) -> ApiResult<Json<ApiResponse<UserResponse>>> {
    let user = state.users.current_user(&ctx).await?;
    Ok(Json(ApiResponse::ok(UserResponse::from(&user))))
}
