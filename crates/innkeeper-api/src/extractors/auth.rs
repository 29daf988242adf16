//! Bearer-token authentication extractor.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;

use innkeeper_core::error::AppError;
use innkeeper_service::RequestContext;

use crate::error::ApiError;
use crate::state::AppState;

/// Extracts the authenticated staff user from the `Authorization` header.
///
/// Handlers that take an `AuthUser` argument reject unauthenticated
/// requests with 401 before the handler body runs.
#[derive(Debug, Clone)]
pub struct AuthUser(pub RequestContext);

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token = bearer_token(parts)
            .ok_or_else(|| AppError::authentication("Missing Authorization header"))?;

        let claims = state.jwt_decoder.decode_access_token(token)?;
        Ok(AuthUser(RequestContext::new(
            claims.sub,
            claims.role,
            claims.email,
            claims.name,
        )))
    }
}

fn bearer_token(parts: &Parts) -> Option<&str> {
    parts
        .headers
        .get(axum::http::header::AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
        .map(str::trim)
        .filter(|t| !t.is_empty())
}
