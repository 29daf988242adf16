//! # innkeeper-api
//!
//! HTTP API layer for Innkeeper: the Axum router, request handlers,
//! extractors, and middleware. Handlers stay thin and delegate to the
//! service layer; errors surface through the shared [`error::ApiError`]
//! mapping.

pub mod dto;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod middleware;
pub mod router;
pub mod state;

pub use error::{ApiError, ApiResult};
pub use router::build_router;
pub use state::AppState;
