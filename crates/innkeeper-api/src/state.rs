//! Application state shared across all handlers and middleware.

use std::sync::Arc;

use innkeeper_auth::jwt::JwtDecoder;
use innkeeper_core::config::AppConfig;
use innkeeper_database::DatabasePool;
use innkeeper_service::{
    AvailabilityEngine, GuestService, ReportService, ReservationService, RoomService, UserService,
};

/// Application state containing all shared dependencies.
///
/// Passed to every Axum handler via `State<AppState>`. All fields are
/// `Arc`-wrapped for cheap cloning across tasks.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Application configuration.
    pub config: Arc<AppConfig>,
    /// PostgreSQL pool, used directly only by the health endpoints.
    pub db: DatabasePool,
    /// JWT decoder for the auth extractor.
    pub jwt_decoder: Arc<JwtDecoder>,
    /// Availability queries.
    pub availability: Arc<AvailabilityEngine>,
    /// Reservation lifecycle.
    pub reservations: Arc<ReservationService>,
    /// Room inventory.
    pub rooms: Arc<RoomService>,
    /// Guest directory.
    pub guests: Arc<GuestService>,
    /// Staff accounts and authentication.
    pub users: Arc<UserService>,
    /// Dashboard and occupancy reports.
    pub reports: Arc<ReportService>,
}
