//! Route definitions and layer assembly.

use axum::middleware;
use axum::routing::{get, post, put};
use axum::Router;
use tower_http::compression::CompressionLayer;

use crate::handlers::{auth, guest, health, report, reservation, room, user};
use crate::middleware::{build_cors_layer, request_logging};
use crate::state::AppState;

/// Build the full application router with all routes and layers applied.
pub fn build_router(state: AppState) -> Router {
    let cors = build_cors_layer(&state.config.server.cors);

    let api = Router::new()
        // Auth
        .route("/auth/login", post(auth::login))
        .route("/auth/refresh", post(auth::refresh))
        .route("/auth/me", get(auth::me))
        // Rooms
        .route("/rooms", get(room::list_rooms).post(room::create_room))
        .route("/rooms/available", get(room::available_rooms))
        .route(
            "/rooms/{number}",
            get(room::get_room)
                .put(room::update_room)
                .delete(room::delete_room),
        )
        .route("/rooms/{number}/status", put(room::set_room_status))
        // Reservations
        .route(
            "/reservations",
            get(reservation::list_reservations).post(reservation::create_reservation),
        )
        .route(
            "/reservations/{id}",
            get(reservation::get_reservation).put(reservation::update_reservation),
        )
        .route("/reservations/{id}/check-in", post(reservation::check_in))
        .route("/reservations/{id}/check-out", post(reservation::check_out))
        .route(
            "/reservations/{id}/cancel",
            post(reservation::cancel_reservation),
        )
        // Guests
        .route("/guests", get(guest::list_guests).post(guest::create_guest))
        .route(
            "/guests/{id}",
            get(guest::get_guest)
                .put(guest::update_guest)
                .delete(guest::delete_guest),
        )
        // Admin
        .route(
            "/admin/users",
            get(user::list_users).post(user::create_user),
        )
        .route("/admin/users/{id}/role", put(user::set_role))
        .route("/admin/users/{id}/status", put(user::set_user_status))
        // Reports
        .route("/reports/dashboard", get(report::dashboard))
        .route("/reports/occupancy", get(report::occupancy))
        // Health
        .route("/health", get(health::health))
        .route("/health/detailed", get(health::health_detailed));

    Router::new()
        .nest("/api", api)
        .layer(middleware::from_fn(request_logging))
        .layer(CompressionLayer::new())
        .layer(cors)
        .with_state(state)
}
