//! Shared test helpers for integration tests.
//!
//! Requires a running PostgreSQL instance; configure it with
//! `INNKEEPER__DATABASE__URL` before running.

use std::sync::Arc;
use std::time::Duration;

use axum::body::Body;
use axum::Router;
use http::{Request, StatusCode};
use serde_json::{json, Value};
use sqlx::PgPool;
use tower::ServiceExt;

use innkeeper_api::{build_router, AppState};
use innkeeper_auth::jwt::JwtDecoder;
use innkeeper_core::config::AppConfig;
use innkeeper_database::repositories::guest::GuestRepository;
use innkeeper_database::repositories::reservation::ReservationRepository;
use innkeeper_database::repositories::room::RoomRepository;
use innkeeper_database::repositories::user::UserRepository;
use innkeeper_database::DatabasePool;
use innkeeper_entity::user::UserRole;
use innkeeper_service::{
    AvailabilityEngine, GuestService, ReportService, ReservationService, RoomService, UserService,
};

/// Test application context.
pub struct TestApp {
    /// The Axum router for making test requests.
    pub router: Router,
    /// Database pool for direct queries.
    pub db_pool: PgPool,
    /// Application config.
    pub config: AppConfig,
}

impl TestApp {
    /// Create a new test application against a clean database.
    pub async fn new() -> Self {
        let config = AppConfig::load("test").expect("Failed to load test config");

        let db = DatabasePool::connect(&config.database)
            .await
            .expect("Failed to connect to test database");
        innkeeper_database::migration::run_migrations(db.pool())
            .await
            .expect("Failed to run migrations");

        Self::clean_database(db.pool()).await;

        let rooms_repo = Arc::new(RoomRepository::new(db.pool().clone()));
        let reservations_repo = Arc::new(ReservationRepository::new(db.pool().clone()));
        let guests_repo = Arc::new(GuestRepository::new(db.pool().clone()));
        let users_repo = Arc::new(UserRepository::new(db.pool().clone()));

        let state = AppState {
            config: Arc::new(config.clone()),
            db: db.clone(),
            jwt_decoder: Arc::new(JwtDecoder::new(&config.auth)),
            availability: Arc::new(AvailabilityEngine::new(
                Arc::clone(&reservations_repo),
                Arc::clone(&rooms_repo),
            )),
            reservations: Arc::new(ReservationService::new(
                Arc::clone(&reservations_repo),
                Arc::clone(&rooms_repo),
                config.booking.clone(),
                None,
            )),
            rooms: Arc::new(RoomService::new(
                Arc::clone(&rooms_repo),
                Arc::clone(&reservations_repo),
            )),
            guests: Arc::new(GuestService::new(Arc::clone(&guests_repo))),
            users: Arc::new(UserService::new(Arc::clone(&users_repo), &config.auth)),
            reports: Arc::new(ReportService::new(
                Arc::clone(&rooms_repo),
                Arc::clone(&reservations_repo),
                Arc::clone(&guests_repo),
                Duration::from_secs(config.booking.dashboard_cache_ttl_seconds),
            )),
        };

        let db_pool = db.pool().clone();
        Self {
            router: build_router(state),
            db_pool,
            config,
        }
    }

    /// Truncate all data tables between tests.
    pub async fn clean_database(pool: &PgPool) {
        sqlx::query("TRUNCATE reservations, guests, rooms, users CASCADE")
            .execute(pool)
            .await
            .expect("Failed to clean database");
    }

    /// Create an admin user and return a bearer token for it.
    pub async fn admin_token(&self) -> String {
        self.staff_token("admin@example.com", UserRole::Admin).await
    }

    /// Create a staff user with the given role and return a bearer token.
    pub async fn staff_token(&self, email: &str, role: UserRole) -> String {
        let hasher = innkeeper_auth::password::PasswordHasher::new();
        let hash = hasher.hash_password("test-password-1").unwrap();
        sqlx::query(
            "INSERT INTO users (name, email, password_hash, role) VALUES ($1, $2, $3, $4) \
             ON CONFLICT (email) DO NOTHING",
        )
        .bind("Test Staff")
        .bind(email)
        .bind(&hash)
        .bind(role)
        .execute(&self.db_pool)
        .await
        .expect("Failed to seed user");

        let response = self
            .request(
                "POST",
                "/api/auth/login",
                None,
                Some(json!({ "email": email, "password": "test-password-1" })),
            )
            .await;
        assert_eq!(response.0, StatusCode::OK);
        response.1["data"]["access_token"]
            .as_str()
            .expect("No access token in login response")
            .to_string()
    }

    /// Seed a room directly in the database.
    pub async fn seed_room(&self, number: i32, room_type: &str, price: f64, capacity: i32) {
        sqlx::query(
            "INSERT INTO rooms (number, room_type, price, floor, capacity, amenities) \
             VALUES ($1, $2::room_type, $3, 1, $4, '{}')",
        )
        .bind(number)
        .bind(room_type)
        .bind(price)
        .bind(capacity)
        .execute(&self.db_pool)
        .await
        .expect("Failed to seed room");
    }

    /// Issue a request and return status plus parsed JSON body.
    pub async fn request(
        &self,
        method: &str,
        path: &str,
        token: Option<&str>,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(path);
        if let Some(token) = token {
            builder = builder.header("Authorization", format!("Bearer {token}"));
        }
        let request = match body {
            Some(json) => builder
                .header("Content-Type", "application/json")
                .body(Body::from(json.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .expect("Request failed");

        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("Failed to read body");
        let json = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or(Value::Null)
        };
        (status, json)
    }
}
