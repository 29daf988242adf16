//! Server wiring: repositories, services, router, and graceful shutdown.

use std::sync::Arc;
use std::time::Duration;

use tracing::info;

use innkeeper_api::{build_router, AppState};
use innkeeper_auth::jwt::JwtDecoder;
use innkeeper_core::config::AppConfig;
use innkeeper_core::error::AppError;
use innkeeper_database::repositories::guest::GuestRepository;
use innkeeper_database::repositories::reservation::ReservationRepository;
use innkeeper_database::repositories::room::RoomRepository;
use innkeeper_database::repositories::user::UserRepository;
use innkeeper_database::DatabasePool;
use innkeeper_service::{
    AvailabilityEngine, GuestService, LogMailer, NotificationDispatcher, ReportService,
    ReservationService, RoomService, UserService,
};

/// Connect, migrate, wire everything together, and serve until shutdown.
pub async fn run(config: AppConfig) -> Result<(), AppError> {
    info!("Starting Innkeeper v{}", env!("CARGO_PKG_VERSION"));

    let db = DatabasePool::connect(&config.database).await?;
    innkeeper_database::migration::run_migrations(db.pool()).await?;

    let rooms_repo = Arc::new(RoomRepository::new(db.pool().clone()));
    let reservations_repo = Arc::new(ReservationRepository::new(db.pool().clone()));
    let guests_repo = Arc::new(GuestRepository::new(db.pool().clone()));
    let users_repo = Arc::new(UserRepository::new(db.pool().clone()));

    let dispatcher = if config.notification.enabled {
        let mailer = Arc::new(LogMailer::new(config.notification.from_address.clone()));
        Some(NotificationDispatcher::spawn(mailer, &config.notification))
    } else {
        info!("Notifications disabled");
        None
    };
    let event_sender = dispatcher.as_ref().map(|d| d.sender());

    let availability = Arc::new(AvailabilityEngine::new(
        Arc::clone(&reservations_repo),
        Arc::clone(&rooms_repo),
    ));
    let reservations = Arc::new(ReservationService::new(
        Arc::clone(&reservations_repo),
        Arc::clone(&rooms_repo),
        config.booking.clone(),
        event_sender,
    ));
    let rooms = Arc::new(RoomService::new(
        Arc::clone(&rooms_repo),
        Arc::clone(&reservations_repo),
    ));
    let guests = Arc::new(GuestService::new(Arc::clone(&guests_repo)));
    let users = Arc::new(UserService::new(Arc::clone(&users_repo), &config.auth));
    let reports = Arc::new(ReportService::new(
        Arc::clone(&rooms_repo),
        Arc::clone(&reservations_repo),
        Arc::clone(&guests_repo),
        Duration::from_secs(config.booking.dashboard_cache_ttl_seconds),
    ));
    let jwt_decoder = Arc::new(JwtDecoder::new(&config.auth));

    let bind_address = config.server.bind_address();
    let state = AppState {
        config: Arc::new(config),
        db: db.clone(),
        jwt_decoder,
        availability,
        reservations,
        rooms,
        guests,
        users,
        reports,
    };

    let router = build_router(state);

    let listener = tokio::net::TcpListener::bind(&bind_address)
        .await
        .map_err(|e| AppError::internal(format!("Failed to bind {bind_address}: {e}")))?;
    info!(address = %bind_address, "Listening");

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| AppError::internal(format!("Server failed: {e}")))?;

    info!("Shutting down");
    if let Some(dispatcher) = dispatcher {
        dispatcher.shutdown().await;
    }
    db.close().await;
    Ok(())
}

/// Resolves on Ctrl-C or SIGTERM.
async fn shutdown_signal() {
    let ctrl_c = async {
        let _ = tokio::signal::ctrl_c().await;
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(_) => std::future::pending::<()>().await,
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
