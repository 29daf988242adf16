//! Schema migration runner.

use sqlx::PgPool;
use tracing::info;

use innkeeper_core::error::{AppError, ErrorKind};

/// Apply any pending migrations, bringing the schema up to date.
///
/// Runs at startup before the pool is handed to the repositories; a failed
/// migration aborts the boot instead of serving against a stale schema.
pub async fn run_migrations(pool: &PgPool) -> Result<(), AppError> {
    let migrator = sqlx::migrate!("../../migrations");

    migrator.run(pool).await.map_err(|e| {
        AppError::with_source(ErrorKind::Database, format!("Migration failed: {e}"), e)
    })?;

    info!(
        migrations = migrator.iter().count(),
        "Database schema is up to date"
    );
    Ok(())
}
