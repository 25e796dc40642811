//! Embedded schema migrations.

use tracing::info;

use quizhub_core::error::{AppError, ErrorKind};
use quizhub_core::result::AppResult;

use crate::connection::DatabasePool;

/// Apply every pending migration under `migrations/`.
pub async fn run_migrations(db: &DatabasePool) -> AppResult<()> {
    let migrator = sqlx::migrate!("../../migrations");
    info!(
        available = migrator.iter().count(),
        "Running database migrations"
    );

    migrator.run(db.pool()).await.map_err(|e| {
        AppError::with_source(
            ErrorKind::Database,
            format!("Failed to run migrations: {e}"),
            e,
        )
    })?;

    info!("Database migrations completed");
    Ok(())
}
