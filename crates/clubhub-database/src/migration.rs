//! Applies the schema migrations under `migrations/`.

use sqlx::PgPool;
use tracing::info;

use clubhub_core::error::{AppError, ErrorKind};

/// Bring the database schema up to date.
///
/// Safe to call at every startup; already-applied migrations are skipped.
pub async fn run_migrations(pool: &PgPool) -> Result<(), AppError> {
    sqlx::migrate!("../../migrations")
        .run(pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, format!("Migration failed: {e}"), e)
        })?;

    info!("Database schema is up to date");
    Ok(())
}
