//! Database migration command.
//!
//! Migrations live in `crates/server/migrations/` and are embedded at
//! compile time; the server never runs them on startup.
//!
//! # Environment Variables
//!
//! - `BEYOND_DATABASE_URL` - `PostgreSQL` connection string

use sqlx::PgPool;
use thiserror::Error;

/// Errors that can occur while migrating.
#[derive(Debug, Error)]
pub enum MigrateError {
    #[error("missing environment variable: {0}")]
    MissingEnvVar(&'static str),
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
    #[error("migration error: {0}")]
    Migrate(#[from] sqlx::migrate::MigrateError),
}

/// Run all pending migrations.
///
/// # Errors
///
/// Returns `MigrateError` if the database is unreachable or a migration
/// fails.
pub async fn run() -> Result<(), MigrateError> {
    dotenvy::dotenv().ok();

    let database_url = std::env::var("BEYOND_DATABASE_URL")
        .map_err(|_| MigrateError::MissingEnvVar("BEYOND_DATABASE_URL"))?;

    tracing::info!("Connecting to database...");
    let pool = PgPool::connect(&database_url).await?;

    tracing::info!("Running migrations...");
    sqlx::migrate!("../server/migrations").run(&pool).await?;

    tracing::info!("Migrations complete!");
    Ok(())
}
