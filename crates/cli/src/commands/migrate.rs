//! Database migration command.
//!
//! Migrations are embedded from `crates/server/migrations/`, so the CLI and
//! the server always agree on the schema.

use rolodex_server::config::DatabaseConfig;
use rolodex_server::db;

/// Connect with the configured database settings and apply all migrations.
///
/// # Errors
///
/// Returns an error if configuration is invalid, the database cannot be
/// opened, or a migration fails.
pub async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let config = DatabaseConfig::from_env()?;

    tracing::info!("Connecting to database...");
    let pool = db::create_pool(&config).await?;

    tracing::info!("Running migrations...");
    db::run_migrations(&pool).await?;

    tracing::info!("Migrations complete!");
    pool.close().await;
    Ok(())
}
