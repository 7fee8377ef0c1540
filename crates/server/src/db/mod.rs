//! Database operations for the Rolodex `SQLite` store.
//!
//! ## Tables
//!
//! - `customers` - Customer records, unique on `phone_number`
//! - `addresses` - Postal addresses, `ON DELETE CASCADE` from `customers`
//!
//! # Migrations
//!
//! Migrations are stored in `crates/server/migrations/` and embedded into the
//! binary. They run on server startup unless `ROLODEX_AUTO_MIGRATE=false`, or
//! explicitly via:
//! ```bash
//! cargo run -p rolodex-cli -- migrate
//! ```

pub mod addresses;
pub mod customers;

use std::str::FromStr;

use secrecy::ExposeSecret;
use sqlx::SqlitePool;
use sqlx::migrate::MigrateError;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use thiserror::Error;

pub use addresses::AddressRepository;
pub use customers::CustomerRepository;

use crate::config::DatabaseConfig;

/// Errors that can occur during repository operations.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// Database error from sqlx.
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Requested entity was not found.
    #[error("not found")]
    NotFound,

    /// Constraint violation (e.g., unique phone number).
    #[error("constraint violation: {0}")]
    Conflict(String),
}

impl RepositoryError {
    /// The message the store itself reported, without sqlx's framing.
    #[must_use]
    pub fn store_message(&self) -> String {
        match self {
            Self::Database(sqlx::Error::Database(db_err)) => db_err.message().to_owned(),
            Self::Database(e) => e.to_string(),
            Self::NotFound => "not found".to_owned(),
            Self::Conflict(msg) => msg.clone(),
        }
    }
}

/// Create a `SQLite` connection pool.
///
/// Foreign keys are enforced on every connection so address rows cascade with
/// their customer. The database file is created if it does not exist.
///
/// # Errors
///
/// Returns `sqlx::Error` if the URL is invalid or the connection cannot be established.
pub async fn create_pool(config: &DatabaseConfig) -> Result<SqlitePool, sqlx::Error> {
    let options = SqliteConnectOptions::from_str(config.url.expose_secret())?
        .create_if_missing(true)
        .foreign_keys(true);

    SqlitePoolOptions::new()
        .max_connections(config.max_connections)
        .acquire_timeout(config.acquire_timeout)
        // In-memory databases vanish with their last connection
        .idle_timeout(None)
        .max_lifetime(None)
        .connect_with(options)
        .await
}

/// Apply the embedded schema migrations.
///
/// # Errors
///
/// Returns `MigrateError` if a migration fails or the applied history diverges.
pub async fn run_migrations(pool: &SqlitePool) -> Result<(), MigrateError> {
    sqlx::migrate!("./migrations").run(pool).await
}

/// Returns `true` if the error is a UNIQUE constraint violation.
pub(crate) fn is_unique_violation(err: &sqlx::Error) -> bool {
    if let sqlx::Error::Database(db_err) = err {
        // Builds without extended result codes only report the message
        return db_err.is_unique_violation()
            || db_err.message().contains("UNIQUE constraint failed");
    }
    false
}

/// Build a `LIKE` pattern matching `term` anywhere, escaping `%`, `_`, and `\`.
///
/// Use with `ESCAPE '\'` in the SQL text.
pub(crate) fn contains_pattern(term: &str) -> String {
    let mut pattern = String::with_capacity(term.len() + 2);
    pattern.push('%');
    for c in term.chars() {
        if matches!(c, '%' | '_' | '\\') {
            pattern.push('\\');
        }
        pattern.push(c);
    }
    pattern.push('%');
    pattern
}

/// Open an in-memory pool with the schema applied.
#[cfg(test)]
pub(crate) async fn test_pool() -> SqlitePool {
    let pool = create_pool(&DatabaseConfig::in_memory())
        .await
        .unwrap_or_else(|e| panic!("failed to open in-memory database: {e}"));
    run_migrations(&pool)
        .await
        .unwrap_or_else(|e| panic!("failed to migrate in-memory database: {e}"));
    pool
}
