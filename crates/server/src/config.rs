//! Server configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! All variables are optional.
//!
//! - `ROLODEX_DATABASE_URL` - `SQLite` connection string (falls back to
//!   `DATABASE_URL`, then `sqlite://rolodex.db`)
//! - `ROLODEX_HOST` - Bind address (default: 127.0.0.1)
//! - `ROLODEX_PORT` - Listen port (default: 5000)
//! - `ROLODEX_MAX_CONNECTIONS` - Pool size (default: 5)
//! - `ROLODEX_ACQUIRE_TIMEOUT_SECS` - Pool acquire timeout (default: 10)
//! - `ROLODEX_AUTO_MIGRATE` - Apply migrations on startup (default: true)
//! - `ROLODEX_CORS_ORIGINS` - Comma-separated browser origins allowed to call the API
//! - `LOG_FORMAT` - `json` for JSON log lines, anything else for human-readable
//! - `SENTRY_DSN` - Sentry error tracking DSN
//! - `SENTRY_ENVIRONMENT` - Sentry environment tag

use std::net::{IpAddr, SocketAddr};
use std::time::Duration;

use secrecy::SecretString;
use thiserror::Error;

const DEFAULT_DATABASE_URL: &str = "sqlite://rolodex.db";

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Database pool configuration.
#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    /// `SQLite` connection URL (may embed a filesystem path)
    pub url: SecretString,
    /// Maximum pooled connections
    pub max_connections: u32,
    /// How long a request waits for a free connection
    pub acquire_timeout: Duration,
}

impl DatabaseConfig {
    /// Single-connection in-memory database, used by tests and demos.
    ///
    /// The pool must stay at one connection: every `SQLite` in-memory
    /// connection opens its own empty database.
    #[must_use]
    pub fn in_memory() -> Self {
        Self {
            url: SecretString::from("sqlite::memory:"),
            max_connections: 1,
            acquire_timeout: Duration::from_secs(10),
        }
    }
}

/// Log output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

/// Server application configuration.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Database pool settings
    pub database: DatabaseConfig,
    /// IP address to bind the server to
    pub host: IpAddr,
    /// Port to listen on
    pub port: u16,
    /// Apply embedded migrations before serving
    pub auto_migrate: bool,
    /// Browser origins allowed by CORS (empty disables the CORS layer)
    pub cors_origins: Vec<String>,
    /// Log line format
    pub log_format: LogFormat,
    /// Sentry DSN for error tracking
    pub sentry_dsn: Option<String>,
    /// Sentry environment tag
    pub sentry_environment: Option<String>,
}

impl ServerConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is present but cannot be parsed.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let database = DatabaseConfig::from_env()?;
        let host = parse_env("ROLODEX_HOST", "127.0.0.1")?;
        let port = parse_env("ROLODEX_PORT", "5000")?;
        let auto_migrate = parse_bool_env("ROLODEX_AUTO_MIGRATE", true)?;
        let cors_origins = get_optional_env("ROLODEX_CORS_ORIGINS")
            .map(|raw| parse_origins(&raw))
            .unwrap_or_default();
        let log_format = match get_optional_env("LOG_FORMAT").as_deref() {
            Some(f) if f.eq_ignore_ascii_case("json") => LogFormat::Json,
            _ => LogFormat::Pretty,
        };

        Ok(Self {
            database,
            host,
            port,
            auto_migrate,
            cors_origins,
            log_format,
            sentry_dsn: get_optional_env("SENTRY_DSN"),
            sentry_environment: get_optional_env("SENTRY_ENVIRONMENT"),
        })
    }

    /// Configuration for tests: in-memory database, no CORS, no Sentry.
    #[must_use]
    pub fn for_tests() -> Self {
        Self {
            database: DatabaseConfig::in_memory(),
            host: IpAddr::from([127, 0, 0, 1]),
            port: 0,
            auto_migrate: true,
            cors_origins: Vec::new(),
            log_format: LogFormat::Pretty,
            sentry_dsn: None,
            sentry_environment: None,
        }
    }

    /// Returns the socket address for binding the server.
    #[must_use]
    pub const fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

impl DatabaseConfig {
    /// Load database settings from environment variables.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidEnvVar` if a numeric setting cannot be parsed.
    pub fn from_env() -> Result<Self, ConfigError> {
        let acquire_secs: u64 = parse_env("ROLODEX_ACQUIRE_TIMEOUT_SECS", "10")?;
        Ok(Self {
            url: get_database_url("ROLODEX_DATABASE_URL"),
            max_connections: parse_env("ROLODEX_MAX_CONNECTIONS", "5")?,
            acquire_timeout: Duration::from_secs(acquire_secs),
        })
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Get database URL with fallback to generic `DATABASE_URL` (what sqlx tooling reads).
fn get_database_url(primary_key: &str) -> SecretString {
    std::env::var(primary_key)
        .or_else(|_| std::env::var("DATABASE_URL"))
        .map_or_else(
            |_| SecretString::from(DEFAULT_DATABASE_URL),
            SecretString::from,
        )
}

/// Get an optional environment variable.
fn get_optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}

/// Get an environment variable with a default value.
fn get_env_or_default(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

/// Parse an environment variable, falling back to `default` when unset.
fn parse_env<T>(key: &str, default: &str) -> Result<T, ConfigError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    get_env_or_default(key, default)
        .trim()
        .parse::<T>()
        .map_err(|e| ConfigError::InvalidEnvVar(key.to_string(), e.to_string()))
}

/// Parse a boolean flag (`true`/`false`/`1`/`0`/`yes`/`no`).
fn parse_bool_env(key: &str, default: bool) -> Result<bool, ConfigError> {
    let Some(raw) = get_optional_env(key) else {
        return Ok(default);
    };
    parse_bool(&raw).ok_or_else(|| {
        ConfigError::InvalidEnvVar(key.to_string(), format!("expected a boolean, got '{raw}'"))
    })
}

fn parse_bool(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Some(true),
        "false" | "0" | "no" | "off" => Some(false),
        _ => None,
    }
}

/// Split a comma-separated origin list, dropping blanks and trailing slashes.
fn parse_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|origin| origin.trim().trim_end_matches('/'))
        .filter(|origin| !origin.is_empty())
        .map(str::to_owned)
        .collect()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_bool() {
        assert_eq!(parse_bool("true"), Some(true));
        assert_eq!(parse_bool(" YES "), Some(true));
        assert_eq!(parse_bool("0"), Some(false));
        assert_eq!(parse_bool("off"), Some(false));
        assert_eq!(parse_bool("maybe"), None);
    }

    #[test]
    fn test_parse_origins() {
        let origins = parse_origins(
            "https://crm.example.com/, http://localhost:3000 ,,https://admin.example.com",
        );
        assert_eq!(
            origins,
            vec![
                "https://crm.example.com".to_string(),
                "http://localhost:3000".to_string(),
                "https://admin.example.com".to_string(),
            ]
        );
    }

    #[test]
    fn test_parse_origins_empty() {
        assert!(parse_origins(" , ").is_empty());
    }

    #[test]
    fn test_socket_addr() {
        let config = ServerConfig {
            port: 5000,
            ..ServerConfig::for_tests()
        };

        let addr = config.socket_addr();
        assert_eq!(addr.ip().to_string(), "127.0.0.1");
        assert_eq!(addr.port(), 5000);
    }

    #[test]
    fn test_database_config_debug_redacts_url() {
        let config = DatabaseConfig {
            url: SecretString::from("sqlite:///srv/private/customers.db"),
            max_connections: 5,
            acquire_timeout: Duration::from_secs(10),
        };

        let debug_output = format!("{config:?}");
        assert!(!debug_output.contains("/srv/private/customers.db"));
        assert!(debug_output.contains("max_connections"));
    }

    #[test]
    fn test_in_memory_is_single_connection() {
        assert_eq!(DatabaseConfig::in_memory().max_connections, 1);
    }
}
