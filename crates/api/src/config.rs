//! API configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Backend
//! - `NORTHWIND_SERVICE_TYPE` - `in-memory` (default) or `postgres`
//! - `NORTHWIND_DATABASE_URL` - `PostgreSQL` connection string, falls back to
//!   `DATABASE_URL`. Required when the backend is `postgres`.
//! - `NORTHWIND_SEED_FILE` - YAML fixture loaded into the in-memory store at
//!   start-up
//!
//! ## Optional
//! - `NORTHWIND_HOST` - Bind address (default: 127.0.0.1)
//! - `NORTHWIND_PORT` - Listen port (default: 5000)
//! - `NORTHWIND_PICTURE_MAX_FILE_SIZE` - Largest accepted picture or photo in
//!   bytes (default: 1048576)
//! - `SENTRY_DSN` - Sentry error tracking DSN
//! - `SENTRY_ENVIRONMENT` - Sentry environment name
//! - `SENTRY_SAMPLE_RATE` - Error sample rate (default: 1.0)
//! - `SENTRY_TRACES_SAMPLE_RATE` - Traces sample rate (default: 0.1)

use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;
use std::str::FromStr;

use secrecy::SecretString;
use thiserror::Error;

const DEFAULT_HOST: &str = "127.0.0.1";
const DEFAULT_PORT: &str = "5000";
const DEFAULT_PICTURE_MAX_FILE_SIZE: &str = "1048576";

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Which store backs the services.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ServiceBackend {
    /// Process-local tables, lost on restart.
    #[default]
    InMemory,
    /// `PostgreSQL` through sqlx.
    Postgres,
}

impl FromStr for ServiceBackend {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "in-memory" | "inmemory" | "memory" => Ok(Self::InMemory),
            "postgres" | "postgresql" | "sql" => Ok(Self::Postgres),
            other => Err(format!("unknown service type '{other}'")),
        }
    }
}

impl std::fmt::Display for ServiceBackend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InMemory => f.write_str("in-memory"),
            Self::Postgres => f.write_str("postgres"),
        }
    }
}

/// API application configuration.
#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// Selected backend
    pub backend: ServiceBackend,
    /// `PostgreSQL` database connection URL (contains password)
    pub database_url: Option<SecretString>,
    /// IP address to bind the server to
    pub host: IpAddr,
    /// Port to listen on
    pub port: u16,
    /// Largest picture or photo payload accepted, in bytes
    pub picture_max_file_size: usize,
    /// Fixture loaded into the in-memory store at start-up
    pub seed_file: Option<PathBuf>,
    /// Sentry DSN for error tracking
    pub sentry_dsn: Option<String>,
    /// Sentry environment (e.g., "development", "staging", "production")
    pub sentry_environment: Option<String>,
    /// Sentry error sample rate (0.0 to 1.0)
    pub sentry_sample_rate: f32,
    /// Sentry traces sample rate for performance monitoring (0.0 to 1.0)
    pub sentry_traces_sample_rate: f32,
}

impl ApiConfig {
    /// Load configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a required variable is missing or a value
    /// cannot be parsed.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let backend = parse_env(
            "NORTHWIND_SERVICE_TYPE",
            &get_env_or_default("NORTHWIND_SERVICE_TYPE", "in-memory"),
        )?;

        let database_url = match backend {
            ServiceBackend::Postgres => Some(get_database_url("NORTHWIND_DATABASE_URL")?),
            ServiceBackend::InMemory => None,
        };

        let host = parse_env(
            "NORTHWIND_HOST",
            &get_env_or_default("NORTHWIND_HOST", DEFAULT_HOST),
        )?;
        let port = parse_env(
            "NORTHWIND_PORT",
            &get_env_or_default("NORTHWIND_PORT", DEFAULT_PORT),
        )?;
        let picture_max_file_size = parse_env(
            "NORTHWIND_PICTURE_MAX_FILE_SIZE",
            &get_env_or_default(
                "NORTHWIND_PICTURE_MAX_FILE_SIZE",
                DEFAULT_PICTURE_MAX_FILE_SIZE,
            ),
        )?;

        let sentry_sample_rate = parse_env(
            "SENTRY_SAMPLE_RATE",
            &get_env_or_default("SENTRY_SAMPLE_RATE", "1.0"),
        )?;
        let sentry_traces_sample_rate = parse_env(
            "SENTRY_TRACES_SAMPLE_RATE",
            &get_env_or_default("SENTRY_TRACES_SAMPLE_RATE", "0.1"),
        )?;

        Ok(Self {
            backend,
            database_url,
            host,
            port,
            picture_max_file_size,
            seed_file: get_optional_env("NORTHWIND_SEED_FILE").map(PathBuf::from),
            sentry_dsn: get_optional_env("SENTRY_DSN"),
            sentry_environment: get_optional_env("SENTRY_ENVIRONMENT"),
            sentry_sample_rate,
            sentry_traces_sample_rate,
        })
    }

    /// In-memory configuration with default limits, bound to localhost.
    #[must_use]
    pub fn in_memory() -> Self {
        Self {
            backend: ServiceBackend::InMemory,
            database_url: None,
            host: IpAddr::from([127, 0, 0, 1]),
            port: 5000,
            picture_max_file_size: 1_048_576,
            seed_file: None,
            sentry_dsn: None,
            sentry_environment: None,
            sentry_sample_rate: 1.0,
            sentry_traces_sample_rate: 0.1,
        }
    }

    /// Get the socket address to bind to.
    #[must_use]
    pub const fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Get database URL with fallback to generic `DATABASE_URL` (used by Fly.io postgres attach).
fn get_database_url(primary_key: &str) -> Result<SecretString, ConfigError> {
    if let Ok(value) = std::env::var(primary_key) {
        return Ok(SecretString::from(value));
    }
    if let Ok(value) = std::env::var("DATABASE_URL") {
        return Ok(SecretString::from(value));
    }
    Err(ConfigError::MissingEnvVar(primary_key.to_string()))
}

/// Get an optional environment variable.
fn get_optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}

/// Get an environment variable with a default value.
fn get_env_or_default(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

/// Parse a raw value, reporting the variable name on failure.
fn parse_env<T>(key: &str, raw: &str) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    raw.trim()
        .parse()
        .map_err(|e: T::Err| ConfigError::InvalidEnvVar(key.to_string(), e.to_string()))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_service_backend_from_str() {
        assert_eq!(
            "in-memory".parse::<ServiceBackend>().unwrap(),
            ServiceBackend::InMemory
        );
        assert_eq!(
            "Postgres".parse::<ServiceBackend>().unwrap(),
            ServiceBackend::Postgres
        );
        assert!("mssql".parse::<ServiceBackend>().is_err());
    }

    #[test]
    fn test_service_backend_display_round_trips() {
        for backend in [ServiceBackend::InMemory, ServiceBackend::Postgres] {
            assert_eq!(backend.to_string().parse::<ServiceBackend>().unwrap(), backend);
        }
    }

    #[test]
    fn test_parse_env_reports_variable() {
        let err = parse_env::<u16>("NORTHWIND_PORT", "eighty").unwrap_err();
        assert!(
            matches!(err, ConfigError::InvalidEnvVar(ref key, _) if key == "NORTHWIND_PORT")
        );
    }

    #[test]
    fn test_parse_env_rejects_negative_size() {
        assert!(parse_env::<usize>("NORTHWIND_PICTURE_MAX_FILE_SIZE", "-1").is_err());
        assert_eq!(
            parse_env::<usize>("NORTHWIND_PICTURE_MAX_FILE_SIZE", " 2048 ").unwrap(),
            2048
        );
    }

    #[test]
    fn test_in_memory_defaults() {
        let config = ApiConfig::in_memory();
        assert_eq!(config.backend, ServiceBackend::InMemory);
        assert_eq!(config.socket_addr().to_string(), "127.0.0.1:5000");
        assert_eq!(config.picture_max_file_size, 1_048_576);
    }
}
