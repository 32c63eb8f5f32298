//! Subcommand implementations.
//!
//! Every command talks to `PostgreSQL` through `NORTHWIND_DATABASE_URL`
//! (falling back to `DATABASE_URL`).

pub mod migrate;
pub mod seed;
pub mod stats;

use northwind_api::config::{ApiConfig, ServiceBackend};
use northwind_api::services::{BackendError, Services};
use northwind_api::seed::SeedError;
use northwind_core::ServiceError;
use secrecy::SecretString;

/// Errors shared by every command.
#[derive(Debug, thiserror::Error)]
pub enum CommandError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(&'static str),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    #[error(transparent)]
    Backend(#[from] BackendError),

    #[error(transparent)]
    Seed(#[from] SeedError),

    #[error(transparent)]
    Service(#[from] ServiceError),
}

/// Read the database URL from the environment.
fn database_url() -> Result<SecretString, CommandError> {
    dotenvy::dotenv().ok();

    std::env::var("NORTHWIND_DATABASE_URL")
        .or_else(|_| std::env::var("DATABASE_URL"))
        .map(SecretString::from)
        .map_err(|_| CommandError::MissingEnvVar("NORTHWIND_DATABASE_URL"))
}

/// Connect the postgres-backed services.
async fn connect() -> Result<Services, CommandError> {
    let config = ApiConfig {
        backend: ServiceBackend::Postgres,
        database_url: Some(database_url()?),
        ..ApiConfig::in_memory()
    };

    tracing::info!("Connecting to database...");
    Ok(Services::from_config(&config).await?)
}
