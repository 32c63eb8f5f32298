//! Northwind CLI - Database migrations and management tools.
//!
//! # Usage
//!
//! ```bash
//! # Run database migrations
//! nw-cli migrate
//!
//! # Load a YAML fixture through the service layer
//! nw-cli seed crates/api/fixtures/northwind.yaml
//!
//! # Show row counts
//! nw-cli stats
//! ```

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::path::PathBuf;

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "nw-cli")]
#[command(author, version, about = "Northwind CLI tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run database migrations
    Migrate,
    /// Seed the database from a YAML fixture
    Seed {
        /// Path to the fixture file
        file: PathBuf,
    },
    /// Show row counts for every table
    Stats,
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    if let Err(e) = run(cli).await {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), commands::CommandError> {
    match cli.command {
        Commands::Migrate => commands::migrate::run().await,
        Commands::Seed { file } => commands::seed::run(&file).await,
        Commands::Stats => commands::stats::run().await,
    }
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_seed() {
        let cli = Cli::try_parse_from(["nw-cli", "seed", "fixture.yaml"]);
        assert!(matches!(
            cli.map(|cli| cli.command),
            Ok(Commands::Seed { file }) if file == PathBuf::from("fixture.yaml")
        ));
    }

    #[test]
    fn test_seed_requires_file() {
        assert!(Cli::try_parse_from(["nw-cli", "seed"]).is_err());
    }
}
