//! Rolodex CLI - Database migrations and demo data.
//!
//! # Usage
//!
//! ```bash
//! # Apply database migrations
//! rolodex migrate
//!
//! # Insert 25 demo customers, each with one address
//! rolodex seed
//!
//! # Insert a specific number of demo customers
//! rolodex seed --count 100
//! ```
//!
//! Both commands read the same database settings as the server
//! (`ROLODEX_DATABASE_URL`, falling back to `DATABASE_URL`).

#![cfg_attr(not(test), forbid(unsafe_code))]

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "rolodex")]
#[command(author, version, about = "Rolodex operator tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Apply database migrations
    Migrate,
    /// Insert demo customers and addresses
    Seed {
        /// Number of customers to create
        #[arg(short, long, default_value_t = 25)]
        count: u32,
    },
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    if let Err(e) = run(cli).await {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    // Load .env file if present (ignore errors if not found)
    let _ = dotenvy::dotenv();

    match cli.command {
        Commands::Migrate => commands::migrate::run().await?,
        Commands::Seed { count } => {
            let report = commands::seed::run(count).await?;
            tracing::info!(
                created = report.created,
                skipped = report.skipped,
                "Seeding complete"
            );
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_seed_count_defaults_to_25() {
        let cli = Cli::try_parse_from(["rolodex", "seed"]).unwrap_or_else(|e| panic!("{e}"));
        assert!(matches!(cli.command, Commands::Seed { count: 25 }));
    }

    #[test]
    fn test_seed_count_flag() {
        let cli = Cli::try_parse_from(["rolodex", "seed", "--count", "3"])
            .unwrap_or_else(|e| panic!("{e}"));
        assert!(matches!(cli.command, Commands::Seed { count: 3 }));
    }
}
