//! Spendlens CLI - Personal spending analysis
//!
//! Usage:
//!   spendlens init                       Initialize database
//!   spendlens import --file CSV          Import transactions
//!   spendlens add -k expense -a 12 -c Shopping
//!   spendlens analyze --period this-month

mod cli;
mod commands;

#[cfg(test)]
mod tests;

use anyhow::{Context, Result};
use clap::Parser;
use spendlens_core::Config;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use cli::*;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Set up logging
    // Priority: RUST_LOG env var > --verbose flag > default (info)
    let filter = if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(false).compact())
        .init();

    let config = Config::load(cli.config.as_deref()).context("Failed to load configuration")?;
    let db_path = cli.db.clone().unwrap_or_else(|| config.database_path.clone());
    let user = cli.user.clone().unwrap_or_else(|| config.default_user.clone());

    match cli.command {
        Commands::Init => commands::cmd_init(&db_path),
        Commands::Import { file } => {
            let db = commands::open_db(&db_path)?;
            commands::cmd_import(&db, &user, &file).map(|_| ())
        }
        Commands::Add {
            kind,
            amount,
            category,
            date,
            description,
        } => {
            let db = commands::open_db(&db_path)?;
            commands::cmd_add(
                &db,
                &user,
                &kind,
                amount,
                &category,
                date.as_deref(),
                description.as_deref(),
            )
            .map(|_| ())
        }
        Commands::List { limit } => {
            let db = commands::open_db(&db_path)?;
            commands::cmd_list(&db, &user, limit)
        }
        Commands::Categories { kind } => {
            let db = commands::open_db(&db_path)?;
            commands::cmd_categories(&db, kind.as_deref())
        }
        Commands::Analyze {
            period,
            index,
            json,
        } => {
            let db = commands::open_db(&db_path)?;
            let period = commands::select_period(period.as_deref(), index)?;
            let today = chrono::Local::now().date_naive();
            commands::cmd_analyze(db, &user, &config.generation, period, today, json).await
        }
        Commands::AiStatus => commands::cmd_ai_status(&config.generation).await,
    }
}
