//! CLI argument definitions using clap
//!
//! The actual command implementations are in the `commands` module.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Spendlens - Understand where your money goes
#[derive(Parser)]
#[command(name = "spendlens")]
#[command(about = "Personal spending analysis with insights and recommendations", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Database path (defaults to the configured path)
    #[arg(long, global = true)]
    pub db: Option<PathBuf>,

    /// Config file overriding the built-in defaults
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// User whose transactions to read and write
    #[arg(short, long, global = true)]
    pub user: Option<String>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize the database and seed default categories
    Init,

    /// Import transactions from CSV
    ///
    /// Expected columns: date,type,amount,category,description[,notes]
    Import {
        /// CSV file to import
        #[arg(short, long)]
        file: PathBuf,
    },

    /// Record a single transaction
    Add {
        /// income or expense
        #[arg(short, long)]
        kind: String,

        /// Amount (non-negative)
        #[arg(short, long)]
        amount: f64,

        /// Category name
        #[arg(short, long)]
        category: String,

        /// Date (YYYY-MM-DD or MM/DD/YYYY, defaults to today)
        #[arg(short, long)]
        date: Option<String>,

        /// Free-text description
        #[arg(long)]
        description: Option<String>,
    },

    /// List recent transactions
    List {
        /// Number of transactions to show
        #[arg(short, long, default_value = "20")]
        limit: i64,
    },

    /// List categories
    Categories {
        /// Only show income or expense categories
        #[arg(short, long)]
        kind: Option<String>,
    },

    /// Analyze spending for a period
    Analyze {
        /// Period: this-week, this-month, last-3-months, last-6-months, this-year
        #[arg(short, long, conflicts_with = "index")]
        period: Option<String>,

        /// Period by picker index (0 = this week ... 4 = this year)
        #[arg(short, long)]
        index: Option<usize>,

        /// Print the analysis as JSON
        #[arg(long)]
        json: bool,
    },

    /// Check the text-generation backend
    AiStatus,
}
