//! Spendlens Core Library
//!
//! Spending analysis for personal finance data:
//! - Period resolution for the standard reporting windows
//! - Aggregation into totals, savings rate and category breakdowns
//! - Rule-based insights and recommendations
//! - Optional model-assisted recommendations (Ollama) with rule-based fallback
//! - SQLite persistence and CSV import

pub mod ai;
pub mod analysis;
pub mod config;
pub mod db;
pub mod error;
pub mod import;
pub mod models;
pub mod period;
pub mod store;

/// Test utilities including mock Ollama server
#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;

pub use ai::{
    DisabledBackend, GenerationClient, MockBackend, MockReply, OllamaBackend, TextGenerator,
};
pub use analysis::{
    CategoryBreakdown, GenerationSettings, InsightCheck, InsightGenerator, InsightKind,
    SpendingAnalysis, SpendingAnalyzer, SpendingInsight,
};
pub use config::{BackendKind, Config, GenerationConfig};
pub use db::Database;
pub use error::{Error, Result};
pub use models::{Category, NewTransaction, PeriodTotals, Transaction, TransactionType};
pub use period::Period;
pub use store::{MemoryStore, TransactionStore};
