//! Spending analysis
//!
//! Pipeline for one call: fetch the snapshot, aggregate it, run the insight
//! battery, then produce a recommendation (model-assisted when a generation
//! backend is loaded, rule-based otherwise).
//!
//! - `aggregate` - totals, savings rate, category breakdowns
//! - `insights` - ordered heuristic checks
//! - `recommend` - recommendation text with model fallback
//! - `engine` - `SpendingAnalyzer`, the orchestrator

mod aggregate;
mod engine;
pub mod format;
mod insights;
mod recommend;
pub mod tables;
mod types;

pub use aggregate::{aggregate, savings_rate, Aggregate};
pub use engine::{SpendingAnalyzer, EMPTY_PERIOD_RECOMMENDATION, EMPTY_PERIOD_SUMMARY};
pub use insights::{
    DailyAverageCheck, DominantCategoryCheck, IncomeDiversityCheck, InsightCheck,
    InsightGenerator, InsightInput, SavingsTierCheck, SmallPurchasesCheck, WeekendSpikeCheck,
};
pub use recommend::{
    build_prompt, rule_based_recommendation, GenerationSettings, RecommendationEngine,
    RecommendationInput,
};
pub use types::{CategoryBreakdown, InsightKind, SpendingAnalysis, SpendingInsight};
