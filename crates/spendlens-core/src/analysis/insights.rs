//! Insight generation
//!
//! A fixed, ordered battery of independent checks. Each check looks at the
//! aggregated figures (and, where needed, the raw transactions) and emits at
//! most one insight. Output order follows registration order, which the
//! presentation layer renders top-to-bottom.

use std::collections::HashSet;

use chrono::{Datelike, Weekday};

use crate::models::Transaction;

use super::aggregate::Aggregate;
use super::format::money;
use super::types::{InsightKind, SpendingInsight};

/// Share of total expenses above which the top category is flagged
const DOMINANT_CATEGORY_PERCENT: f64 = 30.0;
/// Purchases below this amount count as "small"
const SMALL_PURCHASE_LIMIT: f64 = 10.0;
/// More small purchases than this triggers the tip
const SMALL_PURCHASE_MIN_COUNT: usize = 5;

/// Inputs shared by every insight check
pub struct InsightInput<'a> {
    pub transactions: &'a [Transaction],
    pub aggregate: &'a Aggregate,
}

/// A single heuristic in the insight battery
pub trait InsightCheck: Send + Sync {
    /// Stable identifier, used in logs
    fn id(&self) -> &'static str;

    fn evaluate(&self, input: &InsightInput<'_>) -> Option<SpendingInsight>;
}

/// Runs the registered checks in order
pub struct InsightGenerator {
    checks: Vec<Box<dyn InsightCheck>>,
}

impl Default for InsightGenerator {
    fn default() -> Self {
        Self::new()
    }
}

impl InsightGenerator {
    /// Create a generator with the built-in checks
    pub fn new() -> Self {
        let mut generator = Self::empty();

        generator.register(Box::new(SavingsTierCheck));
        generator.register(Box::new(DominantCategoryCheck));
        generator.register(Box::new(DailyAverageCheck));
        generator.register(Box::new(WeekendSpikeCheck));
        generator.register(Box::new(SmallPurchasesCheck));
        generator.register(Box::new(IncomeDiversityCheck));

        generator
    }

    /// Create a generator with no checks
    pub fn empty() -> Self {
        Self { checks: vec![] }
    }

    /// Append a check; it runs after everything already registered
    pub fn register(&mut self, check: Box<dyn InsightCheck>) {
        self.checks.push(check);
    }

    pub fn check_ids(&self) -> Vec<&'static str> {
        self.checks.iter().map(|c| c.id()).collect()
    }

    pub fn generate(&self, input: &InsightInput<'_>) -> Vec<SpendingInsight> {
        let insights: Vec<SpendingInsight> = self
            .checks
            .iter()
            .filter_map(|check| {
                let insight = check.evaluate(input);
                if insight.is_some() {
                    tracing::debug!(check = check.id(), "Insight check fired");
                }
                insight
            })
            .collect();

        tracing::debug!(count = insights.len(), "Insight generation complete");
        insights
    }
}

/// Always emits exactly one insight describing the savings tier
pub struct SavingsTierCheck;

impl InsightCheck for SavingsTierCheck {
    fn id(&self) -> &'static str {
        "savings_tier"
    }

    fn evaluate(&self, input: &InsightInput<'_>) -> Option<SpendingInsight> {
        let rate = input.aggregate.savings_rate;

        let insight = if rate >= 30.0 {
            SpendingInsight::new(
                InsightKind::Positive,
                "🌟",
                "Excellent Savings!",
                format!(
                    "You're saving {:.1}% of your income. That's outstanding financial discipline!",
                    rate
                ),
            )
        } else if rate >= 20.0 {
            SpendingInsight::new(
                InsightKind::Positive,
                "👍",
                "Good Savings Rate",
                format!(
                    "You're saving {:.1}% of your income. Push toward 30% to build wealth faster.",
                    rate
                ),
            )
        } else if rate >= 0.0 {
            SpendingInsight::new(
                InsightKind::Warning,
                "📊",
                "Room for Improvement",
                format!(
                    "You're saving {:.1}% of your income. Aim for at least 20% by trimming discretionary spending.",
                    rate
                ),
            )
        } else {
            let shortfall = input.aggregate.net().abs();
            SpendingInsight::new(
                InsightKind::Warning,
                "⚠️",
                "Overspending Alert",
                format!(
                    "You spent {} more than you earned this period.",
                    money(shortfall)
                ),
            )
        };

        Some(insight)
    }
}

/// Flags a single category that takes an outsized share of expenses
pub struct DominantCategoryCheck;

impl InsightCheck for DominantCategoryCheck {
    fn id(&self) -> &'static str {
        "dominant_category"
    }

    fn evaluate(&self, input: &InsightInput<'_>) -> Option<SpendingInsight> {
        let top = input.aggregate.breakdowns.first()?;
        if top.percentage <= DOMINANT_CATEGORY_PERCENT {
            return None;
        }

        Some(SpendingInsight::new(
            InsightKind::Warning,
            "🎯",
            format!("High {} Spending", top.category),
            format!(
                "{} accounts for {:.1}% of your expenses ({}).",
                top.category,
                top.percentage,
                money(top.amount)
            ),
        ))
    }
}

/// Average spend per day across the span of the snapshot
pub struct DailyAverageCheck;

impl InsightCheck for DailyAverageCheck {
    fn id(&self) -> &'static str {
        "daily_average"
    }

    fn evaluate(&self, input: &InsightInput<'_>) -> Option<SpendingInsight> {
        let first = input.transactions.iter().map(|t| t.date).min()?;
        let last = input.transactions.iter().map(|t| t.date).max()?;
        let days = (last - first).num_days().max(1);

        let daily = input.aggregate.total_expenses / days as f64;
        if daily <= 0.0 {
            return None;
        }

        Some(SpendingInsight::new(
            InsightKind::Neutral,
            "📅",
            "Daily Spending Average",
            format!(
                "You're spending about {} per day, which projects to {} per month.",
                money(daily),
                money(daily * 30.0)
            ),
        ))
    }
}

/// Weekend spending compared with weekday spending
///
/// The threshold compares raw sums, not per-day rates.
pub struct WeekendSpikeCheck;

impl InsightCheck for WeekendSpikeCheck {
    fn id(&self) -> &'static str {
        "weekend_spike"
    }

    fn evaluate(&self, input: &InsightInput<'_>) -> Option<SpendingInsight> {
        let (weekend, weekday) = input
            .transactions
            .iter()
            .filter(|t| t.is_expense())
            .fold((0.0, 0.0), |(weekend, weekday), t| {
                match t.date.weekday() {
                    Weekday::Sat | Weekday::Sun => (weekend + t.amount, weekday),
                    _ => (weekend, weekday + t.amount),
                }
            });

        if weekend <= 0.0 || weekend <= weekday * 0.5 {
            return None;
        }

        Some(SpendingInsight::new(
            InsightKind::Tip,
            "🎉",
            "Weekend Spending",
            format!(
                "You spent {} on weekends versus {} on weekdays. Planning weekend activities ahead can keep this in check.",
                money(weekend),
                money(weekday)
            ),
        ))
    }
}

/// Many small purchases that add up
pub struct SmallPurchasesCheck;

impl InsightCheck for SmallPurchasesCheck {
    fn id(&self) -> &'static str {
        "small_purchases"
    }

    fn evaluate(&self, input: &InsightInput<'_>) -> Option<SpendingInsight> {
        let small: Vec<f64> = input
            .transactions
            .iter()
            .filter(|t| t.is_expense() && t.amount < SMALL_PURCHASE_LIMIT)
            .map(|t| t.amount)
            .collect();

        if small.len() <= SMALL_PURCHASE_MIN_COUNT {
            return None;
        }

        let total: f64 = small.iter().sum();
        Some(SpendingInsight::new(
            InsightKind::Tip,
            "☕",
            "Small Purchases Add Up",
            format!(
                "{} purchases under {} added up to {}. Small expenses can quietly drain your budget.",
                small.len(),
                money(SMALL_PURCHASE_LIMIT),
                money(total)
            ),
        ))
    }
}

/// Number of distinct income categories
pub struct IncomeDiversityCheck;

impl InsightCheck for IncomeDiversityCheck {
    fn id(&self) -> &'static str {
        "income_diversity"
    }

    fn evaluate(&self, input: &InsightInput<'_>) -> Option<SpendingInsight> {
        let sources: HashSet<&str> = input
            .transactions
            .iter()
            .filter(|t| t.is_income())
            .map(|t| t.category.as_str())
            .collect();

        if sources.len() >= 3 {
            Some(SpendingInsight::new(
                InsightKind::Positive,
                "💼",
                "Diversified Income",
                format!(
                    "You have {} income sources. Multiple income streams add financial resilience.",
                    sources.len()
                ),
            ))
        } else if sources.len() == 1 && input.aggregate.total_income > 0.0 {
            let source = sources.iter().next().copied().unwrap_or_default();
            Some(SpendingInsight::new(
                InsightKind::Tip,
                "💡",
                "Single Income Source",
                format!(
                    "All of your income comes from {}. Consider building a second income stream for more security.",
                    source
                ),
            ))
        } else {
            None
        }
    }
}
