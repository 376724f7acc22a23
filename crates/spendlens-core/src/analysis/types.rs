//! Core types for the analysis engine

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Classification of an insight, used by the presentation layer for styling
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InsightKind {
    Positive,
    Warning,
    Neutral,
    Tip,
}

impl InsightKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            InsightKind::Positive => "positive",
            InsightKind::Warning => "warning",
            InsightKind::Neutral => "neutral",
            InsightKind::Tip => "tip",
        }
    }
}

impl fmt::Display for InsightKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A single observation about the analyzed period
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpendingInsight {
    pub title: String,
    /// Fully formatted, numbers embedded
    pub description: String,
    pub icon: String,
    pub kind: InsightKind,
}

impl SpendingInsight {
    pub fn new(
        kind: InsightKind,
        icon: impl Into<String>,
        title: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            icon: icon.into(),
            kind,
        }
    }
}

/// Expense total for one category within the analyzed period
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryBreakdown {
    pub category: String,
    pub amount: f64,
    /// Share of total expenses, 0-100
    pub percentage: f64,
    /// Hex display color
    pub color: String,
}

/// Result of one analysis call
///
/// Built fresh per call and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpendingAnalysis {
    pub summary: String,
    pub insights: Vec<SpendingInsight>,
    pub category_breakdowns: Vec<CategoryBreakdown>,
    pub total_income: f64,
    pub total_expenses: f64,
    /// Percentage, negative when expenses exceed income
    pub savings_rate: f64,
    pub recommendation: String,
    pub analyzed_at: DateTime<Utc>,
    pub period_label: String,
}

impl SpendingAnalysis {
    pub fn net(&self) -> f64 {
        self.total_income - self.total_expenses
    }
}
