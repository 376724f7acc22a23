//! Period resolution
//!
//! Maps a user-selected period to a concrete `(from, to)` date range
//! anchored on "now". Resolution never fails: unknown selections fall back
//! to the current month.

use chrono::{Datelike, Duration, Months, NaiveDate};
use serde::{Deserialize, Serialize};

/// Selectable analysis periods, in picker order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Period {
    ThisWeek,
    #[default]
    ThisMonth,
    Last3Months,
    Last6Months,
    ThisYear,
}

impl Period {
    /// All periods in picker order (index = position)
    pub fn all() -> &'static [Period] {
        &[
            Self::ThisWeek,
            Self::ThisMonth,
            Self::Last3Months,
            Self::Last6Months,
            Self::ThisYear,
        ]
    }

    /// Period at a picker index; unknown indexes select `ThisMonth`
    pub fn from_index(index: usize) -> Self {
        Self::all().get(index).copied().unwrap_or_default()
    }

    pub fn index(&self) -> usize {
        match self {
            Self::ThisWeek => 0,
            Self::ThisMonth => 1,
            Self::Last3Months => 2,
            Self::Last6Months => 3,
            Self::ThisYear => 4,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ThisWeek => "this-week",
            Self::ThisMonth => "this-month",
            Self::Last3Months => "last-3-months",
            Self::Last6Months => "last-6-months",
            Self::ThisYear => "this-year",
        }
    }

    /// Human-readable name for pickers
    pub fn label(&self) -> &'static str {
        match self {
            Self::ThisWeek => "This Week",
            Self::ThisMonth => "This Month",
            Self::Last3Months => "Last 3 Months",
            Self::Last6Months => "Last 6 Months",
            Self::ThisYear => "This Year",
        }
    }

    /// Resolve to an inclusive `(from, to)` range ending at `now`
    pub fn resolve(&self, now: NaiveDate) -> (NaiveDate, NaiveDate) {
        let from = match self {
            // Weeks start on Sunday
            Self::ThisWeek => now - Duration::days(i64::from(now.weekday().num_days_from_sunday())),
            Self::ThisMonth => now.with_day(1).unwrap_or(now),
            Self::Last3Months => months_back(now, 3),
            Self::Last6Months => months_back(now, 6),
            Self::ThisYear => NaiveDate::from_ymd_opt(now.year(), 1, 1).unwrap_or(now),
        };
        (from, now)
    }
}

impl std::str::FromStr for Period {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().replace('_', "-").as_str() {
            "this-week" | "week" => Ok(Self::ThisWeek),
            "this-month" | "month" => Ok(Self::ThisMonth),
            "last-3-months" | "3m" => Ok(Self::Last3Months),
            "last-6-months" | "6m" => Ok(Self::Last6Months),
            "this-year" | "year" => Ok(Self::ThisYear),
            _ => Err(format!(
                "Unknown period: {}. Available: this-week, this-month, last-3-months, last-6-months, this-year",
                s
            )),
        }
    }
}

impl std::fmt::Display for Period {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Resolve a picker index directly
pub fn resolve(index: usize, now: NaiveDate) -> (NaiveDate, NaiveDate) {
    Period::from_index(index).resolve(now)
}

/// Calendar month subtraction; the day is clamped to the target month's length
fn months_back(date: NaiveDate, months: u32) -> NaiveDate {
    date.checked_sub_months(Months::new(months)).unwrap_or(date)
}
