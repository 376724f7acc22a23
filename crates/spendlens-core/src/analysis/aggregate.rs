//! Aggregation of a transaction snapshot into totals and category breakdowns

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::models::Transaction;

use super::tables::category_color;
use super::types::CategoryBreakdown;

/// Totals and breakdowns for one transaction snapshot
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Aggregate {
    pub total_income: f64,
    pub total_expenses: f64,
    pub savings_rate: f64,
    pub breakdowns: Vec<CategoryBreakdown>,
}

impl Aggregate {
    pub fn net(&self) -> f64 {
        self.total_income - self.total_expenses
    }
}

/// Reduce transactions into totals, savings rate and per-category expenses
pub fn aggregate(transactions: &[Transaction]) -> Aggregate {
    let total_income: f64 = transactions
        .iter()
        .filter(|t| t.is_income())
        .map(|t| t.amount)
        .sum();
    let total_expenses: f64 = transactions
        .iter()
        .filter(|t| t.is_expense())
        .map(|t| t.amount)
        .sum();

    Aggregate {
        total_income,
        total_expenses,
        savings_rate: savings_rate(total_income, total_expenses),
        breakdowns: category_breakdowns(transactions, total_expenses),
    }
}

/// `(income - expenses) / income * 100`, or 0 without income
pub fn savings_rate(total_income: f64, total_expenses: f64) -> f64 {
    if total_income > 0.0 {
        (total_income - total_expenses) / total_income * 100.0
    } else {
        0.0
    }
}

fn category_breakdowns(transactions: &[Transaction], total_expenses: f64) -> Vec<CategoryBreakdown> {
    if total_expenses <= 0.0 {
        return Vec::new();
    }

    // Groups in first-encounter order
    let mut order: Vec<&str> = Vec::new();
    let mut sums: HashMap<&str, f64> = HashMap::new();
    for tx in transactions.iter().filter(|t| t.is_expense()) {
        let entry = sums.entry(tx.category.as_str()).or_insert_with(|| {
            order.push(tx.category.as_str());
            0.0
        });
        *entry += tx.amount;
    }

    let mut breakdowns: Vec<CategoryBreakdown> = order
        .into_iter()
        .map(|category| {
            let amount = sums.get(category).copied().unwrap_or(0.0);
            CategoryBreakdown {
                category: category.to_string(),
                amount,
                percentage: amount / total_expenses * 100.0,
                color: category_color(category).to_string(),
            }
        })
        .collect();

    // sort_by is stable: ties keep encounter order
    breakdowns.sort_by(|a, b| {
        b.amount
            .partial_cmp(&a.amount)
            .unwrap_or(std::cmp::Ordering::Equal)
    });

    breakdowns
}
