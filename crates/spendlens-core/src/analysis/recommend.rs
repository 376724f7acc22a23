//! Recommendation engine
//!
//! Produces the narrative recommendation for an analysis. The rule-based
//! composer is always available and deterministic. When the generation
//! capability is available the engine asks it first and falls back to the
//! rule-based text on any failure, timeout or blank reply.

use std::time::Duration;

use crate::ai::{GenerationClient, TextGenerator};
use crate::config::GenerationConfig;
use crate::models::Transaction;

use super::aggregate::Aggregate;
use super::format::money;
use super::tables::category_tip;

/// Trend detection needs more transactions than this
const TREND_MIN_TRANSACTIONS: usize = 10;
/// Recent half must exceed the older half by this factor
const TREND_FACTOR: f64 = 1.1;
/// Savings rate the `[10, 20)` advice aims for
const TARGET_SAVINGS_RATE: f64 = 20.0;

/// Inputs for one recommendation
pub struct RecommendationInput<'a> {
    pub transactions: &'a [Transaction],
    pub aggregate: &'a Aggregate,
}

/// Limits applied to assisted generation
#[derive(Debug, Clone)]
pub struct GenerationSettings {
    pub timeout: Duration,
    pub max_length: u32,
    pub temperature: f32,
}

impl Default for GenerationSettings {
    fn default() -> Self {
        Self::from(&GenerationConfig::default())
    }
}

impl From<&GenerationConfig> for GenerationSettings {
    fn from(config: &GenerationConfig) -> Self {
        Self {
            timeout: config.timeout,
            max_length: config.max_length,
            temperature: config.temperature,
        }
    }
}

pub struct RecommendationEngine {
    generator: GenerationClient,
    settings: GenerationSettings,
}

impl RecommendationEngine {
    pub fn new(generator: GenerationClient, settings: GenerationSettings) -> Self {
        Self {
            generator,
            settings,
        }
    }

    /// Engine with no generation capability
    pub fn rule_based() -> Self {
        Self::new(GenerationClient::disabled(), GenerationSettings::default())
    }

    pub fn generator(&self) -> &GenerationClient {
        &self.generator
    }

    /// Recommendation text; never empty
    pub async fn recommend(&self, input: &RecommendationInput<'_>, available: bool) -> String {
        if available {
            if let Some(text) = self.assisted(input).await {
                return text;
            }
        }
        rule_based_recommendation(input)
    }

    async fn assisted(&self, input: &RecommendationInput<'_>) -> Option<String> {
        let prompt = build_prompt(input);
        let call = self.generator.generate(
            &prompt,
            self.settings.max_length,
            self.settings.temperature,
        );

        match tokio::time::timeout(self.settings.timeout, call).await {
            Ok(Ok(text)) if !text.trim().is_empty() => {
                tracing::debug!(backend = self.generator.name(), "Assisted recommendation generated");
                Some(text.trim().to_string())
            }
            Ok(Ok(_)) => {
                tracing::warn!(
                    backend = self.generator.name(),
                    "Generation returned blank text, using rule-based recommendation"
                );
                None
            }
            Ok(Err(e)) => {
                tracing::warn!(
                    backend = self.generator.name(),
                    error = %e,
                    "Generation failed, using rule-based recommendation"
                );
                None
            }
            Err(_) => {
                tracing::warn!(
                    backend = self.generator.name(),
                    timeout_secs = self.settings.timeout.as_secs_f64(),
                    "Generation timed out, using rule-based recommendation"
                );
                None
            }
        }
    }
}

/// Structured prompt summarizing the period for the generation backend
pub fn build_prompt(input: &RecommendationInput<'_>) -> String {
    let agg = input.aggregate;
    let mut prompt = String::from(
        "You are a personal finance advisor. Based on the spending data below, give 2-3 short, \
         specific and actionable recommendations in plain prose.\n\n",
    );

    prompt.push_str("Period summary:\n");
    prompt.push_str(&format!("- Total income: {}\n", money(agg.total_income)));
    prompt.push_str(&format!("- Total expenses: {}\n", money(agg.total_expenses)));
    prompt.push_str(&format!("- Net: {}\n", money(agg.net())));
    prompt.push_str(&format!("- Savings rate: {:.1}%\n", agg.savings_rate));
    prompt.push_str(&format!("- Transactions: {}\n\n", input.transactions.len()));

    prompt.push_str("Spending by category:\n");
    if agg.breakdowns.is_empty() {
        prompt.push_str("- (no expenses)\n");
    }
    for b in &agg.breakdowns {
        prompt.push_str(&format!(
            "- {}: {} ({:.1}%)\n",
            b.category,
            money(b.amount),
            b.percentage
        ));
    }

    prompt.push_str("\nRecommendations:");
    prompt
}

/// Deterministic advice composed from the aggregated figures
pub fn rule_based_recommendation(input: &RecommendationInput<'_>) -> String {
    let agg = input.aggregate;
    let mut paragraphs = vec![savings_advice(agg)];

    if let Some(top) = agg.breakdowns.first() {
        paragraphs.push(category_tip(&top.category));
    }

    if let Some(trend) = trend_warning(input.transactions) {
        paragraphs.push(trend);
    }

    paragraphs.join("\n\n")
}

fn savings_advice(agg: &Aggregate) -> String {
    let rate = agg.savings_rate;

    if rate >= 30.0 {
        format!(
            "Fantastic work! You're saving {:.1}% of your income. Put the surplus to work in a \
             high-yield savings account or retirement fund so it keeps growing.",
            rate
        )
    } else if rate >= 20.0 {
        format!(
            "You're in a healthy position with a {:.1}% savings rate. A few small cuts could push \
             you past 30% and speed up your long-term goals.",
            rate
        )
    } else if rate >= 10.0 {
        let target = agg.total_expenses - agg.total_income * (1.0 - TARGET_SAVINGS_RATE / 100.0);
        format!(
            "Your savings rate is {:.1}%. Reducing expenses by {} would bring you to the \
             recommended 20%. Start with your largest category.",
            rate,
            money(target.max(0.0))
        )
    } else if rate >= 0.0 {
        format!(
            "Your savings rate is only {:.1}%. Try the 50/30/20 rule: 50% for needs, 30% for \
             wants and 20% for savings. Review recurring expenses first.",
            rate
        )
    } else {
        format!(
            "You're spending more than you earn ({} over this period). Cut non-essential \
             expenses right away and avoid taking on new debt until your balance is positive.",
            money(agg.net().abs())
        )
    }
}

/// Compare the expense sums of the recent and older halves of the snapshot
fn trend_warning(transactions: &[Transaction]) -> Option<String> {
    if transactions.len() <= TREND_MIN_TRANSACTIONS {
        return None;
    }

    let mut ordered: Vec<&Transaction> = transactions.iter().collect();
    // Newest first; stable for same-day entries
    ordered.sort_by(|a, b| b.date.cmp(&a.date));

    let half = ordered.len() / 2;
    let expense_sum = |txs: &[&Transaction]| -> f64 {
        txs.iter()
            .filter(|t| t.is_expense())
            .map(|t| t.amount)
            .sum()
    };
    let recent = expense_sum(&ordered[..half]);
    let older = expense_sum(&ordered[half..]);

    if recent > older * TREND_FACTOR {
        Some(format!(
            "Your spending is trending upward: {} in your most recent transactions versus {} \
             before. Watch for new recurring costs creeping in.",
            money(recent),
            money(older)
        ))
    } else {
        None
    }
}
