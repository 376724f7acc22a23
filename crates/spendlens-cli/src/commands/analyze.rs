//! Spending analysis command

use anyhow::{Context, Result};
use chrono::NaiveDate;
use spendlens_core::{
    analysis::format::money, db::Database, GenerationConfig, Period, SpendingAnalysis,
    SpendingAnalyzer,
};

use super::truncate;

/// Pick the period from `--period` or `--index`; neither selects this month
pub fn select_period(period: Option<&str>, index: Option<usize>) -> Result<Period> {
    match (period, index) {
        (Some(token), _) => token.parse().map_err(anyhow::Error::msg),
        (None, Some(index)) => Ok(Period::from_index(index)),
        (None, None) => Ok(Period::default()),
    }
}

pub async fn cmd_analyze(
    db: Database,
    user_id: &str,
    generation: &GenerationConfig,
    period: Period,
    today: NaiveDate,
    json: bool,
) -> Result<()> {
    let analyzer = SpendingAnalyzer::from_config(db, generation);
    let analysis = analyzer
        .analyze_period(user_id, period, today)
        .await
        .context("Failed to analyze spending")?;

    if json {
        println!("{}", serde_json::to_string_pretty(&analysis)?);
    } else {
        print!("{}", render_analysis(period, &analysis));
    }

    Ok(())
}

/// Human-readable report
pub fn render_analysis(period: Period, analysis: &SpendingAnalysis) -> String {
    let mut out = String::new();

    out.push('\n');
    out.push_str(&format!("📊 Spending Analysis - {}\n", period.label()));
    out.push_str(&format!("   Period: {}\n", analysis.period_label));
    out.push_str("   ─────────────────────────────────────────────────────────────\n");
    out.push_str(&format!("   {}\n", analysis.summary));

    if analysis.insights.is_empty() && analysis.category_breakdowns.is_empty() {
        out.push_str(&format!("\n💡 {}\n", analysis.recommendation));
        return out;
    }

    out.push('\n');
    out.push_str(&format!("   Income:       {:>14}\n", money(analysis.total_income)));
    out.push_str(&format!("   Expenses:     {:>14}\n", money(analysis.total_expenses)));
    out.push_str(&format!("   Net:          {:>14}\n", money(analysis.net())));
    out.push_str(&format!("   Savings rate: {:>13.1}%\n", analysis.savings_rate));

    if !analysis.category_breakdowns.is_empty() {
        out.push('\n');
        out.push_str(&format!(
            "   {:20} │ {:>14} │ {:>6}\n",
            "Category", "Amount", "Share"
        ));
        out.push_str("   ─────────────────────┼────────────────┼───────\n");
        for b in &analysis.category_breakdowns {
            out.push_str(&format!(
                "   {:20} │ {:>14} │ {:>5.1}%\n",
                truncate(&b.category, 20),
                money(b.amount),
                b.percentage
            ));
        }
    }

    if !analysis.insights.is_empty() {
        out.push_str("\n🔎 Insights\n");
        for insight in &analysis.insights {
            out.push_str(&format!(
                "   {} {} [{}]\n      {}\n",
                insight.icon, insight.title, insight.kind, insight.description
            ));
        }
    }

    out.push_str("\n💡 Recommendation\n");
    for paragraph in analysis.recommendation.split("\n\n") {
        out.push_str(&format!("   {}\n", paragraph.trim()));
    }

    out
}
