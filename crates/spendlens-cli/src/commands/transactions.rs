//! Transaction and category command implementations

use anyhow::{bail, Context, Result};
use chrono::{Local, Utc};
use spendlens_core::{
    db::Database,
    import::{generate_hash, parse_date},
    models::{NewTransaction, TransactionType},
};

use super::truncate;

/// Record a single transaction, returning its id
pub fn cmd_add(
    db: &Database,
    user_id: &str,
    kind: &str,
    amount: f64,
    category: &str,
    date: Option<&str>,
    description: Option<&str>,
) -> Result<i64> {
    let kind: TransactionType = kind.parse().map_err(anyhow::Error::msg)?;
    if !amount.is_finite() || amount < 0.0 {
        bail!("Amount must be a non-negative number, got {}", amount);
    }
    let category = category.trim();
    if category.is_empty() {
        bail!("Category cannot be empty");
    }
    let date = match date {
        Some(s) => parse_date(s)?,
        None => Local::now().date_naive(),
    };
    let description = description.unwrap_or_default().to_string();

    // Manual entries are never treated as re-imports of each other
    let import_hash = format!(
        "manual:{}:{}",
        Utc::now().timestamp_nanos_opt().unwrap_or_default(),
        generate_hash(&date, kind, amount, category, &description)
    );

    let tx = NewTransaction {
        kind,
        amount,
        category: category.to_string(),
        date,
        description,
        notes: None,
        import_hash,
    };

    let id = db
        .insert_transaction(user_id, &tx)
        .context("Failed to save transaction")?
        .context("Transaction was already recorded")?;

    println!(
        "✅ Added {} of ${:.2} in {} on {} (id {})",
        kind, amount, tx.category, date, id
    );
    Ok(id)
}

pub fn cmd_list(db: &Database, user_id: &str, limit: i64) -> Result<()> {
    let transactions = db.list_transactions(user_id, limit)?;

    if transactions.is_empty() {
        println!("No transactions found. Import some with:");
        println!("  spendlens import --file transactions.csv");
        return Ok(());
    }

    println!();
    println!("📝 Recent Transactions");
    println!("   ─────────────────────────────────────────────────────────────");

    for tx in transactions {
        let amount_str = if tx.is_expense() {
            format!("\x1b[31m-${:.2}\x1b[0m", tx.amount) // Red for expenses
        } else {
            format!("\x1b[32m+${:.2}\x1b[0m", tx.amount) // Green for income
        };

        println!(
            "   {} │ {:>10} │ {:<18} │ {}",
            tx.date,
            amount_str,
            truncate(&tx.category, 18),
            truncate(&tx.description, 30)
        );
    }

    Ok(())
}

pub fn cmd_categories(db: &Database, kind: Option<&str>) -> Result<()> {
    let kind = kind
        .map(|k| k.parse::<TransactionType>().map_err(anyhow::Error::msg))
        .transpose()?;
    let categories = db.list_categories(kind)?;

    if categories.is_empty() {
        println!("No categories found. Run 'spendlens init' to seed the defaults.");
        return Ok(());
    }

    println!();
    println!("🗂️  Categories");
    println!("   ─────────────────────────────");
    for category in categories {
        println!(
            "   {} {:<20} {:<8} {}",
            category.icon,
            category.name,
            category.kind.as_str(),
            category.color
        );
    }

    Ok(())
}
