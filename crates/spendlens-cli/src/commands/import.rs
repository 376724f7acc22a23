//! CSV import command

use std::fs::File;
use std::path::Path;

use anyhow::{Context, Result};
use spendlens_core::{db::Database, import::parse_csv};

/// Counts reported after an import
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ImportOutcome {
    pub imported: usize,
    pub skipped: usize,
}

pub fn cmd_import(db: &Database, user_id: &str, file: &Path) -> Result<ImportOutcome> {
    println!("📥 Importing transactions from {}...", file.display());

    let csv_file =
        File::open(file).with_context(|| format!("Failed to open file: {}", file.display()))?;
    let transactions = parse_csv(csv_file)
        .with_context(|| format!("Failed to parse {}", file.display()))?;

    println!("   Found {} transactions", transactions.len());

    let mut outcome = ImportOutcome {
        imported: 0,
        skipped: 0,
    };
    for tx in &transactions {
        match db.insert_transaction(user_id, tx)? {
            Some(_) => outcome.imported += 1,
            None => outcome.skipped += 1,
        }
    }

    tracing::info!(
        user = user_id,
        imported = outcome.imported,
        skipped = outcome.skipped,
        "Import finished"
    );

    println!("✅ Import complete!");
    println!("   Imported: {}", outcome.imported);
    println!("   Skipped (duplicates): {}", outcome.skipped);

    if outcome.imported > 0 {
        println!();
        println!("Next: spendlens analyze --period this-month");
    }

    Ok(outcome)
}
