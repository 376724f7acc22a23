//! CLI command tests

use std::io::Write;

use chrono::NaiveDate;
use spendlens_core::db::Database;
use spendlens_core::models::TransactionType;
use spendlens_core::{GenerationConfig, Period, SpendingAnalyzer};
use tempfile::NamedTempFile;

use crate::commands::{self, truncate};

fn setup_test_db() -> Database {
    let db = Database::in_memory().unwrap();
    db.seed_default_categories().unwrap();
    db
}

fn d(s: &str) -> NaiveDate {
    s.parse().unwrap()
}

fn csv_file(contents: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    file.flush().unwrap();
    file
}

// ========== Init Command Tests ==========

#[test]
fn test_cmd_init_creates_database() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("spendlens.db");

    commands::cmd_init(&path).unwrap();
    assert!(path.exists());

    let db = commands::open_db(&path).unwrap();
    assert!(!db.list_categories(None).unwrap().is_empty());

    // Running init again keeps the seeded categories intact
    commands::cmd_init(&path).unwrap();
    let expense = db.list_categories(Some(TransactionType::Expense)).unwrap();
    assert_eq!(expense.len(), 13);
}

// ========== Import Command Tests ==========

#[test]
fn test_cmd_import() {
    let db = setup_test_db();
    let file = csv_file(
        "date,type,amount,category,description
2024-03-01,income,1500,Salary,Paycheck
2024-03-02,expense,42.10,Food & Dining,Groceries
2024-03-03,,-9.99,Subscriptions,Streaming",
    );

    let outcome = commands::cmd_import(&db, "alice", file.path()).unwrap();
    assert_eq!(outcome.imported, 3);
    assert_eq!(outcome.skipped, 0);

    let again = commands::cmd_import(&db, "alice", file.path()).unwrap();
    assert_eq!(again.imported, 0);
    assert_eq!(again.skipped, 3);

    assert_eq!(db.list_transactions("alice", 10).unwrap().len(), 3);
}

#[test]
fn test_cmd_import_missing_file() {
    let db = setup_test_db();
    let result = commands::cmd_import(&db, "alice", std::path::Path::new("/nonexistent/tx.csv"));
    assert!(result.is_err());
}

#[test]
fn test_cmd_import_bad_row() {
    let db = setup_test_db();
    let file = csv_file("date,type,amount,category,description\nyesterday,expense,5,Other,x");
    let err = commands::cmd_import(&db, "alice", file.path()).unwrap_err();
    assert!(format!("{:#}", err).contains("Line 2"));
    assert!(db.list_transactions("alice", 10).unwrap().is_empty());
}

// ========== Transaction Command Tests ==========

#[test]
fn test_cmd_add() {
    let db = setup_test_db();
    let id = commands::cmd_add(
        &db,
        "alice",
        "expense",
        12.5,
        "Shopping",
        Some("2024-03-05"),
        Some("Socks"),
    )
    .unwrap();
    assert!(id > 0);

    let txs = db.list_transactions("alice", 10).unwrap();
    assert_eq!(txs.len(), 1);
    assert_eq!(txs[0].kind, TransactionType::Expense);
    assert_eq!(txs[0].date, d("2024-03-05"));
    assert_eq!(txs[0].description, "Socks");
}

#[test]
fn test_cmd_add_identical_entries_both_kept() {
    let db = setup_test_db();
    for _ in 0..2 {
        commands::cmd_add(&db, "alice", "expense", 3.0, "Food & Dining", Some("2024-03-05"), None)
            .unwrap();
    }
    assert_eq!(db.list_transactions("alice", 10).unwrap().len(), 2);
}

#[test]
fn test_cmd_add_defaults_to_today() {
    let db = setup_test_db();
    commands::cmd_add(&db, "alice", "income", 100.0, "Salary", None, None).unwrap();

    let txs = db.list_transactions("alice", 10).unwrap();
    assert_eq!(txs[0].date, chrono::Local::now().date_naive());
}

#[test]
fn test_cmd_add_rejects_invalid_input() {
    let db = setup_test_db();
    assert!(commands::cmd_add(&db, "alice", "gift", 5.0, "Other", None, None).is_err());
    assert!(commands::cmd_add(&db, "alice", "expense", -5.0, "Other", None, None).is_err());
    assert!(commands::cmd_add(&db, "alice", "expense", 5.0, "  ", None, None).is_err());
    assert!(
        commands::cmd_add(&db, "alice", "expense", 5.0, "Other", Some("5th March"), None).is_err()
    );
    assert!(db.list_transactions("alice", 10).unwrap().is_empty());
}

#[test]
fn test_cmd_list() {
    let db = setup_test_db();
    assert!(commands::cmd_list(&db, "alice", 20).is_ok());

    commands::cmd_add(&db, "alice", "expense", 8.0, "Transportation", Some("2024-03-05"), None)
        .unwrap();
    assert!(commands::cmd_list(&db, "alice", 20).is_ok());
}

#[test]
fn test_cmd_categories() {
    let db = setup_test_db();
    assert!(commands::cmd_categories(&db, None).is_ok());
    assert!(commands::cmd_categories(&db, Some("income")).is_ok());
    assert!(commands::cmd_categories(&db, Some("savings")).is_err());
}

// ========== Analyze Command Tests ==========

#[test]
fn test_select_period() {
    assert_eq!(commands::select_period(None, None).unwrap(), Period::ThisMonth);
    assert_eq!(
        commands::select_period(Some("last-3-months"), None).unwrap(),
        Period::Last3Months
    );
    assert_eq!(commands::select_period(None, Some(4)).unwrap(), Period::ThisYear);
    // Out-of-range picker index falls back to this month
    assert_eq!(commands::select_period(None, Some(9)).unwrap(), Period::ThisMonth);
    assert!(commands::select_period(Some("fortnight"), None).is_err());
}

#[tokio::test]
async fn test_cmd_analyze() {
    let db = setup_test_db();
    commands::cmd_add(&db, "alice", "income", 2000.0, "Salary", Some("2024-03-01"), None).unwrap();
    commands::cmd_add(&db, "alice", "expense", 300.0, "Food & Dining", Some("2024-03-09"), None)
        .unwrap();

    let generation = GenerationConfig::default();
    for json in [false, true] {
        commands::cmd_analyze(
            db.clone(),
            "alice",
            &generation,
            Period::ThisMonth,
            d("2024-03-15"),
            json,
        )
        .await
        .unwrap();
    }
}

#[tokio::test]
async fn test_render_analysis() {
    let db = setup_test_db();
    commands::cmd_add(&db, "alice", "income", 2000.0, "Salary", Some("2024-03-01"), None).unwrap();
    commands::cmd_add(&db, "alice", "expense", 300.0, "Food & Dining", Some("2024-03-09"), None)
        .unwrap();

    let analysis = SpendingAnalyzer::rule_based(db)
        .analyze_period("alice", Period::ThisMonth, d("2024-03-15"))
        .await
        .unwrap();
    let report = commands::render_analysis(Period::ThisMonth, &analysis);

    assert!(report.contains("Spending Analysis - This Month"));
    assert!(report.contains("Mar 01 - Mar 15, 2024"));
    assert!(report.contains("Excellent Savings!"));
    assert!(report.contains("Food & Dining"));
    assert!(report.contains("Fantastic work!"));
}

#[tokio::test]
async fn test_render_analysis_formats_money() {
    let db = setup_test_db();
    commands::cmd_add(&db, "alice", "income", 1000.0, "Salary", Some("2024-03-01"), None).unwrap();
    commands::cmd_add(&db, "alice", "expense", 1250.5, "Housing & Rent", Some("2024-03-02"), None)
        .unwrap();

    let analysis = SpendingAnalyzer::rule_based(db)
        .analyze_period("alice", Period::ThisMonth, d("2024-03-15"))
        .await
        .unwrap();
    let report = commands::render_analysis(Period::ThisMonth, &analysis);

    let net_line = report
        .lines()
        .find(|line| line.trim_start().starts_with("Net:"))
        .unwrap();
    assert!(net_line.ends_with("-$250.50"));
    assert!(report.contains("$1,250.50"));
    assert!(report.contains("$1,000.00"));
}

#[tokio::test]
async fn test_render_empty_analysis() {
    let db = setup_test_db();
    let analysis = SpendingAnalyzer::rule_based(db)
        .analyze_period("alice", Period::ThisWeek, d("2024-03-15"))
        .await
        .unwrap();
    let report = commands::render_analysis(Period::ThisWeek, &analysis);

    assert!(report.contains("No transactions found"));
    assert!(!report.contains("Insights"));
}

// ========== AI Status Tests ==========

#[tokio::test]
async fn test_cmd_ai_status_disabled() {
    let generation = GenerationConfig::default();
    assert!(commands::cmd_ai_status(&generation).await.is_ok());
}

// ========== Utility Tests ==========

#[test]
fn test_truncate() {
    assert_eq!(truncate("short", 10), "short");
    assert_eq!(truncate("a much longer description", 10), "a much ...");
    assert_eq!(truncate("café crème brûlée", 8), "café ...");
}
