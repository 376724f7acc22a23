//! Transaction operations

use async_trait::async_trait;
use chrono::NaiveDate;
use rusqlite::params;

use super::{parse_datetime, Database};
use crate::error::{Error, Result};
use crate::models::{NewTransaction, PeriodTotals, Transaction, TransactionType};
use crate::store::TransactionStore;

const TRANSACTION_COLUMNS: &str =
    "id, user_id, kind, amount, category, date, description, notes, import_hash, created_at";

impl Database {
    /// Insert a transaction (skips duplicates based on import_hash)
    ///
    /// Returns `None` when the user already has a transaction with the same hash.
    pub fn insert_transaction(&self, user_id: &str, tx: &NewTransaction) -> Result<Option<i64>> {
        if tx.amount < 0.0 || !tx.amount.is_finite() {
            return Err(Error::InvalidData(format!(
                "Transaction amount must be non-negative: {}",
                tx.amount
            )));
        }

        let conn = self.conn()?;
        let inserted = conn.execute(
            r#"
            INSERT OR IGNORE INTO transactions (user_id, kind, amount, category, date, description, notes, import_hash)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?)
            "#,
            params![
                user_id,
                tx.kind.as_str(),
                tx.amount,
                tx.category,
                tx.date.to_string(),
                tx.description,
                tx.notes,
                tx.import_hash,
            ],
        )?;

        if inserted == 0 {
            return Ok(None); // Duplicate, skip
        }
        Ok(Some(conn.last_insert_rowid()))
    }

    /// Most recent transactions first
    pub fn list_transactions(&self, user_id: &str, limit: i64) -> Result<Vec<Transaction>> {
        let conn = self.conn()?;
        let mut stmt = conn.prepare(&format!(
            "SELECT {} FROM transactions WHERE user_id = ? ORDER BY date DESC, id DESC LIMIT ?",
            TRANSACTION_COLUMNS
        ))?;

        let rows = stmt.query_map(params![user_id, limit], row_to_transaction)?;
        rows.collect::<std::result::Result<Vec<_>, _>>()
            .map_err(Into::into)
    }

    /// Transactions with `from <= date <= to`, most recent first
    pub fn list_transactions_in_range(
        &self,
        user_id: &str,
        from: NaiveDate,
        to: NaiveDate,
    ) -> Result<Vec<Transaction>> {
        let conn = self.conn()?;
        let mut stmt = conn.prepare(&format!(
            r#"
            SELECT {} FROM transactions
            WHERE user_id = ? AND date >= ? AND date <= ?
            ORDER BY date DESC, id DESC
            "#,
            TRANSACTION_COLUMNS
        ))?;

        let rows = stmt.query_map(
            params![user_id, from.to_string(), to.to_string()],
            row_to_transaction,
        )?;
        rows.collect::<std::result::Result<Vec<_>, _>>()
            .map_err(Into::into)
    }

    /// Income and expense sums over an inclusive date range
    pub fn totals_in_range(
        &self,
        user_id: &str,
        from: NaiveDate,
        to: NaiveDate,
    ) -> Result<PeriodTotals> {
        let conn = self.conn()?;
        let totals = conn.query_row(
            r#"
            SELECT
                COALESCE(SUM(CASE WHEN kind = 'income' THEN amount ELSE 0 END), 0),
                COALESCE(SUM(CASE WHEN kind = 'expense' THEN amount ELSE 0 END), 0),
                COUNT(*)
            FROM transactions
            WHERE user_id = ? AND date >= ? AND date <= ?
            "#,
            params![user_id, from.to_string(), to.to_string()],
            |row| {
                Ok(PeriodTotals {
                    income: row.get(0)?,
                    expenses: row.get(1)?,
                    count: row.get(2)?,
                })
            },
        )?;
        Ok(totals)
    }
}

#[async_trait]
impl TransactionStore for Database {
    async fn transactions_in_range(
        &self,
        user_id: &str,
        from: NaiveDate,
        to: NaiveDate,
    ) -> Result<Vec<Transaction>> {
        self.list_transactions_in_range(user_id, from, to)
    }
}

fn row_to_transaction(row: &rusqlite::Row<'_>) -> rusqlite::Result<Transaction> {
    let kind: String = row.get(2)?;
    let date: String = row.get(5)?;
    let created_at: String = row.get(9)?;

    Ok(Transaction {
        id: row.get(0)?,
        user_id: row.get(1)?,
        kind: kind.parse().unwrap_or(TransactionType::Expense),
        amount: row.get(3)?,
        category: row.get(4)?,
        date: NaiveDate::parse_from_str(&date, "%Y-%m-%d").map_err(|e| {
            rusqlite::Error::FromSqlConversionFailure(5, rusqlite::types::Type::Text, Box::new(e))
        })?,
        description: row.get(6)?,
        notes: row.get(7)?,
        import_hash: row.get(8)?,
        created_at: parse_datetime(&created_at),
    })
}
