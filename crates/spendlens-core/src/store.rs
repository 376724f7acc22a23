//! Transaction store abstraction
//!
//! The analysis engine reads snapshots through `TransactionStore`. The
//! SQLite `Database` is the production implementation; `MemoryStore` backs
//! tests and demos.

use std::sync::{Arc, RwLock};

use async_trait::async_trait;
use chrono::{NaiveDate, Utc};

use crate::error::{Error, Result};
use crate::models::{NewTransaction, Transaction};

/// Source of transaction snapshots
#[async_trait]
pub trait TransactionStore: Send + Sync {
    /// Transactions for a user with `from <= date <= to`
    async fn transactions_in_range(
        &self,
        user_id: &str,
        from: NaiveDate,
        to: NaiveDate,
    ) -> Result<Vec<Transaction>>;
}

#[async_trait]
impl<T: TransactionStore + ?Sized> TransactionStore for Arc<T> {
    async fn transactions_in_range(
        &self,
        user_id: &str,
        from: NaiveDate,
        to: NaiveDate,
    ) -> Result<Vec<Transaction>> {
        (**self).transactions_in_range(user_id, from, to).await
    }
}

/// In-memory store keeping insertion order
#[derive(Default)]
pub struct MemoryStore {
    transactions: RwLock<Vec<Transaction>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a transaction for a user, returning its id
    pub fn insert(&self, user_id: &str, tx: &NewTransaction) -> Result<i64> {
        if tx.amount < 0.0 || !tx.amount.is_finite() {
            return Err(Error::InvalidData(format!(
                "Transaction amount must be non-negative: {}",
                tx.amount
            )));
        }

        let mut transactions = self
            .transactions
            .write()
            .map_err(|_| Error::InvalidData("Memory store lock poisoned".into()))?;
        let id = transactions.len() as i64 + 1;
        transactions.push(Transaction {
            id,
            user_id: user_id.to_string(),
            kind: tx.kind,
            amount: tx.amount,
            category: tx.category.clone(),
            date: tx.date,
            description: tx.description.clone(),
            notes: tx.notes.clone(),
            import_hash: tx.import_hash.clone(),
            created_at: Utc::now(),
        });
        Ok(id)
    }

    pub fn len(&self) -> usize {
        self.transactions.read().map(|t| t.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl TransactionStore for MemoryStore {
    async fn transactions_in_range(
        &self,
        user_id: &str,
        from: NaiveDate,
        to: NaiveDate,
    ) -> Result<Vec<Transaction>> {
        let transactions = self
            .transactions
            .read()
            .map_err(|_| Error::InvalidData("Memory store lock poisoned".into()))?;

        Ok(transactions
            .iter()
            .filter(|t| t.user_id == user_id && t.date >= from && t.date <= to)
            .cloned()
            .collect())
    }
}
