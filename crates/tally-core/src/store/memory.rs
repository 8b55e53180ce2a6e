//! In-memory store and sink
//!
//! Predictable collaborator implementations for unit tests, integration
//! tests, and development without a running backend.

use std::sync::Mutex;

use async_trait::async_trait;
use chrono::NaiveDate;

use crate::error::{Error, Result, StoreErrorKind};
use crate::models::{AlertEvent, Transaction, TransactionKind};

use super::{NotificationSink, TransactionStore};

/// In-memory transaction store
///
/// Rows without a parseable timestamp match every range read — the backing
/// store could not index them, so it is the aggregator's job to skip them.
#[derive(Default)]
pub struct MemoryStore {
    rows: Mutex<Vec<(String, Transaction)>>,
    failing: Mutex<bool>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a transaction for a user
    pub fn insert(&self, user_id: &str, tx: Transaction) {
        self.rows
            .lock()
            .expect("store lock poisoned")
            .push((user_id.to_string(), tx));
    }

    /// Make every subsequent read fail with a transient store error
    pub fn set_failing(&self, failing: bool) {
        *self.failing.lock().expect("store lock poisoned") = failing;
    }

    fn fetch(
        &self,
        user_id: &str,
        kind: TransactionKind,
        from: NaiveDate,
        to: NaiveDate,
    ) -> Result<Vec<Transaction>> {
        if *self.failing.lock().expect("store lock poisoned") {
            return Err(Error::store(
                StoreErrorKind::Transient,
                "memory store set to fail",
            ));
        }

        let rows = self.rows.lock().expect("store lock poisoned");
        let mut matches: Vec<Transaction> = rows
            .iter()
            .filter(|(uid, tx)| {
                uid == user_id
                    && tx.kind == kind
                    && match tx.occurred_at {
                        Some(at) => {
                            let date = at.date_naive();
                            date >= from && date <= to
                        }
                        None => true,
                    }
            })
            .map(|(_, tx)| tx.clone())
            .collect();

        matches.sort_by_key(|tx| tx.occurred_at);
        Ok(matches)
    }
}

#[async_trait]
impl TransactionStore for MemoryStore {
    async fn fetch_expenses(
        &self,
        user_id: &str,
        from: NaiveDate,
        to: NaiveDate,
    ) -> Result<Vec<Transaction>> {
        self.fetch(user_id, TransactionKind::Expense, from, to)
    }

    async fn fetch_incomes(
        &self,
        user_id: &str,
        from: NaiveDate,
        to: NaiveDate,
    ) -> Result<Vec<Transaction>> {
        self.fetch(user_id, TransactionKind::Income, from, to)
    }
}

/// In-memory notification sink that records published events
#[derive(Default)]
pub struct MemorySink {
    published: Mutex<Vec<(String, AlertEvent)>>,
    failing: Mutex<bool>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every subsequent publish fail
    pub fn set_failing(&self, failing: bool) {
        *self.failing.lock().expect("sink lock poisoned") = failing;
    }

    /// Everything published so far, in publish order
    pub fn published(&self) -> Vec<(String, AlertEvent)> {
        self.published.lock().expect("sink lock poisoned").clone()
    }
}

#[async_trait]
impl NotificationSink for MemorySink {
    async fn publish(&self, user_id: &str, event: &AlertEvent) -> Result<()> {
        if *self.failing.lock().expect("sink lock poisoned") {
            return Err(Error::Publish("memory sink set to fail".to_string()));
        }
        self.published
            .lock()
            .expect("sink lock poisoned")
            .push((user_id.to_string(), event.clone()));
        Ok(())
    }
}
