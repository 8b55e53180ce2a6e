//! Collaborator boundaries: Transaction Store and Notification Sink
//!
//! The analytics core owns no persistence and no delivery channel. Reads go
//! through [`TransactionStore`], alert delivery through [`NotificationSink`].
//! Implementations map their provider-specific failures onto
//! [`crate::error::StoreErrorKind`]; retry and timeout policy belongs to the
//! implementations, never to this core.

use async_trait::async_trait;
use chrono::NaiveDate;

use crate::error::Result;
use crate::models::{AlertEvent, Transaction};

mod memory;

pub use memory::{MemorySink, MemoryStore};

/// Sentinel for open-ended "beginning of time" range reads
pub const BEGINNING_OF_TIME: NaiveDate = NaiveDate::MIN;

/// Read access to a user's transaction history
#[async_trait]
pub trait TransactionStore: Send + Sync {
    /// Expense records within `[from, to]` (inclusive), ordered by date
    async fn fetch_expenses(
        &self,
        user_id: &str,
        from: NaiveDate,
        to: NaiveDate,
    ) -> Result<Vec<Transaction>>;

    /// Income records within `[from, to]` (inclusive), ordered by date
    async fn fetch_incomes(
        &self,
        user_id: &str,
        from: NaiveDate,
        to: NaiveDate,
    ) -> Result<Vec<Transaction>>;
}

/// Write-only delivery channel for alert events
///
/// Fire-and-forget semantics are acceptable: callers log failures and move
/// on; nothing in this core retries a publish.
#[async_trait]
pub trait NotificationSink: Send + Sync {
    async fn publish(&self, user_id: &str, event: &AlertEvent) -> Result<()>;
}
