//! Core domain models shared across the analytics engines

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Whether a transaction is money going out or coming in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransactionKind {
    Expense,
    Income,
}

impl TransactionKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionKind::Expense => "expense",
            TransactionKind::Income => "income",
        }
    }
}

impl fmt::Display for TransactionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for TransactionKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "expense" => Ok(TransactionKind::Expense),
            "income" => Ok(TransactionKind::Income),
            _ => Err(format!("Unknown transaction kind: {}", s)),
        }
    }
}

/// A transaction record as supplied by the Transaction Store
///
/// Records are owned by the store and borrowed read-only by the engines for
/// the duration of one computation. Amounts are non-negative; the kind says
/// which direction the money moved.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Transaction {
    pub id: String,
    /// Non-negative amount in whole currency units (fractional allowed)
    pub amount: f64,
    pub kind: TransactionKind,
    /// Registry category id; set for expenses
    pub category_id: Option<String>,
    /// Source label (employer, side gig, ...); set for incomes
    pub source: Option<String>,
    /// None when the stored record carried an unparseable timestamp.
    /// Such rows are skipped by the aggregator and excluded from all
    /// downstream computation.
    pub occurred_at: Option<DateTime<Utc>>,
    pub note: Option<String>,
}

impl Transaction {
    /// Build an expense record
    pub fn expense(
        id: impl Into<String>,
        amount: f64,
        category_id: impl Into<String>,
        occurred_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id: id.into(),
            amount,
            kind: TransactionKind::Expense,
            category_id: Some(category_id.into()),
            source: None,
            occurred_at: Some(occurred_at),
            note: None,
        }
    }

    /// Build an income record
    pub fn income(
        id: impl Into<String>,
        amount: f64,
        source: impl Into<String>,
        occurred_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id: id.into(),
            amount,
            kind: TransactionKind::Income,
            category_id: None,
            source: Some(source.into()),
            occurred_at: Some(occurred_at),
            note: None,
        }
    }

    /// Attach a free-text note
    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.note = Some(note.into());
        self
    }
}

/// Aggregated totals for one calendar month
///
/// Built fresh per request; never persisted by this core. `by_category` only
/// holds categories known to the registry — unknown-category expenses count
/// toward `total_expense` but get no category entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MonthlyBucket {
    /// Calendar month in `YYYY-MM` form
    pub month: String,
    pub by_category: HashMap<String, f64>,
    pub total_income: f64,
    pub total_expense: f64,
}

impl MonthlyBucket {
    pub fn new(month: impl Into<String>) -> Self {
        Self {
            month: month.into(),
            by_category: HashMap::new(),
            total_income: 0.0,
            total_expense: 0.0,
        }
    }
}

/// Income/expense totals for one calendar month, the unit the savings
/// forecaster consumes
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MonthlyTotals {
    /// Calendar month in `YYYY-MM` form
    pub month: String,
    pub total_income: f64,
    pub total_expense: f64,
    pub expense_count: usize,
    pub income_count: usize,
}

impl MonthlyTotals {
    pub fn new(month: impl Into<String>) -> Self {
        Self {
            month: month.into(),
            total_income: 0.0,
            total_expense: 0.0,
            expense_count: 0,
            income_count: 0,
        }
    }

    /// Net savings for the month
    pub fn savings(&self) -> f64 {
        self.total_income - self.total_expense
    }
}

/// Urgency of a fired alert
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AlertSeverity {
    High,
    Medium,
}

impl AlertSeverity {
    pub fn as_str(&self) -> &'static str {
        match self {
            AlertSeverity::High => "high",
            AlertSeverity::Medium => "medium",
        }
    }
}

impl fmt::Display for AlertSeverity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// The rule that produced an alert
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AlertType {
    /// Budget utilization crossed the configured threshold
    BudgetAlert,
    /// A category's spend jumped month-over-month
    SpendingSpike,
    /// The month's savings rate fell below the configured floor
    SavingsAlert,
}

impl AlertType {
    pub fn as_str(&self) -> &'static str {
        match self {
            AlertType::BudgetAlert => "budget_alert",
            AlertType::SpendingSpike => "spending_spike",
            AlertType::SavingsAlert => "savings_alert",
        }
    }
}

impl fmt::Display for AlertType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for AlertType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "budget_alert" => Ok(AlertType::BudgetAlert),
            "spending_spike" => Ok(AlertType::SpendingSpike),
            "savings_alert" => Ok(AlertType::SavingsAlert),
            _ => Err(format!("Unknown alert type: {}", s)),
        }
    }
}

/// An alert fired by the evaluator
///
/// Ephemeral: ownership passes to the Notification Sink as soon as the event
/// is created.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AlertEvent {
    #[serde(rename = "type")]
    pub kind: AlertType,
    pub message: String,
    pub severity: AlertSeverity,
}

impl AlertEvent {
    pub fn new(kind: AlertType, message: impl Into<String>, severity: AlertSeverity) -> Self {
        Self {
            kind,
            message: message.into(),
            severity,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_transaction_builders() {
        let at = Utc.with_ymd_and_hms(2026, 3, 14, 12, 0, 0).unwrap();
        let expense = Transaction::expense("e1", 42.50, "food", at).with_note("lunch");
        assert_eq!(expense.kind, TransactionKind::Expense);
        assert_eq!(expense.category_id.as_deref(), Some("food"));
        assert!(expense.source.is_none());
        assert_eq!(expense.note.as_deref(), Some("lunch"));

        let income = Transaction::income("i1", 3000.0, "salary", at);
        assert_eq!(income.kind, TransactionKind::Income);
        assert_eq!(income.source.as_deref(), Some("salary"));
        assert!(income.category_id.is_none());
    }

    #[test]
    fn test_monthly_totals_savings() {
        let mut totals = MonthlyTotals::new("2026-03");
        totals.total_income = 1000.0;
        totals.total_expense = 900.0;
        assert!((totals.savings() - 100.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_alert_type_round_trip() {
        assert_eq!(AlertType::SpendingSpike.as_str(), "spending_spike");
        assert_eq!(
            AlertType::from_str("budget_alert").unwrap(),
            AlertType::BudgetAlert
        );
        assert!(AlertType::from_str("nope").is_err());
    }

    #[test]
    fn test_alert_event_serializes_with_type_tag() {
        let event = AlertEvent::new(
            AlertType::SavingsAlert,
            "Your savings rate is below 20%.",
            AlertSeverity::Medium,
        );
        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["type"], "savings_alert");
        assert_eq!(json["severity"], "medium");
    }
}
