//! Threshold-based alert evaluation
//!
//! Runs after each new expense: three independent checks against freshly
//! read aggregates, each capable of firing at most one alert per pass.
//! Evaluation is best-effort — a failing check is logged and the others
//! still run — and fired events are pushed to the Notification Sink without
//! retry.

use chrono::{NaiveDate, Utc};
use tracing::{debug, warn};

use crate::analysis::aggregate::{month_bounds, prior_month_bounds, total_amount};
use crate::categories::CategoryRegistry;
use crate::error::Result;
use crate::models::{AlertEvent, AlertSeverity, AlertType, Transaction};
use crate::store::{NotificationSink, TransactionStore};

/// Alert thresholds with documented defaults
#[derive(Debug, Clone)]
pub struct AlertConfig {
    /// Budget utilization (fraction of budget) at which the budget alert
    /// fires. Default 0.8.
    pub budget_threshold: f64,
    /// Month-over-month category increase (fraction of prior month) that
    /// counts as a spike. Default 0.5.
    pub spike_threshold: f64,
    /// Savings rate (fraction of income) below which the savings alert
    /// fires. Default 0.2.
    pub savings_rate_floor: f64,
}

impl Default for AlertConfig {
    fn default() -> Self {
        Self {
            budget_threshold: 0.8,
            spike_threshold: 0.5,
            savings_rate_floor: 0.2,
        }
    }
}

/// Stateless alert service; holds the registry and thresholds only
#[derive(Debug, Clone)]
pub struct AlertEvaluator {
    registry: CategoryRegistry,
    config: AlertConfig,
}

impl AlertEvaluator {
    pub fn new(registry: CategoryRegistry) -> Self {
        Self {
            registry,
            config: AlertConfig::default(),
        }
    }

    pub fn with_config(registry: CategoryRegistry, config: AlertConfig) -> Self {
        Self { registry, config }
    }

    /// Evaluate all checks for today's date
    pub async fn evaluate(
        &self,
        store: &dyn TransactionStore,
        sink: &dyn NotificationSink,
        user_id: &str,
        new_expense: &Transaction,
        monthly_budget: Option<f64>,
    ) -> Vec<AlertEvent> {
        self.evaluate_at(
            store,
            sink,
            user_id,
            new_expense,
            monthly_budget,
            Utc::now().date_naive(),
        )
        .await
    }

    /// Evaluate all checks against the calendar month containing `today`
    ///
    /// The checks share no state and run concurrently; none of them can
    /// abort another. Returns the fired events after pushing each to the
    /// sink (publish failures are logged, not retried).
    pub async fn evaluate_at(
        &self,
        store: &dyn TransactionStore,
        sink: &dyn NotificationSink,
        user_id: &str,
        new_expense: &Transaction,
        monthly_budget: Option<f64>,
        today: NaiveDate,
    ) -> Vec<AlertEvent> {
        let (budget, spike, savings) = tokio::join!(
            self.check_budget_utilization(store, user_id, monthly_budget, today),
            self.check_category_spike(store, user_id, new_expense, today),
            self.check_savings_rate(store, user_id, today),
        );

        let outcomes = [
            ("budget_utilization", budget),
            ("category_spike", spike),
            ("savings_rate", savings),
        ];

        let mut events = Vec::new();
        for (check, outcome) in outcomes {
            match outcome {
                Ok(Some(event)) => events.push(event),
                Ok(None) => {}
                Err(e) => {
                    warn!(check, error = %e, "alert check failed");
                }
            }
        }

        for event in &events {
            if let Err(e) = sink.publish(user_id, event).await {
                warn!(kind = event.kind.as_str(), error = %e, "failed to publish alert");
            }
        }

        debug!(fired = events.len(), "alert evaluation complete");
        events
    }

    /// Fires when the month's spend crosses the budget threshold
    async fn check_budget_utilization(
        &self,
        store: &dyn TransactionStore,
        user_id: &str,
        monthly_budget: Option<f64>,
        today: NaiveDate,
    ) -> Result<Option<AlertEvent>> {
        let budget = match monthly_budget {
            Some(budget) if budget > 0.0 => budget,
            _ => return Ok(None),
        };

        let (start, end) = month_bounds(today);
        let expenses = store.fetch_expenses(user_id, start, end).await?;
        let utilization = total_amount(&expenses) / budget;

        if utilization >= self.config.budget_threshold {
            let severity = if utilization >= 1.0 {
                AlertSeverity::High
            } else {
                AlertSeverity::Medium
            };
            return Ok(Some(AlertEvent::new(
                AlertType::BudgetAlert,
                format!(
                    "You're {}% through your budget for the month!",
                    (utilization * 100.0).round() as i64
                ),
                severity,
            )));
        }
        Ok(None)
    }

    /// Fires when the new expense's category jumped month-over-month
    async fn check_category_spike(
        &self,
        store: &dyn TransactionStore,
        user_id: &str,
        new_expense: &Transaction,
        today: NaiveDate,
    ) -> Result<Option<AlertEvent>> {
        let category = match new_expense.category_id.as_deref() {
            Some(category) => category,
            None => return Ok(None),
        };

        let (prior_start, prior_end) = prior_month_bounds(today);
        let (current_start, current_end) = month_bounds(today);
        let (prior, current) = tokio::join!(
            store.fetch_expenses(user_id, prior_start, prior_end),
            store.fetch_expenses(user_id, current_start, current_end),
        );

        let prior_total = category_total(&prior?, category);
        let current_total = category_total(&current?, category);

        if prior_total > 0.0 {
            let increase = (current_total - prior_total) / prior_total;
            if increase >= self.config.spike_threshold {
                return Ok(Some(AlertEvent::new(
                    AlertType::SpendingSpike,
                    format!(
                        "Spending on '{}' increased by {}% this month.",
                        self.registry.display_name(category),
                        (increase * 100.0).round() as i64
                    ),
                    AlertSeverity::Medium,
                )));
            }
        }
        Ok(None)
    }

    /// Fires when the month's savings rate falls below the floor
    async fn check_savings_rate(
        &self,
        store: &dyn TransactionStore,
        user_id: &str,
        today: NaiveDate,
    ) -> Result<Option<AlertEvent>> {
        let (start, end) = month_bounds(today);
        let (expenses, incomes) = tokio::join!(
            store.fetch_expenses(user_id, start, end),
            store.fetch_incomes(user_id, start, end),
        );

        let total_expenses = total_amount(&expenses?);
        let total_income = total_amount(&incomes?);

        if total_income > 0.0 {
            let rate = (total_income - total_expenses) / total_income;
            if rate < self.config.savings_rate_floor {
                return Ok(Some(AlertEvent::new(
                    AlertType::SavingsAlert,
                    format!(
                        "Your savings rate is below {}%. Consider reducing expenses to \
                         increase savings.",
                        (self.config.savings_rate_floor * 100.0).round() as i64
                    ),
                    AlertSeverity::Medium,
                )));
            }
        }
        Ok(None)
    }
}

/// Sum of a category's dated expenses
fn category_total(expenses: &[Transaction], category: &str) -> f64 {
    expenses
        .iter()
        .filter(|tx| tx.occurred_at.is_some() && tx.category_id.as_deref() == Some(category))
        .map(|tx| tx.amount)
        .sum()
}
