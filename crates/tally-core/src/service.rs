//! Async orchestration over the Transaction Store
//!
//! The engines in [`crate::analysis`] are pure and synchronous; this service
//! is the seam that reads the store (the only suspension points in the core)
//! and hands in-memory snapshots to them. Store failures on these paths are
//! request-scoped and propagate to the caller.

use std::sync::Arc;

use chrono::NaiveDate;
use tracing::debug;

use crate::analysis::types::{DashboardSummary, ForecastResult, RecommendationBundle};
use crate::analysis::{aggregate, summary, BudgetRecommender, SavingsForecaster};
use crate::categories::CategoryRegistry;
use crate::error::Result;
use crate::store::{TransactionStore, BEGINNING_OF_TIME};

/// How many calendar months of history feed the recommender
const RECOMMENDATION_MONTHS: u32 = 3;

/// How many calendar months of history feed the forecaster
const FORECAST_MONTHS: u32 = 6;

/// Facade over the analytics engines for one Transaction Store
pub struct AnalyticsService {
    store: Arc<dyn TransactionStore>,
    registry: CategoryRegistry,
    recommender: BudgetRecommender,
    forecaster: SavingsForecaster,
}

impl AnalyticsService {
    pub fn new(store: Arc<dyn TransactionStore>) -> Self {
        Self::with_registry(store, CategoryRegistry::builtin())
    }

    pub fn with_registry(store: Arc<dyn TransactionStore>, registry: CategoryRegistry) -> Self {
        Self {
            recommender: BudgetRecommender::new(registry.clone()),
            forecaster: SavingsForecaster::new(),
            registry,
            store,
        }
    }

    /// Budget recommendations over the recent spending window
    ///
    /// Reads expenses and incomes from the first day of the month three
    /// months back through the end of `today`'s month, then runs the pure
    /// recommender over the snapshot.
    pub async fn budget_recommendations(
        &self,
        user_id: &str,
        monthly_budget: f64,
        today: NaiveDate,
    ) -> Result<RecommendationBundle> {
        let from = aggregate::months_back(today, RECOMMENDATION_MONTHS);
        let (_, to) = aggregate::month_bounds(today);

        let (expenses, incomes) = tokio::join!(
            self.store.fetch_expenses(user_id, from, to),
            self.store.fetch_incomes(user_id, from, to),
        );
        let expenses = expenses?;
        let incomes = incomes?;

        debug!(
            user_id,
            expenses = expenses.len(),
            incomes = incomes.len(),
            "fetched history for recommendations"
        );
        Ok(self.recommender.recommend(&expenses, &incomes, monthly_budget))
    }

    /// Savings forecast over the populated months of the recent half year
    pub async fn savings_forecast(
        &self,
        user_id: &str,
        monthly_budget: f64,
        today: NaiveDate,
    ) -> Result<ForecastResult> {
        let from = aggregate::months_back(today, FORECAST_MONTHS);
        let (_, to) = aggregate::month_bounds(today);

        let (expenses, incomes) = tokio::join!(
            self.store.fetch_expenses(user_id, from, to),
            self.store.fetch_incomes(user_id, from, to),
        );
        let history = aggregate::monthly_totals(&expenses?, &incomes?);

        debug!(user_id, months = history.len(), "built savings history");
        Ok(self.forecaster.forecast(&history, monthly_budget))
    }

    /// Current-month dashboard rollup, including the running balance over
    /// the whole recorded history
    pub async fn dashboard_summary(
        &self,
        user_id: &str,
        monthly_budget: f64,
        today: NaiveDate,
    ) -> Result<DashboardSummary> {
        let (month_start, month_end) = aggregate::month_bounds(today);

        let (current_expenses, current_incomes, all_expenses, all_incomes) = tokio::join!(
            self.store.fetch_expenses(user_id, month_start, month_end),
            self.store.fetch_incomes(user_id, month_start, month_end),
            self.store
                .fetch_expenses(user_id, BEGINNING_OF_TIME, month_end),
            self.store
                .fetch_incomes(user_id, BEGINNING_OF_TIME, month_end),
        );

        Ok(summary::dashboard_summary(
            &current_expenses?,
            &current_incomes?,
            &all_expenses?,
            &all_incomes?,
            monthly_budget,
            today,
            &self.registry,
        ))
    }
}
