//! Budget recommendation engine
//!
//! Combines income, category share of spend, and boundary-point trend into a
//! per-category recommended budget, capped by the user's declared monthly
//! budget.

use tracing::debug;

use crate::categories::CategoryRegistry;
use crate::models::Transaction;

use super::types::{BudgetSummary, Recommendation, RecommendationBundle};
use super::{aggregate, insights, trend};

/// Tuning knobs for the recommender
#[derive(Debug, Clone)]
pub struct RecommenderConfig {
    /// Trend (percent) above which the recommendation is pulled back.
    /// Default 20.
    pub pullback_trend: f64,
    /// Trend (percent) below which extra headroom is allowed. Default -20.
    pub headroom_trend: f64,
    /// Multiplier applied when spending grows past `pullback_trend`.
    /// Default 0.9.
    pub pullback_factor: f64,
    /// Multiplier applied when spending shrinks past `headroom_trend`.
    /// Default 1.1.
    pub headroom_factor: f64,
}

impl Default for RecommenderConfig {
    fn default() -> Self {
        Self {
            pullback_trend: 20.0,
            headroom_trend: -20.0,
            pullback_factor: 0.9,
            headroom_factor: 1.1,
        }
    }
}

/// Stateless recommendation service; holds the registry and config only,
/// never request-scoped state
#[derive(Debug, Clone)]
pub struct BudgetRecommender {
    registry: CategoryRegistry,
    config: RecommenderConfig,
}

impl BudgetRecommender {
    pub fn new(registry: CategoryRegistry) -> Self {
        Self {
            registry,
            config: RecommenderConfig::default(),
        }
    }

    pub fn with_config(registry: CategoryRegistry, config: RecommenderConfig) -> Self {
        Self { registry, config }
    }

    /// Produce per-category budget recommendations plus insights and summary
    ///
    /// An empty expense slice yields the onboarding bundle (canned insights,
    /// zeroed totals) rather than an error.
    pub fn recommend(
        &self,
        expenses: &[Transaction],
        incomes: &[Transaction],
        monthly_budget: f64,
    ) -> RecommendationBundle {
        if expenses.is_empty() {
            debug!("no expense history, returning onboarding bundle");
            return RecommendationBundle {
                recommendations: Vec::new(),
                insights: insights::onboarding(),
                summary: BudgetSummary {
                    total_monthly_budget: monthly_budget,
                    average_monthly_income: 0,
                    total_expenses: 0,
                },
            };
        }

        let buckets = aggregate::bucket_by_month(expenses, &[], &self.registry);
        let (totals, counts) = aggregate::category_totals(expenses, &self.registry);
        let averages = aggregate::category_averages(&totals, &counts);
        let total_spent = aggregate::total_amount(expenses);
        let shares = aggregate::share_percentages(&totals, total_spent);
        let trends = trend::category_trends(&buckets, &self.registry);

        let total_income = aggregate::total_amount(incomes);
        let dated_incomes = incomes
            .iter()
            .filter(|tx| tx.occurred_at.is_some())
            .count();
        let average_monthly_income = if dated_incomes > 0 {
            total_income / dated_incomes as f64
        } else {
            0.0
        };

        let mut recommendations = Vec::with_capacity(self.registry.len());
        for category in self.registry.list() {
            let share = shares.get(category.id).copied().unwrap_or(0.0);
            let trend = trends.get(category.id).copied().unwrap_or(0.0);
            let average = averages.get(category.id).copied().unwrap_or(0.0);

            let mut recommended = average_monthly_income * share / 100.0;
            if trend > self.config.pullback_trend {
                recommended *= self.config.pullback_factor;
            } else if trend < self.config.headroom_trend {
                recommended *= self.config.headroom_factor;
            }
            recommended = recommended.min(monthly_budget * share / 100.0);

            recommendations.push(Recommendation {
                category_id: category.id.to_string(),
                recommended: recommended.round() as i64,
                current: average.round() as i64,
                trend_percent: trend.round() as i64,
                share_percent: share.round() as i64,
            });
        }

        let insights = insights::generate(
            &recommendations,
            &shares,
            &trends,
            monthly_budget,
            &self.registry,
        );

        debug!(
            recommendations = recommendations.len(),
            insights = insights.len(),
            "generated budget recommendations"
        );

        RecommendationBundle {
            recommendations,
            insights,
            summary: BudgetSummary {
                total_monthly_budget: monthly_budget,
                average_monthly_income: average_monthly_income.round() as i64,
                total_expenses: total_spent.round() as i64,
            },
        }
    }
}
