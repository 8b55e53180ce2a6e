//! Financial analytics engines
//!
//! The computational heart of the backend, pure and synchronous throughout:
//!
//! - **Aggregation** - calendar-month buckets and per-category totals
//! - **Trend** - boundary-point percentage change per category
//! - **Recommendation** - income x share x trend, capped by the budget
//! - **Insights** - a fixed rule set over the derived numbers
//! - **Forecast** - least-squares projection of monthly net savings
//! - **Summary** - the current-month dashboard rollup
//!
//! ## Usage
//!
//! ```rust,ignore
//! use tally_core::analysis::BudgetRecommender;
//! use tally_core::categories::CategoryRegistry;
//!
//! let recommender = BudgetRecommender::new(CategoryRegistry::builtin());
//! let bundle = recommender.recommend(&expenses, &incomes, monthly_budget);
//! ```

pub mod aggregate;
pub mod forecast;
pub mod insights;
pub mod recommend;
pub mod summary;
pub mod trend;
pub mod types;

pub use forecast::{fit_line, moving_average, LinearFit, SavingsForecaster};
pub use recommend::{BudgetRecommender, RecommenderConfig};
pub use types::{
    BalanceStatus, BudgetSummary, CategoryBreakdownEntry, CategorySnapshot, DashboardSummary,
    ForecastResult, Insight, InsightType, Recommendation, RecommendationBundle, SavingsForecast,
    StatusMessage, StatusMessageKind, TrendDirection,
};
