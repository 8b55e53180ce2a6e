//! Tally Analytics Core
//!
//! Computation library for the Tally personal finance backend:
//! - Calendar-month bucketing and per-category aggregation
//! - Boundary-point spending trends and budget recommendations
//! - Rule-based insight generation
//! - Least-squares savings forecasting with a confidence measure
//! - Threshold, spike, and savings-rate alert evaluation
//!
//! The core owns no wire format and no persistence. It reads transaction
//! history through the [`TransactionStore`] trait, pushes alerts through the
//! [`NotificationSink`] trait, and hands plain structured records back to
//! the API layer that embeds it.

pub mod alerts;
pub mod analysis;
pub mod categories;
pub mod error;
pub mod models;
pub mod service;
pub mod store;

pub use alerts::{AlertConfig, AlertEvaluator};
pub use analysis::{
    BudgetRecommender, DashboardSummary, ForecastResult, Insight, InsightType, Recommendation,
    RecommendationBundle, RecommenderConfig, SavingsForecast, SavingsForecaster, TrendDirection,
};
pub use categories::{Category, CategoryRegistry};
pub use error::{Error, Result, StoreErrorKind};
pub use models::{
    AlertEvent, AlertSeverity, AlertType, MonthlyBucket, MonthlyTotals, Transaction,
    TransactionKind,
};
pub use service::AnalyticsService;
pub use store::{
    MemorySink, MemoryStore, NotificationSink, TransactionStore, BEGINNING_OF_TIME,
};
