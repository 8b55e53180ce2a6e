//! Output records produced by the analytics engines
//!
//! Everything here is a plain structured record. No serialization format is
//! mandated — the consuming API layer owns wire encoding — but every record
//! derives serde so that layer has something to encode.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// The rule that produced an insight
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InsightType {
    /// Names the top spending categories by share
    TopCategories,
    /// A category's spend moved sharply between first and last month
    SpendingTrend,
    /// What slice of the declared budget the recommendations add up to
    BudgetUtilization,
    /// Savings rate below the warning line
    SavingsAlert,
    /// Savings rate comfortably high
    SavingsSuccess,
    /// Savings rate in the unremarkable middle
    SavingsInfo,
    /// One category dominates total spend
    CategoryAlert,
    /// Onboarding: first greeting
    Welcome,
    /// Onboarding: how to begin
    GettingStarted,
    /// Onboarding: budget tip
    Tips,
    /// Fallback when no other rule fired
    General,
}

impl InsightType {
    pub fn as_str(&self) -> &'static str {
        match self {
            InsightType::TopCategories => "top_categories",
            InsightType::SpendingTrend => "spending_trend",
            InsightType::BudgetUtilization => "budget_utilization",
            InsightType::SavingsAlert => "savings_alert",
            InsightType::SavingsSuccess => "savings_success",
            InsightType::SavingsInfo => "savings_info",
            InsightType::CategoryAlert => "category_alert",
            InsightType::Welcome => "welcome",
            InsightType::GettingStarted => "getting_started",
            InsightType::Tips => "tips",
            InsightType::General => "general",
        }
    }
}

impl fmt::Display for InsightType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for InsightType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "top_categories" => Ok(InsightType::TopCategories),
            "spending_trend" => Ok(InsightType::SpendingTrend),
            "budget_utilization" => Ok(InsightType::BudgetUtilization),
            "savings_alert" => Ok(InsightType::SavingsAlert),
            "savings_success" => Ok(InsightType::SavingsSuccess),
            "savings_info" => Ok(InsightType::SavingsInfo),
            "category_alert" => Ok(InsightType::CategoryAlert),
            "welcome" => Ok(InsightType::Welcome),
            "getting_started" => Ok(InsightType::GettingStarted),
            "tips" => Ok(InsightType::Tips),
            "general" => Ok(InsightType::General),
            _ => Err(format!("Unknown insight type: {}", s)),
        }
    }
}

/// A structured insight record
///
/// Stateless and generated fresh on every call; the caller attaches a
/// timestamp if it wants one.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Insight {
    #[serde(rename = "type")]
    pub kind: InsightType,
    pub message: String,
}

impl Insight {
    pub fn new(kind: InsightType, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

/// Per-category derived view used while building recommendations. Transient;
/// percentages stay fractional here and are rounded at the boundary.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategorySnapshot {
    pub category_id: String,
    pub average_amount: f64,
    pub share_percent: f64,
    pub trend_percent: f64,
}

/// Recommended monthly budget for one category
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Recommendation {
    pub category_id: String,
    /// Recommended monthly allocation, whole currency units
    pub recommended: i64,
    /// Historical average spend per recorded expense, whole currency units
    pub current: i64,
    pub trend_percent: i64,
    pub share_percent: i64,
}

/// Headline totals reported next to the recommendations
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BudgetSummary {
    pub total_monthly_budget: f64,
    pub average_monthly_income: i64,
    pub total_expenses: i64,
}

/// Everything the recommendation engine returns for one request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecommendationBundle {
    pub recommendations: Vec<Recommendation>,
    pub insights: Vec<Insight>,
    pub summary: BudgetSummary,
}

/// Direction of the fitted savings trend
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TrendDirection {
    Increasing,
    Decreasing,
}

impl TrendDirection {
    pub fn as_str(&self) -> &'static str {
        match self {
            TrendDirection::Increasing => "increasing",
            TrendDirection::Decreasing => "decreasing",
        }
    }
}

impl fmt::Display for TrendDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A successful savings forecast
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SavingsForecast {
    /// Next month's predicted net savings, whole currency units
    pub predicted_savings: i64,
    pub trend: TrendDirection,
    /// Coefficient of determination of the fit, in [0, 1]
    pub confidence: f64,
    pub suggestion: String,
    /// Predicted savings as a percent of the declared budget; 0 when no
    /// budget is set
    pub budget_utilization_percent: i64,
}

/// Forecast outcome: either a prediction or an explicit not-enough-history
/// marker. Insufficient history is a result, never an error.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ForecastResult {
    InsufficientData { suggestion: String },
    Forecast(SavingsForecast),
}

impl ForecastResult {
    /// The canned not-enough-history response
    pub fn insufficient_data() -> Self {
        ForecastResult::InsufficientData {
            suggestion: "Not enough data to make a prediction. Please enter at least 3 months \
                         of income and expenses."
                .to_string(),
        }
    }
}

/// Kind of a dashboard status message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StatusMessageKind {
    Warning,
    Info,
}

/// A short status line shown on the dashboard
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusMessage {
    #[serde(rename = "type")]
    pub kind: StatusMessageKind,
    pub message: String,
}

impl StatusMessage {
    pub fn warning(message: impl Into<String>) -> Self {
        Self {
            kind: StatusMessageKind::Warning,
            message: message.into(),
        }
    }

    pub fn info(message: impl Into<String>) -> Self {
        Self {
            kind: StatusMessageKind::Info,
            message: message.into(),
        }
    }
}

/// Where the month's budget stands relative to spending
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BalanceStatus {
    pub is_negative: bool,
    pub is_over_budget: bool,
    pub available_to_spend: f64,
    pub remaining_days: i64,
    pub daily_budget: f64,
}

/// One category's slice of the current month
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoryBreakdownEntry {
    pub category_id: String,
    pub name: String,
    pub amount: f64,
    pub count: usize,
    pub percent: f64,
}

/// Current-month dashboard rollup
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DashboardSummary {
    pub monthly_income: f64,
    pub monthly_expenses: f64,
    /// Net balance for the month, clamped at zero for display
    pub monthly_balance: f64,
    /// Income minus expenses over the whole recorded history
    pub running_balance: f64,
    pub monthly_budget: f64,
    /// Spend as a percent of budget, capped at 100
    pub budget_utilization_percent: f64,
    pub balance_status: BalanceStatus,
    pub messages: Vec<StatusMessage>,
    pub top_categories: Vec<CategoryBreakdownEntry>,
    pub category_breakdown: Vec<CategoryBreakdownEntry>,
}
