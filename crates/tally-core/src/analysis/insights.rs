//! Rule-based insight generation
//!
//! A fixed rule set evaluated in a fixed order. Each rule independently
//! appends zero or more insights; the savings-rate rule always contributes
//! exactly one of its three variants, so the returned list is never empty.

use std::collections::HashMap;

use tracing::debug;

use crate::categories::CategoryRegistry;

use super::types::{Insight, InsightType, Recommendation};

/// Share of total spend above which a category draws a dedicated insight
const DOMINANCE_SHARE: f64 = 30.0;

/// Absolute trend above which a category's movement is called out
const TREND_CALLOUT: f64 = 20.0;

/// The three canned insights returned when a user has no expense history yet
pub fn onboarding() -> Vec<Insight> {
    vec![
        Insight::new(
            InsightType::Welcome,
            "Welcome to Tally! Let's get started with managing your finances.",
        ),
        Insight::new(
            InsightType::GettingStarted,
            "Add your first expense to begin tracking your spending habits.",
        ),
        Insight::new(
            InsightType::Tips,
            "Pro tip: Set up your monthly budget to get personalized recommendations.",
        ),
    ]
}

/// Run the rule set over the derived recommendation data
///
/// `shares` and `trends` hold the unrounded per-category percentages keyed by
/// registry category id.
pub fn generate(
    recommendations: &[Recommendation],
    shares: &HashMap<String, f64>,
    trends: &HashMap<String, f64>,
    monthly_budget: f64,
    registry: &CategoryRegistry,
) -> Vec<Insight> {
    let mut insights = Vec::new();

    // Top spending categories by share
    let mut top: Vec<(&str, f64)> = registry
        .ids()
        .filter_map(|id| {
            let share = shares.get(id).copied().unwrap_or(0.0);
            (share > 0.0).then_some((id, share))
        })
        .collect();
    top.sort_by(|a, b| {
        b.1.partial_cmp(&a.1)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then_with(|| a.0.cmp(b.0))
    });
    if !top.is_empty() {
        let listing = top
            .iter()
            .take(3)
            .map(|(id, share)| format!("{} {}%", registry.display_name(id), share.round() as i64))
            .collect::<Vec<_>>()
            .join(", ");
        insights.push(Insight::new(
            InsightType::TopCategories,
            format!("Your top spending categories are: {}", listing),
        ));
    }

    // Sharp month-over-month movements
    for id in registry.ids() {
        let trend = trends.get(id).copied().unwrap_or(0.0);
        if trend.abs() > TREND_CALLOUT {
            let direction = if trend > 0.0 { "increased" } else { "decreased" };
            insights.push(Insight::new(
                InsightType::SpendingTrend,
                format!(
                    "Spending on {} has {} by {}%",
                    registry.display_name(id),
                    direction,
                    trend.round().abs() as i64
                ),
            ));
        }
    }

    // How much of the declared budget the recommendations consume
    let total_recommended: i64 = recommendations.iter().map(|rec| rec.recommended).sum();
    if total_recommended > 0 && monthly_budget > 0.0 {
        let utilization = total_recommended as f64 / monthly_budget * 100.0;
        insights.push(Insight::new(
            InsightType::BudgetUtilization,
            format!(
                "Your recommended budget allocation represents {}% of your total monthly budget",
                utilization.round() as i64
            ),
        ));
    }

    // Savings rate against the recommended allocation
    let total_current: i64 = recommendations.iter().map(|rec| rec.current).sum();
    let savings_rate = if total_recommended > 0 {
        (total_recommended - total_current) as f64 / total_recommended as f64 * 100.0
    } else {
        0.0
    };
    if savings_rate < 20.0 {
        insights.push(Insight::new(
            InsightType::SavingsAlert,
            "Your savings rate is below 20%. Consider reducing expenses to increase savings.",
        ));
    } else if savings_rate > 30.0 {
        insights.push(Insight::new(
            InsightType::SavingsSuccess,
            format!(
                "Great job! You're saving {}% of your income.",
                savings_rate.round() as i64
            ),
        ));
    } else {
        insights.push(Insight::new(
            InsightType::SavingsInfo,
            format!(
                "Your current savings rate is {}%.",
                savings_rate.round() as i64
            ),
        ));
    }

    // Concentration check
    for id in registry.ids() {
        let share = shares.get(id).copied().unwrap_or(0.0);
        if share > DOMINANCE_SHARE {
            insights.push(Insight::new(
                InsightType::CategoryAlert,
                format!(
                    "{} represents {}% of your spending. Consider if this aligns with your \
                     financial goals.",
                    registry.display_name(id),
                    share.round() as i64
                ),
            ));
        }
    }

    if insights.is_empty() {
        insights.push(Insight::new(
            InsightType::General,
            "Keep tracking your expenses to get more personalized insights.",
        ));
    }

    debug!(count = insights.len(), "generated insights");
    insights
}
