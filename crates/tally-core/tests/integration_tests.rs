//! Integration tests for tally-core
//!
//! These tests exercise the full store -> aggregate -> analyze workflow and
//! the alert evaluation path against the in-memory collaborators.

use std::sync::Arc;

use chrono::{DateTime, NaiveDate, TimeZone, Utc};

use tally_core::{
    AlertEvaluator, AlertSeverity, AlertType, AnalyticsService, CategoryRegistry, ForecastResult,
    InsightType, MemorySink, MemoryStore, Transaction, TrendDirection,
};

fn at(y: i32, m: u32, d: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(y, m, d, 12, 0, 0).unwrap()
}

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

/// Three months of regular activity for one user:
/// - salary income of 2000 each month
/// - housing at a steady 800
/// - food growing 200 -> 260 -> 320 (+60% first to last)
fn seed_regular_history(store: &MemoryStore, user_id: &str) {
    for (i, month) in [4u32, 5, 6].iter().enumerate() {
        store.insert(
            user_id,
            Transaction::income(format!("i{month}"), 2000.0, "salary", at(2026, *month, 1)),
        );
        store.insert(
            user_id,
            Transaction::expense(format!("h{month}"), 800.0, "housing", at(2026, *month, 3)),
        );
        store.insert(
            user_id,
            Transaction::expense(
                format!("f{month}"),
                200.0 + 60.0 * i as f64,
                "food",
                at(2026, *month, 10),
            ),
        );
    }
}

// =============================================================================
// Recommendation Workflow Tests
// =============================================================================

#[tokio::test]
async fn test_full_recommendation_workflow() {
    let store = MemoryStore::new();
    seed_regular_history(&store, "u1");
    let service = AnalyticsService::new(Arc::new(store));

    let bundle = service
        .budget_recommendations("u1", 2000.0, date(2026, 6, 15))
        .await
        .unwrap();

    // Every registry category is present
    let registry = CategoryRegistry::builtin();
    assert_eq!(bundle.recommendations.len(), registry.len());

    // Shares over spending categories sum to ~100
    let share_sum: i64 = bundle
        .recommendations
        .iter()
        .map(|rec| rec.share_percent)
        .sum();
    assert!((share_sum - 100).abs() <= 1, "share sum {share_sum}");

    // Food grew 60% first-to-last, so its recommendation is pulled back
    let food = bundle
        .recommendations
        .iter()
        .find(|rec| rec.category_id == "food")
        .unwrap();
    assert_eq!(food.trend_percent, 60);

    // The cap invariant holds for every category
    for rec in &bundle.recommendations {
        let cap = 2000.0 * rec.share_percent as f64 / 100.0;
        assert!(
            rec.recommended as f64 <= cap + 20.0,
            "{}: {} > {}",
            rec.category_id,
            rec.recommended,
            cap
        );
    }

    // The trend rule called out the food growth
    assert!(bundle.insights.iter().any(|insight| {
        insight.kind == InsightType::SpendingTrend && insight.message.contains("Food & Dining")
    }));

    assert_eq!(bundle.summary.total_expenses, 3180);
    assert_eq!(bundle.summary.average_monthly_income, 2000);
}

#[tokio::test]
async fn test_new_user_gets_onboarding_bundle() {
    let store = MemoryStore::new();
    let service = AnalyticsService::new(Arc::new(store));

    let bundle = service
        .budget_recommendations("fresh", 1000.0, date(2026, 6, 15))
        .await
        .unwrap();

    assert!(bundle.recommendations.is_empty());
    let kinds: Vec<_> = bundle.insights.iter().map(|insight| insight.kind).collect();
    assert_eq!(
        kinds,
        vec![
            InsightType::Welcome,
            InsightType::GettingStarted,
            InsightType::Tips
        ]
    );
    assert_eq!(bundle.summary.total_expenses, 0);
    assert_eq!(bundle.summary.average_monthly_income, 0);
}

#[tokio::test]
async fn test_malformed_records_never_fail_a_request() {
    let store = MemoryStore::new();
    seed_regular_history(&store, "u1");

    // An undated record and an unknown-category record in the same window
    let mut undated = Transaction::expense("broken", 50.0, "food", at(2026, 6, 2));
    undated.occurred_at = None;
    store.insert("u1", undated);
    store.insert(
        "u1",
        Transaction::expense("mystery", 75.0, "not_a_category", at(2026, 6, 4)),
    );

    let service = AnalyticsService::new(Arc::new(store));
    let bundle = service
        .budget_recommendations("u1", 2000.0, date(2026, 6, 15))
        .await
        .unwrap();

    // Undated row excluded entirely; unknown category only in the total
    assert_eq!(bundle.summary.total_expenses, 3255);
    assert!(bundle
        .recommendations
        .iter()
        .all(|rec| rec.category_id != "not_a_category"));
}

// =============================================================================
// Forecast Workflow Tests
// =============================================================================

#[tokio::test]
async fn test_forecast_scenario_linear_growth() {
    // Net savings 100, 150, 200 -> 250 predicted, increasing, confidence 1.0
    let store = MemoryStore::new();
    for (month, expense) in [(4u32, 1900.0), (5, 1850.0), (6, 1800.0)] {
        store.insert(
            "u1",
            Transaction::income(format!("i{month}"), 2000.0, "salary", at(2026, month, 1)),
        );
        store.insert(
            "u1",
            Transaction::expense(format!("e{month}"), expense, "housing", at(2026, month, 15)),
        );
    }

    let service = AnalyticsService::new(Arc::new(store));
    let result = service
        .savings_forecast("u1", 1000.0, date(2026, 6, 20))
        .await
        .unwrap();

    match result {
        ForecastResult::Forecast(forecast) => {
            assert_eq!(forecast.predicted_savings, 250);
            assert_eq!(forecast.trend, TrendDirection::Increasing);
            assert!((forecast.confidence - 1.0).abs() < 1e-9);
            assert_eq!(forecast.budget_utilization_percent, 25);
        }
        other => panic!("expected forecast, got {other:?}"),
    }
}

#[tokio::test]
async fn test_forecast_requires_three_months() {
    let store = MemoryStore::new();
    for month in [5u32, 6] {
        store.insert(
            "u1",
            Transaction::income(format!("i{month}"), 2000.0, "salary", at(2026, month, 1)),
        );
    }

    let service = AnalyticsService::new(Arc::new(store));
    let result = service
        .savings_forecast("u1", 1000.0, date(2026, 6, 20))
        .await
        .unwrap();

    match result {
        ForecastResult::InsufficientData { suggestion } => {
            assert!(suggestion.contains("at least 3 months"));
        }
        other => panic!("expected insufficient data, got {other:?}"),
    }
}

// =============================================================================
// Alert Evaluation Tests
// =============================================================================

#[tokio::test]
async fn test_budget_alert_scenario() {
    // Budget 1000, current-month expenses 850 -> medium budget alert
    let store = MemoryStore::new();
    let sink = MemorySink::new();
    let expense = Transaction::expense("e1", 850.0, "housing", at(2026, 6, 10));
    store.insert("u1", expense.clone());

    let evaluator = AlertEvaluator::new(CategoryRegistry::builtin());
    let events = evaluator
        .evaluate_at(&store, &sink, "u1", &expense, Some(1000.0), date(2026, 6, 15))
        .await;

    let budget = events
        .iter()
        .find(|event| event.kind == AlertType::BudgetAlert)
        .expect("budget alert should fire");
    assert_eq!(budget.severity, AlertSeverity::Medium);
    assert_eq!(sink.published().len(), events.len());
}

#[tokio::test]
async fn test_spike_alert_scenario() {
    // Prior month 100, current month 160 -> 60% spike
    let store = MemoryStore::new();
    let sink = MemorySink::new();
    store.insert(
        "u1",
        Transaction::expense("prior", 100.0, "entertainment", at(2026, 5, 20)),
    );
    let latest = Transaction::expense("cur", 160.0, "entertainment", at(2026, 6, 10));
    store.insert("u1", latest.clone());

    let evaluator = AlertEvaluator::new(CategoryRegistry::builtin());
    let events = evaluator
        .evaluate_at(&store, &sink, "u1", &latest, None, date(2026, 6, 15))
        .await;

    let spike = events
        .iter()
        .find(|event| event.kind == AlertType::SpendingSpike)
        .expect("spike alert should fire");
    assert!(spike.message.contains("60%"));
    assert!(spike.message.contains("Entertainment"));
}

#[tokio::test]
async fn test_savings_rate_alert_scenario() {
    // Income 1000, expenses 900 -> 10% savings rate, below the 20% floor
    let store = MemoryStore::new();
    let sink = MemorySink::new();
    store.insert(
        "u1",
        Transaction::income("i1", 1000.0, "salary", at(2026, 6, 1)),
    );
    let expense = Transaction::expense("e1", 900.0, "food", at(2026, 6, 10));
    store.insert("u1", expense.clone());

    let evaluator = AlertEvaluator::new(CategoryRegistry::builtin());
    let events = evaluator
        .evaluate_at(&store, &sink, "u1", &expense, None, date(2026, 6, 15))
        .await;

    assert!(events
        .iter()
        .any(|event| event.kind == AlertType::SavingsAlert));
}

#[tokio::test]
async fn test_alert_checks_are_independent_across_users() {
    // A user with no data fires nothing even while another user trips alerts
    let store = MemoryStore::new();
    let sink = MemorySink::new();
    let expense = Transaction::expense("e1", 850.0, "housing", at(2026, 6, 10));
    store.insert("spender", expense.clone());

    let evaluator = AlertEvaluator::new(CategoryRegistry::builtin());
    let quiet = evaluator
        .evaluate_at(&store, &sink, "quiet", &expense, Some(1000.0), date(2026, 6, 15))
        .await;
    assert!(quiet.is_empty());

    let loud = evaluator
        .evaluate_at(&store, &sink, "spender", &expense, Some(1000.0), date(2026, 6, 15))
        .await;
    assert!(!loud.is_empty());
}

// =============================================================================
// Dashboard Summary Tests
// =============================================================================

#[tokio::test]
async fn test_dashboard_summary_workflow() {
    let store = MemoryStore::new();
    seed_regular_history(&store, "u1");

    let service = AnalyticsService::new(Arc::new(store));
    let summary = service
        .dashboard_summary("u1", 2000.0, date(2026, 6, 15))
        .await
        .unwrap();

    // June: 800 housing + 320 food against 2000 income
    assert!((summary.monthly_expenses - 1120.0).abs() < 1e-9);
    assert!((summary.monthly_income - 2000.0).abs() < 1e-9);
    assert!((summary.budget_utilization_percent - 56.0).abs() < 1e-9);

    // All three months: 6000 income, 3180 expenses
    assert!((summary.running_balance - 2820.0).abs() < 1e-9);

    assert_eq!(summary.top_categories[0].category_id, "housing");
    assert_eq!(summary.top_categories[0].name, "Housing");
}
