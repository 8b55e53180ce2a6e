//! Current-month dashboard rollup
//!
//! Pure computation over already-fetched snapshots: month totals, running
//! balance, budget status with day-by-day headroom, and a per-category
//! breakdown of the current month.

use std::collections::HashMap;

use chrono::NaiveDate;

use crate::categories::CategoryRegistry;
use crate::models::Transaction;

use super::aggregate;
use super::types::{
    BalanceStatus, CategoryBreakdownEntry, DashboardSummary, StatusMessage,
};

/// Build the dashboard summary for the month containing `today`
///
/// `current_*` slices hold the current month's records, `all_*` the full
/// history up to month end (used for the running balance). Uncategorized
/// expenses count toward the totals but not the category breakdown.
pub fn dashboard_summary(
    current_expenses: &[Transaction],
    current_incomes: &[Transaction],
    all_expenses: &[Transaction],
    all_incomes: &[Transaction],
    monthly_budget: f64,
    today: NaiveDate,
    registry: &CategoryRegistry,
) -> DashboardSummary {
    let monthly_expenses = aggregate::total_amount(current_expenses);
    let monthly_income = aggregate::total_amount(current_incomes);
    let monthly_balance = monthly_income - monthly_expenses;

    let running_balance =
        aggregate::total_amount(all_incomes) - aggregate::total_amount(all_expenses);

    let utilization = if monthly_budget > 0.0 {
        monthly_expenses / monthly_budget * 100.0
    } else {
        0.0
    };

    let (_, month_end) = aggregate::month_bounds(today);
    let remaining_days = ((month_end - today).num_days() + 1).max(1);
    let available_to_spend = (monthly_budget - monthly_expenses).max(0.0);
    let daily_budget = (available_to_spend / remaining_days as f64).max(0.0);

    let balance_status = BalanceStatus {
        is_negative: monthly_balance < 0.0,
        is_over_budget: utilization > 100.0,
        available_to_spend,
        remaining_days,
        daily_budget,
    };

    let mut messages = Vec::new();
    if balance_status.is_negative {
        messages.push(StatusMessage::warning(
            "You have exceeded your monthly income. Consider reducing expenses.",
        ));
    }
    if balance_status.is_over_budget {
        messages.push(StatusMessage::warning(
            "You have exceeded your monthly budget.",
        ));
    }
    if available_to_spend > 0.0 {
        messages.push(StatusMessage::info(format!(
            "You have ${:.2} remaining in your budget.",
            available_to_spend
        )));
    }
    if daily_budget > 0.0 {
        messages.push(StatusMessage::info(format!(
            "Your daily budget is ${:.2} for the remaining {} days.",
            daily_budget, remaining_days
        )));
    }

    let category_breakdown = breakdown(current_expenses, monthly_expenses, registry);
    let top_categories = category_breakdown.iter().take(3).cloned().collect();

    DashboardSummary {
        monthly_income,
        monthly_expenses,
        monthly_balance: monthly_balance.max(0.0),
        running_balance,
        monthly_budget,
        budget_utilization_percent: utilization.min(100.0),
        balance_status,
        messages,
        top_categories,
        category_breakdown,
    }
}

/// Group the month's expenses by category, largest first
fn breakdown(
    expenses: &[Transaction],
    monthly_expenses: f64,
    registry: &CategoryRegistry,
) -> Vec<CategoryBreakdownEntry> {
    let mut grouped: HashMap<&str, (f64, usize)> = HashMap::new();
    for tx in expenses {
        if tx.occurred_at.is_none() {
            continue;
        }
        if let Some(category) = tx.category_id.as_deref() {
            let entry = grouped.entry(category).or_insert((0.0, 0));
            entry.0 += tx.amount;
            entry.1 += 1;
        }
    }

    let mut entries: Vec<CategoryBreakdownEntry> = grouped
        .into_iter()
        .map(|(category, (amount, count))| CategoryBreakdownEntry {
            category_id: category.to_string(),
            name: registry.display_name(category).to_string(),
            amount,
            count,
            percent: if monthly_expenses > 0.0 {
                amount / monthly_expenses * 100.0
            } else {
                0.0
            },
        })
        .collect();

    entries.sort_by(|a, b| {
        b.amount
            .partial_cmp(&a.amount)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then_with(|| a.category_id.cmp(&b.category_id))
    });
    entries
}
