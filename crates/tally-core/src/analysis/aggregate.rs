//! Monthly bucketing and per-category aggregation
//!
//! All functions here are pure and synchronous over an in-memory snapshot of
//! transactions. Records with an unparseable timestamp are skipped
//! individually (logged, never fatal); expenses whose category is not in the
//! registry contribute to month totals but to no category total.

use std::collections::{BTreeMap, HashMap};

use chrono::{DateTime, Datelike, Duration, NaiveDate, Utc};
use tracing::{debug, warn};

use crate::categories::CategoryRegistry;
use crate::models::{MonthlyBucket, MonthlyTotals, Transaction};

/// Calendar month of a timestamp in `YYYY-MM` form
pub fn month_key(at: DateTime<Utc>) -> String {
    at.format("%Y-%m").to_string()
}

/// First and last day of `date`'s calendar month
pub fn month_bounds(date: NaiveDate) -> (NaiveDate, NaiveDate) {
    let start = date.with_day(1).unwrap();
    let (next_year, next_month) = if start.month() == 12 {
        (start.year() + 1, 1)
    } else {
        (start.year(), start.month() + 1)
    };
    let end = NaiveDate::from_ymd_opt(next_year, next_month, 1).unwrap() - Duration::days(1);
    (start, end)
}

/// First and last day of the month immediately before `date`'s
pub fn prior_month_bounds(date: NaiveDate) -> (NaiveDate, NaiveDate) {
    let first = date.with_day(1).unwrap();
    month_bounds(first - Duration::days(1))
}

/// First day of the month `n` months before `date`'s month
pub fn months_back(date: NaiveDate, n: u32) -> NaiveDate {
    let mut year = date.year();
    let mut month = date.month() as i32 - n as i32;
    while month < 1 {
        month += 12;
        year -= 1;
    }
    NaiveDate::from_ymd_opt(year, month as u32, 1).unwrap()
}

/// Group expenses and incomes into calendar-month buckets, chronological
///
/// Undated rows are skipped and logged. Unknown-category expenses are kept in
/// `total_expense` but excluded from `by_category`.
pub fn bucket_by_month(
    expenses: &[Transaction],
    incomes: &[Transaction],
    registry: &CategoryRegistry,
) -> BTreeMap<String, MonthlyBucket> {
    let mut buckets: BTreeMap<String, MonthlyBucket> = BTreeMap::new();

    for tx in expenses {
        let at = match tx.occurred_at {
            Some(at) => at,
            None => {
                warn!(id = %tx.id, "skipping expense with unparseable timestamp");
                continue;
            }
        };

        let key = month_key(at);
        let bucket = buckets
            .entry(key.clone())
            .or_insert_with(|| MonthlyBucket::new(key));
        bucket.total_expense += tx.amount;

        match tx.category_id.as_deref() {
            Some(category) if registry.is_valid(category) => {
                *bucket.by_category.entry(category.to_string()).or_insert(0.0) += tx.amount;
            }
            Some(category) => {
                warn!(id = %tx.id, category, "unknown category, excluded from category totals");
            }
            None => {
                warn!(id = %tx.id, "expense has no category, excluded from category totals");
            }
        }
    }

    for tx in incomes {
        let at = match tx.occurred_at {
            Some(at) => at,
            None => {
                warn!(id = %tx.id, "skipping income with unparseable timestamp");
                continue;
            }
        };

        let key = month_key(at);
        let bucket = buckets
            .entry(key.clone())
            .or_insert_with(|| MonthlyBucket::new(key));
        bucket.total_income += tx.amount;
    }

    debug!(months = buckets.len(), "bucketed transactions by month");
    buckets
}

/// Total and count per registry category
///
/// Every registry category is present in the output, zeroed when nothing
/// matched. Undated rows were already reported by the bucketing pass and are
/// ignored here.
pub fn category_totals(
    expenses: &[Transaction],
    registry: &CategoryRegistry,
) -> (HashMap<String, f64>, HashMap<String, usize>) {
    let mut totals: HashMap<String, f64> =
        registry.ids().map(|id| (id.to_string(), 0.0)).collect();
    let mut counts: HashMap<String, usize> =
        registry.ids().map(|id| (id.to_string(), 0)).collect();

    for tx in expenses {
        if tx.occurred_at.is_none() {
            continue;
        }
        if let Some(category) = tx.category_id.as_deref() {
            if let (Some(total), Some(count)) = (totals.get_mut(category), counts.get_mut(category))
            {
                *total += tx.amount;
                *count += 1;
            }
        }
    }

    (totals, counts)
}

/// Mean spend per recorded expense for each registry category
pub fn category_averages(
    totals: &HashMap<String, f64>,
    counts: &HashMap<String, usize>,
) -> HashMap<String, f64> {
    totals
        .iter()
        .map(|(category, total)| {
            let count = counts.get(category).copied().unwrap_or(0);
            let average = if count > 0 { total / count as f64 } else { 0.0 };
            (category.clone(), average)
        })
        .collect()
}

/// Sum of all dated transaction amounts
pub fn total_amount(transactions: &[Transaction]) -> f64 {
    transactions
        .iter()
        .filter(|tx| tx.occurred_at.is_some())
        .map(|tx| tx.amount)
        .sum()
}

/// Each category's spend as a percentage of `total_spend`
///
/// All zeros when total spend is zero. Over categories with nonzero totals
/// the shares sum to 100 within rounding tolerance, provided every expense
/// carried a registry category.
pub fn share_percentages(
    totals: &HashMap<String, f64>,
    total_spend: f64,
) -> HashMap<String, f64> {
    totals
        .iter()
        .map(|(category, total)| {
            let share = if total_spend > 0.0 {
                total / total_spend * 100.0
            } else {
                0.0
            };
            (category.clone(), share)
        })
        .collect()
}

/// Chronological per-month income/expense totals for the populated months
///
/// Only months with at least one dated transaction appear; this is the
/// series the savings forecaster consumes.
pub fn monthly_totals(expenses: &[Transaction], incomes: &[Transaction]) -> Vec<MonthlyTotals> {
    let mut months: BTreeMap<String, MonthlyTotals> = BTreeMap::new();

    for tx in expenses {
        if let Some(at) = tx.occurred_at {
            let key = month_key(at);
            let entry = months
                .entry(key.clone())
                .or_insert_with(|| MonthlyTotals::new(key));
            entry.total_expense += tx.amount;
            entry.expense_count += 1;
        }
    }

    for tx in incomes {
        if let Some(at) = tx.occurred_at {
            let key = month_key(at);
            let entry = months
                .entry(key.clone())
                .or_insert_with(|| MonthlyTotals::new(key));
            entry.total_income += tx.amount;
            entry.income_count += 1;
        }
    }

    months.into_values().collect()
}
