//! Boundary-point spending trends
//!
//! A category's trend is the signed percentage change between its totals in
//! the earliest and latest populated monthly buckets. Intermediate months
//! are deliberately ignored — this is a boundary comparison, not a fitted
//! slope — to match the recommendation engine's long-standing behavior.

use std::collections::{BTreeMap, HashMap};

use crate::categories::CategoryRegistry;
use crate::models::MonthlyBucket;

/// Percentage change per category between the first and last populated month
///
/// Zero for every category when fewer than two months are populated, when
/// the category's first-month total is zero, or when the category never
/// appears. Values stay fractional; round at the boundary, not here.
pub fn category_trends(
    buckets: &BTreeMap<String, MonthlyBucket>,
    registry: &CategoryRegistry,
) -> HashMap<String, f64> {
    let mut trends: HashMap<String, f64> =
        registry.ids().map(|id| (id.to_string(), 0.0)).collect();

    let mut months = buckets.values();
    let (first, last) = match (months.next(), months.next_back()) {
        (Some(first), Some(last)) => (first, last),
        _ => return trends,
    };

    for (category, trend) in trends.iter_mut() {
        let first_total = first.by_category.get(category.as_str()).copied().unwrap_or(0.0);
        let last_total = last.by_category.get(category.as_str()).copied().unwrap_or(0.0);
        if first_total > 0.0 {
            *trend = (last_total - first_total) / first_total * 100.0;
        }
    }

    trends
}
