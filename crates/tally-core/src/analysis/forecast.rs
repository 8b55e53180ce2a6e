//! Savings forecasting via a least-squares trend fit
//!
//! Fits an ordinary least-squares line over the monthly net-savings series
//! and projects one month ahead. The fit's coefficient of determination
//! doubles as the confidence measure.

use tracing::debug;

use crate::models::MonthlyTotals;

use super::types::{ForecastResult, SavingsForecast, TrendDirection};

/// An ordinary least-squares line over `x = 0..n-1`
#[derive(Debug, Clone, Copy)]
pub struct LinearFit {
    pub slope: f64,
    pub intercept: f64,
    /// Coefficient of determination, in [0, 1]
    pub r_squared: f64,
}

impl LinearFit {
    /// Value of the fitted line at `x`
    pub fn predict(&self, x: f64) -> f64 {
        self.slope * x + self.intercept
    }
}

/// Fit a least-squares line to `ys` indexed by position
///
/// A zero-variance series is a perfect constant fit: slope 0, r² 1.
pub fn fit_line(ys: &[f64]) -> LinearFit {
    let n = ys.len() as f64;
    let x_mean = (n - 1.0) / 2.0;
    let y_mean = ys.iter().sum::<f64>() / n;

    let mut sxx = 0.0;
    let mut sxy = 0.0;
    for (i, y) in ys.iter().enumerate() {
        let dx = i as f64 - x_mean;
        sxx += dx * dx;
        sxy += dx * (y - y_mean);
    }

    let slope = if sxx > 0.0 { sxy / sxx } else { 0.0 };
    let intercept = y_mean - slope * x_mean;

    let ss_tot: f64 = ys.iter().map(|y| (y - y_mean).powi(2)).sum();
    let r_squared = if ss_tot > f64::EPSILON {
        let ss_res: f64 = ys
            .iter()
            .enumerate()
            .map(|(i, y)| (y - (slope * i as f64 + intercept)).powi(2))
            .sum();
        (1.0 - ss_res / ss_tot).clamp(0.0, 1.0)
    } else {
        1.0
    };

    LinearFit {
        slope,
        intercept,
        r_squared,
    }
}

/// Rolling mean over a fixed window; `None` when the series is shorter than
/// the window
pub fn moving_average(series: &[f64], window: usize) -> Option<Vec<f64>> {
    if window == 0 || series.len() < window {
        return None;
    }
    Some(
        series
            .windows(window)
            .map(|w| w.iter().sum::<f64>() / window as f64)
            .collect(),
    )
}

/// Projects next month's net savings from a monthly history
#[derive(Debug, Clone)]
pub struct SavingsForecaster {
    /// Minimum months of history required before predicting (default 3)
    min_data_points: usize,
}

impl SavingsForecaster {
    pub fn new() -> Self {
        Self { min_data_points: 3 }
    }

    pub fn with_min_data_points(min_data_points: usize) -> Self {
        Self { min_data_points }
    }

    /// Forecast next month's savings from a chronological monthly series
    ///
    /// Fewer than `min_data_points` months yields
    /// [`ForecastResult::InsufficientData`] — a result, never an error.
    pub fn forecast(&self, history: &[MonthlyTotals], monthly_budget: f64) -> ForecastResult {
        if history.len() < self.min_data_points {
            debug!(
                months = history.len(),
                required = self.min_data_points,
                "not enough history for a savings forecast"
            );
            return ForecastResult::insufficient_data();
        }

        let savings: Vec<f64> = history.iter().map(|month| month.savings()).collect();
        let fit = fit_line(&savings);

        let predicted = fit.predict(savings.len() as f64).round();
        let trend = if fit.slope > 0.0 {
            TrendDirection::Increasing
        } else {
            TrendDirection::Decreasing
        };
        let confidence = fit.r_squared.abs().clamp(0.0, 1.0);

        // The decision table compares against the unrounded utilization
        let utilization = if monthly_budget > 0.0 {
            predicted / monthly_budget * 100.0
        } else {
            0.0
        };

        let suggestion = suggestion_for(confidence, trend, utilization);

        ForecastResult::Forecast(SavingsForecast {
            predicted_savings: predicted as i64,
            trend,
            confidence,
            suggestion: suggestion.to_string(),
            budget_utilization_percent: utilization.round() as i64,
        })
    }
}

impl Default for SavingsForecaster {
    fn default() -> Self {
        Self::new()
    }
}

/// Decision table, evaluated top-down, first match wins
fn suggestion_for(confidence: f64, trend: TrendDirection, utilization: f64) -> &'static str {
    if confidence < 0.5 {
        return "Your savings pattern is quite variable. Consider tracking expenses more \
                consistently.";
    }
    match trend {
        TrendDirection::Increasing => {
            if utilization >= 90.0 {
                "Great job! You're exceeding your savings goals. Consider increasing your budget."
            } else if utilization >= 70.0 {
                "You're on track! Keep up the good work with your current spending habits."
            } else {
                "Your savings are improving. Try to maintain this positive trend."
            }
        }
        TrendDirection::Decreasing => {
            if utilization < 50.0 {
                "Warning: Your savings are decreasing. Review your recent expenses and adjust \
                 your budget."
            } else {
                "Your savings are slightly decreasing. Consider reviewing your spending patterns."
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn history(savings: &[(f64, f64)]) -> Vec<MonthlyTotals> {
        savings
            .iter()
            .enumerate()
            .map(|(i, (income, expense))| {
                let mut month = MonthlyTotals::new(format!("2026-{:02}", i + 1));
                month.total_income = *income;
                month.total_expense = *expense;
                month
            })
            .collect()
    }

    #[test]
    fn test_fit_line_perfect_growth() {
        let fit = fit_line(&[100.0, 150.0, 200.0]);
        assert!((fit.slope - 50.0).abs() < 1e-9);
        assert!((fit.intercept - 100.0).abs() < 1e-9);
        assert!((fit.r_squared - 1.0).abs() < 1e-9);
        assert!((fit.predict(3.0) - 250.0).abs() < 1e-9);
    }

    #[test]
    fn test_fit_line_constant_series_is_perfect_fit() {
        let fit = fit_line(&[75.0, 75.0, 75.0, 75.0]);
        assert_eq!(fit.slope, 0.0);
        assert!((fit.r_squared - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_fit_line_noisy_series_confidence_in_range() {
        let fit = fit_line(&[100.0, -40.0, 210.0, 5.0, 90.0]);
        assert!(fit.r_squared >= 0.0 && fit.r_squared <= 1.0);
    }

    #[test]
    fn test_insufficient_history() {
        let forecaster = SavingsForecaster::new();
        let result = forecaster.forecast(&history(&[(1000.0, 900.0), (1000.0, 850.0)]), 1000.0);
        assert!(matches!(result, ForecastResult::InsufficientData { .. }));
    }

    #[test]
    fn test_linear_savings_growth_scenario() {
        // Net savings 100, 150, 200 -> next month 250, increasing, full confidence
        let forecaster = SavingsForecaster::new();
        let result = forecaster.forecast(
            &history(&[(1000.0, 900.0), (1000.0, 850.0), (1000.0, 800.0)]),
            1000.0,
        );

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

    #[test]
    fn test_zero_budget_reports_zero_utilization() {
        let forecaster = SavingsForecaster::new();
        let result = forecaster.forecast(
            &history(&[(1000.0, 900.0), (1000.0, 850.0), (1000.0, 800.0)]),
            0.0,
        );

        match result {
            ForecastResult::Forecast(forecast) => {
                assert_eq!(forecast.budget_utilization_percent, 0);
            }
            other => panic!("expected forecast, got {other:?}"),
        }
    }

    #[test]
    fn test_declining_savings_warning() {
        // Net savings 300, 200, 100 -> prediction 0, well under half the budget
        let forecaster = SavingsForecaster::new();
        let result = forecaster.forecast(
            &history(&[(1000.0, 700.0), (1000.0, 800.0), (1000.0, 900.0)]),
            1000.0,
        );

        match result {
            ForecastResult::Forecast(forecast) => {
                assert_eq!(forecast.trend, TrendDirection::Decreasing);
                assert!(forecast.suggestion.starts_with("Warning"));
            }
            other => panic!("expected forecast, got {other:?}"),
        }
    }

    #[test]
    fn test_suggestion_table_order() {
        // Low confidence wins regardless of trend
        assert!(suggestion_for(0.2, TrendDirection::Increasing, 95.0).contains("variable"));
        assert!(suggestion_for(0.9, TrendDirection::Increasing, 95.0).contains("exceeding"));
        assert!(suggestion_for(0.9, TrendDirection::Increasing, 75.0).contains("on track"));
        assert!(suggestion_for(0.9, TrendDirection::Increasing, 10.0).contains("improving"));
        assert!(suggestion_for(0.9, TrendDirection::Decreasing, 10.0).starts_with("Warning"));
        assert!(suggestion_for(0.9, TrendDirection::Decreasing, 60.0).contains("slightly"));
    }

    #[test]
    fn test_moving_average() {
        assert_eq!(
            moving_average(&[1.0, 2.0, 3.0, 4.0], 3),
            Some(vec![2.0, 3.0])
        );
        assert_eq!(moving_average(&[1.0, 2.0], 3), None);
        assert_eq!(moving_average(&[1.0, 2.0], 0), None);
    }
}
