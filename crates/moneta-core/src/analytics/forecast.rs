//! Short-horizon income/expense projection
//!
//! Fits independent regressions of month index against income and
//! expenses, extrapolates forward, and scores confidence from historical
//! volatility: the calmer the last year looked, the more the straight
//! line is worth.

use chrono::{Datelike, NaiveDate, Utc};

use crate::error::Result;
use crate::models::ForecastPoint;
use crate::stats;

use super::AnalyticsEngine;

/// Months of history fetched for a forecast
const HISTORY_MONTHS: usize = 12;

/// Minimum buckets required before any projection is attempted
const MIN_HISTORY: usize = 3;

const MIN_CONFIDENCE: f64 = 0.1;
const MAX_CONFIDENCE: f64 = 0.95;

impl AnalyticsEngine<'_> {
    /// Project income and expenses for the next `months_ahead` months
    ///
    /// Requires at least three months of aggregated history; with less the
    /// forecast list is empty, never an error.
    pub fn generate_forecast(
        &self,
        user_id: &str,
        months_ahead: usize,
    ) -> Result<Vec<ForecastPoint>> {
        let buckets = self.monthly_buckets(user_id, HISTORY_MONTHS)?;
        if buckets.len() < MIN_HISTORY {
            tracing::debug!(
                user = user_id,
                months = buckets.len(),
                "Not enough history to forecast"
            );
            return Ok(vec![]);
        }

        // Buckets arrive newest first; the regression wants chronological series
        let mut income_history: Vec<f64> = buckets.iter().map(|b| b.total_income).collect();
        let mut expense_history: Vec<f64> = buckets.iter().map(|b| b.total_expenses).collect();
        income_history.reverse();
        expense_history.reverse();

        let today = Utc::now().date_naive();
        Ok(forecast_from(
            &income_history,
            &expense_history,
            months_ahead,
            today,
        ))
    }

    /// Projected income for next month, 0 when history is insufficient
    pub fn predict_next_month_income(&self, user_id: &str) -> Result<f64> {
        let forecast = self.generate_forecast(user_id, 1)?;
        Ok(forecast.first().map(|f| f.predicted_income).unwrap_or(0.0))
    }

    /// Projected expenses for next month, 0 when history is insufficient
    pub fn predict_next_month_expenses(&self, user_id: &str) -> Result<f64> {
        let forecast = self.generate_forecast(user_id, 1)?;
        Ok(forecast
            .first()
            .map(|f| f.predicted_expenses)
            .unwrap_or(0.0))
    }
}

/// Build the projection from chronological history series
///
/// Month indices run `1..=n`, so the i-th projected month sits at
/// `x = n + i`. Confidence is `1 - avg(CV_income, CV_expense)` clamped to
/// `[0.1, 0.95]`; a series with a non-positive mean contributes a CV of 0.
fn forecast_from(
    income_history: &[f64],
    expense_history: &[f64],
    months_ahead: usize,
    today: NaiveDate,
) -> Vec<ForecastPoint> {
    let n = income_history.len();
    let x: Vec<f64> = (1..=n).map(|i| i as f64).collect();

    let income_fit = stats::linear_regression(&x, income_history);
    let expense_fit = stats::linear_regression(&x, expense_history);

    let income_cv = stats::coefficient_of_variation(income_history);
    let expense_cv = stats::coefficient_of_variation(expense_history);
    let confidence =
        (1.0 - (income_cv + expense_cv) / 2.0).clamp(MIN_CONFIDENCE, MAX_CONFIDENCE);

    (1..=months_ahead)
        .map(|i| {
            let x_pred = (n + i) as f64;
            let predicted_income = income_fit.predict(x_pred);
            let predicted_expenses = expense_fit.predict(x_pred);
            ForecastPoint {
                period: period_label(today, i),
                predicted_income,
                predicted_expenses,
                predicted_balance: predicted_income - predicted_expenses,
                confidence,
            }
        })
        .collect()
}

/// `YYYY-MM` label of the month `months_ahead` months after `today`
fn period_label(today: NaiveDate, months_ahead: usize) -> String {
    let total = today.year() * 12 + today.month0() as i32 + months_ahead as i32;
    let year = total.div_euclid(12);
    let month = total.rem_euclid(12) + 1;
    format!("{:04}-{:02}", year, month)
}
