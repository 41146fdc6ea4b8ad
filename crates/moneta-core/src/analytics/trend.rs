//! Growth-rate and trend-direction analysis of numeric series

use crate::error::Result;
use crate::models::TrendDirection;
use crate::stats;

use super::AnalyticsEngine;

/// Compound growth rate of a series as a percentage
///
/// `((last / first) ^ (1 / periods) - 1) * 100`; 0 for fewer than two
/// points or a non-positive first value.
pub fn growth_rate(values: &[f64]) -> f64 {
    if values.len() < 2 {
        return 0.0;
    }
    let first = values[0];
    let last = values[values.len() - 1];
    if first <= 0.0 {
        return 0.0;
    }
    let periods = (values.len() - 1) as f64;
    ((last / first).powf(1.0 / periods) - 1.0) * 100.0
}

/// Classify the slope of a series fitted against its index
///
/// A slope inside ±0.01 counts as stable, as does any series shorter
/// than two points.
pub fn trend_direction(values: &[f64]) -> TrendDirection {
    if values.len() < 2 {
        return TrendDirection::Stable;
    }
    let x: Vec<f64> = (0..values.len()).map(|i| i as f64).collect();
    let fit = stats::linear_regression(&x, values);

    if fit.slope > 0.01 {
        TrendDirection::Increasing
    } else if fit.slope < -0.01 {
        TrendDirection::Decreasing
    } else {
        TrendDirection::Stable
    }
}

impl AnalyticsEngine<'_> {
    /// Compound growth of one category's monthly spending
    ///
    /// Pulls the most recent `months` buckets, reads the category's amount
    /// from each (0 where absent), and feeds the chronological series into
    /// [`growth_rate`].
    pub fn category_growth_rate(
        &self,
        user_id: &str,
        category: &str,
        months: usize,
    ) -> Result<f64> {
        let buckets = self.monthly_buckets(user_id, months)?;

        let mut series: Vec<f64> = buckets
            .iter()
            .map(|bucket| bucket.category_spending.get(category).copied().unwrap_or(0.0))
            .collect();
        // Buckets arrive newest first; growth wants chronological order
        series.reverse();

        Ok(growth_rate(&series))
    }
}
