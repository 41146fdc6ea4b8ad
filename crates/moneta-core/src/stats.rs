//! Statistical primitives used across the analytics engine
//!
//! Pure functions over slices of f64. Every function has a defined
//! fallback for empty or insufficient input instead of an error: the
//! guards here are what keep the rest of the engine free of division by
//! zero.

/// Arithmetic mean, 0 for an empty slice
pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// Sample standard deviation (n-1 denominator), 0 for fewer than 2 values
pub fn sample_std_dev(values: &[f64]) -> f64 {
    if values.len() < 2 {
        return 0.0;
    }
    let avg = mean(values);
    let sum_squared_diffs: f64 = values.iter().map(|v| (v - avg) * (v - avg)).sum();
    (sum_squared_diffs / (values.len() - 1) as f64).sqrt()
}

/// Median over a sorted copy; average of the two middle elements for an
/// even count, 0 for an empty slice
pub fn median(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
    let mid = sorted.len() / 2;
    if sorted.len() % 2 == 0 {
        (sorted[mid - 1] + sorted[mid]) / 2.0
    } else {
        sorted[mid]
    }
}

/// Minimum and maximum, (0, 0) for an empty slice
pub fn min_max(values: &[f64]) -> (f64, f64) {
    if values.is_empty() {
        return (0.0, 0.0);
    }
    let mut min = values[0];
    let mut max = values[0];
    for &v in &values[1..] {
        if v < min {
            min = v;
        }
        if v > max {
            max = v;
        }
    }
    (min, max)
}

/// Coefficient of variation (std dev / mean), 0 unless the mean is positive
pub fn coefficient_of_variation(values: &[f64]) -> f64 {
    let avg = mean(values);
    if avg > 0.0 {
        sample_std_dev(values) / avg
    } else {
        0.0
    }
}

/// Ordinary least-squares fit of y against x
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearFit {
    pub slope: f64,
    pub intercept: f64,
}

impl LinearFit {
    /// Extrapolate the fitted line at `x`
    pub fn predict(&self, x: f64) -> f64 {
        self.slope * x + self.intercept
    }
}

/// Ordinary least-squares regression
///
/// Returns a zero fit when the inputs are empty, mismatched in length,
/// or the denominator `n * Σx² - (Σx)²` is zero.
pub fn linear_regression(x: &[f64], y: &[f64]) -> LinearFit {
    let zero = LinearFit {
        slope: 0.0,
        intercept: 0.0,
    };
    if x.is_empty() || y.is_empty() || x.len() != y.len() {
        return zero;
    }

    let n = x.len() as f64;
    let mut sum_x = 0.0;
    let mut sum_y = 0.0;
    let mut sum_xy = 0.0;
    let mut sum_x2 = 0.0;
    for (&xi, &yi) in x.iter().zip(y.iter()) {
        sum_x += xi;
        sum_y += yi;
        sum_xy += xi * yi;
        sum_x2 += xi * xi;
    }

    let denominator = n * sum_x2 - sum_x * sum_x;
    if denominator == 0.0 {
        return zero;
    }

    let slope = (n * sum_xy - sum_x * sum_y) / denominator;
    let intercept = (sum_y - slope * sum_x) / n;
    LinearFit { slope, intercept }
}

/// Standard score of `value` against `dataset`, 0 when the std dev is zero
pub fn z_score(value: f64, dataset: &[f64]) -> f64 {
    let std_dev = sample_std_dev(dataset);
    if std_dev == 0.0 {
        return 0.0;
    }
    (value - mean(dataset)) / std_dev
}

/// Sliding mean with the window clamped to `1..=values.len()`
pub fn moving_average(values: &[f64], window: usize) -> Vec<f64> {
    if values.is_empty() {
        return vec![];
    }
    let window = window.clamp(1, values.len());
    values
        .windows(window)
        .map(|chunk| chunk.iter().sum::<f64>() / window as f64)
        .collect()
}

/// Values whose absolute z-score exceeds `threshold` (2.0 is the usual cut)
pub fn detect_outliers(values: &[f64], threshold: f64) -> Vec<f64> {
    values
        .iter()
        .copied()
        .filter(|&v| z_score(v, values).abs() > threshold)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-4;

    #[test]
    fn test_mean_and_median_fixture() {
        let values = [1.0, 2.0, 3.0, 4.0];
        assert!((mean(&values) - 2.5).abs() < EPS);
        assert!((median(&values) - 2.5).abs() < EPS);
    }

    #[test]
    fn test_sample_std_dev_fixture() {
        let values = [1.0, 2.0, 3.0, 4.0];
        assert!((sample_std_dev(&values) - 1.2910).abs() < EPS);
    }

    #[test]
    fn test_empty_input_fallbacks() {
        assert_eq!(mean(&[]), 0.0);
        assert_eq!(median(&[]), 0.0);
        assert_eq!(sample_std_dev(&[5.0]), 0.0);
        assert_eq!(min_max(&[]), (0.0, 0.0));
        assert_eq!(coefficient_of_variation(&[]), 0.0);
        assert!(moving_average(&[], 3).is_empty());
    }

    #[test]
    fn test_median_odd_count() {
        assert!((median(&[9.0, 1.0, 5.0]) - 5.0).abs() < EPS);
    }

    #[test]
    fn test_min_max() {
        assert_eq!(min_max(&[3.0, -1.0, 7.0, 2.0]), (-1.0, 7.0));
    }

    #[test]
    fn test_linear_regression_perfect_line() {
        // y = 2x + 1
        let x = [0.0, 1.0, 2.0, 3.0];
        let y = [1.0, 3.0, 5.0, 7.0];
        let fit = linear_regression(&x, &y);
        assert!((fit.slope - 2.0).abs() < EPS);
        assert!((fit.intercept - 1.0).abs() < EPS);
        assert!((fit.predict(10.0) - 21.0).abs() < EPS);
    }

    #[test]
    fn test_linear_regression_degenerate_inputs() {
        let zero = LinearFit {
            slope: 0.0,
            intercept: 0.0,
        };
        assert_eq!(linear_regression(&[], &[]), zero);
        assert_eq!(linear_regression(&[1.0], &[1.0, 2.0]), zero);
        // Constant x makes the denominator zero
        assert_eq!(linear_regression(&[2.0, 2.0, 2.0], &[1.0, 2.0, 3.0]), zero);
    }

    #[test]
    fn test_z_score_guards_zero_std_dev() {
        assert_eq!(z_score(10.0, &[5.0, 5.0, 5.0]), 0.0);
        let dataset = [1.0, 2.0, 3.0, 4.0];
        // (4 - 2.5) / 1.2910 ≈ 1.1619
        assert!((z_score(4.0, &dataset) - 1.1619).abs() < EPS);
    }

    #[test]
    fn test_moving_average_window_clamped() {
        let values = [1.0, 2.0, 3.0, 4.0];
        assert_eq!(moving_average(&values, 2), vec![1.5, 2.5, 3.5]);
        // Window longer than the series collapses to one overall mean
        assert_eq!(moving_average(&values, 10), vec![2.5]);
        // Zero window is treated as one
        assert_eq!(moving_average(&values, 0).len(), 4);
    }

    #[test]
    fn test_detect_outliers() {
        let values = [10.0, 11.0, 10.5, 9.8, 10.2, 50.0];
        let outliers = detect_outliers(&values, 2.0);
        assert_eq!(outliers, vec![50.0]);

        assert!(detect_outliers(&[1.0, 1.0, 1.0], 2.0).is_empty());
    }
}
