//! Statistical math utilities for performance metric calculations.
//!
//! All dispersion measures use population statistics (divisor `N`).

use super::stats::percentage_change;

/// Calculate the arithmetic mean of a slice.
pub fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    Some(values.iter().sum::<f64>() / values.len() as f64)
}

/// Calculate the population variance of a slice.
pub fn population_variance(values: &[f64]) -> Option<f64> {
    let avg = mean(values)?;
    let variance_sum: f64 = values.iter().map(|v| (v - avg) * (v - avg)).sum();
    Some(variance_sum / values.len() as f64)
}

/// Calculate the population standard deviation of a slice.
pub fn population_std_dev(values: &[f64]) -> Option<f64> {
    population_variance(values).map(f64::sqrt)
}

/// Percent change between each consecutive pair of prices.
///
/// A pair whose first price is zero contributes `0.0`.
pub fn period_returns(prices: &[f64]) -> Vec<f64> {
    prices
        .windows(2)
        .map(|pair| percentage_change(pair[0], pair[1]))
        .collect()
}
