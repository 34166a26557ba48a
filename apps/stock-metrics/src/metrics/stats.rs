//! Scalar performance statistics over price and return series.
//!
//! Every function here is total: degenerate inputs (empty series, zero
//! baselines, flat returns) map to `0.0` instead of an error. Non-finite
//! inputs are not screened and propagate through ordinary float arithmetic.

use super::constants::{DEFAULT_DECIMALS, DEFAULT_RISK_FREE_RATE, PERCENT};
use super::math::{mean, period_returns, population_std_dev};

/// Percent change from `old_value` to `new_value`.
///
/// Returns `0.0` when `old_value` is zero.
#[must_use]
pub fn percentage_change(old_value: f64, new_value: f64) -> f64 {
    if old_value == 0.0 {
        return 0.0;
    }
    ((new_value - old_value) / old_value) * PERCENT
}

/// Percent return of a trade entered at `entry_price` and exited at `exit_price`.
#[must_use]
pub fn period_return(entry_price: f64, exit_price: f64) -> f64 {
    percentage_change(entry_price, exit_price)
}

/// Compound a sequence of consecutive percent returns.
///
/// The result is a ratio (`0.21` for +21%), not a percentage. An empty
/// sequence compounds to `0.0`.
#[must_use]
pub fn compound_return(returns: &[f64]) -> f64 {
    returns
        .iter()
        .fold(1.0, |acc, r| acc * (1.0 + r / PERCENT))
        - 1.0
}

/// Sharpe ratio: `(mean - risk_free_rate) / population_std_dev`.
///
/// Returns `0.0` for an empty series or when the returns have no dispersion.
#[must_use]
pub fn sharpe_ratio(returns: &[f64], risk_free_rate: f64) -> f64 {
    let (Some(avg), Some(std)) = (mean(returns), population_std_dev(returns)) else {
        return 0.0;
    };
    if std == 0.0 {
        return 0.0;
    }
    (avg - risk_free_rate) / std
}

/// Sharpe ratio with the default 2% risk-free rate.
#[must_use]
pub fn sharpe_ratio_default(returns: &[f64]) -> f64 {
    sharpe_ratio(returns, DEFAULT_RISK_FREE_RATE)
}

/// Largest peak-to-trough decline, as a percentage of the running peak.
///
/// The peak starts at the first value and only moves up.
#[must_use]
pub fn max_drawdown(values: &[f64]) -> f64 {
    let Some(&first) = values.first() else {
        return 0.0;
    };

    let mut peak = first;
    let mut max_drawdown = 0.0;

    for &value in values {
        if value > peak {
            peak = value;
        }
        let drawdown = (peak - value) / peak;
        if drawdown > max_drawdown {
            max_drawdown = drawdown;
        }
    }

    max_drawdown * PERCENT
}

/// Population standard deviation of the percent changes between consecutive prices.
#[must_use]
pub fn volatility(prices: &[f64]) -> f64 {
    if prices.len() < 2 {
        return 0.0;
    }
    population_std_dev(&period_returns(prices)).unwrap_or(0.0)
}

/// Round to `decimals` places, halves away from zero.
#[must_use]
pub fn round_to_decimals(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round() / factor
}

/// Round to two decimal places.
#[must_use]
pub fn round2(value: f64) -> f64 {
    round_to_decimals(value, DEFAULT_DECIMALS)
}

/// Restrict `value` to `[min, max]`.
///
/// The lower bound is applied before the upper bound, so an inverted range
/// (`min > max`) yields `max`. NaN passes through unchanged.
#[must_use]
pub fn clamp(value: f64, min: f64, max: f64) -> f64 {
    let lower_bounded = if value < min { min } else { value };
    if lower_bounded > max { max } else { lower_bounded }
}

/// Position of `value` within `[min, max]`, scaled to `[0, 1]`.
///
/// A degenerate range (`min == max`) normalizes to `0.0`.
#[must_use]
pub fn normalize_score(value: f64, min: f64, max: f64) -> f64 {
    if max == min {
        return 0.0;
    }
    clamp((value - min) / (max - min), 0.0, 1.0)
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;
    use test_case::test_case;

    use super::*;

    const EPS: f64 = 1e-9;

    #[test_case(100.0, 110.0, 10.0 ; "gain")]
    #[test_case(100.0, 90.0, -10.0 ; "loss")]
    #[test_case(0.0, 100.0, 0.0 ; "zero baseline")]
    #[test_case(50.0, 50.0, 0.0 ; "unchanged")]
    fn test_percentage_change(old: f64, new: f64, expected: f64) {
        assert!((percentage_change(old, new) - expected).abs() < EPS);
    }

    #[test]
    fn test_period_return() {
        assert!((period_return(100.0, 120.0) - 20.0).abs() < EPS);
        assert!((period_return(100.0, 80.0) + 20.0).abs() < EPS);
        assert_eq!(period_return(0.0, 80.0), 0.0);
    }

    #[test]
    fn test_compound_return() {
        assert_eq!(compound_return(&[]), 0.0);
        // +10% then +10% = +21%
        assert!((compound_return(&[10.0, 10.0]) - 0.21).abs() < EPS);
        // +50% then -50% = -25%
        assert!((compound_return(&[50.0, -50.0]) + 0.25).abs() < EPS);
    }

    #[test]
    fn test_sharpe_ratio_degenerate() {
        assert_eq!(sharpe_ratio_default(&[]), 0.0);
        assert_eq!(sharpe_ratio_default(&[5.0, 5.0, 5.0]), 0.0);
        assert_eq!(sharpe_ratio(&[3.0], 0.5), 0.0);
    }

    #[test]
    fn test_sharpe_ratio_population() {
        // mean 2, population std dev 1
        let returns = [1.0, 3.0];
        assert!((sharpe_ratio(&returns, 0.0) - 2.0).abs() < EPS);
        assert!((sharpe_ratio_default(&returns) - 1.98).abs() < EPS);
    }

    #[test]
    fn test_max_drawdown() {
        assert_eq!(max_drawdown(&[]), 0.0);
        let dd = max_drawdown(&[100.0, 110.0, 90.0, 120.0]);
        assert!((dd - 20.0 / 110.0 * 100.0).abs() < EPS);
        assert!((dd - 18.181_818).abs() < 1e-6);
    }

    #[test]
    fn test_max_drawdown_monotonic_series() {
        assert_eq!(max_drawdown(&[1.0, 2.0, 3.0, 4.0]), 0.0);
        assert!((max_drawdown(&[100.0, 75.0, 50.0]) - 50.0).abs() < EPS);
    }

    #[test]
    fn test_volatility() {
        assert_eq!(volatility(&[]), 0.0);
        assert_eq!(volatility(&[100.0]), 0.0);
        // returns +10%, -10%: mean 0, population std dev 10
        assert!((volatility(&[100.0, 110.0, 99.0]) - 10.0).abs() < 1e-9);
        assert_eq!(volatility(&[100.0, 100.0, 100.0]), 0.0);
    }

    #[test]
    fn test_round_to_decimals() {
        assert_eq!(round2(3.14159), 3.14);
        assert_eq!(round_to_decimals(3.14159, 3), 3.142);
        assert_eq!(round_to_decimals(2.5, 0), 3.0);
        assert_eq!(round_to_decimals(-2.5, 0), -3.0);
    }

    #[test_case(5.0, 5.0 ; "inside")]
    #[test_case(-5.0, 0.0 ; "below")]
    #[test_case(15.0, 10.0 ; "above")]
    #[test_case(0.0, 0.0 ; "lower edge")]
    #[test_case(10.0, 10.0 ; "upper edge")]
    fn test_clamp(value: f64, expected: f64) {
        assert_eq!(clamp(value, 0.0, 10.0), expected);
    }

    #[test]
    fn test_clamp_inverted_range_returns_max() {
        assert_eq!(clamp(5.0, 10.0, 0.0), 0.0);
        assert_eq!(clamp(-5.0, 10.0, 0.0), 0.0);
    }

    #[test]
    fn test_clamp_nan_propagates() {
        assert!(clamp(f64::NAN, 0.0, 1.0).is_nan());
    }

    #[test]
    fn test_normalize_score() {
        assert_eq!(normalize_score(5.0, 0.0, 10.0), 0.5);
        assert_eq!(normalize_score(-1.0, 0.0, 10.0), 0.0);
        assert_eq!(normalize_score(11.0, 0.0, 10.0), 1.0);
        assert_eq!(normalize_score(7.0, 3.0, 3.0), 0.0);
    }

    proptest! {
        #[test]
        fn prop_zero_baseline_change_is_zero(a in -1e9f64..1e9) {
            prop_assert_eq!(percentage_change(0.0, a), 0.0);
        }

        #[test]
        fn prop_percentage_change_formula(a in 1e-3f64..1e6, b in -1e6f64..1e6) {
            prop_assert_eq!(percentage_change(a, b), ((b - a) / a) * 100.0);
        }

        #[test]
        fn prop_single_compound_return(r in -100f64..1000.0) {
            prop_assert!((compound_return(&[r]) - r / 100.0).abs() < 1e-9);
        }

        #[test]
        fn prop_round_is_idempotent(x in -1e9f64..1e9, d in 0i32..6) {
            let once = round_to_decimals(x, d);
            prop_assert_eq!(round_to_decimals(once, d), once);
        }

        #[test]
        fn prop_degenerate_range_normalizes_to_zero(v in -1e6f64..1e6, m in -1e6f64..1e6) {
            prop_assert_eq!(normalize_score(v, m, m), 0.0);
        }

        #[test]
        fn prop_single_price_has_no_volatility(p in -1e6f64..1e6) {
            prop_assert_eq!(volatility(&[p]), 0.0);
        }

        #[test]
        fn prop_new_peak_keeps_drawdown(values in prop::collection::vec(1.0f64..1e6, 1..50)) {
            let before = max_drawdown(&values);
            let peak = values.iter().copied().fold(f64::MIN, f64::max);
            let mut extended = values.clone();
            extended.push(peak + 1.0);
            prop_assert_eq!(max_drawdown(&extended), before);
        }
    }
}
