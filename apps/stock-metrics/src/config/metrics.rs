//! Metric calculation settings.

use serde::{Deserialize, Serialize};

use crate::metrics::{DEFAULT_DECIMALS, DEFAULT_RISK_FREE_RATE};

/// Settings applied when computing series statistics.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MetricsConfig {
    /// Risk-free rate subtracted in the Sharpe ratio.
    #[serde(default = "default_risk_free_rate")]
    pub risk_free_rate: f64,
    /// Decimal places for reported values.
    #[serde(default = "default_decimals")]
    pub decimals: i32,
    /// Minimum series length below which ranking runs sequentially.
    #[serde(default = "default_min_parallel_series")]
    pub min_parallel_series: usize,
}

impl Default for MetricsConfig {
    fn default() -> Self {
        Self {
            risk_free_rate: default_risk_free_rate(),
            decimals: default_decimals(),
            min_parallel_series: default_min_parallel_series(),
        }
    }
}

const fn default_risk_free_rate() -> f64 {
    DEFAULT_RISK_FREE_RATE
}

const fn default_decimals() -> i32 {
    DEFAULT_DECIMALS
}

const fn default_min_parallel_series() -> usize {
    8
}
