//! Constants for performance metric calculations.

/// Scale factor between a ratio and a percentage.
pub const PERCENT: f64 = 100.0;

/// Default risk-free rate used by the Sharpe ratio (2%).
pub const DEFAULT_RISK_FREE_RATE: f64 = 0.02;

/// Default number of decimal places for rounding.
pub const DEFAULT_DECIMALS: i32 = 2;

/// Number of entries kept in the top/worst performer lists of a report.
pub const TOP_PERFORMERS: usize = 5;

/// Seconds per day, for holding period conversion.
pub const SECONDS_PER_DAY: f64 = 86_400.0;
