//! Performance metrics for price series and recommendation trades.
//!
//! Implements the statistics used for reporting and ranking:
//! - Percent change and trade return
//! - Compound return over consecutive periods
//! - Sharpe ratio (population statistics)
//! - Maximum drawdown (peak-to-trough decline)
//! - Volatility of period returns
//! - Rounding, clamping and score normalization

mod calculator;
mod constants;
mod format;
mod math;
mod series;
mod stats;

pub use calculator::{EquityPoint, PerformanceCalculator};
pub use constants::{
    DEFAULT_DECIMALS, DEFAULT_RISK_FREE_RATE, PERCENT, SECONDS_PER_DAY, TOP_PERFORMERS,
};
pub use format::{format_decimal, format_pct, format_ratio};
pub use math::{mean, period_returns, population_std_dev, population_variance};
pub use series::SeriesReport;
pub use stats::{
    clamp, compound_return, max_drawdown, normalize_score, percentage_change, period_return,
    round_to_decimals, round2, sharpe_ratio, sharpe_ratio_default, volatility,
};
