//! Per-symbol summary of a price series.

use serde::{Deserialize, Serialize};

use super::math::period_returns;
use super::stats::{
    compound_return, max_drawdown, percentage_change, round_to_decimals, sharpe_ratio, volatility,
};

/// Headline statistics for one symbol's price series.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SeriesReport {
    /// Ticker symbol.
    pub symbol: String,
    /// Number of prices observed.
    pub observations: usize,
    /// Percent change from first to last price.
    pub change_percent: f64,
    /// Compounded period returns, as a ratio.
    pub compound_return: f64,
    /// Population std dev of period returns, percent units.
    pub volatility: f64,
    /// Largest peak-to-trough decline, percent.
    pub max_drawdown: f64,
    /// Sharpe ratio of period returns.
    pub sharpe_ratio: f64,
}

impl SeriesReport {
    /// Summarize `prices` (oldest first), rounding every statistic to `decimals`.
    #[must_use]
    pub fn from_prices(symbol: &str, prices: &[f64], risk_free_rate: f64, decimals: i32) -> Self {
        let returns = period_returns(prices);
        let change = match (prices.first(), prices.last()) {
            (Some(&first), Some(&last)) => percentage_change(first, last),
            _ => 0.0,
        };

        Self {
            symbol: symbol.to_string(),
            observations: prices.len(),
            change_percent: round_to_decimals(change, decimals),
            compound_return: round_to_decimals(compound_return(&returns), decimals),
            volatility: round_to_decimals(volatility(prices), decimals),
            max_drawdown: round_to_decimals(max_drawdown(prices), decimals),
            sharpe_ratio: round_to_decimals(sharpe_ratio(&returns, risk_free_rate), decimals),
        }
    }
}
