//! Price history shapes.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One OHLCV bar.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PricePoint {
    /// Bar date.
    pub date: DateTime<Utc>,
    /// Opening price.
    pub open: f64,
    /// High price.
    pub high: f64,
    /// Low price.
    pub low: f64,
    /// Closing price.
    pub close: f64,
    /// Close adjusted for splits and dividends.
    pub adjusted_close: f64,
    /// Traded volume.
    pub volume: u64,
}

/// Chronological price history for one symbol.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StockPriceHistory {
    /// Ticker symbol.
    pub symbol: String,
    /// Bars, oldest first.
    pub prices: Vec<PricePoint>,
}

impl StockPriceHistory {
    /// Closing prices in chronological order.
    #[must_use]
    pub fn closes(&self) -> Vec<f64> {
        self.prices.iter().map(|p| p.close).collect()
    }

    /// Adjusted closing prices in chronological order.
    #[must_use]
    pub fn adjusted_closes(&self) -> Vec<f64> {
        self.prices.iter().map(|p| p.adjusted_close).collect()
    }

    /// Sort bars by date, oldest first.
    pub fn sort_chronologically(&mut self) {
        self.prices.sort_by_key(|p| p.date);
    }
}
