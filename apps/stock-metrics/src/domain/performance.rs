//! Trade and performance reporting shapes.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use serde::{Deserialize, Serialize};

use crate::metrics::period_return;

/// Whether a trade is still held.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TradeStatus {
    /// Position still held.
    Open,
    /// Position exited.
    Closed,
}

/// A position opened on the back of a recommendation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TradeData {
    /// Recommendation that produced the trade.
    pub recommendation_id: String,
    /// Owning user.
    pub user_id: String,
    /// Ticker symbol.
    pub symbol: String,
    /// Entry price.
    pub entry_price: Decimal,
    /// Exit price, once closed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exit_price: Option<Decimal>,
    /// Shares held.
    pub quantity: Decimal,
    /// Entry time.
    pub entry_date: DateTime<Utc>,
    /// Exit time, once closed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exit_date: Option<DateTime<Utc>>,
    /// Booked gain or loss.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub realized_gain_loss: Option<Decimal>,
    /// Mark-to-market gain or loss.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unrealized_gain_loss: Option<Decimal>,
    /// Open or closed.
    pub status: TradeStatus,
}

impl TradeData {
    /// Check if the trade has been exited.
    #[must_use]
    pub fn is_closed(&self) -> bool {
        self.status == TradeStatus::Closed && self.exit_price.is_some()
    }

    /// Capital committed at entry.
    #[must_use]
    pub fn cost_basis(&self) -> Decimal {
        self.entry_price * self.quantity
    }

    /// Percent return of a closed trade.
    #[must_use]
    pub fn return_percent(&self) -> Option<f64> {
        if !self.is_closed() {
            return None;
        }
        let entry = self.entry_price.to_f64()?;
        let exit = self.exit_price?.to_f64()?;
        Some(period_return(entry, exit))
    }

    /// Booked P&L, falling back to `(exit - entry) * quantity`.
    #[must_use]
    pub fn realized_pnl(&self) -> Option<Decimal> {
        if !self.is_closed() {
            return None;
        }
        self.realized_gain_loss
            .or_else(|| self.exit_price.map(|exit| (exit - self.entry_price) * self.quantity))
    }

    /// Mark-to-market P&L of an open trade at `current_price`.
    #[must_use]
    pub fn unrealized_pnl(&self, current_price: Option<Decimal>) -> Decimal {
        if self.is_closed() {
            return Decimal::ZERO;
        }
        current_price.map_or_else(
            || self.unrealized_gain_loss.unwrap_or(Decimal::ZERO),
            |price| (price - self.entry_price) * self.quantity,
        )
    }

    /// Check if this trade closed with a gain.
    #[must_use]
    pub fn is_winner(&self) -> bool {
        self.return_percent().is_some_and(|r| r > 0.0)
    }

    /// Days between entry and exit (or `now` while open).
    #[must_use]
    pub fn holding_days(&self, now: DateTime<Utc>) -> f64 {
        let end = self.exit_date.unwrap_or(now);
        (end - self.entry_date).num_seconds() as f64 / crate::metrics::SECONDS_PER_DAY
    }
}

/// Aggregate performance statistics over a period.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PerformanceMetrics {
    /// User the metrics cover, if user-scoped.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
    /// Whether the metrics cover all users.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub system_wide: Option<bool>,
    /// Number of trades considered.
    pub total_recommendations: u64,
    /// Closed trades with a positive return.
    pub successful_recommendations: u64,
    /// Winning share of closed trades, percent.
    pub success_rate: f64,
    /// Mean closed-trade return, percent.
    pub average_return: f64,
    /// Compounded closed-trade return, percent.
    pub total_return: f64,
    /// Maximum drawdown of the equity curve, percent.
    pub max_drawdown: f64,
    /// Sharpe ratio of closed-trade returns.
    pub sharpe_ratio: f64,
    /// Winning trades per losing trade.
    pub win_loss_ratio: f64,
    /// Mean holding period of closed trades, days.
    pub average_holding_period: f64,
    /// Start of the measured period.
    pub period_start: DateTime<Utc>,
    /// End of the measured period.
    pub period_end: DateTime<Utc>,
    /// When the metrics were computed.
    pub calculated_at: DateTime<Utc>,
}

/// Portfolio value comparison.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PortfolioValue {
    /// Current market value.
    pub current: Decimal,
    /// Value at cost.
    pub previous: Decimal,
    /// Absolute change.
    pub change: Decimal,
    /// Change, percent.
    pub change_percent: f64,
}

/// Recommendation counts by state.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecommendationCounts {
    /// All trades in the period.
    pub total: u64,
    /// Still open.
    pub active: u64,
    /// Closed.
    pub completed: u64,
    /// Closed with a gain.
    pub successful: u64,
    /// Winning share of closed trades, percent.
    pub success_rate: f64,
}

/// Realized and unrealized returns.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReturnBreakdown {
    /// Booked P&L.
    pub realized: Decimal,
    /// Mark-to-market P&L.
    pub unrealized: Decimal,
    /// Sum of both.
    pub total: Decimal,
    /// Total relative to cost basis, percent.
    pub total_percent: f64,
}

/// Per-recommendation performance line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecommendationPerformance {
    /// Recommendation identifier.
    pub recommendation_id: String,
    /// Ticker symbol.
    pub symbol: String,
    /// Entry price.
    pub entry_price: Decimal,
    /// Exit price if closed, otherwise the latest known price.
    pub current_price: Decimal,
    /// P&L amount.
    #[serde(rename = "return")]
    pub return_amount: Decimal,
    /// P&L, percent.
    pub return_percent: f64,
    /// Whole days held.
    pub days_held: i64,
    /// Open or closed.
    pub status: TradeStatus,
}

/// Periodic report for one user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PerformanceReport {
    /// Report owner.
    pub user_id: String,
    /// Period covered.
    pub report_period: super::common::DateRange,
    /// Portfolio value comparison.
    pub portfolio_value: PortfolioValue,
    /// Recommendation counts.
    pub recommendations: RecommendationCounts,
    /// Return breakdown.
    pub returns: ReturnBreakdown,
    /// Best lines by return percent.
    pub top_performers: Vec<RecommendationPerformance>,
    /// Worst lines by return percent.
    pub worst_performers: Vec<RecommendationPerformance>,
    /// Generation time.
    pub generated_at: DateTime<Utc>,
}
