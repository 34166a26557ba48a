//! Performance calculator over recommendation trades.

use std::collections::HashMap;
use std::fmt::Write;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::constants::{DEFAULT_RISK_FREE_RATE, PERCENT, TOP_PERFORMERS};
use super::math::mean;
use super::stats::{compound_return, max_drawdown, percentage_change, period_return, sharpe_ratio};
use crate::domain::{
    DateRange, PerformanceMetrics, PerformanceReport, PortfolioValue, RecommendationCounts,
    RecommendationPerformance, ReturnBreakdown, TradeData, TradeStatus,
};

/// A point on a portfolio equity curve.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EquityPoint {
    /// Observation time.
    pub timestamp: DateTime<Utc>,
    /// Portfolio value.
    pub equity: f64,
}

/// Aggregates recommendation trades into performance metrics and reports.
#[derive(Debug, Clone)]
pub struct PerformanceCalculator {
    trades: Vec<TradeData>,
    equity_curve: Vec<EquityPoint>,
    risk_free_rate: f64,
}

impl Default for PerformanceCalculator {
    fn default() -> Self {
        Self::new()
    }
}

impl PerformanceCalculator {
    /// Create a calculator with the default risk-free rate.
    #[must_use]
    pub const fn new() -> Self {
        Self::with_risk_free_rate(DEFAULT_RISK_FREE_RATE)
    }

    /// Create a calculator with a custom risk-free rate.
    #[must_use]
    pub const fn with_risk_free_rate(risk_free_rate: f64) -> Self {
        Self {
            trades: Vec::new(),
            equity_curve: Vec::new(),
            risk_free_rate,
        }
    }

    /// Add a trade.
    pub fn add_trade(&mut self, trade: TradeData) {
        self.trades.push(trade);
    }

    /// Add a point to the equity curve. Points are expected in time order.
    pub fn add_equity_point(&mut self, timestamp: DateTime<Utc>, equity: f64) {
        self.equity_curve.push(EquityPoint { timestamp, equity });
    }

    /// Get all trades.
    #[must_use]
    pub fn trades(&self) -> &[TradeData] {
        &self.trades
    }

    /// Get the equity curve.
    #[must_use]
    pub fn equity_curve(&self) -> &[EquityPoint] {
        &self.equity_curve
    }

    /// System-wide metrics for trades entered within `period`.
    #[must_use]
    pub fn calculate(&self, period: DateRange) -> PerformanceMetrics {
        let trades: Vec<&TradeData> = self
            .trades
            .iter()
            .filter(|t| period.contains(t.entry_date))
            .collect();

        PerformanceMetrics {
            system_wide: Some(true),
            ..self.summarize(&trades, period)
        }
    }

    /// Metrics for one user's trades entered within `period`.
    #[must_use]
    pub fn calculate_for_user(&self, user_id: &str, period: DateRange) -> PerformanceMetrics {
        let trades = self.user_trades(user_id, period);

        PerformanceMetrics {
            user_id: Some(user_id.to_string()),
            ..self.summarize(&trades, period)
        }
    }

    fn user_trades(&self, user_id: &str, period: DateRange) -> Vec<&TradeData> {
        self.trades
            .iter()
            .filter(|t| t.user_id == user_id && period.contains(t.entry_date))
            .collect()
    }

    fn summarize(&self, trades: &[&TradeData], period: DateRange) -> PerformanceMetrics {
        let closed_returns: Vec<f64> = trades.iter().filter_map(|t| t.return_percent()).collect();
        let winners = closed_returns.iter().filter(|r| **r > 0.0).count() as u64;
        let losers = closed_returns.iter().filter(|r| **r < 0.0).count() as u64;

        let success_rate = if closed_returns.is_empty() {
            0.0
        } else {
            winners as f64 / closed_returns.len() as f64 * PERCENT
        };

        let win_loss_ratio = if losers > 0 {
            winners as f64 / losers as f64
        } else {
            winners as f64
        };

        let holding_periods: Vec<f64> = trades
            .iter()
            .filter(|t| t.is_closed())
            .filter_map(|t| t.exit_date.map(|_| t.holding_days(period.end_date)))
            .collect();

        let equity: Vec<f64> = self
            .equity_curve
            .iter()
            .filter(|p| period.contains(p.timestamp))
            .map(|p| p.equity)
            .collect();

        debug!(
            trades = trades.len(),
            closed = closed_returns.len(),
            equity_points = equity.len(),
            "Summarizing performance"
        );

        PerformanceMetrics {
            user_id: None,
            system_wide: None,
            total_recommendations: trades.len() as u64,
            successful_recommendations: winners,
            success_rate,
            average_return: mean(&closed_returns).unwrap_or(0.0),
            total_return: compound_return(&closed_returns) * PERCENT,
            max_drawdown: max_drawdown(&equity),
            sharpe_ratio: sharpe_ratio(&closed_returns, self.risk_free_rate),
            win_loss_ratio,
            average_holding_period: mean(&holding_periods).unwrap_or(0.0),
            period_start: period.start_date,
            period_end: period.end_date,
            calculated_at: Utc::now(),
        }
    }

    /// Build a user report valued at `current_prices` as of `as_of`.
    ///
    /// Open trades without a quoted price are valued at their entry price.
    #[must_use]
    pub fn report(
        &self,
        user_id: &str,
        period: DateRange,
        current_prices: &HashMap<String, Decimal>,
        as_of: DateTime<Utc>,
    ) -> PerformanceReport {
        let trades = self.user_trades(user_id, period);

        let mut lines = Vec::with_capacity(trades.len());
        let mut cost_basis = Decimal::ZERO;
        let mut market_value = Decimal::ZERO;
        let mut realized = Decimal::ZERO;
        let mut unrealized = Decimal::ZERO;

        for trade in &trades {
            let quote = current_prices.get(&trade.symbol).copied();
            let current_price = match (trade.is_closed(), trade.exit_price) {
                (true, Some(exit)) => exit,
                _ => quote.unwrap_or(trade.entry_price),
            };

            cost_basis += trade.cost_basis();
            market_value += current_price * trade.quantity;
            realized += trade.realized_pnl().unwrap_or(Decimal::ZERO);
            unrealized += trade.unrealized_pnl(quote);

            let end = trade.exit_date.unwrap_or(as_of);
            lines.push(RecommendationPerformance {
                recommendation_id: trade.recommendation_id.clone(),
                symbol: trade.symbol.clone(),
                entry_price: trade.entry_price,
                current_price,
                return_amount: (current_price - trade.entry_price) * trade.quantity,
                return_percent: period_return(to_f64(trade.entry_price), to_f64(current_price)),
                days_held: (end - trade.entry_date).num_days(),
                status: trade.status,
            });
        }

        let total = realized + unrealized;
        let completed = trades.iter().filter(|t| t.is_closed()).count() as u64;
        let successful = trades.iter().filter(|t| t.is_winner()).count() as u64;
        let success_rate = if completed > 0 {
            successful as f64 / completed as f64 * PERCENT
        } else {
            0.0
        };

        let mut ranked = lines;
        ranked.sort_by(|a, b| b.return_percent.total_cmp(&a.return_percent));
        let top_performers: Vec<_> = ranked.iter().take(TOP_PERFORMERS).cloned().collect();
        let worst_performers: Vec<_> = ranked.iter().rev().take(TOP_PERFORMERS).cloned().collect();

        debug!(
            user_id,
            trades = trades.len(),
            completed,
            "Built performance report"
        );

        PerformanceReport {
            user_id: user_id.to_string(),
            report_period: period,
            portfolio_value: PortfolioValue {
                current: market_value,
                previous: cost_basis,
                change: market_value - cost_basis,
                change_percent: percentage_change(to_f64(cost_basis), to_f64(market_value)),
            },
            recommendations: RecommendationCounts {
                total: trades.len() as u64,
                active: trades
                    .iter()
                    .filter(|t| t.status == TradeStatus::Open)
                    .count() as u64,
                completed,
                successful,
                success_rate,
            },
            returns: ReturnBreakdown {
                realized,
                unrealized,
                total,
                total_percent: percentage_change(to_f64(cost_basis), to_f64(cost_basis + total)),
            },
            top_performers,
            worst_performers,
            generated_at: as_of,
        }
    }

    /// Export trades to CSV format.
    #[must_use]
    pub fn to_csv(&self) -> String {
        let mut csv = String::from(
            "recommendation_id,user_id,symbol,status,entry_date,entry_price,exit_date,exit_price,quantity,return_pct\n",
        );

        for trade in &self.trades {
            let _ = writeln!(
                csv,
                "{},{},{},{:?},{},{},{},{},{},{}",
                trade.recommendation_id,
                trade.user_id,
                trade.symbol,
                trade.status,
                trade.entry_date.to_rfc3339(),
                trade.entry_price,
                trade.exit_date.map(|d| d.to_rfc3339()).unwrap_or_default(),
                trade.exit_price.map(|p| p.to_string()).unwrap_or_default(),
                trade.quantity,
                trade
                    .return_percent()
                    .map(|r| format!("{r:.2}"))
                    .unwrap_or_default(),
            );
        }

        csv
    }

    /// Export system-wide metrics for `period` to JSON.
    #[must_use]
    pub fn summary_to_json(&self, period: DateRange) -> String {
        let summary = self.calculate(period);
        serde_json::to_string_pretty(&summary).unwrap_or_default()
    }
}

fn to_f64(value: Decimal) -> f64 {
    value.to_f64().unwrap_or(0.0)
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;
    use rust_decimal_macros::dec;

    use super::*;

    fn day(d: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 1, d, 15, 0, 0).unwrap()
    }

    fn january() -> DateRange {
        DateRange::new(day(1), day(31))
    }

    fn closed(id: &str, user: &str, entry: Decimal, exit: Decimal, held_days: u32) -> TradeData {
        TradeData {
            recommendation_id: id.to_string(),
            user_id: user.to_string(),
            symbol: format!("SYM{id}"),
            entry_price: entry,
            exit_price: Some(exit),
            quantity: dec!(10),
            entry_date: day(2),
            exit_date: Some(day(2 + held_days)),
            realized_gain_loss: None,
            unrealized_gain_loss: None,
            status: TradeStatus::Closed,
        }
    }

    fn open(id: &str, user: &str, symbol: &str, entry: Decimal) -> TradeData {
        TradeData {
            recommendation_id: id.to_string(),
            user_id: user.to_string(),
            symbol: symbol.to_string(),
            entry_price: entry,
            exit_price: None,
            quantity: dec!(10),
            entry_date: day(5),
            exit_date: None,
            realized_gain_loss: None,
            unrealized_gain_loss: None,
            status: TradeStatus::Open,
        }
    }

    #[test]
    fn test_empty_calculator() {
        let calc = PerformanceCalculator::new();
        let metrics = calc.calculate(january());

        assert_eq!(metrics.total_recommendations, 0);
        assert_eq!(metrics.success_rate, 0.0);
        assert_eq!(metrics.total_return, 0.0);
        assert_eq!(metrics.sharpe_ratio, 0.0);
        assert_eq!(metrics.max_drawdown, 0.0);
        assert_eq!(metrics.system_wide, Some(true));
    }

    #[test]
    fn test_success_rate_and_win_loss() {
        let mut calc = PerformanceCalculator::new();
        calc.add_trade(closed("1", "u1", dec!(100), dec!(110), 2));
        calc.add_trade(closed("2", "u1", dec!(100), dec!(120), 4));
        calc.add_trade(closed("3", "u1", dec!(100), dec!(90), 6));
        calc.add_trade(open("4", "u1", "OPEN", dec!(50)));

        let metrics = calc.calculate(january());

        assert_eq!(metrics.total_recommendations, 4);
        assert_eq!(metrics.successful_recommendations, 2);
        assert!((metrics.success_rate - 200.0 / 3.0).abs() < 1e-9);
        assert!((metrics.win_loss_ratio - 2.0).abs() < 1e-9);
        // returns 10, 20, -10
        assert!((metrics.average_return - 20.0 / 3.0).abs() < 1e-9);
        // 1.1 * 1.2 * 0.9 - 1 = 0.188
        assert!((metrics.total_return - 18.8).abs() < 1e-9);
        assert!((metrics.average_holding_period - 4.0).abs() < 1e-9);
    }

    #[test]
    fn test_win_loss_without_losers() {
        let mut calc = PerformanceCalculator::new();
        calc.add_trade(closed("1", "u1", dec!(100), dec!(110), 1));
        calc.add_trade(closed("2", "u1", dec!(100), dec!(105), 1));

        let metrics = calc.calculate(january());
        assert_eq!(metrics.win_loss_ratio, 2.0);
    }

    #[test]
    fn test_sharpe_uses_risk_free_rate() {
        let mut calc = PerformanceCalculator::with_risk_free_rate(0.0);
        calc.add_trade(closed("1", "u1", dec!(100), dec!(101), 1));
        calc.add_trade(closed("2", "u1", dec!(100), dec!(103), 1));

        let metrics = calc.calculate(january());
        // returns 1, 3: mean 2, population std dev 1
        assert!((metrics.sharpe_ratio - 2.0).abs() < 1e-9);
    }

    #[test]
    fn test_drawdown_from_equity_curve() {
        let mut calc = PerformanceCalculator::new();
        calc.add_equity_point(day(2), 100_000.0);
        calc.add_equity_point(day(3), 110_000.0);
        calc.add_equity_point(day(4), 105_000.0);
        calc.add_equity_point(day(5), 95_000.0);
        calc.add_equity_point(day(6), 100_000.0);

        let metrics = calc.calculate(january());
        let expected = (110_000.0 - 95_000.0) / 110_000.0 * 100.0;
        assert!((metrics.max_drawdown - expected).abs() < 1e-9);
    }

    #[test]
    fn test_period_filter() {
        let mut calc = PerformanceCalculator::new();
        calc.add_trade(closed("1", "u1", dec!(100), dec!(110), 1));

        let february = DateRange::new(
            Utc.with_ymd_and_hms(2024, 2, 1, 0, 0, 0).unwrap(),
            Utc.with_ymd_and_hms(2024, 2, 29, 0, 0, 0).unwrap(),
        );
        assert_eq!(calc.calculate(february).total_recommendations, 0);
        assert_eq!(calc.calculate(january()).total_recommendations, 1);
    }

    #[test]
    fn test_calculate_for_user() {
        let mut calc = PerformanceCalculator::new();
        calc.add_trade(closed("1", "u1", dec!(100), dec!(110), 1));
        calc.add_trade(closed("2", "u2", dec!(100), dec!(90), 1));

        let metrics = calc.calculate_for_user("u1", january());
        assert_eq!(metrics.user_id.as_deref(), Some("u1"));
        assert_eq!(metrics.system_wide, None);
        assert_eq!(metrics.total_recommendations, 1);
        assert_eq!(metrics.successful_recommendations, 1);
    }

    #[test]
    fn test_report() {
        let mut calc = PerformanceCalculator::new();
        calc.add_trade(closed("1", "u1", dec!(100), dec!(110), 2));
        calc.add_trade(closed("2", "u1", dec!(100), dec!(95), 2));
        calc.add_trade(open("3", "u1", "MSFT", dec!(50)));
        calc.add_trade(open("4", "u1", "NOQUOTE", dec!(20)));
        calc.add_trade(open("5", "u2", "MSFT", dec!(50)));

        let prices = HashMap::from([("MSFT".to_string(), dec!(60))]);
        let report = calc.report("u1", january(), &prices, day(15));

        assert_eq!(report.recommendations.total, 4);
        assert_eq!(report.recommendations.active, 2);
        assert_eq!(report.recommendations.completed, 2);
        assert_eq!(report.recommendations.successful, 1);
        assert!((report.recommendations.success_rate - 50.0).abs() < 1e-9);

        // cost: 1000 + 1000 + 500 + 200; value: 1100 + 950 + 600 + 200
        assert_eq!(report.portfolio_value.previous, dec!(2700));
        assert_eq!(report.portfolio_value.current, dec!(2850));
        assert_eq!(report.portfolio_value.change, dec!(150));

        assert_eq!(report.returns.realized, dec!(50));
        assert_eq!(report.returns.unrealized, dec!(100));
        assert_eq!(report.returns.total, dec!(150));
        assert!((report.returns.total_percent - 150.0 / 2700.0 * 100.0).abs() < 1e-9);

        assert_eq!(report.top_performers[0].symbol, "MSFT");
        assert_eq!(report.worst_performers[0].recommendation_id, "2");
        assert_eq!(report.top_performers[0].days_held, 10);
    }

    #[test]
    fn test_report_limits_performer_lists() {
        let mut calc = PerformanceCalculator::new();
        for i in 0..8 {
            calc.add_trade(closed(&i.to_string(), "u1", dec!(100), Decimal::from(100 + i), 1));
        }

        let report = calc.report("u1", january(), &HashMap::new(), day(20));
        assert_eq!(report.top_performers.len(), TOP_PERFORMERS);
        assert_eq!(report.worst_performers.len(), TOP_PERFORMERS);
        assert_eq!(report.top_performers[0].recommendation_id, "7");
        assert_eq!(report.worst_performers[0].recommendation_id, "0");
    }

    #[test]
    fn test_csv_export() {
        let mut calc = PerformanceCalculator::new();
        calc.add_trade(closed("1", "u1", dec!(100), dec!(110), 1));
        calc.add_trade(open("2", "u1", "AAPL", dec!(100)));

        let csv = calc.to_csv();
        assert!(csv.starts_with("recommendation_id"));
        assert!(csv.contains("SYM1"));
        assert!(csv.contains("10.00"));
        assert!(csv.contains("AAPL"));
        assert_eq!(csv.lines().count(), 3);
    }

    #[test]
    fn test_summary_json() {
        let mut calc = PerformanceCalculator::new();
        calc.add_trade(closed("1", "u1", dec!(100), dec!(110), 1));

        let json = calc.summary_to_json(january());
        assert!(json.contains("\"totalRecommendations\": 1"));
        assert!(json.contains("\"systemWide\": true"));
    }
}
