//! Cross-sectional ranking of price series by risk-adjusted return.

use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::config::MetricsConfig;
use crate::metrics::{SeriesReport, normalize_score, round_to_decimals};

/// One symbol's prices, oldest first.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceSeriesInput {
    /// Ticker symbol.
    pub symbol: String,
    /// Prices, oldest first.
    pub prices: Vec<f64>,
}

impl PriceSeriesInput {
    /// Create a new input.
    #[must_use]
    pub fn new(symbol: impl Into<String>, prices: Vec<f64>) -> Self {
        Self {
            symbol: symbol.into(),
            prices,
        }
    }
}

/// A series with its position in the ranking.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RankedSeries {
    /// 1-based rank.
    pub rank: usize,
    /// Sharpe ratio normalized against the batch, in `[0, 1]`.
    pub score: f64,
    /// Underlying statistics.
    pub report: SeriesReport,
}

/// Rank series by Sharpe ratio, best first.
///
/// Scores are the Sharpe ratio scaled to the batch's min/max; a batch where
/// every Sharpe ratio is equal scores all zero. Ties are broken by symbol.
#[must_use]
pub fn rank_series(inputs: &[PriceSeriesInput], config: &MetricsConfig) -> Vec<RankedSeries> {
    if inputs.is_empty() {
        return Vec::new();
    }

    let summarize = |input: &PriceSeriesInput| {
        SeriesReport::from_prices(
            &input.symbol,
            &input.prices,
            config.risk_free_rate,
            config.decimals,
        )
    };

    let reports: Vec<SeriesReport> = if inputs.len() >= config.min_parallel_series {
        debug!(series = inputs.len(), threads = rayon::current_num_threads(), "Ranking in parallel");
        inputs.par_iter().map(summarize).collect()
    } else {
        inputs.iter().map(summarize).collect()
    };

    let (min, max) = reports
        .iter()
        .map(|r| r.sharpe_ratio)
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), s| {
            (lo.min(s), hi.max(s))
        });

    let mut scored: Vec<(f64, SeriesReport)> = reports
        .into_iter()
        .map(|report| {
            let score = normalize_score(report.sharpe_ratio, min, max);
            (round_to_decimals(score, config.decimals), report)
        })
        .collect();

    scored.sort_by(|(a_score, a), (b_score, b)| {
        b_score
            .total_cmp(a_score)
            .then_with(|| a.symbol.cmp(&b.symbol))
    });

    info!(series = scored.len(), "Ranked price series");

    scored
        .into_iter()
        .enumerate()
        .map(|(i, (score, report))| RankedSeries {
            rank: i + 1,
            score,
            report,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn inputs() -> Vec<PriceSeriesInput> {
        vec![
            PriceSeriesInput::new("FLAT", vec![100.0, 100.0, 100.0]),
            PriceSeriesInput::new("UP", vec![100.0, 102.0, 105.0, 107.0]),
            PriceSeriesInput::new("DOWN", vec![100.0, 95.0, 92.0, 85.0]),
        ]
    }

    #[test]
    fn test_rank_order() {
        let ranked = rank_series(&inputs(), &MetricsConfig::default());
        let symbols: Vec<&str> = ranked.iter().map(|r| r.report.symbol.as_str()).collect();

        assert_eq!(symbols, ["UP", "FLAT", "DOWN"]);
        assert_eq!(ranked[0].rank, 1);
        assert_eq!(ranked[0].score, 1.0);
        assert_eq!(ranked[2].score, 0.0);
    }

    #[test]
    fn test_parallel_matches_sequential() {
        let sequential = rank_series(&inputs(), &MetricsConfig::default());
        let parallel_config = MetricsConfig {
            min_parallel_series: 1,
            ..MetricsConfig::default()
        };
        let parallel = rank_series(&inputs(), &parallel_config);

        assert_eq!(sequential, parallel);
    }

    #[test]
    fn test_equal_scores_sorted_by_symbol() {
        let batch = vec![
            PriceSeriesInput::new("ZZZ", vec![10.0]),
            PriceSeriesInput::new("AAA", vec![10.0]),
        ];
        let ranked = rank_series(&batch, &MetricsConfig::default());

        assert_eq!(ranked[0].report.symbol, "AAA");
        assert_eq!(ranked[1].report.symbol, "ZZZ");
        assert!(ranked.iter().all(|r| r.score == 0.0));
    }

    #[test]
    fn test_empty_batch() {
        assert!(rank_series(&[], &MetricsConfig::default()).is_empty());
    }
}
