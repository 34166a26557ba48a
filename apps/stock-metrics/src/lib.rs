// Allow unwrap/expect in tests - tests should panic on unexpected errors
// Allow test-specific patterns and pedantic lints in test code
#![cfg_attr(
    test,
    allow(
        clippy::unwrap_used,
        clippy::expect_used,
        clippy::float_cmp,
        clippy::too_many_lines,
        clippy::needless_pass_by_value,
        clippy::default_trait_access,
        clippy::items_after_statements
    )
)]

//! Stock Metrics - Rust Core Library
//!
//! Performance statistics and shared request plumbing for the stock
//! recommendation service.
//!
//! # Modules
//!
//! - `metrics`: Return, drawdown, volatility and Sharpe ratio calculations,
//!   plus trade aggregation into summaries and reports
//! - `ranking`: Cross-sectional ranking of price series
//! - `domain`: Wire types shared with the service's clients
//! - `dates`: Calendar and market-session helpers
//! - `validation`: Input rules for symbols, prices, profiles and requests
//! - `error`: Error codes and their mapping to responses
//! - `handler`: Request/response marshalling and the series handler
//! - `config`: YAML configuration with environment interpolation
//! - `telemetry`: Tracing subscriber setup

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::pedantic)]

pub mod config;
pub mod dates;
pub mod domain;
pub mod error;
pub mod handler;
pub mod metrics;
pub mod ranking;
pub mod telemetry;
pub mod validation;

pub use config::{Config, ConfigError, load_config};
pub use error::{AppError, ErrorCode, handle_error};
pub use handler::{HandlerEvent, HandlerResponse, analyze_series, with_error_handling};
pub use metrics::{
    PerformanceCalculator, SeriesReport, clamp, compound_return, max_drawdown, normalize_score,
    percentage_change, period_return, round_to_decimals, sharpe_ratio, volatility,
};
pub use ranking::{PriceSeriesInput, RankedSeries, rank_series};
