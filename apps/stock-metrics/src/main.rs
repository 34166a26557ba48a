//! Stock Metrics Binary
//!
//! Summarizes one price series per invocation.
//!
//! # Usage
//!
//! ```bash
//! echo '{"pathParameters":{"symbol":"AAPL"},"body":{"prices":[100,110,90,120]}}' \
//!     | cargo run --bin stock-metrics -- config.yaml
//! ```
//!
//! Reads a handler event as JSON on stdin and writes the handler response as
//! JSON on stdout. Without an argument `config.yaml` is used when present,
//! built-in defaults otherwise.
//!
//! # Environment Variables
//!
//! - `RUST_LOG`: Log filter (overrides `observability.logging.level`)
//! - Any variable referenced as `${VAR}` in the config file

use std::io::Read;
use std::path::Path;

use anyhow::Context;
use stock_metrics::config::{Config, DEFAULT_CONFIG_PATH, load_config};
use stock_metrics::handler::{HandlerEvent, analyze_series, with_error_handling};
use stock_metrics::telemetry::init_tracing;

fn main() -> anyhow::Result<()> {
    // .env is optional
    let _ = dotenvy::dotenv();

    let config = resolve_config(std::env::args().nth(1).as_deref())?;
    init_tracing(&config.observability.logging)?;

    tracing::debug!(
        risk_free_rate = config.metrics.risk_free_rate,
        decimals = config.metrics.decimals,
        "Configuration loaded"
    );

    let mut input = String::new();
    std::io::stdin()
        .read_to_string(&mut input)
        .context("failed to read event from stdin")?;
    let event: HandlerEvent =
        serde_json::from_str(&input).context("stdin is not a valid handler event")?;

    let response = with_error_handling(&event, |event| analyze_series(event, &config.metrics));
    tracing::info!(status = response.status_code, "Request handled");

    println!("{}", serde_json::to_string(&response)?);
    Ok(())
}

/// Explicit paths must load; the default path is optional.
fn resolve_config(path: Option<&str>) -> anyhow::Result<Config> {
    match path {
        Some(path) => Ok(load_config(Some(path))?),
        None if Path::new(DEFAULT_CONFIG_PATH).exists() => Ok(load_config(None)?),
        None => Ok(Config::default()),
    }
}
