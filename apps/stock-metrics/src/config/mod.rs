//! Configuration loading and validation.
//!
//! # Usage
//!
//! ```rust,ignore
//! use stock_metrics::config::load_config;
//!
//! // Load from default path (config.yaml)
//! let config = load_config(None)?;
//!
//! println!("risk-free rate: {}", config.metrics.risk_free_rate);
//! ```
//!
//! Values may reference environment variables as `${VAR}` or
//! `${VAR:-default}`.

mod market_hours;
mod metrics;
mod observability;

use std::sync::OnceLock;

use regex::Regex;
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub use market_hours::MarketHoursConfig;
pub use metrics::MetricsConfig;
pub use observability::{LoggingConfig, ObservabilityConfig};

/// Default configuration file path.
pub const DEFAULT_CONFIG_PATH: &str = "config.yaml";

const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];
const LOG_FORMATS: [&str; 2] = ["json", "pretty"];

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to read configuration file.
    #[error("Failed to read config file '{path}': {source}")]
    ReadError {
        /// Path to the config file.
        path: String,
        /// The underlying IO error.
        source: std::io::Error,
    },

    /// Failed to parse YAML configuration.
    #[error("Failed to parse config YAML: {0}")]
    ParseError(#[from] serde_yaml_bw::Error),

    /// Configuration validation failed.
    #[error("Config validation failed: {0}")]
    ValidationError(String),
}

/// Root configuration structure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Metric calculation settings.
    #[serde(default)]
    pub metrics: MetricsConfig,
    /// Trading session settings.
    #[serde(default)]
    pub market_hours: MarketHoursConfig,
    /// Observability configuration.
    #[serde(default)]
    pub observability: ObservabilityConfig,
}

/// Load configuration from a YAML file with environment variable interpolation.
///
/// `path` defaults to [`DEFAULT_CONFIG_PATH`].
pub fn load_config(path: Option<&str>) -> Result<Config, ConfigError> {
    let path = path.unwrap_or(DEFAULT_CONFIG_PATH);

    let contents = std::fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
        path: path.to_string(),
        source: e,
    })?;

    load_config_from_string(&contents)
}

/// Load configuration from a YAML string.
pub fn load_config_from_string(yaml: &str) -> Result<Config, ConfigError> {
    let interpolated = interpolate_env_vars(yaml);
    let config: Config = serde_yaml_bw::from_str(&interpolated)?;
    validate_config(&config)?;
    Ok(config)
}

#[allow(clippy::expect_used)] // constant pattern
fn env_var_regex() -> &'static Regex {
    static ENV_VAR_REGEX: OnceLock<Regex> = OnceLock::new();
    ENV_VAR_REGEX.get_or_init(|| {
        Regex::new(r"\$\{([A-Za-z_][A-Za-z0-9_]*)(?::-([^}]*))?\}").expect("env var regex is valid")
    })
}

/// Replace `${VAR}` and `${VAR:-default}` with environment values.
///
/// Unset or empty variables take the default, or the empty string without one.
fn interpolate_env_vars(input: &str) -> String {
    env_var_regex()
        .replace_all(input, |caps: &regex::Captures<'_>| {
            let default_value = caps.get(2).map_or("", |m| m.as_str());
            match std::env::var(&caps[1]) {
                Ok(value) if !value.is_empty() => value,
                _ => default_value.to_string(),
            }
        })
        .into_owned()
}

fn validate_config(config: &Config) -> Result<(), ConfigError> {
    let metrics = &config.metrics;
    if !(0.0..=1.0).contains(&metrics.risk_free_rate) {
        return Err(ConfigError::ValidationError(
            "metrics.risk_free_rate must be between 0.0 and 1.0".to_string(),
        ));
    }

    if !(0..=10).contains(&metrics.decimals) {
        return Err(ConfigError::ValidationError(
            "metrics.decimals must be between 0 and 10".to_string(),
        ));
    }

    let hours = &config.market_hours;
    if hours.open_hour >= hours.close_hour || hours.close_hour > 24 {
        return Err(ConfigError::ValidationError(
            "market_hours requires open_hour < close_hour <= 24".to_string(),
        ));
    }

    if !(-12..=14).contains(&hours.utc_offset_hours) {
        return Err(ConfigError::ValidationError(
            "market_hours.utc_offset_hours must be between -12 and 14".to_string(),
        ));
    }

    let logging = &config.observability.logging;
    if !LOG_LEVELS.contains(&logging.level.to_lowercase().as_str()) {
        return Err(ConfigError::ValidationError(format!(
            "observability.logging.level must be one of: {LOG_LEVELS:?}"
        )));
    }

    if !LOG_FORMATS.contains(&logging.format.as_str()) {
        return Err(ConfigError::ValidationError(format!(
            "observability.logging.format must be one of: {LOG_FORMATS:?}"
        )));
    }

    Ok(())
}
