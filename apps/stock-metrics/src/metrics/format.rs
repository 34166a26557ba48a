//! Formatting utilities for performance metrics display.

use rust_decimal::Decimal;

/// Format a value that is already in percent units.
#[must_use]
pub fn format_pct(value: f64) -> String {
    format!("{value:.2}%")
}

/// Format a ratio with 2 decimal places.
#[must_use]
pub fn format_ratio(value: f64) -> String {
    format!("{value:.2}")
}

/// Format a monetary decimal with 2 decimal places.
#[must_use]
pub fn format_decimal(value: Decimal) -> String {
    format!("{:.2}", value.round_dp(2))
}
