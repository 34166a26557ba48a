//! Calendar helpers for trading-day arithmetic.
//!
//! Only weekends are treated as non-trading days; exchange holidays are not
//! modelled.

use chrono::{DateTime, Datelike, Duration, FixedOffset, Months, Timelike, Utc, Weekday};

use crate::config::MarketHoursConfig;

const MILLIS_PER_DAY: i64 = 86_400_000;

/// Format as an ISO `YYYY-MM-DD` date.
#[must_use]
pub fn format_date(date: DateTime<Utc>) -> String {
    date.format("%Y-%m-%d").to_string()
}

/// Shift by a whole number of days (negative moves backwards).
#[must_use]
pub fn add_days(date: DateTime<Utc>, days: i64) -> DateTime<Utc> {
    date + Duration::days(days)
}

/// Shift by calendar months, clamping to the last day of a shorter month.
///
/// Returns `None` when the result is outside the representable range.
#[must_use]
pub fn add_months(date: DateTime<Utc>, months: i32) -> Option<DateTime<Utc>> {
    let delta = Months::new(months.unsigned_abs());
    if months >= 0 {
        date.checked_add_months(delta)
    } else {
        date.checked_sub_months(delta)
    }
}

/// Absolute distance in days, rounded up to whole days.
#[must_use]
pub fn days_between(a: DateTime<Utc>, b: DateTime<Utc>) -> i64 {
    let millis = (b - a).num_milliseconds().abs();
    (millis + MILLIS_PER_DAY - 1) / MILLIS_PER_DAY
}

/// Check whether the date falls on Saturday or Sunday (UTC).
#[must_use]
pub fn is_weekend(date: DateTime<Utc>) -> bool {
    matches!(date.weekday(), Weekday::Sat | Weekday::Sun)
}

/// Check whether the market is open at `at` under the configured session.
///
/// Weekday and hour are evaluated in the session's UTC offset.
#[must_use]
pub fn is_market_open(at: DateTime<Utc>, hours: &MarketHoursConfig) -> bool {
    let Some(offset) = FixedOffset::east_opt(hours.utc_offset_hours * 3600) else {
        return false;
    };
    let local = at.with_timezone(&offset);
    if matches!(local.weekday(), Weekday::Sat | Weekday::Sun) {
        return false;
    }
    let hour = local.hour();
    hour >= hours.open_hour && hour < hours.close_hour
}

/// The next weekday strictly after `date`.
#[must_use]
pub fn next_market_day(date: DateTime<Utc>) -> DateTime<Utc> {
    let mut next = add_days(date, 1);
    while is_weekend(next) {
        next = add_days(next, 1);
    }
    next
}

/// The last weekday strictly before `date`.
#[must_use]
pub fn previous_market_day(date: DateTime<Utc>) -> DateTime<Utc> {
    let mut prev = add_days(date, -1);
    while is_weekend(prev) {
        prev = add_days(prev, -1);
    }
    prev
}
