//! Input validation for requests and profiles.
//!
//! Each rule returns the first violation as a [`ValidationError`] naming the
//! offending field. The `is_valid_*` wrappers collapse that to a boolean.

use std::sync::OnceLock;

use regex::Regex;
use serde::de::DeserializeOwned;
use thiserror::Error;
use uuid::Uuid;

use crate::domain::{RecommendationRequest, UserPreferences, UserProfile};
use crate::error::AppError;

/// Smallest accepted price.
pub const MIN_PRICE: f64 = 0.01;
/// Largest accepted price.
pub const MAX_PRICE: f64 = 100_000.0;
/// Longest accepted ticker symbol.
pub const MAX_SYMBOL_LEN: usize = 10;
/// Smallest accepted investment amount.
pub const MIN_INVESTMENT_AMOUNT: f64 = 100.0;

/// A single failed validation rule.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{field}: {reason}")]
pub struct ValidationError {
    /// Offending field.
    pub field: String,
    /// Why it was rejected.
    pub reason: String,
}

impl ValidationError {
    /// Create a new validation error.
    #[must_use]
    pub fn new(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            reason: reason.into(),
        }
    }
}

impl From<ValidationError> for AppError {
    fn from(err: ValidationError) -> Self {
        Self::validation(format!("Validation failed: {err}")).with_context("field", err.field)
    }
}

/// Types that can check their own field constraints.
pub trait Validate {
    /// Check all field constraints.
    fn validate(&self) -> Result<(), ValidationError>;
}

#[allow(clippy::expect_used)] // constant pattern
fn symbol_regex() -> &'static Regex {
    static SYMBOL_REGEX: OnceLock<Regex> = OnceLock::new();
    SYMBOL_REGEX.get_or_init(|| Regex::new(r"^[A-Z]+$").expect("symbol regex is valid"))
}

#[allow(clippy::expect_used)] // constant pattern
fn email_regex() -> &'static Regex {
    static EMAIL_REGEX: OnceLock<Regex> = OnceLock::new();
    EMAIL_REGEX
        .get_or_init(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email regex is valid"))
}

fn check_range(field: &str, value: f64, min: f64, max: f64) -> Result<(), ValidationError> {
    if (min..=max).contains(&value) {
        Ok(())
    } else {
        Err(ValidationError::new(
            field,
            format!("must be between {min} and {max}"),
        ))
    }
}

fn check_uuid(field: &str, value: &str) -> Result<(), ValidationError> {
    // Only the canonical hyphenated form is accepted.
    if value.len() == 36 && Uuid::parse_str(value).is_ok() {
        Ok(())
    } else {
        Err(ValidationError::new(field, "must be a UUID"))
    }
}

/// Ticker symbol: 1-10 uppercase ASCII letters.
pub fn validate_stock_symbol(symbol: &str) -> Result<(), ValidationError> {
    if symbol.len() > MAX_SYMBOL_LEN {
        return Err(ValidationError::new(
            "symbol",
            format!("must be at most {MAX_SYMBOL_LEN} characters"),
        ));
    }
    if !symbol_regex().is_match(symbol) {
        return Err(ValidationError::new(
            "symbol",
            "Stock symbol must contain only uppercase letters",
        ));
    }
    Ok(())
}

/// Price between [`MIN_PRICE`] and [`MAX_PRICE`]. NaN is rejected.
pub fn validate_price(price: f64) -> Result<(), ValidationError> {
    check_range("price", price, MIN_PRICE, MAX_PRICE)
}

/// Check a user profile.
pub fn validate_user_profile(profile: &UserProfile) -> Result<(), ValidationError> {
    profile.validate()
}

/// Check a recommendation request.
pub fn validate_recommendation_request(
    request: &RecommendationRequest,
) -> Result<(), ValidationError> {
    request.validate()
}

/// Boolean form of [`validate_stock_symbol`].
#[must_use]
pub fn is_valid_stock_symbol(symbol: &str) -> bool {
    validate_stock_symbol(symbol).is_ok()
}

/// Boolean form of [`validate_price`].
#[must_use]
pub fn is_valid_price(price: f64) -> bool {
    validate_price(price).is_ok()
}

/// Check whether arbitrary JSON is a well-formed, valid user profile.
#[must_use]
pub fn is_valid_user_profile(value: &serde_json::Value) -> bool {
    validate::<UserProfile>(value).is_ok()
}

/// Deserialize `data` into `T` and check its constraints.
pub fn validate<T>(data: &serde_json::Value) -> Result<T, AppError>
where
    T: DeserializeOwned + Validate,
{
    let parsed: T = serde_json::from_value(data.clone())
        .map_err(|e| AppError::validation(format!("Validation failed: {e}")))?;
    parsed.validate()?;
    Ok(parsed)
}

impl Validate for UserPreferences {
    fn validate(&self) -> Result<(), ValidationError> {
        if let Some(max_positions) = self.max_positions
            && !(1..=50).contains(&max_positions)
        {
            return Err(ValidationError::new(
                "preferences.maxPositions",
                "must be between 1 and 50",
            ));
        }
        if let Some(score) = self.min_confidence_score {
            check_range("preferences.minConfidenceScore", score, 0.0, 1.0)?;
        }
        Ok(())
    }
}

impl Validate for UserProfile {
    fn validate(&self) -> Result<(), ValidationError> {
        check_uuid("userId", &self.user_id)?;
        if !email_regex().is_match(&self.email) {
            return Err(ValidationError::new("email", "must be an email address"));
        }
        if !(1..=120).contains(&self.investment_period) {
            return Err(ValidationError::new(
                "investmentPeriod",
                "must be between 1 and 120 months",
            ));
        }
        check_range(
            "investmentAmount",
            self.investment_amount,
            MIN_INVESTMENT_AMOUNT,
            f64::MAX,
        )?;
        self.preferences.validate()
    }
}

impl Validate for RecommendationRequest {
    fn validate(&self) -> Result<(), ValidationError> {
        check_uuid("userId", &self.user_id)?;
        if let Some(max) = self.max_recommendations
            && !(1..=20).contains(&max)
        {
            return Err(ValidationError::new(
                "maxRecommendations",
                "must be between 1 and 20",
            ));
        }
        if let Some(score) = self.min_confidence_score {
            check_range("minConfidenceScore", score, 0.0, 1.0)?;
        }
        Ok(())
    }
}
