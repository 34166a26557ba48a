//! Application errors and their mapping to handler responses.
//!
//! | Code | Status | Usage |
//! |------|--------|-------|
//! | `VALIDATION_ERROR` | 400 | Malformed or out-of-range input |
//! | `UNAUTHORIZED` | 401 | Missing or invalid credentials |
//! | `NOT_FOUND` | 404 | Unknown resource |
//! | `RATE_LIMIT_EXCEEDED` | 429 | Caller exceeded its quota |
//! | `INTERNAL_ERROR` | 500 | Unexpected failure |
//! | `EXTERNAL_API_ERROR` | 502 | Upstream data provider failed |

use std::collections::HashMap;

use chrono::Utc;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::handler::{HandlerResponse, create_response};

/// Error codes surfaced to clients.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// Invalid request input.
    ValidationError,
    /// Resource not found.
    NotFound,
    /// Caller is not authorized.
    Unauthorized,
    /// Rate limit exceeded.
    RateLimitExceeded,
    /// Upstream API failure.
    ExternalApiError,
    /// Internal error.
    InternalError,
}

impl ErrorCode {
    /// HTTP status code for this error.
    #[must_use]
    pub const fn status_code(&self) -> u16 {
        match self {
            Self::ValidationError => 400,
            Self::Unauthorized => 401,
            Self::NotFound => 404,
            Self::RateLimitExceeded => 429,
            Self::InternalError => 500,
            Self::ExternalApiError => 502,
        }
    }

    /// Wire reason string.
    #[must_use]
    pub const fn reason(&self) -> &'static str {
        match self {
            Self::ValidationError => "VALIDATION_ERROR",
            Self::NotFound => "NOT_FOUND",
            Self::Unauthorized => "UNAUTHORIZED",
            Self::RateLimitExceeded => "RATE_LIMIT_EXCEEDED",
            Self::ExternalApiError => "EXTERNAL_API_ERROR",
            Self::InternalError => "INTERNAL_ERROR",
        }
    }
}

impl std::fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.reason())
    }
}

/// An error raised while serving a request.
#[derive(Debug, Error)]
#[error("[{code}] {message}")]
pub struct AppError {
    code: ErrorCode,
    message: String,
    operational: bool,
    context: Vec<(String, String)>,
}

impl AppError {
    /// Create a new operational error.
    #[must_use]
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            operational: true,
            context: Vec::new(),
        }
    }

    /// Add context to the error.
    #[must_use]
    pub fn with_context(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.context.push((key.into(), value.into()));
        self
    }

    /// Mark the error as a programming fault rather than an expected failure.
    #[must_use]
    pub const fn non_operational(mut self) -> Self {
        self.operational = false;
        self
    }

    /// Get the error code.
    #[must_use]
    pub const fn code(&self) -> ErrorCode {
        self.code
    }

    /// HTTP status code.
    #[must_use]
    pub const fn status_code(&self) -> u16 {
        self.code.status_code()
    }

    /// Get the message.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Whether the error is an expected, handled failure.
    #[must_use]
    pub const fn is_operational(&self) -> bool {
        self.operational
    }

    /// Get the context.
    #[must_use]
    pub fn context(&self) -> &[(String, String)] {
        &self.context
    }

    /// Body sent to the client for this error.
    #[must_use]
    pub fn to_body(&self) -> ErrorBody {
        ErrorBody::new(self.message.clone(), self.code)
    }
}

/// Convenience constructors for common errors.
impl AppError {
    /// Invalid input.
    #[must_use]
    pub fn validation(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::ValidationError, message)
    }

    /// Unknown resource.
    #[must_use]
    pub fn not_found(resource: &str) -> Self {
        Self::new(ErrorCode::NotFound, format!("{resource} not found"))
            .with_context("resource", resource)
    }

    /// Missing or invalid credentials.
    #[must_use]
    pub fn unauthorized() -> Self {
        Self::new(ErrorCode::Unauthorized, "Unauthorized")
    }

    /// Caller exceeded its quota.
    #[must_use]
    pub fn rate_limited() -> Self {
        Self::new(ErrorCode::RateLimitExceeded, "Rate limit exceeded")
    }

    /// Upstream API failure.
    #[must_use]
    pub fn external_api(api_name: &str, message: impl std::fmt::Display) -> Self {
        Self::new(
            ErrorCode::ExternalApiError,
            format!("External API error ({api_name}): {message}"),
        )
        .with_context("api", api_name)
    }

    /// Unexpected failure.
    #[must_use]
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InternalError, message)
    }
}

/// JSON body of an error response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorBody {
    /// Always `false`.
    pub success: bool,
    /// Human-readable message.
    pub error: String,
    /// Error code string.
    pub error_code: String,
    /// RFC 3339 timestamp.
    pub timestamp: String,
}

impl ErrorBody {
    fn new(error: String, code: ErrorCode) -> Self {
        Self {
            success: false,
            error,
            error_code: code.reason().to_string(),
            timestamp: Utc::now().to_rfc3339(),
        }
    }
}

/// Convert any handler failure into a client response.
///
/// [`AppError`]s keep their status and message; anything else becomes an
/// opaque 500.
pub fn handle_error(error: &anyhow::Error) -> HandlerResponse {
    if let Some(app_error) = error.downcast_ref::<AppError>() {
        if app_error.is_operational() {
            tracing::warn!(
                code = %app_error.code(),
                context = ?app_error.context(),
                "{}",
                app_error.message()
            );
        } else {
            tracing::error!(code = %app_error.code(), "{}", app_error.message());
        }
        return create_response(
            app_error.status_code(),
            &app_error.to_body(),
            &HashMap::new(),
        );
    }

    tracing::error!(error = %error, "Unhandled error");
    let body = ErrorBody::new(
        "Internal server error".to_string(),
        ErrorCode::InternalError,
    );
    create_response(
        ErrorCode::InternalError.status_code(),
        &body,
        &HashMap::new(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn body_of(response: &HandlerResponse) -> ErrorBody {
        match serde_json::from_str(&response.body) {
            Ok(b) => b,
            Err(e) => panic!("error body should be JSON: {e}"),
        }
    }

    #[test]
    fn test_error_code_status_mapping() {
        assert_eq!(ErrorCode::ValidationError.status_code(), 400);
        assert_eq!(ErrorCode::Unauthorized.status_code(), 401);
        assert_eq!(ErrorCode::NotFound.status_code(), 404);
        assert_eq!(ErrorCode::RateLimitExceeded.status_code(), 429);
        assert_eq!(ErrorCode::InternalError.status_code(), 500);
        assert_eq!(ErrorCode::ExternalApiError.status_code(), 502);
    }

    #[test]
    fn test_constructors() {
        assert_eq!(AppError::not_found("Stock").message(), "Stock not found");
        assert_eq!(
            AppError::external_api("prices", "timeout").message(),
            "External API error (prices): timeout"
        );
        assert_eq!(AppError::unauthorized().message(), "Unauthorized");
        assert_eq!(AppError::rate_limited().code(), ErrorCode::RateLimitExceeded);
    }

    #[test]
    fn test_error_display() {
        let error = AppError::validation("Missing field");
        assert_eq!(error.to_string(), "[VALIDATION_ERROR] Missing field");
    }

    #[test]
    fn test_handle_app_error() {
        let error = anyhow::Error::new(AppError::not_found("Recommendation"));
        let response = handle_error(&error);

        assert_eq!(response.status_code, 404);
        let body = body_of(&response);
        assert!(!body.success);
        assert_eq!(body.error, "Recommendation not found");
        assert_eq!(body.error_code, "NOT_FOUND");
        assert_eq!(
            response.headers.get("Content-Type").map(String::as_str),
            Some("application/json")
        );
    }

    #[test]
    fn test_handle_unknown_error() {
        let error = anyhow::anyhow!("database exploded");
        let response = handle_error(&error);

        assert_eq!(response.status_code, 500);
        let body = body_of(&response);
        assert_eq!(body.error, "Internal server error");
        assert_eq!(body.error_code, "INTERNAL_ERROR");
    }

    #[test]
    fn test_non_operational_keeps_status() {
        let error = anyhow::Error::new(AppError::internal("state corrupted").non_operational());
        let response = handle_error(&error);
        assert_eq!(response.status_code, 500);
        assert_eq!(body_of(&response).error, "state corrupted");
    }
}
