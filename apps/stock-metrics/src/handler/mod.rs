//! Request/response marshalling at the handler boundary.
//!
//! Handlers receive a [`HandlerEvent`] (a JSON-encoded HTTP request as
//! delivered by an API gateway) and return a [`HandlerResponse`] whose body
//! is a JSON string.

mod series;

use std::collections::HashMap;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::info_span;

use crate::error::{AppError, handle_error};

pub use series::{SeriesRequest, analyze_series};

/// Headers attached to every response.
pub const DEFAULT_HEADERS: [(&str, &str); 4] = [
    ("Content-Type", "application/json"),
    ("Access-Control-Allow-Origin", "*"),
    ("Access-Control-Allow-Headers", "Content-Type,Authorization"),
    ("Access-Control-Allow-Methods", "GET,POST,PUT,DELETE,OPTIONS"),
];

/// Caller identity as reported by the gateway.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Identity {
    /// Client IP address.
    #[serde(default)]
    pub source_ip: String,
    /// Client user agent.
    #[serde(default)]
    pub user_agent: String,
}

/// Gateway request metadata.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RequestContext {
    /// Gateway request id.
    #[serde(default)]
    pub request_id: String,
    /// Deployment stage.
    #[serde(default)]
    pub stage: String,
    /// Owning account.
    #[serde(default)]
    pub account_id: String,
    /// Caller identity.
    #[serde(default)]
    pub identity: Identity,
}

/// An incoming request.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HandlerEvent {
    /// Request body: either a JSON-encoded string or an already-decoded value.
    #[serde(default)]
    pub body: serde_json::Value,
    /// Request headers.
    #[serde(default)]
    pub headers: HashMap<String, String>,
    /// Gateway metadata.
    #[serde(default)]
    pub request_context: RequestContext,
    /// Path parameters.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path_parameters: Option<HashMap<String, String>>,
    /// Query string parameters.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub query_string_parameters: Option<HashMap<String, String>>,
}

/// An outgoing response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HandlerResponse {
    /// HTTP status code.
    pub status_code: u16,
    /// Response headers.
    pub headers: HashMap<String, String>,
    /// JSON-encoded body.
    pub body: String,
}

/// Build a JSON response with the default headers.
///
/// Entries in `extra_headers` override defaults of the same name.
pub fn create_response<T: Serialize>(
    status_code: u16,
    data: &T,
    extra_headers: &HashMap<String, String>,
) -> HandlerResponse {
    let mut headers: HashMap<String, String> = DEFAULT_HEADERS
        .iter()
        .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
        .collect();
    headers.extend(extra_headers.iter().map(|(k, v)| (k.clone(), v.clone())));

    let body = serde_json::to_string(data).unwrap_or_else(|e| {
        tracing::error!(error = %e, "Failed to serialize response body");
        "null".to_string()
    });

    HandlerResponse {
        status_code,
        headers,
        body,
    }
}

/// Decode the request body into `T`.
///
/// String bodies are parsed as JSON text; any other value is decoded as-is.
pub fn parse_event_body<T: DeserializeOwned>(event: &HandlerEvent) -> Result<T, AppError> {
    let parsed = match &event.body {
        serde_json::Value::String(raw) => serde_json::from_str(raw),
        value => serde_json::from_value(value.clone()),
    };
    parsed.map_err(|e| {
        AppError::validation("Invalid JSON in request body").with_context("cause", e.to_string())
    })
}

/// Fetch a required path parameter.
pub fn extract_path_parameter<'a>(
    event: &'a HandlerEvent,
    name: &str,
) -> Result<&'a str, AppError> {
    event
        .path_parameters
        .as_ref()
        .and_then(|params| params.get(name))
        .map(String::as_str)
        .filter(|value| !value.is_empty())
        .ok_or_else(|| {
            AppError::validation(format!("Missing required path parameter: {name}"))
        })
}

/// Fetch an optional query parameter, falling back to `default` when absent or empty.
#[must_use]
pub fn extract_query_parameter<'a>(
    event: &'a HandlerEvent,
    name: &str,
    default: Option<&'a str>,
) -> Option<&'a str> {
    event
        .query_string_parameters
        .as_ref()
        .and_then(|params| params.get(name))
        .map(String::as_str)
        .filter(|value| !value.is_empty())
        .or(default)
}

/// Run `handler`, converting any error into an error response.
pub fn with_error_handling<F>(event: &HandlerEvent, handler: F) -> HandlerResponse
where
    F: FnOnce(&HandlerEvent) -> anyhow::Result<HandlerResponse>,
{
    let span = info_span!(
        "handler",
        request_id = %event.request_context.request_id,
        stage = %event.request_context.stage
    );
    let _guard = span.enter();

    handler(event).unwrap_or_else(|e| handle_error(&e))
}
