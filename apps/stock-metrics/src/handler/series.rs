//! `POST /series/{symbol}`: summarize a price series.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use super::{
    HandlerEvent, HandlerResponse, create_response, extract_path_parameter,
    extract_query_parameter, parse_event_body,
};
use crate::config::MetricsConfig;
use crate::domain::ApiResponse;
use crate::error::AppError;
use crate::metrics::SeriesReport;
use crate::validation::{ValidationError, validate_price, validate_stock_symbol};

/// Largest accepted `decimals` query value.
const MAX_DECIMALS: i32 = 10;

/// Body of a series analysis request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SeriesRequest {
    /// Prices, oldest first.
    pub prices: Vec<f64>,
    /// Overrides the configured risk-free rate.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub risk_free_rate: Option<f64>,
}

impl SeriesRequest {
    fn check(&self) -> Result<(), ValidationError> {
        if self.prices.is_empty() {
            return Err(ValidationError::new("prices", "must not be empty"));
        }
        for (i, &price) in self.prices.iter().enumerate() {
            validate_price(price)
                .map_err(|e| ValidationError::new(format!("prices[{i}]"), e.reason))?;
        }
        if let Some(rate) = self.risk_free_rate
            && !(0.0..=1.0).contains(&rate)
        {
            return Err(ValidationError::new(
                "riskFreeRate",
                "must be between 0 and 1",
            ));
        }
        Ok(())
    }
}

fn parse_decimals(raw: Option<&str>, default: i32) -> Result<i32, ValidationError> {
    let Some(raw) = raw else {
        return Ok(default);
    };
    match raw.parse::<i32>() {
        Ok(decimals) if (0..=MAX_DECIMALS).contains(&decimals) => Ok(decimals),
        _ => Err(ValidationError::new(
            "decimals",
            format!("must be an integer between 0 and {MAX_DECIMALS}"),
        )),
    }
}

/// Summarize the price series in the request body.
///
/// The symbol comes from the `symbol` path parameter; an optional `decimals`
/// query parameter overrides the configured rounding.
pub fn analyze_series(
    event: &HandlerEvent,
    config: &MetricsConfig,
) -> anyhow::Result<HandlerResponse> {
    let symbol = extract_path_parameter(event, "symbol")?;
    validate_stock_symbol(symbol).map_err(AppError::from)?;

    let request: SeriesRequest = parse_event_body(event)?;
    request.check().map_err(AppError::from)?;

    let decimals = parse_decimals(extract_query_parameter(event, "decimals", None), config.decimals)
        .map_err(AppError::from)?;
    let risk_free_rate = request.risk_free_rate.unwrap_or(config.risk_free_rate);

    tracing::debug!(
        symbol,
        observations = request.prices.len(),
        risk_free_rate,
        decimals,
        "Analyzing price series"
    );

    let report = SeriesReport::from_prices(symbol, &request.prices, risk_free_rate, decimals);
    Ok(create_response(
        200,
        &ApiResponse::ok(report),
        &HashMap::new(),
    ))
}

#[cfg(test)]
mod tests {
    use serde_json::{Value, json};

    use super::*;

    fn event(symbol: &str, body: Value) -> HandlerEvent {
        HandlerEvent {
            body,
            path_parameters: Some(HashMap::from([("symbol".to_string(), symbol.to_string())])),
            ..HandlerEvent::default()
        }
    }

    fn status_and_body(result: anyhow::Result<HandlerResponse>) -> (u16, Value) {
        let response = result.unwrap_or_else(|e| crate::error::handle_error(&e));
        let Ok(body) = serde_json::from_str(&response.body) else {
            panic!("response body should be JSON");
        };
        (response.status_code, body)
    }

    #[test]
    fn test_analyze_series() {
        let ev = event("AAPL", json!({"prices": [100.0, 110.0, 90.0, 120.0]}));
        let (status, body) = status_and_body(analyze_series(&ev, &MetricsConfig::default()));

        assert_eq!(status, 200);
        assert_eq!(body["success"], true);
        assert_eq!(body["data"]["symbol"], "AAPL");
        assert_eq!(body["data"]["changePercent"], 20.0);
        assert_eq!(body["data"]["maxDrawdown"], 18.18);
    }

    #[test]
    fn test_decimals_query() {
        let mut ev = event("MSFT", json!(r#"{"prices": [3.0, 4.0]}"#));
        ev.query_string_parameters =
            Some(HashMap::from([("decimals".to_string(), "3".to_string())]));
        let (status, body) = status_and_body(analyze_series(&ev, &MetricsConfig::default()));

        assert_eq!(status, 200);
        assert_eq!(body["data"]["changePercent"], 33.333);
    }

    #[test]
    fn test_rejects_bad_input() {
        let config = MetricsConfig::default();
        let cases = [
            event("aapl", json!({"prices": [1.0]})),
            event("AAPL", json!({"prices": []})),
            event("AAPL", json!({"prices": [1.0, -5.0]})),
            event("AAPL", json!({"prices": [1.0], "riskFreeRate": 2.0})),
            event("AAPL", json!({"values": [1.0]})),
            HandlerEvent::default(),
        ];

        for ev in cases {
            let (status, body) = status_and_body(analyze_series(&ev, &config));
            assert_eq!(status, 400, "body: {body}");
            assert_eq!(body["errorCode"], "VALIDATION_ERROR");
        }
    }

    #[test]
    fn test_rejects_bad_decimals() {
        let mut ev = event("AAPL", json!({"prices": [1.0, 2.0]}));
        ev.query_string_parameters =
            Some(HashMap::from([("decimals".to_string(), "many".to_string())]));
        let (status, _) = status_and_body(analyze_series(&ev, &MetricsConfig::default()));
        assert_eq!(status, 400);
    }

    #[test]
    fn test_parse_decimals() {
        assert_eq!(parse_decimals(None, 2), Ok(2));
        assert_eq!(parse_decimals(Some("0"), 2), Ok(0));
        assert!(parse_decimals(Some("11"), 2).is_err());
        assert!(parse_decimals(Some("-1"), 2).is_err());
    }
}
