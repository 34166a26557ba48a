//! Recommendation shapes.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::enums::{RecommendationStatus, RecommendationType, RiskLevel};
use crate::metrics::period_return;

/// Request for a new batch of recommendations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecommendationRequest {
    /// Requesting user (UUID).
    pub user_id: String,
    /// Upper bound on returned recommendations.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_recommendations: Option<u32>,
    /// Sectors to include.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sectors: Option<Vec<String>>,
    /// Sectors to exclude.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exclude_sectors: Option<Vec<String>>,
    /// Minimum confidence score (0-1).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_confidence_score: Option<f64>,
    /// Acceptable risk levels.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub risk_levels: Option<Vec<RiskLevel>>,
}

/// A recommendation issued to a user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StockRecommendation {
    /// Recommendation identifier.
    pub id: String,
    /// Owning user.
    pub user_id: String,
    /// Ticker symbol.
    pub symbol: String,
    /// Company display name.
    pub company_name: String,
    /// Suggested action.
    pub recommendation_type: RecommendationType,
    /// Suggested entry price.
    pub entry_price: f64,
    /// Target exit price.
    pub target_price: f64,
    /// Protective stop price.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stop_loss_price: Option<f64>,
    /// Confidence score (0-1).
    pub confidence_score: f64,
    /// Risk classification.
    pub risk_level: RiskLevel,
    /// Free-text rationale.
    pub investment_rationale: String,
    /// Lifecycle status.
    pub status: RecommendationStatus,
    /// Price the user actually entered at.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub actual_entry_price: Option<f64>,
    /// Price the user actually exited at.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub actual_exit_price: Option<f64>,
    /// Creation time.
    pub created_at: DateTime<Utc>,
    /// Last update time.
    pub updated_at: DateTime<Utc>,
    /// Expiry time.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expires_at: Option<DateTime<Utc>>,
}

impl StockRecommendation {
    /// Percent upside from the suggested entry to the target.
    #[must_use]
    pub fn upside_percent(&self) -> f64 {
        period_return(self.entry_price, self.target_price)
    }

    /// Percent downside from the suggested entry to the stop, if one is set.
    #[must_use]
    pub fn stop_loss_percent(&self) -> Option<f64> {
        self.stop_loss_price
            .map(|stop| period_return(self.entry_price, stop))
    }

    /// Realized percent return, once both actual prices are known.
    #[must_use]
    pub fn realized_return(&self) -> Option<f64> {
        match (self.actual_entry_price, self.actual_exit_price) {
            (Some(entry), Some(exit)) => Some(period_return(entry, exit)),
            _ => None,
        }
    }

    /// Check whether the recommendation has expired at `now`.
    #[must_use]
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        self.expires_at.is_some_and(|at| at <= now)
    }
}
