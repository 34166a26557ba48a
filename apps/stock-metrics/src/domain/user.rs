//! User profile shapes.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::enums::{ExperienceLevel, RiskLevel};

/// Overall investment style.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum InvestmentStyle {
    /// Capital preservation first.
    Conservative,
    /// Mix of growth and preservation.
    Balanced,
    /// Growth first.
    Aggressive,
}

/// Which notifications a user receives.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NotificationSettings {
    /// General email alerts.
    pub email_alerts: bool,
    /// Alerts when a price target is hit.
    pub price_target_alerts: bool,
    /// Alerts for new recommendations.
    pub new_recommendations: bool,
    /// Periodic performance reports.
    pub performance_reports: bool,
}

/// Optional recommendation preferences.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserPreferences {
    /// Preferred sectors.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sectors: Option<Vec<String>>,
    /// Sectors to avoid.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub excluded_sectors: Option<Vec<String>>,
    /// Maximum number of open positions.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_positions: Option<u32>,
    /// Minimum confidence score (0-1) for recommendations.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_confidence_score: Option<f64>,
    /// Notification settings.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notification_settings: Option<NotificationSettings>,
    /// Investment style.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub investment_style: Option<InvestmentStyle>,
}

/// A registered user's investing profile.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    /// User identifier (UUID).
    pub user_id: String,
    /// Contact email.
    pub email: String,
    /// Risk tolerance.
    pub risk_tolerance: RiskLevel,
    /// Investment horizon in months.
    pub investment_period: u32,
    /// Amount available to invest.
    pub investment_amount: f64,
    /// Experience level.
    pub experience_level: ExperienceLevel,
    /// Recommendation preferences.
    #[serde(default)]
    pub preferences: UserPreferences,
    /// Creation time.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    /// Last update time.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}
