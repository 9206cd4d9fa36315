//! Request and response shapes for the backend API.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize)]
pub struct RegisterRequest {
    pub username: String,
    pub email: String,
    pub password: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct TokenResponse {
    pub(crate) access_token: String,
    pub(crate) token_type: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NotificationPreferences {
    #[serde(default = "yes")]
    pub email: bool,
    #[serde(default = "yes")]
    pub push: bool,
    #[serde(default)]
    pub sms: bool,
}

fn yes() -> bool {
    true
}

/// Per-user alert limits, one per headline pollutant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AirQualityThresholds {
    #[serde(default = "default_threshold")]
    pub pm25: f64,
    #[serde(default = "default_threshold")]
    pub pm10: f64,
    #[serde(default = "default_threshold")]
    pub o3: f64,
    #[serde(default = "default_threshold")]
    pub no2: f64,
}

fn default_threshold() -> f64 {
    100.0
}

/// Public profile returned by `/api/users/me`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    pub id: i64,
    pub username: String,
    pub email: String,
    pub age: Option<u32>,
    pub location: Option<String>,
    pub account_type: Option<String>,
    pub health_conditions: Option<String>,
    pub is_smoker: Option<bool>,
    pub has_allergies: Option<bool>,
    pub respiratory_issues: Option<bool>,
    pub heart_conditions: Option<bool>,
    pub notification_preferences: Option<NotificationPreferences>,
    pub air_quality_thresholds: Option<AirQualityThresholds>,
    pub profile_picture: Option<String>,
}

/// Partial profile update for `PUT /api/users/me`. Unset fields are left
/// out of the body so the backend keeps their current values.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub age: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub account_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub health_conditions: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_smoker: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub has_allergies: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub respiratory_issues: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub heart_conditions: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notification_preferences: Option<NotificationPreferences>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub air_quality_thresholds: Option<AirQualityThresholds>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub profile_picture: Option<String>,
}

/// One day of recorded pollutant levels.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoricalPoint {
    pub date: String,
    pub pm25: f64,
    pub no2: f64,
    pub o3: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrendsResponse {
    pub location_name: String,
    #[serde(default)]
    pub weekly_trends: Vec<HistoricalPoint>,
    #[serde(default)]
    pub monthly_trends: Vec<HistoricalPoint>,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct ChatQuery {
    pub question: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub zip_code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub health_issue: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub activity: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ChatResponse {
    pub answer: String,
    pub active_zip: String,
}
