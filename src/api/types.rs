//! Shared DTOs for JSON requests and responses.
//!
//! Field names serialize in the camelCase shape the dashboard frontend
//! consumes (`wardId`, `wasteBurning`, `hours24`, ...).

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PollutantsDto {
    pub pm25: f64,
    pub pm10: f64,
    pub no2: f64,
    pub so2: f64,
    pub co: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SourcesDto {
    pub vehicular: f64,
    pub construction: f64,
    pub industrial: f64,
    pub waste_burning: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ForecastDto {
    pub hours24: i64,
    pub hours48: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CoordinatesDto {
    pub path: String,
    pub center_x: f64,
    pub center_y: f64,
}

/// A ward summary: static geometry joined with its latest measurements.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WardDto {
    pub id: String,
    pub name: String,
    pub aqi: i64,
    pub category: String,
    pub pollutants: PollutantsDto,
    pub sources: SourcesDto,
    pub forecast: ForecastDto,
    pub coordinates: CoordinatesDto,
    pub alerts: Vec<String>,
    pub priority: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimeSeriesPointDto {
    pub date: NaiveDate,
    pub aqi: i64,
    pub pm25: i64,
    pub pm10: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyTrendDto {
    pub date: NaiveDate,
    pub avg_aqi: i64,
    pub max_aqi: i64,
    pub min_aqi: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeatherDto {
    pub wind_speed: f64,
    pub temperature: f64,
    pub humidity: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AlertDto {
    pub id: String,
    pub ward_id: String,
    /// Present on listings; omitted on the create response.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ward_name: Option<String>,
    pub message: String,
    pub priority: i64,
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub resolved_at: Option<DateTime<Utc>>,
    pub current_aqi: Option<i64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PolicyActionDto {
    pub id: String,
    pub ward_id: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub title: String,
    pub description: String,
    pub priority: String,
    pub estimated_impact: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct HealthDto {
    pub status: &'static str,
    pub timestamp: DateTime<Utc>,
    pub database: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<&'static str>,
}

#[derive(Debug, Clone, Serialize)]
pub struct AckDto {
    pub success: bool,
    pub message: &'static str,
}

// Request bodies.

#[derive(Debug, Clone, Deserialize)]
pub struct AqiReadingBody {
    pub aqi: f64,
    pub category: String,
    pub pm25: f64,
    pub pm10: f64,
    #[serde(default)]
    pub no2: f64,
    #[serde(default)]
    pub so2: f64,
    #[serde(default)]
    pub co: f64,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateAlertBody {
    pub ward_id: String,
    pub message: String,
    pub priority: Option<i64>,
    #[serde(rename = "type")]
    pub kind: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeatherBody {
    pub ward_id: String,
    pub wind_speed: f64,
    pub temperature: f64,
    pub humidity: f64,
}
