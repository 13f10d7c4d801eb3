//! Weather observations backing the dispersion context on the dashboard.

use axum::{
    extract::{Query, State},
    Json,
};
use chrono::{Duration, Utc};
use serde::Deserialize;

use crate::{
    api::{
        error::{ApiError, ApiResult},
        types::{AckDto, WeatherBody, WeatherDto},
        AppState,
    },
    db::models::{timestamp, WeatherRow},
};

use super::valid_ward_id;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeatherQuery {
    pub ward_id: Option<String>,
}

/// Latest weather for a ward, or the citywide hourly average. Defaults are
/// served when nothing is recorded so the dashboard never shows blanks.
pub async fn current(
    State(state): State<AppState>,
    Query(query): Query<WeatherQuery>,
) -> ApiResult<WeatherDto> {
    let ward_id = match query.ward_id.as_deref().map(str::trim) {
        None | Some("") => None,
        Some(ward) if valid_ward_id(ward) => Some(ward),
        Some(_) => return Err(ApiError::InvalidWardId),
    };

    let defaults = state.fallback.weather.clone();
    let pool = match &state.pool {
        Some(pool) => pool,
        None => return Ok(Json(defaults)),
    };

    let dto = match ward_id {
        Some(ward) => match WeatherRow::latest(pool, ward).await? {
            Some(row) => WeatherDto {
                wind_speed: row.wind_speed,
                temperature: row.temperature,
                humidity: row.humidity,
            },
            None => defaults,
        },
        None => {
            let since = timestamp(Utc::now() - Duration::hours(1));
            let avg = WeatherRow::citywide_since(pool, &since).await?;
            WeatherDto {
                wind_speed: avg.wind_speed.unwrap_or(defaults.wind_speed),
                temperature: avg.temperature.unwrap_or(defaults.temperature),
                humidity: avg.humidity.unwrap_or(defaults.humidity),
            }
        }
    };
    Ok(Json(dto))
}

pub async fn record(
    State(state): State<AppState>,
    Json(body): Json<WeatherBody>,
) -> ApiResult<AckDto> {
    if !valid_ward_id(&body.ward_id) {
        return Err(ApiError::InvalidWardId);
    }
    if !(body.wind_speed.is_finite() && body.temperature.is_finite() && body.humidity.is_finite()) {
        return Err(ApiError::BadRequest(
            "Missing required fields: wardId, windSpeed, temperature, humidity".to_string(),
        ));
    }

    let pool = state.db()?;
    WeatherRow::insert(
        pool,
        body.ward_id.trim(),
        body.wind_speed,
        body.temperature,
        body.humidity,
        &timestamp(Utc::now()),
    )
    .await?;
    Ok(Json(AckDto {
        success: true,
        message: "Weather data updated",
    }))
}
