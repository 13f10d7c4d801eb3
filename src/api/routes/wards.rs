//! Ward summaries and AQI reading ingestion.

use axum::{
    extract::{Path, State},
    Json,
};
use chrono::Utc;
use sqlx::SqlitePool;

use crate::{
    api::{
        error::{ApiError, ApiResult},
        types::{
            AckDto, AqiReadingBody, CoordinatesDto, ForecastDto, PollutantsDto, SourcesDto,
            WardDto,
        },
        AppState,
    },
    db::models::{timestamp, AlertRow, AqiReadingRow, ForecastRow, SourceRow, WardRow},
};

use super::valid_ward_id;

/// All wards with their latest measurements. With the database down the
/// fallback set is served so the dashboard always has a map to draw.
pub async fn list(State(state): State<AppState>) -> ApiResult<Vec<WardDto>> {
    let pool = match &state.pool {
        Some(pool) => pool,
        None => return Ok(Json(state.fallback.wards.clone())),
    };

    let mut wards = Vec::new();
    for ward in WardRow::all(pool).await? {
        wards.push(assemble(pool, ward).await?);
    }
    Ok(Json(wards))
}

pub async fn get_one(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<WardDto> {
    if !valid_ward_id(&id) {
        return Err(ApiError::InvalidWardId);
    }
    let pool = state.db()?;
    let ward = WardRow::find(pool, id.trim())
        .await?
        .ok_or(ApiError::NotFound("Ward"))?;
    Ok(Json(assemble(pool, ward).await?))
}

/// Append a reading for a ward.
pub async fn record_aqi(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(body): Json<AqiReadingBody>,
) -> ApiResult<AckDto> {
    if !valid_ward_id(&id) {
        return Err(ApiError::InvalidWardId);
    }
    if !body.aqi.is_finite() || body.aqi < 0.0 || body.category.trim().is_empty() {
        return Err(ApiError::BadRequest(
            "Missing required fields: aqi, category, pm25, pm10".to_string(),
        ));
    }
    let pool = state.db()?;
    AqiReadingRow::insert(
        pool,
        id.trim(),
        body.aqi,
        body.category.trim(),
        [body.pm25, body.pm10, body.no2, body.so2, body.co],
        &timestamp(Utc::now()),
    )
    .await?;
    Ok(Json(AckDto {
        success: true,
        message: "AQI data updated",
    }))
}

/// Join a ward row with its latest reading, sources, forecast and alerts.
/// Missing measurements fall back to neutral defaults rather than erroring.
async fn assemble(pool: &SqlitePool, ward: WardRow) -> Result<WardDto, ApiError> {
    let reading = AqiReadingRow::latest(pool, &ward.id).await?;
    let sources = SourceRow::latest(pool, &ward.id).await?;
    let forecast = ForecastRow::latest(pool, &ward.id).await?;
    let alerts = AlertRow::active(pool, Some(&ward.id), None)
        .await?
        .into_iter()
        .map(|alert| alert.message)
        .collect();

    let (aqi, category, pollutants) = match reading {
        Some(r) => (
            r.aqi,
            r.category,
            PollutantsDto {
                pm25: r.pm25,
                pm10: r.pm10,
                no2: r.no2,
                so2: r.so2,
                co: r.co,
            },
        ),
        None => (
            0,
            "Moderate".to_string(),
            PollutantsDto {
                pm25: 0.0,
                pm10: 0.0,
                no2: 0.0,
                so2: 0.0,
                co: 0.0,
            },
        ),
    };

    Ok(WardDto {
        priority: derive_priority(&ward.id),
        id: ward.id,
        name: ward.name,
        aqi,
        category,
        pollutants,
        sources: sources
            .map(|s| SourcesDto {
                vehicular: s.vehicular,
                construction: s.construction,
                industrial: s.industrial,
                waste_burning: s.waste_burning,
            })
            .unwrap_or(SourcesDto {
                vehicular: 0.0,
                construction: 0.0,
                industrial: 0.0,
                waste_burning: 0.0,
            }),
        forecast: forecast
            .map(|f| ForecastDto {
                hours24: f.hours_24,
                hours48: f.hours_48,
            })
            .unwrap_or(ForecastDto {
                hours24: 0,
                hours48: 0,
            }),
        coordinates: CoordinatesDto {
            path: ward.coordinates_path,
            center_x: ward.center_x,
            center_y: ward.center_y,
        },
        alerts,
    })
}

/// Ranking priority derived from the numeric part of the ward id
/// (`W007` -> 7); ids without one rank last at 10.
fn derive_priority(id: &str) -> i64 {
    let digits = id.trim().trim_start_matches(['W', 'w']);
    digits.parse().unwrap_or(10)
}
