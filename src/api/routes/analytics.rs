//! Time-series and aggregate analytics.

use axum::{
    extract::{Query, State},
    Json,
};
use chrono::{Duration, Utc};
use serde::Deserialize;

use crate::{
    api::{
        error::{ApiError, ApiResult},
        types::{DailyTrendDto, SourcesDto, TimeSeriesPointDto},
        AppState,
    },
    db::models::{timestamp, DailyTrendRow, SourceRow, TimeSeriesRow},
};

use super::{parse_days, valid_ward_id};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SeriesQuery {
    pub ward_id: Option<String>,
    pub days: Option<String>,
}

/// Daily series for one ward, or citywide daily averages.
pub async fn timeseries(
    State(state): State<AppState>,
    Query(query): Query<SeriesQuery>,
) -> ApiResult<Vec<TimeSeriesPointDto>> {
    let ward_id = normalize_ward(query.ward_id.as_deref())?;
    let days = parse_days(query.days.as_deref(), 7, 1, 365);

    let pool = match &state.pool {
        Some(pool) => pool,
        None => return Ok(Json(Vec::new())),
    };

    let since = Utc::now().date_naive() - Duration::days(days);
    let rows = match ward_id {
        Some(ward) => TimeSeriesRow::for_ward(pool, ward, since).await?,
        None => TimeSeriesRow::citywide(pool, since).await?,
    };
    Ok(Json(
        rows.into_iter()
            .map(|row| TimeSeriesPointDto {
                date: row.date,
                aqi: row.aqi,
                pm25: row.pm25,
                pm10: row.pm10,
            })
            .collect(),
    ))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrendsQuery {
    pub ward_id: Option<String>,
    pub period: Option<String>,
}

/// Daily avg/max/min of raw readings over a named period.
pub async fn trends(
    State(state): State<AppState>,
    Query(query): Query<TrendsQuery>,
) -> ApiResult<Vec<DailyTrendDto>> {
    let ward_id = normalize_ward(query.ward_id.as_deref())?;
    let days = match query.period.as_deref() {
        Some("30d") => 30,
        Some("90d") => 90,
        _ => 7,
    };

    let pool = match &state.pool {
        Some(pool) => pool,
        None => return Ok(Json(Vec::new())),
    };

    let since = timestamp(Utc::now() - Duration::days(days));
    let rows = DailyTrendRow::since(pool, ward_id, &since).await?;
    Ok(Json(
        rows.into_iter()
            .map(|row| DailyTrendDto {
                date: row.date,
                avg_aqi: row.avg_aqi,
                max_aqi: row.max_aqi,
                min_aqi: row.min_aqi,
            })
            .collect(),
    ))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SourcesQuery {
    pub ward_id: Option<String>,
}

/// Source attribution averaged over the last 7 days; zeros when empty.
pub async fn sources(
    State(state): State<AppState>,
    Query(query): Query<SourcesQuery>,
) -> ApiResult<SourcesDto> {
    let ward_id = normalize_ward(query.ward_id.as_deref())?;

    let zeros = SourcesDto {
        vehicular: 0.0,
        construction: 0.0,
        industrial: 0.0,
        waste_burning: 0.0,
    };
    let pool = match &state.pool {
        Some(pool) => pool,
        None => return Ok(Json(zeros)),
    };

    let since = timestamp(Utc::now() - Duration::days(7));
    let avg = SourceRow::summary(pool, ward_id, &since).await?;
    Ok(Json(SourcesDto {
        vehicular: avg.vehicular.unwrap_or(0.0),
        construction: avg.construction.unwrap_or(0.0),
        industrial: avg.industrial.unwrap_or(0.0),
        waste_burning: avg.waste_burning.unwrap_or(0.0),
    }))
}

/// An empty or absent ward filter means citywide; a present but malformed
/// one is a client error.
fn normalize_ward(raw: Option<&str>) -> Result<Option<&str>, ApiError> {
    match raw.map(str::trim) {
        None | Some("") => Ok(None),
        Some(ward) if valid_ward_id(ward) => Ok(Some(ward)),
        Some(_) => Err(ApiError::InvalidWardId),
    }
}
