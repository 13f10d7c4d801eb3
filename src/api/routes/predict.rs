//! Trend prediction endpoint: loads a ward's recent series and runs the
//! rule-based predictor over it.

use axum::{
    extract::{Query, State},
    Json,
};
use chrono::{Duration, Utc};
use serde::Deserialize;
use tracing::warn;

use crate::{
    api::{
        error::{ApiError, ApiResult},
        AppState,
    },
    db::models::{AqiReadingRow, TimeSeriesRow},
    fallback::{mock_history, DEFAULT_CURRENT_AQI},
    trend::{predict_trend, AqiSample, TrendPrediction},
};

use super::{parse_days, valid_ward_id};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrendQuery {
    pub ward_id: Option<String>,
    pub days: Option<String>,
}

/// GET /api/predict/trend?wardId=W001&days=14
///
/// The lookback window is clamped to 7-30 days (default 14). When the ward
/// has fewer than seven stored points the window is filled with a generated
/// series anchored at its current AQI, so a verdict is always produced.
pub async fn trend(
    State(state): State<AppState>,
    Query(query): Query<TrendQuery>,
) -> ApiResult<TrendPrediction> {
    let ward_id = query
        .ward_id
        .as_deref()
        .map(str::trim)
        .filter(|ward| !ward.is_empty())
        .ok_or_else(|| ApiError::BadRequest("wardId query parameter is required".to_string()))?;
    if !valid_ward_id(ward_id) {
        return Err(ApiError::InvalidWardId);
    }
    let days = parse_days(query.days.as_deref(), 14, 7, 30);

    let pool = state.db()?;
    let today = Utc::now().date_naive();
    let since = today - Duration::days(days);

    // A failed series query degrades to generated history, like every other
    // read path; the predictor itself never fails.
    let mut samples: Vec<AqiSample> = match TimeSeriesRow::for_ward(pool, ward_id, since).await {
        Ok(rows) => rows
            .into_iter()
            .map(|row| AqiSample {
                date: row.date,
                aqi: row.aqi as f64,
            })
            .collect(),
        Err(err) => {
            warn!(%err, ward_id, "series query failed; using generated history");
            Vec::new()
        }
    };

    if samples.len() < 7 {
        let current = match AqiReadingRow::latest(pool, ward_id).await {
            Ok(Some(reading)) => reading.aqi as f64,
            _ => DEFAULT_CURRENT_AQI,
        };
        samples = mock_history(current, days as u32, today);
    }

    Ok(Json(predict_trend(ward_id, &samples)))
}
