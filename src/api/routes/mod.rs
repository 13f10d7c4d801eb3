//! HTTP route handlers.

pub mod alerts;
pub mod analytics;
pub mod policy;
pub mod predict;
pub mod wards;
pub mod weather;

use axum::{extract::State, http::StatusCode, Json};
use chrono::Utc;
use once_cell::sync::Lazy;
use regex::Regex;

use crate::{api::types::HealthDto, api::AppState, db};

/// Ward ids are short alphanumeric tokens (e.g. `W001`), max 10 chars.
static WARD_ID: Lazy<Regex> =
    Lazy::new(|| Regex::new("^[a-zA-Z0-9_-]{1,10}$").expect("ward id pattern compiles"));

pub(crate) fn valid_ward_id(raw: &str) -> bool {
    WARD_ID.is_match(raw.trim())
}

/// Parse a `days` query value; missing, unparsable or out-of-range input
/// falls back to the default rather than erroring.
pub(crate) fn parse_days(raw: Option<&str>, default: i64, min: i64, max: i64) -> i64 {
    match raw.and_then(|value| value.trim().parse::<i64>().ok()) {
        Some(days) if (min..=max).contains(&days) => days,
        _ => default,
    }
}

/// Liveness endpoint: 200 with the database connected, 503 when degraded.
/// The server itself stays up either way.
pub async fn health(State(state): State<AppState>) -> (StatusCode, Json<HealthDto>) {
    let connected = match &state.pool {
        Some(pool) => db::ping(pool).await,
        None => false,
    };

    if connected {
        (
            StatusCode::OK,
            Json(HealthDto {
                status: "ok",
                timestamp: Utc::now(),
                database: "connected",
                message: None,
            }),
        )
    } else {
        (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(HealthDto {
                status: "degraded",
                timestamp: Utc::now(),
                database: "disconnected",
                message: Some("Database unavailable. Routes depending on it serve fallback data."),
            }),
        )
    }
}
