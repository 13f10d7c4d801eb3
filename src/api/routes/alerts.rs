//! Active alert listing and lifecycle.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use chrono::Utc;
use serde::Deserialize;

use crate::{
    api::{
        error::{ApiError, ApiResult},
        types::{AlertDto, CreateAlertBody},
        AppState,
    },
    db::models::{timestamp, ActiveAlertRow, AlertRow},
};

use super::valid_ward_id;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListQuery {
    pub ward_id: Option<String>,
    pub priority: Option<String>,
}

pub async fn list(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> ApiResult<Vec<AlertDto>> {
    let ward_id = match query.ward_id.as_deref().map(str::trim) {
        None | Some("") => None,
        Some(ward) if valid_ward_id(ward) => Some(ward),
        Some(_) => return Err(ApiError::InvalidWardId),
    };
    // An unparsable priority filter is ignored rather than rejected.
    let priority = query
        .priority
        .as_deref()
        .and_then(|value| value.trim().parse::<i64>().ok());

    let pool = match &state.pool {
        Some(pool) => pool,
        None => return Ok(Json(Vec::new())),
    };

    let rows = AlertRow::active(pool, ward_id, priority).await?;
    Ok(Json(rows.into_iter().map(AlertDto::from).collect()))
}

pub async fn create(
    State(state): State<AppState>,
    Json(body): Json<CreateAlertBody>,
) -> Result<(StatusCode, Json<AlertDto>), ApiError> {
    if body.ward_id.trim().is_empty() || body.message.trim().is_empty() {
        return Err(ApiError::BadRequest(
            "wardId and message are required".to_string(),
        ));
    }
    if !valid_ward_id(&body.ward_id) {
        return Err(ApiError::InvalidWardId);
    }

    let pool = state.db()?;
    let row = AlertRow::create(
        pool,
        body.ward_id.trim(),
        body.message.trim(),
        body.priority.unwrap_or(5),
        body.kind.as_deref(),
        &timestamp(Utc::now()),
    )
    .await?;
    Ok((StatusCode::CREATED, Json(AlertDto::from(row))))
}

pub async fn resolve(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<AlertDto> {
    let pool = state.db()?;
    let row = AlertRow::resolve(pool, id.trim(), &timestamp(Utc::now()))
        .await?
        .ok_or(ApiError::NotFound("Alert"))?;
    Ok(Json(AlertDto::from(row)))
}

impl From<ActiveAlertRow> for AlertDto {
    fn from(row: ActiveAlertRow) -> Self {
        AlertDto {
            id: row.id,
            ward_id: row.ward_id,
            ward_name: Some(row.ward_name),
            message: row.message,
            priority: row.priority,
            kind: row.kind,
            is_active: row.is_active,
            created_at: row.created_at,
            resolved_at: row.resolved_at,
            current_aqi: row.current_aqi,
        }
    }
}

impl From<AlertRow> for AlertDto {
    fn from(row: AlertRow) -> Self {
        AlertDto {
            id: row.id,
            ward_id: row.ward_id,
            ward_name: None,
            message: row.message,
            priority: row.priority,
            kind: row.kind,
            is_active: row.is_active,
            created_at: row.created_at,
            resolved_at: row.resolved_at,
            current_aqi: None,
        }
    }
}
