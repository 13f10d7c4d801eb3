//! Policy action listing and generation.

use axum::{
    extract::{Path, State},
    Json,
};
use chrono::Utc;

use crate::{
    api::{
        error::{ApiError, ApiResult},
        types::PolicyActionDto,
        AppState,
    },
    db::models::{timestamp, AqiReadingRow, PolicyActionRow, SourceRow, WardRow},
    policy::{recommend_actions, SourceShares},
};

use super::valid_ward_id;

pub async fn list(
    State(state): State<AppState>,
    Path(ward_id): Path<String>,
) -> ApiResult<Vec<PolicyActionDto>> {
    if !valid_ward_id(&ward_id) {
        return Err(ApiError::InvalidWardId);
    }
    let pool = state.db()?;
    let rows = PolicyActionRow::active_for_ward(pool, ward_id.trim()).await?;
    Ok(Json(rows.into_iter().map(PolicyActionDto::from).collect()))
}

/// Re-derive the action list from the ward's current conditions, replacing
/// whatever was active before.
pub async fn generate(
    State(state): State<AppState>,
    Path(ward_id): Path<String>,
) -> ApiResult<Vec<PolicyActionDto>> {
    if !valid_ward_id(&ward_id) {
        return Err(ApiError::InvalidWardId);
    }
    let pool = state.db()?;
    let ward = WardRow::find(pool, ward_id.trim())
        .await?
        .ok_or(ApiError::NotFound("Ward"))?;

    let (aqi, category) = match AqiReadingRow::latest(pool, &ward.id).await? {
        Some(reading) => (reading.aqi as f64, reading.category),
        None => (0.0, "Moderate".to_string()),
    };
    let shares = SourceRow::latest(pool, &ward.id)
        .await?
        .map(|s| SourceShares {
            vehicular: s.vehicular,
            construction: s.construction,
            industrial: s.industrial,
            waste_burning: s.waste_burning,
        })
        .unwrap_or_default();

    let actions = recommend_actions(aqi, &category, shares);

    PolicyActionRow::deactivate_for_ward(pool, &ward.id).await?;
    let now = timestamp(Utc::now());
    let mut inserted = Vec::with_capacity(actions.len());
    for action in actions {
        let row = PolicyActionRow::insert(
            pool,
            &ward.id,
            &action.kind,
            &action.title,
            &action.description,
            action.priority.as_str(),
            &action.estimated_impact,
            &now,
        )
        .await?;
        inserted.push(PolicyActionDto::from(row));
    }
    Ok(Json(inserted))
}

impl From<PolicyActionRow> for PolicyActionDto {
    fn from(row: PolicyActionRow) -> Self {
        PolicyActionDto {
            id: row.id,
            ward_id: row.ward_id,
            kind: row.kind,
            title: row.title,
            description: row.description,
            priority: row.priority,
            estimated_impact: row.estimated_impact,
        }
    }
}
