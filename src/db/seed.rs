//! Demo data loader: the eight pilot wards with readings, sources,
//! forecasts, alerts, weather and a short time-series history.

use anyhow::Result;
use chrono::{Duration, Utc};
use rand::Rng;
use sqlx::SqlitePool;
use tracing::info;

use crate::db::models::{
    timestamp, AlertRow, AqiReadingRow, ForecastRow, SourceRow, TimeSeriesRow, WardRow,
    WeatherRow,
};
use crate::fallback::seed_wards;

/// Load seed data. Previous measurement rows are cleared first, so re-running
/// refreshes the demo set instead of duplicating it.
pub async fn run(pool: &SqlitePool, history_days: u32) -> Result<()> {
    for table in [
        "alerts",
        "policy_actions",
        "forecasts",
        "pollution_sources",
        "aqi_readings",
        "time_series",
        "weather_readings",
    ] {
        sqlx::query(&format!("DELETE FROM {table}")).execute(pool).await?;
    }

    let now = timestamp(Utc::now());
    let today = Utc::now().date_naive();
    let mut rng = rand::thread_rng();

    for ward in seed_wards() {
        WardRow::upsert(
            pool,
            ward.id,
            ward.name,
            ward.coordinates_path,
            ward.center_x,
            ward.center_y,
        )
        .await?;

        AqiReadingRow::insert(
            pool,
            ward.id,
            ward.aqi as f64,
            ward.category,
            ward.pollutants,
            &now,
        )
        .await?;

        SourceRow::insert(pool, ward.id, ward.sources, &now).await?;
        ForecastRow::insert(pool, ward.id, ward.forecast[0], ward.forecast[1], today).await?;

        for message in ward.alerts {
            AlertRow::create(pool, ward.id, message, ward.priority, None, &now).await?;
        }

        // History: daily points around the current AQI, oldest first.
        let days = history_days.max(1);
        for i in 0..days {
            let date = today - Duration::days((days - 1 - i) as i64);
            let aqi = (ward.aqi as f64 + rng.gen_range(-20.0..20.0)).round().max(0.0) as i64;
            let pm25 = (ward.pollutants[0] + rng.gen_range(-15.0..15.0)).round().max(0.0) as i64;
            let pm10 = (ward.pollutants[1] + rng.gen_range(-20.0..20.0)).round().max(0.0) as i64;
            TimeSeriesRow::upsert(pool, ward.id, date, aqi, pm25, pm10).await?;
        }

        WeatherRow::insert(pool, ward.id, 8.5, 28.0, 65.0, &now).await?;
    }

    info!(wards = seed_wards().len(), history_days, "seeded demo data");
    Ok(())
}
