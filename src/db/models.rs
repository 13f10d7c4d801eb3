//! Row types and the queries backing the API routes.
//!
//! Queries are runtime-checked (`query_as` + `FromRow`) so the crate builds
//! without a live database. Timestamps are stored as RFC3339 TEXT written by
//! [`timestamp`], which keeps ordering lexicographic and `DATE()` usable.

use chrono::{DateTime, NaiveDate, SecondsFormat, Utc};
use sqlx::{FromRow, SqlitePool};
use uuid::Uuid;

/// Canonical storage format for timestamps: RFC3339, UTC, whole seconds.
pub fn timestamp(at: DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Secs, true)
}

#[derive(Debug, Clone, FromRow)]
pub struct WardRow {
    pub id: String,
    pub name: String,
    pub coordinates_path: String,
    pub center_x: f64,
    pub center_y: f64,
}

impl WardRow {
    pub async fn all(pool: &SqlitePool) -> Result<Vec<Self>, sqlx::Error> {
        sqlx::query_as::<_, Self>(
            "SELECT id, name, coordinates_path, center_x, center_y FROM wards ORDER BY id",
        )
        .fetch_all(pool)
        .await
    }

    pub async fn find(pool: &SqlitePool, id: &str) -> Result<Option<Self>, sqlx::Error> {
        sqlx::query_as::<_, Self>(
            "SELECT id, name, coordinates_path, center_x, center_y FROM wards WHERE id = ?",
        )
        .bind(id)
        .fetch_optional(pool)
        .await
    }

    pub async fn upsert(
        pool: &SqlitePool,
        id: &str,
        name: &str,
        coordinates_path: &str,
        center_x: f64,
        center_y: f64,
    ) -> Result<(), sqlx::Error> {
        sqlx::query(
            "INSERT INTO wards (id, name, coordinates_path, center_x, center_y)
             VALUES (?, ?, ?, ?, ?)
             ON CONFLICT(id) DO UPDATE SET
                 name = excluded.name,
                 coordinates_path = excluded.coordinates_path,
                 center_x = excluded.center_x,
                 center_y = excluded.center_y",
        )
        .bind(id)
        .bind(name)
        .bind(coordinates_path)
        .bind(center_x)
        .bind(center_y)
        .execute(pool)
        .await?;
        Ok(())
    }
}

#[derive(Debug, Clone, FromRow)]
pub struct AqiReadingRow {
    pub aqi: i64,
    pub category: String,
    pub pm25: f64,
    pub pm10: f64,
    pub no2: f64,
    pub so2: f64,
    pub co: f64,
}

impl AqiReadingRow {
    /// Latest reading for a ward, if it has any.
    pub async fn latest(pool: &SqlitePool, ward_id: &str) -> Result<Option<Self>, sqlx::Error> {
        sqlx::query_as::<_, Self>(
            "SELECT aqi, category, pm25, pm10, no2, so2, co
             FROM aqi_readings
             WHERE ward_id = ?
             ORDER BY recorded_at DESC, id DESC
             LIMIT 1",
        )
        .bind(ward_id)
        .fetch_optional(pool)
        .await
    }

    pub async fn insert(
        pool: &SqlitePool,
        ward_id: &str,
        aqi: f64,
        category: &str,
        pollutants: [f64; 5],
        recorded_at: &str,
    ) -> Result<(), sqlx::Error> {
        sqlx::query(
            "INSERT INTO aqi_readings (ward_id, aqi, category, pm25, pm10, no2, so2, co, recorded_at)
             VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(ward_id)
        .bind(aqi.round() as i64)
        .bind(category)
        .bind(pollutants[0])
        .bind(pollutants[1])
        .bind(pollutants[2])
        .bind(pollutants[3])
        .bind(pollutants[4])
        .bind(recorded_at)
        .execute(pool)
        .await?;
        Ok(())
    }
}

#[derive(Debug, Clone, FromRow)]
pub struct SourceRow {
    pub vehicular: f64,
    pub construction: f64,
    pub industrial: f64,
    pub waste_burning: f64,
}

impl SourceRow {
    pub async fn latest(pool: &SqlitePool, ward_id: &str) -> Result<Option<Self>, sqlx::Error> {
        sqlx::query_as::<_, Self>(
            "SELECT vehicular, construction, industrial, waste_burning
             FROM pollution_sources
             WHERE ward_id = ?
             ORDER BY recorded_at DESC, id DESC
             LIMIT 1",
        )
        .bind(ward_id)
        .fetch_optional(pool)
        .await
    }

    pub async fn insert(
        pool: &SqlitePool,
        ward_id: &str,
        shares: [f64; 4],
        recorded_at: &str,
    ) -> Result<(), sqlx::Error> {
        sqlx::query(
            "INSERT INTO pollution_sources (ward_id, vehicular, construction, industrial, waste_burning, recorded_at)
             VALUES (?, ?, ?, ?, ?, ?)",
        )
        .bind(ward_id)
        .bind(shares[0])
        .bind(shares[1])
        .bind(shares[2])
        .bind(shares[3])
        .bind(recorded_at)
        .execute(pool)
        .await?;
        Ok(())
    }

    /// Average shares over a window; NULLs when the window is empty.
    pub async fn summary(
        pool: &SqlitePool,
        ward_id: Option<&str>,
        since: &str,
    ) -> Result<SourceAvgRow, sqlx::Error> {
        let row = match ward_id {
            Some(ward) => {
                sqlx::query_as::<_, SourceAvgRow>(
                    "SELECT AVG(vehicular) AS vehicular,
                            AVG(construction) AS construction,
                            AVG(industrial) AS industrial,
                            AVG(waste_burning) AS waste_burning
                     FROM pollution_sources
                     WHERE ward_id = ? AND recorded_at >= ?",
                )
                .bind(ward)
                .bind(since)
                .fetch_one(pool)
                .await?
            }
            None => {
                sqlx::query_as::<_, SourceAvgRow>(
                    "SELECT AVG(vehicular) AS vehicular,
                            AVG(construction) AS construction,
                            AVG(industrial) AS industrial,
                            AVG(waste_burning) AS waste_burning
                     FROM pollution_sources
                     WHERE recorded_at >= ?",
                )
                .bind(since)
                .fetch_one(pool)
                .await?
            }
        };
        Ok(row)
    }
}

#[derive(Debug, Clone, FromRow)]
pub struct SourceAvgRow {
    pub vehicular: Option<f64>,
    pub construction: Option<f64>,
    pub industrial: Option<f64>,
    pub waste_burning: Option<f64>,
}

#[derive(Debug, Clone, FromRow)]
pub struct ForecastRow {
    pub hours_24: i64,
    pub hours_48: i64,
}

impl ForecastRow {
    pub async fn latest(pool: &SqlitePool, ward_id: &str) -> Result<Option<Self>, sqlx::Error> {
        sqlx::query_as::<_, Self>(
            "SELECT hours_24, hours_48
             FROM forecasts
             WHERE ward_id = ?
             ORDER BY forecast_date DESC, id DESC
             LIMIT 1",
        )
        .bind(ward_id)
        .fetch_optional(pool)
        .await
    }

    pub async fn insert(
        pool: &SqlitePool,
        ward_id: &str,
        hours_24: i64,
        hours_48: i64,
        forecast_date: NaiveDate,
    ) -> Result<(), sqlx::Error> {
        sqlx::query(
            "INSERT INTO forecasts (ward_id, hours_24, hours_48, forecast_date) VALUES (?, ?, ?, ?)",
        )
        .bind(ward_id)
        .bind(hours_24)
        .bind(hours_48)
        .bind(forecast_date)
        .execute(pool)
        .await?;
        Ok(())
    }
}

#[derive(Debug, Clone, FromRow)]
pub struct TimeSeriesRow {
    pub date: NaiveDate,
    pub aqi: i64,
    pub pm25: i64,
    pub pm10: i64,
}

impl TimeSeriesRow {
    /// Daily points for one ward since a cutoff date, oldest first.
    pub async fn for_ward(
        pool: &SqlitePool,
        ward_id: &str,
        since: NaiveDate,
    ) -> Result<Vec<Self>, sqlx::Error> {
        sqlx::query_as::<_, Self>(
            "SELECT date, aqi, pm25, pm10
             FROM time_series
             WHERE ward_id = ? AND date >= ?
             ORDER BY date ASC",
        )
        .bind(ward_id)
        .bind(since)
        .fetch_all(pool)
        .await
    }

    /// Citywide daily averages since a cutoff date.
    pub async fn citywide(pool: &SqlitePool, since: NaiveDate) -> Result<Vec<Self>, sqlx::Error> {
        sqlx::query_as::<_, Self>(
            "SELECT date,
                    CAST(AVG(aqi) AS INTEGER) AS aqi,
                    CAST(AVG(pm25) AS INTEGER) AS pm25,
                    CAST(AVG(pm10) AS INTEGER) AS pm10
             FROM time_series
             WHERE date >= ?
             GROUP BY date
             ORDER BY date ASC",
        )
        .bind(since)
        .fetch_all(pool)
        .await
    }

    pub async fn upsert(
        pool: &SqlitePool,
        ward_id: &str,
        date: NaiveDate,
        aqi: i64,
        pm25: i64,
        pm10: i64,
    ) -> Result<(), sqlx::Error> {
        sqlx::query(
            "INSERT INTO time_series (ward_id, date, aqi, pm25, pm10)
             VALUES (?, ?, ?, ?, ?)
             ON CONFLICT(ward_id, date) DO UPDATE SET
                 aqi = excluded.aqi, pm25 = excluded.pm25, pm10 = excluded.pm10",
        )
        .bind(ward_id)
        .bind(date)
        .bind(aqi)
        .bind(pm25)
        .bind(pm10)
        .execute(pool)
        .await?;
        Ok(())
    }
}

#[derive(Debug, Clone, FromRow)]
pub struct DailyTrendRow {
    pub date: NaiveDate,
    pub avg_aqi: i64,
    pub max_aqi: i64,
    pub min_aqi: i64,
}

impl DailyTrendRow {
    /// Daily aggregates of raw readings, per ward or citywide.
    pub async fn since(
        pool: &SqlitePool,
        ward_id: Option<&str>,
        since: &str,
    ) -> Result<Vec<Self>, sqlx::Error> {
        match ward_id {
            Some(ward) => {
                sqlx::query_as::<_, Self>(
                    "SELECT DATE(recorded_at) AS date,
                            CAST(AVG(aqi) AS INTEGER) AS avg_aqi,
                            MAX(aqi) AS max_aqi,
                            MIN(aqi) AS min_aqi
                     FROM aqi_readings
                     WHERE ward_id = ? AND recorded_at >= ?
                     GROUP BY DATE(recorded_at)
                     ORDER BY date ASC",
                )
                .bind(ward)
                .bind(since)
                .fetch_all(pool)
                .await
            }
            None => {
                sqlx::query_as::<_, Self>(
                    "SELECT DATE(recorded_at) AS date,
                            CAST(AVG(aqi) AS INTEGER) AS avg_aqi,
                            MAX(aqi) AS max_aqi,
                            MIN(aqi) AS min_aqi
                     FROM aqi_readings
                     WHERE recorded_at >= ?
                     GROUP BY DATE(recorded_at)
                     ORDER BY date ASC",
                )
                .bind(since)
                .fetch_all(pool)
                .await
            }
        }
    }
}

#[derive(Debug, Clone, FromRow)]
pub struct WeatherRow {
    pub wind_speed: f64,
    pub temperature: f64,
    pub humidity: f64,
}

#[derive(Debug, Clone, FromRow)]
pub struct WeatherAvgRow {
    pub wind_speed: Option<f64>,
    pub temperature: Option<f64>,
    pub humidity: Option<f64>,
}

impl WeatherRow {
    pub async fn latest(pool: &SqlitePool, ward_id: &str) -> Result<Option<Self>, sqlx::Error> {
        sqlx::query_as::<_, Self>(
            "SELECT wind_speed, temperature, humidity
             FROM weather_readings
             WHERE ward_id = ?
             ORDER BY recorded_at DESC, id DESC
             LIMIT 1",
        )
        .bind(ward_id)
        .fetch_optional(pool)
        .await
    }

    /// Citywide average over a recent window; NULLs when empty.
    pub async fn citywide_since(
        pool: &SqlitePool,
        since: &str,
    ) -> Result<WeatherAvgRow, sqlx::Error> {
        sqlx::query_as::<_, WeatherAvgRow>(
            "SELECT AVG(wind_speed) AS wind_speed,
                    AVG(temperature) AS temperature,
                    AVG(humidity) AS humidity
             FROM weather_readings
             WHERE recorded_at >= ?",
        )
        .bind(since)
        .fetch_one(pool)
        .await
    }

    pub async fn insert(
        pool: &SqlitePool,
        ward_id: &str,
        wind_speed: f64,
        temperature: f64,
        humidity: f64,
        recorded_at: &str,
    ) -> Result<(), sqlx::Error> {
        sqlx::query(
            "INSERT INTO weather_readings (ward_id, wind_speed, temperature, humidity, recorded_at)
             VALUES (?, ?, ?, ?, ?)",
        )
        .bind(ward_id)
        .bind(wind_speed)
        .bind(temperature)
        .bind(humidity)
        .bind(recorded_at)
        .execute(pool)
        .await?;
        Ok(())
    }
}

#[derive(Debug, Clone, FromRow)]
pub struct AlertRow {
    pub id: String,
    pub ward_id: String,
    pub message: String,
    pub priority: i64,
    #[sqlx(rename = "type")]
    pub kind: Option<String>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub resolved_at: Option<DateTime<Utc>>,
}

/// An active alert joined with its ward name and current AQI.
#[derive(Debug, Clone, FromRow)]
pub struct ActiveAlertRow {
    pub id: String,
    pub ward_id: String,
    pub ward_name: String,
    pub message: String,
    pub priority: i64,
    #[sqlx(rename = "type")]
    pub kind: Option<String>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub resolved_at: Option<DateTime<Utc>>,
    pub current_aqi: Option<i64>,
}

impl AlertRow {
    pub async fn active(
        pool: &SqlitePool,
        ward_id: Option<&str>,
        priority: Option<i64>,
    ) -> Result<Vec<ActiveAlertRow>, sqlx::Error> {
        let mut sql = String::from(
            "SELECT a.id, a.ward_id, w.name AS ward_name, a.message, a.priority, a.type,
                    a.is_active, a.created_at, a.resolved_at,
                    (SELECT aqi FROM aqi_readings
                     WHERE ward_id = a.ward_id
                     ORDER BY recorded_at DESC, id DESC LIMIT 1) AS current_aqi
             FROM alerts a
             JOIN wards w ON a.ward_id = w.id
             WHERE a.is_active = 1",
        );
        if ward_id.is_some() {
            sql.push_str(" AND a.ward_id = ?");
        }
        if priority.is_some() {
            sql.push_str(" AND a.priority = ?");
        }
        sql.push_str(" ORDER BY a.priority ASC, a.created_at DESC");

        let mut query = sqlx::query_as::<_, ActiveAlertRow>(&sql);
        if let Some(ward) = ward_id {
            query = query.bind(ward);
        }
        if let Some(priority) = priority {
            query = query.bind(priority);
        }
        query.fetch_all(pool).await
    }

    pub async fn create(
        pool: &SqlitePool,
        ward_id: &str,
        message: &str,
        priority: i64,
        kind: Option<&str>,
        created_at: &str,
    ) -> Result<Self, sqlx::Error> {
        let id = Uuid::new_v4().to_string();
        sqlx::query_as::<_, Self>(
            "INSERT INTO alerts (id, ward_id, message, priority, type, is_active, created_at)
             VALUES (?, ?, ?, ?, ?, 1, ?)
             RETURNING id, ward_id, message, priority, type, is_active, created_at, resolved_at",
        )
        .bind(id)
        .bind(ward_id)
        .bind(message)
        .bind(priority)
        .bind(kind)
        .bind(created_at)
        .fetch_one(pool)
        .await
    }

    /// Mark an alert resolved; `None` when the id is unknown.
    pub async fn resolve(
        pool: &SqlitePool,
        id: &str,
        resolved_at: &str,
    ) -> Result<Option<Self>, sqlx::Error> {
        sqlx::query_as::<_, Self>(
            "UPDATE alerts
             SET is_active = 0, resolved_at = ?
             WHERE id = ?
             RETURNING id, ward_id, message, priority, type, is_active, created_at, resolved_at",
        )
        .bind(resolved_at)
        .bind(id)
        .fetch_optional(pool)
        .await
    }
}

#[derive(Debug, Clone, FromRow)]
pub struct PolicyActionRow {
    pub id: String,
    pub ward_id: String,
    #[sqlx(rename = "type")]
    pub kind: String,
    pub title: String,
    pub description: String,
    pub priority: String,
    pub estimated_impact: String,
}

impl PolicyActionRow {
    /// Active actions for a ward, highest priority first.
    pub async fn active_for_ward(
        pool: &SqlitePool,
        ward_id: &str,
    ) -> Result<Vec<Self>, sqlx::Error> {
        sqlx::query_as::<_, Self>(
            "SELECT id, ward_id, type, title, description, priority, estimated_impact
             FROM policy_actions
             WHERE ward_id = ? AND is_active = 1
             ORDER BY CASE priority
                 WHEN 'high' THEN 1
                 WHEN 'medium' THEN 2
                 WHEN 'low' THEN 3
             END,
             created_at DESC",
        )
        .bind(ward_id)
        .fetch_all(pool)
        .await
    }

    pub async fn deactivate_for_ward(pool: &SqlitePool, ward_id: &str) -> Result<(), sqlx::Error> {
        sqlx::query("UPDATE policy_actions SET is_active = 0 WHERE ward_id = ?")
            .bind(ward_id)
            .execute(pool)
            .await?;
        Ok(())
    }

    #[allow(clippy::too_many_arguments)]
    pub async fn insert(
        pool: &SqlitePool,
        ward_id: &str,
        kind: &str,
        title: &str,
        description: &str,
        priority: &str,
        estimated_impact: &str,
        created_at: &str,
    ) -> Result<Self, sqlx::Error> {
        let id = Uuid::new_v4().to_string();
        sqlx::query_as::<_, Self>(
            "INSERT INTO policy_actions
                 (id, ward_id, type, title, description, priority, estimated_impact, is_active, created_at)
             VALUES (?, ?, ?, ?, ?, ?, ?, 1, ?)
             RETURNING id, ward_id, type, title, description, priority, estimated_impact",
        )
        .bind(id)
        .bind(ward_id)
        .bind(kind)
        .bind(title)
        .bind(description)
        .bind(priority)
        .bind(estimated_impact)
        .bind(created_at)
        .fetch_one(pool)
        .await
    }
}
