//! SQLite-backed storage for ward monitoring data.

pub mod migrate;
pub mod models;
pub mod seed;

use std::time::Duration;

use sqlx::sqlite::{SqlitePool, SqlitePoolOptions};
use tracing::{info, warn};

use crate::config::Settings;

/// Open a connection pool for the configured database.
///
/// The server must come up even when the database cannot be opened, so a
/// failure is logged and surfaced as `None`; routes degrade to fallback data
/// and `/health` reports the outage.
pub async fn connect(settings: &Settings) -> Option<SqlitePool> {
    match SqlitePoolOptions::new()
        .max_connections(5)
        .acquire_timeout(Duration::from_secs(5))
        .connect(&settings.database_url)
        .await
    {
        Ok(pool) => {
            info!(url = %settings.database_url, "opened database");
            Some(pool)
        }
        Err(err) => {
            warn!(url = %settings.database_url, %err, "database unavailable; serving fallback data");
            None
        }
    }
}

/// Open the pool or fail; used by CLI commands that cannot run degraded.
pub async fn connect_required(settings: &Settings) -> anyhow::Result<SqlitePool> {
    use anyhow::Context;
    SqlitePoolOptions::new()
        .max_connections(5)
        .acquire_timeout(Duration::from_secs(5))
        .connect(&settings.database_url)
        .await
        .with_context(|| format!("opening database {}", settings.database_url))
}

/// Cheap liveness probe used by the health endpoint.
pub async fn ping(pool: &SqlitePool) -> bool {
    sqlx::query("SELECT 1").execute(pool).await.is_ok()
}
