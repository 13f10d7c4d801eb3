//! Runtime configuration utilities for wardair.

use std::env;

/// Application configuration resolved from `.env` and defaults.
#[derive(Debug, Clone)]
pub struct Settings {
    /// SQLite database URL; `mode=rwc` creates the file on first use.
    pub database_url: String,
    /// Allowed CORS origin for the dashboard frontend.
    pub cors_origin: String,
    /// Days of time-series history generated per ward when seeding.
    pub seed_days: u32,
}

impl Settings {
    /// Load configuration from environment with reasonable defaults.
    pub fn load() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        let database_url = env::var("DATABASE_URL")
            .unwrap_or_else(|_| "sqlite://wardair.db?mode=rwc".to_string());
        let cors_origin =
            env::var("CORS_ORIGIN").unwrap_or_else(|_| "http://localhost:5173".to_string());
        let seed_days = env::var("SEED_DAYS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(7);

        Ok(Self {
            database_url,
            cors_origin,
            seed_days,
        })
    }
}
