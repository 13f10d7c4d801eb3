//! HTTP layer exposing ward monitoring data.

pub mod error;
pub mod routes;
pub mod types;

use std::{net::SocketAddr, sync::Arc};

use anyhow::Result;
use axum::{
    http::HeaderValue,
    routing::{get, patch, post},
    Router,
};
use sqlx::SqlitePool;
use tokio::net::TcpListener;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing::{info, warn};

use crate::{config::Settings, db, fallback::FallbackData};

use error::ApiError;

#[derive(Clone)]
pub struct AppState {
    /// Absent when the database could not be opened at startup; routes then
    /// degrade to fallback data instead of crashing the server.
    pub pool: Option<SqlitePool>,
    pub settings: Settings,
    pub fallback: Arc<FallbackData>,
}

impl AppState {
    pub fn db(&self) -> Result<&SqlitePool, ApiError> {
        self.pool.as_ref().ok_or(ApiError::Unavailable)
    }
}

pub fn router(state: AppState) -> Router {
    let cors = match state.settings.cors_origin.parse::<HeaderValue>() {
        Ok(origin) => CorsLayer::new()
            .allow_origin(origin)
            .allow_methods(Any)
            .allow_headers(Any),
        Err(_) => {
            warn!(origin = %state.settings.cors_origin, "invalid CORS origin; allowing any");
            CorsLayer::permissive()
        }
    };

    Router::new()
        .route("/health", get(routes::health))
        .route("/api/wards", get(routes::wards::list))
        .route("/api/wards/:id", get(routes::wards::get_one))
        .route("/api/wards/:id/aqi", post(routes::wards::record_aqi))
        .route("/api/analytics/timeseries", get(routes::analytics::timeseries))
        .route("/api/analytics/trends", get(routes::analytics::trends))
        .route("/api/analytics/sources", get(routes::analytics::sources))
        .route("/api/alerts", get(routes::alerts::list).post(routes::alerts::create))
        .route("/api/alerts/:id/resolve", patch(routes::alerts::resolve))
        .route("/api/weather", get(routes::weather::current).post(routes::weather::record))
        .route("/api/predict/trend", get(routes::predict::trend))
        .route("/api/policy/ward/:ward_id", get(routes::policy::list))
        .route("/api/policy/ward/:ward_id/generate", post(routes::policy::generate))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

pub async fn serve(settings: Settings, host: String, port: u16) -> Result<()> {
    let pool = db::connect(&settings).await;
    let state = AppState {
        pool,
        settings,
        fallback: Arc::new(FallbackData::default()),
    };
    let router = router(state);

    let addr: SocketAddr = format!("{host}:{port}").parse()?;
    info!(%addr, "serving wardair API");
    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, router.into_make_service()).await?;
    Ok(())
}
