use std::sync::Arc;

use axum::{
    body::{to_bytes, Body},
    http::{Request, StatusCode},
    Router,
};
use serde_json::Value;
use tempfile::TempDir;
use tower::ServiceExt;
use wardair::{
    api::{self, AppState},
    config::Settings,
    db,
    fallback::FallbackData,
};

async fn seeded_app() -> (Router, TempDir) {
    let dir = tempfile::tempdir().expect("tempdir");
    let settings = Settings {
        database_url: format!("sqlite://{}?mode=rwc", dir.path().join("wardair.db").display()),
        cors_origin: "http://localhost:5173".to_string(),
        seed_days: 7,
    };
    let pool = db::connect(&settings).await.expect("open database");
    db::migrate::apply(&pool).await.expect("migrate");
    db::seed::run(&pool, 7).await.expect("seed");

    let state = AppState {
        pool: Some(pool),
        settings,
        fallback: Arc::new(FallbackData::default()),
    };
    (api::router(state), dir)
}

fn degraded_app() -> Router {
    let settings = Settings {
        database_url: "sqlite://unused.db".to_string(),
        cors_origin: "http://localhost:5173".to_string(),
        seed_days: 7,
    };
    api::router(AppState {
        pool: None,
        settings,
        fallback: Arc::new(FallbackData::default()),
    })
}

async fn get(app: &Router, uri: &str) -> (StatusCode, Value) {
    let response = app
        .clone()
        .oneshot(Request::builder().uri(uri).body(Body::empty()).expect("request"))
        .await
        .expect("response");
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.expect("body");
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).expect("json body")
    };
    (status, value)
}

async fn send_json(app: &Router, method: &str, uri: &str, body: Value) -> (StatusCode, Value) {
    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method(method)
                .uri(uri)
                .header("content-type", "application/json")
                .body(Body::from(body.to_string()))
                .expect("request"),
        )
        .await
        .expect("response");
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.expect("body");
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).expect("json body")
    };
    (status, value)
}

#[tokio::test]
async fn health_reports_database_state() {
    let (app, _dir) = seeded_app().await;
    let (status, body) = get(&app, "/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
    assert_eq!(body["database"], "connected");

    let degraded = degraded_app();
    let (status, body) = get(&degraded, "/health").await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(body["status"], "degraded");
    assert_eq!(body["database"], "disconnected");
}

#[tokio::test]
async fn wards_listing_joins_latest_measurements() {
    let (app, _dir) = seeded_app().await;
    let (status, body) = get(&app, "/api/wards").await;
    assert_eq!(status, StatusCode::OK);
    let wards = body.as_array().expect("ward array");
    assert_eq!(wards.len(), 8);

    let first = &wards[0];
    assert_eq!(first["id"], "W001");
    assert_eq!(first["name"], "New Delhi - Lutyens Zone");
    assert_eq!(first["aqi"], 342);
    assert_eq!(first["category"], "Severe");
    assert_eq!(first["priority"], 1);
    assert_eq!(first["sources"]["wasteBurning"], 10.0);
    assert_eq!(first["forecast"]["hours24"], 365);
    assert_eq!(first["alerts"].as_array().expect("alerts").len(), 2);
}

#[tokio::test]
async fn single_ward_lookup_validates_and_finds() {
    let (app, _dir) = seeded_app().await;

    let (status, body) = get(&app, "/api/wards/W003").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["name"], "North Delhi");

    let (status, _) = get(&app, "/api/wards/W999").await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, body) = get(&app, "/api/wards/not-a-valid-ward-id").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().expect("error message").contains("ward ID"));
}

#[tokio::test]
async fn prediction_uses_the_seeded_series() {
    let (app, _dir) = seeded_app().await;
    let (status, body) = get(&app, "/api/predict/trend?wardId=W001&days=14").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["wardId"], "W001");
    assert_eq!(body["dataPoints"], 7);
    let trend = body["trend"].as_str().expect("trend");
    assert!(["INCREASING", "DECREASING", "STABLE"].contains(&trend));
    let percent = body["changePercent"].as_f64().expect("percent");
    let tenths = percent * 10.0;
    assert!((tenths - tenths.round()).abs() < 1e-6);
}

#[tokio::test]
async fn prediction_requires_a_ward_id() {
    let (app, _dir) = seeded_app().await;
    let (status, body) = get(&app, "/api/predict/trend").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "wardId query parameter is required");

    let (status, _) = get(&app, "/api/predict/trend?wardId=oversized-ward-id").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn alert_lifecycle_create_list_resolve() {
    let (app, _dir) = seeded_app().await;

    let (status, created) = send_json(
        &app,
        "POST",
        "/api/alerts",
        serde_json::json!({ "wardId": "W003", "message": "Stubble burning upwind", "priority": 2 }),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(created["isActive"], true);
    let id = created["id"].as_str().expect("alert id").to_string();

    let (status, listed) = get(&app, "/api/alerts?wardId=W003").await;
    assert_eq!(status, StatusCode::OK);
    let alerts = listed.as_array().expect("alert array");
    assert_eq!(alerts.len(), 1);
    assert_eq!(alerts[0]["wardName"], "North Delhi");
    assert_eq!(alerts[0]["currentAqi"], 185);

    let (status, resolved) =
        send_json(&app, "PATCH", &format!("/api/alerts/{id}/resolve"), Value::Null).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(resolved["isActive"], false);

    let (status, listed) = get(&app, "/api/alerts?wardId=W003").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(listed.as_array().expect("alert array").len(), 0);

    let (status, _) = send_json(
        &app,
        "PATCH",
        "/api/alerts/00000000-0000-0000-0000-000000000000/resolve",
        Value::Null,
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn analytics_series_and_sources() {
    let (app, _dir) = seeded_app().await;

    let (status, body) = get(&app, "/api/analytics/timeseries?wardId=W001&days=7").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().expect("series").len(), 7);

    // Citywide falls back to daily averages across wards.
    let (status, body) = get(&app, "/api/analytics/timeseries?days=not-a-number").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().expect("series").len(), 7);

    let (status, body) = get(&app, "/api/analytics/sources?wardId=W002").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["industrial"], 45.0);

    let (status, _) = get(&app, "/api/analytics/timeseries?wardId=%24%24bad").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn recording_a_reading_updates_the_ward() {
    let (app, _dir) = seeded_app().await;

    let (status, body) = send_json(
        &app,
        "POST",
        "/api/wards/W006/aqi",
        serde_json::json!({
            "aqi": 210, "category": "Poor",
            "pm25": 140.0, "pm10": 230.0, "no2": 40.0, "so2": 18.0, "co": 3.2
        }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);

    let (_, ward) = get(&app, "/api/wards/W006").await;
    assert_eq!(ward["aqi"], 210);
    assert_eq!(ward["category"], "Poor");
    assert_eq!(ward["pollutants"]["pm25"], 140.0);

    // Daily aggregates pick the new reading up.
    let (status, trends) = get(&app, "/api/analytics/trends?wardId=W006&period=7d").await;
    assert_eq!(status, StatusCode::OK);
    let rows = trends.as_array().expect("trend rows");
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0]["maxAqi"], 210);
    assert_eq!(rows[0]["minAqi"], 95);
}

#[tokio::test]
async fn weather_serves_readings_and_defaults() {
    let (app, _dir) = seeded_app().await;

    let (status, body) = get(&app, "/api/weather?wardId=W001").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["windSpeed"], 8.5);
    assert_eq!(body["temperature"], 28.0);
    assert_eq!(body["humidity"], 65.0);

    let (status, body) = get(&app, "/api/weather").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["windSpeed"], 8.5);

    let (status, body) = send_json(
        &app,
        "POST",
        "/api/weather",
        serde_json::json!({ "wardId": "W005", "windSpeed": 12.0, "temperature": 31.5, "humidity": 48.0 }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);

    let (_, body) = get(&app, "/api/weather?wardId=W005").await;
    assert_eq!(body["windSpeed"], 12.0);
    assert_eq!(body["humidity"], 48.0);
}

#[tokio::test]
async fn policy_generation_matches_ward_conditions() {
    let (app, _dir) = seeded_app().await;

    // W001: AQI 342, construction share 25 -> traffic, construction,
    // enforcement, plus the always-on advisory.
    let (status, generated) =
        send_json(&app, "POST", "/api/policy/ward/W001/generate", Value::Null).await;
    assert_eq!(status, StatusCode::OK);
    let kinds: Vec<&str> = generated
        .as_array()
        .expect("actions")
        .iter()
        .map(|a| a["type"].as_str().expect("type"))
        .collect();
    assert_eq!(kinds, vec!["traffic", "construction", "enforcement", "health"]);

    let (status, listed) = get(&app, "/api/policy/ward/W001").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(listed.as_array().expect("actions").len(), 4);

    // Regenerating replaces, not appends.
    let (_, regenerated) =
        send_json(&app, "POST", "/api/policy/ward/W001/generate", Value::Null).await;
    assert_eq!(regenerated.as_array().expect("actions").len(), 4);
    let (_, listed) = get(&app, "/api/policy/ward/W001").await;
    assert_eq!(listed.as_array().expect("actions").len(), 4);

    let (status, _) = send_json(&app, "POST", "/api/policy/ward/W999/generate", Value::Null).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn degraded_mode_serves_fallback_data() {
    let app = degraded_app();

    let (status, body) = get(&app, "/api/wards").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().expect("wards").len(), 8);

    let (status, body) = get(&app, "/api/weather").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["windSpeed"], 8.5);

    let (status, body) = get(&app, "/api/alerts").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().expect("alerts").len(), 0);

    // Writes and predictions need the store.
    let (status, _) = get(&app, "/api/predict/trend?wardId=W001").await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);

    let (status, _) = send_json(
        &app,
        "POST",
        "/api/alerts",
        serde_json::json!({ "wardId": "W001", "message": "test" }),
    )
    .await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
}
