//! HTTP error type mapping service failures onto status codes.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;
use tracing::error;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Invalid ward ID format")]
    InvalidWardId,
    #[error("{0}")]
    BadRequest(String),
    #[error("{0} not found")]
    NotFound(&'static str),
    #[error("Database unavailable")]
    Unavailable,
    #[error(transparent)]
    Database(#[from] sqlx::Error),
}

pub type ApiResult<T> = Result<Json<T>, ApiError>;

impl ApiError {
    fn status(&self) -> StatusCode {
        match self {
            Self::InvalidWardId | Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Unavailable => StatusCode::SERVICE_UNAVAILABLE,
            Self::Database(err) => classify_db_error(err),
        }
    }
}

/// Unreachable-store failures surface as 503 so load balancers back off;
/// an unmigrated database counts as unreachable. Everything else is a 500.
fn classify_db_error(err: &sqlx::Error) -> StatusCode {
    match err {
        sqlx::Error::PoolTimedOut | sqlx::Error::PoolClosed | sqlx::Error::Io(_) => {
            StatusCode::SERVICE_UNAVAILABLE
        }
        sqlx::Error::Database(db) if db.message().contains("no such table") => {
            StatusCode::SERVICE_UNAVAILABLE
        }
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            error!(error = %self, status = %status, "request failed");
        }
        // Query failures are reported generically; details stay in the log.
        let message = match &self {
            Self::Database(_) if status == StatusCode::SERVICE_UNAVAILABLE => {
                "Database unavailable".to_string()
            }
            Self::Database(_) => "Internal server error".to_string(),
            other => other.to_string(),
        };
        (status, Json(json!({ "error": message }))).into_response()
    }
}
