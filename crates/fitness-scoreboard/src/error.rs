use crate::config::ConfigError;
use crate::scoreboard::ScoreboardError;
use crate::source::SourceError;
use crate::telemetry::TelemetryError;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;

/// Every failure the service and CLI surface, with its HTTP rendering.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),
    #[error("telemetry error: {0}")]
    Telemetry(#[from] TelemetryError),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("activity source error: {0}")]
    Source(#[from] SourceError),
    #[error("scoreboard error: {0}")]
    Scoreboard(#[from] ScoreboardError),
    #[error("missing or invalid bearer token")]
    Unauthorized,
}

impl AppError {
    /// Upstream trouble is a gateway problem; a blown deadline is a gateway
    /// timeout.
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Unauthorized => StatusCode::UNAUTHORIZED,
            AppError::Scoreboard(err) if err.is_timeout() => StatusCode::GATEWAY_TIMEOUT,
            AppError::Scoreboard(_) | AppError::Source(_) => StatusCode::BAD_GATEWAY,
            AppError::Config(_) | AppError::Telemetry(_) | AppError::Io(_) | AppError::Json(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!(error = %self, status = status.as_u16(), "request failed");
        }
        (status, Json(json!({ "error": self.to_string() }))).into_response()
    }
}
