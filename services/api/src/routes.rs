use crate::infra::AppState;
use axum::http::{header, HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Extension, Json, Router};
use fitness_scoreboard::config::ChallengeConfig;
use fitness_scoreboard::error::AppError;
use fitness_scoreboard::scoreboard::ScoreboardPipeline;
use serde_json::json;
use std::sync::atomic::Ordering;
use tracing::info;

pub(crate) fn scoreboard_routes() -> Router {
    Router::new()
        .route("/health", get(healthcheck))
        .route("/ready", get(readiness_endpoint))
        .route("/metrics", get(metrics_endpoint))
        .route("/api/v1/scoreboard", get(scoreboard_endpoint))
        .route("/api/v1/challenge", get(challenge_endpoint))
}

pub(crate) async fn healthcheck() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

pub(crate) async fn readiness_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    let ready = state.readiness.load(Ordering::Relaxed);
    let status = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let payload = if ready {
        json!({ "status": "ready" })
    } else {
        json!({ "status": "initializing" })
    };

    (status, Json(payload))
}

pub(crate) async fn metrics_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics.render(),
    )
}

/// Runs the pipeline for the bearer's activities and answers with indented
/// JSON, weeks ascending.
pub(crate) async fn scoreboard_endpoint(
    Extension(state): Extension<AppState>,
    headers: HeaderMap,
) -> Result<Response, AppError> {
    let token = bearer_token(&headers).ok_or(AppError::Unauthorized)?;
    let source = state.sources.for_token(token);

    let board = ScoreboardPipeline::new(state.challenge.as_ref().clone(), source)
        .with_settings(state.settings.clone())
        .run()
        .await?
        .sorted();

    info!(
        weeks = board.weeks.len(),
        score = board.total_score(),
        "scoreboard served"
    );
    let body = serde_json::to_vec_pretty(&board)?;
    Ok(([(header::CONTENT_TYPE, "application/json")], body).into_response())
}

pub(crate) async fn challenge_endpoint(
    Extension(state): Extension<AppState>,
) -> Json<ChallengeConfig> {
    Json(state.challenge.as_ref().clone())
}

fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    let value = headers.get(header::AUTHORIZATION)?.to_str().ok()?;
    let token = value.strip_prefix("Bearer ")?.trim();
    (!token.is_empty()).then_some(token)
}
