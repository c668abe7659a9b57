use crate::cli::ServeArgs;
use crate::infra::{AppState, StravaSourceFactory};
use crate::routes::scoreboard_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use fitness_scoreboard::config::AppConfig;
use fitness_scoreboard::error::AppError;
use fitness_scoreboard::telemetry;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing::info;

pub(crate) async fn run(mut args: ServeArgs) -> Result<(), AppError> {
    let mut config = AppConfig::load()?;

    if let Some(host) = args.host.take() {
        config.server.host = host;
    }
    if let Some(port) = args.port.take() {
        config.server.port = port;
    }

    telemetry::init(&config.telemetry)?;

    let challenge = config.challenge()?;
    info!(
        weeks = challenge.weeks.len(),
        epic_overrides = challenge.epic_overrides.len(),
        calorie_overrides = challenge.calorie_overrides.len(),
        "challenge loaded"
    );

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(AtomicBool::new(false));
    let app_state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
        challenge: Arc::new(challenge),
        settings: config.pipeline.clone(),
        sources: Arc::new(StravaSourceFactory::new(config.strava.api_url.clone())),
    };

    let app = scoreboard_routes()
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(?config.environment, %addr, "fitness scoreboard ready");

    axum::serve(listener, app).await?;
    Ok(())
}
