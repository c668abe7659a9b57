use fitness_scoreboard::config::ChallengeConfig;
use fitness_scoreboard::scoreboard::PipelineSettings;
use fitness_scoreboard::source::ActivitySource;
use fitness_scoreboard::strava::StravaClient;
use metrics_exporter_prometheus::PrometheusHandle;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
    pub(crate) challenge: Arc<ChallengeConfig>,
    pub(crate) settings: PipelineSettings,
    pub(crate) sources: Arc<dyn SourceFactory>,
}

/// Builds an activity source acting on behalf of one bearer token.
pub(crate) trait SourceFactory: Send + Sync {
    fn for_token(&self, access_token: &str) -> Arc<dyn ActivitySource>;
}

/// Sources backed by the Strava API, sharing one connection pool.
pub(crate) struct StravaSourceFactory {
    http: reqwest::Client,
    api_url: String,
}

impl StravaSourceFactory {
    pub(crate) fn new(api_url: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            api_url: api_url.into(),
        }
    }
}

impl SourceFactory for StravaSourceFactory {
    fn for_token(&self, access_token: &str) -> Arc<dyn ActivitySource> {
        Arc::new(StravaClient::with_http(
            self.http.clone(),
            self.api_url.clone(),
            access_token,
        ))
    }
}
