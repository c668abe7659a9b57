//! Process settings from the environment plus the challenge rules they point at.

mod challenge;
mod error;

pub use challenge::{CalorieOverride, ChallengeConfig, EpicOverride, WeekWindow};
pub use error::ConfigError;

use crate::scoreboard::PipelineSettings;
use crate::strava::DEFAULT_API_URL;
use std::env;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

const DEFAULT_HOST: &str = "127.0.0.1";
const DEFAULT_PORT: u16 = 9001;
const DEFAULT_LOG_LEVEL: &str = "info";

/// Deployment stage, from `APP_ENV`. Unknown values fall back to development.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEnvironment {
    Development,
    Test,
    Production,
}

impl AppEnvironment {
    fn parse(value: &str) -> Self {
        let value = value.trim();
        if ["prod", "production"]
            .iter()
            .any(|name| value.eq_ignore_ascii_case(name))
        {
            Self::Production
        } else if ["test", "ci"]
            .iter()
            .any(|name| value.eq_ignore_ascii_case(name))
        {
            Self::Test
        } else {
            Self::Development
        }
    }
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub environment: AppEnvironment,
    pub server: ServerConfig,
    pub telemetry: TelemetryConfig,
    pub pipeline: PipelineSettings,
    pub strava: StravaConfig,
    /// Challenge file; the embedded default is used when unset.
    pub challenge_path: Option<PathBuf>,
}

impl AppConfig {
    /// Reads `.env` when present, then the process environment.
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        Ok(Self {
            environment: env_string("APP_ENV")
                .map(|value| AppEnvironment::parse(&value))
                .unwrap_or(AppEnvironment::Development),
            server: ServerConfig {
                host: env_string("APP_HOST").unwrap_or_else(|| DEFAULT_HOST.to_string()),
                port: env_number("APP_PORT", DEFAULT_PORT)?,
            },
            telemetry: TelemetryConfig {
                log_level: env_string("APP_LOG_LEVEL")
                    .unwrap_or_else(|| DEFAULT_LOG_LEVEL.to_string()),
            },
            pipeline: pipeline_from_env()?,
            strava: StravaConfig {
                api_url: env_string("STRAVA_API_URL")
                    .unwrap_or_else(|| DEFAULT_API_URL.to_string()),
            },
            challenge_path: env_string("FITNESS_CONFIG").map(PathBuf::from),
        })
    }

    /// Loads the challenge rules from `challenge_path` or the built-in default.
    pub fn challenge(&self) -> Result<ChallengeConfig, ConfigError> {
        match &self.challenge_path {
            Some(path) => ChallengeConfig::from_path(path),
            None => ChallengeConfig::embedded(),
        }
    }
}

fn pipeline_from_env() -> Result<PipelineSettings, ConfigError> {
    let defaults = PipelineSettings::default();
    let deadline_secs = env_number("SCOREBOARD_DEADLINE_SECS", defaults.deadline.as_secs())?;

    Ok(PipelineSettings {
        concurrency: env_number("SCOREBOARD_CONCURRENCY", defaults.concurrency)?,
        deadline: Duration::from_secs(deadline_secs),
        page_limit: env_number("SCOREBOARD_PAGE_LIMIT", defaults.page_limit)?,
        queue_capacity: env_number("SCOREBOARD_QUEUE_CAPACITY", defaults.queue_capacity)?,
    })
}

/// Set and non-blank, trimmed.
fn env_string(name: &str) -> Option<String> {
    env::var(name)
        .ok()
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

fn env_number<T: FromStr>(name: &'static str, default: T) -> Result<T, ConfigError> {
    match env_string(name) {
        Some(raw) => raw
            .parse::<T>()
            .map_err(|_| ConfigError::InvalidNumber { name, value: raw }),
        None => Ok(default),
    }
}

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl ServerConfig {
    /// `localhost` binds the IPv4 loopback; anything else must be a literal IP.
    pub fn socket_addr(&self) -> Result<SocketAddr, ConfigError> {
        let ip = if self.host.eq_ignore_ascii_case("localhost") {
            IpAddr::V4(Ipv4Addr::LOCALHOST)
        } else {
            self.host
                .parse()
                .map_err(|source| ConfigError::InvalidHost {
                    host: self.host.clone(),
                    source,
                })?
        };
        Ok(SocketAddr::new(ip, self.port))
    }
}

#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    /// `EnvFilter` directives; `RUST_LOG` overrides.
    pub log_level: String,
}

#[derive(Debug, Clone)]
pub struct StravaConfig {
    pub api_url: String,
}
