use std::fmt;
use std::path::PathBuf;

/// Problems found while loading settings or challenge rules, before any
/// pipeline starts.
#[derive(Debug)]
pub enum ConfigError {
    InvalidNumber {
        name: &'static str,
        value: String,
    },
    InvalidHost {
        host: String,
        source: std::net::AddrParseError,
    },
    ChallengeRead {
        path: PathBuf,
        source: std::io::Error,
    },
    ChallengeParse(serde_json::Error),
    NoWeeks,
    EmptyWeek {
        week: usize,
    },
    InvalidMultiplier {
        activity_type: String,
        multiplier: f64,
    },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidNumber { name, value } => {
                write!(f, "{name} is out of range or not a number: '{value}'")
            }
            ConfigError::InvalidHost { host, .. } => {
                write!(f, "APP_HOST '{host}' is not an IP address or localhost")
            }
            ConfigError::ChallengeRead { path, .. } => {
                write!(f, "unable to read challenge file {}", path.display())
            }
            ConfigError::ChallengeParse(err) => write!(f, "malformed challenge file: {err}"),
            ConfigError::NoWeeks => write!(f, "challenge must define at least one week"),
            ConfigError::EmptyWeek { week } => {
                write!(f, "week {week} must start before it ends")
            }
            ConfigError::InvalidMultiplier {
                activity_type,
                multiplier,
            } => write!(
                f,
                "epic multiplier for {activity_type} must be a positive number, got {multiplier}"
            ),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::InvalidHost { source, .. } => Some(source),
            ConfigError::ChallengeRead { source, .. } => Some(source),
            ConfigError::ChallengeParse(err) => Some(err),
            ConfigError::InvalidNumber { .. }
            | ConfigError::NoWeeks
            | ConfigError::EmptyWeek { .. }
            | ConfigError::InvalidMultiplier { .. } => None,
        }
    }
}
