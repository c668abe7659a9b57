use super::ConfigError;
use crate::scoreboard::ActivityId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::Path;

const EMBEDDED_CHALLENGE: &str = include_str!("../../etc/scoreboard.json");

/// Scoring rules for one challenge. Immutable once loaded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChallengeConfig {
    pub weeks: Vec<WeekWindow>,
    #[serde(default, rename = "epic", alias = "epicOverrides")]
    pub epic_overrides: Vec<EpicOverride>,
    #[serde(default, rename = "calories", alias = "calorieOverrides")]
    pub calorie_overrides: Vec<CalorieOverride>,
}

/// A week bucket. Only activities strictly inside `(start, end)` belong to it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeekWindow {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl WeekWindow {
    pub fn contains(&self, at: DateTime<Utc>) -> bool {
        self.start < at && at < self.end
    }
}

/// Replaces the multiplier for `activity_type` once moving time exceeds `minutes`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EpicOverride {
    #[serde(rename = "type")]
    pub activity_type: String,
    pub minutes: i64,
    pub multiplier: f64,
}

/// Literal calorie value for an activity whose sensor data is known to be wrong.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalorieOverride {
    pub id: ActivityId,
    #[serde(rename = "override")]
    pub calories: i64,
}

impl ChallengeConfig {
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        tracing::info!(file = %path.display(), "loading challenge");
        let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::ChallengeRead {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&raw)
    }

    /// The four June/July 2021 weeks compiled into the binary.
    pub fn embedded() -> Result<Self, ConfigError> {
        tracing::info!(file = "etc/scoreboard.json", "loading embedded challenge");
        Self::from_json(EMBEDDED_CHALLENGE)
    }

    pub fn from_json(raw: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(raw).map_err(ConfigError::ChallengeParse)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.weeks.is_empty() {
            return Err(ConfigError::NoWeeks);
        }

        if let Some(index) = self.weeks.iter().position(|week| week.start >= week.end) {
            return Err(ConfigError::EmptyWeek { week: index + 1 });
        }

        if let Some(epic) = self
            .epic_overrides
            .iter()
            .find(|epic| !epic.multiplier.is_finite() || epic.multiplier <= 0.0)
        {
            return Err(ConfigError::InvalidMultiplier {
                activity_type: epic.activity_type.clone(),
                multiplier: epic.multiplier,
            });
        }

        Ok(())
    }

    /// Earliest week start and latest week end, or `None` without weeks.
    pub fn span(&self) -> Option<(DateTime<Utc>, DateTime<Utc>)> {
        let start = self.weeks.iter().map(|week| week.start).min()?;
        let end = self.weeks.iter().map(|week| week.end).max()?;
        Some((start, end))
    }
}
