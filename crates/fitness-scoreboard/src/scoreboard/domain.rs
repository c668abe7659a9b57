use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;

/// Remote identifier of a recorded activity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ActivityId(pub u64);

impl fmt::Display for ActivityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Activity as reported by the remote source, either a listing summary or a
/// full detail record. Summaries usually carry imprecise moving time and no
/// calories.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawActivity {
    pub id: ActivityId,
    #[serde(rename = "type")]
    pub activity_type: String,
    pub name: String,
    #[serde(with = "seconds")]
    pub moving_time: Duration,
    #[serde(default)]
    pub calories: f64,
    pub start_date: DateTime<Utc>,
}

/// One activity after week classification and scoring.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoredActivity {
    pub id: ActivityId,
    #[serde(rename = "type")]
    pub activity_type: String,
    pub name: String,
    pub week: u32,
    pub score: u64,
    pub calories: i64,
}

/// Totals for one week bucket.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeekSummary {
    pub week: u32,
    pub score: u64,
    pub calories: i64,
    pub activities: Vec<ScoredActivity>,
}

/// Per-week totals for every week with at least one qualifying activity.
/// Entry order is not meaningful; use [`Scoreboard::sorted`] when it matters.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Scoreboard {
    pub weeks: Vec<WeekSummary>,
}

impl Scoreboard {
    pub fn is_empty(&self) -> bool {
        self.weeks.is_empty()
    }

    pub fn week(&self, week: u32) -> Option<&WeekSummary> {
        self.weeks.iter().find(|summary| summary.week == week)
    }

    pub fn total_score(&self) -> u64 {
        self.weeks.iter().map(|summary| summary.score).sum()
    }

    pub fn total_calories(&self) -> i64 {
        self.weeks.iter().map(|summary| summary.calories).sum()
    }

    /// Weeks ascending, activities within a week ordered by id.
    pub fn sorted(mut self) -> Self {
        self.weeks.sort_by_key(|summary| summary.week);
        for summary in &mut self.weeks {
            summary.activities.sort_by_key(|activity| activity.id);
        }
        self
    }
}

mod seconds {
    use serde::{Deserialize, Deserializer, Serializer};
    use std::time::Duration;

    pub fn serialize<S: Serializer>(value: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u64(value.as_secs())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Duration, D::Error> {
        u64::deserialize(deserializer).map(Duration::from_secs)
    }
}
