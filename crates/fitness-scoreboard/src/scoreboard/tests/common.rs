use std::time::Duration;

use chrono::{DateTime, TimeZone, Utc};

use crate::config::{CalorieOverride, ChallengeConfig, EpicOverride, WeekWindow};
use crate::scoreboard::{ActivityId, PipelineSettings, RawActivity, ScoredActivity};

pub(super) fn at(month: u32, day: u32, hour: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2021, month, day, hour, 0, 0)
        .single()
        .expect("valid timestamp")
}

pub(super) fn week(start: DateTime<Utc>) -> WeekWindow {
    WeekWindow {
        start,
        end: start + chrono::Duration::days(7),
    }
}

pub(super) fn single_week_challenge() -> ChallengeConfig {
    ChallengeConfig {
        weeks: vec![week(at(6, 7, 0))],
        epic_overrides: Vec::new(),
        calorie_overrides: Vec::new(),
    }
}

pub(super) fn four_week_challenge() -> ChallengeConfig {
    ChallengeConfig {
        weeks: vec![
            week(at(6, 7, 0)),
            week(at(6, 14, 0)),
            week(at(6, 21, 0)),
            week(at(6, 28, 0)),
        ],
        epic_overrides: Vec::new(),
        calorie_overrides: Vec::new(),
    }
}

pub(super) fn epic(activity_type: &str, minutes: i64, multiplier: f64) -> EpicOverride {
    EpicOverride {
        activity_type: activity_type.to_string(),
        minutes,
        multiplier,
    }
}

pub(super) fn calorie_override(id: u64, calories: i64) -> CalorieOverride {
    CalorieOverride {
        id: ActivityId(id),
        calories,
    }
}

pub(super) fn activity(
    id: u64,
    activity_type: &str,
    minutes: u64,
    calories: f64,
    start_date: DateTime<Utc>,
) -> RawActivity {
    RawActivity {
        id: ActivityId(id),
        activity_type: activity_type.to_string(),
        name: format!("{activity_type} #{id}"),
        moving_time: Duration::from_secs(minutes * 60),
        calories,
        start_date,
    }
}

pub(super) fn scored(id: u64, week: u32, score: u64, calories: i64) -> ScoredActivity {
    ScoredActivity {
        id: ActivityId(id),
        activity_type: "Run".to_string(),
        name: format!("Run #{id}"),
        week,
        score,
        calories,
    }
}

/// A month of activities spread over the four weeks, two per day.
pub(super) fn busy_month() -> Vec<RawActivity> {
    let types = ["Run", "Ride", "Hike", "Walk", "Swim"];
    (0..56u64)
        .map(|n| {
            let day = 7 + (n / 2) as u32;
            let start = if day <= 30 {
                at(6, day, 6 + (n % 2) as u32 * 10)
            } else {
                at(7, day - 30, 6 + (n % 2) as u32 * 10)
            };
            activity(
                n + 1,
                types[(n % types.len() as u64) as usize],
                15 + n * 7,
                100.0 + n as f64 * 12.5,
                start,
            )
        })
        .collect()
}

pub(super) fn fast_settings() -> PipelineSettings {
    PipelineSettings {
        concurrency: 4,
        deadline: Duration::from_secs(5),
        page_limit: 100,
        queue_capacity: 8,
    }
}
