use super::domain::{ActivityId, RawActivity, ScoredActivity};
use crate::config::ChallengeConfig;
use std::collections::HashMap;

const DEFAULT_MULTIPLIER: f64 = 1.0;

/// Stateless rules mapping a raw activity to its week, score, and calories.
#[derive(Debug, Clone)]
pub struct ScoringPolicy {
    config: ChallengeConfig,
    calorie_overrides: HashMap<ActivityId, i64>,
}

impl ScoringPolicy {
    pub fn new(config: ChallengeConfig) -> Self {
        let mut calorie_overrides = HashMap::new();
        for entry in &config.calorie_overrides {
            calorie_overrides.entry(entry.id).or_insert(entry.calories);
        }
        Self {
            config,
            calorie_overrides,
        }
    }

    pub fn config(&self) -> &ChallengeConfig {
        &self.config
    }

    /// 1-based index of the first week strictly containing the start time.
    pub fn classify_week(&self, activity: &RawActivity) -> Option<u32> {
        self.config
            .weeks
            .iter()
            .position(|week| week.contains(activity.start_date))
            .map(|index| index as u32 + 1)
    }

    pub fn score(&self, activity: &RawActivity) -> u64 {
        let minutes = moving_minutes(activity);
        let signed_minutes = i64::try_from(minutes).unwrap_or(i64::MAX);
        let multiplier = self
            .config
            .epic_overrides
            .iter()
            .rev()
            .find(|epic| {
                epic.activity_type == activity.activity_type && signed_minutes > epic.minutes
            })
            .map(|epic| epic.multiplier)
            .unwrap_or_else(|| base_multiplier(&activity.activity_type));

        (minutes as f64 * multiplier).floor() as u64
    }

    pub fn calories(&self, activity: &RawActivity) -> i64 {
        match self.calorie_overrides.get(&activity.id) {
            Some(calories) => *calories,
            None => activity.calories.trunc() as i64,
        }
    }

    pub fn scored(&self, activity: &RawActivity, week: u32) -> ScoredActivity {
        ScoredActivity {
            id: activity.id,
            activity_type: activity.activity_type.clone(),
            name: activity.name.clone(),
            week,
            score: self.score(activity),
            calories: self.calories(activity),
        }
    }
}

/// Moving time rounded up to whole minutes.
fn moving_minutes(activity: &RawActivity) -> u64 {
    let seconds =
        activity.moving_time.as_secs() + u64::from(activity.moving_time.subsec_nanos() > 0);
    seconds.div_ceil(60)
}

fn base_multiplier(activity_type: &str) -> f64 {
    match activity_type {
        "Hike" | "Ride" => 1.75,
        "Run" => 1.50,
        _ => DEFAULT_MULTIPLIER,
    }
}
