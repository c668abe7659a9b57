use super::domain::{ScoredActivity, Scoreboard, WeekSummary};
use std::collections::BTreeMap;

/// Folds scored activities into one summary per observed week.
pub fn aggregate(activities: Vec<ScoredActivity>) -> Scoreboard {
    let mut by_week: BTreeMap<u32, Vec<ScoredActivity>> = BTreeMap::new();
    for activity in activities {
        by_week.entry(activity.week).or_default().push(activity);
    }

    let weeks = by_week
        .into_iter()
        .map(|(week, activities)| {
            let score = activities.iter().map(|activity| activity.score).sum();
            let calories = activities.iter().map(|activity| activity.calories).sum();
            WeekSummary {
                week,
                score,
                calories,
                activities,
            }
        })
        .collect();

    Scoreboard { weeks }
}
