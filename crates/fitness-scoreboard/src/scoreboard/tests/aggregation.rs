use super::common::*;
use crate::scoreboard::{aggregate, ScoredActivity, Scoreboard};

fn normalized(board: Scoreboard) -> Scoreboard {
    board.sorted()
}

#[test]
fn empty_input_yields_empty_scoreboard() {
    let board = aggregate(Vec::new());
    assert!(board.is_empty());
    assert_eq!(board.total_score(), 0);
}

#[test]
fn sums_scores_and_calories_per_week() {
    let board = aggregate(vec![
        scored(1, 1, 135, 500),
        scored(2, 2, 40, 120),
        scored(3, 1, 15, 80),
    ]);

    assert_eq!(board.weeks.len(), 2);
    let first = board.week(1).expect("week 1 present");
    assert_eq!(first.score, 150);
    assert_eq!(first.calories, 580);
    assert_eq!(first.activities.len(), 2);

    let second = board.week(2).expect("week 2 present");
    assert_eq!(second.score, 40);
    assert_eq!(second.calories, 120);
    assert_eq!(board.total_score(), 190);
    assert_eq!(board.total_calories(), 700);
}

#[test]
fn weeks_without_activities_are_absent() {
    let board = aggregate(vec![scored(1, 3, 10, 10)]);
    assert!(board.week(1).is_none());
    assert!(board.week(2).is_none());
    assert!(board.week(3).is_some());
}

#[test]
fn aggregation_ignores_input_order() {
    let activities: Vec<ScoredActivity> = vec![
        scored(1, 1, 135, 500),
        scored(2, 2, 40, 120),
        scored(3, 1, 15, 80),
        scored(4, 4, 99, 310),
        scored(5, 2, 7, 0),
    ];
    let expected = normalized(aggregate(activities.clone()));

    for shift in 0..activities.len() {
        let mut rotated = activities.clone();
        rotated.rotate_left(shift);
        assert_eq!(normalized(aggregate(rotated.clone())), expected);

        rotated.reverse();
        assert_eq!(normalized(aggregate(rotated)), expected);
    }
}

#[test]
fn splitting_and_merging_input_preserves_totals() {
    let activities = vec![
        scored(1, 1, 135, 500),
        scored(2, 2, 40, 120),
        scored(3, 1, 15, 80),
    ];
    let whole = aggregate(activities.clone());

    let (left, right) = activities.split_at(1);
    let mut merged = right.to_vec();
    merged.extend_from_slice(left);

    assert_eq!(normalized(aggregate(merged)), normalized(whole));
}

#[test]
fn serialized_scoreboard_round_trips() {
    let board = aggregate(vec![
        scored(1, 1, 135, 500),
        scored(2, 2, 40, 120),
        scored(3, 1, 15, 80),
    ]);

    let json = serde_json::to_string_pretty(&board).expect("scoreboard serializes");
    let parsed: Scoreboard = serde_json::from_str(&json).expect("scoreboard parses");

    assert_eq!(parsed, board);
}

#[test]
fn serialized_scoreboard_uses_wire_field_names() {
    let board = aggregate(vec![scored(1, 1, 135, 500)]);

    let value = serde_json::to_value(&board).expect("scoreboard serializes");

    assert_eq!(
        value,
        serde_json::json!([{
            "week": 1,
            "score": 135,
            "calories": 500,
            "activities": [{
                "id": 1,
                "type": "Run",
                "name": "Run #1",
                "week": 1,
                "score": 135,
                "calories": 500
            }]
        }])
    );
}
