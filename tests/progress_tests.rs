// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Progress statistics over stored workout documents.

use chrono::NaiveDate;
use prehab_tracker::models::{ProgressStats, WorkoutRecord};
use serde_json::json;

fn workouts(value: serde_json::Value) -> Vec<WorkoutRecord> {
    serde_json::from_value(value).unwrap()
}

fn day(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

#[test]
fn test_two_consecutive_days_streak() {
    let list = workouts(json!([
        { "id": "1", "title": "A", "duration": 10, "difficulty": "Beginner",
          "completed": true, "completedAt": "2024-01-10" },
        { "id": "2", "title": "B", "duration": 20, "difficulty": "Beginner",
          "completed": true, "completedAt": "2024-01-11" }
    ]));

    let stats = ProgressStats::compute(&list, day(2024, 1, 11));
    assert_eq!(stats.current_streak, 2);
    assert_eq!(stats.longest_streak, 2);
    assert_eq!(stats.total_minutes, 30);
}

#[test]
fn test_favorite_is_most_completed_title() {
    let entry = |id: &str, title: &str, at: &str| {
        json!({ "id": id, "title": title, "duration": 25, "difficulty": "Beginner",
                "completed": true, "completedAt": at })
    };
    let list = workouts(json!([
        entry("1", "Lower Back Strengthening", "2024-01-01T08:00:00Z"),
        entry("2", "Core Stability", "2024-01-02T08:00:00Z"),
        entry("3", "Core Stability", "2024-01-03T08:00:00Z"),
        entry("4", "Core Stability", "2024-01-04T08:00:00Z"),
    ]));

    let stats = ProgressStats::compute(&list, day(2024, 1, 4));
    assert_eq!(stats.favorite_workout, "Core Stability");
}

#[test]
fn test_recent_activity_is_newest_first_and_capped() {
    let entries: Vec<serde_json::Value> = (1..=8)
        .map(|d| {
            json!({
                "id": d.to_string(), "title": format!("W{}", d), "duration": 5,
                "difficulty": "Beginner", "completed": true,
                "completedAt": format!("2024-02-{:02}T12:00:00Z", d)
            })
        })
        .collect();
    let list = workouts(serde_json::Value::Array(entries));

    let stats = ProgressStats::compute(&list, day(2024, 2, 8));
    let titles: Vec<&str> = stats
        .recent_activity
        .iter()
        .map(|e| e.workout.as_str())
        .collect();

    assert_eq!(titles, vec!["W8", "W7", "W6", "W5", "W4"]);
    assert_eq!(stats.recent_activity[0].date, "2024-02-08");
    assert!(stats.recent_activity.iter().all(|e| e.completed));
}

#[test]
fn test_incomplete_list_has_no_streaks() {
    let list = workouts(json!([
        { "id": "1", "title": "A", "duration": "15", "difficulty": "Advanced" }
    ]));

    let stats = ProgressStats::compute(&list, day(2024, 1, 1));
    assert_eq!(stats.completed_count, 0);
    assert_eq!(stats.current_streak, 0);
    assert_eq!(stats.longest_streak, 0);
    assert_eq!(stats.favorite_workout, "None");
    assert_eq!(stats.total_minutes, 15);
    assert!(stats.recent_activity.is_empty());
}

#[test]
fn test_weekly_progress_against_goal() {
    let list = workouts(json!([
        { "id": "1", "title": "A", "duration": 10, "difficulty": "Beginner",
          "completed": true, "completedAt": "2024-01-10" },
        { "id": "2", "title": "B", "duration": 10, "difficulty": "Beginner",
          "completed": true, "completedAt": "2024-01-11" }
    ]));

    let weekly = ProgressStats::compute(&list, day(2024, 1, 11)).weekly_progress(5);
    assert_eq!(weekly.completed, 2);
    assert_eq!(weekly.percent, 40);
}
