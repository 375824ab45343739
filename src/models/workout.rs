// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Workout record model and the static sample catalog.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Deserializer, Serialize};

/// How demanding a workout is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Difficulty {
    Beginner,
    Intermediate,
    Advanced,
    /// Any label written by a newer or older app build.
    #[serde(other)]
    Other,
}

/// One step of a workout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Exercise {
    pub name: String,
    /// Minutes
    #[serde(deserialize_with = "minutes")]
    pub duration: u32,
    pub instructions: String,
}

/// Stored workout record, one entry of the `workouts_<userId>` document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkoutRecord {
    pub id: String,
    pub title: String,
    /// Minutes
    #[serde(deserialize_with = "minutes")]
    pub duration: u32,
    pub difficulty: Difficulty,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub exercises: Vec<Exercise>,
    /// Injuries this workout is suitable for
    #[serde(default)]
    pub injuries: Vec<String>,
    #[serde(default)]
    pub completed: bool,
    #[serde(
        default,
        deserialize_with = "completion_time",
        skip_serializing_if = "Option::is_none"
    )]
    pub completed_at: Option<DateTime<Utc>>,
}

impl WorkoutRecord {
    /// Whether any of the given injuries appears in this workout's tags.
    pub fn applies_to(&self, injuries: &[String]) -> bool {
        self.injuries.iter().any(|tag| injuries.contains(tag))
    }

    /// Mark completed at `at`; a repeat completion moves the timestamp forward.
    pub fn mark_completed(&mut self, at: DateTime<Utc>) {
        self.completed = true;
        self.completed_at = Some(at);
    }
}

/// Minutes may have been stored as a number or a numeric string.
fn minutes<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Minutes {
        Number(u32),
        Float(f64),
        Text(String),
    }

    match Minutes::deserialize(deserializer)? {
        Minutes::Number(n) => Ok(n),
        Minutes::Float(f) if f.is_finite() && f >= 0.0 => Ok(f.trunc() as u32),
        Minutes::Float(f) => Err(serde::de::Error::custom(format!(
            "invalid duration: {}",
            f
        ))),
        Minutes::Text(s) => s
            .trim()
            .parse()
            .map_err(|_| serde::de::Error::custom(format!("invalid duration: {:?}", s))),
    }
}

/// Completion timestamps are RFC3339, or a bare `YYYY-MM-DD` read as midnight UTC.
fn completion_time<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    let Some(raw) = Option::<String>::deserialize(deserializer)? else {
        return Ok(None);
    };

    if let Ok(at) = DateTime::parse_from_rfc3339(&raw) {
        return Ok(Some(at.with_timezone(&Utc)));
    }

    NaiveDate::parse_from_str(&raw, "%Y-%m-%d")
        .ok()
        .and_then(|day| day.and_hms_opt(0, 0, 0))
        .map(|midnight| Some(midnight.and_utc()))
        .ok_or_else(|| serde::de::Error::custom(format!("invalid completedAt: {:?}", raw)))
}

fn exercise(name: &str, duration: u32, instructions: &str) -> Exercise {
    Exercise {
        name: name.to_string(),
        duration,
        instructions: instructions.to_string(),
    }
}

fn tags(injuries: &[&str]) -> Vec<String> {
    injuries.iter().map(|s| s.to_string()).collect()
}

/// The catalog every user starts from.
pub fn sample_workouts() -> Vec<WorkoutRecord> {
    vec![
        WorkoutRecord {
            id: "1".to_string(),
            title: "Lower Back Strengthening".to_string(),
            duration: 25,
            difficulty: Difficulty::Beginner,
            description: "Gentle exercises to strengthen your lower back and improve posture"
                .to_string(),
            category: "Back".to_string(),
            exercises: vec![
                exercise("Cat-Cow Stretch", 2, "Move between arching and rounding your back for 2 minutes."),
                exercise("Bird Dog", 3, "Extend opposite arm and leg, hold for a few seconds, alternate sides."),
                exercise("Glute Bridge", 3, "Lift hips up, squeeze glutes, hold for a second, lower down."),
                exercise("Dead Bug", 3, "Lower opposite arm and leg, keep core tight, alternate sides."),
                exercise("Modified Plank", 2, "Hold a plank position on your knees and elbows."),
            ],
            injuries: tags(&["Lower Back Strain", "Herniated Disc", "Sciatica"]),
            completed: false,
            completed_at: None,
        },
        WorkoutRecord {
            id: "2".to_string(),
            title: "Core Stability".to_string(),
            duration: 30,
            difficulty: Difficulty::Intermediate,
            description: "Focus on core stability to prevent injuries and improve balance"
                .to_string(),
            category: "Core".to_string(),
            exercises: vec![
                exercise("Plank", 3, "Hold a plank position on your forearms and toes."),
                exercise("Side Plank", 2, "Hold a side plank position on each side."),
                exercise("Russian Twists", 3, "Sit with feet off the ground, twist torso side to side."),
                exercise("Bird Dog", 3, "Extend opposite arm and leg, hold for a few seconds, alternate sides."),
                exercise("Glute Bridge", 3, "Lift hips up, squeeze glutes, hold for a second, lower down."),
            ],
            injuries: tags(&[
                "Lower Back Strain",
                "Herniated Disc",
                "Sciatica",
                "ACL Tear",
                "Meniscus Tear",
            ]),
            completed: false,
            completed_at: None,
        },
        WorkoutRecord {
            id: "3".to_string(),
            title: "Shoulder Mobility".to_string(),
            duration: 20,
            difficulty: Difficulty::Beginner,
            description: "Restore range of motion and stabilise the rotator cuff".to_string(),
            category: "Shoulders".to_string(),
            exercises: vec![
                exercise("Pendulum Swings", 2, "Lean forward and let the arm swing in small circles."),
                exercise("Wall Slides", 3, "Slide forearms up the wall keeping elbows in contact."),
                exercise("Band External Rotation", 3, "Keep the elbow at your side and rotate the forearm outward."),
                exercise("Scapular Squeezes", 2, "Pull shoulder blades together, hold, release."),
            ],
            injuries: tags(&["Rotator Cuff Injury", "Impingement", "Dislocation"]),
            completed: false,
            completed_at: None,
        },
        WorkoutRecord {
            id: "4".to_string(),
            title: "Knee Stability".to_string(),
            duration: 25,
            difficulty: Difficulty::Intermediate,
            description: "Build strength around the knee to protect ligaments and cartilage"
                .to_string(),
            category: "Legs".to_string(),
            exercises: vec![
                exercise("Quad Sets", 2, "Tighten the thigh with the leg straight, hold for five seconds."),
                exercise("Straight Leg Raise", 3, "Lift the straight leg to the height of the opposite knee."),
                exercise("Mini Squats", 3, "Bend knees slightly, keep them over the toes, return."),
                exercise("Step-Ups", 3, "Step onto a low platform leading with the affected leg."),
            ],
            injuries: tags(&["ACL Tear", "Meniscus Tear"]),
            completed: false,
            completed_at: None,
        },
        WorkoutRecord {
            id: "5".to_string(),
            title: "Ankle and Foot Recovery".to_string(),
            duration: 15,
            difficulty: Difficulty::Beginner,
            description: "Rebuild balance and mobility after sprains".to_string(),
            category: "Feet".to_string(),
            exercises: vec![
                exercise("Ankle Alphabet", 3, "Trace the alphabet in the air with your toes."),
                exercise("Towel Scrunches", 2, "Pull a towel towards you by curling your toes."),
                exercise("Single Leg Balance", 3, "Stand on one foot, progress to eyes closed."),
            ],
            injuries: tags(&["Sprain"]),
            completed: false,
            completed_at: None,
        },
        WorkoutRecord {
            id: "6".to_string(),
            title: "Neck Relief".to_string(),
            duration: 10,
            difficulty: Difficulty::Beginner,
            description: "Ease tension and restore neck mobility".to_string(),
            category: "Neck".to_string(),
            exercises: vec![
                exercise("Chin Tucks", 2, "Draw the chin straight back, hold, release."),
                exercise("Side Bends", 2, "Tilt ear towards shoulder on each side."),
                exercise("Isometric Holds", 3, "Press head into your palm without moving."),
            ],
            injuries: tags(&["Strain", "Whiplash"]),
            completed: false,
            completed_at: None,
        },
    ]
}
