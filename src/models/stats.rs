//! Progress statistics derived from a user's workout list.
//!
//! Nothing here is persisted: every value is recomputed from the live list
//! so it can never go stale.

use chrono::{NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

use crate::models::WorkoutRecord;
use crate::time_utils::{calendar_day, format_day};

/// Number of entries in the recent activity feed.
pub const RECENT_ACTIVITY_LIMIT: usize = 5;

/// Shown when nothing has been completed yet.
pub const NO_FAVORITE: &str = "None";

/// One line of the recent activity feed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "bindings/")
)]
pub struct ActivityEntry {
    /// 1-based rank, newest first
    pub id: usize,
    /// Workout title
    pub workout: String,
    /// Completion day ("YYYY-MM-DD")
    pub date: String,
    /// Minutes
    pub duration: u32,
    pub completed: bool,
}

/// Statistics for the progress screen.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "bindings/")
)]
pub struct ProgressStats {
    // ─── Totals ──────────────────────────────────────────────────
    /// Records marked completed
    pub completed_count: usize,
    /// Records in the list
    pub total_workouts: usize,
    /// Duration summed over every record, completed or not
    pub total_minutes: u64,

    // ─── Streaks ─────────────────────────────────────────────────
    /// Consecutive days with a completion, ending today
    pub current_streak: u32,
    /// Longest run of consecutive completion days
    pub longest_streak: u32,

    // ─── Highlights ──────────────────────────────────────────────
    /// Most completed title, or "None"
    pub favorite_workout: String,
    /// Latest completions, newest first
    pub recent_activity: Vec<ActivityEntry>,
}

/// Completions measured against the weekly goal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "bindings/")
)]
pub struct WeeklyProgress {
    pub completed: usize,
    pub goal: u32,
    /// Rounded, may exceed 100
    pub percent: u32,
}

impl ProgressStats {
    /// Compute statistics as of `today`.
    pub fn compute(workouts: &[WorkoutRecord], today: NaiveDate) -> Self {
        let completion_days: BTreeSet<NaiveDate> = workouts
            .iter()
            .filter(|w| w.completed)
            .filter_map(|w| w.completed_at.map(calendar_day))
            .collect();

        Self {
            completed_count: workouts.iter().filter(|w| w.completed).count(),
            total_workouts: workouts.len(),
            total_minutes: workouts.iter().map(|w| u64::from(w.duration)).sum(),
            current_streak: current_streak(&completion_days, today),
            longest_streak: longest_streak(&completion_days),
            favorite_workout: favorite_workout(workouts),
            recent_activity: recent_activity(workouts),
        }
    }

    /// Compute statistics as of the current UTC day.
    pub fn today(workouts: &[WorkoutRecord]) -> Self {
        Self::compute(workouts, Utc::now().date_naive())
    }

    /// Progress towards a weekly goal of `goal` workouts.
    pub fn weekly_progress(&self, goal: u32) -> WeeklyProgress {
        let percent = if goal == 0 {
            0
        } else {
            (self.completed_count as f64 / f64::from(goal) * 100.0).round() as u32
        };
        WeeklyProgress {
            completed: self.completed_count,
            goal,
            percent,
        }
    }
}

/// Walk back from `today` one day at a time while each day has a completion.
fn current_streak(days: &BTreeSet<NaiveDate>, today: NaiveDate) -> u32 {
    let mut streak = 0;
    let mut day = Some(today);
    while let Some(d) = day.filter(|d| days.contains(d)) {
        streak += 1;
        day = d.pred_opt();
    }
    streak
}

/// Longest run of consecutive days in an ascending set.
fn longest_streak(days: &BTreeSet<NaiveDate>) -> u32 {
    let mut longest = 0;
    let mut run = 0;
    let mut previous: Option<NaiveDate> = None;

    for &day in days {
        run = match previous {
            Some(prev) if prev.succ_opt() == Some(day) => run + 1,
            _ => 1,
        };
        longest = longest.max(run);
        previous = Some(day);
    }

    longest
}

/// Title with the most completions; ties go to the first title seen.
fn favorite_workout(workouts: &[WorkoutRecord]) -> String {
    let mut counts: Vec<(&str, u32)> = Vec::new();
    for workout in workouts.iter().filter(|w| w.completed) {
        match counts.iter_mut().find(|(title, _)| *title == workout.title) {
            Some((_, count)) => *count += 1,
            None => counts.push((workout.title.as_str(), 1)),
        }
    }

    let mut best: Option<(&str, u32)> = None;
    for (title, count) in counts {
        if best.map_or(true, |(_, top)| count > top) {
            best = Some((title, count));
        }
    }

    best.map_or_else(|| NO_FAVORITE.to_string(), |(title, _)| title.to_string())
}

fn recent_activity(workouts: &[WorkoutRecord]) -> Vec<ActivityEntry> {
    let mut completed: Vec<&WorkoutRecord> = workouts
        .iter()
        .filter(|w| w.completed && w.completed_at.is_some())
        .collect();
    completed.sort_by(|a, b| b.completed_at.cmp(&a.completed_at));

    completed
        .into_iter()
        .take(RECENT_ACTIVITY_LIMIT)
        .enumerate()
        .filter_map(|(i, w)| {
            let at = w.completed_at?;
            Some(ActivityEntry {
                id: i + 1,
                workout: w.title.clone(),
                date: format_day(calendar_day(at)),
                duration: w.duration,
                completed: true,
            })
        })
        .collect()
}
