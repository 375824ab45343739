// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Data models for the application.

pub mod injury;
pub mod preferences;
pub mod stats;
pub mod user;
pub mod workout;

pub use injury::{BodyPart, BODY_PARTS};
pub use preferences::{PreferenceUpdate, Preferences, Units};
pub use stats::{ActivityEntry, ProgressStats, WeeklyProgress};
pub use user::{Session, SessionState, UserAccount};
pub use workout::{sample_workouts, Difficulty, Exercise, WorkoutRecord};
