// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Services module - state and operations on top of the record store.

pub mod catalog;
pub mod preferences;
pub mod session;
pub mod workout_run;

pub use catalog::WorkoutCatalog;
pub use preferences::PreferenceStore;
pub use session::SessionManager;
pub use workout_run::WorkoutRun;
