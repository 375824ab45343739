// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Step-by-step progress through one workout's exercises.

use crate::models::{Exercise, WorkoutRecord};

/// Cursor over a workout's exercises.
#[derive(Debug, Clone)]
pub struct WorkoutRun<'a> {
    workout: &'a WorkoutRecord,
    step: usize,
    finished: bool,
}

impl<'a> WorkoutRun<'a> {
    /// Start at the first exercise. A workout without exercises is finished
    /// from the start.
    pub fn new(workout: &'a WorkoutRecord) -> Self {
        Self {
            workout,
            step: 0,
            finished: workout.exercises.is_empty(),
        }
    }

    pub fn workout(&self) -> &'a WorkoutRecord {
        self.workout
    }

    /// Exercise being performed; `None` once finished.
    pub fn current(&self) -> Option<&'a Exercise> {
        if self.finished {
            None
        } else {
            self.workout.exercises.get(self.step)
        }
    }

    /// Zero-based index of the current exercise.
    pub fn step(&self) -> usize {
        self.step
    }

    /// Advance to the next exercise, finishing after the last one.
    pub fn next(&mut self) -> Option<&'a Exercise> {
        if self.finished {
            return None;
        }
        if self.step + 1 < self.workout.exercises.len() {
            self.step += 1;
        } else {
            self.finished = true;
        }
        self.current()
    }

    /// Go back one exercise; stays put on the first.
    pub fn previous(&mut self) -> Option<&'a Exercise> {
        if !self.finished && self.step > 0 {
            self.step -= 1;
        }
        self.current()
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }
}
