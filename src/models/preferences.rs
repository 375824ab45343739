// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Per-user app preferences.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

/// Stored names of the preferences this build understands.
pub const KNOWN_KEYS: [&str; 9] = [
    "workoutReminders",
    "progressUpdates",
    "injuryAlerts",
    "darkMode",
    "shareProgress",
    "dataAnalytics",
    "units",
    "language",
    "autoSync",
];

/// Measurement system for displayed values.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "bindings/")
)]
#[serde(rename_all = "lowercase")]
pub enum Units {
    #[default]
    Metric,
    Imperial,
}

/// Preference document stored under `appSettings_<userId>`.
///
/// Every field has a default, so a document written before a field existed
/// still decodes with that field at its default value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Preferences {
    pub workout_reminders: bool,
    pub progress_updates: bool,
    pub injury_alerts: bool,
    pub dark_mode: bool,
    pub share_progress: bool,
    pub data_analytics: bool,
    pub units: Units,
    pub language: String,
    pub auto_sync: bool,
    /// Keys this build does not know about, kept so they survive a rewrite.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Default for Preferences {
    fn default() -> Self {
        Self {
            workout_reminders: true,
            progress_updates: true,
            injury_alerts: true,
            dark_mode: false,
            share_progress: false,
            data_analytics: true,
            units: Units::Metric,
            language: "en".to_string(),
            auto_sync: true,
            extra: Map::new(),
        }
    }
}

impl Preferences {
    /// Merge a stored document over the defaults, key by key.
    ///
    /// A known key with a value of the wrong type keeps its default instead
    /// of discarding the whole document.
    pub fn merged_over_defaults(stored: &Map<String, Value>) -> Self {
        let mut prefs = Self::default();
        for (key, value) in stored {
            let patch = Map::from_iter([(key.clone(), value.clone())]);
            match serde_json::from_value::<PreferenceUpdate>(Value::Object(patch)) {
                Ok(update) if !update.is_empty() => prefs.apply(update),
                // null for a known key
                Ok(_) if KNOWN_KEYS.contains(&key.as_str()) => {}
                Ok(_) => {
                    prefs.extra.insert(key.clone(), value.clone());
                }
                Err(e) => {
                    tracing::warn!(key = %key, error = %e, "Ignoring malformed preference value");
                }
            }
        }
        prefs
    }

    /// Overlay the fields present in `update`.
    pub fn apply(&mut self, update: PreferenceUpdate) {
        let PreferenceUpdate {
            workout_reminders,
            progress_updates,
            injury_alerts,
            dark_mode,
            share_progress,
            data_analytics,
            units,
            language,
            auto_sync,
        } = update;

        if let Some(v) = workout_reminders {
            self.workout_reminders = v;
        }
        if let Some(v) = progress_updates {
            self.progress_updates = v;
        }
        if let Some(v) = injury_alerts {
            self.injury_alerts = v;
        }
        if let Some(v) = dark_mode {
            self.dark_mode = v;
        }
        if let Some(v) = share_progress {
            self.share_progress = v;
        }
        if let Some(v) = data_analytics {
            self.data_analytics = v;
        }
        if let Some(v) = units {
            self.units = v;
        }
        if let Some(v) = language {
            self.language = v;
        }
        if let Some(v) = auto_sync {
            self.auto_sync = v;
        }
    }
}

/// Partial preference change; `None` fields are left alone.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PreferenceUpdate {
    pub workout_reminders: Option<bool>,
    pub progress_updates: Option<bool>,
    pub injury_alerts: Option<bool>,
    pub dark_mode: Option<bool>,
    pub share_progress: Option<bool>,
    pub data_analytics: Option<bool>,
    pub units: Option<Units>,
    pub language: Option<String>,
    pub auto_sync: Option<bool>,
}

impl PreferenceUpdate {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Build a single-key update from a `key=value` pair as typed by a user.
    ///
    /// Keys are the stored camelCase names.
    pub fn from_pair(key: &str, value: &str) -> Option<Self> {
        let value = value.trim();
        let json = match key {
            "units" | "language" => Value::String(value.to_string()),
            _ => Value::Bool(value.parse().ok()?),
        };
        let update: Self =
            serde_json::from_value(Value::Object(Map::from_iter([(key.to_string(), json)])))
                .ok()?;
        (!update.is_empty()).then_some(update)
    }
}
