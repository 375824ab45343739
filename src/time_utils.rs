// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Shared helpers for date/time formatting.

use chrono::{DateTime, NaiveDate, SecondsFormat, Utc};

/// Format a UTC timestamp as RFC3339 with millisecond precision and a `Z` suffix.
pub fn format_utc_rfc3339(date: DateTime<Utc>) -> String {
    date.to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Calendar day of a timestamp, ignoring time-of-day.
pub fn calendar_day(date: DateTime<Utc>) -> NaiveDate {
    date.date_naive()
}

/// Format a calendar day as `YYYY-MM-DD`.
pub fn format_day(day: NaiveDate) -> String {
    day.format("%Y-%m-%d").to_string()
}
