// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Shared helpers for date/time formatting.
//!
//! Strava reports `start_date_local` as local wall-clock time but with a
//! literal `Z` suffix. The string is kept untouched; these helpers only read it.

use chrono::{DateTime, Datelike, NaiveDateTime, SecondsFormat, Utc};

/// Fixed format of `start_date_local`, e.g. `2025-01-05T06:20:35Z`.
pub const LOCAL_START_FORMAT: &str = "%Y-%m-%dT%H:%M:%SZ";

/// A timestamp that does not match [`LOCAL_START_FORMAT`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unparseable timestamp: {0:?}")]
pub struct TimestampError(pub String);

/// Format a UTC timestamp as RFC3339 using a `Z` suffix.
pub fn format_utc_rfc3339(date: DateTime<Utc>) -> String {
    date.to_rfc3339_opts(SecondsFormat::Secs, true)
}

/// Parse a `start_date_local` value as a naive wall-clock time.
pub fn parse_local_start(value: &str) -> Result<NaiveDateTime, TimestampError> {
    NaiveDateTime::parse_from_str(value, LOCAL_START_FORMAT)
        .map_err(|_| TimestampError(value.to_string()))
}

/// Calendar year of a `start_date_local` value.
pub fn local_start_year(value: &str) -> Result<i32, TimestampError> {
    parse_local_start(value).map(|dt| dt.year())
}

/// ISO (year, week) pair of a `start_date_local` value.
pub fn local_start_iso_week(value: &str) -> Result<(i32, u32), TimestampError> {
    let week = parse_local_start(value)?.iso_week();
    Ok((week.year(), week.week()))
}

/// Interpret a `start_date_local` cursor as epoch seconds for the `after` query.
///
/// The suffix is taken at face value, so the result is off by the athlete's
/// UTC offset. Overlap at the boundary is absorbed by the merge.
pub fn cursor_epoch_seconds(value: &str) -> Result<i64, TimestampError> {
    parse_local_start(value).map(|dt| dt.and_utc().timestamp())
}
