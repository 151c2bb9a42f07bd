// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Yearly summary statistics and the payload handed to the renderer.

use serde::Serialize;

use crate::models::{ActivityRecord, BoundingBox};

/// Weeks per year used for `runs_per_week`.
pub const WEEKS_PER_YEAR: f64 = 52.0;

/// Statistics over one year of activities of a single kind.
#[derive(Debug, Clone, PartialEq)]
pub struct YearStats {
    pub total_runs: usize,
    pub total_distance_km: f64,
    pub max_distance_km: f64,
    pub avg_distance_km: f64,
    /// Always `total_runs / 52`
    pub runs_per_week: f64,
    /// `M:SS /km`
    pub avg_pace: String,
    /// Distinct ISO weeks with at least one activity (not emitted)
    pub active_weeks: usize,
}

impl YearStats {
    /// Display strings in the shape the summary template expects.
    pub fn formatted(&self) -> FormattedStats {
        FormattedStats {
            total_runs: self.total_runs.to_string(),
            total_distance: format!("{:.1} km", self.total_distance_km),
            max_distance: format!("{:.1} km", self.max_distance_km),
            avg_distance: format!("{:.1} km", self.avg_distance_km),
            runs_per_week: format!("{:.1}", self.runs_per_week),
            avg_pace: self.avg_pace.clone(),
        }
    }
}

/// Stats block of the render payload.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FormattedStats {
    pub total_runs: String,
    pub total_distance: String,
    pub max_distance: String,
    pub avg_distance: String,
    pub runs_per_week: String,
    pub avg_pace: String,
}

/// Activity reduced to what the map needs.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CleanedRun {
    #[serde(rename = "summary_polyline")]
    pub polyline: Option<String>,
    pub date: String,
}

impl From<&ActivityRecord> for CleanedRun {
    fn from(record: &ActivityRecord) -> Self {
        Self {
            polyline: record.summary_polyline().map(str::to_string),
            date: record.start_time_local.clone(),
        }
    }
}

/// Everything the rendering collaborator receives.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SummaryPayload {
    pub year: i32,
    pub runs: Vec<CleanedRun>,
    #[serde(rename = "mainMapRuns")]
    pub main_area_runs: Vec<CleanedRun>,
    pub stats: FormattedStats,
    pub bounding_box: BoundingBox,
}

/// Full derived summary for one year; the year itself lives on the payload.
#[derive(Debug, Clone, PartialEq)]
pub struct YearSummary {
    pub stats: YearStats,
    pub payload: SummaryPayload,
}
