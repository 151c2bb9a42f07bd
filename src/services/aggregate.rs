// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Yearly statistics over the activity ledger.

use std::collections::HashSet;

use crate::models::summary::WEEKS_PER_YEAR;
use crate::models::{
    ActivityRecord, BoundingBox, CleanedRun, SummaryPayload, YearStats, YearSummary,
};
use crate::time_utils::{local_start_iso_week, local_start_year};

/// Activity type the summary is built for by default.
pub const DEFAULT_KIND: &str = "Run";

/// Result of summarizing one year.
#[derive(Debug, Clone, PartialEq)]
pub enum YearOutcome {
    /// No activity of the requested kind in that year.
    NoData { year: i32 },
    Summary(Box<YearSummary>),
}

/// Read-only aggregation over a ledger snapshot.
pub struct Aggregator<'a> {
    records: &'a [ActivityRecord],
    kind: String,
    bounding_box: BoundingBox,
}

impl<'a> Aggregator<'a> {
    pub fn new(records: &'a [ActivityRecord], kind: &str, bounding_box: BoundingBox) -> Self {
        Self {
            records,
            kind: kind.to_string(),
            bounding_box,
        }
    }

    /// Stats and render payload for `year`.
    pub fn summarize(&self, year: i32) -> YearOutcome {
        let selected = select_year(self.records, year, &self.kind);
        tracing::info!(year, kind = %self.kind, count = selected.len(), "Selected activities");

        if selected.is_empty() {
            return YearOutcome::NoData { year };
        }

        let stats = compute_stats(&selected);
        let main_area = filter_by_bounding_box(&selected, &self.bounding_box);
        tracing::info!(
            total_runs = stats.total_runs,
            active_weeks = stats.active_weeks,
            main_area = main_area.len(),
            "Computed yearly stats"
        );

        let payload = build_payload(year, &selected, &main_area, &stats, self.bounding_box);
        YearOutcome::Summary(Box::new(YearSummary { stats, payload }))
    }
}

/// Records of `kind` whose `start_date_local` falls in `year`.
///
/// Records with an unparseable timestamp are skipped with a warning.
pub fn select_year<'a>(
    records: &'a [ActivityRecord],
    year: i32,
    kind: &str,
) -> Vec<&'a ActivityRecord> {
    records
        .iter()
        .filter(|r| r.kind == kind)
        .filter(|r| match local_start_year(&r.start_time_local) {
            Ok(y) => y == year,
            Err(e) => {
                tracing::warn!(id = r.id, error = %e, "Could not parse date, skipping");
                false
            }
        })
        .collect()
}

/// Summary statistics over already-selected records.
pub fn compute_stats(records: &[&ActivityRecord]) -> YearStats {
    let total_runs = records.len();
    let total_meters: f64 = records.iter().map(|r| r.distance_meters).sum();
    let max_meters = records
        .iter()
        .map(|r| r.distance_meters)
        .fold(0.0_f64, f64::max);
    let total_seconds: u64 = records.iter().map(|r| r.moving_time_seconds).sum();

    let active_weeks: HashSet<(i32, u32)> = records
        .iter()
        .filter_map(|r| local_start_iso_week(&r.start_time_local).ok())
        .collect();

    let total_distance_km = total_meters / 1000.0;
    let avg_distance_km = if total_runs > 0 {
        total_distance_km / total_runs as f64
    } else {
        0.0
    };

    YearStats {
        total_runs,
        total_distance_km,
        max_distance_km: max_meters / 1000.0,
        avg_distance_km,
        runs_per_week: total_runs as f64 / WEEKS_PER_YEAR,
        avg_pace: format_pace(total_seconds, total_meters),
        active_weeks: active_weeks.len(),
    }
}

/// Average pace as `M:SS /km`, both parts truncated.
///
/// Works in whole seconds per kilometre so that e.g. 303 s/km is `5:03`
/// rather than drifting to `5:02` through a fractional-minute intermediate.
pub fn format_pace(total_seconds: u64, total_meters: f64) -> String {
    if total_meters <= 0.0 {
        return "0:00 /km".to_string();
    }

    let secs_per_km = total_seconds as f64 * 1000.0 / total_meters;
    let minutes = (secs_per_km / 60.0).trunc();
    let seconds = (secs_per_km - minutes * 60.0).trunc();
    format!("{}:{:02} /km", minutes as u64, seconds as u64)
}

/// Records whose start point lies inside `bbox` (edges included).
pub fn filter_by_bounding_box<'a>(
    records: &[&'a ActivityRecord],
    bbox: &BoundingBox,
) -> Vec<&'a ActivityRecord> {
    records
        .iter()
        .copied()
        .filter(|r| r.start_lat_lon.is_some_and(|p| bbox.contains(p)))
        .collect()
}

/// Project records to `{summary_polyline, date}` and assemble the payload.
pub fn build_payload(
    year: i32,
    records: &[&ActivityRecord],
    main_area: &[&ActivityRecord],
    stats: &YearStats,
    bounding_box: BoundingBox,
) -> SummaryPayload {
    SummaryPayload {
        year,
        runs: records.iter().map(|r| CleanedRun::from(*r)).collect(),
        main_area_runs: main_area.iter().map(|r| CleanedRun::from(*r)).collect(),
        stats: stats.formatted(),
        bounding_box,
    }
}
