// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Data models for the application.

pub mod activity;
pub mod bounds;
pub mod credential;
pub mod summary;

pub use activity::{ActivityMap, ActivityRecord, LatLon};
pub use bounds::BoundingBox;
pub use credential::{Credential, TOKEN_REFRESH_MARGIN_SECS};
pub use summary::{CleanedRun, FormattedStats, SummaryPayload, YearStats, YearSummary};
