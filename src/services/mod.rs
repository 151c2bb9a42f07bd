// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Services module - business logic layer.

pub mod aggregate;
pub mod render;
pub mod strava;
pub mod sync;

pub use aggregate::{Aggregator, YearOutcome};
pub use render::{CommandRenderer, DataScriptRenderer, Renderer};
pub use strava::{ActivitySource, StravaClient, TokenRefresher};
pub use sync::{SyncEngine, SyncReport};
