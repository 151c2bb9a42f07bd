// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

use std::path::Path;
use std::sync::{Arc, Mutex};

use chrono::{Duration, Utc};
use strava_year::error::AppError;
use strava_year::models::{ActivityMap, ActivityRecord, Credential, LatLon};
use strava_year::services::{ActivitySource, TokenRefresher};
use strava_year::store::TokenStore;

/// Build a run with distance, moving time and start point.
#[allow(dead_code)]
pub fn run(
    id: u64,
    start: &str,
    meters: f64,
    secs: u64,
    start_point: Option<(f64, f64)>,
) -> ActivityRecord {
    let mut record = ActivityRecord::new(id, "Run", start);
    record.name = Some(format!("Run {}", id));
    record.distance_meters = meters;
    record.moving_time_seconds = secs;
    record.start_lat_lon = start_point.map(|(lat, lon)| LatLon { lat, lon });
    record.map = Some(ActivityMap {
        summary_polyline: Some(format!("poly{}", id)),
        ..Default::default()
    });
    record
}

/// Store a credential that is valid for another hour.
#[allow(dead_code)]
pub fn seed_valid_credential(path: &Path) -> Credential {
    let credential = Credential {
        access_token: "valid_access_token".to_string(),
        refresh_token: "valid_refresh_token".to_string(),
        expires_at: Utc::now() + Duration::hours(1),
    };
    TokenStore::new(path).save(&credential).unwrap();
    credential
}

/// One recorded call to [`FakeSource`].
#[allow(dead_code)]
#[derive(Debug, Clone, PartialEq)]
pub struct FetchCall {
    pub access_token: String,
    pub after: Option<String>,
    pub limit: Option<usize>,
}

/// In-memory fetch capability.
#[allow(dead_code)]
#[derive(Clone)]
pub struct FakeSource {
    response: Result<Vec<ActivityRecord>, String>,
    pub calls: Arc<Mutex<Vec<FetchCall>>>,
}

#[allow(dead_code)]
impl FakeSource {
    pub fn returning(records: Vec<ActivityRecord>) -> Self {
        Self {
            response: Ok(records),
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn failing(message: &str) -> Self {
        Self {
            response: Err(message.to_string()),
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn calls(&self) -> Vec<FetchCall> {
        self.calls.lock().unwrap().clone()
    }
}

impl ActivitySource for FakeSource {
    async fn fetch_activities(
        &self,
        access_token: &str,
        after: Option<&str>,
        limit: Option<usize>,
    ) -> Result<Vec<ActivityRecord>, AppError> {
        self.calls.lock().unwrap().push(FetchCall {
            access_token: access_token.to_string(),
            after: after.map(str::to_string),
            limit,
        });
        let mut records = self.response.clone().map_err(AppError::FetchFailed)?;
        if let Some(limit) = limit {
            records.truncate(limit);
        }
        Ok(records)
    }
}

/// In-memory refresh capability.
#[allow(dead_code)]
#[derive(Clone)]
pub struct FakeRefresher {
    response: Result<Credential, String>,
    pub calls: Arc<Mutex<usize>>,
}

#[allow(dead_code)]
impl FakeRefresher {
    pub fn returning(credential: Credential) -> Self {
        Self {
            response: Ok(credential),
            calls: Arc::new(Mutex::new(0)),
        }
    }

    pub fn failing(message: &str) -> Self {
        Self {
            response: Err(message.to_string()),
            calls: Arc::new(Mutex::new(0)),
        }
    }

    pub fn unused() -> Self {
        Self::failing("refresh should not be called")
    }

    pub fn call_count(&self) -> usize {
        *self.calls.lock().unwrap()
    }
}

impl TokenRefresher for FakeRefresher {
    async fn refresh(&self, _refresh_token: &str) -> Result<Credential, AppError> {
        *self.calls.lock().unwrap() += 1;
        self.response.clone().map_err(AppError::RefreshFailed)
    }
}
