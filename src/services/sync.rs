// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Incremental sync of the activity ledger.
//!
//! Handles the core workflow:
//! 1. Load the credential and refresh it if it is about to expire
//! 2. Find the cursor (latest `start_date_local` in the ledger)
//! 3. Fetch everything newer from Strava
//! 4. Merge by activity ID, remote copy wins
//! 5. Rewrite the ledger (skipped when nothing was fetched)

use std::collections::HashMap;

use crate::error::Result;
use crate::models::{ActivityRecord, Credential};
use crate::services::strava::{ActivitySource, TokenRefresher};
use crate::store::activity_cache::sort_records;
use crate::store::{ActivityCache, TokenStore};

/// Drives one sync run against the ledger file.
pub struct SyncEngine<S, R> {
    token_store: TokenStore,
    cache: ActivityCache,
    source: S,
    refresher: R,
}

/// Outcome of a sync run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyncReport {
    /// Cursor the fetch started after
    pub cursor: Option<String>,
    /// Records returned by the fetch
    pub fetched: usize,
    /// Ledger size after the run
    pub total: usize,
    /// Whether the ledger file was rewritten
    pub persisted: bool,
}

impl<S: ActivitySource, R: TokenRefresher> SyncEngine<S, R> {
    pub fn new(token_store: TokenStore, cache: ActivityCache, source: S, refresher: R) -> Self {
        Self {
            token_store,
            cache,
            source,
            refresher,
        }
    }

    /// Run one full sync.
    ///
    /// Credential errors abort before any fetch, fetch errors abort before any
    /// merge, and a failed write leaves the previous ledger file in place.
    pub async fn sync(&self, limit: Option<usize>) -> Result<SyncReport> {
        let credential = self.token_store.load()?;
        let credential = self
            .token_store
            .ensure_fresh(credential, &self.refresher)
            .await?;

        let cached = self.cache.load()?;
        let cursor = determine_cursor(&cached);
        match &cursor {
            Some(after) => tracing::info!(cursor = %after, "Checking for activities after cursor"),
            None => tracing::info!(
                ?limit,
                "No cached activities found, downloading all (or up to limit)"
            ),
        }

        let fresh = fetch_new(&self.source, cursor.as_deref(), &credential, limit).await?;
        tracing::info!(fetched = fresh.len(), "Downloaded new activities");

        if fresh.is_empty() {
            tracing::info!("No new activities to save");
            return Ok(SyncReport {
                cursor,
                fetched: 0,
                total: cached.len(),
                persisted: false,
            });
        }

        let fetched = fresh.len();
        let mut merged = merge(cached, fresh);
        self.cache.persist(&mut merged)?;

        Ok(SyncReport {
            cursor,
            fetched,
            total: merged.len(),
            persisted: true,
        })
    }
}

/// `start_date_local` of the chronologically last record, if any.
///
/// Does not trust the on-disk order of the ledger.
pub fn determine_cursor(cache: &[ActivityRecord]) -> Option<String> {
    cache
        .iter()
        .map(|r| r.start_time_local.as_str())
        .max()
        .map(str::to_string)
}

/// Fetch everything after `cursor` with a borrowed credential.
pub async fn fetch_new<S: ActivitySource>(
    source: &S,
    cursor: Option<&str>,
    credential: &Credential,
    limit: Option<usize>,
) -> Result<Vec<ActivityRecord>> {
    let records = source
        .fetch_activities(&credential.access_token, cursor, limit)
        .await
        .inspect_err(|e| tracing::error!(error = %e, "Error fetching activities"))?;

    for record in &records {
        tracing::debug!(
            id = record.id,
            name = record.name.as_deref().unwrap_or(""),
            start = %record.start_time_local,
            "Fetched activity"
        );
    }
    Ok(records)
}

/// Union by activity ID; on conflict the fetched record replaces the cached one.
///
/// The result is sorted the way the ledger is stored.
pub fn merge(cache: Vec<ActivityRecord>, fresh: Vec<ActivityRecord>) -> Vec<ActivityRecord> {
    let mut by_id: HashMap<u64, ActivityRecord> = cache.into_iter().map(|r| (r.id, r)).collect();
    for record in fresh {
        by_id.insert(record.id, record);
    }

    let mut merged: Vec<ActivityRecord> = by_id.into_values().collect();
    sort_records(&mut merged);
    merged
}
