// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! The activity ledger file: a JSON array of Strava activities sorted by
//! `start_date_local`.

use std::path::{Path, PathBuf};

use crate::error::{AppError, Result};
use crate::models::ActivityRecord;
use crate::store::write_atomic;

/// Owner of the activity ledger file.
#[derive(Debug, Clone)]
pub struct ActivityCache {
    path: PathBuf,
}

impl ActivityCache {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the ledger; a missing or blank file is an empty ledger.
    ///
    /// A file that exists but does not parse is an error: rewriting it from
    /// an empty ledger would lose history.
    pub fn load(&self) -> Result<Vec<ActivityRecord>> {
        match std::fs::read_to_string(&self.path) {
            Ok(raw) if raw.trim().is_empty() => {
                tracing::warn!(path = %self.path.display(), "Activity cache is empty, starting fresh");
                Ok(Vec::new())
            }
            Ok(raw) => serde_json::from_str(&raw).map_err(|e| {
                AppError::CacheCorrupt(format!("{}: {}", self.path.display(), e))
            }),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(Vec::new()),
            Err(e) => Err(AppError::Storage(format!(
                "read {}: {}",
                self.path.display(),
                e
            ))),
        }
    }

    /// Read the ledger for aggregation, where a missing file is fatal.
    pub fn load_existing(&self) -> Result<Vec<ActivityRecord>> {
        if !self.path.exists() {
            return Err(AppError::MissingInput(self.path.clone()));
        }
        self.load()
    }

    /// Sort and rewrite the whole ledger.
    pub fn persist(&self, records: &mut [ActivityRecord]) -> Result<()> {
        sort_records(records);
        let encoded = serde_json::to_vec_pretty(records)
            .map_err(|e| AppError::Internal(anyhow::anyhow!("encode activities: {}", e)))?;
        write_atomic(&self.path, &encoded)?;
        tracing::info!(
            count = records.len(),
            path = %self.path.display(),
            "Saved activities"
        );
        Ok(())
    }
}

/// Ascending by `start_date_local`, ties broken by ID.
///
/// The fixed-width timestamp format makes lexicographic order chronological.
pub fn sort_records(records: &mut [ActivityRecord]) {
    records.sort_by(|a, b| {
        a.start_time_local
            .cmp(&b.start_time_local)
            .then(a.id.cmp(&b.id))
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_and_blank_files_are_empty() {
        let dir = tempfile::tempdir().unwrap();
        let cache = ActivityCache::new(dir.path().join("activities.json"));
        assert!(cache.load().unwrap().is_empty());

        std::fs::write(cache.path(), "  \n").unwrap();
        assert!(cache.load().unwrap().is_empty());
    }

    #[test]
    fn test_corrupt_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let cache = ActivityCache::new(dir.path().join("activities.json"));
        std::fs::write(cache.path(), "[{\"id\": 1,").unwrap();
        assert!(matches!(cache.load(), Err(AppError::CacheCorrupt(_))));
    }

    #[test]
    fn test_load_existing_requires_file() {
        let dir = tempfile::tempdir().unwrap();
        let cache = ActivityCache::new(dir.path().join("missing.json"));
        assert!(matches!(cache.load_existing(), Err(AppError::MissingInput(_))));
    }

    #[test]
    fn test_persist_sorts_by_local_start() {
        let dir = tempfile::tempdir().unwrap();
        let cache = ActivityCache::new(dir.path().join("activities.json"));
        let mut records = vec![
            ActivityRecord::new(3, "Run", "2025-03-01T07:00:00Z"),
            ActivityRecord::new(1, "Run", "2024-12-31T07:00:00Z"),
            ActivityRecord::new(2, "Run", "2025-01-15T07:00:00Z"),
        ];

        cache.persist(&mut records).unwrap();

        let ids: Vec<u64> = cache.load().unwrap().iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![1, 2, 3]);
    }
}
