// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! File-backed persistence for the credential and the activity ledger.
//!
//! Both files are rewritten wholesale. Writes go to a temporary file in the
//! same directory which is then renamed over the target, so a reader sees
//! either the previous file or the new one.

pub mod activity_cache;
pub mod token_store;

pub use activity_cache::ActivityCache;
pub use token_store::TokenStore;

use std::io::Write;
use std::path::Path;

use crate::error::AppError;

/// Replace `path` with `contents` atomically.
pub fn write_atomic(path: &Path, contents: &[u8]) -> Result<(), AppError> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    std::fs::create_dir_all(dir)
        .map_err(|e| AppError::Storage(format!("create {}: {}", dir.display(), e)))?;

    let mut tmp = tempfile::NamedTempFile::new_in(dir)
        .map_err(|e| AppError::Storage(format!("temp file in {}: {}", dir.display(), e)))?;
    tmp.write_all(contents)
        .and_then(|_| tmp.as_file().sync_all())
        .map_err(|e| AppError::Storage(format!("write {}: {}", path.display(), e)))?;
    tmp.persist(path)
        .map_err(|e| AppError::Storage(format!("replace {}: {}", path.display(), e.error)))?;

    Ok(())
}
