// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Persisted Strava credential with refresh-before-use.

use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};

use crate::error::{AppError, Result};
use crate::models::Credential;
use crate::services::strava::TokenRefresher;
use crate::store::write_atomic;
use crate::time_utils::format_utc_rfc3339;

/// Owner of the credential file.
#[derive(Debug, Clone)]
pub struct TokenStore {
    path: PathBuf,
}

impl TokenStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the stored credential.
    pub fn load(&self) -> Result<Credential> {
        let raw = match std::fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::error!(path = %self.path.display(), "Credential file not found");
                return Err(AppError::MissingCredential);
            }
            Err(e) => {
                return Err(AppError::Storage(format!(
                    "read {}: {}",
                    self.path.display(),
                    e
                )))
            }
        };

        serde_json::from_str(&raw).map_err(|e| {
            tracing::error!(path = %self.path.display(), error = %e, "Credential file unreadable");
            AppError::MissingCredential
        })
    }

    /// Overwrite the stored credential in full.
    pub fn save(&self, credential: &Credential) -> Result<()> {
        let encoded = serde_json::to_vec_pretty(credential)
            .map_err(|e| AppError::Internal(anyhow::anyhow!("encode credential: {}", e)))?;
        write_atomic(&self.path, &encoded)?;
        tracing::info!(path = %self.path.display(), "Tokens saved");
        Ok(())
    }

    /// Return a credential that is good for at least the refresh margin.
    pub async fn ensure_fresh<R: TokenRefresher>(
        &self,
        credential: Credential,
        refresher: &R,
    ) -> Result<Credential> {
        self.ensure_fresh_at(credential, refresher, Utc::now()).await
    }

    /// [`TokenStore::ensure_fresh`] with an explicit clock.
    pub async fn ensure_fresh_at<R: TokenRefresher>(
        &self,
        credential: Credential,
        refresher: &R,
        now: DateTime<Utc>,
    ) -> Result<Credential> {
        if !credential.needs_refresh_at(now) {
            return Ok(credential);
        }

        tracing::info!(
            expires_at = %format_utc_rfc3339(credential.expires_at),
            "Access token expired or expiring soon, refreshing"
        );

        let refreshed = refresher
            .refresh(&credential.refresh_token)
            .await
            .map_err(|e| match e {
                AppError::RefreshFailed(_) => e,
                other => AppError::RefreshFailed(other.to_string()),
            })?;

        if !refreshed.is_valid_at(now) {
            return Err(AppError::RefreshFailed(
                "refreshed token is already expired".to_string(),
            ));
        }

        self.save(&refreshed)?;
        tracing::info!(
            expires_at = %format_utc_rfc3339(refreshed.expires_at),
            "Token refreshed"
        );
        Ok(refreshed)
    }
}
