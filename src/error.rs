// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Application error types.

use std::path::PathBuf;

use crate::config::ConfigError;

/// Application error type shared by the sync and aggregation paths.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("No stored Strava credential")]
    MissingCredential,

    #[error("Token refresh failed: {0}")]
    RefreshFailed(String),

    #[error("Fetching activities failed: {0}")]
    FetchFailed(String),

    #[error("Authorization failed: {0}")]
    AuthorizationFailed(String),

    #[error("Input file not found: {}", .0.display())]
    MissingInput(PathBuf),

    #[error("Activity cache is corrupt: {0}")]
    CacheCorrupt(String),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Rendering failed: {0}")]
    RenderFailed(String),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("Internal error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl AppError {
    /// Marker string for upstream 401 responses.
    pub const STRAVA_TOKEN_ERROR: &'static str = "Strava token invalid or expired";
    /// Marker string for upstream 429 responses.
    pub const STRAVA_RATE_LIMIT: &'static str = "Strava rate limit exceeded";

    /// Whether the process should exit non-zero for this error.
    ///
    /// Everything that reaches the CLI is fatal except a rendering failure,
    /// which is reported but leaves the written payload in place.
    pub fn is_fatal(&self) -> bool {
        !matches!(self, AppError::RenderFailed(_))
    }

    /// Process exit status: 1 for fatal errors, 0 otherwise.
    pub fn exit_status(&self) -> u8 {
        u8::from(self.is_fatal())
    }

    /// Whether the fix is to run `strava-year auth` again.
    pub fn needs_reauthorization(&self) -> bool {
        matches!(self, AppError::MissingCredential) || self.is_strava_token_error()
    }

    /// Whether the upstream rejected our credential.
    pub fn is_strava_token_error(&self) -> bool {
        match self {
            AppError::RefreshFailed(msg) | AppError::FetchFailed(msg) => {
                msg.contains(Self::STRAVA_TOKEN_ERROR)
                    || msg.contains("invalid_grant")
                    || msg.contains("Authorization Error")
            }
            _ => false,
        }
    }
}

/// Result type alias for the crate.
pub type Result<T> = std::result::Result<T, AppError>;
