// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Strava OAuth credential triple.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

/// Margin before token expiration when we proactively refresh (5 minutes).
pub const TOKEN_REFRESH_MARGIN_SECS: i64 = 5 * 60;

/// Access/refresh token pair with absolute expiry.
///
/// Persisted as `{"access_token", "refresh_token", "expires_at"}` with
/// `expires_at` in epoch seconds, the shape Strava's token endpoint returns.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credential {
    pub access_token: String,
    pub refresh_token: String,
    #[serde(with = "chrono::serde::ts_seconds")]
    pub expires_at: DateTime<Utc>,
}

impl Credential {
    /// Build a credential from Strava's epoch-seconds expiry.
    pub fn from_epoch(access_token: String, refresh_token: String, expires_at: i64) -> Self {
        Self {
            access_token,
            refresh_token,
            expires_at: DateTime::from_timestamp(expires_at, 0).unwrap_or_default(),
        }
    }

    /// Usable right now (not yet expired).
    pub fn is_valid_at(&self, now: DateTime<Utc>) -> bool {
        now < self.expires_at
    }

    /// Expires within the refresh margin (or already has).
    pub fn needs_refresh_at(&self, now: DateTime<Utc>) -> bool {
        self.expires_at - now < Duration::seconds(TOKEN_REFRESH_MARGIN_SECS)
    }
}

// Keep tokens out of logs.
impl std::fmt::Debug for Credential {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credential")
            .field("access_token", &"<redacted>")
            .field("refresh_token", &"<redacted>")
            .field("expires_at", &self.expires_at)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn credential_expiring_in(now: DateTime<Utc>, secs: i64) -> Credential {
        Credential {
            access_token: "access".to_string(),
            refresh_token: "refresh".to_string(),
            expires_at: now + Duration::seconds(secs),
        }
    }

    #[test]
    fn test_refresh_margin_boundaries() {
        let now = Utc::now();
        assert!(credential_expiring_in(now, 299).needs_refresh_at(now));
        assert!(!credential_expiring_in(now, 300).needs_refresh_at(now));
        assert!(!credential_expiring_in(now, 3600).needs_refresh_at(now));
        assert!(credential_expiring_in(now, -10).needs_refresh_at(now));
    }

    #[test]
    fn test_validity_is_strict() {
        let now = Utc::now();
        assert!(credential_expiring_in(now, 1).is_valid_at(now));
        assert!(!credential_expiring_in(now, 0).is_valid_at(now));
    }

    #[test]
    fn test_file_format_uses_epoch_seconds() {
        let json = r#"{"access_token":"a","refresh_token":"r","expires_at":1735689600}"#;
        let credential: Credential = serde_json::from_str(json).unwrap();
        assert_eq!(credential.expires_at.timestamp(), 1_735_689_600);

        let value = serde_json::to_value(&credential).unwrap();
        assert_eq!(value["expires_at"], 1_735_689_600);
    }

    #[test]
    fn test_debug_redacts_tokens() {
        let credential = credential_expiring_in(Utc::now(), 60);
        let debug = format!("{:?}", credential);
        assert!(!debug.contains("access\""));
        assert!(debug.contains("<redacted>"));
    }
}
