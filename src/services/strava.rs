// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Strava API client.
//!
//! Handles:
//! - Paginated activity listing (the fetch capability)
//! - Token refresh (the refresh capability)
//! - Authorization URL and code exchange for first-time setup
//!
//! The sync engine only sees the [`ActivitySource`] and [`TokenRefresher`]
//! traits; everything Strava-specific stays in this module.

use std::time::Duration;

use serde::Deserialize;

use crate::error::AppError;
use crate::models::{ActivityRecord, Credential};
use crate::time_utils::cursor_epoch_seconds;

const API_BASE_URL: &str = "https://www.strava.com/api/v3";
const OAUTH_AUTHORIZE_URL: &str = "https://www.strava.com/oauth/authorize";
const OAUTH_TOKEN_URL: &str = "https://www.strava.com/oauth/token";
const AUTH_SCOPES: &str = "read_all,profile:read_all,activity:read_all";

/// Largest page size Strava accepts for `/athlete/activities`.
pub const MAX_PAGE_SIZE: usize = 200;
const HTTP_TIMEOUT: Duration = Duration::from_secs(30);

/// Yields activity records newer than a cursor.
#[allow(async_fn_in_trait)]
pub trait ActivitySource {
    /// Fetch activities started after `after` (a `start_date_local` value),
    /// or everything when `after` is `None`, up to `limit` records.
    ///
    /// Either the whole range is returned or an error; never a partial list.
    async fn fetch_activities(
        &self,
        access_token: &str,
        after: Option<&str>,
        limit: Option<usize>,
    ) -> Result<Vec<ActivityRecord>, AppError>;
}

/// Exchanges a refresh token for a new credential.
#[allow(async_fn_in_trait)]
pub trait TokenRefresher {
    async fn refresh(&self, refresh_token: &str) -> Result<Credential, AppError>;
}

/// Strava API client.
#[derive(Clone)]
pub struct StravaClient {
    http: reqwest::Client,
    base_url: String,
    token_url: String,
    client_id: String,
    client_secret: String,
}

impl StravaClient {
    /// Create a new Strava client with OAuth credentials.
    pub fn new(client_id: String, client_secret: String) -> Result<Self, AppError> {
        let http = reqwest::Client::builder()
            .timeout(HTTP_TIMEOUT)
            .build()
            .map_err(|e| AppError::Internal(anyhow::anyhow!("HTTP client: {}", e)))?;

        Ok(Self {
            http,
            base_url: API_BASE_URL.to_string(),
            token_url: OAUTH_TOKEN_URL.to_string(),
            client_id,
            client_secret,
        })
    }

    /// Point the client at a different API host (tests, proxies).
    pub fn with_base_urls(mut self, api_base: &str, token_url: &str) -> Self {
        self.base_url = api_base.trim_end_matches('/').to_string();
        self.token_url = token_url.to_string();
        self
    }

    /// URL the user opens to grant this application access.
    pub fn authorization_url(&self, redirect_uri: &str) -> String {
        format!(
            "{}?client_id={}&redirect_uri={}&response_type=code&approval_prompt=auto&scope={}",
            OAUTH_AUTHORIZE_URL,
            urlencoding::encode(&self.client_id),
            urlencoding::encode(redirect_uri),
            urlencoding::encode(AUTH_SCOPES),
        )
    }

    /// Exchange an authorization code for the initial credential.
    pub async fn exchange_code(&self, code: &str) -> Result<Credential, AppError> {
        let response = self
            .http
            .post(&self.token_url)
            .form(&[
                ("client_id", self.client_id.as_str()),
                ("client_secret", self.client_secret.as_str()),
                ("code", code),
                ("grant_type", "authorization_code"),
            ])
            .send()
            .await
            .map_err(|e| AppError::AuthorizationFailed(format!("Token exchange failed: {}", e)))?;

        let tokens: TokenResponse = check_response_json(response)
            .await
            .map_err(AppError::AuthorizationFailed)?;
        Ok(tokens.into())
    }

    /// One page of `/athlete/activities`.
    async fn list_activities(
        &self,
        access_token: &str,
        after: Option<i64>,
        page: u32,
        per_page: usize,
    ) -> Result<Vec<ActivityRecord>, String> {
        let url = format!("{}/athlete/activities", self.base_url);

        let mut query = vec![
            ("page", page.to_string()),
            ("per_page", per_page.to_string()),
        ];
        if let Some(after) = after {
            query.push(("after", after.to_string()));
        }

        let response = self
            .http
            .get(&url)
            .bearer_auth(access_token)
            .query(&query)
            .send()
            .await
            .map_err(|e| e.to_string())?;

        check_response_json(response).await
    }
}

impl ActivitySource for StravaClient {
    async fn fetch_activities(
        &self,
        access_token: &str,
        after: Option<&str>,
        limit: Option<usize>,
    ) -> Result<Vec<ActivityRecord>, AppError> {
        let after_epoch = match after {
            Some(cursor) => match cursor_epoch_seconds(cursor) {
                Ok(epoch) => Some(epoch),
                Err(e) => {
                    tracing::warn!(error = %e, "Ignoring unparseable cursor, fetching everything");
                    None
                }
            },
            None => None,
        };

        let mut activities: Vec<ActivityRecord> = Vec::new();
        let mut page = 1;

        loop {
            let remaining = limit.map(|l| l.saturating_sub(activities.len()));
            if remaining == Some(0) {
                break;
            }
            let per_page = remaining.map_or(MAX_PAGE_SIZE, |r| r.min(MAX_PAGE_SIZE));

            let batch = self
                .list_activities(access_token, after_epoch, page, per_page)
                .await
                .map_err(|e| AppError::FetchFailed(format!("page {}: {}", page, e)))?;

            tracing::debug!(page, count = batch.len(), "Fetched activity page");
            let last_page = batch.len() < per_page;
            activities.extend(batch);

            if last_page {
                break;
            }
            page += 1;
        }

        if let Some(limit) = limit {
            activities.truncate(limit);
        }
        Ok(activities)
    }
}

impl TokenRefresher for StravaClient {
    async fn refresh(&self, refresh_token: &str) -> Result<Credential, AppError> {
        let response = self
            .http
            .post(&self.token_url)
            .form(&[
                ("client_id", self.client_id.as_str()),
                ("client_secret", self.client_secret.as_str()),
                ("refresh_token", refresh_token),
                ("grant_type", "refresh_token"),
            ])
            .send()
            .await
            .map_err(|e| AppError::RefreshFailed(format!("Token refresh request failed: {}", e)))?;

        let tokens: TokenResponse = check_response_json(response)
            .await
            .map_err(AppError::RefreshFailed)?;
        Ok(tokens.into())
    }
}

/// Check response status and parse the JSON body.
async fn check_response_json<T: for<'de> Deserialize<'de>>(
    response: reqwest::Response,
) -> Result<T, String> {
    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();

        if status.as_u16() == 429 {
            tracing::warn!("Strava rate limit hit (429)");
            return Err(AppError::STRAVA_RATE_LIMIT.to_string());
        }

        if status.as_u16() == 401 {
            return Err(format!("{}: {}", AppError::STRAVA_TOKEN_ERROR, body));
        }

        return Err(format!("HTTP {}: {}", status, body));
    }

    response
        .json()
        .await
        .map_err(|e| format!("JSON parse error: {}", e))
}

/// Token response from Strava's OAuth endpoint (refresh and code exchange).
#[derive(Debug, Clone, Deserialize)]
struct TokenResponse {
    access_token: String,
    refresh_token: String,
    expires_at: i64,
}

impl From<TokenResponse> for Credential {
    fn from(t: TokenResponse) -> Self {
        Credential::from_epoch(t.access_token, t.refresh_token, t.expires_at)
    }
}
