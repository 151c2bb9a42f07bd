// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Application configuration loaded from environment variables.
//!
//! A `.env` file in the working directory is honoured for local use. Strava
//! client credentials are only required by the commands that talk to Strava.

use std::env;
use std::path::PathBuf;

use crate::models::BoundingBox;

const DEFAULT_TOKEN_FILE: &str = "strava/strava_tokens.json";
const DEFAULT_ACTIVITIES_FILE: &str = "data/activities.json";
const DEFAULT_REDIRECT_URI: &str = "http://localhost:8000/authorized";

/// Application configuration, loaded once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    /// Strava OAuth client ID
    pub strava_client_id: Option<String>,
    /// Strava OAuth client secret
    pub strava_client_secret: Option<String>,
    /// Where the credential triple is persisted
    pub token_file: PathBuf,
    /// Where the activity ledger is persisted
    pub activities_file: PathBuf,
    /// Redirect URI registered with the Strava application
    pub redirect_uri: String,
    /// Main-area geofence for the summary map
    pub bounding_box: BoundingBox,
    /// External program that turns the payload into an image
    pub render_command: Option<String>,
    /// Emit JSON log lines instead of text
    pub json_logs: bool,
}

impl Default for Config {
    /// Default config for testing only.
    fn default() -> Self {
        Self {
            strava_client_id: Some("test_client_id".to_string()),
            strava_client_secret: Some("test_secret".to_string()),
            token_file: PathBuf::from(DEFAULT_TOKEN_FILE),
            activities_file: PathBuf::from(DEFAULT_ACTIVITIES_FILE),
            redirect_uri: DEFAULT_REDIRECT_URI.to_string(),
            bounding_box: BoundingBox::default(),
            render_command: None,
            json_logs: false,
        }
    }
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok(); // Load .env file if present

        let bounding_box = match non_empty_var("SUMMARY_BBOX") {
            Some(raw) => raw
                .parse::<BoundingBox>()
                .map_err(|e: String| ConfigError::Invalid("SUMMARY_BBOX", e))?,
            None => BoundingBox::default(),
        };

        Ok(Self {
            strava_client_id: non_empty_var("STRAVA_CLIENT_ID"),
            strava_client_secret: non_empty_var("STRAVA_CLIENT_SECRET"),
            token_file: non_empty_var("STRAVA_TOKEN_FILE")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_TOKEN_FILE)),
            activities_file: non_empty_var("STRAVA_ACTIVITIES_FILE")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_ACTIVITIES_FILE)),
            redirect_uri: non_empty_var("STRAVA_REDIRECT_URI")
                .unwrap_or_else(|| DEFAULT_REDIRECT_URI.to_string()),
            bounding_box,
            render_command: non_empty_var("SUMMARY_RENDER_COMMAND"),
            json_logs: non_empty_var("LOG_FORMAT")
                .is_some_and(|v| v.eq_ignore_ascii_case("json")),
        })
    }

    /// Client ID and secret, required before any call to Strava.
    pub fn strava_client(&self) -> Result<(String, String), ConfigError> {
        let id = self
            .strava_client_id
            .clone()
            .ok_or(ConfigError::Missing("STRAVA_CLIENT_ID"))?;
        let secret = self
            .strava_client_secret
            .clone()
            .ok_or(ConfigError::Missing("STRAVA_CLIENT_SECRET"))?;
        Ok((id, secret))
    }
}

fn non_empty_var(name: &str) -> Option<String> {
    env::var(name)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    Missing(&'static str),

    #[error("Invalid value for {0}: {1}")]
    Invalid(&'static str, String),
}
