// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

use std::path::PathBuf;

use strava_year::config::ConfigError;
use strava_year::error::AppError;

#[test]
fn test_is_strava_token_error_matches() {
    let err = AppError::FetchFailed(format!("page 1: {}: {{}}", AppError::STRAVA_TOKEN_ERROR));
    assert!(err.is_strava_token_error());

    let err = AppError::RefreshFailed("HTTP 400 Bad Request: invalid_grant".to_string());
    assert!(err.is_strava_token_error());

    let err = AppError::RefreshFailed("Authorization Error".to_string());
    assert!(err.is_strava_token_error());
}

#[test]
fn test_is_strava_token_error_no_match() {
    let err = AppError::FetchFailed(AppError::STRAVA_RATE_LIMIT.to_string());
    assert!(!err.is_strava_token_error());

    let err = AppError::FetchFailed("HTTP 500 Internal Server Error".to_string());
    assert!(!err.is_strava_token_error());

    let err = AppError::MissingCredential;
    assert!(!err.is_strava_token_error());
}

#[test]
fn test_fatal_classification() {
    assert!(AppError::MissingCredential.is_fatal());
    assert!(AppError::RefreshFailed("x".to_string()).is_fatal());
    assert!(AppError::FetchFailed("x".to_string()).is_fatal());
    assert!(AppError::MissingInput(PathBuf::from("data/activities.json")).is_fatal());
    assert!(!AppError::RenderFailed("x".to_string()).is_fatal());
}

#[test]
fn test_exit_status_policy() {
    // Exit 1: credential, refresh/fetch, input, storage and cache problems.
    assert_eq!(AppError::MissingCredential.exit_status(), 1);
    assert_eq!(AppError::RefreshFailed("x".to_string()).exit_status(), 1);
    assert_eq!(AppError::FetchFailed("x".to_string()).exit_status(), 1);
    assert_eq!(
        AppError::MissingInput(PathBuf::from("data/activities.json")).exit_status(),
        1
    );
    assert_eq!(AppError::Storage("disk full".to_string()).exit_status(), 1);
    assert_eq!(AppError::CacheCorrupt("x".to_string()).exit_status(), 1);
    assert_eq!(
        AppError::from(ConfigError::Missing("STRAVA_CLIENT_ID")).exit_status(),
        1
    );

    // Exit 0: the payload is on disk even when the renderer fails.
    assert_eq!(AppError::RenderFailed("exit status 2".to_string()).exit_status(), 0);
}

#[test]
fn test_needs_reauthorization() {
    assert!(AppError::MissingCredential.needs_reauthorization());
    assert!(AppError::RefreshFailed("HTTP 400 Bad Request: invalid_grant".to_string())
        .needs_reauthorization());
    assert!(AppError::FetchFailed(format!("page 1: {}: {{}}", AppError::STRAVA_TOKEN_ERROR))
        .needs_reauthorization());

    assert!(!AppError::FetchFailed(AppError::STRAVA_RATE_LIMIT.to_string()).needs_reauthorization());
    assert!(!AppError::Storage("disk full".to_string()).needs_reauthorization());
}

#[test]
fn test_messages_are_actionable() {
    assert!(AppError::MissingCredential.to_string().contains("auth"));
    assert_eq!(
        AppError::MissingInput(PathBuf::from("data/activities.json")).to_string(),
        "Input file not found: data/activities.json"
    );
    assert_eq!(
        AppError::from(ConfigError::Missing("STRAVA_CLIENT_ID")).to_string(),
        "Missing required environment variable: STRAVA_CLIENT_ID"
    );
}
