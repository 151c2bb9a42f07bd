// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! strava-year: keep a local ledger of Strava activities and summarize a year
//!
//! This crate syncs activities incrementally into a JSON ledger, then derives
//! yearly running statistics and a geofenced subset for the summary map.

pub mod config;
pub mod error;
pub mod models;
pub mod services;
pub mod store;
pub mod time_utils;
