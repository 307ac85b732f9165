// ABOUTME: Route module organization for the FitSocial HTTP API
// ABOUTME: One route struct per resource plus shared response and query types
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Route module for the FitSocial server
//!
//! Each domain module contains route definitions and thin handlers that
//! authenticate, decode and delegate to the store managers and services.

/// Posts, likes and comments
pub mod community;
/// Liveness and readiness probes
pub mod health;
/// Profile, onboarding and stats
pub mod profile;
/// Weekly schedule
pub mod schedule;
/// Workouts and exercises
pub mod workouts;

pub use community::CommunityRoutes;
pub use health::HealthRoutes;
pub use profile::ProfileRoutes;
pub use schedule::ScheduleRoutes;
pub use workouts::WorkoutRoutes;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::{AppError, AppResult};

/// Confirmation body for deletes
#[derive(Debug, Serialize, Deserialize)]
pub struct MessageResponse {
    /// Human-readable confirmation
    pub message: String,
}

impl MessageResponse {
    /// Build a confirmation message
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// `?id=` query used by the query-string delete variants
#[derive(Debug, Default, Deserialize)]
pub struct IdQuery {
    /// Target id
    pub id: Option<String>,
}

/// Parse a client-supplied id
///
/// # Errors
///
/// Returns `MISSING_REQUIRED_FIELD` when absent or blank and `INVALID_INPUT`
/// when it is not a UUID
pub fn parse_id(value: Option<&str>, field: &str) -> AppResult<Uuid> {
    let value = value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .ok_or_else(|| AppError::missing_field(format!("{field} is required")))?;
    Uuid::parse_str(value).map_err(|_| AppError::invalid_input(format!("Invalid {field} format")))
}

/// Trim a required text field
///
/// # Errors
///
/// Returns `MISSING_REQUIRED_FIELD` when absent or blank, and `INVALID_INPUT`
/// when longer than `max_len` characters
pub fn required_text(value: Option<String>, field: &str, max_len: usize) -> AppResult<String> {
    let text = value.as_deref().map(str::trim).unwrap_or_default();
    if text.is_empty() {
        return Err(AppError::missing_field(format!("{field} is required")));
    }
    if text.chars().count() > max_len {
        return Err(AppError::invalid_input(format!(
            "{field} must be at most {max_len} characters"
        )));
    }
    Ok(text.to_owned())
}
