// ABOUTME: System-wide constants and defaults for the FitSocial API
// ABOUTME: Groups ports, session, limit and content constants by domain
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Constants Module
//!
//! Hardcoded constants and defaults used by configuration and handlers.

/// Service identity
pub mod service_names {
    /// Service name used in logs
    pub const FITSOCIAL_SERVER: &str = "fitsocial-server";
    /// Server version from Cargo.toml
    pub const SERVER_VERSION: &str = env!("CARGO_PKG_VERSION");
}

/// Configuration defaults
pub mod defaults {
    /// Default HTTP port
    pub const HTTP_PORT: u16 = 8081;
    /// Default database location
    pub const DATABASE_URL: &str = "sqlite:./data/fitsocial.db";
    /// Default session lifetime in hours
    pub const JWT_EXPIRY_HOURS: i64 = 24;
    /// Development-only signing secret, never used in production
    pub const DEV_JWT_SECRET: &str = "fitsocial-development-secret-change-me";
}

/// Session transport
pub mod session {
    /// Cookie carrying the session token
    pub const AUTH_COOKIE_NAME: &str = "auth_token";
    /// Audience claim for issued tokens
    pub const TOKEN_AUDIENCE: &str = "fitsocial";
    /// Minimum secret length accepted in production
    pub const MIN_SECRET_LENGTH: usize = 32;
}

/// Request limits
pub mod limits {
    /// Largest page a feed request may ask for
    pub const MAX_FEED_PAGE_SIZE: i64 = 100;
    /// Maximum length of post and comment bodies
    pub const MAX_CONTENT_LENGTH: usize = 5000;
    /// Maximum exercises per workout
    pub const MAX_EXERCISES_PER_WORKOUT: usize = 100;
    /// Seconds in the rolling "this week" window
    pub const WEEK_WINDOW_SECONDS: i64 = 7 * 24 * 60 * 60;
}

/// Onboarding goal defaults
pub mod goals {
    /// Initial target for goals created at onboarding
    pub const INITIAL_TARGET: f64 = 0.0;
    /// Initial progress for goals created at onboarding
    pub const INITIAL_CURRENT: f64 = 0.0;
    /// Unit for goals created at onboarding
    pub const DEFAULT_UNIT: &str = "times";
}
