// ABOUTME: Main library entry point for the FitSocial fitness community API
// ABOUTME: Workouts, weekly schedules, a community feed and profiles over HTTP
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![deny(unsafe_code)]

//! # FitSocial Server
//!
//! A fitness tracking service where users log workouts, plan them across the
//! week, share them with the community and follow their progress.
//!
//! ## Architecture
//!
//! - **Routes**: thin axum handlers, one struct per resource
//! - **Services**: validation, workout sharing and statistics
//! - **Database**: `SQLite` managers with transactional multi-row writes
//! - **Auth**: HS256 session tokens from a cookie or Bearer header
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use fitsocial_server::config::ServerConfig;
//!
//! fn main() -> anyhow::Result<()> {
//!     let config = ServerConfig::from_env()?;
//!     println!("FitSocial configured on port {}", config.http_port);
//!     Ok(())
//! }
//! ```

/// Session token issuing and validation
pub mod auth;

/// Environment-driven configuration
pub mod config;

/// Application constants and defaults
pub mod constants;

/// `SQLite` store and resource managers
pub mod database;

/// Error types and HTTP mapping
pub mod errors;

/// Structured logging setup
pub mod logging;

/// Extractors and HTTP layers
pub mod middleware;

/// Domain models
pub mod models;

/// Shared handler state
pub mod resources;

/// HTTP route handlers
pub mod routes;

/// Router assembly and serving
pub mod server;

/// Domain services
pub mod services;
