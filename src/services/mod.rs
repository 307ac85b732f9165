// ABOUTME: Domain service layer for business logic extracted from route handlers
// ABOUTME: Validation, workout sharing and statistics independent of HTTP
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Domain service layer
//!
//! Route handlers stay thin: they authenticate, decode and delegate here.
//! Services take store managers as arguments and hold no state.

/// Workout statistics: totals, weekly count and streak
pub mod stats;

/// Workout validation, persistence and community sharing
pub mod workouts;
