// ABOUTME: Core data models for workouts, schedules, the community feed and profiles
// ABOUTME: Re-exports every domain type used by the store, services and routes
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Data Models
//!
//! Flat relational rows plus a few joined read shapes (`FeedPost`,
//! `CommentWithAuthor`, `ScheduleEntry::workout`). Nothing here is cached
//! between requests.

/// Workouts and exercises
pub mod workout;
/// Posts, likes and comments
pub mod social;
/// Weekly schedule slots
pub mod schedule;
/// Profiles, goals and achievements
pub mod user;

pub use schedule::{normalize_time, ScheduleEntry, Weekday, WorkoutSummary};
pub use social::{AuthorProfile, Comment, CommentWithAuthor, FeedPost, LikeRef, Post};
pub use user::{Achievement, Goal, User};
pub use workout::{
    Exercise, NewExercise, Workout, WorkoutActivity, WorkoutFields, WorkoutLevel,
};
