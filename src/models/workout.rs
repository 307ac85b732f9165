// ABOUTME: Workout and exercise models with difficulty levels
// ABOUTME: Workouts own their exercises, which are replaced wholesale on update
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::fmt::{Display, Formatter, Result as FmtResult};
use std::str::FromStr;

use chrono::{DateTime, SubsecRound, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::AppError;

/// Difficulty level of a workout
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
pub enum WorkoutLevel {
    /// Entry level
    #[default]
    Beginner,
    /// Some training experience
    Intermediate,
    /// Experienced athletes
    Advanced,
}

impl WorkoutLevel {
    /// Database string representation
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Beginner => "Beginner",
            Self::Intermediate => "Intermediate",
            Self::Advanced => "Advanced",
        }
    }
}

impl Display for WorkoutLevel {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(self.as_str())
    }
}

impl FromStr for WorkoutLevel {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "beginner" => Ok(Self::Beginner),
            "intermediate" => Ok(Self::Intermediate),
            "advanced" => Ok(Self::Advanced),
            _ => Err(AppError::invalid_input(format!("Invalid workout level: {s}"))),
        }
    }
}

/// A single exercise inside a workout
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Exercise {
    /// Unique identifier
    pub id: Uuid,
    /// Owning workout
    pub workout_id: Uuid,
    /// Exercise name, e.g. "Squat"
    pub name: String,
    /// Number of sets
    pub sets: u32,
    /// Repetitions per set
    pub reps: u32,
    /// Load in kilograms, if any
    pub weight: Option<f64>,
}

/// Exercise fields supplied by a client, before ids are assigned
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NewExercise {
    /// Exercise name
    #[serde(default)]
    pub name: String,
    /// Number of sets
    #[serde(default)]
    pub sets: u32,
    /// Repetitions per set
    #[serde(default)]
    pub reps: u32,
    /// Load in kilograms
    #[serde(default)]
    pub weight: Option<f64>,
}

impl NewExercise {
    /// Assign identity for insertion under `workout_id`
    #[must_use]
    pub fn into_exercise(self, workout_id: Uuid) -> Exercise {
        Exercise {
            id: Uuid::new_v4(),
            workout_id,
            name: self.name.trim().to_owned(),
            sets: self.sets,
            reps: self.reps,
            weight: self.weight,
        }
    }
}

/// Scalar workout fields shared by create and update
#[derive(Debug, Clone, PartialEq)]
pub struct WorkoutFields {
    /// Title
    pub title: String,
    /// Free-form description
    pub description: String,
    /// Duration in minutes
    pub duration: u32,
    /// Estimated calories burned
    pub calories: u32,
    /// Difficulty
    pub level: WorkoutLevel,
}

/// A workout with its exercises
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Workout {
    /// Unique identifier
    pub id: Uuid,
    /// Owner
    pub user_id: Uuid,
    /// Title
    pub title: String,
    /// Free-form description
    pub description: String,
    /// Duration in minutes
    pub duration: u32,
    /// Estimated calories burned
    pub calories: u32,
    /// Difficulty
    pub level: WorkoutLevel,
    /// When the workout was created
    pub created_at: DateTime<Utc>,
    /// When the workout was last updated
    pub updated_at: DateTime<Utc>,
    /// Exercises, in insertion order
    pub exercises: Vec<Exercise>,
}

/// Per-workout figures used by the stats aggregation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WorkoutActivity {
    /// When the workout was logged
    pub created_at: DateTime<Utc>,
    /// Duration in minutes
    pub duration: u32,
    /// Calories burned
    pub calories: u32,
}

impl Workout {
    /// Build a new workout owned by `user_id`
    #[must_use]
    pub fn new(user_id: Uuid, fields: WorkoutFields) -> Self {
        // Stored timestamps keep microseconds
        let now = Utc::now().trunc_subsecs(6);
        Self {
            id: Uuid::new_v4(),
            user_id,
            title: fields.title,
            description: fields.description,
            duration: fields.duration,
            calories: fields.calories,
            level: fields.level,
            created_at: now,
            updated_at: now,
            exercises: Vec::new(),
        }
    }
}
