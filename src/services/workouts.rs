// ABOUTME: Workout domain service for validation, persistence and community sharing
// ABOUTME: Sharing runs after the workout commit and reports its outcome instead of failing
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::fmt::Write as _;

use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use crate::constants::limits;
use crate::database::{SocialManager, WorkoutManager};
use crate::errors::{AppError, AppResult};
use crate::logging::AppLogger;
use crate::models::{NewExercise, Post, Workout, WorkoutFields, WorkoutLevel};

/// Workout body accepted by create and update
#[derive(Debug, Clone, Default, Deserialize)]
pub struct WorkoutInput {
    /// Title, required and non-blank
    pub title: Option<String>,
    /// Free-form description
    #[serde(default)]
    pub description: Option<String>,
    /// Duration in minutes
    #[serde(default)]
    pub duration: Option<u32>,
    /// Estimated calories
    #[serde(default)]
    pub calories: Option<u32>,
    /// Difficulty, defaults to Beginner
    #[serde(default)]
    pub level: Option<String>,
    /// At least one exercise
    #[serde(default)]
    pub exercises: Option<Vec<NewExercise>>,
    /// Publish a summary post after saving
    #[serde(default)]
    pub share_to_community: bool,
}

/// Workout input that passed validation
#[derive(Debug, Clone, PartialEq)]
pub struct ValidatedWorkout {
    /// Scalar fields
    pub fields: WorkoutFields,
    /// Exercises with trimmed names
    pub exercises: Vec<NewExercise>,
    /// Publish a summary post after saving
    pub share_to_community: bool,
}

impl WorkoutInput {
    /// Check required fields and closed sets before any store access
    ///
    /// # Errors
    ///
    /// Returns `MISSING_REQUIRED_FIELD` for a blank title or no exercises,
    /// and `INVALID_INPUT` for an unknown level or a blank exercise name
    pub fn validate(self) -> AppResult<ValidatedWorkout> {
        let title = self.title.as_deref().map(str::trim).unwrap_or_default();
        if title.is_empty() {
            return Err(AppError::missing_field("Workout title is required"));
        }

        let exercises = self.exercises.unwrap_or_default();
        if exercises.is_empty() {
            return Err(AppError::missing_field("At least one exercise is required"));
        }
        if exercises.len() > limits::MAX_EXERCISES_PER_WORKOUT {
            return Err(AppError::invalid_input(format!(
                "A workout can have at most {} exercises",
                limits::MAX_EXERCISES_PER_WORKOUT
            )));
        }
        if exercises.iter().any(|e| e.name.trim().is_empty()) {
            return Err(AppError::invalid_input("Every exercise needs a name"));
        }
        if exercises.iter().any(|e| e.weight.is_some_and(|w| !w.is_finite() || w < 0.0)) {
            return Err(AppError::invalid_input("Exercise weight must be a non-negative number"));
        }

        let level = match self.level.as_deref().map(str::trim) {
            None | Some("") => WorkoutLevel::default(),
            Some(level) => level.parse()?,
        };

        Ok(ValidatedWorkout {
            fields: WorkoutFields {
                title: title.to_owned(),
                description: self.description.unwrap_or_default().trim().to_owned(),
                duration: self.duration.unwrap_or_default(),
                calories: self.calories.unwrap_or_default(),
                level,
            },
            exercises,
            share_to_community: self.share_to_community,
        })
    }
}

/// What happened to the optional community post
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum ShareOutcome {
    /// Sharing was not requested
    Skipped,
    /// A post was published
    Created {
        /// The new post
        post_id: Uuid,
    },
    /// The workout was saved but the post could not be published
    Failed {
        /// Client-safe reason
        error: String,
    },
}

/// Whether a shared post announces a new or an edited workout
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShareKind {
    /// First save
    Created,
    /// Subsequent edit
    Updated,
}

/// Saved workout plus the outcome of the share side effect
#[derive(Debug, Clone)]
pub struct SavedWorkout {
    /// Stored workout with exercises
    pub workout: Workout,
    /// Community post outcome
    pub community_post: ShareOutcome,
}

/// Render the community post body for a workout
#[must_use]
pub fn format_share_post(workout: &Workout, kind: ShareKind) -> String {
    let (heading, closing) = match kind {
        ShareKind::Created => ("New Workout", "Try this workout"),
        ShareKind::Updated => ("Updated Workout", "Try this updated workout"),
    };

    let mut content = format!("🏋️‍♂️ {heading}: {}\n\n", workout.title);
    if !workout.description.trim().is_empty() {
        let _ = write!(content, "{}\n\n", workout.description);
    }

    content.push_str("💪 Exercises:\n");
    let lines: Vec<String> = workout
        .exercises
        .iter()
        .map(|exercise| {
            let mut line = format!("• {}: {} sets × {} reps", exercise.name, exercise.sets, exercise.reps);
            if let Some(weight) = exercise.weight.filter(|w| *w > 0.0) {
                let _ = write!(line, " ({weight}kg)");
            }
            line
        })
        .collect();
    content.push_str(&lines.join("\n"));

    let _ = write!(
        content,
        "\n\n⏱️ Duration: {} minutes\n🔥 Calories: {}\n📈 Level: {}\n\n{closing} and let me know what you think! 💪",
        workout.duration, workout.calories, workout.level
    );
    content
}

/// Publish a workout summary; failures are logged and reported, never raised
pub async fn share_workout(
    social: &SocialManager,
    workout: &Workout,
    kind: ShareKind,
) -> ShareOutcome {
    let post = Post::new(workout.user_id, format_share_post(workout, kind), Some(workout.id));
    let user_id = workout.user_id.to_string();
    let workout_id = workout.id.to_string();

    match social.create_post(&post).await {
        Ok(post_id) => {
            AppLogger::log_share_event(&user_id, &workout_id, Some(&post_id.to_string()), None);
            ShareOutcome::Created { post_id }
        }
        Err(e) => {
            AppLogger::log_share_event(&user_id, &workout_id, None, Some(&e.to_string()));
            ShareOutcome::Failed {
                error: "Workout saved but the community post could not be created".to_owned(),
            }
        }
    }
}

/// Validate, store a new workout with its exercises, then optionally share it
///
/// # Errors
///
/// Returns validation errors before touching the store, or a database error
/// if the workout transaction fails
pub async fn create_workout(
    workouts: &WorkoutManager,
    social: &SocialManager,
    user_id: Uuid,
    input: WorkoutInput,
) -> AppResult<SavedWorkout> {
    let validated = input.validate()?;

    let mut workout = Workout::new(user_id, validated.fields);
    workout.exercises = validated
        .exercises
        .into_iter()
        .map(|e| e.into_exercise(workout.id))
        .collect();

    workouts.create_workout(&workout).await?;
    info!(user_id = %user_id, workout_id = %workout.id, exercises = workout.exercises.len(), "Workout created");

    let community_post = if validated.share_to_community {
        share_workout(social, &workout, ShareKind::Created).await
    } else {
        ShareOutcome::Skipped
    };

    Ok(SavedWorkout {
        workout,
        community_post,
    })
}

/// Validate, update fields and replace exercises, then optionally share
///
/// # Errors
///
/// Returns validation errors, `RESOURCE_NOT_FOUND` if the workout is absent
/// or not owned by `user_id`, or a database error
pub async fn update_workout(
    workouts: &WorkoutManager,
    social: &SocialManager,
    user_id: Uuid,
    workout_id: Uuid,
    input: WorkoutInput,
) -> AppResult<SavedWorkout> {
    let validated = input.validate()?;

    let exercises: Vec<_> = validated
        .exercises
        .into_iter()
        .map(|e| e.into_exercise(workout_id))
        .collect();

    let workout = workouts
        .update_workout(user_id, workout_id, &validated.fields, &exercises)
        .await?
        .ok_or_else(|| AppError::not_found("Workout"))?;
    info!(user_id = %user_id, workout_id = %workout_id, exercises = exercises.len(), "Workout updated");

    let community_post = if validated.share_to_community {
        share_workout(social, &workout, ShareKind::Updated).await
    } else {
        ShareOutcome::Skipped
    };

    Ok(SavedWorkout {
        workout,
        community_post,
    })
}
