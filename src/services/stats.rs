// ABOUTME: Workout statistics aggregation for dashboards and tracking views
// ABOUTME: Totals, weekly count and day streak, recomputed from stored workouts per request
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::collections::HashSet;

use chrono::{DateTime, Duration, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::constants::limits;
use crate::database::WorkoutManager;
use crate::errors::AppResult;
use crate::models::WorkoutActivity;

/// Aggregated figures over a user's workouts
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkoutStats {
    /// Number of workouts ever logged
    pub total_workouts: u64,
    /// Workouts logged in the trailing seven days
    pub this_week: u64,
    /// Consecutive days with a workout, ending today
    pub streak: u32,
    /// Sum of calories
    pub total_calories: u64,
    /// Sum of durations in minutes
    pub total_duration: u64,
}

/// Count consecutive days with a workout, walking back from `today`
///
/// A day without a workout ends the walk, so no workout today means 0.
#[must_use]
pub fn calculate_streak(days: &[NaiveDate], today: NaiveDate) -> u32 {
    let active: HashSet<NaiveDate> = days.iter().copied().collect();
    let mut streak = 0;
    let mut day = today;
    while active.contains(&day) {
        streak += 1;
        match day.pred_opt() {
            Some(previous) => day = previous,
            None => break,
        }
    }
    streak
}

/// Aggregate activity rows as of `now`
#[must_use]
pub fn compute_stats(activity: &[WorkoutActivity], now: DateTime<Utc>) -> WorkoutStats {
    let week_start = now - Duration::seconds(limits::WEEK_WINDOW_SECONDS);
    let days: Vec<NaiveDate> = activity.iter().map(|a| a.created_at.date_naive()).collect();

    WorkoutStats {
        total_workouts: activity.len() as u64,
        this_week: activity.iter().filter(|a| a.created_at >= week_start).count() as u64,
        streak: calculate_streak(&days, now.date_naive()),
        total_calories: activity.iter().map(|a| u64::from(a.calories)).sum(),
        total_duration: activity.iter().map(|a| u64::from(a.duration)).sum(),
    }
}

/// Load a user's workouts and aggregate them
///
/// # Errors
///
/// Returns an error if the workout query fails
pub async fn load_stats(
    workouts: &WorkoutManager,
    user_id: Uuid,
    now: DateTime<Utc>,
) -> AppResult<WorkoutStats> {
    let activity = workouts.list_activity(user_id).await?;
    Ok(compute_stats(&activity, now))
}
