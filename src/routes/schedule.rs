// ABOUTME: Route handlers for the weekly workout schedule
// ABOUTME: Slots reference the caller's own workouts and list Monday first
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use chrono::Utc;
use serde::Deserialize;
use tracing::info;
use uuid::Uuid;

use super::{parse_id, IdQuery, MessageResponse};
use crate::errors::AppError;
use crate::logging::AppLogger;
use crate::middleware::{AuthUser, JsonBody, QueryParams};
use crate::models::{normalize_time, ScheduleEntry, Weekday};
use crate::resources::ServerResources;

/// Body for scheduling a workout
#[derive(Debug, Deserialize)]
pub struct CreateScheduleBody {
    /// Day of the week
    pub day: Option<String>,
    /// Time of day, `HH:MM`
    pub time: Option<String>,
    /// Workout to schedule
    pub workout_id: Option<String>,
}

/// Body for moving a scheduled workout
#[derive(Debug, Deserialize)]
pub struct UpdateScheduleBody {
    /// Entry to change
    pub id: Option<String>,
    /// New time of day, `HH:MM`
    pub time: Option<String>,
    /// New workout
    pub workout_id: Option<String>,
}

fn required_time(time: Option<&str>) -> Result<String, AppError> {
    let time = time
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .ok_or_else(|| AppError::missing_field("time is required"))?;
    normalize_time(time)
}

/// Schedule routes
pub struct ScheduleRoutes;

impl ScheduleRoutes {
    /// Create all schedule routes
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route(
                "/api/schedule",
                get(Self::handle_list)
                    .post(Self::handle_create)
                    .put(Self::handle_update)
                    .delete(Self::handle_delete),
            )
            .with_state(resources)
    }

    /// Handle GET /api/schedule - The caller's week
    async fn handle_list(
        auth: AuthUser,
        State(resources): State<Arc<ServerResources>>,
    ) -> Result<Response, AppError> {
        let entries = resources.database.schedules().list_schedule(auth.user_id).await?;
        Ok((StatusCode::OK, Json(entries)).into_response())
    }

    /// Handle POST /api/schedule - Schedule one of the caller's workouts
    async fn handle_create(
        auth: AuthUser,
        State(resources): State<Arc<ServerResources>>,
        JsonBody(body): JsonBody<CreateScheduleBody>,
    ) -> Result<Response, AppError> {
        let day: Weekday = body
            .day
            .as_deref()
            .filter(|d| !d.trim().is_empty())
            .ok_or_else(|| AppError::missing_field("day is required"))?
            .parse()?;
        let time = required_time(body.time.as_deref())?;
        let workout_id = parse_id(body.workout_id.as_deref(), "workout_id")?;

        let now = Utc::now();
        let entry = ScheduleEntry {
            id: Uuid::new_v4(),
            user_id: auth.user_id,
            day,
            time,
            workout_id,
            created_at: now,
            updated_at: now,
            workout: None,
        };

        let created = resources
            .database
            .schedules()
            .create_entry(&entry)
            .await?
            .ok_or_else(|| AppError::not_found("Workout"))?;
        info!(user_id = %auth.user_id, entry_id = %created.id, day = %created.day, "Workout scheduled");

        Ok((StatusCode::OK, Json(created)).into_response())
    }

    /// Handle PUT /api/schedule - Change the time or workout of an entry
    async fn handle_update(
        auth: AuthUser,
        State(resources): State<Arc<ServerResources>>,
        JsonBody(body): JsonBody<UpdateScheduleBody>,
    ) -> Result<Response, AppError> {
        let id = parse_id(body.id.as_deref(), "id")?;
        let time = required_time(body.time.as_deref())?;
        let workout_id = parse_id(body.workout_id.as_deref(), "workout_id")?;

        let updated = resources
            .database
            .schedules()
            .update_entry(auth.user_id, id, &time, workout_id)
            .await?
            .ok_or_else(|| AppError::not_found("Schedule entry"))?;

        Ok((StatusCode::OK, Json(updated)).into_response())
    }

    /// Handle DELETE /api/schedule?id= - Remove an entry
    async fn handle_delete(
        auth: AuthUser,
        State(resources): State<Arc<ServerResources>>,
        QueryParams(query): QueryParams<IdQuery>,
    ) -> Result<Response, AppError> {
        let id = parse_id(query.id.as_deref(), "id")?;
        let removed = resources.database.schedules().delete_entry(auth.user_id, id).await?;
        AppLogger::log_database_operation("delete", "schedules", u64::from(removed));

        let response = MessageResponse::new("Schedule deleted successfully");
        Ok((StatusCode::OK, Json(response)).into_response())
    }
}
