// ABOUTME: Route handlers for the workouts REST API
// ABOUTME: CRUD over a caller's workouts with exercises and optional community sharing
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Workout routes
//!
//! All endpoints require a session and only ever see the caller's workouts.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};

use super::{parse_id, IdQuery, MessageResponse};
use crate::errors::{AppError, AppResult};
use crate::logging::AppLogger;
use crate::middleware::{AuthUser, JsonBody, QueryParams};
use crate::models::Workout;
use crate::resources::ServerResources;
use crate::services::workouts::{self as workout_service, SavedWorkout, ShareOutcome, WorkoutInput};

/// Workout plus the outcome of the community share
#[derive(Debug, Serialize, Deserialize)]
pub struct SavedWorkoutResponse {
    /// Stored workout
    #[serde(flatten)]
    pub workout: Workout,
    /// Community post outcome
    pub community_post: ShareOutcome,
}

impl From<SavedWorkout> for SavedWorkoutResponse {
    fn from(saved: SavedWorkout) -> Self {
        Self {
            workout: saved.workout,
            community_post: saved.community_post,
        }
    }
}

/// Workout routes
pub struct WorkoutRoutes;

impl WorkoutRoutes {
    /// Create all workout routes
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route(
                "/api/workouts",
                get(Self::handle_list)
                    .post(Self::handle_create)
                    .delete(Self::handle_delete_by_query),
            )
            .route(
                "/api/workouts/:id",
                get(Self::handle_get)
                    .put(Self::handle_update)
                    .delete(Self::handle_delete),
            )
            .with_state(resources)
    }

    /// Handle GET /api/workouts - List the caller's workouts, newest first
    async fn handle_list(
        auth: AuthUser,
        State(resources): State<Arc<ServerResources>>,
    ) -> Result<Response, AppError> {
        let workouts = resources.database.workouts().list_workouts(auth.user_id).await?;
        Ok((StatusCode::OK, Json(workouts)).into_response())
    }

    /// Handle POST /api/workouts - Create a workout with exercises
    async fn handle_create(
        auth: AuthUser,
        State(resources): State<Arc<ServerResources>>,
        JsonBody(body): JsonBody<WorkoutInput>,
    ) -> Result<Response, AppError> {
        let saved = workout_service::create_workout(
            &resources.database.workouts(),
            &resources.database.social(),
            auth.user_id,
            body,
        )
        .await?;

        let response: SavedWorkoutResponse = saved.into();
        Ok((StatusCode::CREATED, Json(response)).into_response())
    }

    /// Handle GET /api/workouts/:id - Get one workout
    async fn handle_get(
        auth: AuthUser,
        State(resources): State<Arc<ServerResources>>,
        Path(id): Path<String>,
    ) -> Result<Response, AppError> {
        let id = parse_id(Some(&id), "id")?;
        let workout = resources
            .database
            .workouts()
            .get_workout(auth.user_id, id)
            .await?
            .ok_or_else(|| AppError::not_found("Workout"))?;

        Ok((StatusCode::OK, Json(workout)).into_response())
    }

    /// Handle PUT /api/workouts/:id - Update fields and replace exercises
    async fn handle_update(
        auth: AuthUser,
        State(resources): State<Arc<ServerResources>>,
        Path(id): Path<String>,
        JsonBody(body): JsonBody<WorkoutInput>,
    ) -> Result<Response, AppError> {
        let id = parse_id(Some(&id), "id")?;
        let saved = workout_service::update_workout(
            &resources.database.workouts(),
            &resources.database.social(),
            auth.user_id,
            id,
            body,
        )
        .await?;

        let response: SavedWorkoutResponse = saved.into();
        Ok((StatusCode::OK, Json(response)).into_response())
    }

    /// Handle DELETE /api/workouts/:id - Delete a workout
    async fn handle_delete(
        auth: AuthUser,
        State(resources): State<Arc<ServerResources>>,
        Path(id): Path<String>,
    ) -> Result<Response, AppError> {
        let id = parse_id(Some(&id), "id")?;
        Self::delete(&resources, &auth, id).await
    }

    /// Handle DELETE /api/workouts?id= - Delete a workout
    async fn handle_delete_by_query(
        auth: AuthUser,
        State(resources): State<Arc<ServerResources>>,
        QueryParams(query): QueryParams<IdQuery>,
    ) -> Result<Response, AppError> {
        let id = parse_id(query.id.as_deref(), "id")?;
        Self::delete(&resources, &auth, id).await
    }

    async fn delete(
        resources: &ServerResources,
        auth: &AuthUser,
        id: uuid::Uuid,
    ) -> AppResult<Response> {
        let removed = resources.database.workouts().delete_workout(auth.user_id, id).await?;
        AppLogger::log_database_operation("delete", "workouts", u64::from(removed));

        let response = MessageResponse::new("Workout deleted successfully");
        Ok((StatusCode::OK, Json(response)).into_response())
    }
}
