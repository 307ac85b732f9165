// ABOUTME: Route handlers for the caller's profile, onboarding and workout statistics
// ABOUTME: Onboarding creates the user row; stats are recomputed on every request
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Profile routes
//!
//! A user row exists only after `POST /api/profile/onboarding`. Until then
//! `GET /api/profile` answers 404, while stats work for any session.

use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use chrono::Utc;
use serde::{Deserialize, Serialize};

use super::required_text;
use crate::constants::limits;
use crate::errors::AppError;
use crate::logging::AppLogger;
use crate::middleware::{AuthUser, JsonBody};
use crate::models::{Achievement, Goal, User};
use crate::resources::ServerResources;
use crate::services::stats;

/// Profile with goals and achievements
#[derive(Debug, Serialize, Deserialize)]
pub struct ProfileResponse {
    /// User row
    pub user: User,
    /// Goals, oldest first
    pub goals: Vec<Goal>,
    /// Achievements
    pub achievements: Vec<Achievement>,
}

/// Body for editing the profile; omitted fields keep their value, blank ones clear it
#[derive(Debug, Deserialize)]
pub struct UpdateProfileBody {
    /// Display name
    pub name: Option<String>,
    /// Biography
    #[serde(default)]
    pub bio: Option<String>,
    /// Avatar URL
    #[serde(default)]
    pub image: Option<String>,
}

/// Body for first-run onboarding
#[derive(Debug, Deserialize)]
pub struct OnboardingBody {
    /// Display name
    pub name: Option<String>,
    /// Biography
    #[serde(default)]
    pub bio: Option<String>,
    /// Selected goal titles
    #[serde(default)]
    pub goals: Vec<String>,
}

/// Onboarded user with seeded goals
#[derive(Debug, Serialize, Deserialize)]
pub struct OnboardingResponse {
    /// User row
    pub user: User,
    /// Goals created for the user
    pub goals: Vec<Goal>,
}

fn optional_text(value: Option<String>) -> Option<String> {
    value.map(|v| v.trim().to_owned()).filter(|v| !v.is_empty())
}

/// Profile routes
pub struct ProfileRoutes;

impl ProfileRoutes {
    /// Create all profile routes
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route(
                "/api/profile",
                get(Self::handle_get_profile).put(Self::handle_update_profile),
            )
            .route("/api/profile/onboarding", post(Self::handle_onboarding))
            .route("/api/profile/stats", get(Self::handle_stats))
            .with_state(resources)
    }

    /// Handle GET /api/profile - User row, goals and achievements
    async fn handle_get_profile(
        auth: AuthUser,
        State(resources): State<Arc<ServerResources>>,
    ) -> Result<Response, AppError> {
        let profiles = resources.database.profiles();
        let user = profiles
            .get_user(auth.user_id)
            .await?
            .ok_or_else(|| AppError::not_found("Profile"))?;

        let response = ProfileResponse {
            user,
            goals: profiles.list_goals(auth.user_id).await?,
            achievements: profiles.list_achievements(auth.user_id).await?,
        };
        Ok((StatusCode::OK, Json(response)).into_response())
    }

    /// Handle PUT /api/profile - Edit name, bio and image
    ///
    /// An omitted `bio` or `image` is left as stored, an empty one is cleared.
    async fn handle_update_profile(
        auth: AuthUser,
        State(resources): State<Arc<ServerResources>>,
        JsonBody(body): JsonBody<UpdateProfileBody>,
    ) -> Result<Response, AppError> {
        let name = required_text(body.name, "Name", limits::MAX_CONTENT_LENGTH)?;
        let bio = body.bio.map(|v| v.trim().to_owned());
        let image = body.image.map(|v| v.trim().to_owned());

        let user = resources
            .database
            .profiles()
            .update_profile(auth.user_id, &name, bio.as_deref(), image.as_deref())
            .await?
            .ok_or_else(|| AppError::not_found("Profile"))?;

        Ok((StatusCode::OK, Json(user)).into_response())
    }

    /// Handle POST /api/profile/onboarding - Create the profile and goals
    async fn handle_onboarding(
        auth: AuthUser,
        State(resources): State<Arc<ServerResources>>,
        JsonBody(body): JsonBody<OnboardingBody>,
    ) -> Result<Response, AppError> {
        let name = required_text(body.name, "Name", limits::MAX_CONTENT_LENGTH)?;
        let bio = optional_text(body.bio);
        let goals: Vec<Goal> = body
            .goals
            .into_iter()
            .filter_map(|title| optional_text(Some(title)))
            .map(|title| Goal::initial(auth.user_id, title))
            .collect();

        let user = resources
            .database
            .profiles()
            .complete_onboarding(auth.user_id, &auth.email, &name, bio.as_deref(), &goals)
            .await?;
        AppLogger::log_auth_event(Some(&auth.user_id.to_string()), "onboarding_completed", true);

        let response = OnboardingResponse { user, goals };
        Ok((StatusCode::CREATED, Json(response)).into_response())
    }

    /// Handle GET /api/profile/stats - Totals, weekly count and streak
    async fn handle_stats(
        auth: AuthUser,
        State(resources): State<Arc<ServerResources>>,
    ) -> Result<Response, AppError> {
        let stats = stats::load_stats(&resources.database.workouts(), auth.user_id, Utc::now()).await?;
        Ok((StatusCode::OK, Json(stats)).into_response())
    }
}
