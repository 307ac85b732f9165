// ABOUTME: Shared test utilities and setup functions for integration tests
// ABOUTME: Builds in-memory resources, the full router and signed-in test users
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence
#![allow(
    dead_code,
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    clippy::must_use_candidate
)]
//! Shared test utilities for `fitsocial_server`

use anyhow::Result;
use axum::Router;
use fitsocial_server::{
    auth::AuthManager,
    config::{DatabaseUrl, Environment, ServerConfig},
    database::Database,
    models::Achievement,
    resources::ServerResources,
    server,
};
use serde_json::{json, Value};
use std::sync::{Arc, Once};
use uuid::Uuid;

use crate::helpers::axum_test::AxumTestRequest;

static INIT_LOGGER: Once = Once::new();

const TEST_JWT_SECRET: &str = "fitsocial-test-secret-at-least-32-bytes";

/// Initialize quiet logging for tests (call once per test process)
pub fn init_test_logging() {
    INIT_LOGGER.call_once(|| {
        let log_level = match std::env::var("TEST_LOG").as_deref() {
            Ok("TRACE") => tracing::Level::TRACE,
            Ok("DEBUG") => tracing::Level::DEBUG,
            Ok("INFO") => tracing::Level::INFO,
            _ => tracing::Level::WARN,
        };

        tracing_subscriber::fmt()
            .with_max_level(log_level)
            .with_test_writer()
            .init();
    });
}

/// Configuration for an in-memory test server
pub fn test_config() -> ServerConfig {
    let mut config = ServerConfig {
        database: DatabaseUrl::Memory,
        environment: Environment::Testing,
        ..ServerConfig::default()
    };
    config.auth.jwt_secret = TEST_JWT_SECRET.to_owned();
    config
}

/// Fresh resources over a private in-memory database
pub async fn create_test_resources() -> Result<Arc<ServerResources>> {
    init_test_logging();
    let config = test_config();
    let database = Database::new(&config.database).await?;
    let auth_manager = AuthManager::new(TEST_JWT_SECRET.as_bytes(), config.auth.jwt_expiry_hours);
    Ok(Arc::new(ServerResources::new(
        database,
        auth_manager,
        Arc::new(config),
    )))
}

/// Router with every route and layer, as served in production
pub fn test_router(resources: &Arc<ServerResources>) -> Router {
    server::build_router(Arc::clone(resources))
}

/// A signed-in user with no profile yet
pub struct TestUser {
    pub user_id: Uuid,
    pub email: String,
    pub token: String,
}

/// Issue a session for a brand new user id
pub fn create_test_user(resources: &ServerResources) -> Result<TestUser> {
    let user_id = Uuid::new_v4();
    let email = format!("user-{}@example.com", &user_id.simple().to_string()[..8]);
    let token = resources.auth_manager.generate_token(user_id, &email)?;
    Ok(TestUser {
        user_id,
        email,
        token,
    })
}

/// Complete onboarding through the API so the user has a profile row
pub async fn onboard_user(app: &Router, user: &TestUser, name: &str) {
    let response = AxumTestRequest::post("/api/profile/onboarding")
        .bearer(&user.token)
        .json(&json!({ "name": name, "bio": "Lifts things", "goals": ["Run a 5k"] }))
        .send(app.clone())
        .await;
    assert_eq!(response.status(), 201, "onboarding failed");
}

/// Seed an achievement row; the API only reads achievements
pub async fn insert_achievement(resources: &ServerResources, achievement: &Achievement) -> Result<()> {
    sqlx::query(
        r"
        INSERT INTO achievements (id, user_id, title, description, icon, progress, total)
        VALUES ($1, $2, $3, $4, $5, $6, $7)
        ",
    )
    .bind(achievement.id.to_string())
    .bind(achievement.user_id.to_string())
    .bind(&achievement.title)
    .bind(&achievement.description)
    .bind(&achievement.icon)
    .bind(achievement.progress)
    .bind(achievement.total)
    .execute(resources.database.pool())
    .await?;
    Ok(())
}

/// The canonical workout body used across tests
pub fn leg_day_body(share_to_community: bool) -> Value {
    json!({
        "title": "Leg Day",
        "description": "Lower body strength",
        "duration": 45,
        "calories": 400,
        "level": "Intermediate",
        "exercises": [
            { "name": "Squat", "sets": 3, "reps": 10, "weight": 80.0 },
            { "name": "Lunge", "sets": 3, "reps": 12 }
        ],
        "share_to_community": share_to_community
    })
}

/// Create a workout through the API and return its JSON
pub async fn create_workout(app: &Router, token: &str, body: &Value) -> Value {
    let response = AxumTestRequest::post("/api/workouts")
        .bearer(token)
        .json(body)
        .send(app.clone())
        .await;
    assert_eq!(response.status(), 201, "workout creation failed");
    response.json()
}

/// Create a plain post through the API and return its JSON
pub async fn create_post(app: &Router, token: &str, content: &str) -> Value {
    let response = AxumTestRequest::post("/api/posts")
        .bearer(token)
        .json(&json!({ "content": content }))
        .send(app.clone())
        .await;
    assert_eq!(response.status(), 201, "post creation failed");
    response.json()
}
