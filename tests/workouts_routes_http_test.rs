// ABOUTME: HTTP integration tests for workout routes
// ABOUTME: Covers CRUD, validation, owner scoping and sharing workouts to the feed
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

mod common;
mod helpers;

use helpers::axum_test::AxumTestRequest;
use serde_json::{json, Value};

#[tokio::test]
async fn test_create_workout_shares_summary_to_feed() {
    let resources = common::create_test_resources().await.unwrap();
    let app = common::test_router(&resources);
    let user = common::create_test_user(&resources).unwrap();
    common::onboard_user(&app, &user, "Avery").await;

    let workout = common::create_workout(&app, &user.token, &common::leg_day_body(true)).await;
    assert_eq!(workout["title"], "Leg Day");
    assert_eq!(workout["level"], "Intermediate");
    assert_eq!(workout["exercises"].as_array().unwrap().len(), 2);
    assert_eq!(workout["exercises"][0]["name"], "Squat");
    assert_eq!(workout["community_post"]["status"], "created");

    let feed: Vec<Value> = AxumTestRequest::get("/api/community")
        .bearer(&user.token)
        .send(app.clone())
        .await
        .json();
    assert_eq!(feed.len(), 1);

    let post = &feed[0];
    let content = post["content"].as_str().unwrap();
    assert!(content.contains("New Workout: Leg Day"));
    assert!(content.contains("Squat: 3 sets × 10 reps (80kg)"));
    assert!(content.contains("Lunge: 3 sets × 12 reps"));
    assert!(content.contains("Duration: 45 minutes"));
    assert_eq!(post["workout_id"], workout["id"]);
    assert_eq!(post["id"], workout["community_post"]["post_id"]);
    assert_eq!(post["user"]["name"], "Avery");
}

#[tokio::test]
async fn test_create_workout_without_share_skips_feed() {
    let resources = common::create_test_resources().await.unwrap();
    let app = common::test_router(&resources);
    let user = common::create_test_user(&resources).unwrap();

    let workout = common::create_workout(&app, &user.token, &common::leg_day_body(false)).await;
    assert_eq!(workout["community_post"]["status"], "skipped");

    let feed: Vec<Value> = AxumTestRequest::get("/api/posts")
        .bearer(&user.token)
        .send(app.clone())
        .await
        .json();
    assert!(feed.is_empty());
}

#[tokio::test]
async fn test_create_workout_defaults_level_to_beginner() {
    let resources = common::create_test_resources().await.unwrap();
    let app = common::test_router(&resources);
    let user = common::create_test_user(&resources).unwrap();

    let body = json!({
        "title": "Quick Core",
        "exercises": [{ "name": "Plank", "sets": 3, "reps": 1 }]
    });
    let workout = common::create_workout(&app, &user.token, &body).await;

    assert_eq!(workout["level"], "Beginner");
    assert_eq!(workout["duration"], 0);
    assert_eq!(workout["description"], "");
}

#[tokio::test]
async fn test_create_workout_without_exercises_is_rejected() {
    let resources = common::create_test_resources().await.unwrap();
    let app = common::test_router(&resources);
    let user = common::create_test_user(&resources).unwrap();

    let response = AxumTestRequest::post("/api/workouts")
        .bearer(&user.token)
        .json(&json!({ "title": "Empty", "exercises": [] }))
        .send(app.clone())
        .await;
    assert_eq!(response.status(), 400);
    let body: Value = response.json();
    assert_eq!(body["code"], "MISSING_REQUIRED_FIELD");

    let workouts: Vec<Value> = AxumTestRequest::get("/api/workouts")
        .bearer(&user.token)
        .send(app.clone())
        .await
        .json();
    assert!(workouts.is_empty());
}

#[tokio::test]
async fn test_create_workout_rejects_blank_title_and_unknown_level() {
    let resources = common::create_test_resources().await.unwrap();
    let app = common::test_router(&resources);
    let user = common::create_test_user(&resources).unwrap();

    let mut blank_title = common::leg_day_body(false);
    blank_title["title"] = json!("   ");
    let response = AxumTestRequest::post("/api/workouts")
        .bearer(&user.token)
        .json(&blank_title)
        .send(app.clone())
        .await;
    assert_eq!(response.status(), 400);

    let mut bad_level = common::leg_day_body(false);
    bad_level["level"] = json!("Olympian");
    let response = AxumTestRequest::post("/api/workouts")
        .bearer(&user.token)
        .json(&bad_level)
        .send(app.clone())
        .await;
    assert_eq!(response.status(), 400);
    let body: Value = response.json();
    assert_eq!(body["code"], "INVALID_INPUT");
}

#[tokio::test]
async fn test_malformed_json_returns_error_body() {
    let resources = common::create_test_resources().await.unwrap();
    let app = common::test_router(&resources);
    let user = common::create_test_user(&resources).unwrap();

    let response = AxumTestRequest::post("/api/workouts")
        .bearer(&user.token)
        .raw_json("{\"title\": \"Leg Day\",")
        .send(app.clone())
        .await;

    assert_eq!(response.status(), 400);
    let body: Value = response.json();
    assert_eq!(body["code"], "INVALID_INPUT");
    assert!(body["error"].is_string());
}

#[tokio::test]
async fn test_workouts_require_session() {
    let resources = common::create_test_resources().await.unwrap();
    let app = common::test_router(&resources);
    let user = common::create_test_user(&resources).unwrap();

    let response = AxumTestRequest::post("/api/workouts")
        .json(&common::leg_day_body(true))
        .send(app.clone())
        .await;
    assert_eq!(response.status(), 401);
    let body: Value = response.json();
    assert_eq!(body["code"], "AUTH_REQUIRED");

    let response = AxumTestRequest::post("/api/workouts")
        .bearer("not-a-token")
        .json(&common::leg_day_body(true))
        .send(app.clone())
        .await;
    assert_eq!(response.status(), 401);
    let body: Value = response.json();
    assert_eq!(body["code"], "AUTH_INVALID");

    let workouts: Vec<Value> = AxumTestRequest::get("/api/workouts")
        .bearer(&user.token)
        .send(app.clone())
        .await
        .json();
    assert!(workouts.is_empty());
    let feed: Vec<Value> = AxumTestRequest::get("/api/posts")
        .bearer(&user.token)
        .send(app.clone())
        .await
        .json();
    assert!(feed.is_empty());
}

#[tokio::test]
async fn test_session_cookie_authenticates() {
    let resources = common::create_test_resources().await.unwrap();
    let app = common::test_router(&resources);
    let user = common::create_test_user(&resources).unwrap();

    let response = AxumTestRequest::get("/api/workouts")
        .session_cookie(&user.token)
        .send(app.clone())
        .await;
    assert_eq!(response.status(), 200);
}

#[tokio::test]
async fn test_list_workouts_newest_first() {
    let resources = common::create_test_resources().await.unwrap();
    let app = common::test_router(&resources);
    let user = common::create_test_user(&resources).unwrap();

    for title in ["First", "Second", "Third"] {
        let mut body = common::leg_day_body(false);
        body["title"] = json!(title);
        common::create_workout(&app, &user.token, &body).await;
    }

    let workouts: Vec<Value> = AxumTestRequest::get("/api/workouts")
        .bearer(&user.token)
        .send(app.clone())
        .await
        .json();
    let titles: Vec<&str> = workouts.iter().map(|w| w["title"].as_str().unwrap()).collect();
    assert_eq!(titles, vec!["Third", "Second", "First"]);
}

#[tokio::test]
async fn test_workouts_are_scoped_to_owner() {
    let resources = common::create_test_resources().await.unwrap();
    let app = common::test_router(&resources);
    let owner = common::create_test_user(&resources).unwrap();
    let other = common::create_test_user(&resources).unwrap();

    let workout = common::create_workout(&app, &owner.token, &common::leg_day_body(false)).await;
    let uri = format!("/api/workouts/{}", workout["id"].as_str().unwrap());

    let response = AxumTestRequest::get(&uri).bearer(&other.token).send(app.clone()).await;
    assert_eq!(response.status(), 404);

    let response = AxumTestRequest::put(&uri)
        .bearer(&other.token)
        .json(&common::leg_day_body(false))
        .send(app.clone())
        .await;
    assert_eq!(response.status(), 404);

    let response = AxumTestRequest::delete(&uri).bearer(&other.token).send(app.clone()).await;
    assert_eq!(response.status(), 200);

    let response = AxumTestRequest::get(&uri).bearer(&owner.token).send(app.clone()).await;
    assert_eq!(response.status(), 200);

    let others: Vec<Value> = AxumTestRequest::get("/api/workouts")
        .bearer(&other.token)
        .send(app.clone())
        .await
        .json();
    assert!(others.is_empty());
}

#[tokio::test]
async fn test_update_replaces_exercises() {
    let resources = common::create_test_resources().await.unwrap();
    let app = common::test_router(&resources);
    let user = common::create_test_user(&resources).unwrap();

    let workout = common::create_workout(&app, &user.token, &common::leg_day_body(false)).await;
    let uri = format!("/api/workouts/{}", workout["id"].as_str().unwrap());

    let update = json!({
        "title": "Leg Day v2",
        "duration": 50,
        "calories": 450,
        "level": "advanced",
        "exercises": [{ "name": "Deadlift", "sets": 5, "reps": 5, "weight": 120.5 }]
    });
    let response = AxumTestRequest::put(&uri)
        .bearer(&user.token)
        .json(&update)
        .send(app.clone())
        .await;
    assert_eq!(response.status(), 200);
    let updated: Value = response.json();
    assert_eq!(updated["title"], "Leg Day v2");
    assert_eq!(updated["level"], "Advanced");
    assert_eq!(updated["community_post"]["status"], "skipped");

    let fetched: Value = AxumTestRequest::get(&uri)
        .bearer(&user.token)
        .send(app.clone())
        .await
        .json();
    let exercises = fetched["exercises"].as_array().unwrap();
    assert_eq!(exercises.len(), 1);
    assert_eq!(exercises[0]["name"], "Deadlift");
    assert_eq!(exercises[0]["weight"], 120.5);
    assert_eq!(fetched["created_at"], workout["created_at"]);
}

#[tokio::test]
async fn test_update_with_share_posts_updated_summary() {
    let resources = common::create_test_resources().await.unwrap();
    let app = common::test_router(&resources);
    let user = common::create_test_user(&resources).unwrap();

    let workout = common::create_workout(&app, &user.token, &common::leg_day_body(false)).await;
    let uri = format!("/api/workouts/{}", workout["id"].as_str().unwrap());

    let response = AxumTestRequest::put(&uri)
        .bearer(&user.token)
        .json(&common::leg_day_body(true))
        .send(app.clone())
        .await;
    assert_eq!(response.status(), 200);
    let updated: Value = response.json();
    assert_eq!(updated["community_post"]["status"], "created");

    let feed: Vec<Value> = AxumTestRequest::get("/api/posts")
        .bearer(&user.token)
        .send(app.clone())
        .await
        .json();
    assert_eq!(feed.len(), 1);
    assert!(feed[0]["content"]
        .as_str()
        .unwrap()
        .contains("Updated Workout: Leg Day"));
}

#[tokio::test]
async fn test_update_missing_workout_returns_not_found() {
    let resources = common::create_test_resources().await.unwrap();
    let app = common::test_router(&resources);
    let user = common::create_test_user(&resources).unwrap();

    let uri = format!("/api/workouts/{}", uuid::Uuid::new_v4());
    let response = AxumTestRequest::put(&uri)
        .bearer(&user.token)
        .json(&common::leg_day_body(true))
        .send(app.clone())
        .await;
    assert_eq!(response.status(), 404);
    let body: Value = response.json();
    assert_eq!(body["code"], "RESOURCE_NOT_FOUND");

    let feed: Vec<Value> = AxumTestRequest::get("/api/posts")
        .bearer(&user.token)
        .send(app.clone())
        .await
        .json();
    assert!(feed.is_empty());
}

#[tokio::test]
async fn test_delete_then_get_returns_not_found() {
    let resources = common::create_test_resources().await.unwrap();
    let app = common::test_router(&resources);
    let user = common::create_test_user(&resources).unwrap();

    let workout = common::create_workout(&app, &user.token, &common::leg_day_body(false)).await;
    let uri = format!("/api/workouts/{}", workout["id"].as_str().unwrap());

    let response = AxumTestRequest::delete(&uri).bearer(&user.token).send(app.clone()).await;
    assert_eq!(response.status(), 200);
    let body: Value = response.json();
    assert_eq!(body["message"], "Workout deleted successfully");

    let response = AxumTestRequest::get(&uri).bearer(&user.token).send(app.clone()).await;
    assert_eq!(response.status(), 404);

    // Deleting again is still a success
    let response = AxumTestRequest::delete(&uri).bearer(&user.token).send(app.clone()).await;
    assert_eq!(response.status(), 200);
}

#[tokio::test]
async fn test_delete_by_query_parameter() {
    let resources = common::create_test_resources().await.unwrap();
    let app = common::test_router(&resources);
    let user = common::create_test_user(&resources).unwrap();

    let workout = common::create_workout(&app, &user.token, &common::leg_day_body(false)).await;
    let id = workout["id"].as_str().unwrap();

    let response = AxumTestRequest::delete("/api/workouts")
        .bearer(&user.token)
        .send(app.clone())
        .await;
    assert_eq!(response.status(), 400);

    let response = AxumTestRequest::delete("/api/workouts?id=not-a-uuid")
        .bearer(&user.token)
        .send(app.clone())
        .await;
    assert_eq!(response.status(), 400);

    let response = AxumTestRequest::delete(&format!("/api/workouts?id={id}"))
        .bearer(&user.token)
        .send(app.clone())
        .await;
    assert_eq!(response.status(), 200);

    let workouts: Vec<Value> = AxumTestRequest::get("/api/workouts")
        .bearer(&user.token)
        .send(app.clone())
        .await
        .json();
    assert!(workouts.is_empty());
}

#[tokio::test]
async fn test_deleting_shared_workout_keeps_post() {
    let resources = common::create_test_resources().await.unwrap();
    let app = common::test_router(&resources);
    let user = common::create_test_user(&resources).unwrap();

    let workout = common::create_workout(&app, &user.token, &common::leg_day_body(true)).await;
    let uri = format!("/api/workouts/{}", workout["id"].as_str().unwrap());
    AxumTestRequest::delete(&uri).bearer(&user.token).send(app.clone()).await;

    let feed: Vec<Value> = AxumTestRequest::get("/api/posts")
        .bearer(&user.token)
        .send(app.clone())
        .await
        .json();
    assert_eq!(feed.len(), 1);
    assert!(feed[0]["workout_id"].is_null());
}

#[tokio::test]
async fn test_share_failure_still_saves_workout() {
    let resources = common::create_test_resources().await.unwrap();
    let app = common::test_router(&resources);
    let user = common::create_test_user(&resources).unwrap();

    sqlx::query("DROP TABLE posts")
        .execute(resources.database.pool())
        .await
        .unwrap();

    let response = AxumTestRequest::post("/api/workouts")
        .bearer(&user.token)
        .json(&common::leg_day_body(true))
        .send(app.clone())
        .await;
    assert_eq!(response.status(), 201);
    let workout: Value = response.json();
    assert_eq!(workout["community_post"]["status"], "failed");
    assert!(workout["community_post"]["error"].is_string());

    let uri = format!("/api/workouts/{}", workout["id"].as_str().unwrap());
    let response = AxumTestRequest::get(&uri).bearer(&user.token).send(app.clone()).await;
    assert_eq!(response.status(), 200);
}
