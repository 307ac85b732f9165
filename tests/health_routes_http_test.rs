// ABOUTME: HTTP integration tests for health probes and router-wide layers
// ABOUTME: Checks liveness, readiness, request id propagation and CORS preflight
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

mod common;
mod helpers;

use helpers::axum_test::AxumTestRequest;
use serde_json::Value;

#[tokio::test]
async fn test_health_reports_service() {
    let resources = common::create_test_resources().await.unwrap();
    let app = common::test_router(&resources);

    let response = AxumTestRequest::get("/health").send(app).await;
    assert_eq!(response.status(), 200);
    let body: Value = response.json();
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["service"], "fitsocial-server");
    assert_eq!(body["version"], env!("CARGO_PKG_VERSION"));
    assert!(body["timestamp"].is_string());
}

#[tokio::test]
async fn test_ready_pings_database() {
    let resources = common::create_test_resources().await.unwrap();
    let app = common::test_router(&resources);

    let response = AxumTestRequest::get("/ready").send(app.clone()).await;
    assert_eq!(response.status(), 200);
    let body: Value = response.json();
    assert_eq!(body["status"], "ready");

    resources.database.pool().close().await;

    let response = AxumTestRequest::get("/ready").send(app).await;
    assert_eq!(response.status(), 503);
    let body: Value = response.json();
    assert_eq!(body["status"], "unavailable");
}

#[tokio::test]
async fn test_request_id_is_generated_and_propagated() {
    let resources = common::create_test_resources().await.unwrap();
    let app = common::test_router(&resources);

    let response = AxumTestRequest::get("/health").send(app.clone()).await;
    let generated = response.header("x-request-id").unwrap();
    assert!(uuid::Uuid::parse_str(&generated).is_ok());

    let response = AxumTestRequest::get("/health")
        .header("x-request-id", "trace-me-123")
        .send(app)
        .await;
    assert_eq!(response.header("x-request-id").as_deref(), Some("trace-me-123"));
}

#[tokio::test]
async fn test_cors_preflight_allows_api_methods() {
    let resources = common::create_test_resources().await.unwrap();
    let app = common::test_router(&resources);

    let response = AxumTestRequest::options("/api/workouts")
        .header("origin", "https://app.example.com")
        .header("access-control-request-method", "DELETE")
        .send(app)
        .await;
    assert_eq!(response.status(), 200);
    assert_eq!(
        response.header("access-control-allow-origin").as_deref(),
        Some("*")
    );
    assert!(response
        .header("access-control-allow-methods")
        .unwrap()
        .contains("DELETE"));
}

#[tokio::test]
async fn test_unknown_route_is_not_found() {
    let resources = common::create_test_resources().await.unwrap();
    let app = common::test_router(&resources);

    let response = AxumTestRequest::get("/api/unknown").send(app).await;
    assert_eq!(response.status(), 404);
}
