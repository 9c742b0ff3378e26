//! Shared test helpers for API integration tests.
#![allow(dead_code)]

use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use circletime_core::completion::ChatTransport;
use circletime_story::application::acquisition::AcquisitionSettings;
use http_body_util::BodyExt;
use tower::ServiceExt;

use circletime_api::routes;
use circletime_api::state::AppState;

/// Build the full app router around `transport`. Uses the same route
/// structure as `main.rs`.
pub fn build_test_app(transport: Arc<dyn ChatTransport>) -> Router {
    routes::app(AppState::new(transport, AcquisitionSettings::default()))
}

/// Build the full app router around existing state, so consecutive requests
/// share one session.
pub fn build_test_app_with_state(state: AppState) -> Router {
    routes::app(state)
}

/// The request from the Leo / rain scenario.
pub fn leo_request() -> serde_json::Value {
    serde_json::json!({ "studentName": "Leo", "ageBracket": "3-4", "topic": "rain" })
}

/// Send a POST request with a JSON body and return the response.
pub async fn post_json(
    app: Router,
    uri: &str,
    body: &serde_json::Value,
) -> (StatusCode, serde_json::Value) {
    let request = Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(serde_json::to_vec(body).unwrap()))
        .unwrap();

    send(app, request).await
}

/// Send a POST request without a body and return the response.
pub async fn post_empty(app: Router, uri: &str) -> (StatusCode, serde_json::Value) {
    let request = Request::builder()
        .method("POST")
        .uri(uri)
        .body(Body::empty())
        .unwrap();

    send(app, request).await
}

/// Send a GET request and return the response.
pub async fn get_json(app: Router, uri: &str) -> (StatusCode, serde_json::Value) {
    let request = Request::builder()
        .method("GET")
        .uri(uri)
        .body(Body::empty())
        .unwrap();

    send(app, request).await
}

async fn send(app: Router, request: Request<Body>) -> (StatusCode, serde_json::Value) {
    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let body_bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json: serde_json::Value = serde_json::from_slice(&body_bytes).unwrap();

    (status, json)
}
