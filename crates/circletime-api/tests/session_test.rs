//! Integration tests for the presentation session endpoints.

mod common;

use std::sync::Arc;

use axum::http::StatusCode;
use circletime_api::state::AppState;
use circletime_story::application::acquisition::AcquisitionSettings;
use circletime_test_support::{
    FailingTransport, GatedTransport, ScriptedTransport, envelope_with, story_envelope,
};

fn state_with(body: String) -> AppState {
    AppState::new(
        Arc::new(ScriptedTransport::new(body)),
        AcquisitionSettings::default(),
    )
}

#[tokio::test]
async fn test_leo_rain_session_reads_to_the_end() {
    let state = state_with(story_envelope(3));
    let app = || common::build_test_app_with_state(state.clone());

    // Start: Presenting at page 0.
    let (status, json) =
        common::post_json(app(), "/api/v1/session/start", &common::leo_request()).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["phase"], "presenting");
    assert_eq!(json["pageIndex"], 0);
    assert_eq!(json["pageCount"], 3);

    // 0 -> 1
    let select = |page: usize| serde_json::json!({ "pageIndex": page, "optionIndex": 0 });
    let (_, json) = common::post_json(app(), "/api/v1/session/select-option", &select(0)).await;
    assert_eq!(json["pageIndex"], 1);

    // Duplicate click from page 0 is ignored.
    let (_, json) = common::post_json(app(), "/api/v1/session/select-option", &select(0)).await;
    assert_eq!(json["pageIndex"], 1);

    // 1 -> 2
    let (_, json) = common::post_json(app(), "/api/v1/session/select-option", &select(1)).await;
    assert_eq!(json["pageIndex"], 2);

    // Last page: the end, back to Configuring.
    let (_, json) = common::post_json(app(), "/api/v1/session/select-option", &select(2)).await;
    assert_eq!(json["phase"], "configuring");
    assert_eq!(json["notice"]["kind"], "story_complete");
    assert_eq!(json["notice"]["message"], "The End! Great job listening!");

    let (_, json) = common::get_json(app(), "/api/v1/session").await;
    assert_eq!(json["phase"], "configuring");
}

#[tokio::test]
async fn test_missing_pages_keeps_session_configuring_with_error() {
    let state = state_with(envelope_with(r#"{"title":"X"}"#));

    let (status, json) = common::post_json(
        common::build_test_app_with_state(state),
        "/api/v1/session/start",
        &common::leo_request(),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["phase"], "configuring");
    assert_eq!(json["notice"]["kind"], "acquisition_failed");
    assert_eq!(json["notice"]["retryable"], true);
}

#[tokio::test]
async fn test_provider_503_is_shown_on_the_configuring_view() {
    let state = AppState::new(
        Arc::new(FailingTransport::with_status(503)),
        AcquisitionSettings::default(),
    );

    let (_, json) = common::post_json(
        common::build_test_app_with_state(state),
        "/api/v1/session/start",
        &common::leo_request(),
    )
    .await;

    assert_eq!(json["notice"]["status"], 503);
}

#[tokio::test]
async fn test_empty_story_shows_recovery_view_until_reset() {
    let state = state_with(envelope_with(r#"{"title":"X","pages":[]}"#));
    let app = || common::build_test_app_with_state(state.clone());

    let (_, json) = common::post_json(app(), "/api/v1/session/start", &common::leo_request()).await;
    assert_eq!(json["phase"], "recovering");
    assert_eq!(json["message"], "The storybook is empty!");

    let (_, json) = common::post_empty(app(), "/api/v1/session/reset").await;
    assert_eq!(json["phase"], "configuring");
}

#[tokio::test]
async fn test_reset_during_loading_discards_late_story() {
    // Arrange
    let gate = Arc::new(GatedTransport::new(Ok(story_envelope(3))));
    let state = AppState::new(gate.clone(), AcquisitionSettings::default());
    let pending = {
        let app = common::build_test_app_with_state(state.clone());
        tokio::spawn(async move {
            common::post_json(app, "/api/v1/session/start", &common::leo_request()).await
        })
    };
    gate.wait_until_called().await;

    let (_, json) = common::get_json(
        common::build_test_app_with_state(state.clone()),
        "/api/v1/session",
    )
    .await;
    assert_eq!(json["phase"], "loading");

    // Act
    common::post_empty(
        common::build_test_app_with_state(state.clone()),
        "/api/v1/session/reset",
    )
    .await;
    gate.release();
    let (_, late) = pending.await.unwrap();

    // Assert
    assert_eq!(late["phase"], "configuring");
    let (_, json) =
        common::get_json(common::build_test_app_with_state(state), "/api/v1/session").await;
    assert_eq!(json["phase"], "configuring");
    assert!(json["notice"].is_null());
}
