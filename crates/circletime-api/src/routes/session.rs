//! Routes for the single presentation session.
//!
//! Session problems (bad input, provider failures, empty stories) are
//! session states, so every endpoint answers 200 with the resulting view.

use axum::extract::State;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::Deserialize;
use tracing::{info, instrument};

use circletime_story::domain::request::GenerationRequest;
use circletime_story::domain::session::SessionView;

use crate::state::AppState;

/// Request body for POST /select-option.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SelectOptionRequest {
    /// Page the option was shown on.
    pub page_index: usize,
    /// Position of the chosen option.
    pub option_index: usize,
}

/// GET /
async fn current_view(State(state): State<AppState>) -> Json<SessionView> {
    Json(state.session.view())
}

/// POST /start
#[instrument(skip(state, request), fields(age_bracket = %request.age_bracket))]
async fn start(
    State(state): State<AppState>,
    Json(request): Json<GenerationRequest>,
) -> Json<SessionView> {
    info!("handling start command");
    Json(state.session.start(request).await)
}

/// POST /select-option
#[instrument(
    skip(state, request),
    fields(page_index = request.page_index, option_index = request.option_index)
)]
async fn select_option(
    State(state): State<AppState>,
    Json(request): Json<SelectOptionRequest>,
) -> Json<SessionView> {
    Json(
        state
            .session
            .select_option(request.page_index, request.option_index),
    )
}

/// POST /reset
#[instrument(skip(state))]
async fn reset(State(state): State<AppState>) -> Json<SessionView> {
    info!("handling reset command");
    Json(state.session.reset())
}

/// Returns the router for the session.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(current_view))
        .route("/start", post(start))
        .route("/select-option", post(select_option))
        .route("/reset", post(reset))
}
