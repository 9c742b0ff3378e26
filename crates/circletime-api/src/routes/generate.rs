//! Stateless story generation endpoint.

use axum::extract::State;
use axum::{Json, Router, routing::post};
use tracing::{info, instrument};

use circletime_story::application::acquisition::acquire_story;
use circletime_story::domain::request::GenerationRequest;
use circletime_story::domain::story::Story;

use crate::error::ApiError;
use crate::state::AppState;

/// POST /generate
///
/// Returns the validated story unchanged, or an `ErrorBody` whose status is
/// the provider's status or 500.
#[instrument(skip(state, request), fields(age_bracket = %request.age_bracket))]
async fn generate(
    State(state): State<AppState>,
    Json(request): Json<GenerationRequest>,
) -> Result<Json<Story>, ApiError> {
    info!("handling generate request");

    let story = acquire_story(&request, state.transport.as_ref(), &state.settings).await?;

    Ok(Json(story))
}

/// Returns the router for story generation.
pub fn router() -> Router<AppState> {
    Router::new().route("/generate", post(generate))
}
