//! Age bracket choices for the configuration form.

use axum::{Json, Router, routing::get};
use serde::Serialize;

use circletime_story::domain::request::AgeBracket;

use crate::state::AppState;

/// One selectable age bracket.
#[derive(Debug, Serialize)]
pub struct AgeBracketOption {
    /// Wire value accepted as `ageBracket`.
    pub value: AgeBracket,
    /// Text shown in the selector.
    pub label: &'static str,
    /// Whether the form preselects this bracket.
    pub default: bool,
}

/// GET /age-brackets
async fn list_age_brackets() -> Json<Vec<AgeBracketOption>> {
    let default = AgeBracket::default();
    Json(
        AgeBracket::ALL
            .into_iter()
            .map(|bracket| AgeBracketOption {
                value: bracket,
                label: bracket.label(),
                default: bracket == default,
            })
            .collect(),
    )
}

/// Returns the router for age bracket choices.
pub fn router() -> Router<AppState> {
    Router::new().route("/age-brackets", get(list_age_brackets))
}
