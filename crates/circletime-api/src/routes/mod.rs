//! Route modules.

use axum::Router;

use crate::state::AppState;

pub mod age_brackets;
pub mod generate;
pub mod health;
pub mod session;

/// Builds the full application router.
pub fn app(state: AppState) -> Router {
    Router::new()
        .merge(health::router())
        .nest("/api", generate::router().merge(age_brackets::router()))
        .nest("/api/v1/session", session::router())
        .with_state(state)
}
