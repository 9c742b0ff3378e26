//! Shared application state.

use std::fmt;
use std::sync::Arc;

use circletime_core::completion::ChatTransport;
use circletime_story::application::acquisition::AcquisitionSettings;
use circletime_story::application::controller::SessionController;

/// Application state shared across all request handlers.
#[derive(Clone)]
pub struct AppState {
    /// Transport to the generative provider.
    pub transport: Arc<dyn ChatTransport>,
    /// Model and timeout for story acquisition.
    pub settings: AcquisitionSettings,
    /// The single presentation session.
    pub session: Arc<SessionController>,
}

impl AppState {
    /// Create new application state with a fresh session.
    #[must_use]
    pub fn new(transport: Arc<dyn ChatTransport>, settings: AcquisitionSettings) -> Self {
        let session = Arc::new(SessionController::new(
            Arc::clone(&transport),
            settings.clone(),
        ));
        Self {
            transport,
            settings,
            session,
        }
    }
}

impl fmt::Debug for AppState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppState")
            .field("settings", &self.settings)
            .field("session", &self.session)
            .finish_non_exhaustive()
    }
}
