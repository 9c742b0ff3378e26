//! Session controller: owns the single session and runs its effects.

use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use circletime_core::completion::ChatTransport;
use circletime_core::error::StoryError;
use tracing::{Instrument, debug, error, info};

use crate::application::acquisition::{AcquisitionSettings, acquire_story};
use crate::domain::request::GenerationRequest;
use crate::domain::session::{Effect, SessionEvent, SessionState, SessionView, transition};

/// Drives one [`SessionState`] from user actions and acquisition results.
///
/// The state lock is never held across the provider call. Each acquisition
/// runs on its own task and always reports back tagged with its generation,
/// so a reset issued while it was in flight wins and a caller that stops
/// waiting cannot leave the session stuck in Loading.
pub struct SessionController {
    state: Arc<Mutex<SessionState>>,
    transport: Arc<dyn ChatTransport>,
    settings: AcquisitionSettings,
}

impl fmt::Debug for SessionController {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SessionController")
            .field("state", &self.state)
            .field("settings", &self.settings)
            .finish_non_exhaustive()
    }
}

impl SessionController {
    /// Creates a controller with a fresh session.
    #[must_use]
    pub fn new(transport: Arc<dyn ChatTransport>, settings: AcquisitionSettings) -> Self {
        Self {
            state: Arc::new(Mutex::new(SessionState::new())),
            transport,
            settings,
        }
    }

    /// Current render model.
    #[must_use]
    pub fn view(&self) -> SessionView {
        lock(&self.state).view()
    }

    /// Snapshot of the full session state.
    #[must_use]
    pub fn snapshot(&self) -> SessionState {
        lock(&self.state).clone()
    }

    /// Starts a story and waits for it to load or fail.
    ///
    /// Ignored unless the session is Configuring. Dropping the returned
    /// future does not cancel the acquisition; its result is still applied.
    ///
    /// Must be called from within a Tokio runtime.
    pub async fn start(&self, request: GenerationRequest) -> SessionView {
        let (view, effect) = dispatch(&self.state, SessionEvent::StartRequested(request));
        let Some(Effect::Acquire {
            generation,
            request,
        }) = effect
        else {
            return view;
        };

        info!(generation, "story session loading");
        let state = Arc::clone(&self.state);
        let transport = Arc::clone(&self.transport);
        let settings = self.settings.clone();
        let task = tokio::spawn(
            async move {
                let event = match acquire_story(&request, transport.as_ref(), &settings).await {
                    Ok(story) => SessionEvent::AcquisitionSucceeded { generation, story },
                    Err(error) => SessionEvent::AcquisitionFailed { generation, error },
                };
                dispatch(&state, event).0
            }
            .in_current_span(),
        );

        match task.await {
            Ok(view) => view,
            Err(join_error) => {
                error!(error = %join_error, generation, "story acquisition task did not finish");
                let error = StoryError::ProviderUnavailable {
                    status: None,
                    reason: "story acquisition was interrupted".into(),
                };
                dispatch(
                    &self.state,
                    SessionEvent::AcquisitionFailed { generation, error },
                )
                .0
            }
        }
    }

    /// Chooses `option_index` on page `page_index`.
    pub fn select_option(&self, page_index: usize, option_index: usize) -> SessionView {
        dispatch(
            &self.state,
            SessionEvent::OptionSelected {
                page_index,
                option_index,
            },
        )
        .0
    }

    /// Abandons the current story and returns to Configuring.
    pub fn reset(&self) -> SessionView {
        dispatch(&self.state, SessionEvent::ResetRequested).0
    }
}

fn dispatch(state: &Mutex<SessionState>, event: SessionEvent) -> (SessionView, Option<Effect>) {
    let mut state = lock(state);
    let before = state.phase();
    let (next, effect) = transition(std::mem::take(&mut *state), event);
    *state = next;
    debug!(
        from = ?before,
        to = ?state.phase(),
        generation = state.generation(),
        "session transition"
    );
    (state.view(), effect)
}

fn lock(state: &Mutex<SessionState>) -> MutexGuard<'_, SessionState> {
    state.lock().unwrap_or_else(PoisonError::into_inner)
}
