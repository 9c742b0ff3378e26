//! Test transports: mock `ChatTransport` implementations for tests.

use std::sync::Mutex;

use async_trait::async_trait;
use circletime_core::completion::{ChatRequest, ChatTransport};
use circletime_core::error::StoryError;
use tokio::sync::Notify;

/// A transport that answers every call with the same body and records each
/// request it receives.
#[derive(Debug)]
pub struct ScriptedTransport {
    body: String,
    requests: Mutex<Vec<ChatRequest>>,
}

impl ScriptedTransport {
    /// Create a transport that returns `body` from every `send`.
    #[must_use]
    pub fn new(body: impl Into<String>) -> Self {
        Self {
            body: body.into(),
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Returns a snapshot of all requests sent so far.
    ///
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    pub fn requests(&self) -> Vec<ChatRequest> {
        self.requests.lock().unwrap().clone()
    }

    /// Number of outbound calls made.
    ///
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    pub fn call_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }
}

#[async_trait]
impl ChatTransport for ScriptedTransport {
    async fn send(&self, request: &ChatRequest) -> Result<String, StoryError> {
        self.requests.lock().unwrap().push(request.clone());
        Ok(self.body.clone())
    }
}

/// A transport that always fails as an unreachable or refusing provider.
#[derive(Debug)]
pub struct FailingTransport {
    status: Option<u16>,
    calls: Mutex<usize>,
}

impl FailingTransport {
    /// Fails with the given upstream HTTP status.
    #[must_use]
    pub fn with_status(status: u16) -> Self {
        Self {
            status: Some(status),
            calls: Mutex::new(0),
        }
    }

    /// Fails without any HTTP status, as on a connection error.
    #[must_use]
    pub fn unreachable() -> Self {
        Self {
            status: None,
            calls: Mutex::new(0),
        }
    }

    /// Number of outbound calls attempted.
    ///
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    pub fn call_count(&self) -> usize {
        *self.calls.lock().unwrap()
    }
}

#[async_trait]
impl ChatTransport for FailingTransport {
    async fn send(&self, _request: &ChatRequest) -> Result<String, StoryError> {
        *self.calls.lock().unwrap() += 1;
        Err(StoryError::ProviderUnavailable {
            status: self.status,
            reason: "connection refused".into(),
        })
    }
}

/// A transport that holds each call open until the test releases it.
/// Used to interleave user actions with an in-flight acquisition.
#[derive(Debug)]
pub struct GatedTransport {
    response: Result<String, StoryError>,
    entered: Notify,
    release: Notify,
}

impl GatedTransport {
    /// Create a gate that answers with `response` once released.
    #[must_use]
    pub fn new(response: Result<String, StoryError>) -> Self {
        Self {
            response,
            entered: Notify::new(),
            release: Notify::new(),
        }
    }

    /// Waits until a call has reached the transport.
    pub async fn wait_until_called(&self) {
        self.entered.notified().await;
    }

    /// Lets one pending (or the next) call complete.
    pub fn release(&self) {
        self.release.notify_one();
    }
}

#[async_trait]
impl ChatTransport for GatedTransport {
    async fn send(&self, _request: &ChatRequest) -> Result<String, StoryError> {
        self.entered.notify_one();
        self.release.notified().await;
        self.response.clone()
    }
}
