//! Chat-completion wire types and the transport port.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::StoryError;

/// A message in the chat-completion format.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    /// "system", "user", or "assistant".
    pub role: String,
    /// Message content.
    pub content: String,
}

impl ChatMessage {
    /// Creates a system message.
    #[must_use]
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: "system".to_owned(),
            content: content.into(),
        }
    }
}

/// Structured-output mode requested from the provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResponseFormat {
    /// Output mode, e.g. `json_object`.
    #[serde(rename = "type")]
    pub kind: String,
}

impl ResponseFormat {
    /// JSON-object mode.
    #[must_use]
    pub fn json_object() -> Self {
        Self {
            kind: "json_object".to_owned(),
        }
    }
}

/// Chat-completion request body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChatRequest {
    /// Model identifier.
    pub model: String,
    /// Conversation messages.
    pub messages: Vec<ChatMessage>,
    /// Structured-output mode.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub response_format: Option<ResponseFormat>,
}

/// The message inside a response choice.
#[derive(Debug, Clone, Deserialize)]
pub struct EnvelopeMessage {
    /// Generated content. For story requests this is itself a JSON document.
    pub content: String,
}

/// One choice in a chat-completion response.
#[derive(Debug, Clone, Deserialize)]
pub struct EnvelopeChoice {
    /// The generated message.
    pub message: EnvelopeMessage,
}

/// Chat-completion response envelope. Unknown fields are ignored.
#[derive(Debug, Clone, Deserialize)]
pub struct ChatEnvelope {
    /// Response choices, best first.
    pub choices: Vec<EnvelopeChoice>,
}

impl ChatEnvelope {
    /// Content of the first choice, if any.
    #[must_use]
    pub fn first_content(&self) -> Option<&str> {
        self.choices.first().map(|choice| choice.message.content.as_str())
    }
}

/// Port for sending one chat-completion request to a provider.
#[async_trait]
pub trait ChatTransport: Send + Sync {
    /// Sends `request` and returns the raw response body.
    ///
    /// Implementations make exactly one outbound call per invocation.
    ///
    /// # Errors
    ///
    /// Returns `StoryError::ProviderUnavailable` when the call fails or the
    /// provider answers with a non-success status. The body of a failed
    /// call is never returned.
    async fn send(&self, request: &ChatRequest) -> Result<String, StoryError>;
}
