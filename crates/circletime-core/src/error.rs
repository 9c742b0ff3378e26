//! Story error taxonomy.

use thiserror::Error;

/// Top-level error type for story acquisition and presentation.
///
/// The `reason` / message payloads are diagnostic text for logs. What a
/// learner or teacher sees comes from [`StoryError::user_message`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoryError {
    /// The caller supplied unusable input. Never reaches the network.
    #[error("validation error: {0}")]
    Validation(String),

    /// The provider could not be reached, refused the call, or timed out.
    #[error("provider unavailable (status {status:?}): {reason}")]
    ProviderUnavailable {
        /// Upstream HTTP status, when one was received.
        status: Option<u16>,
        /// Diagnostic description of the failure.
        reason: String,
    },

    /// The provider envelope or its embedded content was not valid JSON.
    #[error("malformed response: {0}")]
    MalformedResponse(String),

    /// The parsed content does not have the story shape.
    #[error("invalid story shape: {0}")]
    InvalidStoryShape(String),
}

impl StoryError {
    /// Short user-facing text for this error.
    #[must_use]
    pub fn user_message(&self) -> &'static str {
        match self {
            Self::Validation(_) => "Please enter a name and a topic for the class!",
            Self::ProviderUnavailable { .. } => {
                "The story service is busy right now. Please check your connection and try again."
            }
            Self::MalformedResponse(_) | Self::InvalidStoryShape(_) => {
                "The magic book is stuck! Let's try clicking 'Start' again."
            }
        }
    }

    /// HTTP status to report for this error.
    ///
    /// Provider failures carry the upstream status when it is an error
    /// status; everything that went wrong locally is a 500.
    #[must_use]
    pub fn http_status(&self) -> u16 {
        match self {
            Self::Validation(_) => 400,
            Self::ProviderUnavailable {
                status: Some(status),
                ..
            } if (400..600).contains(status) => *status,
            _ => 500,
        }
    }

    /// Machine-readable error code.
    #[must_use]
    pub fn code(&self) -> &'static str {
        match self {
            Self::Validation(_) => "validation_error",
            Self::ProviderUnavailable { .. } => "provider_unavailable",
            Self::MalformedResponse(_) => "malformed_response",
            Self::InvalidStoryShape(_) => "invalid_story_shape",
        }
    }

    /// Whether asking again might succeed without changing the input.
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        !matches!(self, Self::Validation(_))
    }
}
