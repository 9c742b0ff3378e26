//! Story acquisition: one provider call, then a strict output check.

use std::time::Duration;

use circletime_core::completion::{ChatEnvelope, ChatTransport};
use circletime_core::error::StoryError;
use serde_json::Value;
use tracing::{error, info, instrument, warn};
use uuid::Uuid;

use crate::domain::prompt::{self, DEFAULT_MODEL};
use crate::domain::request::GenerationRequest;
use crate::domain::story::Story;

/// Default upper bound on a single provider call.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Tunables for story acquisition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AcquisitionSettings {
    /// Model identifier sent to the provider.
    pub model: String,
    /// Time allowed for the provider call before it counts as unavailable.
    pub timeout: Duration,
}

impl Default for AcquisitionSettings {
    fn default() -> Self {
        Self {
            model: DEFAULT_MODEL.to_owned(),
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

/// Requests a story for `request` and validates what comes back.
///
/// Issues exactly one transport call for a valid request and none for an
/// invalid one. There is no retry.
///
/// # Errors
///
/// Returns `StoryError::Validation` if name or topic is blank,
/// `StoryError::ProviderUnavailable` if the call fails or exceeds
/// `settings.timeout`, `StoryError::MalformedResponse` if the envelope or its
/// content is not JSON, and `StoryError::InvalidStoryShape` if the content is
/// not a story.
#[instrument(
    skip(request, transport, settings),
    fields(correlation_id = %Uuid::new_v4(), age_bracket = %request.age_bracket)
)]
pub async fn acquire_story(
    request: &GenerationRequest,
    transport: &dyn ChatTransport,
    settings: &AcquisitionSettings,
) -> Result<Story, StoryError> {
    if let Err(err) = request.validate() {
        warn!(error = %err, "rejected story request before calling provider");
        return Err(err);
    }

    let chat_request = prompt::build_chat_request(request, &settings.model);
    info!(model = %settings.model, "requesting story from provider");

    let body = match tokio::time::timeout(settings.timeout, transport.send(&chat_request)).await {
        Ok(Ok(body)) => body,
        Ok(Err(err)) => {
            error!(error = %err, "provider call failed");
            return Err(err);
        }
        Err(_) => {
            error!(timeout = ?settings.timeout, "provider call timed out");
            return Err(StoryError::ProviderUnavailable {
                status: None,
                reason: format!("no response within {:?}", settings.timeout),
            });
        }
    };

    let story = parse_story(&body).inspect_err(|err| {
        error!(error = %err, "provider returned an unusable story");
    })?;

    info!(page_count = story.page_count(), "story acquired");
    Ok(story)
}

/// Parses a provider response body into a validated story.
///
/// # Errors
///
/// Returns `StoryError::MalformedResponse` if the envelope or its first
/// choice's content is not JSON, or there is no first choice, and
/// `StoryError::InvalidStoryShape` if the content is not a story.
pub fn parse_story(body: &str) -> Result<Story, StoryError> {
    let envelope: ChatEnvelope = serde_json::from_str(body).map_err(|e| {
        StoryError::MalformedResponse(format!("provider envelope is not valid: {e}"))
    })?;
    let content = envelope
        .first_content()
        .ok_or_else(|| StoryError::MalformedResponse("provider envelope has no choices".into()))?;
    let candidate: Value = serde_json::from_str(content).map_err(|e| {
        StoryError::MalformedResponse(format!("story content is not valid JSON: {e}"))
    })?;
    Story::from_candidate(candidate)
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use circletime_core::error::StoryError;
    use circletime_test_support::{
        FailingTransport, GatedTransport, ScriptedTransport, envelope_with, story_envelope,
        story_json,
    };

    use super::{AcquisitionSettings, acquire_story, parse_story};
    use crate::domain::request::{AgeBracket, GenerationRequest};

    fn leo_request() -> GenerationRequest {
        GenerationRequest::new("Leo", AgeBracket::EarlyYears, "rain")
    }

    #[tokio::test]
    async fn test_valid_request_makes_one_call_and_returns_story() {
        // Arrange
        let transport = ScriptedTransport::new(story_envelope(3));
        let settings = AcquisitionSettings::default();

        // Act
        let story = acquire_story(&leo_request(), &transport, &settings)
            .await
            .unwrap();

        // Assert
        assert_eq!(transport.call_count(), 1);
        assert_eq!(story.title, "Leo and the Rain");
        assert_eq!(story.page_count(), 3);

        let sent = &transport.requests()[0];
        assert_eq!(sent.model, settings.model);
        assert!(sent.messages[0].content.contains("named Leo"));
    }

    #[tokio::test]
    async fn test_story_is_returned_unchanged() {
        let transport = ScriptedTransport::new(story_envelope(2));

        let story = acquire_story(&leo_request(), &transport, &AcquisitionSettings::default())
            .await
            .unwrap();

        let expected: serde_json::Value = story_json(2);
        assert_eq!(serde_json::to_value(&story).unwrap(), expected);
    }

    #[tokio::test]
    async fn test_blank_name_or_topic_makes_no_call() {
        let transport = ScriptedTransport::new(story_envelope(3));
        let settings = AcquisitionSettings::default();

        for request in [
            GenerationRequest::new("", AgeBracket::EarlyYears, "rain"),
            GenerationRequest::new("Leo", AgeBracket::EarlyYears, " \t"),
        ] {
            let result = acquire_story(&request, &transport, &settings).await;
            assert!(matches!(result, Err(StoryError::Validation(_))));
        }

        assert_eq!(transport.call_count(), 0);
    }

    #[tokio::test]
    async fn test_provider_status_is_carried_without_parsing() {
        // Arrange
        let transport = FailingTransport::with_status(503);

        // Act
        let result =
            acquire_story(&leo_request(), &transport, &AcquisitionSettings::default()).await;

        // Assert
        assert_eq!(transport.call_count(), 1);
        match result {
            Err(StoryError::ProviderUnavailable { status, .. }) => assert_eq!(status, Some(503)),
            other => panic!("expected ProviderUnavailable, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_timeout_is_provider_unavailable() {
        // Arrange: the gate is never released.
        let transport = GatedTransport::new(Ok(story_envelope(3)));
        let settings = AcquisitionSettings {
            timeout: Duration::from_millis(20),
            ..AcquisitionSettings::default()
        };

        // Act
        let result = acquire_story(&leo_request(), &transport, &settings).await;

        // Assert
        match result {
            Err(StoryError::ProviderUnavailable { status, reason }) => {
                assert_eq!(status, None);
                assert!(reason.contains("no response"));
            }
            other => panic!("expected ProviderUnavailable, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_missing_pages_is_invalid_shape() {
        let transport = ScriptedTransport::new(envelope_with(r#"{"title":"X"}"#));

        let result =
            acquire_story(&leo_request(), &transport, &AcquisitionSettings::default()).await;

        assert!(matches!(result, Err(StoryError::InvalidStoryShape(_))));
    }

    #[tokio::test]
    async fn test_non_json_body_is_malformed() {
        let transport = ScriptedTransport::new("<html>Bad gateway</html>");

        let result =
            acquire_story(&leo_request(), &transport, &AcquisitionSettings::default()).await;

        assert!(matches!(result, Err(StoryError::MalformedResponse(_))));
    }

    #[test]
    fn test_parse_story_rejects_non_json_content() {
        let result = parse_story(&envelope_with("Once upon a time..."));

        match result {
            Err(StoryError::MalformedResponse(msg)) => assert!(msg.contains("story content")),
            other => panic!("expected MalformedResponse, got {other:?}"),
        }
    }

    #[test]
    fn test_parse_story_rejects_envelope_without_choices() {
        assert!(matches!(
            parse_story(r#"{"choices": []}"#),
            Err(StoryError::MalformedResponse(_))
        ));
        assert!(matches!(
            parse_story(r#"{"error": {"message": "rate limited"}}"#),
            Err(StoryError::MalformedResponse(_))
        ));
    }

    #[test]
    fn test_parse_story_rejects_pages_of_wrong_type() {
        let result = parse_story(&envelope_with(r#"{"title":"X","pages":"none"}"#));

        assert!(matches!(result, Err(StoryError::InvalidStoryShape(_))));
    }

    #[test]
    fn test_parse_story_accepts_empty_pages() {
        let story = parse_story(&envelope_with(r#"{"title":"X","pages":[]}"#)).unwrap();

        assert!(story.is_empty());
    }
}
