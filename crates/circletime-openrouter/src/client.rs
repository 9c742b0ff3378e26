//! `reqwest` implementation of the `ChatTransport` trait.

use async_trait::async_trait;
use circletime_core::completion::{ChatRequest, ChatTransport};
use circletime_core::error::StoryError;
use reqwest::Client;
use tracing::{debug, error, instrument};

use crate::config::ProviderConfig;

/// Chat transport for the OpenRouter chat-completions API.
#[derive(Debug, Clone)]
pub struct OpenRouterTransport {
    client: Client,
    config: ProviderConfig,
}

impl OpenRouterTransport {
    /// Creates a transport with a default HTTP client.
    #[must_use]
    pub fn new(config: ProviderConfig) -> Self {
        Self::with_client(Client::new(), config)
    }

    /// Creates a transport that sends through `client`.
    #[must_use]
    pub fn with_client(client: Client, config: ProviderConfig) -> Self {
        Self { client, config }
    }

    /// The settings this transport sends with.
    #[must_use]
    pub fn config(&self) -> &ProviderConfig {
        &self.config
    }
}

#[async_trait]
impl ChatTransport for OpenRouterTransport {
    #[instrument(
        skip(self, request),
        fields(model = %request.model, endpoint = %self.config.endpoint)
    )]
    async fn send(&self, request: &ChatRequest) -> Result<String, StoryError> {
        let Some(api_key) = self.config.api_key.as_deref() else {
            error!("provider API key is not configured");
            return Err(StoryError::ProviderUnavailable {
                status: None,
                reason: "provider API key is not configured".into(),
            });
        };

        debug!(message_count = request.messages.len(), "sending chat request");

        let response = self
            .client
            .post(&self.config.endpoint)
            .bearer_auth(api_key)
            .header("HTTP-Referer", &self.config.site_url)
            .header("X-Title", &self.config.app_title)
            .json(request)
            .send()
            .await
            .map_err(|e| {
                let e = e.without_url();
                error!(error = %e, "HTTP request failed");
                StoryError::ProviderUnavailable {
                    status: None,
                    reason: format!("request failed: {e}"),
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            error!(status = %status, error = %error_text, "provider API error");
            return Err(StoryError::ProviderUnavailable {
                status: Some(status.as_u16()),
                reason: format!("provider answered {status}"),
            });
        }

        response.text().await.map_err(|e| {
            let e = e.without_url();
            error!(error = %e, "failed to read response body");
            StoryError::ProviderUnavailable {
                status: Some(status.as_u16()),
                reason: format!("response body could not be read: {e}"),
            }
        })
    }
}
