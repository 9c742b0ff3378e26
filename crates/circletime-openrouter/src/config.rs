//! Provider connection settings.

use std::fmt;

/// Default chat-completions endpoint.
pub const DEFAULT_ENDPOINT: &str = "https://openrouter.ai/api/v1/chat/completions";

/// Referer sent when no site URL is configured.
pub const DEFAULT_SITE_URL: &str = "http://localhost:3000";

/// Application title sent to the provider.
pub const APP_TITLE: &str = "CircleTime AI";

/// Connection settings for the chat-completions provider.
///
/// The `Debug` output never includes the API key.
#[derive(Clone, PartialEq, Eq)]
pub struct ProviderConfig {
    /// Bearer credential. `None` makes every call fail as unavailable.
    pub api_key: Option<String>,
    /// Chat-completions endpoint URL.
    pub endpoint: String,
    /// Site identifier sent as `HTTP-Referer`.
    pub site_url: String,
    /// Application name sent as `X-Title`.
    pub app_title: String,
}

impl ProviderConfig {
    /// Creates settings with the default endpoint and title.
    #[must_use]
    pub fn new(api_key: Option<String>, site_url: Option<String>) -> Self {
        Self {
            api_key: api_key.filter(|key| !key.trim().is_empty()),
            endpoint: DEFAULT_ENDPOINT.to_owned(),
            site_url: site_url.unwrap_or_else(|| DEFAULT_SITE_URL.to_owned()),
            app_title: APP_TITLE.to_owned(),
        }
    }

    /// Overrides the endpoint URL.
    #[must_use]
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    /// Whether a usable credential is present.
    #[must_use]
    pub fn has_api_key(&self) -> bool {
        self.api_key.is_some()
    }
}

impl fmt::Debug for ProviderConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProviderConfig")
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("endpoint", &self.endpoint)
            .field("site_url", &self.site_url)
            .field("app_title", &self.app_title)
            .finish()
    }
}
