//! Server configuration read from the environment.

use std::net::SocketAddr;
use std::time::Duration;

use circletime_openrouter::ProviderConfig;
use circletime_story::application::acquisition::{AcquisitionSettings, DEFAULT_TIMEOUT};
use circletime_story::domain::prompt::DEFAULT_MODEL;

use crate::error::AppError;

/// Everything the server needs at startup.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Interface to bind.
    pub host: String,
    /// Port to bind.
    pub port: u16,
    /// Provider connection settings.
    pub provider: ProviderConfig,
    /// Model and timeout for story acquisition.
    pub acquisition: AcquisitionSettings,
}

impl ServerConfig {
    /// Reads configuration from process environment variables.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Config` if a variable is set but unparseable.
    pub fn from_env() -> Result<Self, AppError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Reads configuration through `lookup`.
    ///
    /// A missing `OPENROUTER_API_KEY` is not an error here: the server
    /// starts, and story requests report the provider as unavailable.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Config` if `PORT` or `PROVIDER_TIMEOUT_SECS` is
    /// not a valid number, or the timeout is zero.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, AppError> {
        let host = lookup("HOST").unwrap_or_else(|| "0.0.0.0".to_string());
        let port: u16 = lookup("PORT")
            .unwrap_or_else(|| "3000".to_string())
            .parse()
            .map_err(|e| AppError::Config(format!("PORT must be a valid u16: {e}")))?;

        let timeout = match lookup("PROVIDER_TIMEOUT_SECS") {
            Some(raw) => {
                let secs: u64 = raw.parse().map_err(|e| {
                    AppError::Config(format!("PROVIDER_TIMEOUT_SECS must be a whole number: {e}"))
                })?;
                if secs == 0 {
                    return Err(AppError::Config(
                        "PROVIDER_TIMEOUT_SECS must be greater than zero".into(),
                    ));
                }
                Duration::from_secs(secs)
            }
            None => DEFAULT_TIMEOUT,
        };

        let model = lookup("OPENROUTER_MODEL")
            .filter(|model| !model.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_MODEL.to_string());

        let mut provider = ProviderConfig::new(lookup("OPENROUTER_API_KEY"), lookup("SITE_URL"));
        if let Some(endpoint) = lookup("OPENROUTER_ENDPOINT") {
            provider = provider.with_endpoint(endpoint);
        }

        Ok(Self {
            host,
            port,
            provider,
            acquisition: AcquisitionSettings { model, timeout },
        })
    }

    /// The address to listen on.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Config` if `host:port` is not a socket address.
    pub fn socket_addr(&self) -> Result<SocketAddr, AppError> {
        format!("{}:{}", self.host, self.port)
            .parse()
            .map_err(|e| AppError::Config(format!("invalid HOST:PORT combination: {e}")))
    }
}
