//! OpenRouter-backed chat transport for the CircleTime story engine.

pub mod client;
pub mod config;

pub use client::OpenRouterTransport;
pub use config::ProviderConfig;
