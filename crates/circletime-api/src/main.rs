//! CircleTime API server entry point.

use std::error::Error;
use std::sync::Arc;

use circletime_api::config::ServerConfig;
use circletime_api::routes;
use circletime_api::state::AppState;
use circletime_openrouter::OpenRouterTransport;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    // Initialize tracing subscriber.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .json()
        .init();

    tracing::info!("Starting CircleTime API server");

    // Read configuration from environment.
    let config = ServerConfig::from_env()?;
    let transport = Arc::new(OpenRouterTransport::new(config.provider.clone()));
    let provider = transport.config();
    if !provider.has_api_key() {
        tracing::warn!("OPENROUTER_API_KEY is not set; story requests will fail until it is");
    }
    tracing::info!(
        model = %config.acquisition.model,
        timeout = ?config.acquisition.timeout,
        endpoint = %provider.endpoint,
        site_url = %provider.site_url,
        "provider configured"
    );

    // Build application state.
    let app_state = AppState::new(transport, config.acquisition.clone());

    // Build router.
    // TODO: Replace CorsLayer::permissive() with restricted origins for production.
    let app = routes::app(app_state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    // Start server.
    let addr = config.socket_addr()?;
    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;

    axum::serve(listener, app).await?;

    Ok(())
}
