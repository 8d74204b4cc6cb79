//! Forum Service - HTTP front door for the forum engine
//!
//! This is the main entry point for the forum service.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use forum_service::{create_router, AppState, ServiceConfig};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,forum=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting Forum Service");

    let config = ServiceConfig::from_env();

    tracing::info!(
        listen_addr = %config.listen_addr,
        max_body_bytes = config.max_body_bytes,
        request_timeout_seconds = config.request_timeout_seconds,
        metrics_interval_secs = config.engine.metrics_interval.as_secs(),
        "Service configuration loaded"
    );

    let state = AppState::new(config.clone());

    let app = create_router(state);
    tracing::info!("Router configured with all API endpoints");

    tracing::info!(listen_addr = %config.listen_addr, "Starting HTTP server");
    let listener = tokio::net::TcpListener::bind(&config.listen_addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
