//! Tessera API Server
//!
//! Main entry point for the Tessera export service.

mod reports;

use std::sync::Arc;

use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use tessera_api::{AppState, create_router};
use tessera_core::export::ReportRegistry;
use tessera_shared::AppConfig;
use tessera_shared::clock::SystemClock;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "tessera=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let config = AppConfig::load().expect("Failed to load configuration");

    // Build the report registry
    let mut registry = ReportRegistry::new();
    reports::register_builtin(&mut registry)?;
    info!(reports = registry.len(), "report registry initialized");

    // Create application state
    let state = AppState {
        registry: Arc::new(registry),
        clock: Arc::new(SystemClock),
        spool_dir: config.export.spool_dir.clone(),
    };

    // Create router
    let app = create_router(state);

    // Start server
    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = TcpListener::bind(&addr).await?;
    info!("Server listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
