//! HTTP API layer with Axum routes.
//!
//! This crate exposes the export wizard over REST:
//! - registry listing for the selection step
//! - selection-form defaults
//! - the submit transition that produces the CSV payload

pub mod routes;

use std::path::PathBuf;
use std::sync::Arc;

use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use tessera_core::export::{ExportWizard, ReportRegistry};
use tessera_shared::clock::Clock;

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    /// Report registry, fixed at startup.
    pub registry: Arc<ReportRegistry>,
    /// Date source for selection defaults.
    pub clock: Arc<dyn Clock>,
    /// Spool directory override for export runs.
    pub spool_dir: Option<PathBuf>,
}

impl AppState {
    /// Builds a request-scoped wizard over the shared registry.
    #[must_use]
    pub fn wizard(&self) -> ExportWizard {
        let wizard = ExportWizard::new(Arc::clone(&self.registry), Arc::clone(&self.clock));
        match &self.spool_dir {
            Some(dir) => wizard.with_spool_dir(dir),
            None => wizard,
        }
    }
}

/// Creates the main application router.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .nest("/api/v1", routes::api_routes())
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state)
}
