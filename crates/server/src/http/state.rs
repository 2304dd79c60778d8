//! Application state for the HTTP server.

use std::sync::Arc;

use data_loader::Catalog;

use crate::orchestrator::RecommendationOrchestrator;

/// Shared application state passed to all handlers.
#[derive(Clone)]
pub struct AppState {
    /// The catalog, loaded once at startup and never mutated
    pub catalog: Arc<Catalog>,
    pub orchestrator: RecommendationOrchestrator,
}

impl AppState {
    pub fn new(catalog: Arc<Catalog>) -> Self {
        let orchestrator = RecommendationOrchestrator::new(catalog.clone());
        Self {
            catalog,
            orchestrator,
        }
    }
}
