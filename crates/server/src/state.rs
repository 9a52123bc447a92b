use std::sync::Arc;
use nearby_core::{Config, FetchOrchestrator, SanitizedConfig};

/// Shared application state
pub struct AppState {
    config: Config,
    orchestrator: Arc<FetchOrchestrator>,
}

impl AppState {
    pub fn new(config: Config, orchestrator: Arc<FetchOrchestrator>) -> Self {
        Self {
            config,
            orchestrator,
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn sanitized_config(&self) -> SanitizedConfig {
        SanitizedConfig::from(&self.config)
    }

    /// Owned handle, for work that must outlive the request.
    pub fn orchestrator(&self) -> Arc<FetchOrchestrator> {
        Arc::clone(&self.orchestrator)
    }
}
