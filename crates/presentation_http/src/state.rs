//! Application state shared across handlers

use std::sync::Arc;

use application::SightingService;
use infrastructure::{AppConfig, ErrorStatusPolicy};

/// Shared application state
///
/// Built once in `main` and handed to the router; handlers only read it.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Dispatches decoded queries to the resolver
    pub sighting_service: Arc<SightingService>,
    /// Application configuration
    pub config: Arc<AppConfig>,
}

impl AppState {
    pub fn new(sighting_service: SightingService, config: AppConfig) -> Self {
        Self {
            sighting_service: Arc::new(sighting_service),
            config: Arc::new(config),
        }
    }

    pub fn error_status_policy(&self) -> ErrorStatusPolicy {
        self.config.error_status_policy
    }
}
