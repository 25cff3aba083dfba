//! Application state shared across handlers

use crate::config::Settings;
use crate::search::SuggestSearch;
use crate::sources::SourceRegistry;
use std::sync::Arc;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// Global settings
    pub settings: Arc<Settings>,
    /// Source registry
    pub registry: Arc<SourceRegistry>,
    /// Suggestion fan-out
    pub search: Arc<SuggestSearch>,
}

impl AppState {
    /// Create new application state
    pub fn new(settings: Settings, registry: SourceRegistry) -> Self {
        let settings = Arc::new(settings);
        let registry = Arc::new(registry);
        let search = Arc::new(SuggestSearch::with_settings(
            registry.clone(),
            &settings.search,
        ));

        Self {
            settings,
            registry,
            search,
        }
    }

    /// Get instance name
    pub fn instance_name(&self) -> &str {
        &self.settings.general.instance_name
    }
}
