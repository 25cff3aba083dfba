//! Source loader for initializing sources from configuration

use super::registry::SourceRegistry;
use super::searchable::SearchableSource;
use super::traits::Source;
use crate::config::{Settings, SourceConfig};
use crate::error::Result;
use crate::packages::PackageRegistry;
use crate::provider::ProviderClient;
use std::sync::Arc;
use tracing::{info, warn};

/// Loader for initializing sources from configuration
pub struct SourceLoader;

impl SourceLoader {
    /// Load every enabled source declared in the settings
    ///
    /// Sources whose component cannot be resolved are logged and skipped.
    pub fn load(
        settings: &Settings,
        packages: Arc<dyn PackageRegistry>,
        client: Arc<dyn ProviderClient>,
    ) -> SourceRegistry {
        let mut registry = SourceRegistry::new();

        for config in &settings.sources {
            if config.disabled {
                info!("Skipping disabled source: {}", config.component);
                continue;
            }

            match Self::create_source(config.clone(), packages.clone(), client.clone()) {
                Ok(source) => {
                    info!("Loaded source: {}", source);
                    registry.register(source);
                }
                Err(e) => {
                    warn!("Failed to load source {}: {}", config.component, e);
                }
            }
        }

        info!("Loaded {} sources", registry.len());
        registry
    }

    /// Create a source instance from its configuration
    pub fn create_source(
        config: SourceConfig,
        packages: Arc<dyn PackageRegistry>,
        client: Arc<dyn ProviderClient>,
    ) -> Result<Arc<dyn Source>> {
        let source = SearchableSource::new(config, packages, client)?;
        Ok(Arc::new(source))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sources::testing::{Behavior, CountingPackages, FakeProvider};

    const SETTINGS: &str = r#"
sources:
  - component: com.example.contacts/.Search
    suggest_authority: com.example.contacts.provider
  - component: com.example.contacts/.Missing
    suggest_authority: com.example.contacts.provider
  - component: com.example.contacts/.Search
    disabled: true
"#;

    #[test]
    fn test_load_skips_unresolvable_and_disabled() {
        let settings = Settings::from_yaml(SETTINGS).unwrap();
        let registry = SourceLoader::load(
            &settings,
            Arc::new(CountingPackages::new()),
            Arc::new(FakeProvider::new(Behavior::NoCursor)),
        );

        assert_eq!(registry.len(), 1);
        assert!(registry.contains("com.example.contacts/.Search"));
        assert!(!registry.contains("com.example.contacts/.Missing"));
    }

    #[test]
    fn test_load_empty_settings() {
        let registry = SourceLoader::load(
            &Settings::default(),
            Arc::new(CountingPackages::new()),
            Arc::new(FakeProvider::new(Behavior::NoCursor)),
        );
        assert!(registry.is_empty());
    }
}
