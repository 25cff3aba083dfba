//! Source registry for managing available suggestion sources

use super::traits::Source;
use crate::config::ComponentName;
use std::collections::HashMap;
use std::sync::Arc;

/// Registry of suggestion sources, keyed by flattened component name
pub struct SourceRegistry {
    /// Sources by name
    sources: HashMap<String, Arc<dyn Source>>,
    /// Registration order
    order: Vec<String>,
}

impl SourceRegistry {
    /// Create a new empty registry
    pub fn new() -> Self {
        Self {
            sources: HashMap::new(),
            order: Vec::new(),
        }
    }

    /// Register a source, replacing any source with the same component
    pub fn register(&mut self, source: Arc<dyn Source>) {
        let name = source.flattened_component_name();
        if self.sources.insert(name.clone(), source).is_none() {
            self.order.push(name);
        }
    }

    /// Get a source by flattened component name
    pub fn get(&self, name: &str) -> Option<&Arc<dyn Source>> {
        self.sources.get(name).or_else(|| {
            // Accept the fully qualified form too
            let component = ComponentName::unflatten(name)?;
            self.sources.get(&component.flatten_to_short_string())
        })
    }

    /// Get a source by component
    pub fn get_by_component(&self, component: &ComponentName) -> Option<&Arc<dyn Source>> {
        self.sources.get(&component.flatten_to_short_string())
    }

    /// All sources in registration order
    pub fn sources(&self) -> Vec<&Arc<dyn Source>> {
        self.order
            .iter()
            .filter_map(|name| self.sources.get(name))
            .collect()
    }

    /// The source flagged as the web suggestion source, if any
    pub fn web_source(&self) -> Option<&Arc<dyn Source>> {
        self.sources()
            .into_iter()
            .find(|s| s.is_web_suggestion_source())
    }

    /// Get all source names in registration order
    pub fn names(&self) -> Vec<&str> {
        self.order.iter().map(|s| s.as_str()).collect()
    }

    /// Check if a source exists
    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Get number of registered sources
    pub fn len(&self) -> usize {
        self.sources.len()
    }

    /// Check if registry is empty
    pub fn is_empty(&self) -> bool {
        self.sources.is_empty()
    }
}

impl Default for SourceRegistry {
    fn default() -> Self {
        Self::new()
    }
}
