//! Suggestion fan-out across registered sources

use crate::config::SearchSettings;
use crate::error::{Result, SourceError};
use crate::results::SuggestionResult;
use crate::sources::{Source, SourceRegistry};
use futures::future::join_all;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::time::timeout;
use tracing::{debug, error, info, warn};

/// Search executor that queries every eligible source concurrently
pub struct SuggestSearch {
    /// Registered sources
    registry: Arc<SourceRegistry>,
    /// Rows requested when the caller gives no limit
    default_limit: usize,
    /// How long to wait for each source
    source_timeout: Duration,
}

impl SuggestSearch {
    /// Create a new search executor
    pub fn new(registry: Arc<SourceRegistry>) -> Self {
        Self {
            registry,
            default_limit: 10,
            source_timeout: Duration::from_secs(3),
        }
    }

    /// Create a search executor from the search settings
    pub fn with_settings(registry: Arc<SourceRegistry>, settings: &SearchSettings) -> Self {
        Self::new(registry)
            .with_default_limit(settings.default_limit)
            .with_timeout(Duration::from_secs_f64(settings.source_timeout.max(0.0)))
    }

    /// Set the per-source timeout
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.source_timeout = timeout;
        self
    }

    /// Set the default row limit
    pub fn with_default_limit(mut self, limit: usize) -> Self {
        self.default_limit = limit;
        self
    }

    pub fn registry(&self) -> &Arc<SourceRegistry> {
        &self.registry
    }

    pub fn default_limit(&self) -> usize {
        self.default_limit
    }

    /// Sources whose query threshold the query meets, in registry order
    pub fn eligible_sources(&self, query: &str) -> Vec<Arc<dyn Source>> {
        let length = query.chars().count();
        self.registry
            .sources()
            .into_iter()
            .filter(|source| source.query_threshold() as usize <= length)
            .cloned()
            .collect()
    }

    /// Query every eligible source and collect the answers
    ///
    /// Sources that miss the timeout are left running and omitted.
    pub async fn execute(&self, query: &str, limit: Option<usize>) -> Vec<SuggestionResult> {
        let limit = limit.unwrap_or(self.default_limit);
        let sources = self.eligible_sources(query);

        info!(
            "Querying {} of {} sources for '{}'",
            sources.len(),
            self.registry.len(),
            query
        );

        let futures: Vec<_> = sources
            .into_iter()
            .map(|source| self.query_source(source, query.to_string(), limit))
            .collect();

        join_all(futures).await.into_iter().flatten().collect()
    }

    /// Query a single source in its own task
    async fn query_source(
        &self,
        source: Arc<dyn Source>,
        query: String,
        limit: usize,
    ) -> Option<SuggestionResult> {
        let name = source.flattened_component_name();
        let start = Instant::now();

        let task = tokio::spawn(async move { source.suggestions(&query, limit).await });

        match timeout(self.source_timeout, task).await {
            Ok(Ok(result)) => {
                debug!(
                    "Source {} returned {} rows in {:?}",
                    name,
                    result.count(),
                    start.elapsed()
                );
                Some(result)
            }
            Ok(Err(e)) => {
                error!("Source {} task failed: {}", name, e);
                None
            }
            Err(_) => {
                warn!(
                    "Source {} did not answer within {:?}",
                    name, self.source_timeout
                );
                None
            }
        }
    }

    /// Refresh a shortcut through the named source
    pub async fn refresh(
        &self,
        source_name: &str,
        shortcut_id: &str,
        extra_data: Option<&str>,
    ) -> Result<Option<SuggestionResult>> {
        let source = self
            .registry
            .get(source_name)
            .ok_or_else(|| SourceError::UnknownSource(source_name.to_string()))?;

        Ok(source.refresh_shortcut(shortcut_id, extra_data).await)
    }
}
