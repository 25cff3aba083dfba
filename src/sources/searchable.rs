//! Source backed by a searchable component's suggestion provider

use super::memo::Memo;
use super::traits::Source;
use crate::config::{ComponentName, SourceConfig};
use crate::error::{Result, SourceError};
use crate::icons::{CachingIconLoader, IconLoader, PackageIconLoader};
use crate::packages::{
    resource_locator, ActivityInfo, Icon, PackageRegistry, DEFAULT_SOURCE_ICON,
};
use crate::provider::{
    read_rows, shortcut_request, suggestions_request, ProviderClient, ProviderRequest,
};
use crate::results::{ProviderOutcome, SuggestionResult};
use async_trait::async_trait;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;
use tracing::{debug, error};
use url::Url;

/// Icons kept per provider package
const ICON_CACHE_CAPACITY: u64 = 256;

/// A single suggestion source, e.g. Contacts
///
/// Each query is one round trip to the provider and may block on I/O, so it
/// belongs on a worker rather than a UI or control thread. Provider failures
/// never reach the caller: [`Source::suggestions`] degrades to an empty result
/// and [`Source::refresh_shortcut`] to `None`.
pub struct SearchableSource {
    config: Arc<SourceConfig>,
    activity: ActivityInfo,
    packages: Arc<dyn PackageRegistry>,
    client: Arc<dyn ProviderClient>,
    icon_loader: Option<Arc<dyn IconLoader>>,
    label: Memo<String>,
    source_icon: Memo<Option<Icon>>,
    source_icon_locator: Memo<Option<Url>>,
}

impl SearchableSource {
    /// Create a source; fails if the component cannot be resolved
    pub fn new(
        config: impl Into<Arc<SourceConfig>>,
        packages: Arc<dyn PackageRegistry>,
        client: Arc<dyn ProviderClient>,
    ) -> Result<Self> {
        let config = config.into();
        let activity = packages.activity_info(&config.component)?;
        let icon_loader = Self::create_icon_loader(&packages, config.suggest_package.as_deref());

        Ok(Self {
            config,
            activity,
            packages,
            client,
            icon_loader,
            label: Memo::new(),
            source_icon: Memo::new(),
            source_icon_locator: Memo::new(),
        })
    }

    fn create_icon_loader(
        packages: &Arc<dyn PackageRegistry>,
        provider_package: Option<&str>,
    ) -> Option<Arc<dyn IconLoader>> {
        let package = provider_package?;
        if !packages.contains_package(package) {
            error!("Suggestion provider package not found: {}", package);
            return None;
        }
        let loader = PackageIconLoader::new(package, packages.clone());
        Some(Arc::new(CachingIconLoader::new(loader, ICON_CACHE_CAPACITY)))
    }

    pub fn config(&self) -> &Arc<SourceConfig> {
        &self.config
    }

    pub fn activity(&self) -> &ActivityInfo {
        &self.activity
    }

    pub fn has_icon_loader(&self) -> bool {
        self.icon_loader.is_some()
    }

    fn source_icon_resource(&self) -> u32 {
        self.activity.icon_resource().unwrap_or(DEFAULT_SOURCE_ICON)
    }

    /// Query the provider without collapsing failures
    pub async fn try_suggestions(&self, query: &str, limit: usize) -> ProviderOutcome {
        let request = match suggestions_request(&self.config, query, limit) {
            Ok(request) => request,
            Err(SourceError::ProviderUnavailable { .. }) => return ProviderOutcome::Unavailable,
            Err(e) => return ProviderOutcome::Failed(e),
        };

        debug!(
            "query({}, selection={:?}, args={:?})",
            request.uri, request.selection, request.selection_args
        );
        self.run(&request).await
    }

    /// Refresh a shortcut without collapsing failures
    pub async fn try_refresh_shortcut(
        &self,
        shortcut_id: &str,
        extra_data: Option<&str>,
    ) -> ProviderOutcome {
        let request = match shortcut_request(&self.config, shortcut_id, extra_data) {
            Ok(request) => request,
            Err(SourceError::ProviderUnavailable { .. }) => return ProviderOutcome::Unavailable,
            Err(e) => return ProviderOutcome::Failed(e),
        };

        debug!("Requesting refresh {}", request.uri);
        self.run(&request).await
    }

    /// One provider round trip; the cursor is released on every path
    async fn run(&self, request: &ProviderRequest) -> ProviderOutcome {
        let mut cursor = match self.client.query(request).await {
            Ok(Some(cursor)) => cursor,
            Ok(None) => return ProviderOutcome::Rows(Vec::new()),
            Err(e) => return ProviderOutcome::Failed(SourceError::query_failed(&request.uri, &e)),
        };

        match read_rows(cursor.as_mut()) {
            Ok(rows) => ProviderOutcome::Rows(rows),
            Err(e) => ProviderOutcome::Failed(SourceError::query_failed(&request.uri, &e)),
        }
    }
}

#[async_trait]
impl Source for SearchableSource {
    fn component_name(&self) -> &ComponentName {
        &self.config.component
    }

    fn label(&self) -> &str {
        self.label
            .get_or_compute(|| self.packages.load_label(&self.activity))
    }

    fn source_icon(&self) -> Option<Icon> {
        self.source_icon
            .get_or_compute(|| {
                self.packages
                    .drawable(&self.activity.package_name, self.source_icon_resource())
            })
            .clone()
    }

    fn source_icon_locator(&self) -> Option<Url> {
        self.source_icon_locator
            .get_or_compute(|| {
                resource_locator(self.component_name().package_name(), self.source_icon_resource())
            })
            .clone()
    }

    fn icon(&self, id: &str) -> Option<Icon> {
        self.icon_loader.as_ref()?.icon(id)
    }

    fn icon_locator(&self, id: &str) -> Option<Url> {
        self.icon_loader.as_ref()?.icon_locator(id)
    }

    fn settings_description(&self) -> Option<String> {
        let res = self.config.settings_description?;
        self.packages.text(&self.activity.package_name, res)
    }

    fn query_threshold(&self) -> u32 {
        self.config.suggest_threshold
    }

    fn query_after_zero_results(&self) -> bool {
        self.config.query_after_zero_results
    }

    fn should_rewrite_query_from_data(&self) -> bool {
        self.config.rewrite_query_from_data
    }

    fn should_rewrite_query_from_text(&self) -> bool {
        self.config.rewrite_query_from_text
    }

    fn is_web_suggestion_source(&self) -> bool {
        self.config.web_source
    }

    fn default_intent_action(&self) -> Option<&str> {
        self.config.suggest_intent_action.as_deref()
    }

    fn default_intent_data(&self) -> Option<&str> {
        self.config.suggest_intent_data.as_deref()
    }

    fn suggest_action_msg(&self, key_code: i32) -> Option<&str> {
        self.config
            .find_action_key(key_code)?
            .suggest_action_msg
            .as_deref()
    }

    fn suggest_action_msg_column(&self, key_code: i32) -> Option<&str> {
        self.config
            .find_action_key(key_code)?
            .suggest_action_msg_column
            .as_deref()
    }

    async fn suggestions(&self, query: &str, limit: usize) -> SuggestionResult {
        let rows = match self.try_suggestions(query, limit).await {
            ProviderOutcome::Rows(rows) => {
                debug!("{}[{}] returned.", self, query);
                rows
            }
            ProviderOutcome::Unavailable => {
                debug!("{}[{}] has no suggestion provider", self, query);
                Vec::new()
            }
            ProviderOutcome::Failed(e) => {
                error!("{}[{}] failed: {}", self, query, e);
                Vec::new()
            }
        };
        SuggestionResult::new(self.config.clone(), Some(query.to_string()), rows)
    }

    async fn refresh_shortcut(
        &self,
        shortcut_id: &str,
        extra_data: Option<&str>,
    ) -> Option<SuggestionResult> {
        match self.try_refresh_shortcut(shortcut_id, extra_data).await {
            ProviderOutcome::Rows(rows) => {
                debug!("{}[{}] returned.", self, shortcut_id);
                let mut result = SuggestionResult::new(self.config.clone(), None, rows);
                result.move_to_first();
                Some(result)
            }
            ProviderOutcome::Unavailable => {
                debug!("{}[{}] has no suggestion provider", self, shortcut_id);
                None
            }
            // Whether the shortcut should be dropped is the caller's decision
            ProviderOutcome::Failed(e) => {
                error!("{}[{}] failed: {}", self, shortcut_id, e);
                None
            }
        }
    }
}

impl PartialEq for SearchableSource {
    fn eq(&self, other: &Self) -> bool {
        self.config.component == other.config.component
    }
}

impl Eq for SearchableSource {}

impl Hash for SearchableSource {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.config.component.hash(state);
    }
}

impl fmt::Display for SearchableSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "SearchableSource{{component={}}}",
            self.config.component.flatten_to_short_string()
        )
    }
}

impl fmt::Debug for SearchableSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SearchableSource")
            .field("component", &self.config.component)
            .field("authority", &self.config.suggest_authority)
            .finish()
    }
}
