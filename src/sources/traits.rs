//! Source trait shared by every kind of suggestion source

use crate::config::ComponentName;
use crate::packages::Icon;
use crate::results::SuggestionResult;
use async_trait::async_trait;
use std::fmt;
use url::Url;

/// A suggestion source the aggregation layer can query
///
/// Queries never fail: a source that cannot answer returns an empty result.
/// A shortcut refresh returns `None` when the shortcut could not be
/// validated, which is distinct from a valid but empty answer.
#[async_trait]
pub trait Source: Send + Sync + fmt::Display {
    /// Component owning the source; its identity
    fn component_name(&self) -> &ComponentName;

    fn flattened_component_name(&self) -> String {
        self.component_name().flatten_to_short_string()
    }

    /// Short name used in logs and statistics
    fn log_name(&self) -> &str {
        self.component_name().package_name()
    }

    /// Display label
    fn label(&self) -> &str;

    /// Icon representing the source
    fn source_icon(&self) -> Option<Icon>;

    fn source_icon_locator(&self) -> Option<Url>;

    /// Icon referenced by a suggestion row
    fn icon(&self, id: &str) -> Option<Icon>;

    fn icon_locator(&self, id: &str) -> Option<Url>;

    /// Description shown in search settings
    fn settings_description(&self) -> Option<String>;

    /// Minimum query length before the source is queried
    fn query_threshold(&self) -> u32;

    /// Whether to keep querying after a prefix returned nothing
    fn query_after_zero_results(&self) -> bool;

    fn should_rewrite_query_from_data(&self) -> bool;

    fn should_rewrite_query_from_text(&self) -> bool;

    fn is_web_suggestion_source(&self) -> bool;

    fn default_intent_action(&self) -> Option<&str>;

    fn default_intent_data(&self) -> Option<&str>;

    /// Action message bound to a key
    fn suggest_action_msg(&self, key_code: i32) -> Option<&str>;

    /// Row column holding the action message bound to a key
    fn suggest_action_msg_column(&self, key_code: i32) -> Option<&str>;

    /// Suggestions for `query`, at most `limit` rows requested
    async fn suggestions(&self, query: &str, limit: usize) -> SuggestionResult;

    /// Re-validate a stored shortcut
    async fn refresh_shortcut(
        &self,
        shortcut_id: &str,
        extra_data: Option<&str>,
    ) -> Option<SuggestionResult>;
}
