//! Settings structures for QuickSearch-RS configuration

use super::component::ComponentName;
use crate::packages::ResourceId;
use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// Main settings structure loaded from settings.yml
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub general: GeneralSettings,
    pub server: ServerSettings,
    pub outgoing: OutgoingSettings,
    pub search: SearchSettings,
    /// Installed packages known to the static package registry
    pub packages: Vec<PackageConfig>,
    /// Searchable sources to register
    pub sources: Vec<SourceConfig>,
}

impl Settings {
    /// Load settings from a YAML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml(&content)
    }

    /// Parse settings from YAML text
    pub fn from_yaml(content: &str) -> Result<Self> {
        let settings: Settings = serde_yaml::from_str(content)?;
        Ok(settings)
    }

    /// Merge with environment variables (QUICKSEARCH_* prefix)
    pub fn merge_env(&mut self) {
        if let Ok(val) = std::env::var("QUICKSEARCH_DEBUG") {
            self.general.debug = val.parse().unwrap_or(false);
        }
        if let Ok(val) = std::env::var("QUICKSEARCH_PORT") {
            if let Ok(port) = val.parse() {
                self.server.port = port;
            }
        }
        if let Ok(val) = std::env::var("QUICKSEARCH_BIND_ADDRESS") {
            self.server.bind_address = val;
        }
        if let Ok(val) = std::env::var("QUICKSEARCH_SOURCE_TIMEOUT") {
            if let Ok(timeout) = val.parse() {
                self.search.source_timeout = timeout;
            }
        }
    }

    /// Get a source config by component name
    pub fn get_source(&self, component: &ComponentName) -> Option<&SourceConfig> {
        self.sources.iter().find(|s| &s.component == component)
    }

    /// Get all enabled sources
    pub fn enabled_sources(&self) -> Vec<&SourceConfig> {
        self.sources.iter().filter(|s| !s.disabled).collect()
    }
}

/// General settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralSettings {
    /// Enable debug logging
    pub debug: bool,
    /// Instance name reported by the API
    pub instance_name: String,
}

impl Default for GeneralSettings {
    fn default() -> Self {
        Self {
            debug: false,
            instance_name: "QuickSearch".to_string(),
        }
    }
}

/// Server settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerSettings {
    /// Server port
    pub port: u16,
    /// Bind address
    pub bind_address: String,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            port: 8889,
            bind_address: "127.0.0.1".to_string(),
        }
    }
}

/// Outgoing provider transport settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutgoingSettings {
    /// Transport-level request timeout in seconds
    pub request_timeout: f64,
    /// Base URL serving each suggestion authority
    pub provider_endpoints: HashMap<String, String>,
    /// Extra headers to send to providers
    pub extra_headers: HashMap<String, String>,
}

impl Default for OutgoingSettings {
    fn default() -> Self {
        Self {
            request_timeout: 5.0,
            provider_endpoints: HashMap::new(),
            extra_headers: HashMap::new(),
        }
    }
}

/// Fan-out behaviour
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchSettings {
    /// Rows requested from each source when the caller gives no limit
    pub default_limit: usize,
    /// Seconds to wait for each source before moving on
    pub source_timeout: f64,
}

impl Default for SearchSettings {
    fn default() -> Self {
        Self {
            default_limit: 10,
            source_timeout: 3.0,
        }
    }
}

/// A package known to the static package registry
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PackageConfig {
    /// Package name
    pub name: String,
    /// Application label, used when an activity has none
    pub label: Option<String>,
    /// Declared activities
    pub activities: Vec<ActivityConfig>,
    /// String resources
    pub strings: HashMap<ResourceId, String>,
    /// Drawable resources, as paths to image files
    pub drawables: HashMap<ResourceId, PathBuf>,
}

/// An activity declared by a package
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ActivityConfig {
    /// Class name, possibly relative to the package (`.Search`)
    pub class: String,
    pub label: Option<String>,
    /// Icon resource, 0 when none is declared
    pub icon: ResourceId,
}

/// Query configuration declared by one searchable source
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceConfig {
    /// Component owning the source; the source's identity
    pub component: ComponentName,
    /// Authority of the suggestion provider
    #[serde(default)]
    pub suggest_authority: Option<String>,
    /// Path inserted between the authority and the query segment
    #[serde(default)]
    pub suggest_path: Option<String>,
    /// Selection template; the query text is bound to it as an argument
    #[serde(default)]
    pub suggest_selection: Option<String>,
    /// Minimum query length before the source is queried
    #[serde(default)]
    pub suggest_threshold: u32,
    /// Package providing suggestion icons
    #[serde(default)]
    pub suggest_package: Option<String>,
    #[serde(default)]
    pub suggest_intent_action: Option<String>,
    #[serde(default)]
    pub suggest_intent_data: Option<String>,
    /// String resource describing the source in settings
    #[serde(default)]
    pub settings_description: Option<ResourceId>,
    #[serde(default)]
    pub action_keys: Vec<ActionKeyInfo>,
    #[serde(default)]
    pub query_after_zero_results: bool,
    #[serde(default)]
    pub rewrite_query_from_data: bool,
    #[serde(default)]
    pub rewrite_query_from_text: bool,
    #[serde(default)]
    pub web_source: bool,
    /// Skip this source when loading
    #[serde(default)]
    pub disabled: bool,
}

impl SourceConfig {
    /// Minimal config for a component with no provider declared
    pub fn new(component: ComponentName) -> Self {
        Self {
            component,
            suggest_authority: None,
            suggest_path: None,
            suggest_selection: None,
            suggest_threshold: 0,
            suggest_package: None,
            suggest_intent_action: None,
            suggest_intent_data: None,
            settings_description: None,
            action_keys: Vec::new(),
            query_after_zero_results: false,
            rewrite_query_from_data: false,
            rewrite_query_from_text: false,
            web_source: false,
            disabled: false,
        }
    }

    pub fn with_authority(mut self, authority: impl Into<String>) -> Self {
        self.suggest_authority = Some(authority.into());
        self
    }

    pub fn with_path(mut self, path: impl Into<String>) -> Self {
        self.suggest_path = Some(path.into());
        self
    }

    pub fn with_selection(mut self, selection: impl Into<String>) -> Self {
        self.suggest_selection = Some(selection.into());
        self
    }

    pub fn with_threshold(mut self, threshold: u32) -> Self {
        self.suggest_threshold = threshold;
        self
    }

    pub fn with_icon_package(mut self, package: impl Into<String>) -> Self {
        self.suggest_package = Some(package.into());
        self
    }

    /// Find the action key declared for a key code
    pub fn find_action_key(&self, key_code: i32) -> Option<&ActionKeyInfo> {
        self.action_keys.iter().find(|k| k.key_code == key_code)
    }
}

/// Action attached to a key press while a suggestion is selected
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ActionKeyInfo {
    pub key_code: i32,
    /// Message sent with the action
    pub suggest_action_msg: Option<String>,
    /// Column of the suggestion row holding a per-row message
    pub suggest_action_msg_column: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"
general:
  debug: true
search:
  source_timeout: 1.5
outgoing:
  provider_endpoints:
    com.example.contacts.provider: http://127.0.0.1:9000
packages:
  - name: com.example.contacts
    label: Contacts
    activities:
      - class: .Search
        icon: 7
    strings:
      3: Search your contacts
sources:
  - component: com.example.contacts/.Search
    suggest_authority: com.example.contacts.provider
    suggest_selection: "name MATCH ?"
    suggest_threshold: 2
    settings_description: 3
    action_keys:
      - key_code: 5
        suggest_action_msg: call
  - component: com.example.music/.Search
    disabled: true
"#;

    #[test]
    fn test_default_settings() {
        let settings = Settings::default();
        assert_eq!(settings.server.port, 8889);
        assert_eq!(settings.search.default_limit, 10);
        assert!(!settings.general.debug);
        assert!(settings.sources.is_empty());
    }

    #[test]
    fn test_parse_yaml() {
        let settings = Settings::from_yaml(SAMPLE).unwrap();
        assert!(settings.general.debug);
        assert_eq!(settings.search.source_timeout, 1.5);
        assert_eq!(settings.search.default_limit, 10);
        assert_eq!(settings.sources.len(), 2);
        assert_eq!(settings.enabled_sources().len(), 1);

        let package = &settings.packages[0];
        assert_eq!(package.activities[0].icon, 7);
        assert_eq!(package.strings.get(&3).map(String::as_str), Some("Search your contacts"));

        let component: ComponentName = "com.example.contacts/.Search".parse().unwrap();
        let source = settings.get_source(&component).unwrap();
        assert_eq!(source.suggest_threshold, 2);
        assert_eq!(source.suggest_selection.as_deref(), Some("name MATCH ?"));
        assert_eq!(source.settings_description, Some(3));
        assert!(source.suggest_path.is_none());
        assert!(!source.web_source);
    }

    #[test]
    fn test_find_action_key() {
        let settings = Settings::from_yaml(SAMPLE).unwrap();
        let source = &settings.sources[0];
        let key = source.find_action_key(5).unwrap();
        assert_eq!(key.suggest_action_msg.as_deref(), Some("call"));
        assert!(key.suggest_action_msg_column.is_none());
        assert!(source.find_action_key(6).is_none());
    }
}
