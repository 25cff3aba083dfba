//! Configuration module for QuickSearch-RS
//!
//! Handles loading settings from YAML files and environment variables, and
//! the per-source query configuration declared by each searchable component.

mod component;
mod settings;

pub use component::ComponentName;
pub use settings::*;

use anyhow::Result;
use std::path::{Path, PathBuf};
use tracing::info;

/// Find and load settings from the usual locations, falling back to defaults
pub fn discover() -> Result<Settings> {
    if let Ok(path) = std::env::var("QUICKSEARCH_SETTINGS_PATH") {
        let path = PathBuf::from(path);
        if path.exists() {
            return load_with_env(&path);
        }
    }

    let mut paths = vec![
        PathBuf::from("settings.yml"),
        PathBuf::from("config/settings.yml"),
        PathBuf::from("/etc/quicksearch/settings.yml"),
    ];
    if let Some(dir) = dirs::config_dir() {
        paths.push(dir.join("quicksearch-rs/settings.yml"));
    }

    for path in paths.iter() {
        if path.exists() {
            return load_with_env(path);
        }
    }

    info!("No settings file found, using defaults");
    let mut settings = Settings::default();
    settings.merge_env();
    Ok(settings)
}

fn load_with_env(path: &Path) -> Result<Settings> {
    info!("Loading settings from: {}", path.display());
    let mut settings = Settings::from_file(path)?;
    settings.merge_env();
    Ok(settings)
}
