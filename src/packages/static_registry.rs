//! Package registry backed by the `packages` section of the settings

use super::{ActivityInfo, Icon, PackageRegistry, ResourceId, SYSTEM_PACKAGE};
use crate::config::{ComponentName, PackageConfig};
use crate::error::{Result, SourceError};
use std::collections::HashMap;
use std::sync::RwLock;
use tracing::warn;

/// Package registry built from configuration
pub struct StaticPackageRegistry {
    packages: HashMap<String, PackageConfig>,
    /// Icons supplied directly rather than read from disk
    icons: RwLock<HashMap<(String, ResourceId), Icon>>,
}

impl StaticPackageRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self {
            packages: HashMap::new(),
            icons: RwLock::new(HashMap::new()),
        }
    }

    /// Create a registry from package configurations
    pub fn from_configs(configs: &[PackageConfig]) -> Self {
        let mut registry = Self::new();
        for config in configs {
            registry.add_package(config.clone());
        }
        registry
    }

    /// Add or replace a package
    pub fn add_package(&mut self, config: PackageConfig) {
        self.packages.insert(config.name.clone(), config);
    }

    /// Provide icon data for a resource without a file behind it
    pub fn insert_icon(&self, package: &str, id: ResourceId, icon: Icon) {
        self.icons
            .write()
            .unwrap()
            .insert((package.to_string(), id), icon);
    }

    pub fn len(&self) -> usize {
        self.packages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.packages.is_empty()
    }

    fn package_drawable(&self, package: &str, id: ResourceId) -> Option<Icon> {
        if let Some(icon) = self
            .icons
            .read()
            .unwrap()
            .get(&(package.to_string(), id))
        {
            return Some(icon.clone());
        }

        let path = self.packages.get(package)?.drawables.get(&id)?;
        match std::fs::read(path) {
            Ok(data) => Some(Icon::new(data)),
            Err(e) => {
                warn!("Failed to read drawable {} of {} at {}: {}", id, package, path.display(), e);
                None
            }
        }
    }
}

impl Default for StaticPackageRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl PackageRegistry for StaticPackageRegistry {
    fn activity_info(&self, component: &ComponentName) -> Result<ActivityInfo> {
        let not_found = || SourceError::ComponentNotFound(component.flatten_to_short_string());

        let package = self
            .packages
            .get(component.package_name())
            .ok_or_else(not_found)?;

        let activity = package
            .activities
            .iter()
            .find(|a| ComponentName::new(package.name.as_str(), a.class.as_str()) == *component)
            .ok_or_else(not_found)?;

        Ok(ActivityInfo {
            component: component.clone(),
            package_name: package.name.clone(),
            label: activity.label.clone(),
            icon: activity.icon,
        })
    }

    fn contains_package(&self, package: &str) -> bool {
        self.packages.contains_key(package)
    }

    fn load_label(&self, activity: &ActivityInfo) -> String {
        activity
            .label
            .clone()
            .or_else(|| {
                self.packages
                    .get(&activity.package_name)
                    .and_then(|p| p.label.clone())
            })
            .unwrap_or_else(|| activity.component.short_class_name().to_string())
    }

    fn text(&self, package: &str, id: ResourceId) -> Option<String> {
        self.packages.get(package)?.strings.get(&id).cloned()
    }

    fn drawable(&self, package: &str, id: ResourceId) -> Option<Icon> {
        // Platform resources resolve from any package
        self.package_drawable(package, id)
            .or_else(|| self.package_drawable(SYSTEM_PACKAGE, id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ActivityConfig;
    use crate::packages::DEFAULT_SOURCE_ICON;

    fn registry() -> StaticPackageRegistry {
        let mut contacts = PackageConfig {
            name: "com.example.contacts".to_string(),
            label: Some("Contacts".to_string()),
            activities: vec![
                ActivityConfig {
                    class: ".Search".to_string(),
                    label: Some("People".to_string()),
                    icon: 4,
                },
                ActivityConfig {
                    class: ".Other".to_string(),
                    ..Default::default()
                },
            ],
            ..Default::default()
        };
        contacts.strings.insert(9, "Names and numbers".to_string());
        StaticPackageRegistry::from_configs(&[contacts])
    }

    #[test]
    fn test_activity_info() {
        let registry = registry();
        let component: ComponentName = "com.example.contacts/.Search".parse().unwrap();
        let info = registry.activity_info(&component).unwrap();
        assert_eq!(info.package_name, "com.example.contacts");
        assert_eq!(info.icon, 4);
        assert_eq!(registry.load_label(&info), "People");
    }

    #[test]
    fn test_label_falls_back_to_package() {
        let registry = registry();
        let component: ComponentName = "com.example.contacts/.Other".parse().unwrap();
        let info = registry.activity_info(&component).unwrap();
        assert_eq!(registry.load_label(&info), "Contacts");
    }

    #[test]
    fn test_unknown_component() {
        let registry = registry();
        let missing: ComponentName = "com.example.contacts/.Missing".parse().unwrap();
        assert!(matches!(
            registry.activity_info(&missing),
            Err(SourceError::ComponentNotFound(_))
        ));

        let other: ComponentName = "com.example.music/.Search".parse().unwrap();
        assert!(registry.activity_info(&other).is_err());
    }

    #[test]
    fn test_text_and_drawables() {
        let registry = registry();
        assert_eq!(
            registry.text("com.example.contacts", 9).as_deref(),
            Some("Names and numbers")
        );
        assert!(registry.text("com.example.contacts", 10).is_none());

        assert!(registry.drawable("com.example.contacts", 4).is_none());
        registry.insert_icon("com.example.contacts", 4, Icon::new(vec![1, 2, 3]));
        assert_eq!(registry.drawable("com.example.contacts", 4).unwrap().len(), 3);
    }

    #[test]
    fn test_system_drawable_fallback() {
        let registry = registry();
        registry.insert_icon(SYSTEM_PACKAGE, DEFAULT_SOURCE_ICON, Icon::new(vec![0u8; 8]));
        let icon = registry.drawable("com.example.contacts", DEFAULT_SOURCE_ICON);
        assert_eq!(icon.map(|i| i.len()), Some(8));
    }
}
