//! Package metadata lookups
//!
//! A [`PackageRegistry`] resolves the component behind a source to its
//! declared metadata (label, icon, string resources). Sources consult it once
//! at construction and lazily afterwards.

mod static_registry;

pub use static_registry::StaticPackageRegistry;

use crate::config::ComponentName;
use crate::error::Result;
use std::fmt;
use std::sync::Arc;

/// Identifier of a resource declared by a package; 0 means none
pub type ResourceId = u32;

/// Absent resource
pub const NO_RESOURCE: ResourceId = 0;

/// Icon used for sources whose component declares none
pub const DEFAULT_SOURCE_ICON: ResourceId = 0x0108_0093;

/// Package holding platform-wide resources such as [`DEFAULT_SOURCE_ICON`]
pub const SYSTEM_PACKAGE: &str = "system";

/// Locator scheme for package resources (`resource://<package>/<id>`)
pub const RESOURCE_SCHEME: &str = "resource";

/// Immutable image data, cheap to clone
#[derive(Clone, PartialEq, Eq)]
pub struct Icon {
    data: Arc<[u8]>,
}

impl Icon {
    pub fn new(data: impl Into<Arc<[u8]>>) -> Self {
        Self { data: data.into() }
    }

    pub fn bytes(&self) -> &[u8] {
        &self.data
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

impl fmt::Debug for Icon {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Icon").field("len", &self.data.len()).finish()
    }
}

/// Resolved metadata of a component
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActivityInfo {
    pub component: ComponentName,
    pub package_name: String,
    pub label: Option<String>,
    /// Declared icon, [`NO_RESOURCE`] when absent
    pub icon: ResourceId,
}

impl ActivityInfo {
    /// Declared icon, or `None` when the component declares none
    pub fn icon_resource(&self) -> Option<ResourceId> {
        (self.icon != NO_RESOURCE).then_some(self.icon)
    }
}

/// Read-only access to installed package metadata
pub trait PackageRegistry: Send + Sync {
    /// Resolve a component; fails with `ComponentNotFound`
    fn activity_info(&self, component: &ComponentName) -> Result<ActivityInfo>;

    /// Whether a package is installed
    fn contains_package(&self, package: &str) -> bool;

    /// Display label of a component
    fn load_label(&self, activity: &ActivityInfo) -> String;

    /// String resource of a package
    fn text(&self, package: &str, id: ResourceId) -> Option<String>;

    /// Drawable resource of a package
    fn drawable(&self, package: &str, id: ResourceId) -> Option<Icon>;
}

/// Locator of a package resource
pub fn resource_locator(package: &str, id: ResourceId) -> Option<url::Url> {
    url::Url::parse(&format!("{}://{}/{}", RESOURCE_SCHEME, package, id)).ok()
}
