//! Suggestion icon loading
//!
//! Suggestion rows refer to icons by a string id: either a numeric resource
//! of the provider's icon package or a full locator. An [`IconLoader`] turns
//! those ids into image data or a locator.

use crate::packages::{resource_locator, Icon, PackageRegistry, ResourceId, NO_RESOURCE, RESOURCE_SCHEME};
use moka::sync::Cache;
use std::sync::Arc;
use tracing::debug;
use url::Url;

/// Resolves suggestion icon ids for one provider package
pub trait IconLoader: Send + Sync {
    /// Image data for an icon id
    fn icon(&self, id: &str) -> Option<Icon>;

    /// Locator for an icon id
    fn icon_locator(&self, id: &str) -> Option<Url>;
}

/// Icon reference parsed from a suggestion column
#[derive(Debug, Clone, PartialEq, Eq)]
enum IconRef {
    Resource(ResourceId),
    Locator(Url),
}

fn parse_icon_id(id: &str) -> Option<IconRef> {
    let id = id.trim();
    if id.is_empty() {
        return None;
    }
    if let Ok(res) = id.parse::<ResourceId>() {
        return (res != NO_RESOURCE).then_some(IconRef::Resource(res));
    }
    Url::parse(id).ok().map(IconRef::Locator)
}

/// Loads icons from the resources of a single package
pub struct PackageIconLoader {
    package: String,
    packages: Arc<dyn PackageRegistry>,
}

impl PackageIconLoader {
    pub fn new(package: impl Into<String>, packages: Arc<dyn PackageRegistry>) -> Self {
        Self {
            package: package.into(),
            packages,
        }
    }

    pub fn package(&self) -> &str {
        &self.package
    }
}

impl IconLoader for PackageIconLoader {
    fn icon(&self, id: &str) -> Option<Icon> {
        match parse_icon_id(id)? {
            IconRef::Resource(res) => self.packages.drawable(&self.package, res),
            IconRef::Locator(url) if url.scheme() == RESOURCE_SCHEME => {
                let package = url.host_str()?;
                let res = url
                    .path_segments()?
                    .next()
                    .and_then(|s| s.parse::<ResourceId>().ok())?;
                self.packages.drawable(package, res)
            }
            IconRef::Locator(url) => {
                debug!("Unsupported icon locator {} for {}", url, self.package);
                None
            }
        }
    }

    fn icon_locator(&self, id: &str) -> Option<Url> {
        match parse_icon_id(id)? {
            IconRef::Resource(res) => resource_locator(&self.package, res),
            IconRef::Locator(url) => Some(url),
        }
    }
}

/// Memoizes icon lookups of another loader
pub struct CachingIconLoader<L> {
    inner: L,
    icons: Cache<String, Option<Icon>>,
}

impl<L: IconLoader> CachingIconLoader<L> {
    /// Wrap a loader with a cache of up to `max_capacity` icons
    pub fn new(inner: L, max_capacity: u64) -> Self {
        Self {
            inner,
            icons: Cache::builder().max_capacity(max_capacity).build(),
        }
    }

    pub fn inner(&self) -> &L {
        &self.inner
    }
}

impl<L: IconLoader> IconLoader for CachingIconLoader<L> {
    fn icon(&self, id: &str) -> Option<Icon> {
        if id.trim().is_empty() {
            return None;
        }
        self.icons.get_with(id.to_string(), || self.inner.icon(id))
    }

    fn icon_locator(&self, id: &str) -> Option<Url> {
        self.inner.icon_locator(id)
    }
}
