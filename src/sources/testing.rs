//! Fakes shared by the source tests

use crate::config::{ActivityConfig, ComponentName, PackageConfig, SourceConfig};
use crate::error::Result;
use crate::packages::{ActivityInfo, Icon, PackageRegistry, ResourceId, StaticPackageRegistry};
use crate::provider::{ProviderClient, ProviderCursor, ProviderRequest, VecCursor};
use crate::results::{SuggestionRow, SUGGEST_COLUMN_TEXT_1};
use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

pub const PACKAGE: &str = "com.example.contacts";
pub const AUTHORITY: &str = "com.example.contacts.provider";

pub fn component() -> ComponentName {
    ComponentName::new(PACKAGE, ".Search")
}

pub fn source_config() -> SourceConfig {
    SourceConfig::new(component()).with_authority(AUTHORITY)
}

pub fn rows(texts: &[&str]) -> Vec<SuggestionRow> {
    texts
        .iter()
        .map(|t| SuggestionRow::new().with(SUGGEST_COLUMN_TEXT_1, *t))
        .collect()
}

/// Static registry that counts the lookups made through it
pub struct CountingPackages {
    inner: StaticPackageRegistry,
    pub label_calls: AtomicUsize,
    pub drawable_calls: AtomicUsize,
    delay: Duration,
}

impl CountingPackages {
    pub fn new() -> Self {
        let mut package = PackageConfig {
            name: PACKAGE.to_string(),
            label: Some("Contacts".to_string()),
            activities: vec![ActivityConfig {
                class: ".Search".to_string(),
                label: Some("People".to_string()),
                icon: 4,
            }],
            ..Default::default()
        };
        package.strings.insert(3, "Search your contacts".to_string());

        let inner = StaticPackageRegistry::from_configs(&[package]);
        inner.insert_icon(PACKAGE, 4, Icon::new(vec![4u8; 4]));
        inner.insert_icon(PACKAGE, 11, Icon::new(vec![11u8; 11]));

        Self {
            inner,
            label_calls: AtomicUsize::new(0),
            drawable_calls: AtomicUsize::new(0),
            delay: Duration::ZERO,
        }
    }

    /// Make every counted lookup slow, to widen races
    pub fn slow(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    pub fn static_registry(&self) -> &StaticPackageRegistry {
        &self.inner
    }
}

impl PackageRegistry for CountingPackages {
    fn activity_info(&self, component: &ComponentName) -> Result<ActivityInfo> {
        self.inner.activity_info(component)
    }

    fn contains_package(&self, package: &str) -> bool {
        self.inner.contains_package(package)
    }

    fn load_label(&self, activity: &ActivityInfo) -> String {
        self.label_calls.fetch_add(1, Ordering::SeqCst);
        std::thread::sleep(self.delay);
        self.inner.load_label(activity)
    }

    fn text(&self, package: &str, id: ResourceId) -> Option<String> {
        self.inner.text(package, id)
    }

    fn drawable(&self, package: &str, id: ResourceId) -> Option<Icon> {
        self.drawable_calls.fetch_add(1, Ordering::SeqCst);
        std::thread::sleep(self.delay);
        self.inner.drawable(package, id)
    }
}

/// What the fake provider does with every request
#[derive(Debug, Clone)]
pub enum Behavior {
    Rows(Vec<SuggestionRow>),
    NoCursor,
    Fail,
    /// Hands out a cursor that fails once read
    FailWhileReading,
    /// Answers with rows after a delay
    Delayed(Duration, Vec<SuggestionRow>),
}

/// Cursor that records when it is released
pub struct TrackedCursor {
    inner: VecCursor,
    fail: bool,
    released: Arc<AtomicUsize>,
}

impl ProviderCursor for TrackedCursor {
    fn count(&mut self) -> anyhow::Result<usize> {
        if self.fail {
            anyhow::bail!("cursor window could not be filled");
        }
        self.inner.count()
    }

    fn next_row(&mut self) -> anyhow::Result<Option<SuggestionRow>> {
        self.inner.next_row()
    }
}

impl Drop for TrackedCursor {
    fn drop(&mut self) {
        self.released.fetch_add(1, Ordering::SeqCst);
    }
}

/// Provider client replaying a fixed behavior and recording requests
pub struct FakeProvider {
    behavior: Behavior,
    pub requests: Mutex<Vec<ProviderRequest>>,
    pub opened: AtomicUsize,
    pub released: Arc<AtomicUsize>,
}

impl FakeProvider {
    pub fn new(behavior: Behavior) -> Self {
        Self {
            behavior,
            requests: Mutex::new(Vec::new()),
            opened: AtomicUsize::new(0),
            released: Arc::new(AtomicUsize::new(0)),
        }
    }

    pub fn calls(&self) -> usize {
        self.requests.lock().unwrap().len()
    }

    pub fn last_request(&self) -> Option<ProviderRequest> {
        self.requests.lock().unwrap().last().cloned()
    }

    fn cursor(&self, rows: Vec<SuggestionRow>, fail: bool) -> Box<dyn ProviderCursor> {
        self.opened.fetch_add(1, Ordering::SeqCst);
        Box::new(TrackedCursor {
            inner: VecCursor::new(rows),
            fail,
            released: self.released.clone(),
        })
    }
}

#[async_trait]
impl ProviderClient for FakeProvider {
    async fn query(
        &self,
        request: &ProviderRequest,
    ) -> anyhow::Result<Option<Box<dyn ProviderCursor>>> {
        self.requests.lock().unwrap().push(request.clone());
        match &self.behavior {
            Behavior::Rows(rows) => Ok(Some(self.cursor(rows.clone(), false))),
            Behavior::NoCursor => Ok(None),
            Behavior::Fail => anyhow::bail!("provider process died"),
            Behavior::FailWhileReading => Ok(Some(self.cursor(rows(&["partial"]), true))),
            Behavior::Delayed(delay, rows) => {
                tokio::time::sleep(*delay).await;
                Ok(Some(self.cursor(rows.clone(), false)))
            }
        }
    }
}
