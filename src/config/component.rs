//! Component identity for suggestion sources

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Identity of the component that owns a searchable source
///
/// Written as `package/class`. A class starting with `.` is relative to the
/// package, so `com.example.contacts/.Search` names the class
/// `com.example.contacts.Search`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ComponentName {
    package: String,
    class: String,
}

impl ComponentName {
    /// Create a component name, expanding a package-relative class
    pub fn new(package: impl Into<String>, class: impl Into<String>) -> Self {
        let package = package.into();
        let class = class.into();
        let class = if class.starts_with('.') {
            format!("{}{}", package, class)
        } else {
            class
        };
        Self { package, class }
    }

    /// Parse a `package/class` string
    pub fn unflatten(s: &str) -> Option<Self> {
        let (package, class) = s.split_once('/')?;
        if package.is_empty() || class.is_empty() {
            return None;
        }
        Some(Self::new(package, class))
    }

    pub fn package_name(&self) -> &str {
        &self.package
    }

    pub fn class_name(&self) -> &str {
        &self.class
    }

    /// Class name relative to the package when possible
    pub fn short_class_name(&self) -> &str {
        match self.class.strip_prefix(self.package.as_str()) {
            Some(rest) if rest.starts_with('.') => rest,
            _ => &self.class,
        }
    }

    /// `package/class` with the class shortened where possible
    pub fn flatten_to_short_string(&self) -> String {
        format!("{}/{}", self.package, self.short_class_name())
    }

    /// `package/class` with the fully qualified class
    pub fn flatten_to_string(&self) -> String {
        format!("{}/{}", self.package, self.class)
    }
}

impl fmt::Display for ComponentName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.flatten_to_short_string())
    }
}

impl FromStr for ComponentName {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Self::unflatten(s).ok_or_else(|| format!("invalid component name: {}", s))
    }
}

impl TryFrom<String> for ComponentName {
    type Error = String;

    fn try_from(s: String) -> std::result::Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<ComponentName> for String {
    fn from(name: ComponentName) -> Self {
        name.flatten_to_short_string()
    }
}
