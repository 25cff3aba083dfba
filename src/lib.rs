//! QuickSearch-RS: searchable suggestion sources
//!
//! Adapts external suggestion providers into uniform suggestion sources:
//! each source is configured by a component's searchable metadata, queried
//! through a content-style URI, and answers with normalized suggestion rows.

pub mod config;
pub mod error;
pub mod icons;
pub mod packages;
pub mod provider;
pub mod results;
pub mod search;
pub mod sources;
pub mod web;

pub use config::Settings;
pub use error::SourceError;
pub use results::{SuggestionResult, SuggestionRow};
pub use search::SuggestSearch;
pub use sources::{SearchableSource, Source};

/// Application version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
