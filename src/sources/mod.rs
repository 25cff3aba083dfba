//! Suggestion source module
//!
//! Defines the Source trait, the searchable source adapter, and a registry
//! for the sources loaded from configuration.

mod loader;
mod memo;
mod registry;
mod searchable;
mod traits;

#[cfg(test)]
pub(crate) mod testing;

pub use loader::SourceLoader;
pub use memo::Memo;
pub use registry::SourceRegistry;
pub use searchable::SearchableSource;
pub use traits::*;
