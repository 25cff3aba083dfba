//! Suggestion results
//!
//! Rows returned by a suggestion provider and the positioned cursor handed
//! back to callers.

mod container;
mod types;

pub use container::SuggestionResult;
pub use types::*;
