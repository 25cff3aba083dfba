//! Suggestion search module
//!
//! Fans a query out to every eligible source and gathers the results
//! in registry order.

mod executor;

pub use executor::SuggestSearch;
