//! Web server module
//!
//! Provides the JSON API over the registered suggestion sources.

mod handlers;
mod routes;
mod state;

pub use routes::create_router;
pub use state::AppState;
