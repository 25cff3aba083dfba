//! Error types for suggestion sources

use thiserror::Error;

/// Result type alias using [`SourceError`]
pub type Result<T> = std::result::Result<T, SourceError>;

/// Errors raised while building or querying a suggestion source
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SourceError {
    /// The source declares no suggestion authority, so there is nothing to ask
    #[error("no suggestion provider declared for {component}")]
    ProviderUnavailable { component: String },

    /// The provider call failed at runtime
    #[error("provider query {uri} failed: {message}")]
    ProviderQueryFailed { uri: String, message: String },

    /// The component behind a source could not be resolved
    #[error("component not found: {0}")]
    ComponentNotFound(String),

    /// A provider URI could not be built
    #[error("invalid provider uri: {0}")]
    InvalidUri(String),

    /// No source registered under the given name
    #[error("unknown source: {0}")]
    UnknownSource(String),
}

impl SourceError {
    /// Wrap a transport error raised while talking to a provider
    pub fn query_failed(uri: impl ToString, err: &anyhow::Error) -> Self {
        Self::ProviderQueryFailed {
            uri: uri.to_string(),
            message: format!("{:#}", err),
        }
    }

    /// Whether the error came from the provider itself rather than configuration
    pub fn is_provider_failure(&self) -> bool {
        matches!(self, Self::ProviderQueryFailed { .. })
    }
}
