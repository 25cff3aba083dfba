//! Suggestion provider protocol
//!
//! A source talks to its provider through a [`ProviderClient`]: it builds a
//! [`ProviderRequest`] (a `content://` URI plus an optional selection with
//! bound arguments) and receives a [`ProviderCursor`] over the rows. Cursors
//! are released when dropped.
//!
//! The request path is kept as literal segments next to the URI, since URL
//! parsing drops `.` and `..` segments.

mod http;
mod uri;

pub use http::HttpProviderClient;
pub use uri::*;

use crate::results::SuggestionRow;
use async_trait::async_trait;
use url::Url;

/// One request against a suggestion provider
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProviderRequest {
    /// Provider URI, including query parameters such as `limit`
    pub uri: Url,
    /// Decoded path segments, exactly as requested
    pub path: Vec<String>,
    /// Selection template declared by the source
    pub selection: Option<String>,
    /// Arguments bound to the selection placeholders
    pub selection_args: Vec<String>,
}

impl ProviderRequest {
    /// Create a request whose path is taken from `uri`
    pub fn new(uri: Url) -> Self {
        let path = decode_segments(&uri);
        Self::with_path(uri, path)
    }

    /// Create a request with explicit path segments
    pub fn with_path(uri: Url, path: Vec<String>) -> Self {
        Self {
            uri,
            path,
            selection: None,
            selection_args: Vec::new(),
        }
    }

    /// Attach a selection template and its bound arguments
    pub fn with_selection(mut self, selection: impl Into<String>, args: Vec<String>) -> Self {
        self.selection = Some(selection.into());
        self.selection_args = args;
        self
    }

    /// Provider authority the request is addressed to
    pub fn authority(&self) -> Option<&str> {
        self.uri.host_str()
    }

    /// Value of a query parameter of the URI
    pub fn query_param(&self, name: &str) -> Option<String> {
        self.uri
            .query_pairs()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.into_owned())
    }

    /// Decoded path segments of the request
    pub fn path_segments(&self) -> Vec<String> {
        self.path.clone()
    }
}

fn decode_segments(uri: &Url) -> Vec<String> {
    uri.path_segments()
        .map(|segments| {
            segments
                .filter(|s| !s.is_empty())
                .map(|s| {
                    urlencoding::decode(s)
                        .map(|d| d.into_owned())
                        .unwrap_or_else(|_| s.to_string())
                })
                .collect()
        })
        .unwrap_or_default()
}

/// Open handle over the rows a provider returned
///
/// Dropping the cursor releases it.
pub trait ProviderCursor: Send {
    /// Number of rows in the cursor
    fn count(&mut self) -> anyhow::Result<usize>;

    /// Next row, or `None` when exhausted
    fn next_row(&mut self) -> anyhow::Result<Option<SuggestionRow>>;
}

/// Read every remaining row of a cursor
pub fn read_rows(cursor: &mut dyn ProviderCursor) -> anyhow::Result<Vec<SuggestionRow>> {
    let mut rows = Vec::with_capacity(cursor.count()?);
    while let Some(row) = cursor.next_row()? {
        rows.push(row);
    }
    Ok(rows)
}

/// Transport used to reach suggestion providers
#[async_trait]
pub trait ProviderClient: Send + Sync {
    /// Run a request; `Ok(None)` when the provider returned no cursor at all
    async fn query(
        &self,
        request: &ProviderRequest,
    ) -> anyhow::Result<Option<Box<dyn ProviderCursor>>>;
}

/// Cursor over rows already held in memory
#[derive(Debug)]
pub struct VecCursor {
    rows: std::vec::IntoIter<SuggestionRow>,
}

impl VecCursor {
    pub fn new(rows: Vec<SuggestionRow>) -> Self {
        Self {
            rows: rows.into_iter(),
        }
    }
}

impl ProviderCursor for VecCursor {
    fn count(&mut self) -> anyhow::Result<usize> {
        Ok(self.rows.len())
    }

    fn next_row(&mut self) -> anyhow::Result<Option<SuggestionRow>> {
        Ok(self.rows.next())
    }
}
