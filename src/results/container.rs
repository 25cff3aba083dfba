//! Positioned cursor over the rows returned by one source

use super::types::SuggestionRow;
use crate::config::{ComponentName, SourceConfig};
use std::sync::Arc;

/// Rows returned by a source for one query, with a current position
///
/// A fresh result is positioned before the first row.
#[derive(Debug, Clone)]
pub struct SuggestionResult {
    source: Arc<SourceConfig>,
    /// Query text; `None` for a shortcut refresh
    query: Option<String>,
    rows: Vec<SuggestionRow>,
    position: Option<usize>,
}

impl SuggestionResult {
    /// Create a result over provider rows
    pub fn new(source: Arc<SourceConfig>, query: Option<String>, rows: Vec<SuggestionRow>) -> Self {
        Self {
            source,
            query,
            rows,
            position: None,
        }
    }

    /// Create a result with no rows
    pub fn empty(source: Arc<SourceConfig>, query: Option<String>) -> Self {
        Self::new(source, query, Vec::new())
    }

    /// Component of the source that produced the rows
    pub fn source(&self) -> &ComponentName {
        &self.source.component
    }

    pub fn source_config(&self) -> &Arc<SourceConfig> {
        &self.source
    }

    pub fn query(&self) -> Option<&str> {
        self.query.as_deref()
    }

    pub fn count(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Current position, `None` while before the first row
    pub fn position(&self) -> Option<usize> {
        self.position
    }

    /// Move to a row; returns false and leaves the position unchanged if out of range
    pub fn move_to(&mut self, position: usize) -> bool {
        if position < self.rows.len() {
            self.position = Some(position);
            true
        } else {
            false
        }
    }

    pub fn move_to_first(&mut self) -> bool {
        self.move_to(0)
    }

    pub fn move_to_next(&mut self) -> bool {
        let next = self.position.map_or(0, |p| p + 1);
        self.move_to(next)
    }

    /// Row at the current position
    pub fn current(&self) -> Option<&SuggestionRow> {
        self.position.and_then(|p| self.rows.get(p))
    }

    pub fn rows(&self) -> &[SuggestionRow] {
        &self.rows
    }

    pub fn into_rows(self) -> Vec<SuggestionRow> {
        self.rows
    }
}
