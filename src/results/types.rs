//! Row and outcome types

use crate::error::SourceError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Primary line of a suggestion
pub const SUGGEST_COLUMN_TEXT_1: &str = "suggest_text_1";
/// Secondary line of a suggestion
pub const SUGGEST_COLUMN_TEXT_2: &str = "suggest_text_2";
pub const SUGGEST_COLUMN_ICON_1: &str = "suggest_icon_1";
pub const SUGGEST_COLUMN_ICON_2: &str = "suggest_icon_2";
pub const SUGGEST_COLUMN_INTENT_ACTION: &str = "suggest_intent_action";
pub const SUGGEST_COLUMN_INTENT_DATA: &str = "suggest_intent_data";
/// Opaque data echoed back when a shortcut is refreshed
pub const SUGGEST_COLUMN_INTENT_EXTRA_DATA: &str = "suggest_intent_extra_data";
pub const SUGGEST_COLUMN_QUERY: &str = "suggest_intent_query";
/// Id used to refresh a suggestion that was stored as a shortcut
pub const SUGGEST_COLUMN_SHORTCUT_ID: &str = "suggest_shortcut_id";

/// One suggestion row: named columns with string values
///
/// Columns are opaque to the source; only the shortcut columns are read when
/// refreshing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SuggestionRow {
    columns: BTreeMap<String, String>,
}

impl SuggestionRow {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style column setter
    pub fn with(mut self, column: impl Into<String>, value: impl Into<String>) -> Self {
        self.insert(column, value);
        self
    }

    pub fn insert(&mut self, column: impl Into<String>, value: impl Into<String>) {
        self.columns.insert(column.into(), value.into());
    }

    pub fn get(&self, column: &str) -> Option<&str> {
        self.columns.get(column).map(String::as_str)
    }

    pub fn columns(&self) -> impl Iterator<Item = (&str, &str)> {
        self.columns.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    pub fn text_1(&self) -> Option<&str> {
        self.get(SUGGEST_COLUMN_TEXT_1)
    }

    pub fn shortcut_id(&self) -> Option<&str> {
        self.get(SUGGEST_COLUMN_SHORTCUT_ID)
    }

    pub fn extra_data(&self) -> Option<&str> {
        self.get(SUGGEST_COLUMN_INTENT_EXTRA_DATA)
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for SuggestionRow {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            columns: iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect(),
        }
    }
}

/// What a single provider call produced, before it is collapsed for callers
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProviderOutcome {
    /// The provider answered; possibly with no rows
    Rows(Vec<SuggestionRow>),
    /// No provider is declared, nothing was asked
    Unavailable,
    /// The provider call failed
    Failed(SourceError),
}

impl ProviderOutcome {
    pub fn is_failure(&self) -> bool {
        matches!(self, Self::Failed(_))
    }

    /// Rows if the provider answered
    pub fn rows(&self) -> Option<&[SuggestionRow]> {
        match self {
            Self::Rows(rows) => Some(rows),
            _ => None,
        }
    }
}
