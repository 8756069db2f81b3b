//! Topic entries: one card of the cheat sheet

use serde::{Deserialize, Serialize};

use crate::filter::{fold_case, normalize_query};

/// Accent used when an entry does not declare one
pub const DEFAULT_ACCENT: &str = "#61dafb";

/// A single reference topic with label, description, tip and code sample
///
/// Entries are immutable once built; the builder methods consume `self`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TopicEntry {
    id: String,
    label: String,
    #[serde(default)]
    description: String,
    #[serde(default)]
    note: String,
    #[serde(default)]
    code: String,
    #[serde(default = "default_accent", alias = "accentColor")]
    accent_color: String,
}

fn default_accent() -> String {
    DEFAULT_ACCENT.to_string()
}

/// Which searchable field of an entry matched a query
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchField {
    Label,
    Description,
    Code,
}

impl TopicEntry {
    /// Create a new entry with an id and label
    pub fn new(id: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            description: String::new(),
            note: String::new(),
            code: String::new(),
            accent_color: default_accent(),
        }
    }

    /// Set the short description shown under the label
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Set the tip shown below the code sample
    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.note = note.into();
        self
    }

    /// Set the code sample (kept verbatim)
    pub fn with_code(mut self, code: impl Into<String>) -> Self {
        self.code = code.into();
        self
    }

    /// Set the accent colour, e.g. `#f7df1e`
    pub fn with_accent(mut self, accent_color: impl Into<String>) -> Self {
        self.accent_color = accent_color.into();
        self
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn note(&self) -> &str {
        &self.note
    }

    pub fn code(&self) -> &str {
        &self.code
    }

    pub fn accent_color(&self) -> &str {
        &self.accent_color
    }

    /// Check if this entry matches a search query
    ///
    /// Case-insensitive substring match over label, description and code.
    /// The note is not searched. A blank query matches every entry.
    pub fn matches(&self, query: &str) -> bool {
        let query = normalize_query(query);
        query.is_empty() || self.match_normalized(&query).is_some()
    }

    /// First field (label, then description, then code) containing the query
    ///
    /// Returns `None` for a blank query since no field actually matched.
    pub fn match_field(&self, query: &str) -> Option<MatchField> {
        let query = normalize_query(query);
        if query.is_empty() {
            return None;
        }
        self.match_normalized(&query)
    }

    /// Match against an already normalised query
    pub(crate) fn match_normalized(&self, query: &str) -> Option<MatchField> {
        if fold_case(&self.label).contains(query) {
            return Some(MatchField::Label);
        }

        if fold_case(&self.description).contains(query) {
            return Some(MatchField::Description);
        }

        if fold_case(&self.code).contains(query) {
            return Some(MatchField::Code);
        }

        None
    }
}
