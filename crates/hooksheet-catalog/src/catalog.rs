//! The ordered, immutable collection of topic entries

use std::collections::HashSet;

use serde::Serialize;

use crate::{CatalogError, Result, TopicEntry};

/// Ordered list of topic entries, unique by id
///
/// Built once through [`Catalog::new`] (or [`CatalogBuilder`]) and never
/// mutated afterwards. Order defines display order and card numbering.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct Catalog {
    entries: Vec<TopicEntry>,
}

impl Catalog {
    /// Build a catalog, rejecting empty or duplicate ids
    pub fn new(entries: Vec<TopicEntry>) -> Result<Self> {
        let mut seen = HashSet::with_capacity(entries.len());

        for (position, entry) in entries.iter().enumerate() {
            if entry.id().trim().is_empty() {
                return Err(CatalogError::EmptyId(position));
            }
            if !seen.insert(entry.id()) {
                return Err(CatalogError::DuplicateId(entry.id().to_string()));
            }
        }

        tracing::debug!("Catalog built with {} entries", entries.len());
        Ok(Self { entries })
    }

    /// Wrap entries known to be valid, such as the built-in catalog
    ///
    /// Validity is still checked in debug builds.
    pub(crate) fn from_trusted(entries: Vec<TopicEntry>) -> Self {
        debug_assert!(Self::new(entries.clone()).is_ok(), "invalid built-in catalog");
        Self { entries }
    }

    /// Start building a catalog entry by entry
    pub fn builder() -> CatalogBuilder {
        CatalogBuilder::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entries(&self) -> &[TopicEntry] {
        &self.entries
    }

    pub fn iter(&self) -> std::slice::Iter<'_, TopicEntry> {
        self.entries.iter()
    }

    /// Entry at a catalog position
    pub fn get(&self, index: usize) -> Option<&TopicEntry> {
        self.entries.get(index)
    }

    /// Look up an entry by id
    pub fn find(&self, id: &str) -> Option<&TopicEntry> {
        self.entries.iter().find(|entry| entry.id() == id)
    }

    /// Look up an entry by id, failing if it is unknown
    pub fn require(&self, id: &str) -> Result<&TopicEntry> {
        self.find(id)
            .ok_or_else(|| CatalogError::EntryNotFound(id.to_string()))
    }

    /// Catalog position of an id
    pub fn position(&self, id: &str) -> Option<usize> {
        self.entries.iter().position(|entry| entry.id() == id)
    }

    /// 1-based display number of an entry, as printed on its card
    pub fn number_of(&self, id: &str) -> Option<usize> {
        self.position(id).map(|index| index + 1)
    }

    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(TopicEntry::id)
    }
}

impl<'a> IntoIterator for &'a Catalog {
    type Item = &'a TopicEntry;
    type IntoIter = std::slice::Iter<'a, TopicEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

/// Incremental catalog construction with validation at the end
#[derive(Debug, Default)]
pub struct CatalogBuilder {
    entries: Vec<TopicEntry>,
}

impl CatalogBuilder {
    /// Append an entry
    pub fn entry(mut self, entry: TopicEntry) -> Self {
        self.entries.push(entry);
        self
    }

    /// Validate and freeze the catalog
    pub fn build(self) -> Result<Catalog> {
        Catalog::new(self.entries)
    }
}
