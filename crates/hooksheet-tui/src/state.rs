//! Transient interaction state: search query and expanded cards
//!
//! Nothing here is persisted; a new session starts with an empty query and
//! every card collapsed.

use std::collections::HashSet;

/// Tracks which cards are expanded, keyed by entry id
///
/// Each id flips independently, so any number of cards can be open at once.
/// Ids are kept even while their card is filtered out, which lets a card
/// that reappears remember whether it was open.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExpansionTracker {
    expanded: HashSet<String>,
}

impl ExpansionTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Flip one card and return its new state (`true` = expanded)
    pub fn toggle(&mut self, id: &str) -> bool {
        let expanded = if self.expanded.remove(id) {
            false
        } else {
            self.expanded.insert(id.to_string());
            true
        };

        tracing::debug!(id, expanded, "Toggled card");
        expanded
    }

    pub fn is_expanded(&self, id: &str) -> bool {
        self.expanded.contains(id)
    }

    pub fn expand(&mut self, id: &str) {
        self.expanded.insert(id.to_string());
    }

    pub fn collapse(&mut self, id: &str) {
        self.expanded.remove(id);
    }

    /// Expand every id in the iterator, leaving others as they are
    pub fn expand_all<I, S>(&mut self, ids: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.expanded.extend(ids.into_iter().map(Into::into));
    }

    pub fn collapse_all(&mut self) {
        self.expanded.clear();
    }

    pub fn expanded_count(&self) -> usize {
        self.expanded.len()
    }

    /// Expanded ids in sorted order
    pub fn expanded_ids(&self) -> Vec<&str> {
        let mut ids: Vec<&str> = self.expanded.iter().map(String::as_str).collect();
        ids.sort_unstable();
        ids
    }
}

/// Query plus expansion flags, owned by the cheat sheet view
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UiState {
    query: String,
    expansion: ExpansionTracker,
}

impl UiState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start with a query already typed
    pub fn with_query(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            expansion: ExpansionTracker::new(),
        }
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn set_query(&mut self, query: impl Into<String>) {
        self.query = query.into();
    }

    pub fn push_char(&mut self, c: char) {
        self.query.push(c);
    }

    /// Remove the last character; returns `false` when already empty
    pub fn pop_char(&mut self) -> bool {
        self.query.pop().is_some()
    }

    pub fn clear_query(&mut self) {
        self.query.clear();
    }

    pub fn expansion(&self) -> &ExpansionTracker {
        &self.expansion
    }

    pub fn expansion_mut(&mut self) -> &mut ExpansionTracker {
        &mut self.expansion
    }

    pub fn toggle(&mut self, id: &str) -> bool {
        self.expansion.toggle(id)
    }

    pub fn is_expanded(&self, id: &str) -> bool {
        self.expansion.is_expanded(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initially_collapsed() {
        let tracker = ExpansionTracker::new();
        assert!(!tracker.is_expanded("useState"));
        assert_eq!(tracker.expanded_count(), 0);
    }

    #[test]
    fn test_toggle_round_trip() {
        let mut tracker = ExpansionTracker::new();
        assert!(tracker.toggle("useState"));
        assert!(tracker.is_expanded("useState"));
        assert!(!tracker.toggle("useState"));
        assert!(!tracker.is_expanded("useState"));
    }

    #[test]
    fn test_multiple_cards_open() {
        let mut tracker = ExpansionTracker::new();
        tracker.toggle("a");
        tracker.toggle("b");
        assert_eq!(tracker.expanded_ids(), vec!["a", "b"]);

        tracker.toggle("a");
        assert!(tracker.is_expanded("b"));
    }

    #[test]
    fn test_expand_and_collapse_all() {
        let mut tracker = ExpansionTracker::new();
        tracker.expand("z");
        tracker.expand_all(["a", "b"]);
        assert_eq!(tracker.expanded_ids(), vec!["a", "b", "z"]);

        tracker.collapse("b");
        assert_eq!(tracker.expanded_count(), 2);

        tracker.collapse_all();
        assert_eq!(tracker.expanded_count(), 0);
    }

    #[test]
    fn test_query_editing() {
        let mut state = UiState::with_query("use");
        state.push_char('R');
        assert_eq!(state.query(), "useR");
        assert!(state.pop_char());
        state.clear_query();
        assert!(!state.pop_char());
        assert_eq!(state.query(), "");
    }

    #[test]
    fn test_query_does_not_touch_expansion() {
        let mut state = UiState::new();
        state.toggle("useEffect");
        state.set_query("nothing matches this");
        state.clear_query();
        assert!(state.is_expanded("useEffect"));
    }
}
