//! Query filtering over a catalog
//!
//! Filtering is a pure function of `(catalog, query)`: the visible set is the
//! ordered subsequence of entries whose label, description or code contains
//! the query, compared case-insensitively. There is no ranking; results are
//! always in catalog order.

use std::ops::Range;

use crate::{Catalog, TopicEntry};

/// Lower-case text one char at a time
///
/// Unlike `str::to_lowercase` this ignores context (a final `Σ` folds to
/// `σ`), so every folded char maps back to exactly one source char. Queries
/// and searched fields both go through here.
pub fn fold_case(text: &str) -> String {
    text.chars().flat_map(char::to_lowercase).collect()
}

/// Trim and case-fold a raw query
pub fn normalize_query(query: &str) -> String {
    fold_case(query.trim())
}

/// Compute the visible set of a catalog for a query
pub fn visible_set<'a>(catalog: &'a Catalog, query: &str) -> VisibleSet<'a> {
    let normalized = normalize_query(query);
    let indices = matching_indices(catalog, &normalized);

    tracing::debug!(
        query = %normalized,
        visible = indices.len(),
        total = catalog.len(),
        "Filtered catalog"
    );

    VisibleSet {
        catalog,
        query: normalized,
        indices,
    }
}

fn matching_indices(catalog: &Catalog, normalized: &str) -> Vec<usize> {
    if normalized.is_empty() {
        return (0..catalog.len()).collect();
    }

    catalog
        .iter()
        .enumerate()
        .filter(|(_, entry)| entry.match_normalized(normalized).is_some())
        .map(|(index, _)| index)
        .collect()
}

/// The filtered, order-preserving view of a catalog for one query
#[derive(Debug, Clone)]
pub struct VisibleSet<'a> {
    catalog: &'a Catalog,
    query: String,
    indices: Vec<usize>,
}

impl<'a> VisibleSet<'a> {
    /// Build a visible set from indices computed elsewhere (e.g. a cache)
    pub fn from_indices(catalog: &'a Catalog, query: &str, indices: Vec<usize>) -> Self {
        Self {
            catalog,
            query: normalize_query(query),
            indices,
        }
    }

    /// The normalised query this set was computed for
    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn len(&self) -> usize {
        self.indices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    /// Catalog positions of the visible entries, ascending
    pub fn indices(&self) -> &[usize] {
        &self.indices
    }

    /// Visible entry at a position of the visible set
    pub fn get(&self, position: usize) -> Option<&'a TopicEntry> {
        self.indices
            .get(position)
            .and_then(|&index| self.catalog.get(index))
    }

    pub fn iter(&self) -> impl Iterator<Item = &'a TopicEntry> + '_ {
        self.indices
            .iter()
            .filter_map(move |&index| self.catalog.get(index))
    }

    /// Visible entries paired with their catalog position
    pub fn iter_indexed(&self) -> impl Iterator<Item = (usize, &'a TopicEntry)> + '_ {
        self.indices
            .iter()
            .filter_map(move |&index| self.catalog.get(index).map(|entry| (index, entry)))
    }

    /// Position of an id inside the visible set
    pub fn position_of(&self, id: &str) -> Option<usize> {
        self.iter().position(|entry| entry.id() == id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.position_of(id).is_some()
    }

    pub fn ids(&self) -> Vec<&'a str> {
        self.iter().map(TopicEntry::id).collect()
    }
}

/// Memoises the indices of the last query
///
/// Purely an optimisation: a miss recomputes the same result `visible_set`
/// would. One cache serves one catalog; a catalog of a different length
/// invalidates it.
#[derive(Debug, Default, Clone)]
pub struct FilterCache {
    key: Option<(String, usize)>,
    indices: Vec<usize>,
    hits: u64,
    misses: u64,
}

impl FilterCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Visible set for a query, reusing the previous result when possible
    pub fn visible<'a>(&mut self, catalog: &'a Catalog, query: &str) -> VisibleSet<'a> {
        let normalized = normalize_query(query);
        let key = (normalized, catalog.len());

        if self.key.as_ref() == Some(&key) {
            self.hits += 1;
        } else {
            self.misses += 1;
            self.indices = matching_indices(catalog, &key.0);
            self.key = Some(key);
        }

        VisibleSet::from_indices(catalog, query, self.indices.clone())
    }

    pub fn invalidate(&mut self) {
        self.key = None;
        self.indices.clear();
    }

    /// `(hits, misses)` since creation
    pub fn stats(&self) -> (u64, u64) {
        (self.hits, self.misses)
    }
}

/// Byte ranges of every case-insensitive occurrence of `query` in `text`
///
/// Occurrences are reported left to right without overlap. Ranges always
/// fall on char boundaries of `text`.
pub fn find_match_ranges(text: &str, query: &str) -> Vec<Range<usize>> {
    let needle: Vec<char> = normalize_query(query).chars().collect();
    if needle.is_empty() {
        return Vec::new();
    }

    // each folded char remembers the source char it came from
    let folded: Vec<(char, Range<usize>)> = text
        .char_indices()
        .flat_map(|(offset, c)| {
            let source = offset..offset + c.len_utf8();
            c.to_lowercase().map(move |lower| (lower, source.clone()))
        })
        .collect();

    let mut ranges: Vec<Range<usize>> = Vec::new();
    let mut i = 0;
    while i + needle.len() <= folded.len() {
        let window = &folded[i..i + needle.len()];
        let start = window[0].1.start;
        let overlaps = ranges.last().is_some_and(|last| start < last.end);

        if !overlaps && window.iter().map(|(c, _)| *c).eq(needle.iter().copied()) {
            ranges.push(start..window[needle.len() - 1].1.end);
            i += needle.len();
        } else {
            i += 1;
        }
    }

    ranges
}

/// Text segment for rendering with highlighting
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TextSegment {
    Normal(String),
    Highlighted(String),
}

/// Split text into normal and highlighted segments at the given ranges
pub fn highlight_segments(text: &str, ranges: &[Range<usize>]) -> Vec<TextSegment> {
    if ranges.is_empty() {
        return vec![TextSegment::Normal(text.to_string())];
    }

    let mut segments = Vec::new();
    let mut last_end = 0;

    for range in ranges {
        if range.start > last_end {
            segments.push(TextSegment::Normal(text[last_end..range.start].to_string()));
        }
        segments.push(TextSegment::Highlighted(text[range.clone()].to_string()));
        last_end = range.end;
    }

    if last_end < text.len() {
        segments.push(TextSegment::Normal(text[last_end..].to_string()));
    }

    segments
}

#[cfg(test)]
mod tests {
    use super::*;

    fn catalog() -> Catalog {
        Catalog::new(vec![
            TopicEntry::new("one", "First").with_code("let x = 1;"),
            TopicEntry::new("two", "Second").with_description("mentions first"),
            TopicEntry::new("three", "Third").with_code("// unrelated"),
        ])
        .unwrap()
    }

    #[test]
    fn test_empty_query_returns_everything() {
        let catalog = catalog();
        let visible = visible_set(&catalog, "");
        assert_eq!(visible.ids(), vec!["one", "two", "three"]);
        assert_eq!(visible_set(&catalog, " \t ").len(), 3);
    }

    #[test]
    fn test_results_keep_catalog_order() {
        let catalog = catalog();
        // "Second" matches on description only but still follows "First"
        let visible = visible_set(&catalog, "FIRST");
        assert_eq!(visible.ids(), vec!["one", "two"]);
        assert_eq!(visible.indices(), &[0, 1]);
    }

    #[test]
    fn test_no_results() {
        let catalog = catalog();
        let visible = visible_set(&catalog, "nothing like this");
        assert!(visible.is_empty());
        assert_eq!(visible.query(), "nothing like this");
    }

    #[test]
    fn test_position_lookup() {
        let catalog = catalog();
        let visible = visible_set(&catalog, "i");
        assert!(visible.contains("three"));
        assert_eq!(visible.get(0).map(TopicEntry::id), Some("one"));
        assert_eq!(visible.position_of("missing"), None);
    }

    #[test]
    fn test_cache_hits_on_same_normalized_query() {
        let catalog = catalog();
        let mut cache = FilterCache::new();

        let first = cache.visible(&catalog, "First").ids();
        let second = cache.visible(&catalog, "  first ").ids();
        assert_eq!(first, second);
        assert_eq!(cache.stats(), (1, 1));

        cache.invalidate();
        cache.visible(&catalog, "first");
        assert_eq!(cache.stats(), (1, 2));
    }

    #[test]
    fn test_find_match_ranges() {
        let ranges = find_match_ranges("hello world Hello", "hello");
        assert_eq!(ranges, vec![0..5, 12..17]);
    }

    #[test]
    fn test_find_match_ranges_non_overlapping() {
        assert_eq!(find_match_ranges("aaaa", "aa"), vec![0..2, 2..4]);
        assert!(find_match_ranges("abc", "").is_empty());
    }

    #[test]
    fn test_find_match_ranges_multibyte() {
        let text = "Ärger über useState";
        let ranges = find_match_ranges(text, "usestate");
        assert_eq!(ranges.len(), 1);
        assert_eq!(&text[ranges[0].clone()], "useState");
    }

    #[test]
    fn test_find_match_ranges_agrees_with_filter_on_sigma() {
        let catalog = Catalog::new(vec![TopicEntry::new("greek", "ΟΔΟΣ")]).unwrap();
        assert_eq!(visible_set(&catalog, "οδοσ").ids(), vec!["greek"]);
        assert_eq!(visible_set(&catalog, "ΟΔΟΣ").ids(), vec!["greek"]);
        assert_eq!(find_match_ranges("ΟΔΟΣ", "οδοσ"), vec![0.."ΟΔΟΣ".len()]);
    }

    #[test]
    fn test_find_match_ranges_covers_expanding_chars() {
        // 'İ' folds to two chars, "i" plus a combining dot
        let text = "İstanbul";
        let catalog = Catalog::new(vec![TopicEntry::new("city", text)]).unwrap();
        assert_eq!(visible_set(&catalog, "stan").ids(), vec!["city"]);
        assert_eq!(find_match_ranges(text, "stan"), vec![2..6]);

        let ranges = find_match_ranges(text, "i");
        assert_eq!(ranges, vec![0..2]);
        assert_eq!(&text[ranges[0].clone()], "İ");
    }

    #[test]
    fn test_highlight_segments() {
        let segments = highlight_segments("hello world hello", &[0..5, 12..17]);
        assert_eq!(
            segments,
            vec![
                TextSegment::Highlighted("hello".into()),
                TextSegment::Normal(" world ".into()),
                TextSegment::Highlighted("hello".into()),
            ]
        );
    }

    #[test]
    fn test_highlight_without_ranges() {
        assert_eq!(
            highlight_segments("plain", &[]),
            vec![TextSegment::Normal("plain".into())]
        );
    }
}
