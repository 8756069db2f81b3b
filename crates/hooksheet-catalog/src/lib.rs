//! Hooksheet catalog
//!
//! This crate holds the content side of the cheat sheet:
//! - [`TopicEntry`]: one card (label, description, tip, code sample)
//! - [`Catalog`]: the ordered, immutable list of entries, unique by id
//! - [`filter`]: the pure query filter producing a [`VisibleSet`]
//! - [`builtin`]: the built-in React hooks catalog
//! - [`loader`]: catalogs read from JSON, YAML or TOML files
//!
//! # Examples
//!
//! ```
//! use hooksheet_catalog::{builtin, visible_set};
//!
//! let catalog = builtin::react_hooks();
//! let visible = visible_set(&catalog, "usememo");
//!
//! // useCallback's snippet mentions useMemo, so both cards match
//! assert_eq!(visible.ids(), vec!["useCallback", "useMemo"]);
//! ```

pub mod builtin;
pub mod catalog;
pub mod entry;
pub mod error;
pub mod filter;
pub mod loader;

pub use catalog::{Catalog, CatalogBuilder};
pub use entry::{MatchField, TopicEntry, DEFAULT_ACCENT};
pub use error::{CatalogError, Result};
pub use filter::{
    find_match_ranges, fold_case, highlight_segments, normalize_query, visible_set, FilterCache, TextSegment,
    VisibleSet,
};
pub use loader::{catalog_to_json, load_catalog, parse_catalog, CatalogFormat};
