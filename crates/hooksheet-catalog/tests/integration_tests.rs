//! Integration tests for hooksheet-catalog

use std::io::Write;

use hooksheet_catalog::{
    builtin, load_catalog, visible_set, Catalog, CatalogError, MatchField, TopicEntry,
};

#[test]
fn test_empty_query_returns_full_catalog_in_order() {
    let catalog = builtin::react_hooks();
    let visible = visible_set(&catalog, "");

    assert_eq!(visible.len(), builtin::REACT_HOOKS_LEN);
    assert_eq!(visible.ids(), catalog.ids().collect::<Vec<_>>());
}

#[test]
fn test_use_reducer_query() {
    let catalog = builtin::react_hooks();
    let visible = visible_set(&catalog, "useReducer");

    assert_eq!(visible.ids(), vec!["useReducer"]);
    assert!(!visible.contains("useState"));
}

#[test]
fn test_use_memo_query_matches_cross_reference() {
    let catalog = builtin::react_hooks();
    let visible = visible_set(&catalog, "usememo");

    assert_eq!(visible.ids(), vec!["useCallback", "useMemo"]);

    let callback = catalog.find("useCallback").unwrap();
    assert_eq!(callback.match_field("usememo"), Some(MatchField::Code));
}

#[test]
fn test_case_insensitive_filtering() {
    let catalog = builtin::react_hooks();
    assert_eq!(
        visible_set(&catalog, "USESTATE").ids(),
        visible_set(&catalog, "usestate").ids()
    );
}

#[test]
fn test_code_matches_reach_other_cards() {
    let catalog = builtin::react_hooks();
    // The custom hook sample is built on useState
    assert_eq!(
        visible_set(&catalog, "usestate").ids(),
        vec!["useState", "customHook"]
    );
}

#[test]
fn test_whitespace_query_is_blank() {
    let catalog = builtin::react_hooks();
    assert_eq!(visible_set(&catalog, "   ").len(), catalog.len());
}

#[test]
fn test_synthetic_catalog() {
    let catalog = Catalog::builder()
        .entry(TopicEntry::new("grep", "grep").with_code("grep -rn pattern ."))
        .entry(TopicEntry::new("sed", "sed").with_code("sed -i 's/a/b/' file"))
        .entry(TopicEntry::new("awk", "awk").with_description("Pattern scanning"))
        .build()
        .unwrap();

    assert_eq!(visible_set(&catalog, "pattern").ids(), vec!["grep", "awk"]);
}

#[test]
fn test_load_catalog_from_file() {
    let mut file = tempfile::Builder::new().suffix(".json").tempfile().unwrap();
    write!(
        file,
        r#"{{"entries": [{{"id": "x", "label": "X", "code": "x()"}}]}}"#
    )
    .unwrap();

    let catalog = load_catalog(file.path()).unwrap();
    assert_eq!(catalog.len(), 1);
}

#[test]
fn test_load_catalog_parse_error_names_path() {
    let mut file = tempfile::Builder::new().suffix(".yaml").tempfile().unwrap();
    write!(file, "entries: [{{id: ").unwrap();

    match load_catalog(file.path()) {
        Err(CatalogError::Parse { path, .. }) => assert_eq!(path, file.path()),
        other => panic!("expected parse error, got {other:?}"),
    }
}

#[test]
fn test_load_catalog_unsupported_extension() {
    let file = tempfile::Builder::new().suffix(".txt").tempfile().unwrap();
    assert!(matches!(
        load_catalog(file.path()),
        Err(CatalogError::UnsupportedFormat(_))
    ));
}

#[test]
fn test_load_catalog_missing_file() {
    assert!(matches!(
        load_catalog("/definitely/not/here.json"),
        Err(CatalogError::Io(_))
    ));
}
