//! End-to-end scenarios across catalog, state, clipboard and rendering

use std::time::{Duration, Instant};

use crossterm::event::KeyCode;
use hooksheet_catalog::builtin;
use hooksheet_integration_tests::{
    ctrl, key, react_sheet, render_to_string, shell_catalog, sheet_for, type_query,
};
use hooksheet_tui::DEFAULT_COPY_ACK;

#[test]
fn test_fresh_sheet_shows_every_card_collapsed() {
    let (mut sheet, _) = react_sheet();
    let screen = render_to_string(&mut sheet, 100, 50, Instant::now());

    assert_eq!(sheet.visible_ids().len(), builtin::REACT_HOOKS_LEN);
    assert!(screen.contains("(11/11)"));
    assert!(screen.contains("▸ 01 useState"));
    assert!(!screen.contains("▾"));
    assert!(!screen.contains("Tip:"));
}

#[test]
fn test_search_use_reducer() {
    let (mut sheet, _) = react_sheet();
    type_query(&mut sheet, "useReducer");

    assert_eq!(sheet.visible_ids(), vec!["useReducer"]);
    let screen = render_to_string(&mut sheet, 100, 30, Instant::now());
    assert!(screen.contains("(1/11)"));
    assert!(!screen.contains("useState"));
}

#[test]
fn test_search_usememo_finds_code_reference() {
    let (mut sheet, _) = react_sheet();
    type_query(&mut sheet, "usememo");

    assert_eq!(sheet.visible_ids(), vec!["useCallback", "useMemo"]);
}

#[test]
fn test_search_ignores_case() {
    let (mut upper, _) = react_sheet();
    let (mut lower, _) = react_sheet();
    type_query(&mut upper, "USESTATE");
    type_query(&mut lower, "usestate");

    assert_eq!(upper.visible_ids(), lower.visible_ids());
}

#[test]
fn test_no_results_state() {
    let (mut sheet, _) = react_sheet();
    type_query(&mut sheet, "useNothing");

    let screen = render_to_string(&mut sheet, 100, 30, Instant::now());
    assert!(screen.contains("No results for \"useNothing\""));
    assert!(screen.contains("(0/11)"));
}

#[test]
fn test_expand_effect_then_copy_and_wait() {
    let (mut sheet, clipboard) = react_sheet();
    let t0 = Instant::now();

    sheet.handle_key_at(key(KeyCode::Down), t0);
    sheet.handle_key_at(key(KeyCode::Enter), t0);
    assert!(sheet.is_expanded("useEffect"));

    let screen = render_to_string(&mut sheet, 100, 50, t0);
    assert!(screen.contains("▾ 02 useEffect"));
    assert!(screen.contains("⧉ copy"));

    sheet.handle_key_at(ctrl('y'), t0);
    let code = sheet.catalog().find("useEffect").map(|e| e.code().to_string());
    assert_eq!(clipboard.last(), code);

    let screen = render_to_string(&mut sheet, 100, 50, t0 + Duration::from_millis(700));
    assert!(screen.contains("✓ copied"));

    // other interactions do not cut the acknowledgment short
    sheet.handle_key_at(key(KeyCode::Up), t0 + Duration::from_millis(800));
    sheet.handle_key_at(key(KeyCode::Enter), t0 + Duration::from_millis(900));
    assert!(!sheet.tick(t0 + Duration::from_millis(1000)));

    let after = t0 + DEFAULT_COPY_ACK;
    assert!(sheet.tick(after));
    let screen = render_to_string(&mut sheet, 100, 50, after);
    assert!(!screen.contains("✓ copied"));
    assert!(screen.contains("⧉ copy"));
}

#[test]
fn test_expansion_survives_filtering_round_trip() {
    let (mut sheet, _) = react_sheet();
    sheet.handle_key(key(KeyCode::Enter));
    assert!(sheet.is_expanded("useState"));

    type_query(&mut sheet, "useReducer");
    assert!(!sheet.visible_ids().contains(&"useState".to_string()));

    sheet.handle_key(key(KeyCode::Esc));
    assert_eq!(sheet.query(), "");
    assert!(sheet.is_expanded("useState"));
    assert!(!sheet.should_quit());
}

#[test]
fn test_multiple_cards_open_at_once() {
    let (mut sheet, _) = react_sheet();
    sheet.handle_key(key(KeyCode::Enter));
    sheet.handle_key(key(KeyCode::Down));
    sheet.handle_key(key(KeyCode::Enter));
    sheet.handle_key(key(KeyCode::Down));
    sheet.handle_key(key(KeyCode::Enter));

    for id in ["useState", "useEffect", "useContext"] {
        assert!(sheet.is_expanded(id), "{id} should be expanded");
    }
    assert_eq!(sheet.state().expansion().expanded_count(), 3);
}

#[test]
fn test_custom_catalog_is_searchable() {
    let (mut sheet, _) = sheet_for(shell_catalog());
    type_query(&mut sheet, "find");

    // xargs' sample pipes find into it
    assert_eq!(sheet.visible_ids(), vec!["find", "xargs"]);

    let screen = render_to_string(&mut sheet, 80, 20, Instant::now());
    assert!(screen.contains("02 find"));
    assert!(screen.contains("03 xargs"));
}
