//! Fixtures shared by the workspace integration tests

use std::{sync::Arc, time::Instant};

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use hooksheet_catalog::{builtin, Catalog, TopicEntry};
use hooksheet_tui::{CheatSheet, MemoryClipboard};
use ratatui::{backend::TestBackend, Terminal};

/// A small non-React catalog, to show nothing is tied to the built-in one
pub fn shell_catalog() -> Catalog {
    Catalog::builder()
        .entry(
            TopicEntry::new("grep", "grep")
                .with_description("Search file contents for a pattern")
                .with_code("grep -rn \"TODO\" src/")
                .with_note("Add -i for a case-insensitive search.")
                .with_accent("#98c379"),
        )
        .entry(
            TopicEntry::new("find", "find")
                .with_description("Walk a directory tree")
                .with_code("find . -name '*.rs' -mtime -1"),
        )
        .entry(
            TopicEntry::new("xargs", "xargs")
                .with_description("Build command lines from input")
                .with_code("find . -name '*.tmp' | xargs rm"),
        )
        .build()
        .unwrap_or_else(|e| panic!("fixture catalog is valid: {e}"))
}

/// Sheet over the built-in catalog plus a handle on its clipboard
pub fn react_sheet() -> (CheatSheet, MemoryClipboard) {
    sheet_for(builtin::react_hooks())
}

pub fn sheet_for(catalog: Catalog) -> (CheatSheet, MemoryClipboard) {
    let clipboard = MemoryClipboard::new();
    let sheet = CheatSheet::new(Arc::new(catalog), Box::new(clipboard.clone()));
    (sheet, clipboard)
}

pub fn key(code: KeyCode) -> KeyEvent {
    KeyEvent::new(code, KeyModifiers::NONE)
}

pub fn ctrl(c: char) -> KeyEvent {
    KeyEvent::new(KeyCode::Char(c), KeyModifiers::CONTROL)
}

/// Type `text` into the search box one key at a time
pub fn type_query(sheet: &mut CheatSheet, text: &str) {
    for c in text.chars() {
        sheet.handle_key(key(KeyCode::Char(c)));
    }
}

/// Render into a test backend and return the screen as text, one line per row
pub fn render_to_string(sheet: &mut CheatSheet, width: u16, height: u16, now: Instant) -> String {
    let mut terminal = match Terminal::new(TestBackend::new(width, height)) {
        Ok(terminal) => terminal,
        Err(e) => panic!("test backend never fails: {e}"),
    };
    if let Err(e) = terminal.draw(|frame| {
        let area = frame.area();
        sheet.render_at(frame, area, now);
    }) {
        panic!("drawing to a test backend never fails: {e}");
    }

    let buffer = terminal.backend().buffer();
    let mut text = String::new();
    for y in 0..buffer.area.height {
        for x in 0..buffer.area.width {
            text.push_str(buffer[(x, y)].symbol());
        }
        text.push('\n');
    }
    text
}
