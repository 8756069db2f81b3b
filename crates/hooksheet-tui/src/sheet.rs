//! The cheat sheet view: input handling over catalog, query and expansion
//!
//! [`CheatSheet`] owns all interaction state. Key and mouse handlers return
//! `true` when something changed and the screen should be redrawn.
//! Rendering lives in [`crate::view`].

use std::{
    sync::Arc,
    time::{Duration, Instant},
};

use crossterm::event::{
    KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};
use hooksheet_catalog::{Catalog, FilterCache, TopicEntry};
use hooksheet_config::SheetConfig;
use ratatui::layout::{Position, Rect};

use crate::{
    clipboard::{ClipboardProvider, CopyTracker},
    state::UiState,
};

/// Default lifetime of the "copied" acknowledgment
pub const DEFAULT_COPY_ACK: Duration = Duration::from_millis(1500);

/// What a click on a region of the last frame does
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HitTarget {
    Toggle(String),
    Copy(String),
}

/// Clickable screen area recorded while rendering
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HitRegion {
    pub area: Rect,
    pub target: HitTarget,
}

pub struct CheatSheet {
    pub(crate) catalog: Arc<Catalog>,
    pub(crate) state: UiState,
    pub(crate) cache: FilterCache,
    pub(crate) copies: CopyTracker,
    pub(crate) clipboard: Box<dyn ClipboardProvider>,
    pub(crate) selected: Option<String>,
    /// Index (into the visible set) of the first card on screen
    pub(crate) scroll: usize,
    /// Cards that fit on one screen, updated on render
    pub(crate) page_size: usize,
    pub(crate) show_numbers: bool,
    pub(crate) mouse_enabled: bool,
    pub(crate) hits: Vec<HitRegion>,
    should_quit: bool,
}

impl CheatSheet {
    pub fn new(catalog: Arc<Catalog>, clipboard: Box<dyn ClipboardProvider>) -> Self {
        let mut sheet = Self {
            catalog,
            state: UiState::new(),
            cache: FilterCache::new(),
            copies: CopyTracker::new(DEFAULT_COPY_ACK),
            clipboard,
            selected: None,
            scroll: 0,
            page_size: 1,
            show_numbers: true,
            mouse_enabled: true,
            hits: Vec::new(),
            should_quit: false,
        };
        sheet.sync_selection();
        sheet
    }

    /// Build a sheet with the display and timing settings of `config`
    pub fn from_config(
        catalog: Arc<Catalog>,
        clipboard: Box<dyn ClipboardProvider>,
        config: &SheetConfig,
    ) -> Self {
        Self::new(catalog, clipboard)
            .with_copy_ack(config.copy_ack_duration())
            .with_numbers(config.show_numbers)
            .with_mouse(config.mouse)
    }

    pub fn with_query(mut self, query: impl Into<String>) -> Self {
        self.state.set_query(query);
        self.sync_selection();
        self
    }

    pub fn with_copy_ack(mut self, duration: Duration) -> Self {
        self.copies = CopyTracker::new(duration);
        self
    }

    pub fn with_numbers(mut self, show_numbers: bool) -> Self {
        self.show_numbers = show_numbers;
        self
    }

    pub fn with_mouse(mut self, mouse_enabled: bool) -> Self {
        self.mouse_enabled = mouse_enabled;
        self
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn state(&self) -> &UiState {
        &self.state
    }

    pub fn query(&self) -> &str {
        self.state.query()
    }

    pub fn selected_id(&self) -> Option<&str> {
        self.selected.as_deref()
    }

    pub fn selected_entry(&self) -> Option<&TopicEntry> {
        self.selected.as_deref().and_then(|id| self.catalog.find(id))
    }

    pub fn is_expanded(&self, id: &str) -> bool {
        self.state.is_expanded(id)
    }

    pub fn is_copy_acknowledged(&self, id: &str, now: Instant) -> bool {
        self.copies.is_acknowledged(id, now)
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    pub fn mouse_enabled(&self) -> bool {
        self.mouse_enabled
    }

    /// Ids of the cards matching the current query, in catalog order
    pub fn visible_ids(&mut self) -> Vec<String> {
        self.cache
            .visible(&self.catalog, self.state.query())
            .ids()
            .into_iter()
            .map(str::to_string)
            .collect()
    }

    /// Catalog indices of the visible cards
    pub(crate) fn visible_indices(&mut self) -> Vec<usize> {
        self.cache
            .visible(&self.catalog, self.state.query())
            .indices()
            .to_vec()
    }

    /// Position of the selected card inside the visible set
    pub(crate) fn selected_position(&mut self) -> Option<usize> {
        let selected = self.selected.clone()?;
        self.visible_ids().iter().position(|id| *id == selected)
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> bool {
        self.handle_key_at(key, Instant::now())
    }

    /// Apply one key press; `now` stamps any copy acknowledgment
    pub fn handle_key_at(&mut self, key: KeyEvent, now: Instant) -> bool {
        if key.kind == KeyEventKind::Release {
            return false;
        }

        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        match key.code {
            KeyCode::Char('c') | KeyCode::Char('q') if ctrl => {
                self.quit();
                true
            }
            KeyCode::Char('u') if ctrl => {
                if self.query().is_empty() {
                    return false;
                }
                self.state.clear_query();
                self.sync_selection();
                true
            }
            KeyCode::Char('y') if ctrl => self.copy_selected_at(now),
            KeyCode::Char('e') if ctrl => {
                self.expand_visible();
                true
            }
            KeyCode::Char('w') if ctrl => {
                self.state.expansion_mut().collapse_all();
                true
            }
            KeyCode::Char('p') if ctrl => self.move_selection(-1),
            KeyCode::Char('n') if ctrl => self.move_selection(1),
            KeyCode::Char(c) if !ctrl && !key.modifiers.contains(KeyModifiers::ALT) => {
                self.state.push_char(c);
                self.sync_selection();
                true
            }
            KeyCode::Backspace => {
                if self.state.pop_char() {
                    self.sync_selection();
                    true
                } else {
                    false
                }
            }
            KeyCode::Esc => {
                if self.query().is_empty() {
                    self.quit();
                } else {
                    self.state.clear_query();
                    self.sync_selection();
                }
                true
            }
            KeyCode::Up => self.move_selection(-1),
            KeyCode::Down => self.move_selection(1),
            KeyCode::PageUp => self.move_selection(-(self.page_size.max(1) as isize)),
            KeyCode::PageDown => self.move_selection(self.page_size.max(1) as isize),
            KeyCode::Home => self.select_at(0),
            KeyCode::End => {
                let last = self.visible_indices().len().saturating_sub(1);
                self.select_at(last)
            }
            KeyCode::Enter | KeyCode::Tab => self.toggle_selected(),
            _ => false,
        }
    }

    pub fn handle_mouse(&mut self, mouse: MouseEvent) -> bool {
        self.handle_mouse_at(mouse, Instant::now())
    }

    /// Apply one mouse event against the regions of the last render
    pub fn handle_mouse_at(&mut self, mouse: MouseEvent, now: Instant) -> bool {
        if !self.mouse_enabled {
            return false;
        }

        match mouse.kind {
            MouseEventKind::Down(MouseButton::Left) => {
                let position = Position::new(mouse.column, mouse.row);
                let Some(target) = self.hit_at(position) else {
                    return false;
                };

                match target {
                    HitTarget::Copy(id) => {
                        self.selected = Some(id.clone());
                        self.copy_at(&id, now);
                    }
                    HitTarget::Toggle(id) => {
                        self.selected = Some(id.clone());
                        self.state.toggle(&id);
                    }
                }
                true
            }
            MouseEventKind::ScrollUp => self.move_selection(-1),
            MouseEventKind::ScrollDown => self.move_selection(1),
            _ => false,
        }
    }

    /// Expire finished acknowledgments; `true` when one reverted
    pub fn tick(&mut self, now: Instant) -> bool {
        self.copies.expire(now) > 0
    }

    /// Copy the selected card's code, even when the card is collapsed
    pub fn copy_selected_at(&mut self, now: Instant) -> bool {
        match self.selected.clone() {
            Some(id) => self.copy_at(&id, now),
            None => false,
        }
    }

    /// Copy one card's code; a clipboard failure leaves no acknowledgment
    pub fn copy_at(&mut self, id: &str, now: Instant) -> bool {
        let Some(entry) = self.catalog.find(id) else {
            return false;
        };
        self.copies
            .copy(self.clipboard.as_mut(), entry.id(), entry.code(), now)
    }

    pub fn toggle_selected(&mut self) -> bool {
        match self.selected.clone() {
            Some(id) => {
                self.state.toggle(&id);
                true
            }
            None => false,
        }
    }

    pub fn set_query(&mut self, query: impl Into<String>) {
        self.state.set_query(query);
        self.sync_selection();
    }

    pub fn quit(&mut self) {
        self.should_quit = true;
    }

    fn expand_visible(&mut self) {
        let ids = self.visible_ids();
        self.state.expansion_mut().expand_all(ids);
    }

    fn hit_at(&self, position: Position) -> Option<HitTarget> {
        self.hits
            .iter()
            .find(|hit| hit.area.contains(position))
            .map(|hit| hit.target.clone())
    }

    fn move_selection(&mut self, delta: isize) -> bool {
        let len = self.visible_indices().len();
        if len == 0 {
            return false;
        }

        let current = self.selected_position().unwrap_or(0) as isize;
        let target = (current + delta).clamp(0, len as isize - 1) as usize;
        self.select_at(target)
    }

    fn select_at(&mut self, position: usize) -> bool {
        let ids = self.visible_ids();
        match ids.into_iter().nth(position) {
            Some(id) if self.selected.as_deref() != Some(id.as_str()) => {
                self.selected = Some(id);
                true
            }
            _ => false,
        }
    }

    /// Keep the selection on the same entry if it is still visible,
    /// otherwise fall back to the first visible card
    fn sync_selection(&mut self) {
        let ids = self.visible_ids();
        let keep = self
            .selected
            .as_ref()
            .is_some_and(|selected| ids.contains(selected));

        if !keep {
            self.selected = ids.into_iter().next();
            self.scroll = 0;
        }
    }
}
