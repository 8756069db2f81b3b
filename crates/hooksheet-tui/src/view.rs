//! Rendering for the cheat sheet
//!
//! The screen is a search box, the scrolling list of cards and a footer
//! with key hints. Every frame also records the clickable regions (card
//! headers and copy labels) that mouse handling looks up afterwards.

use std::{str::FromStr, time::Instant};

use hooksheet_catalog::{find_match_ranges, highlight_segments, TextSegment, TopicEntry};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Margin, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{
        Block, BorderType, Borders, Paragraph, Scrollbar, ScrollbarOrientation, ScrollbarState,
    },
    Frame,
};

use crate::sheet::{CheatSheet, HitRegion, HitTarget};

const COPY_LABEL: &str = " ⧉ copy ";
const COPIED_LABEL: &str = " ✓ copied ";
const FOOTER_HINTS: &str =
    "↑↓ select | Enter expand | Ctrl+Y copy | Ctrl+E/W expand/collapse all | Esc clear/quit";

fn highlight_style() -> Style {
    Style::default()
        .fg(Color::Black)
        .bg(Color::Yellow)
        .add_modifier(Modifier::BOLD)
}

/// Accent colour of a card; unparseable values fall back to cyan
pub fn accent_color(entry: &TopicEntry) -> Color {
    Color::from_str(entry.accent_color()).unwrap_or(Color::Cyan)
}

/// Rows a card occupies, borders included
pub fn card_height(entry: &TopicEntry, expanded: bool) -> u16 {
    // top border, description, bottom border
    let mut height = 3usize;
    if expanded {
        height += 1 + entry.code().lines().count().max(1);
        if !entry.note().is_empty() {
            height += 2;
        }
    }
    height.min(u16::MAX as usize) as u16
}

/// Split `text` into spans, marking occurrences of `query`
pub fn highlighted_spans(text: &str, query: &str, base: Style) -> Vec<Span<'static>> {
    let ranges = find_match_ranges(text, query);
    highlight_segments(text, &ranges)
        .into_iter()
        .map(|segment| match segment {
            TextSegment::Normal(s) => Span::styled(s, base),
            TextSegment::Highlighted(s) => Span::styled(s, base.patch(highlight_style())),
        })
        .collect()
}

impl CheatSheet {
    pub fn render(&mut self, frame: &mut Frame, area: Rect) {
        self.render_at(frame, area, Instant::now());
    }

    /// Draw the whole sheet as of `now`
    pub fn render_at(&mut self, frame: &mut Frame, area: Rect, now: Instant) {
        self.hits.clear();

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),
                Constraint::Min(0),
                Constraint::Length(1),
            ])
            .split(area);

        let visible = self.visible_indices();
        self.render_search_box(frame, chunks[0], visible.len());

        if visible.is_empty() {
            self.render_no_results(frame, chunks[1]);
        } else {
            self.render_cards(frame, chunks[1], &visible, now);
        }

        let footer = Paragraph::new(FOOTER_HINTS)
            .style(Style::default().fg(Color::Gray))
            .alignment(Alignment::Center);
        frame.render_widget(footer, chunks[2]);
    }

    fn render_search_box(&self, frame: &mut Frame, area: Rect, visible: usize) {
        let count = format!(" ({}/{}) ", visible, self.catalog.len());
        let block = Block::default()
            .title(" Search ")
            .title(Line::from(count).right_aligned())
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Yellow));

        let line = if self.query().is_empty() {
            Line::from(vec![
                Span::raw("› "),
                Span::styled("Type to filter…", Style::default().fg(Color::DarkGray)),
            ])
        } else {
            Line::from(vec![
                Span::raw("› "),
                Span::raw(self.query().to_string()),
                Span::styled("▏", Style::default().fg(Color::Yellow)),
            ])
        };

        frame.render_widget(Paragraph::new(line).block(block), area);
    }

    fn render_no_results(&self, frame: &mut Frame, area: Rect) {
        let text = vec![
            Line::from(""),
            Line::from(Span::styled(
                format!("No results for \"{}\"", self.query()),
                Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
            )),
            Line::from(Span::styled(
                "Press Esc to clear the search",
                Style::default().fg(Color::DarkGray),
            )),
        ];

        let paragraph = Paragraph::new(text)
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::ALL).border_style(Style::default().fg(Color::DarkGray)));
        frame.render_widget(paragraph, area);
    }

    fn render_cards(&mut self, frame: &mut Frame, area: Rect, visible: &[usize], now: Instant) {
        if area.height == 0 || area.width < 4 {
            return;
        }

        let catalog = self.catalog.clone();
        let heights: Vec<u16> = visible
            .iter()
            .filter_map(|&index| catalog.get(index))
            .map(|entry| card_height(entry, self.state.is_expanded(entry.id())))
            .collect();

        let selected = self.selected_position().unwrap_or(0);
        self.update_scroll(&heights, selected, area.height);

        // leave the last column for the scrollbar
        let list_area = Rect {
            width: area.width - 1,
            ..area
        };

        let mut y = list_area.y;
        let bottom = list_area.y + list_area.height;
        for (position, &index) in visible.iter().enumerate().skip(self.scroll) {
            if y >= bottom {
                break;
            }
            let Some(entry) = catalog.get(index) else {
                continue;
            };

            let height = heights[position].min(bottom - y);
            let card_area = Rect::new(list_area.x, y, list_area.width, height);
            let number = index + 1;
            self.render_card(frame, card_area, heights[position], entry, number, position == selected, now);
            y += height;
        }

        let mut scrollbar_state = ScrollbarState::new(visible.len()).position(selected);
        let scrollbar = Scrollbar::default()
            .orientation(ScrollbarOrientation::VerticalRight)
            .begin_symbol(Some("↑"))
            .end_symbol(Some("↓"));
        frame.render_stateful_widget(scrollbar, area, &mut scrollbar_state);
    }

    /// Scroll so the selected card is fully on screen where possible
    fn update_scroll(&mut self, heights: &[u16], selected: usize, viewport: u16) {
        if selected < self.scroll {
            self.scroll = selected;
        }
        while self.scroll < selected {
            let used: u32 = heights[self.scroll..=selected].iter().map(|&h| h as u32).sum();
            if used <= viewport as u32 {
                break;
            }
            self.scroll += 1;
        }
        self.scroll = self.scroll.min(heights.len().saturating_sub(1));

        let mut used = 0u32;
        self.page_size = heights[self.scroll..]
            .iter()
            .take_while(|&&h| {
                used += h as u32;
                used <= viewport as u32
            })
            .count()
            .max(1);
    }

    #[allow(clippy::too_many_arguments)]
    fn render_card(
        &mut self,
        frame: &mut Frame,
        area: Rect,
        full_height: u16,
        entry: &TopicEntry,
        number: usize,
        is_selected: bool,
        now: Instant,
    ) {
        let query = self.state.query().to_string();
        let expanded = self.state.is_expanded(entry.id());
        let accent = accent_color(entry);

        let mut title = vec![Span::styled(
            if expanded { " ▾ " } else { " ▸ " },
            Style::default().fg(accent),
        )];
        if self.show_numbers {
            title.push(Span::styled(
                format!("{:02} ", number),
                Style::default().fg(Color::DarkGray),
            ));
        }
        title.extend(highlighted_spans(
            entry.label(),
            &query,
            Style::default().fg(accent).add_modifier(Modifier::BOLD),
        ));
        title.push(Span::raw(" "));

        let mut block = Block::default()
            .title(Line::from(title))
            .borders(Borders::ALL)
            .border_type(if is_selected {
                BorderType::Thick
            } else {
                BorderType::Rounded
            })
            .border_style(Style::default().fg(accent));

        let copy_label = if self.copies.is_acknowledged(entry.id(), now) {
            COPIED_LABEL
        } else {
            COPY_LABEL
        };
        if expanded {
            let style = if copy_label == COPIED_LABEL {
                Style::default().fg(Color::Green).add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(accent)
            };
            block = block.title_bottom(Line::from(Span::styled(copy_label, style)).right_aligned());
        }

        let mut lines = vec![Line::from(highlighted_spans(
            entry.description(),
            &query,
            Style::default(),
        ))];

        if expanded {
            lines.push(Line::from(""));
            let code_style = Style::default().fg(Color::LightYellow);
            for code_line in entry.code().lines() {
                let mut spans = vec![Span::styled("│ ", Style::default().fg(Color::DarkGray))];
                spans.extend(highlighted_spans(code_line, &query, code_style));
                lines.push(Line::from(spans));
            }
            if !entry.note().is_empty() {
                lines.push(Line::from(""));
                lines.push(Line::from(vec![
                    Span::styled("Tip: ", Style::default().fg(accent).add_modifier(Modifier::BOLD)),
                    Span::styled(entry.note().to_string(), Style::default().fg(Color::Gray)),
                ]));
            }
        }

        frame.render_widget(Paragraph::new(lines).block(block), area);
        self.record_hits(area, full_height, entry.id(), expanded, copy_label);
    }

    fn record_hits(&mut self, area: Rect, full_height: u16, id: &str, expanded: bool, copy_label: &str) {
        // title border plus description row
        let header = Rect {
            height: area.height.min(2),
            ..area
        };
        self.hits.push(HitRegion {
            area: header,
            target: HitTarget::Toggle(id.to_string()),
        });

        // the copy label sits on the bottom border, only when it is on screen
        if expanded && area.height == full_height {
            let inner = area.inner(Margin {
                horizontal: 1,
                vertical: 0,
            });
            let width = (copy_label.chars().count() as u16).min(inner.width);
            self.hits.push(HitRegion {
                area: Rect::new(inner.x + inner.width - width, area.y + area.height - 1, width, 1),
                target: HitTarget::Copy(id.to_string()),
            });
        }
    }
}
