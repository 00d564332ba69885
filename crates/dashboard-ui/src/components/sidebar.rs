//! Sidebar menu listing every view.

use ratatui::text::{Line, Span};
use unicode_width::UnicodeWidthStr;

use dashboard_runtime::views::MenuOption;

use crate::themes::Theme;

const MARKER: &str = "▶ ";
const BLANK: &str = "  ";

pub struct Sidebar<'a> {
    pub selected: MenuOption,
    pub theme: &'a Theme,
}

impl<'a> Sidebar<'a> {
    pub fn new(selected: MenuOption, theme: &'a Theme) -> Self {
        Self { selected, theme }
    }

    /// Display columns needed for the widest entry, marker included.
    pub fn content_width() -> u16 {
        let widest = MenuOption::ALL
            .iter()
            .map(|o| o.title().width())
            .max()
            .unwrap_or(0);
        (MARKER.width() + widest + 1) as u16
    }

    /// One line per option; the selected one is highlighted across the
    /// full content width.
    pub fn to_lines(&self) -> Vec<Line<'a>> {
        let width = Self::content_width() as usize;
        MenuOption::ALL
            .iter()
            .map(|&option| {
                let is_selected = option == self.selected;
                let prefix = if is_selected { MARKER } else { BLANK };
                let mut label = format!("{prefix}{}", option.title());
                let pad = width.saturating_sub(label.width());
                label.push_str(&" ".repeat(pad));

                let style = if is_selected {
                    self.theme.sidebar_selected
                } else {
                    self.theme.sidebar
                };
                Line::from(Span::styled(label, style))
            })
            .collect()
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
