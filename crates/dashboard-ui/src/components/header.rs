use crate::themes::Theme;
use ratatui::text::{Line, Span};

/// Decorative sparkle string placed either side of the application title.
pub const SPARKLES: &str = "✦ ✧ ✦ ✧";

/// Dashboard header rendering four lines:
///
/// 1. Application title with sparkle decorations.
/// 2. A 60-column `=` separator.
/// 3. `[ view title | section n/m ]`.
/// 4. An empty line.
pub struct Header<'a> {
    pub view_title: &'a str,
    /// Zero-based index of the visible section.
    pub section: usize,
    pub section_count: usize,
    pub theme: &'a Theme,
}

impl<'a> Header<'a> {
    pub fn new(view_title: &'a str, section: usize, section_count: usize, theme: &'a Theme) -> Self {
        Self {
            view_title,
            section,
            section_count,
            theme,
        }
    }

    /// Render the header as exactly four lines.
    pub fn to_lines(&self) -> Vec<Line<'a>> {
        let separator = "=".repeat(60);
        let position = format!("section {}/{}", self.section + 1, self.section_count.max(1));

        vec![
            Line::from(vec![
                Span::styled(SPARKLES, self.theme.header_sparkle),
                Span::styled(" BIKE SHARING DASHBOARD ", self.theme.header),
                Span::styled(SPARKLES, self.theme.header_sparkle),
            ]),
            Line::from(Span::styled(separator, self.theme.separator)),
            Line::from(vec![
                Span::styled("[ ", self.theme.label),
                Span::styled(self.view_title, self.theme.value),
                Span::styled(" | ", self.theme.label),
                Span::styled(position, self.theme.value),
                Span::styled(" ]", self.theme.label),
            ]),
            Line::from(""),
        ]
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
