use ratatui::style::{Color, Modifier, Style};

use dashboard_runtime::views::SeriesColor;

/// Terminal background type detection.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum BackgroundType {
    Dark,
    Light,
}

/// Detect terminal background type from the `COLORFGBG` environment variable.
///
/// The variable has the format `"foreground;background"`.  Background values
/// 0–6 are considered dark; 7–15 are considered light.  If the variable is
/// absent or unparseable, `BackgroundType::Dark` is returned.
pub fn detect_background() -> BackgroundType {
    if let Ok(val) = std::env::var("COLORFGBG") {
        if let Some(bg) = val.split(';').next_back() {
            if let Ok(bg_num) = bg.parse::<u8>() {
                return if bg_num <= 6 {
                    BackgroundType::Dark
                } else {
                    BackgroundType::Light
                };
            }
        }
    }
    BackgroundType::Dark
}

/// All styles used by the dashboard widgets.
#[derive(Debug, Clone)]
pub struct Theme {
    // ── Header ───────────────────────────────────────────────────────────────
    pub header: Style,
    pub header_sparkle: Style,
    pub separator: Style,

    // ── Text ─────────────────────────────────────────────────────────────────
    pub text: Style,
    pub dim: Style,
    pub label: Style,
    pub value: Style,
    pub warning: Style,
    /// Computed one-line notes, e.g. correlation values.
    pub note: Style,
    pub narrative: Style,

    // ── Navigation ───────────────────────────────────────────────────────────
    pub sidebar: Style,
    pub sidebar_selected: Style,
    pub section_tab: Style,
    pub section_tab_active: Style,

    // ── Table ────────────────────────────────────────────────────────────────
    pub table_header: Style,
    pub table_border: Style,
    pub table_row: Style,
    pub table_row_alt: Style,

    // ── Charts ───────────────────────────────────────────────────────────────
    pub chart_axis: Style,
    pub chart_title: Style,

    /// Whether series colours may use 256-colour indices.
    pub extended_palette: bool,
}

impl Theme {
    // ── Constructors ─────────────────────────────────────────────────────────

    /// Dark-background terminal theme (default).
    pub fn dark() -> Self {
        Self {
            header: Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
            header_sparkle: Style::default().fg(Color::Yellow),
            separator: Style::default().fg(Color::DarkGray),

            text: Style::default().fg(Color::White),
            dim: Style::default().fg(Color::DarkGray),
            label: Style::default().fg(Color::Gray),
            value: Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
            warning: Style::default().fg(Color::Yellow),
            note: Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
            narrative: Style::default().fg(Color::Gray),

            sidebar: Style::default().fg(Color::Gray),
            sidebar_selected: Style::default()
                .fg(Color::Black)
                .bg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
            section_tab: Style::default().fg(Color::DarkGray),
            section_tab_active: Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD | Modifier::UNDERLINED),

            table_header: Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
            table_border: Style::default().fg(Color::DarkGray),
            table_row: Style::default().fg(Color::White),
            table_row_alt: Style::default().fg(Color::Gray),

            chart_axis: Style::default().fg(Color::Gray),
            chart_title: Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),

            extended_palette: true,
        }
    }

    /// Light-background terminal theme.
    pub fn light() -> Self {
        Self {
            header: Style::default()
                .fg(Color::Blue)
                .add_modifier(Modifier::BOLD),
            header_sparkle: Style::default().fg(Color::Magenta),
            separator: Style::default().fg(Color::Gray),

            text: Style::default().fg(Color::Black),
            dim: Style::default().fg(Color::Gray),
            label: Style::default().fg(Color::DarkGray),
            value: Style::default()
                .fg(Color::Black)
                .add_modifier(Modifier::BOLD),
            warning: Style::default().fg(Color::Red),
            note: Style::default()
                .fg(Color::Magenta)
                .add_modifier(Modifier::BOLD),
            narrative: Style::default().fg(Color::DarkGray),

            sidebar: Style::default().fg(Color::DarkGray),
            sidebar_selected: Style::default()
                .fg(Color::White)
                .bg(Color::Blue)
                .add_modifier(Modifier::BOLD),
            section_tab: Style::default().fg(Color::Gray),
            section_tab_active: Style::default()
                .fg(Color::Blue)
                .add_modifier(Modifier::BOLD | Modifier::UNDERLINED),

            table_header: Style::default()
                .fg(Color::Blue)
                .add_modifier(Modifier::BOLD),
            table_border: Style::default().fg(Color::Gray),
            table_row: Style::default().fg(Color::Black),
            table_row_alt: Style::default().fg(Color::DarkGray),

            chart_axis: Style::default().fg(Color::DarkGray),
            chart_title: Style::default()
                .fg(Color::Black)
                .add_modifier(Modifier::BOLD),

            extended_palette: true,
        }
    }

    /// Basic 8-colour ANSI palette, no bold modifiers.
    pub fn classic() -> Self {
        Self {
            header: Style::default().fg(Color::Cyan),
            header_sparkle: Style::default().fg(Color::White),
            separator: Style::default().fg(Color::DarkGray),

            text: Style::default().fg(Color::White),
            dim: Style::default().fg(Color::DarkGray),
            label: Style::default().fg(Color::Gray),
            value: Style::default().fg(Color::White),
            warning: Style::default().fg(Color::Yellow),
            note: Style::default().fg(Color::Yellow),
            narrative: Style::default().fg(Color::White),

            sidebar: Style::default().fg(Color::White),
            sidebar_selected: Style::default().fg(Color::Black).bg(Color::White),
            section_tab: Style::default().fg(Color::DarkGray),
            section_tab_active: Style::default().fg(Color::Cyan),

            table_header: Style::default().fg(Color::Cyan),
            table_border: Style::default().fg(Color::DarkGray),
            table_row: Style::default().fg(Color::White),
            table_row_alt: Style::default().fg(Color::Gray),

            chart_axis: Style::default().fg(Color::White),
            chart_title: Style::default().fg(Color::White),

            extended_palette: false,
        }
    }

    /// Choose a theme automatically based on the detected terminal background.
    pub fn auto_detect() -> Self {
        match detect_background() {
            BackgroundType::Light => Self::light(),
            BackgroundType::Dark => Self::dark(),
        }
    }

    /// Construct a theme by name.  Falls back to `auto_detect` for unknown
    /// names.
    pub fn from_name(name: &str) -> Self {
        match name {
            "light" => Self::light(),
            "dark" => Self::dark(),
            "classic" => Self::classic(),
            _ => Self::auto_detect(),
        }
    }

    // ── Style helpers ────────────────────────────────────────────────────────

    /// Terminal colour for a chart series.
    pub fn series_color(&self, color: SeriesColor) -> Color {
        match (color, self.extended_palette) {
            (SeriesColor::Blue, _) => Color::Blue,
            (SeriesColor::Green, _) => Color::Green,
            (SeriesColor::Red, _) => Color::Red,
            (SeriesColor::Purple, _) => Color::Magenta,
            (SeriesColor::Orange, true) => Color::Indexed(208),
            (SeriesColor::Orange, false) => Color::Yellow,
            (SeriesColor::SkyBlue, true) => Color::Indexed(117),
            (SeriesColor::SkyBlue, false) => Color::Cyan,
        }
    }

    pub fn series_style(&self, color: SeriesColor) -> Style {
        Style::default().fg(self.series_color(color))
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dark_theme_creation() {
        let t = Theme::dark();
        assert_eq!(t.header.fg, Some(Color::Cyan));
        assert_eq!(t.sidebar_selected.bg, Some(Color::Cyan));
        assert_eq!(t.table_row.fg, Some(Color::White));
        assert!(t.extended_palette);
    }

    #[test]
    fn test_light_theme_creation() {
        let t = Theme::light();
        assert_eq!(t.header.fg, Some(Color::Blue));
        assert_eq!(t.text.fg, Some(Color::Black));
        assert_eq!(t.table_row.fg, Some(Color::Black));
    }

    #[test]
    fn test_classic_theme_has_no_bold() {
        let t = Theme::classic();
        assert!(!t.header.add_modifier.contains(Modifier::BOLD));
        assert!(!t.table_header.add_modifier.contains(Modifier::BOLD));
        assert!(!t.extended_palette);
    }

    #[test]
    fn test_from_name() {
        assert_eq!(Theme::from_name("dark").header.fg, Some(Color::Cyan));
        assert_eq!(Theme::from_name("light").header.fg, Some(Color::Blue));
        assert!(!Theme::from_name("classic")
            .header
            .add_modifier
            .contains(Modifier::BOLD));
    }

    #[test]
    fn test_from_name_unknown_falls_back() {
        let t = Theme::from_name("does-not-exist");
        assert!(t.header.fg.is_some());
    }

    #[test]
    fn test_series_color_respects_palette() {
        assert_eq!(
            Theme::dark().series_color(SeriesColor::Orange),
            Color::Indexed(208)
        );
        assert_eq!(
            Theme::classic().series_color(SeriesColor::Orange),
            Color::Yellow
        );
        assert_eq!(
            Theme::classic().series_color(SeriesColor::Purple),
            Color::Magenta
        );
    }
}
