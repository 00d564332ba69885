//! Main application state and TUI event loop for the dashboard.
//!
//! [`App`] owns the theme, the loaded [`DataManager`] and the current menu
//! selection.  The content of the selected view is rebuilt only when the
//! selection changes.

use std::io;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Tabs, Wrap},
    Frame, Terminal,
};

use dashboard_core::error::{DashboardError, Result};
use dashboard_runtime::data_manager::DataManager;
use dashboard_runtime::views::{MenuOption, ViewContent, ViewSection};

use crate::chart_view;
use crate::components::header::Header;
use crate::components::sidebar::Sidebar;
use crate::table_view;
use crate::themes::Theme;

/// Minimum chart height in rows.
const MIN_CHART_HEIGHT: u16 = 10;
/// Cap on the narrative pane when it shares space with a table or chart.
const MAX_NARRATIVE_HEIGHT: u16 = 9;

// ── App ───────────────────────────────────────────────────────────────────────

/// Root application state for the dashboard TUI.
pub struct App {
    pub theme: Theme,
    manager: DataManager,
    selected: MenuOption,
    /// Index into the current view's sections.
    section: usize,
    content: ViewContent,
    /// Set to `true` to break out of the event loop on the next iteration.
    pub should_quit: bool,
}

impl App {
    pub fn new(theme_name: &str, manager: DataManager, selected: MenuOption) -> Self {
        let content = manager.view(selected);
        Self {
            theme: Theme::from_name(theme_name),
            manager,
            selected,
            section: 0,
            content,
            should_quit: false,
        }
    }

    // ── State ─────────────────────────────────────────────────────────────────

    pub fn selected(&self) -> MenuOption {
        self.selected
    }

    pub fn section(&self) -> usize {
        self.section
    }

    pub fn content(&self) -> &ViewContent {
        &self.content
    }

    /// Switch to `option`, rebuilding its content and resetting the section.
    pub fn select(&mut self, option: MenuOption) {
        if option == self.selected {
            return;
        }
        tracing::debug!(view = option.key(), "selection changed");
        self.selected = option;
        self.section = 0;
        self.content = self.manager.view(option);
    }

    pub fn next_section(&mut self) {
        let count = self.content.sections.len().max(1);
        self.section = (self.section + 1) % count;
    }

    pub fn previous_section(&mut self) {
        let count = self.content.sections.len().max(1);
        self.section = (self.section + count - 1) % count;
    }

    /// Apply one key press.
    pub fn handle_key(&mut self, key: KeyEvent) {
        if key.kind == KeyEventKind::Release {
            return;
        }
        match key.code {
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.should_quit = true;
            }
            KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => self.should_quit = true,
            KeyCode::Up | KeyCode::Char('k') => self.select(self.selected.previous()),
            KeyCode::Down | KeyCode::Char('j') => self.select(self.selected.next()),
            KeyCode::Tab | KeyCode::Right | KeyCode::Char('l') => self.next_section(),
            KeyCode::BackTab | KeyCode::Left | KeyCode::Char('h') => self.previous_section(),
            KeyCode::Char(c @ '1'..='9') => {
                let idx = c as usize - '1' as usize;
                if let Some(&option) = MenuOption::ALL.get(idx) {
                    self.select(option);
                }
            }
            _ => {}
        }
    }

    // ── Event loop ────────────────────────────────────────────────────────────

    /// Run the dashboard until `q`, `Esc`, `Ctrl+C` or until `shutdown` is set.
    ///
    /// Blocks the calling thread; `shutdown` is checked once per tick.
    pub fn run(self, shutdown: &AtomicBool) -> Result<()> {
        self.run_terminal(shutdown)
            .map_err(|e| DashboardError::Terminal(e.to_string()))
    }

    /// `true` once a quit key was pressed or an external shutdown requested.
    pub fn should_stop(&self, shutdown: &AtomicBool) -> bool {
        self.should_quit || shutdown.load(Ordering::Relaxed)
    }

    fn run_terminal(mut self, shutdown: &AtomicBool) -> io::Result<()> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen)?;
        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend)?;

        let tick_rate = Duration::from_millis(250);

        let result = loop {
            if let Err(e) = terminal.draw(|frame| self.render(frame)) {
                break Err(e);
            }

            match event::poll(tick_rate) {
                Ok(true) => match event::read() {
                    Ok(Event::Key(key)) => self.handle_key(key),
                    Ok(_) => {}
                    Err(e) => break Err(e),
                },
                Ok(false) => {}
                Err(e) => break Err(e),
            }

            if self.should_stop(shutdown) {
                break Ok(());
            }
        };

        // Restore terminal state unconditionally.
        restore_terminal()?;
        terminal.show_cursor()?;

        result
    }

    // ── Rendering ─────────────────────────────────────────────────────────────

    /// Render the full dashboard into `frame`.
    pub fn render(&self, frame: &mut Frame) {
        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(4),
                Constraint::Min(0),
                Constraint::Length(1),
            ])
            .split(frame.area());

        let header = Header::new(
            self.content.title,
            self.section,
            self.content.sections.len(),
            &self.theme,
        );
        frame.render_widget(Paragraph::new(header.to_lines()), rows[0]);

        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([
                Constraint::Length(Sidebar::content_width() + 2),
                Constraint::Min(0),
            ])
            .split(rows[1]);

        let sidebar = Sidebar::new(self.selected, &self.theme);
        frame.render_widget(
            Paragraph::new(sidebar.to_lines()).block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(self.theme.table_border)
                    .title(" Menu "),
            ),
            columns[0],
        );

        self.render_main(frame, columns[1]);

        frame.render_widget(
            Paragraph::new(Line::from(Span::styled(
                " ↑/↓ select view · ←/→ or Tab change section · q quit",
                self.theme.dim,
            ))),
            rows[2],
        );
    }

    fn render_main(&self, frame: &mut Frame, area: Rect) {
        let data = self.manager.data();
        if data.daily.is_empty() && data.hourly.is_empty() {
            table_view::render_no_data(frame, area, &self.theme);
            return;
        }

        let Some(section) = self.content.sections.get(self.section) else {
            return;
        };

        let has_tabs = self.content.sections.len() > 1;
        let parts = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(if has_tabs { 2 } else { 0 }),
                Constraint::Min(0),
            ])
            .split(area);

        if has_tabs {
            let titles: Vec<Line> = self
                .content
                .sections
                .iter()
                .map(|s| Line::from(s.heading.clone()))
                .collect();
            let tabs = Tabs::new(titles)
                .select(self.section)
                .style(self.theme.section_tab)
                .highlight_style(self.theme.section_tab_active)
                .divider("│");
            frame.render_widget(tabs, parts[0]);
        }

        render_section(frame, parts[1], section, &self.theme);
    }
}

/// Leave raw mode and the alternate screen.
fn restore_terminal() -> io::Result<()> {
    disable_raw_mode()?;
    execute!(io::stdout(), LeaveAlternateScreen)?;
    Ok(())
}

/// Lay out one section: notes, table, chart and narrative, top to bottom.
fn render_section(frame: &mut Frame, area: Rect, section: &ViewSection, theme: &Theme) {
    let has_visual = section.table.is_some() || section.chart.is_some();

    let notes_height = section.notes.len() as u16;
    let table_height = match (&section.table, &section.chart) {
        (Some(t), Some(_)) => table_view::table_height(t).min(area.height / 3).max(4),
        (Some(t), None) => table_view::table_height(t),
        (None, _) => 0,
    };
    let chart_height = if section.chart.is_some() {
        MIN_CHART_HEIGHT
    } else {
        0
    };
    let narrative_height = match section.narrative {
        Some(text) if has_visual => (text.lines().count() as u16 + 2).min(MAX_NARRATIVE_HEIGHT),
        Some(_) => area.height,
        None => 0,
    };

    let constraints = [
        Constraint::Length(notes_height),
        Constraint::Length(table_height),
        if section.chart.is_some() {
            Constraint::Min(chart_height)
        } else {
            Constraint::Length(0)
        },
        if has_visual {
            Constraint::Length(narrative_height)
        } else {
            Constraint::Min(0)
        },
    ];
    let parts = Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .split(area);

    if !section.notes.is_empty() {
        let lines: Vec<Line> = section
            .notes
            .iter()
            .map(|n| Line::from(Span::styled(n.clone(), theme.note)))
            .collect();
        frame.render_widget(Paragraph::new(lines), parts[0]);
    }

    if let Some(table) = &section.table {
        table_view::render_table_view(frame, parts[1], &section.heading, table, theme);
    }

    if let Some(chart) = &section.chart {
        chart_view::render_chart(frame, parts[2], chart, theme);
    }

    if let Some(text) = section.narrative {
        let title = if has_visual {
            " Insight ".to_string()
        } else {
            format!(" {} ", section.heading)
        };
        frame.render_widget(
            Paragraph::new(text)
                .style(theme.narrative)
                .wrap(Wrap { trim: false })
                .block(
                    Block::default()
                        .borders(Borders::ALL)
                        .border_style(theme.table_border)
                        .title(title),
                ),
            parts[3],
        );
    }
}

// ── Tests ──────────────────────────────────────────────────────────────────────
