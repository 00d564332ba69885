//! Display tables for the dashboard views.
//!
//! Renders a bordered [`ratatui::widgets::Table`] from a pre-formatted
//! [`DataTable`]; column widths follow the widest cell in each column.

use ratatui::{
    layout::{Constraint, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table},
    Frame,
};
use unicode_width::UnicodeWidthStr;

use dashboard_runtime::views::DataTable;

use crate::themes::Theme;

/// Rows needed to draw `table` fully: borders, header and data rows.
pub fn table_height(table: &DataTable) -> u16 {
    (table.rows.len() + 3) as u16
}

/// Width of each column in display cells.
pub fn column_widths(table: &DataTable) -> Vec<u16> {
    table
        .columns
        .iter()
        .enumerate()
        .map(|(i, name)| {
            table
                .rows
                .iter()
                .filter_map(|r| r.get(i))
                .map(|c| c.width())
                .chain(std::iter::once(name.width()))
                .max()
                .unwrap_or(0) as u16
        })
        .collect()
}

/// Render `table` into `area` with alternating row styles.
pub fn render_table_view(frame: &mut Frame, area: Rect, title: &str, table: &DataTable, theme: &Theme) {
    let header = Row::new(
        table
            .columns
            .iter()
            .map(|h| Cell::from(h.as_str()).style(theme.table_header)),
    )
    .height(1);

    let rows: Vec<Row> = table
        .rows
        .iter()
        .enumerate()
        .map(|(i, row)| {
            let style = if i % 2 == 0 {
                theme.table_row
            } else {
                theme.table_row_alt
            };
            Row::new(row.iter().map(|c| Cell::from(c.as_str()))).style(style)
        })
        .collect();

    let widths: Vec<Constraint> = column_widths(table)
        .into_iter()
        .map(Constraint::Length)
        .collect();

    let widget = Table::new(rows, widths)
        .header(header)
        .column_spacing(2)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(theme.table_border)
                .title(format!(" {} ", title)),
        )
        .style(theme.text);

    frame.render_widget(widget, area);
}

/// Placeholder when the dataset produced no rows at all.
pub fn render_no_data(frame: &mut Frame, area: Rect, theme: &Theme) {
    let text = vec![
        Line::from(""),
        Line::from(Span::styled("No rental records found", theme.warning)),
        Line::from(""),
        Line::from(Span::styled(
            "Check that day.csv and hour.csv contain data rows.",
            theme.dim,
        )),
        Line::from(Span::styled("Press 'q' or Ctrl+C to exit", theme.dim)),
    ];
    frame.render_widget(
        Paragraph::new(ratatui::text::Text::from(text)).block(
            Block::default()
                .borders(Borders::ALL)
                .title(" Bike Sharing Dashboard "),
        ),
        area,
    );
}

// ── Tests ──────────────────────────────────────────────────────────────────────
