//! Terminal rendering of [`ChartSpec`]s.
//!
//! Line and scatter charts use Braille/dot markers on a ratatui [`Chart`],
//! categorical totals use a [`BarChart`], and part-of-whole breakdowns are
//! drawn as one horizontal percentage bar per slice.

use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    symbols::Marker,
    text::{Line, Span},
    widgets::{Axis, Bar, BarChart, BarGroup, Block, Borders, Chart, Dataset, GraphType, Paragraph},
    Frame,
};
use unicode_width::UnicodeWidthStr;

use dashboard_core::formatting::{format_count, format_number, format_share};
use dashboard_runtime::views::{ChartSpec, Series, SeriesColor};

use crate::themes::Theme;

/// Maximum number of x-axis labels drawn on a line chart.
const MAX_X_LABELS: usize = 7;

/// Share-bar colours, cycled per slice.
const SHARE_COLORS: [SeriesColor; 6] = [
    SeriesColor::Blue,
    SeriesColor::Orange,
    SeriesColor::Green,
    SeriesColor::Red,
    SeriesColor::Purple,
    SeriesColor::SkyBlue,
];

/// Render `spec` into `area`.
pub fn render_chart(frame: &mut Frame, area: Rect, spec: &ChartSpec, theme: &Theme) {
    match spec {
        ChartSpec::Line {
            title,
            x_label,
            y_label,
            x_ticks,
            x_ticks_start,
            series,
        } => {
            let x_bounds = padded_bounds(series.iter().flat_map(|s| s.points.iter().map(|p| p.0)));
            let labels = sample_ticks(x_ticks, *x_ticks_start, x_bounds);
            render_xy(
                frame,
                area,
                title,
                x_label,
                y_label,
                series.iter().collect(),
                GraphType::Line,
                Marker::Braille,
                labels,
                theme,
            );
        }
        ChartSpec::Scatter {
            title,
            x_label,
            y_label,
            series,
        } => {
            let x_bounds = padded_bounds(series.points.iter().map(|p| p.0));
            let labels = vec![
                format_number(x_bounds[0], 2),
                format_number((x_bounds[0] + x_bounds[1]) / 2.0, 2),
                format_number(x_bounds[1], 2),
            ];
            render_xy(
                frame,
                area,
                title,
                x_label,
                y_label,
                vec![series],
                GraphType::Scatter,
                Marker::Dot,
                labels,
                theme,
            );
        }
        ChartSpec::Bar {
            title,
            color,
            bars,
            ..
        } => render_bars(frame, area, title, *color, bars, theme),
        ChartSpec::Share { title, slices } => {
            let inner_width = area.width.saturating_sub(2);
            let lines = share_lines(slices, inner_width, theme);
            frame.render_widget(
                Paragraph::new(lines).block(titled_block(title, theme)),
                area,
            );
        }
    }
}

#[allow(clippy::too_many_arguments)]
fn render_xy(
    frame: &mut Frame,
    area: Rect,
    title: &str,
    x_label: &str,
    y_label: &str,
    series: Vec<&Series>,
    graph_type: GraphType,
    marker: Marker,
    x_labels: Vec<String>,
    theme: &Theme,
) {
    let x_bounds = padded_bounds(series.iter().flat_map(|s| s.points.iter().map(|p| p.0)));
    let y_max = series
        .iter()
        .flat_map(|s| s.points.iter().map(|p| p.1))
        .fold(0.0_f64, f64::max);
    let y_top = if y_max > 0.0 { y_max * 1.05 } else { 1.0 };
    let y_decimals = if y_top < 10.0 { 2 } else { 0 };

    let datasets: Vec<Dataset> = series
        .iter()
        .map(|s| {
            Dataset::default()
                .name(s.name.clone())
                .marker(marker)
                .graph_type(graph_type)
                .style(theme.series_style(s.color))
                .data(&s.points)
        })
        .collect();

    let chart = Chart::new(datasets)
        .block(titled_block(title, theme))
        .x_axis(
            Axis::default()
                .title(Span::styled(x_label.to_string(), theme.chart_axis))
                .style(theme.chart_axis)
                .bounds(x_bounds)
                .labels(x_labels),
        )
        .y_axis(
            Axis::default()
                .title(Span::styled(y_label.to_string(), theme.chart_axis))
                .style(theme.chart_axis)
                .bounds([0.0, y_top])
                .labels(vec![
                    "0".to_string(),
                    format_number(y_top / 2.0, y_decimals),
                    format_number(y_top, y_decimals),
                ]),
        );

    frame.render_widget(chart, area);
}

fn render_bars(
    frame: &mut Frame,
    area: Rect,
    title: &str,
    color: SeriesColor,
    bars: &[(String, i64)],
    theme: &Theme,
) {
    let style = theme.series_style(color);
    let items: Vec<Bar> = bars
        .iter()
        .map(|(label, value)| {
            Bar::default()
                .value(u64::try_from(*value).unwrap_or(0))
                .text_value(format_count(*value))
                .label(Line::from(label.clone()))
                .style(style)
        })
        .collect();

    let count = bars.len().max(1) as u16;
    let gap = 2;
    let bar_width = (area.width.saturating_sub(2 + gap * count) / count).clamp(3, 24);

    let chart = BarChart::default()
        .block(titled_block(title, theme))
        .data(BarGroup::default().bars(&items))
        .bar_width(bar_width)
        .bar_gap(gap)
        .value_style(
            Style::default()
                .fg(theme.series_color(color))
                .add_modifier(Modifier::REVERSED),
        )
        .label_style(theme.label);

    frame.render_widget(chart, area);
}

fn titled_block<'a>(title: &str, theme: &Theme) -> Block<'a> {
    Block::default()
        .borders(Borders::ALL)
        .border_style(theme.table_border)
        .title(Span::styled(format!(" {} ", title), theme.chart_title))
}

// ── Pure helpers ──────────────────────────────────────────────────────────────

/// One line per slice: label, proportional bar, percentage and count.
pub fn share_lines<'a>(slices: &[(String, i64)], width: u16, theme: &Theme) -> Vec<Line<'a>> {
    let whole: i64 = slices.iter().map(|(_, v)| *v).sum();
    let label_width = slices.iter().map(|(l, _)| l.width()).max().unwrap_or(0);
    // label, space, bar, space, "100.0%" and a count
    let bar_room = (width as usize).saturating_sub(label_width + 22).max(1);

    slices
        .iter()
        .enumerate()
        .map(|(i, (label, value))| {
            let fraction = if whole <= 0 {
                0.0
            } else {
                (*value as f64 / whole as f64).clamp(0.0, 1.0)
            };
            let filled = (fraction * bar_room as f64).round() as usize;
            let pad = label_width.saturating_sub(label.width());
            let color = SHARE_COLORS[i % SHARE_COLORS.len()];

            Line::from(vec![
                Span::styled(format!("{label}{} ", " ".repeat(pad)), theme.label),
                Span::styled("█".repeat(filled), theme.series_style(color)),
                Span::styled(
                    format!(
                        "{} {:>6} ({})",
                        " ".repeat(bar_room - filled.min(bar_room)),
                        format_share(*value, whole),
                        format_count(*value)
                    ),
                    theme.value,
                ),
            ])
        })
        .collect()
}

/// `[min, max]` of the values, widened so a chart never has zero extent.
pub fn padded_bounds(values: impl Iterator<Item = f64>) -> [f64; 2] {
    let (min, max) = values.fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
        (lo.min(v), hi.max(v))
    });
    if !min.is_finite() || !max.is_finite() {
        return [0.0, 1.0];
    }
    if (max - min).abs() < f64::EPSILON {
        return [min - 0.5, max + 0.5];
    }
    [min, max]
}

/// Evenly spaced subset of tick labels spanning `bounds`.
///
/// Tick `i` sits at x = `start + i`; ratatui spreads axis labels evenly, so
/// labels are sampled at evenly spaced x positions.
pub fn sample_ticks(ticks: &[String], start: f64, bounds: [f64; 2]) -> Vec<String> {
    if ticks.is_empty() {
        return Vec::new();
    }
    let count = ticks.len().min(MAX_X_LABELS).max(2);
    let span = bounds[1] - bounds[0];
    (0..count)
        .map(|k| {
            let x = bounds[0] + span * k as f64 / (count - 1) as f64;
            let idx = (x - start).round().max(0.0) as usize;
            ticks[idx.min(ticks.len() - 1)].clone()
        })
        .collect()
}

// ── Tests ──────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::backend::TestBackend;
    use ratatui::Terminal;

    fn line_text(line: &Line) -> String {
        line.spans.iter().map(|s| s.content.as_ref()).collect()
    }

    fn draw(spec: &ChartSpec) -> String {
        let backend = TestBackend::new(100, 24);
        let mut terminal = Terminal::new(backend).unwrap();
        let theme = Theme::dark();
        terminal
            .draw(|frame| {
                let area = frame.area();
                render_chart(frame, area, spec, &theme);
            })
            .unwrap();
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect()
    }

    #[test]
    fn test_padded_bounds() {
        assert_eq!(padded_bounds([3.0, 1.0, 2.0].into_iter()), [1.0, 3.0]);
        assert_eq!(padded_bounds([4.0].into_iter()), [3.5, 4.5]);
        assert_eq!(padded_bounds(std::iter::empty()), [0.0, 1.0]);
    }

    #[test]
    fn test_sample_ticks_keeps_first_and_last() {
        let ticks: Vec<String> = (0..24).map(|h| h.to_string()).collect();
        let labels = sample_ticks(&ticks, 0.0, [0.0, 23.0]);
        assert_eq!(labels.len(), MAX_X_LABELS);
        assert_eq!(labels.first().map(String::as_str), Some("0"));
        assert_eq!(labels.last().map(String::as_str), Some("23"));
    }

    #[test]
    fn test_sample_ticks_with_offset_start() {
        let ticks: Vec<String> = (8..=17).map(|h: u8| h.to_string()).collect();
        let labels = sample_ticks(&ticks, 8.0, [8.0, 17.0]);
        assert_eq!(labels.first().map(String::as_str), Some("8"));
        assert_eq!(labels.last().map(String::as_str), Some("17"));
    }

    #[test]
    fn test_share_lines_percentages() {
        let theme = Theme::dark();
        let slices = vec![
            ("Non-Holiday & Working Day".to_string(), 696),
            ("Non-Holiday & Non-Working Day".to_string(), 280),
            ("Holiday & Non-Working Day".to_string(), 24),
        ];
        let lines = share_lines(&slices, 90, &theme);
        assert_eq!(lines.len(), 3);
        let first = line_text(&lines[0]);
        assert!(first.starts_with("Non-Holiday & Working Day"));
        assert!(first.contains("69.6%"));
        assert!(line_text(&lines[2]).contains("2.4%"));
    }

    #[test]
    fn test_share_lines_align_to_same_width() {
        let theme = Theme::dark();
        let slices = vec![("Sat".to_string(), 10), ("Sun".to_string(), 30)];
        let lines = share_lines(&slices, 60, &theme);
        let a = line_text(&lines[0]);
        let b = line_text(&lines[1]);
        assert_eq!(a.width(), b.width());
    }

    #[test]
    fn test_share_lines_empty_whole() {
        let theme = Theme::dark();
        let slices = vec![("Mon".to_string(), 0)];
        let lines = share_lines(&slices, 40, &theme);
        assert!(line_text(&lines[0]).contains("0.0%"));
    }

    #[test]
    fn test_share_lines_negative_slice_draws_no_bar() {
        let theme = Theme::dark();
        let slices = vec![("Fri".to_string(), -10), ("Mon".to_string(), 110)];
        let lines = share_lines(&slices, 60, &theme);
        let negative = line_text(&lines[0]);
        assert!(!negative.contains('█'));
        assert!(negative.contains("-10"));
        assert!(line_text(&lines[1]).contains('█'));
    }

    #[test]
    fn test_render_line_chart() {
        let spec = ChartSpec::Line {
            title: "Total Monthly Bike Rentals".to_string(),
            x_label: "Month".to_string(),
            y_label: "Total Rentals".to_string(),
            x_ticks: vec!["Jan 2011".to_string(), "Feb 2011".to_string()],
            x_ticks_start: 0.0,
            series: vec![Series {
                name: "Total Rentals".to_string(),
                color: SeriesColor::Green,
                points: vec![(0.0, 38_189.0), (1.0, 48_215.0)],
            }],
        };
        let text = draw(&spec);
        assert!(text.contains("Total Monthly Bike Rentals"));
        assert!(text.contains("Jan 2011"));
    }

    #[test]
    fn test_render_bar_chart() {
        let spec = ChartSpec::Bar {
            title: "Total Bike Rentals per Season".to_string(),
            x_label: "Season".to_string(),
            y_label: "Total Rentals".to_string(),
            color: SeriesColor::Orange,
            bars: vec![
                ("spring".to_string(), 918_589),
                ("summer".to_string(), 1_061_129),
            ],
        };
        let text = draw(&spec);
        assert!(text.contains("Total Bike Rentals per Season"));
        assert!(text.contains("spring"));
    }

    #[test]
    fn test_render_scatter_and_share_do_not_panic() {
        draw(&ChartSpec::Scatter {
            title: "Scatter".to_string(),
            x_label: "Normalized Humidity".to_string(),
            y_label: "Total Rentals".to_string(),
            series: Series {
                name: "hum".to_string(),
                color: SeriesColor::Green,
                points: vec![(0.8, 985.0), (0.69, 801.0), (0.43, 1_349.0)],
            },
        });
        let text = draw(&ChartSpec::Share {
            title: "Total Rentals by Day of the Week".to_string(),
            slices: vec![("Sat".to_string(), 985), ("Sun".to_string(), 801)],
        });
        assert!(text.contains("55.2%"));
    }

    #[test]
    fn test_render_empty_series_does_not_panic() {
        draw(&ChartSpec::Line {
            title: "Empty".to_string(),
            x_label: "Hour".to_string(),
            y_label: "Total".to_string(),
            x_ticks: Vec::new(),
            x_ticks_start: 0.0,
            series: Vec::new(),
        });
        draw(&ChartSpec::Bar {
            title: "Empty".to_string(),
            x_label: String::new(),
            y_label: String::new(),
            color: SeriesColor::Blue,
            bars: Vec::new(),
        });
    }
}
