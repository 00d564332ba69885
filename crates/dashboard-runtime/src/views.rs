//! Menu registry: one builder per sidebar entry.
//!
//! Each [`MenuOption`] maps to a [`ViewBuilder`] in [`VIEW_REGISTRY`] that
//! turns the precomputed tables into a [`ViewContent`]: display tables, chart
//! specs and the narrative for that view.  Adding a view means adding one
//! registry entry.

use std::fmt;

use dashboard_core::error::{DashboardError, Result};
use dashboard_core::formatting::{format_correlation, format_count, format_month, format_share};
use dashboard_core::models::{
    weather_label, weekday_label, DailyRecord, HourlyRecord, Season, WeatherField,
};
use dashboard_data::aggregator::HourlyTotal;

use crate::data_manager::DataManager;
use crate::narratives;

/// Rows shown in each dataset preview table.
pub const PREVIEW_ROWS: usize = 5;

// ── MenuOption ────────────────────────────────────────────────────────────────

/// The nine sidebar selections, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MenuOption {
    DatasetOverview,
    MonthlyRentals,
    SeasonalRentals,
    WeatherRentals,
    WeeklyRentals,
    DayTypeRentals,
    WeatherInfluence,
    HourlyRentals,
    HourlyRentalsBySeason,
}

impl MenuOption {
    pub const ALL: [MenuOption; 9] = [
        MenuOption::DatasetOverview,
        MenuOption::MonthlyRentals,
        MenuOption::SeasonalRentals,
        MenuOption::WeatherRentals,
        MenuOption::WeeklyRentals,
        MenuOption::DayTypeRentals,
        MenuOption::WeatherInfluence,
        MenuOption::HourlyRentals,
        MenuOption::HourlyRentalsBySeason,
    ];

    /// Registry entry for this option.
    pub fn entry(self) -> &'static ViewEntry {
        // The registry lists every option exactly once, in `ALL` order.
        &VIEW_REGISTRY[self.index()]
    }

    /// Position in the sidebar.
    pub fn index(self) -> usize {
        self as usize
    }

    pub fn key(self) -> &'static str {
        self.entry().key
    }

    pub fn title(self) -> &'static str {
        self.entry().title
    }

    /// Resolve a `--menu` key such as `"day-type"`.
    pub fn from_key(key: &str) -> Result<Self> {
        VIEW_REGISTRY
            .iter()
            .find(|e| e.key == key)
            .map(|e| e.option)
            .ok_or_else(|| DashboardError::UnknownMenuOption(key.to_string()))
    }

    /// Next option, wrapping around.
    pub fn next(self) -> Self {
        Self::ALL[(self.index() + 1) % Self::ALL.len()]
    }

    /// Previous option, wrapping around.
    pub fn previous(self) -> Self {
        Self::ALL[(self.index() + Self::ALL.len() - 1) % Self::ALL.len()]
    }
}

impl fmt::Display for MenuOption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.title())
    }
}

// ── Registry ──────────────────────────────────────────────────────────────────

pub type ViewBuilder = fn(&DataManager) -> ViewContent;

/// One row of the menu registry.
pub struct ViewEntry {
    pub option: MenuOption,
    /// CLI / persisted key.
    pub key: &'static str,
    /// Sidebar and page title.
    pub title: &'static str,
    pub build: ViewBuilder,
}

pub static VIEW_REGISTRY: [ViewEntry; 9] = [
    ViewEntry {
        option: MenuOption::DatasetOverview,
        key: "overview",
        title: "Dataset Overview",
        build: build_overview,
    },
    ViewEntry {
        option: MenuOption::MonthlyRentals,
        key: "monthly",
        title: "Monthly Rentals",
        build: build_monthly,
    },
    ViewEntry {
        option: MenuOption::SeasonalRentals,
        key: "seasonal",
        title: "Seasonal Rentals",
        build: build_seasonal,
    },
    ViewEntry {
        option: MenuOption::WeatherRentals,
        key: "weather",
        title: "Weather Rentals",
        build: build_weather,
    },
    ViewEntry {
        option: MenuOption::WeeklyRentals,
        key: "weekly",
        title: "Weekly Rentals",
        build: build_weekly,
    },
    ViewEntry {
        option: MenuOption::DayTypeRentals,
        key: "day-type",
        title: "Day Type Rentals",
        build: build_day_type,
    },
    ViewEntry {
        option: MenuOption::WeatherInfluence,
        key: "weather-influence",
        title: "Weather Influence",
        build: build_weather_influence,
    },
    ViewEntry {
        option: MenuOption::HourlyRentals,
        key: "hourly",
        title: "Hourly Rentals",
        build: build_hourly,
    },
    ViewEntry {
        option: MenuOption::HourlyRentalsBySeason,
        key: "hourly-season",
        title: "Hourly Rentals by Season",
        build: build_hourly_by_season,
    },
];

// ── View content ──────────────────────────────────────────────────────────────

/// Everything the UI needs to draw one menu selection.
#[derive(Debug, Clone, PartialEq)]
pub struct ViewContent {
    pub title: &'static str,
    pub sections: Vec<ViewSection>,
}

/// A heading with an optional table, chart, note lines and narrative.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ViewSection {
    pub heading: String,
    pub table: Option<DataTable>,
    pub chart: Option<ChartSpec>,
    /// Short computed statements, e.g. a correlation value.
    pub notes: Vec<String>,
    pub narrative: Option<&'static str>,
}

/// A display table with pre-formatted cells.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct DataTable {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

/// Colour of a chart series, independent of the terminal backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeriesColor {
    Blue,
    Orange,
    Green,
    Red,
    Purple,
    SkyBlue,
}

/// A plotted series of `(x, y)` points.
#[derive(Debug, Clone, PartialEq)]
pub struct Series {
    pub name: String,
    pub color: SeriesColor,
    pub points: Vec<(f64, f64)>,
}

/// Backend-neutral chart description.
#[derive(Debug, Clone, PartialEq)]
pub enum ChartSpec {
    /// Connected series; `x_ticks` label integer x positions starting at
    /// `x_ticks_start`.
    Line {
        title: String,
        x_label: String,
        y_label: String,
        x_ticks: Vec<String>,
        x_ticks_start: f64,
        series: Vec<Series>,
    },
    /// One vertical bar per category.
    Bar {
        title: String,
        x_label: String,
        y_label: String,
        color: SeriesColor,
        bars: Vec<(String, i64)>,
    },
    /// Part-of-whole breakdown (drawn as a pie in the original dashboard).
    Share {
        title: String,
        slices: Vec<(String, i64)>,
    },
    /// Unconnected points.
    Scatter {
        title: String,
        x_label: String,
        y_label: String,
        series: Series,
    },
}

// ── Builders ──────────────────────────────────────────────────────────────────

fn build_overview(mgr: &DataManager) -> ViewContent {
    let data = mgr.data();
    ViewContent {
        title: "Bike Sharing Dataset Overview",
        sections: vec![
            ViewSection {
                heading: "Dataset Information".to_string(),
                narrative: Some(narratives::DATASET_INFORMATION),
                ..Default::default()
            },
            ViewSection {
                heading: format!("df_Day DataFrame (First {PREVIEW_ROWS} Rows)"),
                table: Some(daily_preview(&data.daily)),
                ..Default::default()
            },
            ViewSection {
                heading: format!("df_Hour DataFrame (First {PREVIEW_ROWS} Rows)"),
                table: Some(hourly_preview(&data.hourly)),
                ..Default::default()
            },
            ViewSection {
                heading: "Dataset Columns Description".to_string(),
                narrative: Some(narratives::COLUMN_DESCRIPTIONS),
                ..Default::default()
            },
        ],
    }
}

fn build_monthly(mgr: &DataManager) -> ViewContent {
    let monthly = &mgr.tables().monthly;

    let table = DataTable {
        columns: columns(&["year_month", "casual", "registered", "cnt"]),
        rows: monthly
            .iter()
            .map(|m| {
                vec![
                    m.month.format("%Y-%m").to_string(),
                    format_count(m.casual),
                    format_count(m.registered),
                    format_count(m.total),
                ]
            })
            .collect(),
    };

    let indexed = |f: fn(&dashboard_data::aggregator::MonthlyRentals) -> i64| -> Vec<(f64, f64)> {
        monthly
            .iter()
            .enumerate()
            .map(|(i, m)| (i as f64, f(m) as f64))
            .collect()
    };

    let chart = ChartSpec::Line {
        title: "Total Monthly Bike Rentals".to_string(),
        x_label: "Month".to_string(),
        y_label: "Total Rentals".to_string(),
        x_ticks: monthly.iter().map(|m| format_month(m.month)).collect(),
        x_ticks_start: 0.0,
        series: vec![
            Series {
                name: "Casual Rentals".to_string(),
                color: SeriesColor::Blue,
                points: indexed(|m| m.casual),
            },
            Series {
                name: "Registered Rentals".to_string(),
                color: SeriesColor::Orange,
                points: indexed(|m| m.registered),
            },
            Series {
                name: "Total Rentals".to_string(),
                color: SeriesColor::Green,
                points: indexed(|m| m.total),
            },
        ],
    };

    single_section(
        "Monthly Rentals",
        "Monthly Rentals Data",
        table,
        chart,
        narratives::MONTHLY_INSIGHT,
    )
}

fn build_seasonal(mgr: &DataManager) -> ViewContent {
    let seasonal = &mgr.tables().seasonal;

    let table = DataTable {
        columns: columns(&["season", "cnt"]),
        rows: seasonal
            .iter()
            .map(|s| vec![s.season.label().to_string(), format_count(s.total)])
            .collect(),
    };
    let chart = ChartSpec::Bar {
        title: "Total Bike Rentals per Season".to_string(),
        x_label: "Season".to_string(),
        y_label: "Total Rentals".to_string(),
        color: SeriesColor::Orange,
        bars: seasonal
            .iter()
            .map(|s| (s.season.label().to_string(), s.total))
            .collect(),
    };

    single_section(
        "Seasonal Rentals",
        "Seasonal Rentals Data",
        table,
        chart,
        narratives::SEASONAL_INSIGHT,
    )
}

fn build_weather(mgr: &DataManager) -> ViewContent {
    let weather = &mgr.tables().weather;

    let table = DataTable {
        columns: columns(&["weathersit", "cnt"]),
        rows: weather
            .iter()
            .map(|w| vec![w.code.to_string(), format_count(w.total)])
            .collect(),
    };
    let chart = ChartSpec::Bar {
        title: "Total Rentals by Weather Situation".to_string(),
        x_label: "Weather Situation".to_string(),
        y_label: "Total Rentals".to_string(),
        color: SeriesColor::SkyBlue,
        bars: weather
            .iter()
            .map(|w| (weather_label(w.code), w.total))
            .collect(),
    };

    single_section(
        "Weather Rentals",
        "Weather Rentals Data",
        table,
        chart,
        narratives::WEATHER_INSIGHT,
    )
}

fn build_weekly(mgr: &DataManager) -> ViewContent {
    let weekday = &mgr.tables().weekday;

    let table = DataTable {
        columns: columns(&["weekday", "cnt"]),
        rows: weekday
            .iter()
            .map(|w| vec![weekday_label(w.weekday).to_string(), format_count(w.total)])
            .collect(),
    };
    // Slices are labelled from the table's own keys, whatever their order.
    let chart = ChartSpec::Share {
        title: "Total Rentals by Day of the Week".to_string(),
        slices: weekday
            .iter()
            .map(|w| (w.weekday.to_string(), w.total))
            .collect(),
    };

    single_section(
        "Weekly Rentals",
        "Weekly Rentals Data",
        table,
        chart,
        narratives::WEEKLY_INSIGHT,
    )
}

fn build_day_type(mgr: &DataManager) -> ViewContent {
    let day_type = &mgr.tables().day_type;
    let grand: i64 = day_type.iter().map(|d| d.total).sum();

    let table = DataTable {
        columns: columns(&["day_type", "Total Rentals", "share"]),
        rows: day_type
            .iter()
            .map(|d| {
                vec![
                    d.day_type.label().to_string(),
                    format_count(d.total),
                    format_share(d.total, grand),
                ]
            })
            .collect(),
    };
    let chart = ChartSpec::Share {
        title: "Total Rentals by Day Type".to_string(),
        slices: day_type
            .iter()
            .map(|d| (d.day_type.label().to_string(), d.total))
            .collect(),
    };

    single_section(
        "Day Type Rentals",
        "Day Type Rentals Data",
        table,
        chart,
        narratives::DAY_TYPE_INSIGHT,
    )
}

fn build_weather_influence(mgr: &DataManager) -> ViewContent {
    let daily = &mgr.data().daily;
    let tables = mgr.tables();

    let colors = [
        SeriesColor::Blue,
        SeriesColor::Orange,
        SeriesColor::Green,
        SeriesColor::Red,
    ];

    let mut sections: Vec<ViewSection> = WeatherField::ALL
        .iter()
        .zip(colors)
        .map(|(&field, color)| {
            let coefficient = tables
                .correlations
                .iter()
                .find(|c| c.field == field)
                .map(|c| c.coefficient);
            let note = match coefficient {
                Some(Ok(r)) => format!(
                    "Correlation between {} and Total Rentals: {}",
                    field.label(),
                    format_correlation(r)
                ),
                Some(Err(e)) => format!(
                    "Correlation between {} and Total Rentals: undefined ({})",
                    field.label(),
                    e
                ),
                None => format!(
                    "Correlation between {} and Total Rentals: not computed",
                    field.label()
                ),
            };

            ViewSection {
                heading: scatter_title(field),
                chart: Some(ChartSpec::Scatter {
                    title: scatter_title(field),
                    x_label: field.label().to_string(),
                    y_label: "Total Rentals".to_string(),
                    series: Series {
                        name: field.column().to_string(),
                        color,
                        points: scatter_points(daily, field),
                    },
                }),
                notes: vec![note],
                ..Default::default()
            }
        })
        .collect();

    sections.push(ViewSection {
        heading: "Insight".to_string(),
        narrative: Some(narratives::WEATHER_INFLUENCE_INSIGHT),
        ..Default::default()
    });

    ViewContent {
        title: "Weather Influence on Rentals",
        sections,
    }
}

fn build_hourly(mgr: &DataManager) -> ViewContent {
    let split = &mgr.tables().hourly_by_working_day;

    let section = |label: &str, hours: &[HourlyTotal], color, narrative| {
        let title = format!("Total Rentals by Hour of the Day ({label})");
        ViewSection {
            heading: title.clone(),
            table: Some(hourly_table(hours)),
            chart: Some(ChartSpec::Line {
                title,
                x_label: "Hour of the Day".to_string(),
                y_label: format!("Total Rentals ({label})"),
                x_ticks: hour_ticks(hours),
                x_ticks_start: hours.first().map(|h| f64::from(h.hour)).unwrap_or(0.0),
                series: vec![Series {
                    name: label.to_string(),
                    color,
                    points: hour_points(hours),
                }],
            }),
            notes: Vec::new(),
            narrative: Some(narrative),
        }
    };

    ViewContent {
        title: "Hourly Rentals",
        sections: vec![
            section(
                "Working Days",
                &split.working,
                SeriesColor::Purple,
                narratives::HOURLY_WORKING_INSIGHT,
            ),
            section(
                "Non-Working Days",
                &split.non_working,
                SeriesColor::Red,
                narratives::HOURLY_NON_WORKING_INSIGHT,
            ),
        ],
    }
}

fn build_hourly_by_season(mgr: &DataManager) -> ViewContent {
    let by_season = &mgr.tables().hourly_by_season;

    let series = by_season
        .iter()
        .map(|s| Series {
            name: s.season.title().to_string(),
            color: season_color(s.season),
            points: hour_points(&s.hours),
        })
        .collect();

    let mut table = DataTable {
        columns: columns(&["hr"]),
        rows: Vec::new(),
    };
    table
        .columns
        .extend(by_season.iter().map(|s| s.season.label().to_string()));
    for hour in 0..24u8 {
        let cells: Vec<String> = by_season
            .iter()
            .map(|s| {
                s.hours
                    .iter()
                    .find(|h| h.hour == hour)
                    .map(|h| format_count(h.total))
                    .unwrap_or_default()
            })
            .collect();
        if cells.iter().any(|c| !c.is_empty()) {
            let mut row = vec![hour.to_string()];
            row.extend(cells);
            table.rows.push(row);
        }
    }

    let title = "Total Rentals by Hour of the Day (All Seasons)".to_string();
    single_section(
        "Hourly Rentals by Season",
        &title,
        table,
        ChartSpec::Line {
            title: title.clone(),
            x_label: "Hour of the Day".to_string(),
            y_label: "Total Rentals".to_string(),
            x_ticks: (0..24).map(|h: u8| h.to_string()).collect(),
            x_ticks_start: 0.0,
            series,
        },
        narratives::HOURLY_SEASON_INSIGHT,
    )
}

// ── Helpers ───────────────────────────────────────────────────────────────────

fn single_section(
    title: &'static str,
    heading: &str,
    table: DataTable,
    chart: ChartSpec,
    narrative: &'static str,
) -> ViewContent {
    ViewContent {
        title,
        sections: vec![ViewSection {
            heading: heading.to_string(),
            table: Some(table),
            chart: Some(chart),
            notes: Vec::new(),
            narrative: Some(narrative),
        }],
    }
}

fn columns(names: &[&str]) -> Vec<String> {
    names.iter().map(|s| s.to_string()).collect()
}

fn season_color(season: Season) -> SeriesColor {
    match season {
        Season::Winter => SeriesColor::Blue,
        Season::Spring => SeriesColor::Green,
        Season::Summer => SeriesColor::Orange,
        Season::Fall => SeriesColor::Red,
    }
}

fn scatter_title(field: WeatherField) -> String {
    let name = match field {
        WeatherField::Temperature => "Temperature",
        WeatherField::ApparentTemperature => "Apparent Temperature",
        WeatherField::Humidity => "Humidity",
        WeatherField::WindSpeed => "Wind Speed",
    };
    format!("Scatter Plot of Total Rentals by {name}")
}

fn scatter_points(records: &[DailyRecord], field: WeatherField) -> Vec<(f64, f64)> {
    records
        .iter()
        .map(|r| (r.weather_value(field), r.total as f64))
        .collect()
}

fn hour_points(hours: &[HourlyTotal]) -> Vec<(f64, f64)> {
    hours
        .iter()
        .map(|h| (f64::from(h.hour), h.total as f64))
        .collect()
}

/// Tick labels for every hour between the first and last observed hour.
fn hour_ticks(hours: &[HourlyTotal]) -> Vec<String> {
    match (hours.first(), hours.last()) {
        (Some(first), Some(last)) => (first.hour..=last.hour).map(|h| h.to_string()).collect(),
        _ => Vec::new(),
    }
}

fn hourly_table(hours: &[HourlyTotal]) -> DataTable {
    DataTable {
        columns: columns(&["hr", "cnt"]),
        rows: hours
            .iter()
            .map(|h| vec![h.hour.to_string(), format_count(h.total)])
            .collect(),
    }
}

fn daily_preview(records: &[DailyRecord]) -> DataTable {
    DataTable {
        columns: columns(&[
            "dteday", "season", "holiday", "weekday", "workingday", "weathersit", "temp", "atemp",
            "hum", "windspeed", "casual", "registered", "cnt",
        ]),
        rows: records
            .iter()
            .take(PREVIEW_ROWS)
            .map(|r| {
                vec![
                    r.date.to_string(),
                    r.season.to_string(),
                    flag(r.holiday),
                    r.weekday.map(weekday_label).unwrap_or("").to_string(),
                    flag(r.working_day),
                    r.weather.to_string(),
                    measure(r.temp),
                    measure(r.atemp),
                    measure(r.humidity),
                    measure(r.windspeed),
                    r.casual.to_string(),
                    r.registered.to_string(),
                    r.total.to_string(),
                ]
            })
            .collect(),
    }
}

fn hourly_preview(records: &[HourlyRecord]) -> DataTable {
    DataTable {
        columns: columns(&[
            "dteday", "season", "hr", "holiday", "weekday", "workingday", "weathersit", "temp",
            "atemp", "hum", "windspeed", "casual", "registered", "cnt",
        ]),
        rows: records
            .iter()
            .take(PREVIEW_ROWS)
            .map(|r| {
                vec![
                    r.date.to_string(),
                    r.season.to_string(),
                    r.hour.to_string(),
                    flag(r.holiday),
                    r.weekday.map(weekday_label).unwrap_or("").to_string(),
                    flag(r.working_day),
                    r.weather.to_string(),
                    measure(r.temp),
                    measure(r.atemp),
                    measure(r.humidity),
                    measure(r.windspeed),
                    r.casual.to_string(),
                    r.registered.to_string(),
                    r.total.to_string(),
                ]
            })
            .collect(),
    }
}

/// Normalized measurements are shown as read, without padding or rounding.
fn measure(value: f64) -> String {
    value.to_string()
}

fn flag(value: bool) -> String {
    let s = if value { "1" } else { "0" };
    s.to_string()
}

// ── Tests ─────────────────────────────────────────────────────────────────────
