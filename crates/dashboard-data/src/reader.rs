//! CSV loading and normalization of the bike sharing datasets.
//!
//! Reads `day.csv` and `hour.csv`, decodes each row with `serde`, and maps the
//! coded categorical columns onto the label types from
//! [`dashboard_core::models`].  The identifier columns `instant`, `yr` and
//! `mnth` are never deserialized.

use std::io::Read;
use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use serde::{Deserialize, Deserializer};
use tracing::{debug, info, warn};

use dashboard_core::error::{DashboardError, Result};
use dashboard_core::models::{weekday_from_code, DailyRecord, HourlyRecord, SeasonValue};

// ── Raw rows ──────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
struct RawDailyRow {
    dteday: String,
    season: i64,
    #[serde(deserialize_with = "flag_from_int")]
    holiday: bool,
    weekday: i64,
    #[serde(deserialize_with = "flag_from_int")]
    workingday: bool,
    weathersit: u8,
    temp: f64,
    atemp: f64,
    hum: f64,
    windspeed: f64,
    casual: i64,
    registered: i64,
    cnt: i64,
}

#[derive(Debug, Deserialize)]
struct RawHourlyRow {
    dteday: String,
    season: i64,
    hr: u8,
    #[serde(deserialize_with = "flag_from_int")]
    holiday: bool,
    weekday: i64,
    #[serde(deserialize_with = "flag_from_int")]
    workingday: bool,
    weathersit: u8,
    temp: f64,
    atemp: f64,
    hum: f64,
    windspeed: f64,
    casual: i64,
    registered: i64,
    cnt: i64,
}

/// 0/1 indicator columns; only `1` counts as set.
fn flag_from_int<'de, D>(deserializer: D) -> std::result::Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    let value = i64::deserialize(deserializer)?;
    Ok(value == 1)
}

// ── Dataset ───────────────────────────────────────────────────────────────────

/// Both normalized row-sets, immutable after load.
#[derive(Debug, Clone, Default)]
pub struct BikeShareData {
    pub daily: Vec<DailyRecord>,
    pub hourly: Vec<HourlyRecord>,
}

impl BikeShareData {
    /// Load both CSV files.  Any missing or malformed file aborts the load.
    pub fn load(day_path: &Path, hour_path: &Path) -> Result<Self> {
        let daily = load_daily_records(day_path)?;
        let hourly = load_hourly_records(hour_path)?;
        info!(
            daily = daily.len(),
            hourly = hourly.len(),
            "Loaded bike sharing dataset"
        );
        Ok(Self { daily, hourly })
    }
}

// ── Public API ────────────────────────────────────────────────────────────────

/// Open `path` and read it as the daily dataset.
pub fn load_daily_records(path: &Path) -> Result<Vec<DailyRecord>> {
    let file = open(path)?;
    read_daily_records(file, path)
}

/// Open `path` and read it as the hourly dataset.
pub fn load_hourly_records(path: &Path) -> Result<Vec<HourlyRecord>> {
    let file = open(path)?;
    read_hourly_records(file, path)
}

/// Decode daily rows from any reader; `source` is only used in errors and logs.
pub fn read_daily_records<R: Read>(reader: R, source: &Path) -> Result<Vec<DailyRecord>> {
    let mut rdr = csv_reader(reader);
    let mut records = Vec::new();

    for (idx, row) in rdr.deserialize::<RawDailyRow>().enumerate() {
        let raw = row.map_err(|e| csv_error(source, e))?;
        let date = parse_date(&raw.dteday, source, idx as u64 + 1)?;
        records.push(DailyRecord {
            date,
            season: SeasonValue::from_code(raw.season),
            weekday: weekday_from_code(raw.weekday),
            holiday: raw.holiday,
            working_day: raw.workingday,
            weather: raw.weathersit,
            temp: raw.temp,
            atemp: raw.atemp,
            humidity: raw.hum,
            windspeed: raw.windspeed,
            casual: raw.casual,
            registered: raw.registered,
            total: raw.cnt,
        });
    }

    report_inconsistent(source, records.iter().filter(|r| !r.is_consistent()).count());
    debug!("Read {} daily records from {}", records.len(), source.display());
    Ok(records)
}

/// Decode hourly rows from any reader.
pub fn read_hourly_records<R: Read>(reader: R, source: &Path) -> Result<Vec<HourlyRecord>> {
    let mut rdr = csv_reader(reader);
    let mut records = Vec::new();

    for (idx, row) in rdr.deserialize::<RawHourlyRow>().enumerate() {
        let raw = row.map_err(|e| csv_error(source, e))?;
        let date = parse_date(&raw.dteday, source, idx as u64 + 1)?;
        records.push(HourlyRecord {
            date,
            hour: raw.hr,
            season: SeasonValue::from_code(raw.season),
            weekday: weekday_from_code(raw.weekday),
            holiday: raw.holiday,
            working_day: raw.workingday,
            weather: raw.weathersit,
            temp: raw.temp,
            atemp: raw.atemp,
            humidity: raw.hum,
            windspeed: raw.windspeed,
            casual: raw.casual,
            registered: raw.registered,
            total: raw.cnt,
        });
    }

    report_inconsistent(source, records.iter().filter(|r| !r.is_consistent()).count());
    debug!("Read {} hourly records from {}", records.len(), source.display());
    Ok(records)
}

// ── Internal helpers ──────────────────────────────────────────────────────────

fn open(path: &Path) -> Result<std::fs::File> {
    std::fs::File::open(path).map_err(|source| DashboardError::FileRead {
        path: path.to_path_buf(),
        source,
    })
}

fn csv_reader<R: Read>(reader: R) -> csv::Reader<R> {
    csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_reader(reader)
}

fn csv_error(source: &Path, err: csv::Error) -> DashboardError {
    DashboardError::CsvParse {
        path: source.to_path_buf(),
        source: err,
    }
}

fn parse_date(value: &str, source: &Path, row: u64) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d").map_err(|_| DashboardError::DateParse {
        path: PathBuf::from(source),
        row,
        value: value.to_string(),
    })
}

/// Rows are kept even when `cnt != casual + registered`; only flag them.
fn report_inconsistent(source: &Path, count: usize) {
    if count > 0 {
        warn!(
            "{} rows in {} have cnt != casual + registered",
            count,
            source.display()
        );
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
