use std::fmt;

use chrono::{NaiveDate, Weekday};
use serde::{Deserialize, Serialize};

// ── Season ────────────────────────────────────────────────────────────────────

/// Meteorological season of a record.
///
/// Variant order is the display cycle, so sorting by `Season` yields
/// spring, summer, fall, winter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Season {
    Spring,
    Summer,
    Fall,
    Winter,
}

impl Season {
    /// Fixed display cycle used by every seasonal table.
    pub const CYCLE: [Season; 4] = [Season::Spring, Season::Summer, Season::Fall, Season::Winter];

    /// Map the dataset's season code (1 = winter .. 4 = fall) to a label.
    pub fn from_code(code: i64) -> Option<Self> {
        match code {
            1 => Some(Season::Winter),
            2 => Some(Season::Spring),
            3 => Some(Season::Summer),
            4 => Some(Season::Fall),
            _ => None,
        }
    }

    /// Lower-case label as used in the normalized tables.
    pub fn label(&self) -> &'static str {
        match self {
            Season::Spring => "spring",
            Season::Summer => "summer",
            Season::Fall => "fall",
            Season::Winter => "winter",
        }
    }

    /// Capitalised label for legends.
    pub fn title(&self) -> &'static str {
        match self {
            Season::Spring => "Spring",
            Season::Summer => "Summer",
            Season::Fall => "Fall",
            Season::Winter => "Winter",
        }
    }
}

impl fmt::Display for Season {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Season column after normalization.
///
/// Codes outside 1..=4 are carried through untouched rather than rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SeasonValue {
    Labeled(Season),
    Unmapped(i64),
}

impl SeasonValue {
    pub fn from_code(code: i64) -> Self {
        Season::from_code(code)
            .map(SeasonValue::Labeled)
            .unwrap_or(SeasonValue::Unmapped(code))
    }

    /// The labelled season, or `None` for an unmapped code.
    pub fn season(&self) -> Option<Season> {
        match self {
            SeasonValue::Labeled(s) => Some(*s),
            SeasonValue::Unmapped(_) => None,
        }
    }
}

impl fmt::Display for SeasonValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SeasonValue::Labeled(s) => f.write_str(s.label()),
            SeasonValue::Unmapped(code) => write!(f, "{code}"),
        }
    }
}

// ── Weekday ───────────────────────────────────────────────────────────────────

/// Map the dataset's weekday code (0 = Sunday .. 6 = Saturday).
///
/// Unknown codes yield `None`; the record keeps an unset weekday.
pub fn weekday_from_code(code: i64) -> Option<Weekday> {
    match code {
        0 => Some(Weekday::Sun),
        1 => Some(Weekday::Mon),
        2 => Some(Weekday::Tue),
        3 => Some(Weekday::Wed),
        4 => Some(Weekday::Thu),
        5 => Some(Weekday::Fri),
        6 => Some(Weekday::Sat),
        _ => None,
    }
}

/// Full English weekday name, e.g. `"Sunday"`.
pub fn weekday_label(day: Weekday) -> &'static str {
    match day {
        Weekday::Sun => "Sunday",
        Weekday::Mon => "Monday",
        Weekday::Tue => "Tuesday",
        Weekday::Wed => "Wednesday",
        Weekday::Thu => "Thursday",
        Weekday::Fri => "Friday",
        Weekday::Sat => "Saturday",
    }
}

// ── WeatherSituation ──────────────────────────────────────────────────────────

/// Ordinal weather severity, 1 (clearest) to 4 (most severe).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum WeatherSituation {
    Clear = 1,
    Mist = 2,
    LightPrecipitation = 3,
    HeavyPrecipitation = 4,
}

impl WeatherSituation {
    pub fn from_code(code: u8) -> Option<Self> {
        match code {
            1 => Some(WeatherSituation::Clear),
            2 => Some(WeatherSituation::Mist),
            3 => Some(WeatherSituation::LightPrecipitation),
            4 => Some(WeatherSituation::HeavyPrecipitation),
            _ => None,
        }
    }

    /// Short axis label.
    pub fn label(&self) -> &'static str {
        match self {
            WeatherSituation::Clear => "Clear/Partly Cloudy",
            WeatherSituation::Mist => "Mist/Cloudy",
            WeatherSituation::LightPrecipitation => "Light Rain/Snow",
            WeatherSituation::HeavyPrecipitation => "Heavy Rain/Fog",
        }
    }
}

/// Axis label for a raw weather code; unknown codes are shown numerically.
pub fn weather_label(code: u8) -> String {
    WeatherSituation::from_code(code)
        .map(|w| w.label().to_string())
        .unwrap_or_else(|| format!("Code {code}"))
}

// ── DayType ───────────────────────────────────────────────────────────────────

/// Holiday × working-day bucket.  Variant order follows the label order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum DayType {
    HolidayNonWorking,
    HolidayWorking,
    NonHolidayNonWorking,
    NonHolidayWorking,
}

impl DayType {
    pub const ALL: [DayType; 4] = [
        DayType::HolidayNonWorking,
        DayType::HolidayWorking,
        DayType::NonHolidayNonWorking,
        DayType::NonHolidayWorking,
    ];

    /// Every flag combination lands in exactly one bucket.
    pub fn classify(holiday: bool, working_day: bool) -> Self {
        match (holiday, working_day) {
            (true, false) => DayType::HolidayNonWorking,
            (true, true) => DayType::HolidayWorking,
            (false, true) => DayType::NonHolidayWorking,
            (false, false) => DayType::NonHolidayNonWorking,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            DayType::HolidayNonWorking => "Holiday & Non-Working Day",
            DayType::HolidayWorking => "Holiday & Working Day",
            DayType::NonHolidayNonWorking => "Non-Holiday & Non-Working Day",
            DayType::NonHolidayWorking => "Non-Holiday & Working Day",
        }
    }
}

impl fmt::Display for DayType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

// ── WeatherField ──────────────────────────────────────────────────────────────

/// Continuous weather measurement that can be correlated with rentals.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WeatherField {
    Temperature,
    ApparentTemperature,
    Humidity,
    WindSpeed,
}

impl WeatherField {
    pub const ALL: [WeatherField; 4] = [
        WeatherField::Temperature,
        WeatherField::ApparentTemperature,
        WeatherField::Humidity,
        WeatherField::WindSpeed,
    ];

    /// CSV column name.
    pub fn column(&self) -> &'static str {
        match self {
            WeatherField::Temperature => "temp",
            WeatherField::ApparentTemperature => "atemp",
            WeatherField::Humidity => "hum",
            WeatherField::WindSpeed => "windspeed",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            WeatherField::Temperature => "Normalized Temperature",
            WeatherField::ApparentTemperature => "Normalized Apparent Temperature",
            WeatherField::Humidity => "Normalized Humidity",
            WeatherField::WindSpeed => "Normalized Wind Speed",
        }
    }
}

// ── Records ───────────────────────────────────────────────────────────────────

/// One normalized row of the daily dataset.
#[derive(Debug, Clone, PartialEq)]
pub struct DailyRecord {
    pub date: NaiveDate,
    pub season: SeasonValue,
    pub weekday: Option<Weekday>,
    pub holiday: bool,
    pub working_day: bool,
    /// Weather severity code, see [`WeatherSituation`].
    pub weather: u8,
    pub temp: f64,
    pub atemp: f64,
    pub humidity: f64,
    pub windspeed: f64,
    pub casual: i64,
    pub registered: i64,
    pub total: i64,
}

impl DailyRecord {
    pub fn day_type(&self) -> DayType {
        DayType::classify(self.holiday, self.working_day)
    }

    /// `true` when `total == casual + registered`.
    pub fn is_consistent(&self) -> bool {
        self.casual + self.registered == self.total
    }

    pub fn weather_value(&self, field: WeatherField) -> f64 {
        match field {
            WeatherField::Temperature => self.temp,
            WeatherField::ApparentTemperature => self.atemp,
            WeatherField::Humidity => self.humidity,
            WeatherField::WindSpeed => self.windspeed,
        }
    }
}

/// One normalized row of the hourly dataset.
#[derive(Debug, Clone, PartialEq)]
pub struct HourlyRecord {
    pub date: NaiveDate,
    /// Hour of day, 0..=23.
    pub hour: u8,
    pub season: SeasonValue,
    pub weekday: Option<Weekday>,
    pub holiday: bool,
    pub working_day: bool,
    pub weather: u8,
    pub temp: f64,
    pub atemp: f64,
    pub humidity: f64,
    pub windspeed: f64,
    pub casual: i64,
    pub registered: i64,
    pub total: i64,
}

impl HourlyRecord {
    pub fn is_consistent(&self) -> bool {
        self.casual + self.registered == self.total
    }
}
