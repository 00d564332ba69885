//! Rental aggregation over the normalized daily and hourly row-sets.
//!
//! Every table has its own output order: chronological for months, the fixed
//! season cycle, ascending weather code, weekday name for weekdays, label order
//! for day types and ascending hour.  Groups without rows are absent
//! unless noted otherwise.

use std::collections::BTreeMap;

use chrono::{Datelike, NaiveDate, Weekday};

use dashboard_core::models::{
    weekday_label, DailyRecord, DayType, HourlyRecord, Season, WeatherField,
};
use dashboard_core::statistics::{pearson, StatisticError};

use crate::reader::BikeShareData;

// ── Table rows ────────────────────────────────────────────────────────────────

/// Rentals summed over one calendar month.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonthlyRentals {
    /// First day of the month.
    pub month: NaiveDate,
    pub casual: i64,
    pub registered: i64,
    pub total: i64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeasonTotal {
    pub season: Season,
    pub total: i64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WeatherTotal {
    /// Weather situation code, 1..=4 for known severities.
    pub code: u8,
    pub total: i64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WeekdayTotal {
    pub weekday: Weekday,
    pub total: i64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DayTypeTotal {
    pub day_type: DayType,
    pub total: i64,
}

/// Rentals summed over one hour of the day.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HourlyTotal {
    pub hour: u8,
    pub total: i64,
    /// Number of hourly records folded into `total`.
    pub records: usize,
}

/// Hour-of-day profile split on the working-day flag.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct WorkingDayHourly {
    pub working: Vec<HourlyTotal>,
    pub non_working: Vec<HourlyTotal>,
}

/// Hour-of-day profile for a single season.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeasonHourly {
    pub season: Season,
    pub hours: Vec<HourlyTotal>,
}

/// Correlation of one weather field with the daily total.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldCorrelation {
    pub field: WeatherField,
    pub coefficient: Result<f64, StatisticError>,
}

// ── DerivedTables ─────────────────────────────────────────────────────────────

/// All derived tables, computed once from an immutable dataset.
#[derive(Debug, Clone)]
pub struct DerivedTables {
    pub monthly: Vec<MonthlyRentals>,
    pub seasonal: Vec<SeasonTotal>,
    pub weather: Vec<WeatherTotal>,
    pub weekday: Vec<WeekdayTotal>,
    pub day_type: Vec<DayTypeTotal>,
    pub hourly_by_working_day: WorkingDayHourly,
    pub hourly_by_season: Vec<SeasonHourly>,
    pub correlations: Vec<FieldCorrelation>,
}

impl DerivedTables {
    pub fn compute(data: &BikeShareData) -> Self {
        let daily = &data.daily;
        let hourly = &data.hourly;

        let correlations = WeatherField::ALL
            .iter()
            .map(|&field| FieldCorrelation {
                field,
                coefficient: RentalAggregator::correlation(daily, field),
            })
            .collect();

        Self {
            monthly: RentalAggregator::monthly(daily),
            seasonal: RentalAggregator::seasonal(daily),
            weather: RentalAggregator::weather(daily),
            weekday: RentalAggregator::weekday(daily),
            day_type: RentalAggregator::day_type(daily),
            hourly_by_working_day: RentalAggregator::hourly_by_working_day(hourly),
            hourly_by_season: RentalAggregator::hourly_by_season(hourly),
            correlations,
        }
    }
}

// ── RentalAggregator ──────────────────────────────────────────────────────────

/// Stateless helper that groups rental records.
pub struct RentalAggregator;

impl RentalAggregator {
    /// Sum casual, registered and total per calendar month, oldest first.
    pub fn monthly(records: &[DailyRecord]) -> Vec<MonthlyRentals> {
        let mut map: BTreeMap<NaiveDate, MonthlyRentals> = BTreeMap::new();

        for r in records {
            let month = month_start(r.date);
            let row = map.entry(month).or_insert_with(|| MonthlyRentals {
                month,
                casual: 0,
                registered: 0,
                total: 0,
            });
            row.casual += r.casual;
            row.registered += r.registered;
            row.total += r.total;
        }

        map.into_values().collect()
    }

    /// Total per season in the order spring, summer, fall, winter.
    ///
    /// All four seasons are always present; unmapped season codes are left out.
    pub fn seasonal(records: &[DailyRecord]) -> Vec<SeasonTotal> {
        let mut sums: BTreeMap<Season, i64> = Season::CYCLE.iter().map(|&s| (s, 0)).collect();

        for r in records {
            if let Some(season) = r.season.season() {
                *sums.entry(season).or_default() += r.total;
            }
        }

        sums.into_iter()
            .map(|(season, total)| SeasonTotal { season, total })
            .collect()
    }

    /// Total per weather code, ascending; unobserved codes are absent.
    pub fn weather(records: &[DailyRecord]) -> Vec<WeatherTotal> {
        let mut sums: BTreeMap<u8, i64> = BTreeMap::new();
        for r in records {
            *sums.entry(r.weather).or_default() += r.total;
        }
        sums.into_iter()
            .map(|(code, total)| WeatherTotal { code, total })
            .collect()
    }

    /// Total per weekday, ordered by weekday name ("Friday" .. "Wednesday").
    ///
    /// Rows with an unset weekday are skipped.
    pub fn weekday(records: &[DailyRecord]) -> Vec<WeekdayTotal> {
        let mut sums: BTreeMap<&'static str, WeekdayTotal> = BTreeMap::new();

        for r in records {
            let Some(weekday) = r.weekday else { continue };
            sums.entry(weekday_label(weekday))
                .or_insert(WeekdayTotal { weekday, total: 0 })
                .total += r.total;
        }

        sums.into_values().collect()
    }

    /// Total per holiday × working-day bucket; empty buckets are absent.
    pub fn day_type(records: &[DailyRecord]) -> Vec<DayTypeTotal> {
        let mut sums: BTreeMap<DayType, i64> = BTreeMap::new();
        for r in records {
            *sums.entry(r.day_type()).or_default() += r.total;
        }
        sums.into_iter()
            .map(|(day_type, total)| DayTypeTotal { day_type, total })
            .collect()
    }

    /// Hour-of-day totals for working days and for non-working days.
    ///
    /// Every record lands in exactly one of the two tables.
    pub fn hourly_by_working_day(records: &[HourlyRecord]) -> WorkingDayHourly {
        let (working, non_working): (Vec<&HourlyRecord>, Vec<&HourlyRecord>) =
            records.iter().partition(|r| r.working_day);

        WorkingDayHourly {
            working: sum_by_hour(working),
            non_working: sum_by_hour(non_working),
        }
    }

    /// One hour-of-day table per season, in season cycle order.
    pub fn hourly_by_season(records: &[HourlyRecord]) -> Vec<SeasonHourly> {
        Season::CYCLE
            .iter()
            .map(|&season| SeasonHourly {
                season,
                hours: sum_by_hour(
                    records
                        .iter()
                        .filter(|r| r.season.season() == Some(season)),
                ),
            })
            .collect()
    }

    /// Pearson correlation between `field` and the daily total.
    pub fn correlation(records: &[DailyRecord], field: WeatherField) -> Result<f64, StatisticError> {
        let xs: Vec<f64> = records.iter().map(|r| r.weather_value(field)).collect();
        let ys: Vec<f64> = records.iter().map(|r| r.total as f64).collect();
        pearson(&xs, &ys)
    }

    /// Sum of `total` across all records.
    pub fn grand_total(records: &[DailyRecord]) -> i64 {
        records.iter().map(|r| r.total).sum()
    }
}

// ── Private ───────────────────────────────────────────────────────────────────

fn month_start(date: NaiveDate) -> NaiveDate {
    date.with_day(1).unwrap_or(date)
}

fn sum_by_hour<'a>(records: impl IntoIterator<Item = &'a HourlyRecord>) -> Vec<HourlyTotal> {
    let mut map: BTreeMap<u8, HourlyTotal> = BTreeMap::new();
    for r in records {
        let row = map.entry(r.hour).or_insert_with(|| HourlyTotal {
            hour: r.hour,
            total: 0,
            records: 0,
        });
        row.total += r.total;
        row.records += 1;
    }
    map.into_values().collect()
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use dashboard_core::models::{weekday_from_code, SeasonValue};

    fn day(date: &str, season: i64, weekday: i64, holiday: bool, working: bool, total: i64) -> DailyRecord {
        DailyRecord {
            date: NaiveDate::parse_from_str(date, "%Y-%m-%d").unwrap(),
            season: SeasonValue::from_code(season),
            weekday: weekday_from_code(weekday),
            holiday,
            working_day: working,
            weather: 1,
            temp: 0.3,
            atemp: 0.3,
            humidity: 0.5,
            windspeed: 0.2,
            casual: total / 4,
            registered: total - total / 4,
            total,
        }
    }

    fn hour(hr: u8, season: i64, working: bool, total: i64) -> HourlyRecord {
        HourlyRecord {
            date: NaiveDate::from_ymd_opt(2011, 1, 3).unwrap(),
            hour: hr,
            season: SeasonValue::from_code(season),
            weekday: weekday_from_code(1),
            holiday: false,
            working_day: working,
            weather: 1,
            temp: 0.2,
            atemp: 0.2,
            humidity: 0.4,
            windspeed: 0.1,
            casual: 0,
            registered: total,
            total,
        }
    }

    // ── monthly ───────────────────────────────────────────────────────────────

    #[test]
    fn test_monthly_groups_and_sorts_chronologically() {
        let records = vec![
            day("2012-02-10", 1, 5, false, true, 100),
            day("2011-01-01", 1, 6, false, false, 40),
            day("2011-01-31", 1, 1, false, true, 60),
        ];
        let monthly = RentalAggregator::monthly(&records);

        assert_eq!(monthly.len(), 2);
        assert_eq!(monthly[0].month, NaiveDate::from_ymd_opt(2011, 1, 1).unwrap());
        assert_eq!(monthly[0].total, 100);
        assert_eq!(monthly[0].casual, 10 + 15);
        assert_eq!(monthly[1].month, NaiveDate::from_ymd_opt(2012, 2, 1).unwrap());
    }

    #[test]
    fn test_monthly_totals_match_grand_total() {
        let records = vec![
            day("2011-03-01", 2, 2, false, true, 1_234),
            day("2011-03-02", 2, 3, false, true, 2_000),
            day("2011-07-04", 3, 1, true, false, 987),
            day("2012-12-31", 1, 1, false, true, 441),
        ];
        let monthly = RentalAggregator::monthly(&records);
        let sum: i64 = monthly.iter().map(|m| m.total).sum();
        assert_eq!(sum, RentalAggregator::grand_total(&records));
        for m in &monthly {
            assert_eq!(m.casual + m.registered, m.total);
        }
    }

    #[test]
    fn test_monthly_sums_negative_counts() {
        let mut bad = day("2011-05-01", 2, 0, false, false, 10);
        bad.casual = -20;
        bad.registered = 30;
        let records = vec![bad, day("2011-05-02", 2, 1, false, true, 40)];

        let monthly = RentalAggregator::monthly(&records);
        assert_eq!(monthly[0].casual, -20 + 10);
        assert_eq!(monthly[0].total, 50);
        assert_eq!(RentalAggregator::grand_total(&records), 50);
    }

    // ── seasonal ──────────────────────────────────────────────────────────────

    #[test]
    fn test_seasonal_order_is_fixed_cycle() {
        let records = vec![
            day("2011-01-01", 1, 6, false, false, 10),
            day("2011-10-01", 4, 6, false, false, 40),
            day("2011-07-01", 3, 5, false, true, 30),
            day("2011-04-01", 2, 5, false, true, 20),
        ];
        let seasons: Vec<Season> = RentalAggregator::seasonal(&records)
            .iter()
            .map(|s| s.season)
            .collect();
        assert_eq!(seasons, Season::CYCLE.to_vec());

        let mut reversed = records.clone();
        reversed.reverse();
        let totals: Vec<i64> = RentalAggregator::seasonal(&reversed)
            .iter()
            .map(|s| s.total)
            .collect();
        assert_eq!(totals, vec![20, 30, 40, 10]);
    }

    #[test]
    fn test_seasonal_skips_unmapped_codes() {
        let records = vec![
            day("2011-01-01", 1, 6, false, false, 10),
            day("2011-01-02", 8, 0, false, false, 99),
        ];
        let seasonal = RentalAggregator::seasonal(&records);
        let sum: i64 = seasonal.iter().map(|s| s.total).sum();
        assert_eq!(sum, 10);
        assert_eq!(seasonal.len(), 4);
    }

    // ── weather ───────────────────────────────────────────────────────────────

    #[test]
    fn test_weather_ascending_without_zero_fill() {
        let mut a = day("2011-01-01", 1, 6, false, false, 10);
        a.weather = 3;
        let mut b = day("2011-01-02", 1, 0, false, false, 20);
        b.weather = 1;
        let mut c = day("2011-01-03", 1, 1, false, true, 30);
        c.weather = 3;

        let weather = RentalAggregator::weather(&[a, b, c]);
        assert_eq!(
            weather,
            vec![
                WeatherTotal { code: 1, total: 20 },
                WeatherTotal { code: 3, total: 40 },
            ]
        );
    }

    // ── weekday ───────────────────────────────────────────────────────────────

    #[test]
    fn test_weekday_sorted_by_name() {
        // 2011-01-01 is a Saturday; one full week starting there.
        let records: Vec<DailyRecord> = (0..7)
            .map(|i| {
                let code = (6 + i) % 7;
                day(&format!("2011-01-0{}", i + 1), 1, code, false, code != 0 && code != 6, 10 * (i + 1))
            })
            .collect();
        let weekday = RentalAggregator::weekday(&records);
        let labels: Vec<&str> = weekday.iter().map(|w| weekday_label(w.weekday)).collect();
        assert_eq!(
            labels,
            vec!["Friday", "Monday", "Saturday", "Sunday", "Thursday", "Tuesday", "Wednesday"]
        );
        assert_eq!(weekday[2], WeekdayTotal { weekday: Weekday::Sat, total: 10 });
        assert_eq!(weekday[0], WeekdayTotal { weekday: Weekday::Fri, total: 70 });
    }

    #[test]
    fn test_weekday_merges_repeated_days() {
        let records = vec![
            day("2011-01-01", 1, 6, false, false, 10),
            day("2011-01-02", 1, 0, false, false, 20),
            day("2011-01-08", 1, 6, false, false, 5),
        ];
        assert_eq!(
            RentalAggregator::weekday(&records),
            vec![
                WeekdayTotal { weekday: Weekday::Sat, total: 15 },
                WeekdayTotal { weekday: Weekday::Sun, total: 20 },
            ]
        );
    }

    #[test]
    fn test_weekday_skips_unset_labels() {
        let records = vec![
            day("2011-01-01", 1, 6, false, false, 10),
            day("2011-01-02", 1, 42, false, false, 20),
        ];
        let weekday = RentalAggregator::weekday(&records);
        assert_eq!(weekday.len(), 1);
        assert_eq!(weekday[0].total, 10);
    }

    // ── day type ──────────────────────────────────────────────────────────────

    #[test]
    fn test_day_type_example_bucket_absent() {
        let records = vec![
            day("2011-01-17", 1, 1, true, false, 50),
            day("2011-01-18", 1, 2, false, true, 100),
            day("2011-01-22", 1, 6, false, false, 30),
        ];
        let day_type = RentalAggregator::day_type(&records);

        assert_eq!(
            day_type,
            vec![
                DayTypeTotal { day_type: DayType::HolidayNonWorking, total: 50 },
                DayTypeTotal { day_type: DayType::NonHolidayNonWorking, total: 30 },
                DayTypeTotal { day_type: DayType::NonHolidayWorking, total: 100 },
            ]
        );
        assert!(day_type.iter().all(|d| d.day_type != DayType::HolidayWorking));
    }

    #[test]
    fn test_day_type_buckets_sum_to_grand_total() {
        let records = vec![
            day("2011-01-17", 1, 1, true, false, 50),
            day("2011-01-18", 1, 2, true, true, 70),
            day("2011-01-19", 1, 3, false, true, 100),
            day("2011-01-22", 1, 6, false, false, 30),
        ];
        let sum: i64 = RentalAggregator::day_type(&records).iter().map(|d| d.total).sum();
        assert_eq!(sum, RentalAggregator::grand_total(&records));
    }

    // ── hourly ────────────────────────────────────────────────────────────────

    #[test]
    fn test_hourly_by_working_day_is_strict_split() {
        let records = vec![
            hour(8, 1, true, 100),
            hour(8, 1, true, 120),
            hour(8, 1, false, 10),
            hour(17, 2, true, 300),
            hour(12, 3, false, 80),
        ];
        let split = RentalAggregator::hourly_by_working_day(&records);

        let counted: usize = split
            .working
            .iter()
            .chain(split.non_working.iter())
            .map(|h| h.records)
            .sum();
        assert_eq!(counted, records.len());

        assert_eq!(
            split.working,
            vec![
                HourlyTotal { hour: 8, total: 220, records: 2 },
                HourlyTotal { hour: 17, total: 300, records: 1 },
            ]
        );
        assert_eq!(split.non_working.len(), 2);
        assert_eq!(split.non_working[0].hour, 8);
        assert_eq!(split.non_working[1].hour, 12);
    }

    #[test]
    fn test_hourly_by_season_four_tables_missing_hours_absent() {
        let records = vec![
            hour(0, 1, true, 5),
            hour(3, 1, true, 7),
            hour(0, 3, false, 11),
        ];
        let by_season = RentalAggregator::hourly_by_season(&records);

        assert_eq!(by_season.len(), 4);
        let winter = by_season.iter().find(|s| s.season == Season::Winter).unwrap();
        assert_eq!(winter.hours.iter().map(|h| h.hour).collect::<Vec<_>>(), vec![0, 3]);
        let spring = by_season.iter().find(|s| s.season == Season::Spring).unwrap();
        assert!(spring.hours.is_empty());
        let summer = by_season.iter().find(|s| s.season == Season::Summer).unwrap();
        assert_eq!(summer.hours[0].total, 11);
    }

    // ── correlation ───────────────────────────────────────────────────────────

    #[test]
    fn test_correlation_temperature_positive() {
        let mut records = Vec::new();
        for (i, total) in [100i64, 200, 300, 400].iter().enumerate() {
            let mut r = day("2011-06-01", 3, 1, false, true, *total);
            r.temp = 0.1 * (i as f64 + 1.0);
            records.push(r);
        }
        let r = RentalAggregator::correlation(&records, WeatherField::Temperature).unwrap();
        assert!((r - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_correlation_constant_field_is_undefined() {
        let records = vec![
            day("2011-01-01", 1, 6, false, false, 10),
            day("2011-01-02", 1, 0, false, false, 20),
        ];
        assert_eq!(
            RentalAggregator::correlation(&records, WeatherField::Humidity),
            Err(StatisticError::ZeroVariance)
        );
    }

    #[test]
    fn test_derived_tables_compute_all_views() {
        let data = BikeShareData {
            daily: vec![
                day("2011-01-01", 1, 6, false, false, 10),
                day("2011-01-02", 1, 0, false, false, 20),
            ],
            hourly: vec![hour(0, 1, false, 3), hour(1, 1, false, 7)],
        };
        let tables = DerivedTables::compute(&data);

        assert_eq!(tables.monthly.len(), 1);
        assert_eq!(tables.seasonal.len(), 4);
        assert_eq!(tables.weather.len(), 1);
        assert_eq!(tables.weekday.len(), 2);
        assert_eq!(tables.day_type.len(), 1);
        assert!(tables.hourly_by_working_day.working.is_empty());
        assert_eq!(tables.hourly_by_working_day.non_working.len(), 2);
        assert_eq!(tables.hourly_by_season.len(), 4);
        assert_eq!(tables.correlations.len(), 4);
        // Every weather field is constant in these rows.
        assert!(tables.correlations.iter().all(|c| c.coefficient.is_err()));
    }
}
