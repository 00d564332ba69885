//! Load-once data manager for the dashboard runtime.
//!
//! Reads both CSV files a single time, computes every derived table up front
//! and then serves views from that immutable snapshot.  Switching menu
//! entries never touches the filesystem again.

use std::path::Path;
use std::time::Instant;

use dashboard_core::error::Result;
use dashboard_data::aggregator::DerivedTables;
use dashboard_data::reader::BikeShareData;

use crate::views::{MenuOption, ViewContent};

// ── DataManager ───────────────────────────────────────────────────────────────

/// Immutable dataset plus its derived tables.
///
/// # Example
/// ```no_run
/// use std::path::Path;
/// use dashboard_runtime::data_manager::DataManager;
/// use dashboard_runtime::views::MenuOption;
///
/// let mgr = DataManager::load(Path::new("data/day.csv"), Path::new("data/hour.csv"))?;
/// let view = mgr.view(MenuOption::SeasonalRentals);
/// println!("{}", view.title);
/// # Ok::<(), dashboard_core::error::DashboardError>(())
/// ```
#[derive(Debug)]
pub struct DataManager {
    data: BikeShareData,
    tables: DerivedTables,
}

impl DataManager {
    /// Read both files and compute all tables.  Errors are fatal to the caller.
    pub fn load(day_path: &Path, hour_path: &Path) -> Result<Self> {
        let started = Instant::now();
        let data = BikeShareData::load(day_path, hour_path)?;
        let mgr = Self::from_data(data);

        tracing::info!(
            daily = mgr.data.daily.len(),
            hourly = mgr.data.hourly.len(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            day = %day_path.display(),
            hour = %hour_path.display(),
            "dashboard data ready"
        );
        Ok(mgr)
    }

    /// Wrap an already-loaded dataset.
    pub fn from_data(data: BikeShareData) -> Self {
        let tables = DerivedTables::compute(&data);

        for c in &tables.correlations {
            if let Err(e) = c.coefficient {
                tracing::warn!(field = c.field.column(), error = %e, "correlation undefined");
            }
        }
        tracing::debug!(
            months = tables.monthly.len(),
            weather_codes = tables.weather.len(),
            "derived tables computed"
        );

        Self { data, tables }
    }

    // ── Public API ────────────────────────────────────────────────────────

    pub fn data(&self) -> &BikeShareData {
        &self.data
    }

    pub fn tables(&self) -> &DerivedTables {
        &self.tables
    }

    /// Build the content for one menu selection.
    pub fn view(&self, option: MenuOption) -> ViewContent {
        tracing::debug!(view = option.key(), "building view");
        (option.entry().build)(self)
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
