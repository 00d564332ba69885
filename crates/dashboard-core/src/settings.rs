use clap::{CommandFactory, Parser};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::DashboardError;

/// Keys accepted by `--menu`, in sidebar order.
pub const MENU_KEYS: [&str; 9] = [
    "overview",
    "monthly",
    "seasonal",
    "weather",
    "weekly",
    "day-type",
    "weather-influence",
    "hourly",
    "hourly-season",
];

// ── Settings (CLI) ─────────────────────────────────────────────────────────────

/// Terminal dashboard for the bike sharing dataset
#[derive(Parser, Debug, Clone)]
#[command(
    name = "bikeshare-dashboard",
    about = "Terminal dashboard for the bike sharing dataset",
    version
)]
pub struct Settings {
    /// Directory containing the daily and hourly CSV files
    #[arg(long, default_value = "data")]
    pub data_dir: PathBuf,

    /// Daily dataset file name inside the data directory
    #[arg(long, default_value = "day.csv")]
    pub day_file: String,

    /// Hourly dataset file name inside the data directory
    #[arg(long, default_value = "hour.csv")]
    pub hour_file: String,

    /// Initial menu selection
    #[arg(long, default_value = "overview", value_parser = MENU_KEYS)]
    pub menu: String,

    /// Display theme
    #[arg(long, default_value = "auto", value_parser = ["light", "dark", "classic", "auto"])]
    pub theme: String,

    /// Logging level
    #[arg(long, default_value = "INFO", value_parser = ["DEBUG", "INFO", "WARNING", "ERROR", "CRITICAL"])]
    pub log_level: String,

    /// Log file path
    #[arg(long)]
    pub log_file: Option<PathBuf>,

    /// Enable debug logging
    #[arg(long)]
    pub debug: bool,

    /// Clear saved configuration
    #[arg(long)]
    pub clear: bool,
}

// ── LastUsedParams ─────────────────────────────────────────────────────────────

/// Persisted last-used parameters saved to `~/.bikeshare-dashboard/last_used.json`.
#[derive(Debug, Serialize, Deserialize, Default, Clone)]
pub struct LastUsedParams {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub theme: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data_dir: Option<PathBuf>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub menu: Option<String>,
}

impl LastUsedParams {
    /// Default location of the persisted file.
    pub fn config_path() -> PathBuf {
        Self::config_path_in(&dirs::home_dir().unwrap_or_else(|| PathBuf::from(".")))
    }

    pub fn config_path_in(base_dir: &Path) -> PathBuf {
        base_dir.join(".bikeshare-dashboard").join("last_used.json")
    }

    /// Load persisted params; returns `Default` when the file is absent or
    /// cannot be parsed.
    pub fn load_from(path: &Path) -> Self {
        let Ok(content) = std::fs::read_to_string(path) else {
            return Self::default();
        };
        serde_json::from_str(&content).unwrap_or_else(|e| {
            tracing::warn!(path = %path.display(), error = %e, "ignoring unreadable last-used params");
            Self::default()
        })
    }

    /// Write params via a temp file and rename, creating parent directories.
    pub fn save_to(&self, path: &Path) -> Result<(), std::io::Error> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let json = serde_json::to_string_pretty(self).map_err(std::io::Error::other)?;

        let tmp = path.with_extension("json.tmp");
        std::fs::write(&tmp, &json)?;
        std::fs::rename(&tmp, path)?;

        Ok(())
    }

    pub fn clear_at(path: &Path) -> Result<(), std::io::Error> {
        if path.exists() {
            std::fs::remove_file(path)?;
        }
        Ok(())
    }
}

// ── Settings impl ──────────────────────────────────────────────────────────────

impl Settings {
    /// Parse CLI arguments, merge last-used params where no explicit CLI value
    /// was provided, and persist the result.
    pub fn load_with_last_used() -> Self {
        Self::load_with_last_used_impl(
            std::env::args_os().collect(),
            &LastUsedParams::config_path(),
        )
    }

    /// Same as [`Settings::load_with_last_used`] with explicit args and config
    /// path.
    pub fn load_with_last_used_impl(
        args: Vec<std::ffi::OsString>,
        config_path: &Path,
    ) -> Self {
        let matches = Settings::command().get_matches_from(args.clone());
        let mut settings = Settings::parse_from(args);

        if settings.clear {
            if let Err(e) = LastUsedParams::clear_at(config_path) {
                tracing::warn!(error = %e, "could not clear last-used params");
            }
            return settings.apply_debug();
        }

        let last = LastUsedParams::load_from(config_path);

        // clap stores arg ids by field name (underscores).
        if !is_arg_explicitly_set(&matches, "theme") {
            if let Some(v) = last.theme {
                settings.theme = v;
            }
        }
        if !is_arg_explicitly_set(&matches, "data_dir") {
            if let Some(v) = last.data_dir {
                settings.data_dir = v;
            }
        }
        if !is_arg_explicitly_set(&matches, "menu") {
            if let Some(v) = last.menu.filter(|m| MENU_KEYS.contains(&m.as_str())) {
                settings.menu = v;
            }
        }

        settings = settings.apply_debug();

        if let Err(e) = LastUsedParams::from(&settings).save_to(config_path) {
            tracing::warn!(error = %e, "could not persist last-used params");
        }

        settings
    }

    /// Full path of the daily CSV.
    pub fn day_path(&self) -> PathBuf {
        self.data_dir.join(&self.day_file)
    }

    /// Full path of the hourly CSV.
    pub fn hour_path(&self) -> PathBuf {
        self.data_dir.join(&self.hour_file)
    }

    /// Check that the data directory exists and names two distinct files.
    pub fn validate(&self) -> crate::error::Result<()> {
        if !self.data_dir.is_dir() {
            return Err(DashboardError::Config(format!(
                "data directory {} does not exist",
                self.data_dir.display()
            )));
        }
        if self.day_file.trim().is_empty() || self.hour_file.trim().is_empty() {
            return Err(DashboardError::Config(
                "--day-file and --hour-file must not be empty".to_string(),
            ));
        }
        if self.day_file == self.hour_file {
            return Err(DashboardError::Config(format!(
                "--day-file and --hour-file both point at {}",
                self.day_file
            )));
        }
        Ok(())
    }

    /// `--debug` overrides the log level.
    fn apply_debug(mut self) -> Self {
        if self.debug {
            self.log_level = "DEBUG".to_string();
        }
        self
    }
}

impl From<&Settings> for LastUsedParams {
    fn from(s: &Settings) -> Self {
        LastUsedParams {
            theme: Some(s.theme.clone()),
            data_dir: Some(s.data_dir.clone()),
            menu: Some(s.menu.clone()),
        }
    }
}

fn is_arg_explicitly_set(matches: &clap::ArgMatches, name: &str) -> bool {
    matches.value_source(name) == Some(clap::parser::ValueSource::CommandLine)
}

// ── Tests ──────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn tmp_config_path(tmp: &TempDir) -> PathBuf {
        LastUsedParams::config_path_in(tmp.path())
    }

    #[test]
    fn test_settings_default_values() {
        let settings = Settings::parse_from(["bikeshare-dashboard"]);

        assert_eq!(settings.data_dir, PathBuf::from("data"));
        assert_eq!(settings.day_file, "day.csv");
        assert_eq!(settings.hour_file, "hour.csv");
        assert_eq!(settings.menu, "overview");
        assert_eq!(settings.theme, "auto");
        assert_eq!(settings.log_level, "INFO");
        assert!(settings.log_file.is_none());
        assert!(!settings.debug);
        assert!(!settings.clear);
    }

    #[test]
    fn test_settings_paths_join_data_dir() {
        let settings = Settings::parse_from([
            "bikeshare-dashboard",
            "--data-dir",
            "/srv/bikes",
            "--hour-file",
            "hourly.csv",
        ]);
        assert_eq!(settings.day_path(), PathBuf::from("/srv/bikes/day.csv"));
        assert_eq!(settings.hour_path(), PathBuf::from("/srv/bikes/hourly.csv"));
    }

    #[test]
    fn test_settings_rejects_unknown_menu() {
        let result = Settings::try_parse_from(["bikeshare-dashboard", "--menu", "yearly"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_validate_accepts_existing_dir() {
        let tmp = TempDir::new().expect("tempdir");
        let dir = tmp.path().to_str().unwrap();
        let settings = Settings::parse_from(["bikeshare-dashboard", "--data-dir", dir]);
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_missing_dir() {
        let tmp = TempDir::new().expect("tempdir");
        let missing = tmp.path().join("nope");
        let settings =
            Settings::parse_from(["bikeshare-dashboard", "--data-dir", missing.to_str().unwrap()]);
        assert!(matches!(settings.validate(), Err(DashboardError::Config(_))));
    }

    #[test]
    fn test_validate_rejects_same_file_twice() {
        let tmp = TempDir::new().expect("tempdir");
        let settings = Settings::parse_from([
            "bikeshare-dashboard",
            "--data-dir",
            tmp.path().to_str().unwrap(),
            "--hour-file",
            "day.csv",
        ]);
        let err = settings.validate().unwrap_err();
        assert!(err.to_string().contains("both point at day.csv"));
    }

    #[test]
    fn test_last_used_params_save_load() {
        let tmp = TempDir::new().expect("tempdir");
        let path = tmp_config_path(&tmp);
        let params = LastUsedParams {
            theme: Some("dark".to_string()),
            data_dir: Some(PathBuf::from("/data/bikes")),
            menu: Some("hourly".to_string()),
        };
        params.save_to(&path).expect("save");

        let loaded = LastUsedParams::load_from(&path);
        assert_eq!(loaded.theme, Some("dark".to_string()));
        assert_eq!(loaded.data_dir, Some(PathBuf::from("/data/bikes")));
        assert_eq!(loaded.menu, Some("hourly".to_string()));
    }

    #[test]
    fn test_last_used_params_default_when_missing() {
        let tmp = TempDir::new().expect("tempdir");
        let loaded = LastUsedParams::load_from(&tmp_config_path(&tmp));
        assert!(loaded.theme.is_none());
        assert!(loaded.data_dir.is_none());
        assert!(loaded.menu.is_none());
    }

    #[test]
    fn test_last_used_params_default_when_corrupt() {
        let tmp = TempDir::new().expect("tempdir");
        let path = tmp_config_path(&tmp);
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(&path, "{not json").unwrap();
        assert!(LastUsedParams::load_from(&path).theme.is_none());
    }

    #[test]
    fn test_load_with_last_used_merges_persisted_values() {
        let tmp = TempDir::new().expect("tempdir");
        let config_path = tmp_config_path(&tmp);
        LastUsedParams {
            theme: Some("classic".to_string()),
            data_dir: Some(PathBuf::from("/persisted")),
            menu: Some("weekly".to_string()),
        }
        .save_to(&config_path)
        .expect("save");

        let settings =
            Settings::load_with_last_used_impl(vec!["bikeshare-dashboard".into()], &config_path);
        assert_eq!(settings.theme, "classic");
        assert_eq!(settings.data_dir, PathBuf::from("/persisted"));
        assert_eq!(settings.menu, "weekly");
    }

    #[test]
    fn test_load_with_last_used_cli_overrides_persisted() {
        let tmp = TempDir::new().expect("tempdir");
        let config_path = tmp_config_path(&tmp);
        LastUsedParams {
            theme: Some("dark".to_string()),
            menu: Some("weekly".to_string()),
            ..Default::default()
        }
        .save_to(&config_path)
        .expect("save");

        let settings = Settings::load_with_last_used_impl(
            vec![
                "bikeshare-dashboard".into(),
                "--theme".into(),
                "light".into(),
                "--menu".into(),
                "monthly".into(),
            ],
            &config_path,
        );
        assert_eq!(settings.theme, "light");
        assert_eq!(settings.menu, "monthly");
    }

    #[test]
    fn test_load_with_last_used_ignores_stale_menu_key() {
        let tmp = TempDir::new().expect("tempdir");
        let config_path = tmp_config_path(&tmp);
        LastUsedParams {
            menu: Some("retired-view".to_string()),
            ..Default::default()
        }
        .save_to(&config_path)
        .expect("save");

        let settings =
            Settings::load_with_last_used_impl(vec!["bikeshare-dashboard".into()], &config_path);
        assert_eq!(settings.menu, "overview");
    }

    #[test]
    fn test_load_with_last_used_clear_removes_file() {
        let tmp = TempDir::new().expect("tempdir");
        let config_path = tmp_config_path(&tmp);
        LastUsedParams {
            theme: Some("classic".to_string()),
            ..Default::default()
        }
        .save_to(&config_path)
        .expect("save");

        Settings::load_with_last_used_impl(
            vec!["bikeshare-dashboard".into(), "--clear".into()],
            &config_path,
        );
        assert!(!config_path.exists(), "file must be gone after --clear");
    }

    #[test]
    fn test_load_with_last_used_debug_overrides_log_level() {
        let tmp = TempDir::new().expect("tempdir");
        let config_path = tmp_config_path(&tmp);
        let settings = Settings::load_with_last_used_impl(
            vec!["bikeshare-dashboard".into(), "--debug".into()],
            &config_path,
        );
        assert_eq!(settings.log_level, "DEBUG");
    }

    #[test]
    fn test_load_with_last_used_persists_after_run() {
        let tmp = TempDir::new().expect("tempdir");
        let config_path = tmp_config_path(&tmp);
        Settings::load_with_last_used_impl(
            vec!["bikeshare-dashboard".into(), "--menu".into(), "hourly-season".into()],
            &config_path,
        );
        let loaded = LastUsedParams::load_from(&config_path);
        assert_eq!(loaded.menu, Some("hourly-season".to_string()));
    }
}
