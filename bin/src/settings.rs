//! User settings: the filter options and endpoint the CLI feeds the loader.
//!
//! Settings live as pretty-printed JSON in the platform config directory.
//! A missing file means defaults; command-line flags override file values.

use anyhow::{Context, Result, bail, ensure};
use clap::Args;
use directories::ProjectDirs;
use quakewatch_lib::prelude::*;
use quakewatch_lib::USGS_QUERY_ENDPOINT;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::debug;

/// Largest `limit` the event service accepts.
pub(crate) const MAX_LIMIT: u32 = 20_000;

/// Persisted CLI settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub(crate) struct Settings {
    /// Query endpoint of the event service.
    pub(crate) endpoint: String,
    /// Filter options sent with every request.
    pub(crate) filter: FilterOptions,
    /// Request timeout in seconds.
    pub(crate) timeout_secs: u64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            endpoint: USGS_QUERY_ENDPOINT.to_string(),
            filter: FilterOptions::default(),
            timeout_secs: 15,
        }
    }
}

impl Settings {
    /// Returns the default settings file location.
    ///
    /// - Linux: `~/.config/quakewatch/settings.json`
    /// - macOS: `~/Library/Application Support/quakewatch/settings.json`
    /// - Windows: `C:\Users\<User>\AppData\Roaming\quakewatch\config\settings.json`
    pub(crate) fn default_path() -> PathBuf {
        ProjectDirs::from("", "", "quakewatch")
            .map_or_else(
                || PathBuf::from(".quakewatch"),
                |dirs| dirs.config_dir().to_path_buf(),
            )
            .join("settings.json")
    }

    /// Loads settings from `path`, falling back to defaults if it does not exist.
    pub(crate) fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            debug!(path = %path.display(), "no settings file; using defaults");
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read settings file '{}'", path.display()))?;
        serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse settings file '{}'", path.display()))
    }

    /// Writes settings to `path`, creating parent directories.
    pub(crate) fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory '{}'", parent.display()))?;
        }
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json + "\n")
            .with_context(|| format!("Failed to write settings file '{}'", path.display()))
    }

    /// Checks the values before they reach the query builder.
    pub(crate) fn validate(&self) -> Result<()> {
        self.endpoint_url()?;
        ensure!(
            (1..=MAX_LIMIT).contains(&self.filter.limit),
            "limit must be between 1 and {MAX_LIMIT}, got {}",
            self.filter.limit
        );
        ensure!(self.timeout_secs > 0, "timeout must be at least one second");

        let min_mag = self.filter.min_magnitude.trim();
        if !min_mag.is_empty() && min_mag.parse::<f64>().is_err() {
            bail!("minimum magnitude must be a number, got '{min_mag}'");
        }
        Ok(())
    }

    /// Returns the endpoint as a parsed URL.
    pub(crate) fn endpoint_url(&self) -> Result<Url> {
        Url::parse(&self.endpoint).with_context(|| format!("Invalid endpoint: {}", self.endpoint))
    }

    /// Returns the request timeout.
    pub(crate) const fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

/// Command-line overrides for the stored settings.
#[derive(Debug, Clone, Default, Args)]
pub(crate) struct FilterArgs {
    /// Query endpoint of the event service
    #[arg(long)]
    pub(crate) endpoint: Option<String>,

    /// Minimum magnitude (e.g., 4.5)
    #[arg(short = 'm', long)]
    pub(crate) min_mag: Option<String>,

    /// Sort order (time, magnitude)
    #[arg(short, long)]
    pub(crate) order_by: Option<OrderBy>,

    /// Maximum number of events
    #[arg(short, long)]
    pub(crate) limit: Option<u32>,

    /// Request timeout in seconds
    #[arg(long)]
    pub(crate) timeout: Option<u64>,
}

impl FilterArgs {
    /// Applies the given flags on top of `settings`.
    pub(crate) fn apply(&self, mut settings: Settings) -> Settings {
        if let Some(endpoint) = &self.endpoint {
            settings.endpoint.clone_from(endpoint);
        }
        if let Some(min_mag) = &self.min_mag {
            settings.filter.min_magnitude.clone_from(min_mag);
        }
        if let Some(order_by) = self.order_by {
            settings.filter.order_by = order_by;
        }
        if let Some(limit) = self.limit {
            settings.filter.limit = limit;
        }
        if let Some(timeout) = self.timeout {
            settings.timeout_secs = timeout;
        }
        settings
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_defaults_are_valid() {
        let settings = Settings::default();
        assert_eq!(settings.endpoint, USGS_QUERY_ENDPOINT);
        assert_eq!(settings.filter, FilterOptions::default());
        assert_eq!(settings.timeout(), Duration::from_secs(15));
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn test_load_missing_file_returns_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let settings = Settings::load(&temp_dir.path().join("absent.json")).unwrap();
        assert_eq!(settings, Settings::default());
    }

    #[test]
    fn test_save_and_load() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("nested").join("settings.json");
        let settings = Settings {
            timeout_secs: 30,
            filter: FilterOptions::default()
                .with_min_magnitude("4.5")
                .with_order_by(OrderBy::Magnitude)
                .with_limit(50),
            ..Default::default()
        };

        settings.save(&path).unwrap();
        assert_eq!(Settings::load(&path).unwrap(), settings);
    }

    #[test]
    fn test_load_partial_file_fills_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("settings.json");
        fs::write(&path, r#"{"filter": {"limit": 25}}"#).unwrap();

        let settings = Settings::load(&path).unwrap();
        assert_eq!(settings.filter.limit, 25);
        assert_eq!(settings.filter.min_magnitude, "6");
        assert_eq!(settings.endpoint, USGS_QUERY_ENDPOINT);
    }

    #[test]
    fn test_load_corrupt_file_fails() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("settings.json");
        fs::write(&path, "not json").unwrap();

        assert!(Settings::load(&path).is_err());
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let mut settings = Settings::default();
        settings.filter.limit = 0;
        assert!(settings.validate().is_err());

        let mut settings = Settings::default();
        settings.filter.limit = MAX_LIMIT + 1;
        assert!(settings.validate().is_err());

        let mut settings = Settings::default();
        settings.filter.min_magnitude = "strong".to_string();
        assert!(settings.validate().is_err());

        let mut settings = Settings::default();
        settings.timeout_secs = 0;
        assert!(settings.validate().is_err());

        let settings = Settings {
            endpoint: "not a url".to_string(),
            ..Default::default()
        };
        assert!(settings.validate().is_err());
    }

    #[test]
    fn test_validate_accepts_empty_magnitude() {
        let mut settings = Settings::default();
        settings.filter.min_magnitude = String::new();
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn test_filter_args_override() {
        let args = FilterArgs {
            min_mag: Some("2.5".to_string()),
            order_by: Some(OrderBy::Magnitude),
            timeout: Some(5),
            ..Default::default()
        };
        let settings = args.apply(Settings::default());

        assert_eq!(settings.filter.min_magnitude, "2.5");
        assert_eq!(settings.filter.order_by, OrderBy::Magnitude);
        assert_eq!(settings.filter.limit, 10);
        assert_eq!(settings.timeout_secs, 5);
        assert_eq!(settings.endpoint, USGS_QUERY_ENDPOINT);
    }
}
