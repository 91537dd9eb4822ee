use std::fs;
use std::path::{Path, PathBuf};

use color_eyre::eyre::{Result, WrapErr};
use serde::Deserialize;

use crate::app::ViewMode;
use crate::calendar::HolidayLabels;
use crate::theme::ThemeConfig;

const APP_DIR: &str = "kalender-tui";

fn default_swipe_threshold() -> u16 {
    6
}

fn default_log_level() -> String {
    "info".to_string()
}

/// Settings from `config.toml`. Every field is optional in the file.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Config {
    pub data_dir: Option<PathBuf>,
    pub default_view: ViewMode,
    pub holiday_labels: HolidayLabels,
    /// Minimum horizontal mouse drag, in columns, that counts as a swipe.
    #[serde(default = "default_swipe_threshold")]
    pub swipe_threshold: u16,
    #[serde(default = "default_log_level")]
    pub log_level: String,
    pub theme: ThemeConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_dir: None,
            default_view: ViewMode::Month,
            holiday_labels: HolidayLabels::default(),
            swipe_threshold: default_swipe_threshold(),
            log_level: default_log_level(),
            theme: ThemeConfig::default(),
        }
    }
}

impl Config {
    /// Read `path`, or the default location when `path` is `None`.
    ///
    /// A missing file gives the defaults. A file that exists but does not
    /// parse is an error; the caller decides whether to fall back.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let Some(path) = path.map(Path::to_path_buf).or_else(default_config_path) else {
            return Ok(Self::default());
        };
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = fs::read_to_string(&path)
            .wrap_err_with(|| format!("failed to read {}", path.display()))?;
        Self::parse(&content).wrap_err_with(|| format!("invalid config in {}", path.display()))
    }

    pub fn parse(content: &str) -> Result<Self> {
        let mut config: Config = toml::from_str(content)?;
        config.sanitize();
        Ok(config)
    }

    fn sanitize(&mut self) {
        if self.swipe_threshold == 0 {
            self.swipe_threshold = default_swipe_threshold();
        }
        if self.log_level.trim().is_empty() {
            self.log_level = default_log_level();
        }
    }

    /// Directory holding `events.json` and the log file.
    pub fn resolved_data_dir(&self) -> PathBuf {
        self.data_dir
            .clone()
            .or_else(|| dirs::data_dir().map(|d| d.join(APP_DIR)))
            .unwrap_or_else(|| PathBuf::from(".").join(APP_DIR))
    }
}

pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join(APP_DIR).join("config.toml"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_file_gives_defaults() {
        let config = Config::parse("").expect("parse");
        assert_eq!(config.default_view, ViewMode::Month);
        assert_eq!(config.holiday_labels, HolidayLabels::English);
        assert_eq!(config.swipe_threshold, 6);
        assert_eq!(config.log_level, "info");
        assert!(config.data_dir.is_none());
    }

    #[test]
    fn reads_all_fields() {
        let config = Config::parse(
            r##"
            data_dir = "/tmp/kalender"
            default_view = "week"
            holiday_labels = "german"
            swipe_threshold = 10
            log_level = "debug"

            [theme]
            preset = "nord"
            holiday_fg = "#ff0000"
            "##,
        )
        .expect("parse");

        assert_eq!(config.data_dir, Some(PathBuf::from("/tmp/kalender")));
        assert_eq!(config.default_view, ViewMode::Week);
        assert_eq!(config.holiday_labels, HolidayLabels::German);
        assert_eq!(config.swipe_threshold, 10);
        assert_eq!(config.log_level, "debug");
        assert_eq!(config.theme.preset.as_deref(), Some("nord"));
        assert_eq!(config.resolved_data_dir(), PathBuf::from("/tmp/kalender"));
    }

    #[test]
    fn zero_threshold_is_reset() {
        let config = Config::parse("swipe_threshold = 0").expect("parse");
        assert_eq!(config.swipe_threshold, 6);
    }

    #[test]
    fn rejects_unknown_view() {
        assert!(Config::parse(r#"default_view = "decade""#).is_err());
    }

    #[test]
    fn missing_file_gives_defaults() {
        let dir = tempfile::tempdir().expect("tempdir");
        let config = Config::load(Some(&dir.path().join("absent.toml"))).expect("load");
        assert_eq!(config.default_view, ViewMode::Month);
    }
}
