//! Widget configuration.
//!
//! Every field has a default, so an empty JSON object is a valid config:
//!
//! ```rust
//! use countdown_widget::config::Config;
//! use countdown_widget::locale::Locale;
//!
//! let config = Config::from_json_str(r#"{ "locale": "vi", "tick_interval_ms": 500 }"#).unwrap();
//! assert_eq!(config.locale, Locale::Vietnamese);
//! assert_eq!(config.tick_interval_ms, 500);
//! assert_eq!(config.storage_key, "countdownAppData");
//! ```

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::locale::Locale;
use crate::location::DEFAULT_BASE_URL;
use crate::notice::DEFAULT_NOTICE_MS;
use crate::record::STORAGE_KEY;

/// Settings for a [`Model`](crate::countdown::Model).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Display language.
    pub locale: Locale,
    /// Title used when the user leaves it empty. Defaults to the locale's.
    pub title_placeholder: Option<String>,
    /// Storage slot the countdown is saved under.
    pub storage_key: String,
    /// Directory for saved countdowns. Defaults to the platform data dir.
    pub storage_dir: Option<PathBuf>,
    /// Address share links point at.
    pub share_base_url: String,
    /// Milliseconds between ticks.
    pub tick_interval_ms: u64,
    /// Milliseconds a notice stays visible. Also the celebration length.
    pub notice_duration_ms: u64,
    /// Width of the rendered widget in cells.
    pub width: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            locale: Locale::default(),
            title_placeholder: None,
            storage_key: STORAGE_KEY.to_string(),
            storage_dir: None,
            share_base_url: DEFAULT_BASE_URL.to_string(),
            tick_interval_ms: 1000,
            notice_duration_ms: DEFAULT_NOTICE_MS,
            width: 48,
        }
    }
}

impl Config {
    /// Parses a JSON config.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Reads a JSON config file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&contents)
    }

    /// The effective placeholder title.
    pub fn placeholder(&self) -> String {
        self.title_placeholder
            .clone()
            .filter(|t| !t.trim().is_empty())
            .unwrap_or_else(|| self.locale.default_title().to_string())
    }

    /// Tick interval as a duration. Never zero.
    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_interval_ms.max(1))
    }

    /// Sets the display language.
    pub fn with_locale(mut self, locale: Locale) -> Self {
        self.locale = locale;
        self
    }

    /// Sets the placeholder title.
    pub fn with_title_placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.title_placeholder = Some(placeholder.into());
        self
    }

    /// Sets the storage slot key.
    pub fn with_storage_key(mut self, key: impl Into<String>) -> Self {
        self.storage_key = key.into();
        self
    }

    /// Sets the storage directory.
    pub fn with_storage_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.storage_dir = Some(dir.into());
        self
    }

    /// Sets the share link base address.
    pub fn with_share_base_url(mut self, url: impl Into<String>) -> Self {
        self.share_base_url = url.into();
        self
    }

    /// Sets the tick interval.
    pub fn with_tick_interval_ms(mut self, ms: u64) -> Self {
        self.tick_interval_ms = ms;
        self
    }

    /// Sets how long notices stay visible.
    pub fn with_notice_duration_ms(mut self, ms: u64) -> Self {
        self.notice_duration_ms = ms;
        self
    }

    /// Sets the widget width.
    pub fn with_width(mut self, width: usize) -> Self {
        self.width = width;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.locale, Locale::English);
        assert_eq!(config.storage_key, "countdownAppData");
        assert_eq!(config.share_base_url, "http://localhost:5173/");
        assert_eq!(config.tick_interval(), Duration::from_secs(1));
        assert_eq!(config.notice_duration_ms, 3000);
        assert_eq!(config.placeholder(), "Countdown to the event");
    }

    #[test]
    fn test_empty_object_is_default() {
        assert_eq!(Config::from_json_str("{}").unwrap(), Config::default());
    }

    #[test]
    fn test_placeholder_override() {
        let config = Config::default().with_locale(Locale::Vietnamese);
        assert_eq!(config.placeholder(), "Đếm ngược đến sự kiện");
        assert_eq!(
            config.with_title_placeholder("My event").placeholder(),
            "My event"
        );
        assert_eq!(
            Config::default().with_title_placeholder("  ").placeholder(),
            "Countdown to the event"
        );
    }

    #[test]
    fn test_zero_interval_is_clamped() {
        let config = Config::default().with_tick_interval_ms(0);
        assert_eq!(config.tick_interval(), Duration::from_millis(1));
    }

    #[test]
    fn test_invalid_json() {
        assert!(matches!(
            Config::from_json_str(r#"{ "locale": "fr" }"#),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("countdown.json");
        std::fs::write(&path, r#"{ "share_base_url": "https://example.com/c" }"#).unwrap();

        let config = Config::load(&path).unwrap();
        assert_eq!(config.share_base_url, "https://example.com/c");

        assert!(matches!(
            Config::load(dir.path().join("missing.json")),
            Err(ConfigError::Io { .. })
        ));
    }
}
