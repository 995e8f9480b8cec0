use std::path::Path;

use chrono::DateTime;
use serde::Deserialize;

use crate::error::Error;
use crate::window::TimeWindow;

/// TOML configuration for the dashboard core.
///
/// ```toml
/// [window]
/// from = "2026-08-01T00:00:00Z"
/// to = "2026-08-02T00:00:00Z"
/// interval = "10m"
/// ```
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    pub window: WindowConfig,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct WindowConfig {
    /// RFC 3339 timestamp.
    pub from: String,
    /// RFC 3339 timestamp.
    pub to: String,
    /// Humantime duration, e.g. "10m".
    #[serde(default = "default_interval")]
    pub interval: String,
}

fn default_interval() -> String {
    "10m".to_string()
}

impl Config {
    pub fn load(path: &Path) -> Result<Self, Error> {
        let raw = std::fs::read_to_string(path)?;
        let config: Self = toml::from_str(&raw)?;

        // surface bad values at load time rather than first use
        config.time_window()?;

        Ok(config)
    }

    /// The initial time window described by this config.
    pub fn time_window(&self) -> Result<TimeWindow, Error> {
        let from = parse_timestamp(&self.window.from)?;
        let to = parse_timestamp(&self.window.to)?;
        let interval = humantime::parse_duration(&self.window.interval)
            .map_err(|e| Error::Config(format!("bad interval {:?}: {e}", self.window.interval)))?;

        TimeWindow::new(from, to, interval)
    }
}

fn parse_timestamp(raw: &str) -> Result<i64, Error> {
    DateTime::parse_from_rfc3339(raw)
        .map(|t| t.timestamp())
        .map_err(|e| Error::Config(format!("bad timestamp {raw:?}: {e}")))
}
