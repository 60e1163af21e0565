//! `prospector.toml` configuration.
//!
//! # Example
//!
//! ```toml
//! [session]
//! data = "fixtures/demo-session.json"
//! reference_date = "2025-08-06"
//!
//! [stats]
//! week_days = 7
//! include_today = false
//!
//! [portal]
//! stage_delays_ms = [800, 800, 800, 600]
//! route = "/client-portal"
//!
//! [logging]
//! filter = "prospector=info"
//! ```
//!
//! Every section and key is optional.

use std::path::{Path, PathBuf};

use prospector_pipeline::{StageDelays, WeekWindow};
use serde::{Deserialize, Serialize};
use time::Date;

pub(crate) const DEFAULT_CONFIG: &str = "prospector.toml";

// ── Types ─────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub(crate) struct Config {
    pub session: SessionConfig,
    pub stats: StatsConfig,
    pub portal: PortalConfig,
    pub logging: LoggingConfig,
}

/// `[session]`: where the seed comes from and which day it is.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub(crate) struct SessionConfig {
    pub data: PathBuf,
    /// Pins "today" for stats; the system date is used when absent.
    #[serde(
        with = "prospector_core::dates::option",
        skip_serializing_if = "Option::is_none"
    )]
    pub reference_date: Option<Date>,
}

impl Default for SessionConfig {
    fn default() -> Self {
        SessionConfig {
            data: PathBuf::from("fixtures/demo-session.json"),
            reference_date: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub(crate) struct StatsConfig {
    pub week_days: u32,
    pub include_today: bool,
}

impl Default for StatsConfig {
    fn default() -> Self {
        let window = WeekWindow::default();
        StatsConfig {
            week_days: window.days,
            include_today: window.include_today,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub(crate) struct PortalConfig {
    pub stage_delays_ms: [u64; 4],
    pub route: String,
}

impl Default for PortalConfig {
    fn default() -> Self {
        PortalConfig {
            stage_delays_ms: [800, 800, 800, 600],
            route: "/client-portal".to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub(crate) struct LoggingConfig {
    pub filter: Option<String>,
}

impl Config {
    pub fn week_window(&self) -> WeekWindow {
        WeekWindow {
            days: self.stats.week_days,
            include_today: self.stats.include_today,
        }
    }

    pub fn stage_delays(&self) -> StageDelays {
        StageDelays::from_millis(self.portal.stage_delays_ms)
    }
}

// ── Functions ─────────────────────────────────────────────────────────────────

/// Read and parse a config file.
///
/// Returns a human-readable error string on failure.
pub(crate) fn read_config(path: &Path) -> Result<Config, String> {
    let content = std::fs::read_to_string(path)
        .map_err(|e| format!("could not read '{}': {}", path.display(), e))?;

    toml::from_str(&content).map_err(|e| format!("could not parse '{}': {}", path.display(), e))
}

/// Load `explicit` if given (it must exist), else `prospector.toml` in the
/// working directory if present, else defaults.
pub(crate) fn load_config(explicit: Option<&Path>) -> Result<Config, String> {
    match explicit {
        Some(path) => read_config(path),
        None => {
            let default = Path::new(DEFAULT_CONFIG);
            if default.exists() {
                read_config(default)
            } else {
                Ok(Config::default())
            }
        }
    }
}
