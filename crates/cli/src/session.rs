//! Opening a dashboard session from config and seed file.

use std::path::Path;

use prospector_core::SystemClock;
use prospector_pipeline::{Dashboard, SessionSeed};

use crate::config::Config;

/// Load the seed at `data` and build a dashboard with the configured week
/// window and reference date.
pub(crate) fn open(data: &Path, config: &Config) -> Result<Dashboard, String> {
    let content = std::fs::read_to_string(data)
        .map_err(|e| format!("error reading file '{}': {}", data.display(), e))?;
    let seed = SessionSeed::from_json_str(&content)
        .map_err(|e| format!("error loading session '{}': {}", data.display(), e))?;
    let dashboard = Dashboard::from_seed(seed, Box::new(SystemClock))
        .map_err(|e| format!("error loading session '{}': {}", data.display(), e))?
        .with_week_window(config.week_window());
    tracing::debug!(data = %data.display(), "session loaded");
    Ok(match config.session.reference_date {
        Some(date) => dashboard.with_reference_date(date),
        None => dashboard,
    })
}
