//! Diagnostic logging to stderr.

use tracing_subscriber::{filter::EnvFilter, layer::SubscriberExt, Registry};

pub(crate) const LOG_ENV: &str = "PROSPECTOR_LOG";
const FALLBACK_FILTER: &str = "warn";

/// Filter directive: `PROSPECTOR_LOG`, then the config value, then `warn`.
fn directive(from_env: Option<String>, from_config: Option<&str>) -> String {
    from_env
        .filter(|s| !s.trim().is_empty())
        .or_else(|| from_config.map(str::to_string))
        .unwrap_or_else(|| FALLBACK_FILTER.to_string())
}

/// Install the global subscriber. Safe to call more than once; later
/// calls are ignored.
pub(crate) fn init(config_filter: Option<&str>) {
    let directive = directive(std::env::var(LOG_ENV).ok(), config_filter);
    let filter = EnvFilter::try_new(&directive).unwrap_or_else(|_| EnvFilter::new(FALLBACK_FILTER));
    let subscriber = Registry::default().with(filter).with(
        tracing_subscriber::fmt::layer()
            .with_writer(std::io::stderr)
            .with_target(false),
    );
    tracing::subscriber::set_global_default(subscriber).ok();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn env_wins_over_config() {
        assert_eq!(
            directive(Some("prospector=trace".into()), Some("info")),
            "prospector=trace"
        );
    }

    #[test]
    fn config_then_fallback() {
        assert_eq!(directive(None, Some("info")), "info");
        assert_eq!(directive(Some("  ".into()), None), "warn");
        assert_eq!(directive(None, None), "warn");
    }
}
