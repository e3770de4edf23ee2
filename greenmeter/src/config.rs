//! Runtime configuration
//!
//! Two environment variables, read once at startup:
//! - `PROMETHEUS_URL` - base address of a Prometheus-compatible API
//! - `PULL_DURATION` - poll interval in seconds (default 60)

use log::debug;
use std::time::Duration;

/// Environment variable holding the metrics backend address
pub const ENV_PROMETHEUS_URL: &str = "PROMETHEUS_URL";

/// Environment variable holding the poll interval in seconds
pub const ENV_PULL_DURATION: &str = "PULL_DURATION";

/// Series queried on every poll
pub const METRIC_NAME: &str = "entsoe_generation_eco";

/// Poll interval used when `PULL_DURATION` is unset or unusable
pub const DEFAULT_PULL_SECS: u64 = 60;

/// Upper bound for a single backend query
pub const QUERY_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// May be empty; the fetcher reports that as a configuration error
    pub prometheus_url: String,
    pub metric_name: String,
    pub pull_period: Duration,
}

impl Config {
    /// Load configuration from the process environment. Never fails.
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`Config::from_env`] over an arbitrary variable source.
    #[must_use]
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let raw_pull = lookup(ENV_PULL_DURATION);
        let pull_secs = parse_pull_secs(raw_pull.as_deref());

        Self {
            prometheus_url: lookup(ENV_PROMETHEUS_URL).unwrap_or_default(),
            metric_name: METRIC_NAME.to_string(),
            pull_period: Duration::from_secs(pull_secs),
        }
    }
}

/// Zero is rejected along with garbage: it would turn the poller into a busy loop.
fn parse_pull_secs(raw: Option<&str>) -> u64 {
    match raw.map(str::parse::<u64>) {
        Some(Ok(secs)) if secs > 0 => secs,
        Some(Ok(_)) => {
            debug!("{ENV_PULL_DURATION}=0, using {DEFAULT_PULL_SECS}s");
            DEFAULT_PULL_SECS
        }
        Some(Err(e)) => {
            debug!("Ignoring {ENV_PULL_DURATION}: {e}");
            DEFAULT_PULL_SECS
        }
        None => DEFAULT_PULL_SECS,
    }
}
