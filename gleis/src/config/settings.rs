//! Runtime settings read from the environment.

use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use tracing::warn;

use crate::scheduler::DEFAULT_REFRESH_INTERVAL;
use crate::transport::TransportConfig;
use crate::ui::DEFAULT_RENDER_INTERVAL;

pub const ENV_API_URL: &str = "GLEIS_API_URL";
pub const ENV_REFRESH_SECS: &str = "GLEIS_REFRESH_SECS";
pub const ENV_DISPLAY_LIMIT: &str = "GLEIS_DISPLAY_LIMIT";
pub const ENV_LOG_FILE: &str = "GLEIS_LOG_FILE";
pub const ENV_LOCATE: &str = "GLEIS_LOCATE";

/// Log file used when `GLEIS_LOG_FILE` is unset.
pub const DEFAULT_LOG_FILE: &str = "gleis.log";

/// How the dashboard runs, independent of where it is.
#[derive(Debug, Clone)]
pub struct Settings {
    /// Time between departure refreshes.
    pub refresh_interval: Duration,
    /// Time between redraws.
    pub render_interval: Duration,
    /// Maximum number of rows on the board.
    pub display_limit: usize,
    /// Where log output goes while the board owns the terminal.
    pub log_file: PathBuf,
    /// Transit API endpoint and timeout.
    pub transport: TransportConfig,
    /// Find the location by public IP instead of the configured one.
    pub locate_by_ip: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            refresh_interval: DEFAULT_REFRESH_INTERVAL,
            render_interval: DEFAULT_RENDER_INTERVAL,
            display_limit: 10,
            log_file: PathBuf::from(DEFAULT_LOG_FILE),
            transport: TransportConfig::default(),
            locate_by_ip: false,
        }
    }
}

impl Settings {
    /// Read settings from the process environment.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read settings through `lookup`; unset or invalid values keep
    /// their defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut settings = Self::default();
        let value = |key: &str| {
            lookup(key)
                .map(|raw| raw.trim().to_string())
                .filter(|raw| !raw.is_empty())
        };

        if let Some(url) = value(ENV_API_URL) {
            settings.transport = settings.transport.with_base_url(url);
        }
        if let Some(secs) = value(ENV_REFRESH_SECS).and_then(|raw| positive(ENV_REFRESH_SECS, &raw)) {
            settings.refresh_interval = Duration::from_secs(secs);
        }
        if let Some(limit) = value(ENV_DISPLAY_LIMIT).and_then(|raw| positive(ENV_DISPLAY_LIMIT, &raw)) {
            settings.display_limit = limit;
        }
        settings.log_file = log_file_from(&lookup);
        if let Some(mode) = value(ENV_LOCATE) {
            match mode.to_ascii_lowercase().as_str() {
                "ip" => settings.locate_by_ip = true,
                "config" | "static" => {}
                _ => warn!(
                    variable = ENV_LOCATE,
                    value = %mode,
                    "unknown locate mode, using configured location"
                ),
            }
        }

        settings
    }
}

/// The log file named by `GLEIS_LOG_FILE`.
///
/// Read on its own so logging can start before the rest of the settings
/// are parsed.
pub fn log_file_from_env() -> PathBuf {
    log_file_from(|key| std::env::var(key).ok())
}

fn log_file_from(lookup: impl Fn(&str) -> Option<String>) -> PathBuf {
    lookup(ENV_LOG_FILE)
        .map(|raw| raw.trim().to_string())
        .filter(|raw| !raw.is_empty())
        .map_or_else(|| PathBuf::from(DEFAULT_LOG_FILE), PathBuf::from)
}

fn positive<N>(key: &str, raw: &str) -> Option<N>
where
    N: FromStr + PartialOrd + Default,
{
    match raw.parse::<N>() {
        Ok(value) if value > N::default() => Some(value),
        _ => {
            warn!(variable = key, value = raw, "expected a positive integer, using default");
            None
        }
    }
}
