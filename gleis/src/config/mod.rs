//! Configuration: where the dashboard is, and how it runs.
//!
//! The location comes from a fixed chain of sources tried in priority
//! order (local file, boot partition file, environment, built-in
//! default). Runtime tuning such as refresh cadence and API endpoint
//! lives in [`Settings`].

mod settings;
mod sources;

use tracing::{info, warn};

use crate::domain::Location;

pub use settings::{
    DEFAULT_LOG_FILE, ENV_API_URL, ENV_DISPLAY_LIMIT, ENV_LOCATE, ENV_LOG_FILE, ENV_REFRESH_SECS,
    Settings, log_file_from_env,
};
pub use sources::{
    ConfigSource, ENV_LAT, ENV_LON, ENV_NAME, EnvSource, FallbackSource, FileSource,
};

/// Station file in the working directory (development).
pub const LOCAL_STATION_FILE: &str = "station.json";

/// Station file on the boot partition (embedded deployments).
pub const BOOT_STATION_FILE: &str = "/boot/station.json";

/// Resolves the configured location from an ordered list of sources.
pub struct ConfigResolver {
    sources: Vec<Box<dyn ConfigSource>>,
}

impl ConfigResolver {
    /// Create a resolver trying `sources` in order.
    pub fn new(sources: Vec<Box<dyn ConfigSource>>) -> Self {
        Self { sources }
    }

    /// The standard chain: local file, boot partition, environment, fallback.
    pub fn standard() -> Self {
        Self::new(vec![
            Box::new(FileSource::new(LOCAL_STATION_FILE, "local file")),
            Box::new(FileSource::new(BOOT_STATION_FILE, "boot partition")),
            Box::new(EnvSource::new()),
            Box::new(FallbackSource),
        ])
    }

    /// Return the location from the first source that has one.
    ///
    /// Never fails: if every source abstains, the built-in fallback
    /// location is used.
    pub fn resolve(&self) -> Location {
        for source in &self.sources {
            if let Some(location) = source.load() {
                if source.is_fallback() {
                    warn!("no configuration found, using fallback location {location}");
                } else {
                    info!(source = source.name(), "configuration loaded: {location}");
                }
                return location;
            }
        }

        let location = FallbackSource::location();
        warn!("no configuration source produced a location, using {location}");
        location
    }
}

impl Default for ConfigResolver {
    fn default() -> Self {
        Self::standard()
    }
}
