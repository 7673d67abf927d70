//! Individual location sources consulted by the resolver.

use std::io;
use std::path::PathBuf;

use serde::Deserialize;
use tracing::{debug, warn};

use crate::domain::Location;

/// Environment variable holding the latitude.
pub const ENV_LAT: &str = "GLEIS_LAT";

/// Environment variable holding the longitude.
pub const ENV_LON: &str = "GLEIS_LON";

/// Environment variable holding the optional display name.
pub const ENV_NAME: &str = "GLEIS_NAME";

/// Name used when a station file omits one.
const DEFAULT_FILE_NAME: &str = "My Station";

/// Name used when `GLEIS_NAME` is unset.
const DEFAULT_ENV_NAME: &str = "Unknown";

/// Something that may be able to supply the configured location.
///
/// A source that cannot produce a location returns `None` and the
/// resolver moves on to the next one; abstaining is never an error.
pub trait ConfigSource: Send + Sync {
    /// Try to produce a location.
    fn load(&self) -> Option<Location>;

    /// Human-readable name used in log messages.
    fn name(&self) -> &str;

    /// Whether this source is the last-resort default.
    fn is_fallback(&self) -> bool {
        false
    }
}

/// Contents of a `station.json` file.
#[derive(Debug, Deserialize)]
struct StationFile {
    lat: f64,
    lon: f64,
    #[serde(default)]
    name: Option<String>,
}

/// Reads `{ "lat": .., "lon": .., "name": .. }` from a JSON file.
#[derive(Debug, Clone)]
pub struct FileSource {
    path: PathBuf,
    name: String,
}

impl FileSource {
    /// Create a file source reading from `path`, logged as `name`.
    pub fn new(path: impl Into<PathBuf>, name: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            name: name.into(),
        }
    }
}

impl ConfigSource for FileSource {
    fn load(&self) -> Option<Location> {
        let contents = match std::fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                debug!(path = %self.path.display(), "no station file");
                return None;
            }
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "failed to read station file");
                return None;
            }
        };

        match serde_json::from_str::<StationFile>(&contents) {
            Ok(file) => Some(Location {
                latitude: file.lat,
                longitude: file.lon,
                name: Some(file.name.unwrap_or_else(|| DEFAULT_FILE_NAME.to_string())),
            }),
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "invalid station file");
                None
            }
        }
    }

    fn name(&self) -> &str {
        &self.name
    }
}

type EnvLookup = Box<dyn Fn(&str) -> Option<String> + Send + Sync>;

/// Reads the location from `GLEIS_LAT`, `GLEIS_LON` and `GLEIS_NAME`.
pub struct EnvSource {
    lookup: EnvLookup,
}

impl EnvSource {
    /// Read from the process environment.
    pub fn new() -> Self {
        Self::with_lookup(|key| std::env::var(key).ok())
    }

    /// Read variables through `lookup` instead of the process environment.
    pub fn with_lookup(lookup: impl Fn(&str) -> Option<String> + Send + Sync + 'static) -> Self {
        Self {
            lookup: Box::new(lookup),
        }
    }

    fn coordinate(&self, key: &str) -> Option<f64> {
        let raw = (self.lookup)(key)?;
        let raw = raw.trim();
        if raw.is_empty() {
            return None;
        }

        match raw.parse::<f64>() {
            Ok(value) if value.is_finite() => Some(value),
            _ => {
                warn!(variable = key, value = raw, "ignoring non-numeric coordinate");
                None
            }
        }
    }
}

impl Default for EnvSource {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigSource for EnvSource {
    fn load(&self) -> Option<Location> {
        let latitude = self.coordinate(ENV_LAT)?;
        let longitude = self.coordinate(ENV_LON)?;
        let name = (self.lookup)(ENV_NAME).unwrap_or_else(|| DEFAULT_ENV_NAME.to_string());

        Some(Location {
            latitude,
            longitude,
            name: Some(name),
        })
    }

    fn name(&self) -> &str {
        "environment variables"
    }
}

/// Always yields a fixed location in Bern.
#[derive(Debug, Clone, Copy, Default)]
pub struct FallbackSource;

impl FallbackSource {
    pub const LATITUDE: f64 = 46.9480;
    pub const LONGITUDE: f64 = 7.4474;
    pub const NAME: &'static str = "Bern (Fallback)";

    /// The fallback location itself.
    pub fn location() -> Location {
        Location::new(Self::LATITUDE, Self::LONGITUDE).with_name(Self::NAME)
    }
}

impl ConfigSource for FallbackSource {
    fn load(&self) -> Option<Location> {
        Some(Self::location())
    }

    fn name(&self) -> &str {
        "default fallback"
    }

    fn is_fallback(&self) -> bool {
        true
    }
}
