//! Geographic location used for station lookups.

use std::fmt;

/// A point on the map, optionally labelled with a human-readable name.
///
/// Locations are plain values: two locations are the same if their
/// coordinates and names are equal.
///
/// # Examples
///
/// ```
/// use gleis::domain::Location;
///
/// let bern = Location::new(46.9480, 7.4474).with_name("Bern");
/// assert_eq!(bern.name(), Some("Bern"));
/// assert_eq!(bern.to_string(), "Bern (46.9480, 7.4474)");
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Location {
    /// Latitude in decimal degrees (WGS 84).
    pub latitude: f64,
    /// Longitude in decimal degrees (WGS 84).
    pub longitude: f64,
    /// Display name, if known.
    pub name: Option<String>,
}

impl Location {
    /// Create an unnamed location.
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
            name: None,
        }
    }

    /// Attach a display name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// The display name, if one was given.
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.name {
            Some(name) => write!(f, "{name} ({:.4}, {:.4})", self.latitude, self.longitude),
            None => write!(f, "({:.4}, {:.4})", self.latitude, self.longitude),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_sets_name() {
        let loc = Location::new(47.3769, 8.5417).with_name("Zürich HB");
        assert_eq!(loc.latitude, 47.3769);
        assert_eq!(loc.longitude, 8.5417);
        assert_eq!(loc.name(), Some("Zürich HB"));
    }

    #[test]
    fn unnamed_by_default() {
        assert_eq!(Location::new(0.0, 0.0).name(), None);
    }

    #[test]
    fn display() {
        let loc = Location::new(46.948, 7.4474);
        assert_eq!(loc.to_string(), "(46.9480, 7.4474)");
    }

    #[test]
    fn value_equality() {
        let a = Location::new(46.948, 7.4474).with_name("Bern");
        let b = Location::new(46.948, 7.4474).with_name("Bern");
        let c = Location::new(46.948, 7.4474);
        assert_eq!(a, b);
        assert_ne!(a, c);
    }
}
