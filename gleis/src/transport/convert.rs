//! Conversion from transit API DTOs to domain types.

use chrono::{DateTime, FixedOffset};
use serde::Deserialize;
use tracing::debug;

use crate::domain::Connection;

use super::types::{StationDto, StationboardEntry};

/// Error converting a single board entry.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConversionError {
    /// Missing required field
    #[error("missing required field: {0}")]
    MissingField(&'static str),

    /// Departure time could not be parsed
    #[error("invalid departure time: {0}")]
    InvalidTime(String),

    /// Entry did not have the expected shape
    #[error("malformed entry: {0}")]
    Malformed(String),
}

/// Pick the closest station that has a usable identifier.
///
/// The API orders results by distance, but some results are street
/// addresses without an id; those are skipped.
pub fn nearest_station(stations: &[StationDto]) -> Option<&StationDto> {
    stations
        .iter()
        .find(|s| s.id.as_deref().is_some_and(|id| !id.trim().is_empty()))
}

/// Convert every parseable entry of a station board.
///
/// Entries that cannot be converted are logged and skipped; they never
/// affect their siblings.
pub fn convert_stationboard(entries: &[serde_json::Value]) -> Vec<Connection> {
    entries
        .iter()
        .filter_map(|raw| match convert_raw_entry(raw) {
            Ok(connection) => Some(connection),
            Err(e) => {
                debug!(error = %e, "skipping stationboard entry");
                None
            }
        })
        .collect()
}

fn convert_raw_entry(raw: &serde_json::Value) -> Result<Connection, ConversionError> {
    let entry = StationboardEntry::deserialize(raw)
        .map_err(|e| ConversionError::Malformed(e.to_string()))?;
    convert_entry(&entry)
}

/// Convert a single board entry.
pub fn convert_entry(entry: &StationboardEntry) -> Result<Connection, ConversionError> {
    let stop = entry.stop.as_ref().ok_or(ConversionError::MissingField("stop"))?;

    let departure = stop
        .departure
        .as_deref()
        .filter(|s| !s.is_empty())
        .ok_or(ConversionError::MissingField("stop.departure"))?;
    let departure_time = parse_departure_time(departure)?;

    let destination = entry
        .to
        .clone()
        .ok_or(ConversionError::MissingField("to"))?;

    Ok(Connection {
        destination,
        departure_time,
        line: line_name(entry.category.as_deref(), entry.number.as_deref()),
        platform: stop.platform.clone().filter(|p| !p.trim().is_empty()),
        delay: stop.delay,
    })
}

/// Join category and number into a line label, e.g. `"IR 15"`.
pub fn line_name(category: Option<&str>, number: Option<&str>) -> String {
    format!("{} {}", category.unwrap_or(""), number.unwrap_or(""))
        .trim()
        .to_string()
}

/// Parse an ISO 8601 timestamp with offset.
///
/// The API writes offsets without a colon (`+0100`); RFC 3339 style
/// (`+01:00`, `Z`) is accepted too.
pub fn parse_departure_time(s: &str) -> Result<DateTime<FixedOffset>, ConversionError> {
    DateTime::parse_from_rfc3339(s)
        .or_else(|_| DateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S%z"))
        .map_err(|_| ConversionError::InvalidTime(s.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn station(id: Option<&str>, name: &str) -> StationDto {
        StationDto {
            id: id.map(str::to_string),
            name: Some(name.to_string()),
            distance: None,
        }
    }

    #[test]
    fn nearest_station_skips_entries_without_id() {
        let stations = vec![
            station(None, "A"),
            station(Some(""), "Address"),
            station(Some("8500010"), "B"),
            station(Some("8500020"), "C"),
        ];

        let chosen = nearest_station(&stations).unwrap();
        assert_eq!(chosen.id.as_deref(), Some("8500010"));
        assert_eq!(chosen.name.as_deref(), Some("B"));
    }

    #[test]
    fn nearest_station_none_when_all_invalid() {
        assert!(nearest_station(&[]).is_none());
        assert!(nearest_station(&[station(None, "A")]).is_none());
    }

    #[test]
    fn line_name_joins_and_trims() {
        assert_eq!(line_name(Some("IR"), Some("15")), "IR 15");
        assert_eq!(line_name(Some("S"), None), "S");
        assert_eq!(line_name(None, Some("10")), "10");
        assert_eq!(line_name(None, None), "");
    }

    #[test]
    fn parses_offsets_with_and_without_colon() {
        let a = parse_departure_time("2024-03-15T14:05:00+0100").unwrap();
        let b = parse_departure_time("2024-03-15T14:05:00+01:00").unwrap();
        let c = parse_departure_time("2024-03-15T13:05:00Z").unwrap();
        assert_eq!(a, b);
        assert_eq!(a, c);
        assert_eq!(a.offset().local_minus_utc(), 3600);
    }

    #[test]
    fn rejects_naive_and_garbage_times() {
        assert!(parse_departure_time("2024-03-15T14:05:00").is_err());
        assert!(parse_departure_time("14:05").is_err());
        assert!(parse_departure_time("").is_err());
    }

    #[test]
    fn converts_full_entry() {
        let raw = json!({
            "category": "IR",
            "number": "15",
            "to": "Luzern",
            "stop": {
                "departure": "2024-03-15T14:05:00+0100",
                "platform": "7",
                "delay": 3
            }
        });

        let connections = convert_stationboard(&[raw]);
        assert_eq!(connections.len(), 1);

        let conn = &connections[0];
        assert_eq!(conn.line, "IR 15");
        assert_eq!(conn.destination, "Luzern");
        assert_eq!(conn.platform.as_deref(), Some("7"));
        assert_eq!(conn.delay, Some(3));
        assert_eq!(
            conn.departure_time,
            parse_departure_time("2024-03-15T14:05:00+01:00").unwrap()
        );
    }

    #[test]
    fn optional_fields_stay_absent() {
        let raw = json!({
            "category": "B",
            "number": "10",
            "to": "Wankdorf",
            "stop": { "departure": "2024-03-15T14:05:00+0100", "platform": null, "delay": null }
        });

        let conn = &convert_stationboard(&[raw])[0];
        assert_eq!(conn.platform, None);
        assert_eq!(conn.delay, None);
    }

    #[test]
    fn empty_platform_is_absent() {
        let raw = json!({
            "to": "Thun",
            "stop": { "departure": "2024-03-15T14:05:00+0100", "platform": "" }
        });

        assert_eq!(convert_stationboard(&[raw])[0].platform, None);
    }

    #[test]
    fn bad_entries_are_skipped_individually() {
        let entries = vec![
            json!({ "category": "IR", "number": "15", "to": "Luzern",
                    "stop": { "departure": "2024-03-15T14:05:00+0100" } }),
            // No departure time
            json!({ "category": "S", "number": "1", "to": "Thun", "stop": { "departure": null } }),
            // Empty departure time
            json!({ "category": "S", "number": "2", "to": "Thun", "stop": { "departure": "" } }),
            // Unparseable departure time
            json!({ "category": "S", "number": "3", "to": "Thun", "stop": { "departure": "soon" } }),
            // No destination
            json!({ "category": "S", "number": "4", "stop": { "departure": "2024-03-15T14:06:00+0100" } }),
            // No stop at all
            json!({ "category": "S", "number": "5", "to": "Thun" }),
            // Wrong shape
            json!({ "category": 12, "to": "Thun", "stop": { "departure": "2024-03-15T14:07:00+0100" } }),
            json!("not an object"),
            json!({ "category": "RE", "number": "", "to": "Olten",
                    "stop": { "departure": "2024-03-15T14:10:00+0100", "delay": 0 } }),
        ];

        let connections = convert_stationboard(&entries);
        let lines: Vec<_> = connections.iter().map(|c| c.line.as_str()).collect();
        assert_eq!(lines, vec!["IR 15", "RE"]);
    }

    #[test]
    fn convert_entry_reports_missing_fields() {
        let entry = StationboardEntry {
            category: Some("IC".into()),
            number: Some("1".into()),
            to: None,
            stop: None,
        };
        assert_eq!(
            convert_entry(&entry),
            Err(ConversionError::MissingField("stop"))
        );
    }
}
