//! Transit API response DTOs.
//!
//! These map directly to the JSON returned by the `locations` and
//! `stationboard` endpoints. Everything is optional because the API
//! sends `null` for unknown values and omits fields for some results
//! (street addresses in `locations` have no station id, for example).

use serde::Deserialize;

/// Response from `GET /locations`.
#[derive(Debug, Clone, Deserialize)]
pub struct LocationsResponse {
    /// Matching stations, closest first.
    pub stations: Option<Vec<StationDto>>,
}

/// A station (or address) returned by the `locations` endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct StationDto {
    /// Stable station identifier (e.g. "8507000"). Absent for addresses.
    pub id: Option<String>,

    /// Human-readable name.
    pub name: Option<String>,

    /// Distance from the query point in metres, when the API reports it.
    pub distance: Option<f64>,
}

/// Response from `GET /stationboard`.
///
/// Entries are kept as raw JSON so that one entry of an unexpected shape
/// can be dropped without discarding the rest of the board.
#[derive(Debug, Clone, Deserialize)]
pub struct StationboardResponse {
    /// The board station.
    pub station: Option<StationDto>,

    /// Upcoming departures, in the order the API returned them.
    pub stationboard: Option<Vec<serde_json::Value>>,
}

/// One departure on the station board.
#[derive(Debug, Clone, Deserialize)]
pub struct StationboardEntry {
    /// Vehicle category (e.g. "IR", "S", "B", "T").
    pub category: Option<String>,

    /// Line number within the category (e.g. "15").
    pub number: Option<String>,

    /// Final destination.
    pub to: Option<String>,

    /// Departure details at the board station.
    pub stop: Option<StopDto>,
}

/// Departure details for the board station.
#[derive(Debug, Clone, Deserialize)]
pub struct StopDto {
    /// ISO 8601 departure time with offset, e.g. "2024-03-15T14:05:00+0100".
    pub departure: Option<String>,

    /// Platform or stand.
    pub platform: Option<String>,

    /// Delay in minutes.
    pub delay: Option<i32>,
}
