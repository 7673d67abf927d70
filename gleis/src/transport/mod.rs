//! Transit API client.
//!
//! Looking up departures is a two-step process:
//! - resolve the nearest station for a coordinate (`locations`), skipping
//!   results without a station id
//! - fetch that station's departure board (`stationboard`)
//!
//! Board entries are converted one by one; a malformed entry is dropped
//! without affecting the rest of the board.

mod client;
mod convert;
mod error;
mod types;

use std::future::Future;

use crate::domain::{Connection, Location};

pub use client::{TransportClient, TransportConfig};
pub use convert::{
    ConversionError, convert_entry, convert_stationboard, line_name, nearest_station,
    parse_departure_time,
};
pub use error::TransportError;
pub use types::{LocationsResponse, StationDto, StationboardEntry, StationboardResponse, StopDto};

/// Source of upcoming departures near a location.
///
/// Implemented by [`TransportClient`]; tests substitute their own.
pub trait TransitLookup: Send + Sync {
    /// Up to `limit` departures from the station nearest to `location`.
    ///
    /// An empty result means no station was found; network and HTTP
    /// failures are returned as errors.
    fn get_connections(
        &self,
        location: &Location,
        limit: usize,
    ) -> impl Future<Output = Result<Vec<Connection>, TransportError>> + Send;
}
