//! Transit API HTTP client.
//!
//! Resolves the nearest station for a coordinate and fetches its
//! departure board from the Swiss public transport API
//! (transport.opendata.ch).

use serde::de::DeserializeOwned;
use tracing::{info, warn};

use crate::domain::{Connection, Location};

use super::TransitLookup;
use super::convert::{convert_stationboard, nearest_station};
use super::error::TransportError;
use super::types::{LocationsResponse, StationDto, StationboardResponse};

/// Default base URL for the transit API.
const DEFAULT_BASE_URL: &str = "http://transport.opendata.ch/v1";

/// Default request timeout in seconds.
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Configuration for the transit client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransportConfig {
    /// Base URL for the API (defaults to transport.opendata.ch)
    pub base_url: String,
    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl TransportConfig {
    /// Create a config pointing at the public API.
    pub fn new() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }

    /// Set a custom base URL (for testing or a proxy).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into().trim_end_matches('/').to_string();
        self
    }

    /// Set request timeout.
    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }
}

impl Default for TransportConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Transit API client.
#[derive(Debug, Clone)]
pub struct TransportClient {
    http: reqwest::Client,
    base_url: String,
}

impl TransportClient {
    /// Create a new client with the given configuration.
    pub fn new(config: TransportConfig) -> Result<Self, TransportError> {
        let http = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            http,
            base_url: config.base_url,
        })
    }

    /// Stations near `location`, closest first.
    ///
    /// Only station-type results are requested, but entries without an
    /// id may still appear and are left for the caller to filter.
    pub async fn nearby_stations(
        &self,
        location: &Location,
    ) -> Result<Vec<StationDto>, TransportError> {
        // The API calls latitude "x" and longitude "y".
        let response: LocationsResponse = self
            .get_json(
                "locations",
                &[
                    ("x", location.latitude.to_string()),
                    ("y", location.longitude.to_string()),
                    ("type", "station".to_string()),
                ],
            )
            .await?;

        Ok(response.stations.unwrap_or_default())
    }

    /// Up to `limit` upcoming departures from the station with `station_id`.
    ///
    /// Entries that cannot be parsed are dropped individually.
    pub async fn stationboard(
        &self,
        station_id: &str,
        limit: usize,
    ) -> Result<Vec<Connection>, TransportError> {
        let response: StationboardResponse = self
            .get_json(
                "stationboard",
                &[("id", station_id.to_string()), ("limit", limit.to_string())],
            )
            .await?;

        let entries = response.stationboard.unwrap_or_default();
        Ok(convert_stationboard(&entries))
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        query: &[(&str, String)],
    ) -> Result<T, TransportError> {
        let url = format!("{}/{}", self.base_url, endpoint);

        let response = self.http.get(&url).query(query).send().await?;
        let status = response.status();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(TransportError::Api {
                status: status.as_u16(),
                message: body.chars().take(500).collect(),
            });
        }

        let body = response.text().await?;

        serde_json::from_str(&body).map_err(|e| TransportError::Json {
            message: e.to_string(),
        })
    }
}

impl TransitLookup for TransportClient {
    async fn get_connections(
        &self,
        location: &Location,
        limit: usize,
    ) -> Result<Vec<Connection>, TransportError> {
        let stations = self.nearby_stations(location).await?;

        let Some(station) = nearest_station(&stations) else {
            warn!(%location, "no valid stations found near location");
            return Ok(Vec::new());
        };

        // nearest_station only returns stations with an id
        let station_id = station.id.as_deref().unwrap_or_default();
        info!(
            station = station.name.as_deref().unwrap_or("Unknown"),
            id = station_id,
            "using station"
        );

        self.stationboard(station_id, limit).await
    }
}
