//! Current-location providers.
//!
//! The dashboard asks a [`LocationProvider`] where it is before the first
//! departure lookup. The static provider simply returns the configured
//! location; the IP provider asks a geolocation service and may fail or
//! take a while, so callers always treat the call as fallible.

use std::future::Future;

use serde::Deserialize;

use crate::config::Settings;
use crate::domain::Location;

/// Default IP geolocation endpoint.
const DEFAULT_IP_API_URL: &str = "http://ip-api.com/json";

/// Errors from a location provider.
#[derive(Debug, thiserror::Error)]
pub enum LocationError {
    /// HTTP request failed
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Geolocation service returned an error status
    #[error("API error {status}: {message}")]
    Api { status: u16, message: String },

    /// Failed to parse the geolocation response
    #[error("JSON parse error: {message}")]
    Json { message: String },
}

/// Supplies the location departures are looked up for.
pub trait LocationProvider: Send + Sync {
    /// Where the dashboard currently is.
    fn current_location(&self) -> impl Future<Output = Result<Location, LocationError>> + Send;
}

/// Always returns the location it was built with.
#[derive(Debug, Clone)]
pub struct StaticLocationProvider {
    location: Location,
}

impl StaticLocationProvider {
    pub fn new(location: Location) -> Self {
        Self { location }
    }
}

impl LocationProvider for StaticLocationProvider {
    async fn current_location(&self) -> Result<Location, LocationError> {
        Ok(self.location.clone())
    }
}

/// Response from ip-api.com.
#[derive(Debug, Deserialize)]
struct IpApiResponse {
    lat: f64,
    lon: f64,
    city: Option<String>,
}

/// Locates the machine from its public IP address.
#[derive(Debug, Clone)]
pub struct IpLocationProvider {
    http: reqwest::Client,
    url: String,
}

impl IpLocationProvider {
    /// Create a provider using ip-api.com.
    pub fn new(timeout_secs: u64) -> Result<Self, LocationError> {
        Self::with_url(DEFAULT_IP_API_URL, timeout_secs)
    }

    /// Create a provider querying a custom endpoint.
    pub fn with_url(url: impl Into<String>, timeout_secs: u64) -> Result<Self, LocationError> {
        let http = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(timeout_secs))
            .build()?;

        Ok(Self {
            http,
            url: url.into(),
        })
    }
}

impl LocationProvider for IpLocationProvider {
    async fn current_location(&self) -> Result<Location, LocationError> {
        let response = self.http.get(&self.url).send().await?;
        let status = response.status();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(LocationError::Api {
                status: status.as_u16(),
                message: body,
            });
        }

        let body = response.text().await?;
        parse_ip_response(&body)
    }
}

/// The provider selected by [`Settings`](crate::config::Settings).
#[derive(Debug, Clone)]
pub enum Locator {
    Static(StaticLocationProvider),
    Ip(IpLocationProvider),
}

impl Locator {
    /// Pick the provider for `settings`.
    ///
    /// `configured` is only called when the configured location is used,
    /// so the config chain is not consulted in IP mode.
    pub fn from_settings(
        settings: &Settings,
        configured: impl FnOnce() -> Location,
    ) -> Result<Self, LocationError> {
        if settings.locate_by_ip {
            Ok(Self::Ip(IpLocationProvider::new(settings.transport.timeout_secs)?))
        } else {
            Ok(Self::Static(StaticLocationProvider::new(configured())))
        }
    }
}

impl LocationProvider for Locator {
    async fn current_location(&self) -> Result<Location, LocationError> {
        match self {
            Self::Static(provider) => provider.current_location().await,
            Self::Ip(provider) => provider.current_location().await,
        }
    }
}

fn parse_ip_response(body: &str) -> Result<Location, LocationError> {
    let response: IpApiResponse = serde_json::from_str(body).map_err(|e| LocationError::Json {
        message: e.to_string(),
    })?;

    Ok(Location::new(response.lat, response.lon)
        .with_name(response.city.unwrap_or_else(|| "Unknown Location".to_string())))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn static_provider_returns_configured_location() {
        let loc = Location::new(46.948, 7.4474).with_name("Bern");
        let provider = StaticLocationProvider::new(loc.clone());

        assert_eq!(provider.current_location().await.unwrap(), loc);
        assert_eq!(provider.current_location().await.unwrap(), loc);
    }

    #[tokio::test]
    async fn static_mode_uses_configured_location() {
        let bern = Location::new(46.948, 7.4474).with_name("Bern");
        let locator = Locator::from_settings(&Settings::default(), || bern.clone()).unwrap();

        assert!(matches!(locator, Locator::Static(_)));
        assert_eq!(locator.current_location().await.unwrap(), bern);
    }

    #[test]
    fn ip_mode_skips_config_chain() {
        let settings = Settings {
            locate_by_ip: true,
            ..Settings::default()
        };
        let locator = Locator::from_settings(&settings, || -> Location {
            panic!("configured location resolved in IP mode")
        })
        .unwrap();

        assert!(matches!(locator, Locator::Ip(_)));
    }

    #[test]
    fn parses_ip_api_response() {
        let body = r#"{"status":"success","country":"Switzerland","city":"Basel","lat":47.5584,"lon":7.5733}"#;
        let loc = parse_ip_response(body).unwrap();
        assert_eq!(loc, Location::new(47.5584, 7.5733).with_name("Basel"));
    }

    #[test]
    fn ip_response_without_city() {
        let loc = parse_ip_response(r#"{"lat":1.5,"lon":2.5}"#).unwrap();
        assert_eq!(loc.name(), Some("Unknown Location"));
    }

    #[test]
    fn ip_response_without_coordinates_is_an_error() {
        let err = parse_ip_response(r#"{"status":"fail","message":"private range"}"#).unwrap_err();
        assert!(matches!(err, LocationError::Json { .. }));
    }
}
