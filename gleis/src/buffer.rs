//! Buffered departures shared between the refresh task and the dashboard.
//!
//! The buffer holds an immutable [`Snapshot`] behind a short-held lock.
//! A refresh builds a complete new snapshot off to the side (all network
//! I/O happens without touching the lock) and swaps it in with a single
//! pointer write, so readers see either the old board or the new one,
//! never a mix. Filtering out departed services and sorting happens on
//! every read, against the wall clock at that moment.

use std::sync::{Arc, PoisonError, RwLock};

use chrono::{DateTime, Local, TimeZone};
use tracing::{debug, warn};

use crate::domain::{Connection, Location};
use crate::locator::{LocationError, LocationProvider};
use crate::transport::{TransitLookup, TransportError};

/// Number of departures requested per refresh.
///
/// Larger than any display limit so the board stays full as services
/// depart between refreshes.
pub const FETCH_LIMIT: usize = 20;

/// Label shown until the location is known.
pub const LOCATING_LABEL: &str = "Locating...";

/// Why a refresh cycle did not replace the buffer.
#[derive(Debug, thiserror::Error)]
pub enum RefreshError {
    /// The location provider failed
    #[error("location lookup failed: {0}")]
    Location(#[from] LocationError),

    /// The departure lookup failed
    #[error("departure lookup failed: {0}")]
    Transport(#[from] TransportError),
}

/// Everything the buffer knows at one point in time.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Snapshot {
    /// Departures from the last successful refresh, in API order.
    pub connections: Vec<Connection>,
    /// The location departures were fetched for.
    pub location: Option<Location>,
}

/// Departure buffer fed by a [`TransitLookup`].
pub struct ConnectionBuffer<T, L> {
    transport: T,
    locator: L,
    state: RwLock<Arc<Snapshot>>,
    /// Serializes refresh cycles so the location is resolved once and
    /// overlapping refreshes cannot publish out of order.
    refresh_lock: tokio::sync::Mutex<()>,
}

impl<T: TransitLookup, L: LocationProvider> ConnectionBuffer<T, L> {
    /// Create an empty buffer.
    pub fn new(transport: T, locator: L) -> Self {
        Self {
            transport,
            locator,
            state: RwLock::new(Arc::new(Snapshot::default())),
            refresh_lock: tokio::sync::Mutex::new(()),
        }
    }

    /// Fetch fresh departures, logging instead of returning failures.
    ///
    /// On failure the previous departures stay in place.
    pub async fn refresh(&self) {
        match self.try_refresh().await {
            Ok(count) => debug!(count, "departure buffer refreshed"),
            Err(e) => warn!("failed to refresh departures: {e}"),
        }
    }

    /// Fetch fresh departures and replace the buffer.
    ///
    /// Resolves the location first if it is not yet known. Returns the
    /// number of departures now buffered. On error nothing is changed.
    pub async fn try_refresh(&self) -> Result<usize, RefreshError> {
        let _guard = self.refresh_lock.lock().await;

        let location = match self.current_location() {
            Some(location) => location,
            None => self.locator.current_location().await?,
        };

        let connections = self
            .transport
            .get_connections(&location, FETCH_LIMIT)
            .await?;
        let count = connections.len();

        self.publish(Snapshot {
            connections,
            location: Some(location),
        });

        Ok(count)
    }

    /// Forget the resolved location so the next refresh asks the
    /// provider again. Buffered departures are kept.
    pub async fn reset_location(&self) {
        let _guard = self.refresh_lock.lock().await;

        let current = self.snapshot();
        self.publish(Snapshot {
            connections: current.connections.clone(),
            location: None,
        });
    }
}

impl<T, L> ConnectionBuffer<T, L> {
    /// The current snapshot.
    pub fn snapshot(&self) -> Arc<Snapshot> {
        self.state
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// The resolved location, if any.
    pub fn current_location(&self) -> Option<Location> {
        self.snapshot().location.clone()
    }

    /// Name of the resolved location, or a placeholder while locating.
    pub fn location_label(&self) -> String {
        self.snapshot()
            .location
            .as_ref()
            .and_then(|l| l.name())
            .filter(|name| !name.is_empty())
            .unwrap_or(LOCATING_LABEL)
            .to_string()
    }

    /// Up to `limit` departures that have not left yet, earliest first.
    pub fn get_displayable(&self, limit: usize) -> Vec<Connection> {
        self.displayable_at(&Local::now(), limit)
    }

    /// Like [`get_displayable`](Self::get_displayable) but against `now`.
    pub fn displayable_at<Tz: TimeZone>(&self, now: &DateTime<Tz>, limit: usize) -> Vec<Connection> {
        upcoming(&self.snapshot().connections, now, limit)
    }

    fn publish(&self, snapshot: Snapshot) {
        *self.state.write().unwrap_or_else(PoisonError::into_inner) = Arc::new(snapshot);
    }
}

/// Departures strictly after `now`, sorted by departure time and
/// truncated to `limit`.
pub fn upcoming<Tz: TimeZone>(
    connections: &[Connection],
    now: &DateTime<Tz>,
    limit: usize,
) -> Vec<Connection> {
    let mut upcoming: Vec<Connection> = connections
        .iter()
        .filter(|c| c.departs_after(now))
        .cloned()
        .collect();

    upcoming.sort_by_key(|c| c.departure_time);
    upcoming.truncate(limit);
    upcoming
}
