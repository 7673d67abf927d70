//! Background refresh of the departure buffer.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::oneshot;
use tokio::task::JoinHandle;
use tracing::{debug, error};

use crate::buffer::ConnectionBuffer;
use crate::locator::LocationProvider;
use crate::transport::TransitLookup;

/// Default time between refreshes.
pub const DEFAULT_REFRESH_INTERVAL: Duration = Duration::from_secs(60);

/// Handle to the background task that keeps the buffer fresh.
///
/// The task waits one interval, refreshes, and repeats; the caller is
/// expected to have done the initial refresh itself. Dropping the handle
/// also stops the task, but only [`stop`](Self::stop) waits for it.
pub struct RefreshScheduler {
    stop: Option<oneshot::Sender<()>>,
    handle: JoinHandle<()>,
}

impl RefreshScheduler {
    /// Spawn the refresh loop on the current Tokio runtime.
    pub fn start<T, L>(buffer: Arc<ConnectionBuffer<T, L>>, interval: Duration) -> Self
    where
        T: TransitLookup + 'static,
        L: LocationProvider + 'static,
    {
        let (stop_tx, mut stop_rx) = oneshot::channel::<()>();

        let handle = tokio::spawn(async move {
            debug!(interval_secs = interval.as_secs(), "refresh scheduler started");
            loop {
                tokio::select! {
                    _ = &mut stop_rx => break,
                    _ = tokio::time::sleep(interval) => {}
                }

                // Cancelling mid-refresh is safe: the buffer only changes
                // once the whole lookup has succeeded.
                tokio::select! {
                    _ = &mut stop_rx => break,
                    _ = buffer.refresh() => {}
                }
            }
            debug!("refresh scheduler stopped");
        });

        Self {
            stop: Some(stop_tx),
            handle,
        }
    }

    /// Signal the task to stop and wait until it has.
    ///
    /// An in-flight refresh is cancelled; the buffer keeps whatever it
    /// held before that refresh started.
    pub async fn stop(mut self) {
        if let Some(stop) = self.stop.take() {
            // The task may already be gone; nothing to signal then.
            let _ = stop.send(());
        }

        if let Err(e) = (&mut self.handle).await {
            error!("refresh scheduler task failed: {e}");
        }
    }
}
