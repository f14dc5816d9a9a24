//! Acquires the device position and publishes it to the view layer

use std::sync::Arc;

use log::{info, warn};
use tokio::sync::watch;
use tokio::task::JoinHandle;

use super::provider::{LocationProvider, PositionOptions};
use crate::geocode::ReverseGeocode;
use crate::location::PositionFix;

/// Latest known position and its reverse-geocoded address
///
/// Both fields stay `None` when the platform denies or fails the
/// corresponding request.
#[derive(Debug, Clone, Default)]
pub struct LocationState {
    pub position: Option<PositionFix>,
    pub address: Option<String>,
}

pub struct LocationTracker;

impl LocationTracker {
    /// Starts the one-shot acquisition and the continuous subscription
    ///
    /// The one-shot request also resolves the address of the first fix.
    /// Failures on either path are logged and leave the state unset.
    /// Must be called from within a tokio runtime.
    pub fn start<P, G>(provider: P, geocoder: G) -> TrackerHandle
    where
        P: LocationProvider + 'static,
        G: ReverseGeocode + 'static,
    {
        let provider = Arc::new(provider);
        let (tx, rx) = watch::channel(LocationState::default());

        // Deliberately detached: the one-shot platform call has no
        // cancellation, and a late completion lands in a channel nobody
        // reads once the handle is gone.
        let oneshot_tx = tx.clone();
        let oneshot_provider = Arc::clone(&provider);
        tokio::spawn(async move {
            let options = PositionOptions::default();
            match oneshot_provider.current_position(&options).await {
                Ok(fix) => {
                    info!("location permission granted");
                    oneshot_tx.send_modify(|state| state.position = Some(fix.clone()));
                    match geocoder.reverse(fix.point()).await {
                        Ok(address) => {
                            oneshot_tx.send_modify(|state| state.address = Some(address));
                        }
                        Err(e) => warn!("reverse geocoding failed: {e}"),
                    }
                }
                Err(e) => warn!("could not determine current position: {e}"),
            }
        });

        let watch_tx = tx;
        let watch_task = tokio::spawn(async move {
            let options = PositionOptions::default();
            let mut updates = match provider.watch_position(&options).await {
                Ok(watch) => watch,
                Err(e) => {
                    warn!("position watch unavailable: {e}");
                    return;
                }
            };

            while let Some(fix) = updates.next().await {
                watch_tx.send_modify(|state| state.position = Some(fix));
            }
        });

        TrackerHandle {
            state: rx,
            watch_task: Some(watch_task),
        }
    }
}

/// Owns the continuous subscription; dropping the handle cancels it
pub struct TrackerHandle {
    state: watch::Receiver<LocationState>,
    watch_task: Option<JoinHandle<()>>,
}

impl TrackerHandle {
    /// Latest published state
    pub fn state(&self) -> LocationState {
        self.state.borrow().clone()
    }

    /// Channel observing every state replacement
    pub fn subscribe(&self) -> watch::Receiver<LocationState> {
        self.state.clone()
    }

    /// Stops the continuous subscription
    pub fn stop(&mut self) {
        if let Some(task) = self.watch_task.take() {
            task.abort();
        }
    }
}

impl Drop for TrackerHandle {
    fn drop(&mut self) {
        self.stop();
    }
}
