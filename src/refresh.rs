//! Background rate refresh
//!
//! Runs rate loads on a tokio task so the terminal loop never blocks on the
//! network, and reports results to the application over a channel. While the
//! last load was served from cache (offline), a connectivity probe retries
//! whenever the cached snapshot is missing or older than its TTL.

use log::debug;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::time::MissedTickBehavior;

use crate::data::{LoadedRates, RateLoader};

/// Messages sent from background refresh to main app
#[derive(Debug, Clone)]
pub enum RefreshMessage {
    /// A load started
    RefreshStarted,
    /// A load finished, live or from cache
    RatesLoaded(LoadedRates),
    /// A load failed with nothing cached to fall back on
    RefreshFailed(String),
}

/// Configuration for the refresh worker
#[derive(Debug, Clone)]
pub struct RefreshConfig {
    /// How often to check for regained connectivity while offline
    pub probe_interval: Duration,
    /// Whether the connectivity probe runs at all
    pub probe_enabled: bool,
}

impl Default for RefreshConfig {
    fn default() -> Self {
        Self {
            probe_interval: Duration::from_secs(30),
            probe_enabled: true,
        }
    }
}

/// Handle for controlling the background refresh task
pub struct RefreshHandle {
    /// Channel for receiving refresh messages
    pub receiver: mpsc::Receiver<RefreshMessage>,
    /// Channel for requesting a load
    request_tx: mpsc::Sender<()>,
    /// Flag to signal shutdown
    shutdown_tx: mpsc::Sender<()>,
}

impl RefreshHandle {
    /// Spawns the refresh task
    ///
    /// No load happens until [`RefreshHandle::request_refresh`] is called.
    pub fn spawn(loader: RateLoader, config: RefreshConfig) -> Self {
        let (msg_tx, msg_rx) = mpsc::channel(32);
        let (request_tx, mut request_rx) = mpsc::channel::<()>(4);
        let (shutdown_tx, mut shutdown_rx) = mpsc::channel::<()>(1);

        tokio::spawn(async move {
            let mut probe = tokio::time::interval(config.probe_interval);
            // Ticks missed while online must not replay as a burst
            probe.set_missed_tick_behavior(MissedTickBehavior::Delay);
            // Skip the first tick (immediate)
            probe.tick().await;
            let mut offline = false;

            loop {
                tokio::select! {
                    request = request_rx.recv() => {
                        if request.is_none() {
                            break;
                        }
                        let was_offline = offline;
                        offline = run_refresh(&loader, &msg_tx).await;
                        if offline && !was_offline {
                            probe.reset();
                        }
                    }
                    _ = probe.tick(), if config.probe_enabled && offline => {
                        if loader.needs_refresh() {
                            debug!("connectivity probe: cached rates stale, retrying");
                            offline = run_refresh(&loader, &msg_tx).await;
                        }
                    }
                    _ = shutdown_rx.recv() => {
                        break;
                    }
                }
            }
        });

        Self {
            receiver: msg_rx,
            request_tx,
            shutdown_tx,
        }
    }

    /// Requests a load; ignored if several are already queued
    pub fn request_refresh(&self) {
        let _ = self.request_tx.try_send(());
    }

    /// Shuts down the background refresh task
    pub async fn shutdown(self) {
        let _ = self.shutdown_tx.send(()).await;
    }
}

/// Performs one load and reports it; returns whether the app is now offline
async fn run_refresh(loader: &RateLoader, tx: &mpsc::Sender<RefreshMessage>) -> bool {
    let _ = tx.send(RefreshMessage::RefreshStarted).await;
    match loader.refresh().await {
        Ok(loaded) => {
            let offline = loaded.is_offline();
            let _ = tx.send(RefreshMessage::RatesLoaded(loaded)).await;
            offline
        }
        Err(e) => {
            let _ = tx.send(RefreshMessage::RefreshFailed(e.to_string())).await;
            true
        }
    }
}

/// Checks for pending refresh messages without blocking
///
/// # Returns
/// * `Some(RefreshMessage)` if a message was available
/// * `None` if no messages are pending
pub fn try_recv(handle: &mut RefreshHandle) -> Option<RefreshMessage> {
    handle.receiver.try_recv().ok()
}
