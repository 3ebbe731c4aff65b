//! Opt-in background purge of expired trash records.
//!
//! Lazy expiry (`daysLeft`/`expired` computed at read time) stays the default;
//! this only runs when the server is configured with a sweep interval.

use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use tokio::sync::Notify;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use super::LifecycleEngine;

pub struct ExpirySweeper {
    engine: Arc<LifecycleEngine>,
    interval: Duration,
}

/// Handle to a running sweeper.
#[derive(Debug)]
pub struct SweeperHandle {
    shutdown: Arc<Notify>,
    join: JoinHandle<()>,
}

impl SweeperHandle {
    /// Signal shutdown and wait for the task to finish.
    pub async fn stop(self) {
        self.shutdown.notify_one();
        if let Err(e) = self.join.await {
            warn!("expiry sweeper task ended abnormally: {e}");
        }
    }
}

impl ExpirySweeper {
    pub fn new(engine: Arc<LifecycleEngine>, interval: Duration) -> Self {
        Self { engine, interval }
    }

    pub fn start(self) -> SweeperHandle {
        let shutdown = Arc::new(Notify::new());
        let signal = shutdown.clone();

        let join = tokio::spawn(async move {
            info!("expiry sweeper started (every {:?})", self.interval);

            let mut ticker = tokio::time::interval(self.interval);
            ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);

            loop {
                tokio::select! {
                    _ = signal.notified() => {
                        info!("expiry sweeper received shutdown signal");
                        break;
                    }
                    _ = ticker.tick() => {
                        match self.engine.purge_expired(Utc::now()) {
                            Ok(report) if report.is_empty() => debug!("nothing expired"),
                            Ok(_) => {}
                            Err(e) => warn!("expiry sweep failed: {e}"),
                        }
                    }
                }
            }
        });

        SweeperHandle { shutdown, join }
    }
}
