//! Background refresh of a session: on an interval, and immediately when
//! nudged (window focus, tab becoming visible).

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::Notify;
use tokio::task::JoinHandle;

use crate::session::JobBoardSession;

const MAX_BACKOFF: Duration = Duration::from_secs(300);

pub struct RefreshWorker {
    session: Arc<JobBoardSession>,
    interval: Duration,
}

/// Handle to a running refresh worker.
#[derive(Debug)]
pub struct RefreshHandle {
    nudge: Arc<Notify>,
    shutdown: Arc<Notify>,
    join: JoinHandle<()>,
}

impl RefreshHandle {
    /// Refresh now instead of waiting for the next tick.
    pub fn nudge(&self) {
        self.nudge.notify_one();
    }

    pub async fn stop(self) {
        self.shutdown.notify_one();
        if let Err(e) = self.join.await {
            tracing::warn!("refresh worker ended abnormally: {e}");
        }
    }
}

impl RefreshWorker {
    pub fn new(session: Arc<JobBoardSession>, interval: Duration) -> Self {
        Self { session, interval }
    }

    pub fn start(self) -> RefreshHandle {
        let nudge = Arc::new(Notify::new());
        let shutdown = Arc::new(Notify::new());
        let (nudged, stopped) = (nudge.clone(), shutdown.clone());

        let join = tokio::spawn(async move {
            tracing::info!("refresh worker started for user {}", self.session.user());

            let mut ticker = tokio::time::interval(self.interval);
            ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);

            let mut consecutive_failures = 0u32;

            loop {
                tokio::select! {
                    _ = stopped.notified() => {
                        tracing::info!("refresh worker received shutdown signal");
                        break;
                    }
                    _ = ticker.tick() => {}
                    _ = nudged.notified() => {
                        tracing::debug!("refresh nudged");
                    }
                }

                match self.session.refresh().await {
                    Ok(_) => consecutive_failures = 0,
                    Err(e) => {
                        consecutive_failures += 1;
                        let backoff = std::cmp::min(
                            Duration::from_secs(1) * (1 << consecutive_failures.min(8)),
                            MAX_BACKOFF,
                        );
                        tracing::warn!(
                            "refresh failed (failure count: {consecutive_failures}): {e}; retrying in {backoff:?}"
                        );

                        // Waiting out the backoff must not block shutdown; a nudge retries early.
                        tokio::select! {
                            _ = stopped.notified() => break,
                            _ = nudged.notified() => {}
                            _ = tokio::time::sleep(backoff) => {}
                        }
                    }
                }
            }

            tracing::info!("refresh worker stopped");
        });

        RefreshHandle {
            nudge,
            shutdown,
            join,
        }
    }
}
