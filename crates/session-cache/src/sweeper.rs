//! Background sweep of the anonymous cache with an explicit start/stop lifecycle.

use std::time::Duration;

use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::{interval_at, Instant, MissedTickBehavior};
use tracing::{info, instrument};

use crate::cache::AnonymousConversationCache;

/// Handle to the running sweep task. Call [`CacheSweeper::stop`] on shutdown.
pub struct CacheSweeper {
    shutdown_tx: watch::Sender<bool>,
    handle: JoinHandle<()>,
}

impl CacheSweeper {
    /// Spawns a task that calls [`AnonymousConversationCache::sweep`] every `every`,
    /// first run one period after start. Must be called inside a tokio runtime.
    #[instrument(skip(cache))]
    pub fn start(cache: AnonymousConversationCache, every: Duration) -> Self {
        let (shutdown_tx, mut shutdown_rx) = watch::channel(false);

        let handle = tokio::spawn(async move {
            let mut ticker = interval_at(Instant::now() + every, every);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                tokio::select! {
                    _ = ticker.tick() => {
                        cache.sweep().await;
                    }
                    _ = shutdown_rx.changed() => {
                        info!("step: cache sweeper received shutdown");
                        break;
                    }
                }
            }
        });

        info!(interval_secs = every.as_secs_f64(), "step: cache sweeper started");
        Self { shutdown_tx, handle }
    }

    pub fn is_running(&self) -> bool {
        !self.handle.is_finished()
    }

    /// Signals the task to stop and waits for it to finish.
    pub async fn stop(self) {
        let _ = self.shutdown_tx.send(true);
        if let Err(e) = self.handle.await {
            tracing::error!(error = %e, "Cache sweeper task ended abnormally");
        }
        info!("step: cache sweeper stopped");
    }
}
