use super::*;
use std::sync::{Arc, Mutex};
use tokio_util::sync::CancellationToken;
use trace_err::*;

/// A background task that sweeps a shared [`RedundancyCache`] every
/// [`Config::sweep_interval`].
pub struct Sweeper {
    cancel_token: CancellationToken,
    task: tokio::task::JoinHandle<()>,
}

impl Sweeper {
    /// Spawns the sweep task on the current runtime.
    ///
    /// The task stops when `cancel_token` is cancelled or [`Sweeper::shutdown`]
    /// is called. Shutting down the sweeper leaves `cancel_token` itself alone.
    pub fn spawn(cache: Arc<Mutex<RedundancyCache>>, cancel_token: CancellationToken) -> Self {
        let interval = cache
            .lock()
            .trace_expect("Failed to lock redundancy cache")
            .config()
            .sweep_interval();

        let cancel_token = cancel_token.child_token();
        let task = tokio::spawn(run(cache, interval, cancel_token.clone()));
        Self { cancel_token, task }
    }

    pub async fn shutdown(self) {
        self.cancel_token.cancel();
        if let Err(e) = self.task.await {
            error!("Redundancy sweeper task failed: {e}");
        }
    }
}

async fn run(
    cache: Arc<Mutex<RedundancyCache>>,
    interval: core::time::Duration,
    cancel_token: CancellationToken,
) {
    let mut timer = tokio::time::interval_at(tokio::time::Instant::now() + interval, interval);
    loop {
        tokio::select! {
            _ = timer.tick() => {
                let evicted = cache
                    .lock()
                    .trace_expect("Failed to lock redundancy cache")
                    .sweep();
                if evicted != 0 {
                    debug!("Redundancy sweep removed {evicted} entries");
                }
            }
            _ = cancel_token.cancelled() => {
                break;
            }
        }
    }
    debug!("Redundancy sweeper stopped");
}
