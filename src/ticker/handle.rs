//! Two-phase stop handshake between the session and a running ticker
//!
//! Signalling and joining are a single consuming call, so the caller cannot
//! print anything of its own until the ticker has fully returned.

use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::warn;

use super::runner::{TickerExit, TickerReport};

#[must_use = "a ticker must be stopped or retired before writing further output"]
pub struct TickerHandle {
    stop: CancellationToken,
    done: CancellationToken,
    task: Option<JoinHandle<TickerReport>>,
}

impl TickerHandle {
    pub(crate) fn new(
        stop: CancellationToken,
        done: CancellationToken,
        task: JoinHandle<TickerReport>,
    ) -> Self {
        Self {
            stop,
            done,
            task: Some(task),
        }
    }

    /// The work succeeded: flush any unprinted schedule entries, then wait
    /// for the ticker to return.
    pub async fn stop(self) -> TickerReport {
        self.stop.cancel();
        self.join().await
    }

    /// The work is over without a result: end quietly and wait for the
    /// ticker to return.
    pub async fn retire(self) -> TickerReport {
        self.done.cancel();
        self.join().await
    }

    /// Whether the ticker task has already returned on its own (deadline)
    pub fn is_finished(&self) -> bool {
        self.task.as_ref().is_none_or(|t| t.is_finished())
    }

    async fn join(mut self) -> TickerReport {
        let Some(task) = self.task.take() else {
            return TickerReport::new(TickerExit::Aborted);
        };

        match task.await {
            Ok(report) => report,
            Err(e) => {
                warn!(error = %e, "Ticker task did not complete");
                TickerReport::new(TickerExit::Aborted)
            }
        }
    }
}

impl Drop for TickerHandle {
    fn drop(&mut self) {
        // Dropped without a join: let the task wind down on its own
        if self.task.is_some() {
            self.done.cancel();
        }
    }
}
