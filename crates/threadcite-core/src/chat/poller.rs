//! Run poller: waits for a run to leave the pending states.
//!
//! The wait is a tokio timer, so other tasks (other sessions, the input
//! loop) keep running while a turn is pending.

use std::time::Duration;

use threadcite_types::assistant::Run;
use threadcite_types::config::GlobalConfig;
use threadcite_types::error::TurnError;
use threadcite_types::session::RunHandle;
use tokio::time::Instant;
use tracing::debug;

use crate::assistant::client::AssistantClient;

/// Default delay between status fetches.
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_millis(500);

/// Re-fetches run status at a fixed interval until the run is terminal.
#[derive(Debug, Clone, Copy)]
pub struct RunPoller {
    interval: Duration,
    max_wait: Option<Duration>,
}

impl Default for RunPoller {
    fn default() -> Self {
        Self::new(DEFAULT_POLL_INTERVAL, None)
    }
}

impl RunPoller {
    /// `max_wait` of `None` waits indefinitely.
    pub fn new(interval: Duration, max_wait: Option<Duration>) -> Self {
        Self { interval, max_wait }
    }

    pub fn from_config(config: &GlobalConfig) -> Self {
        Self::new(config.poll_interval(), config.max_poll())
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    pub fn max_wait(&self) -> Option<Duration> {
        self.max_wait
    }

    /// Wait until the run reaches a terminal status and return it.
    ///
    /// Terminal statuses other than `completed` are returned as data, not as
    /// errors. A status fetch failure is an extraction failure. Exceeding
    /// `max_wait` yields [`TurnError::PollTimeout`]; the remote run is left
    /// running.
    pub async fn await_completion<C: AssistantClient>(
        &self,
        client: &C,
        handle: &RunHandle,
    ) -> Result<Run, TurnError> {
        let started = Instant::now();
        let mut run = Run {
            id: handle.run_id.clone(),
            thread_id: handle.thread_id.clone(),
            status: handle.status,
            last_error: None,
        };
        let mut fetches = 0u32;

        while run.status.is_pending() {
            if let Some(max_wait) = self.max_wait {
                let waited = started.elapsed();
                if waited >= max_wait {
                    return Err(TurnError::PollTimeout {
                        run_id: run.id,
                        waited_ms: waited.as_millis() as u64,
                    });
                }
            }

            tokio::time::sleep(self.interval).await;

            run = client
                .retrieve_run(&handle.thread_id, &handle.run_id)
                .await
                .map_err(TurnError::Extraction)?;
            fetches += 1;

            debug!(
                run.id = %run.id,
                run.status = %run.status,
                fetches,
                "Polled run status"
            );
        }

        Ok(run)
    }
}
