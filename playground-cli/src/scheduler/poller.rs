//! Completion poller
//!
//! Polls the status of a single job at a fixed interval until it succeeds,
//! fails or runs out of time. Queries for a job are strictly sequential and
//! nothing is retried: a failed query ends the wait.
//!
//! Deadline rule: after a non-terminal answer, if the next query would be
//! issued after the deadline, the poller sleeps until the deadline and
//! reports a timeout without issuing that query. A terminal answer is always
//! honored, even when its query returned after the deadline.

use std::sync::Arc;
use std::time::Duration;

use playground_client::{ClientError, JobStatusSource};
use playground_core::domain::job::{JobHandle, JobPhase, JobSnapshot, JobStatus};
use thiserror::Error;
use tokio::time::{self, Instant};
use tracing::{debug, info, warn};

/// Errors returned while waiting on a job
#[derive(Debug, Error)]
pub enum PollError {
    /// The status query itself failed
    #[error("Failed to query status of {handle}: {source}")]
    QueryFailed {
        handle: JobHandle,
        #[source]
        source: ClientError,
    },

    /// The job reached a terminal failure status
    #[error("{handle} failed with status '{status}'")]
    JobFailed { handle: JobHandle, status: JobStatus },

    /// The deadline passed while the job was still running
    #[error("{handle} did not finish within {elapsed:?}")]
    JobTimedOut { handle: JobHandle, elapsed: Duration },
}

/// Waits for asynchronous jobs to reach a terminal status
pub struct CompletionPoller {
    source: Arc<dyn JobStatusSource>,
    interval: Duration,
    timeout: Option<Duration>,
}

impl CompletionPoller {
    /// Creates a poller with no timeout
    pub fn new(source: Arc<dyn JobStatusSource>, interval: Duration) -> Self {
        Self {
            source,
            interval,
            timeout: None,
        }
    }

    /// Sets the maximum time to wait; `None` waits indefinitely
    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    /// Polls `handle` until it reaches a terminal status
    ///
    /// Returns the final snapshot on success.
    pub async fn await_completion(&self, handle: &JobHandle) -> Result<JobSnapshot, PollError> {
        let started = Instant::now();
        // A deadline too far out to represent is no deadline at all
        let deadline = self
            .timeout
            .and_then(|timeout| started.checked_add(timeout));
        let mut queries: u32 = 0;

        loop {
            queries += 1;

            let snapshot = self
                .source
                .fetch_status(handle)
                .await
                .map_err(|source| PollError::QueryFailed {
                    handle: handle.clone(),
                    source,
                })?;

            match snapshot.status.phase() {
                JobPhase::Succeeded => {
                    info!(
                        "{} finished with status '{}' after {} check(s)",
                        handle, snapshot.status, queries
                    );
                    return Ok(snapshot);
                }
                JobPhase::Failed => {
                    warn!("{} failed with status '{}'", handle, snapshot.status);
                    return Err(PollError::JobFailed {
                        handle: handle.clone(),
                        status: snapshot.status,
                    });
                }
                JobPhase::Pending => {
                    debug!(
                        "{} is '{}' (check {}), next check in {:?}",
                        handle, snapshot.status, queries, self.interval
                    );
                }
            }

            if let Some(deadline) = deadline {
                let next_query = Instant::now().checked_add(self.interval);
                if next_query.is_none_or(|next| next > deadline) {
                    time::sleep_until(deadline).await;
                    return Err(PollError::JobTimedOut {
                        handle: handle.clone(),
                        elapsed: started.elapsed(),
                    });
                }
            }

            time::sleep(self.interval).await;
        }
    }
}
