//! Completion monitor step
//!
//! Polls the resolved run until it reaches a terminal status or the
//! deadline passes. Between queries the task is suspended for the poll
//! interval; the final sleep is clamped so the last query lands exactly on
//! the deadline, and a terminal status observed there still counts.
//!
//! Only SUCCEEDED lets the pipeline proceed. FAILED and STOPPED raise a
//! run-failure error, and a run that never goes terminal raises a timeout,
//! so an operator can tell "never finished" from "finished badly".

use async_trait::async_trait;
use conveyor_core::domain::run::RunStatus;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::{Instant, sleep_until};
use tracing::{info, warn};

use crate::error::{Result, StepError};
use crate::handoff::Handoff;
use crate::repository::RunService;
use crate::steps::{RUN_ID_KEY, Step};

/// Waits for the resolved run to finish
pub struct MonitorRunStep {
    job_name: String,
    poll_interval: Duration,
    timeout: Duration,
    max_poll_failures: u32,
    service: Arc<dyn RunService>,
}

impl MonitorRunStep {
    /// Creates a monitor for the named job
    ///
    /// # Arguments
    /// * `poll_interval` - Sleep between status queries
    /// * `timeout` - Hard deadline for the run to reach a terminal status
    /// * `max_poll_failures` - Consecutive query failures tolerated before
    ///   giving up; a successful query resets the count
    pub fn new(
        job_name: impl Into<String>,
        poll_interval: Duration,
        timeout: Duration,
        max_poll_failures: u32,
        service: Arc<dyn RunService>,
    ) -> Self {
        Self {
            job_name: job_name.into(),
            poll_interval,
            timeout,
            max_poll_failures,
            service,
        }
    }

    /// Polls the run until it finishes, fails, or the deadline passes
    ///
    /// Returns the terminal status on success. FAILED and STOPPED surface as
    /// [`StepError::RunFailed`]; a deadline hit with the run still
    /// non-terminal surfaces as [`StepError::Timeout`].
    pub async fn await_completion(&self, run_id: &str) -> Result<RunStatus> {
        let started = Instant::now();
        let deadline = started + self.timeout;
        let mut next_poll = started;
        let mut consecutive_failures = 0u32;

        loop {
            next_poll = (next_poll + self.poll_interval).min(deadline);
            sleep_until(next_poll).await;

            match self.service.get_job_run(&self.job_name, run_id).await {
                Ok(run) => {
                    consecutive_failures = 0;
                    info!(
                        job_name = %self.job_name,
                        run_id,
                        status = %run.status,
                        "observed run status"
                    );

                    if run.status.is_terminal() {
                        if run.status.is_success() {
                            return Ok(run.status);
                        }
                        if let Some(message) = &run.error_message {
                            warn!(run_id, %message, "run reported an error");
                        }
                        return Err(StepError::RunFailed {
                            run_id: run_id.to_string(),
                            status: run.status,
                        });
                    }
                }
                Err(source) => {
                    consecutive_failures += 1;
                    warn!(
                        run_id,
                        failures = consecutive_failures,
                        error = %source,
                        "status query failed"
                    );

                    if consecutive_failures >= self.max_poll_failures {
                        return Err(StepError::Polling {
                            run_id: run_id.to_string(),
                            attempts: consecutive_failures,
                            source,
                        });
                    }
                }
            }

            if Instant::now() >= deadline {
                return Err(StepError::Timeout {
                    job_name: self.job_name.clone(),
                    run_id: run_id.to_string(),
                    waited: started.elapsed(),
                });
            }
        }
    }
}

#[async_trait]
impl Step for MonitorRunStep {
    fn name(&self) -> &str {
        "monitor-run"
    }

    async fn execute(&self, handoff: &mut Handoff) -> Result<()> {
        let run_id = handoff.get(RUN_ID_KEY)?.to_string();

        info!(
            job_name = %self.job_name,
            run_id = %run_id,
            poll_interval = ?self.poll_interval,
            timeout = ?self.timeout,
            "waiting for run to finish"
        );

        let status = self.await_completion(&run_id).await?;
        info!(run_id = %run_id, %status, "run finished");
        Ok(())
    }
}
