//! Pipeline error taxonomy
//!
//! One variant per failure class the design distinguishes, so the driver
//! (and an operator reading logs) can tell "never finished" from "finished
//! badly" from "could not even ask".

use conveyor_client::ClientError;
use conveyor_core::domain::run::RunStatus;
use std::time::Duration;
use thiserror::Error;

/// Result type alias for step and driver operations
pub type Result<T> = std::result::Result<T, StepError>;

/// Errors raised by pipeline steps
#[derive(Debug, Error)]
pub enum StepError {
    /// Submitting the run to the batch service failed
    #[error("failed to submit run for job '{job_name}': {source}")]
    Submission {
        job_name: String,
        #[source]
        source: ClientError,
    },

    /// The run-listing query failed
    #[error("failed to list runs for job '{job_name}': {source}")]
    Resolution {
        job_name: String,
        #[source]
        source: ClientError,
    },

    /// The listing came back empty after the grace delay
    #[error("no run found for job '{job_name}' after the grace delay")]
    RunNotFound { job_name: String },

    /// Too many consecutive status queries failed mid-wait
    #[error("polling run '{run_id}' failed {attempts} consecutive time(s): {source}")]
    Polling {
        run_id: String,
        attempts: u32,
        #[source]
        source: ClientError,
    },

    /// The run was still non-terminal when the deadline passed
    #[error("run '{run_id}' of job '{job_name}' did not finish within {waited:?}")]
    Timeout {
        job_name: String,
        run_id: String,
        waited: Duration,
    },

    /// The run finished, but not successfully
    #[error("run '{run_id}' finished with terminal status {status}")]
    RunFailed { run_id: String, status: RunStatus },

    /// A step used the handoff channel incorrectly
    #[error("handoff channel misuse: {0}")]
    Handoff(String),
}

impl StepError {
    /// Whether the pipeline failed because the deadline passed, as opposed
    /// to the run itself failing
    pub fn is_timeout(&self) -> bool {
        matches!(self, Self::Timeout { .. })
    }
}
