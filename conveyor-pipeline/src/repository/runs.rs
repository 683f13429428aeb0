//! Runs repository
//!
//! The remote API surface the pipeline consumes:
//! - Starting a run (fire-and-forget)
//! - Listing a job's runs, most recent first
//! - Looking a run up by id

use async_trait::async_trait;
use conveyor_client::{BatchClient, Result};
use conveyor_core::domain::run::JobRun;
use std::sync::Arc;

/// Repository trait for run operations against the batch service
#[async_trait]
pub trait RunService: Send + Sync {
    /// Starts one new run of the named job
    ///
    /// The service does not return the run id it assigned; the caller
    /// recovers it from `list_job_runs`.
    async fn start_job_run(&self, job_name: &str) -> Result<()>;

    /// Lists the job's runs, newest first per the service's ordering
    /// contract
    async fn list_job_runs(&self, job_name: &str) -> Result<Vec<JobRun>>;

    /// Fetches a single run, including its current status
    async fn get_job_run(&self, job_name: &str, run_id: &str) -> Result<JobRun>;
}

/// HTTP implementation of [`RunService`]
///
/// Holds the client handle built once per pipeline execution and shared
/// across steps.
pub struct HttpRunService {
    client: Arc<BatchClient>,
}

impl HttpRunService {
    /// Creates a runs repository over an existing client handle
    pub fn new(client: Arc<BatchClient>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl RunService for HttpRunService {
    async fn start_job_run(&self, job_name: &str) -> Result<()> {
        self.client.start_job_run(job_name).await
    }

    async fn list_job_runs(&self, job_name: &str) -> Result<Vec<JobRun>> {
        self.client.list_job_runs(job_name).await
    }

    async fn get_job_run(&self, job_name: &str, run_id: &str) -> Result<JobRun> {
        self.client.get_job_run(job_name, run_id).await
    }
}
