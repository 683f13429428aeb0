//! Run-related API endpoints

use crate::BatchClient;
use crate::error::Result;
use conveyor_core::domain::run::JobRun;
use conveyor_core::dto::run::RunList;
use tracing::debug;

impl BatchClient {
    /// Start a new run of the named job
    ///
    /// Fire-and-forget: the service acknowledges the submission but does not
    /// return the run id it assigned. Use [`list_job_runs`] afterwards to
    /// recover the id.
    ///
    /// # Arguments
    /// * `job_name` - Name of the job as defined in the batch service
    ///
    /// [`list_job_runs`]: BatchClient::list_job_runs
    pub async fn start_job_run(&self, job_name: &str) -> Result<()> {
        let url = format!("{}/api/jobs/{}/runs", self.base_url, job_name);
        debug!(job_name, "starting job run");
        let response = self.client.post(&url).send().await?;

        self.handle_empty_response(response).await
    }

    /// List all runs of the named job, most recent first
    ///
    /// The ordering is the service's own contract; callers resolving a
    /// just-submitted run take the head of this list.
    ///
    /// # Arguments
    /// * `job_name` - Name of the job as defined in the batch service
    ///
    /// # Returns
    /// The job's runs, newest first. Empty if the service has not yet
    /// recorded any run (the listing is eventually consistent).
    pub async fn list_job_runs(&self, job_name: &str) -> Result<Vec<JobRun>> {
        let url = format!("{}/api/jobs/{}/runs", self.base_url, job_name);
        let response = self.client.get(&url).send().await?;

        let list: RunList = self.handle_response(response).await?;
        Ok(list.runs)
    }

    /// Look up a single run by id
    ///
    /// # Arguments
    /// * `job_name` - Name of the job the run belongs to
    /// * `run_id` - The service-assigned run identifier
    ///
    /// # Returns
    /// The run record, including its current status.
    pub async fn get_job_run(&self, job_name: &str, run_id: &str) -> Result<JobRun> {
        let url = format!("{}/api/jobs/{}/runs/{}", self.base_url, job_name, run_id);
        let response = self.client.get(&url).send().await?;

        self.handle_response(response).await
    }
}
