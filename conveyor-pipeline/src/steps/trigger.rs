//! Trigger step
//!
//! Submits one new run of the configured job. The submission is
//! fire-and-forget: the service assigns the run id internally and does not
//! return it, so this step emits nothing into the handoff channel.

use async_trait::async_trait;
use std::sync::Arc;
use tracing::info;

use crate::error::{Result, StepError};
use crate::handoff::Handoff;
use crate::repository::RunService;
use crate::steps::Step;

/// Submits the job to the batch service
pub struct TriggerStep {
    job_name: String,
    service: Arc<dyn RunService>,
}

impl TriggerStep {
    /// Creates a trigger step for the named job
    pub fn new(job_name: impl Into<String>, service: Arc<dyn RunService>) -> Self {
        Self {
            job_name: job_name.into(),
            service,
        }
    }
}

#[async_trait]
impl Step for TriggerStep {
    fn name(&self) -> &str {
        "trigger"
    }

    async fn execute(&self, _handoff: &mut Handoff) -> Result<()> {
        info!(job_name = %self.job_name, "submitting job run");

        self.service
            .start_job_run(&self.job_name)
            .await
            .map_err(|source| StepError::Submission {
                job_name: self.job_name.clone(),
                source,
            })?;

        info!(job_name = %self.job_name, "job run submitted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use conveyor_client::ClientError;
    use conveyor_core::domain::run::JobRun;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct CountingService {
        starts: AtomicUsize,
        fail: bool,
    }

    impl CountingService {
        fn new(fail: bool) -> Self {
            Self {
                starts: AtomicUsize::new(0),
                fail,
            }
        }
    }

    #[async_trait]
    impl RunService for CountingService {
        async fn start_job_run(&self, _job_name: &str) -> conveyor_client::Result<()> {
            self.starts.fetch_add(1, Ordering::SeqCst);
            if self.fail {
                return Err(ClientError::api_error(401, "bad credentials"));
            }
            Ok(())
        }

        async fn list_job_runs(&self, _job_name: &str) -> conveyor_client::Result<Vec<JobRun>> {
            unimplemented!("trigger never lists runs")
        }

        async fn get_job_run(
            &self,
            _job_name: &str,
            _run_id: &str,
        ) -> conveyor_client::Result<JobRun> {
            unimplemented!("trigger never polls")
        }
    }

    #[tokio::test]
    async fn issues_exactly_one_start_request() {
        let service = Arc::new(CountingService::new(false));
        let step = TriggerStep::new("nightly-transfer", service.clone());
        let mut handoff = Handoff::new();

        step.execute(&mut handoff).await.unwrap();

        assert_eq!(service.starts.load(Ordering::SeqCst), 1);
        // Nothing is published downstream
        assert!(handoff.get(crate::steps::RUN_ID_KEY).is_err());
    }

    #[tokio::test]
    async fn surfaces_submission_failure_unmodified() {
        let service = Arc::new(CountingService::new(true));
        let step = TriggerStep::new("nightly-transfer", service);
        let mut handoff = Handoff::new();

        let err = step.execute(&mut handoff).await.unwrap_err();
        assert!(matches!(err, StepError::Submission { .. }));
    }
}
