//! Run resolver step
//!
//! The service assigns run ids at submission time but does not hand them
//! back, and its run listing is eventually consistent. This step waits a
//! fixed grace delay, then takes the head of the most-recent-first listing
//! as the run the trigger just submitted.
//!
//! Selection is by recency only. If two runs of the same job are in flight
//! at once, the head of the listing may be the other one; schedules for
//! this pipeline must not overlap executions of the same job. The service
//! offers no run tagging to filter on instead.

use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::sleep;
use tracing::info;

use crate::error::{Result, StepError};
use crate::handoff::Handoff;
use crate::repository::RunService;
use crate::steps::{RUN_ID_KEY, Step};

/// Resolves the id of the just-submitted run and publishes it downstream
pub struct ResolveRunStep {
    job_name: String,
    grace_delay: Duration,
    service: Arc<dyn RunService>,
}

impl ResolveRunStep {
    /// Creates a resolver for the named job
    pub fn new(
        job_name: impl Into<String>,
        grace_delay: Duration,
        service: Arc<dyn RunService>,
    ) -> Self {
        Self {
            job_name: job_name.into(),
            grace_delay,
            service,
        }
    }

    /// Resolves the most recent run id for the job
    ///
    /// Raises [`StepError::RunNotFound`] when the listing is still empty
    /// after the grace delay, so the driver's retry policy gets a meaningful
    /// error instead of an index panic.
    async fn resolve(&self) -> Result<String> {
        sleep(self.grace_delay).await;

        let runs = self
            .service
            .list_job_runs(&self.job_name)
            .await
            .map_err(|source| StepError::Resolution {
                job_name: self.job_name.clone(),
                source,
            })?;

        let run = runs.first().ok_or_else(|| StepError::RunNotFound {
            job_name: self.job_name.clone(),
        })?;

        info!(
            job_name = %self.job_name,
            run_id = %run.id,
            started_at = %run.started_at,
            "resolved run id"
        );

        Ok(run.id.clone())
    }
}

#[async_trait]
impl Step for ResolveRunStep {
    fn name(&self) -> &str {
        "resolve-run"
    }

    async fn execute(&self, handoff: &mut Handoff) -> Result<()> {
        let run_id = self.resolve().await?;
        handoff.insert(RUN_ID_KEY, run_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use conveyor_core::domain::run::{JobRun, RunStatus};
    use std::sync::Mutex;

    struct ListingService {
        runs: Mutex<Vec<JobRun>>,
    }

    impl ListingService {
        fn new(runs: Vec<JobRun>) -> Self {
            Self {
                runs: Mutex::new(runs),
            }
        }
    }

    #[async_trait]
    impl RunService for ListingService {
        async fn start_job_run(&self, _job_name: &str) -> conveyor_client::Result<()> {
            unimplemented!("resolver never submits")
        }

        async fn list_job_runs(&self, _job_name: &str) -> conveyor_client::Result<Vec<JobRun>> {
            Ok(self.runs.lock().unwrap().clone())
        }

        async fn get_job_run(
            &self,
            _job_name: &str,
            _run_id: &str,
        ) -> conveyor_client::Result<JobRun> {
            unimplemented!("resolver never polls")
        }
    }

    fn run(id: &str, hour: u32) -> JobRun {
        JobRun {
            id: id.to_string(),
            status: RunStatus::Running,
            started_at: Utc.with_ymd_and_hms(2026, 8, 1, hour, 0, 0).unwrap(),
            completed_at: None,
            error_message: None,
        }
    }

    #[tokio::test(start_paused = true)]
    async fn resolves_the_most_recent_run() {
        // Listing is newest-first: r2 started after r1
        let service = Arc::new(ListingService::new(vec![run("r2", 12), run("r1", 11)]));
        let step = ResolveRunStep::new("etl", Duration::from_secs(8), service);
        let mut handoff = Handoff::new();

        step.execute(&mut handoff).await.unwrap();

        assert_eq!(handoff.get(RUN_ID_KEY).unwrap(), "r2");
    }

    #[tokio::test(start_paused = true)]
    async fn empty_listing_is_an_explicit_not_found() {
        let service = Arc::new(ListingService::new(vec![]));
        let step = ResolveRunStep::new("etl", Duration::from_secs(8), service);
        let mut handoff = Handoff::new();

        let err = step.execute(&mut handoff).await.unwrap_err();
        assert!(matches!(err, StepError::RunNotFound { ref job_name } if job_name == "etl"));
    }

    #[tokio::test(start_paused = true)]
    async fn resolution_is_idempotent_against_an_unchanged_listing() {
        let service = Arc::new(ListingService::new(vec![run("r2", 12), run("r1", 11)]));
        let step = ResolveRunStep::new("etl", Duration::from_secs(8), service);

        let first = step.resolve().await.unwrap();
        let second = step.resolve().await.unwrap();
        assert_eq!(first, second);
    }

    #[tokio::test(start_paused = true)]
    async fn waits_the_grace_delay_before_listing() {
        let service = Arc::new(ListingService::new(vec![run("r1", 11)]));
        let step = ResolveRunStep::new("etl", Duration::from_secs(8), service);

        let started = tokio::time::Instant::now();
        step.resolve().await.unwrap();
        assert_eq!(started.elapsed(), Duration::from_secs(8));
    }
}
