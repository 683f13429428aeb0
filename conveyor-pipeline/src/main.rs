//! Conveyor Pipeline
//!
//! Triggers a remote batch job and waits for it to finish before exiting.
//!
//! Architecture:
//! - Configuration: CLI flags with environment fallbacks
//! - Repository: HTTP communication with the batch service
//! - Steps: trigger, run-id resolution, completion monitoring
//! - Driver: strict sequencing with per-step retry
//!
//! The three steps share one client handle, built once per execution. The
//! process exits nonzero when the run fails, never finishes, or cannot be
//! submitted or resolved, so an outer scheduler can alert on it.

mod config;
mod driver;
mod error;
mod handoff;
mod repository;
mod steps;

use anyhow::Result;
use clap::Parser;
use std::sync::Arc;
use std::time::Duration;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::Config;
use crate::driver::Pipeline;
use crate::repository::HttpRunService;
use crate::steps::{MonitorRunStep, ResolveRunStep, TriggerStep};
use conveyor_client::BatchClient;

#[derive(Parser)]
#[command(name = "conveyor")]
#[command(about = "Trigger a remote batch job and wait for it to finish", long_about = None)]
struct Cli {
    /// Name of the remote job to run
    #[arg(long, env = "CONVEYOR_JOB_NAME")]
    job_name: String,

    /// Batch service base URL
    #[arg(
        long,
        env = "CONVEYOR_SERVICE_URL",
        default_value = "http://localhost:8080"
    )]
    service_url: String,

    /// Seconds to wait before resolving the run id
    #[arg(long, env = "CONVEYOR_GRACE_DELAY", default_value_t = 8)]
    grace_delay: u64,

    /// Seconds between run status queries
    #[arg(long, env = "CONVEYOR_POLL_INTERVAL", default_value_t = 60)]
    poll_interval: u64,

    /// Overall deadline in seconds for the run to finish
    #[arg(long, env = "CONVEYOR_TIMEOUT", default_value_t = 3600)]
    timeout: u64,

    /// Consecutive failed status queries tolerated before giving up
    #[arg(long, env = "CONVEYOR_MAX_POLL_FAILURES", default_value_t = 3)]
    max_poll_failures: u32,

    /// Retries per step after the first attempt
    #[arg(long, env = "CONVEYOR_RETRIES", default_value_t = 2)]
    retries: u32,

    /// Seconds between step retry attempts
    #[arg(long, env = "CONVEYOR_RETRY_DELAY", default_value_t = 10)]
    retry_delay: u64,
}

impl Cli {
    fn into_config(self) -> Config {
        let mut config = Config::new(self.job_name, self.service_url);
        config.grace_delay = Duration::from_secs(self.grace_delay);
        config.poll_interval = Duration::from_secs(self.poll_interval);
        config.timeout = Duration::from_secs(self.timeout);
        config.max_poll_failures = self.max_poll_failures;
        config.retries = self.retries;
        config.retry_delay = Duration::from_secs(self.retry_delay);
        config
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "conveyor_pipeline=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Cli::parse().into_config();
    config.validate()?;

    info!(
        job_name = %config.job_name,
        service_url = %config.service_url,
        "starting conveyor"
    );

    // One client handle per execution, shared across steps
    let client = Arc::new(BatchClient::new(config.service_url.clone()));
    let service = Arc::new(HttpRunService::new(client));

    let pipeline = Pipeline::new(config.retries, config.retry_delay)
        .add_step(Box::new(TriggerStep::new(
            config.job_name.clone(),
            service.clone(),
        )))
        .add_step(Box::new(ResolveRunStep::new(
            config.job_name.clone(),
            config.grace_delay,
            service.clone(),
        )))
        .add_step(Box::new(MonitorRunStep::new(
            config.job_name.clone(),
            config.poll_interval,
            config.timeout,
            config.max_poll_failures,
            service,
        )));

    pipeline.run().await?;

    info!(job_name = %config.job_name, "job finished successfully");
    Ok(())
}
