//! Pipeline driver
//!
//! Sequences the steps strictly in order and applies the per-step retry
//! policy. This is the minimal in-process stand-in for the external
//! scheduler the steps are written against: each step is attempted, failed
//! attempts are retried a configured number of times with a fixed delay,
//! and the first step to exhaust its retries fails the whole execution.

use std::time::Duration;
use tokio::time::sleep;
use tracing::{error, info, warn};
use uuid::Uuid;

use crate::error::Result;
use crate::handoff::Handoff;
use crate::steps::Step;

/// Runs the steps of one pipeline execution in order
pub struct Pipeline {
    steps: Vec<Box<dyn Step>>,
    retries: u32,
    retry_delay: Duration,
}

impl Pipeline {
    /// Creates an empty pipeline with the given retry policy
    ///
    /// # Arguments
    /// * `retries` - Attempts allowed per step beyond the first
    /// * `retry_delay` - Fixed delay between attempts
    pub fn new(retries: u32, retry_delay: Duration) -> Self {
        Self {
            steps: Vec::new(),
            retries,
            retry_delay,
        }
    }

    /// Appends a step; steps run in insertion order
    pub fn add_step(mut self, step: Box<dyn Step>) -> Self {
        self.steps.push(step);
        self
    }

    /// Runs one pipeline execution to completion
    ///
    /// A fresh handoff channel is scoped to this execution. The execution id
    /// only exists for log correlation.
    pub async fn run(&self) -> Result<()> {
        let execution_id = Uuid::new_v4();
        let mut handoff = Handoff::new();

        info!(%execution_id, steps = self.steps.len(), "starting pipeline execution");

        for step in &self.steps {
            self.run_step(step.as_ref(), &mut handoff).await?;
        }

        info!(%execution_id, "pipeline execution complete");
        Ok(())
    }

    /// Runs a single step, retrying per the configured policy
    async fn run_step(&self, step: &dyn Step, handoff: &mut Handoff) -> Result<()> {
        let mut attempt = 0u32;

        loop {
            attempt += 1;

            match step.execute(handoff).await {
                Ok(()) => {
                    info!(step = step.name(), attempt, "step succeeded");
                    return Ok(());
                }
                Err(e) if attempt <= self.retries => {
                    warn!(
                        step = step.name(),
                        attempt,
                        error = %e,
                        "step failed, retrying in {:?}",
                        self.retry_delay
                    );
                    sleep(self.retry_delay).await;
                }
                Err(e) => {
                    error!(step = step.name(), attempt, error = %e, "step failed");
                    return Err(e);
                }
            }
        }
    }
}
