//! Pipeline steps
//!
//! The three units of work the driver sequences, in their fixed order:
//! trigger the job, resolve the run id the service assigned, monitor the
//! run to a terminal status. Each step is a named unit so the driver can
//! log and retry it individually, the way an external scheduler would.

mod monitor;
mod resolve;
mod trigger;

pub use monitor::MonitorRunStep;
pub use resolve::ResolveRunStep;
pub use trigger::TriggerStep;

use async_trait::async_trait;

use crate::error::Result;
use crate::handoff::Handoff;

/// Handoff key under which the resolver publishes the run id
pub const RUN_ID_KEY: &str = "run_id";

/// A named unit of work in the pipeline
#[async_trait]
pub trait Step: Send + Sync {
    /// Step name used in logs and retry messages
    fn name(&self) -> &str;

    /// Runs the step, reading and writing inter-step values through the
    /// handoff channel
    async fn execute(&self, handoff: &mut Handoff) -> Result<()>;
}
