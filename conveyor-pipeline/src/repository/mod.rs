//! Repository layer
//!
//! Abstracts the batch service's run API behind a trait so the steps can be
//! exercised against scripted fakes. The HTTP implementation delegates to
//! the shared [`conveyor_client::BatchClient`] handle.

mod runs;

pub use runs::{HttpRunService, RunService};
