//! Run DTOs for the batch service API

use serde::{Deserialize, Serialize};

use crate::domain::run::JobRun;

/// Envelope returned by the run-listing endpoint.
///
/// The service orders `runs` most-recent-first; the ordering is part of its
/// API contract and the resolver relies on it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunList {
    pub runs: Vec<JobRun>,
}
