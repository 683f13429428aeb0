//! Run domain types

use serde::{Deserialize, Serialize};
use std::fmt;

/// One execution instance of a remotely defined job.
///
/// The batch service assigns the id at submission time and owns every status
/// transition; this system only reads the record back out of the run-listing
/// and status endpoints.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JobRun {
    /// Opaque identifier assigned by the batch service.
    pub id: String,
    pub status: RunStatus,
    pub started_at: chrono::DateTime<chrono::Utc>,
    pub completed_at: Option<chrono::DateTime<chrono::Utc>>,
    /// Failure detail reported by the service, if any.
    pub error_message: Option<String>,
}

/// Run status as reported by the batch service.
///
/// PENDING and RUNNING are transient; the remaining states are terminal and
/// the service reports no further transitions after one of them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RunStatus {
    Pending,
    Running,
    Succeeded,
    Failed,
    Stopped,
}

impl RunStatus {
    /// Whether the run has finished, in any outcome.
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Succeeded | Self::Failed | Self::Stopped)
    }

    /// Whether the run finished successfully. Only SUCCEEDED clears a
    /// pipeline to proceed; FAILED and STOPPED are terminal but not success.
    pub fn is_success(self) -> bool {
        matches!(self, Self::Succeeded)
    }
}

impl fmt::Display for RunStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Pending => "PENDING",
            Self::Running => "RUNNING",
            Self::Succeeded => "SUCCEEDED",
            Self::Failed => "FAILED",
            Self::Stopped => "STOPPED",
        };
        f.write_str(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn terminal_classification() {
        assert!(!RunStatus::Pending.is_terminal());
        assert!(!RunStatus::Running.is_terminal());
        assert!(RunStatus::Succeeded.is_terminal());
        assert!(RunStatus::Failed.is_terminal());
        assert!(RunStatus::Stopped.is_terminal());
    }

    #[test]
    fn only_succeeded_is_success() {
        assert!(RunStatus::Succeeded.is_success());
        assert!(!RunStatus::Failed.is_success());
        assert!(!RunStatus::Stopped.is_success());
        assert!(!RunStatus::Running.is_success());
    }

    #[test]
    fn status_uses_screaming_snake_case_on_the_wire() {
        let json = serde_json::to_string(&RunStatus::Succeeded).unwrap();
        assert_eq!(json, "\"SUCCEEDED\"");

        let status: RunStatus = serde_json::from_str("\"STOPPED\"").unwrap();
        assert_eq!(status, RunStatus::Stopped);
    }

    #[test]
    fn run_deserializes_from_service_payload() {
        let payload = r#"{
            "id": "run-7f3a",
            "status": "RUNNING",
            "started_at": "2026-08-01T12:00:00Z",
            "completed_at": null,
            "error_message": null
        }"#;

        let run: JobRun = serde_json::from_str(payload).unwrap();
        assert_eq!(run.id, "run-7f3a");
        assert_eq!(run.status, RunStatus::Running);
        assert!(run.completed_at.is_none());
    }
}
