//! Asynchronous job domain types
//!
//! A job is server-side work that finishes after the submitting request has
//! already returned: a function deployment build or an asynchronous function
//! execution. Callers hold a [`JobHandle`] and poll its [`JobStatus`].

use serde::{Deserialize, Serialize};

/// Kind of asynchronous job
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum JobKind {
    /// A function deployment being built
    Deployment,
    /// An asynchronous function execution
    Execution,
}

impl std::fmt::Display for JobKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            JobKind::Deployment => write!(f, "deployment"),
            JobKind::Execution => write!(f, "execution"),
        }
    }
}

/// Handle to a submitted job
///
/// Both deployments and executions are addressed through the function that
/// owns them, so the handle carries the function id alongside the job id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobHandle {
    pub kind: JobKind,
    pub function_id: String,
    pub job_id: String,
}

impl JobHandle {
    pub fn deployment(function_id: impl Into<String>, deployment_id: impl Into<String>) -> Self {
        Self {
            kind: JobKind::Deployment,
            function_id: function_id.into(),
            job_id: deployment_id.into(),
        }
    }

    pub fn execution(function_id: impl Into<String>, execution_id: impl Into<String>) -> Self {
        Self {
            kind: JobKind::Execution,
            function_id: function_id.into(),
            job_id: execution_id.into(),
        }
    }
}

impl std::fmt::Display for JobHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} {} (function {})",
            self.kind, self.job_id, self.function_id
        )
    }
}

/// Job status as reported by the backend
///
/// The wire format is a lowercase string. Values this enum does not know
/// about are kept verbatim in [`JobStatus::Other`] and classified as
/// non-terminal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum JobStatus {
    Pending,
    Waiting,
    Processing,
    Building,
    Ready,
    Completed,
    Failed,
    Other(String),
}

/// Classification of a status for polling purposes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JobPhase {
    /// Not finished yet, keep polling
    Pending,
    /// Finished successfully
    Succeeded,
    /// Finished with a failure
    Failed,
}

impl JobStatus {
    pub fn phase(&self) -> JobPhase {
        match self {
            JobStatus::Ready | JobStatus::Completed => JobPhase::Succeeded,
            JobStatus::Failed => JobPhase::Failed,
            _ => JobPhase::Pending,
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            JobStatus::Pending => "pending",
            JobStatus::Waiting => "waiting",
            JobStatus::Processing => "processing",
            JobStatus::Building => "building",
            JobStatus::Ready => "ready",
            JobStatus::Completed => "completed",
            JobStatus::Failed => "failed",
            JobStatus::Other(raw) => raw,
        }
    }
}

impl From<&str> for JobStatus {
    fn from(raw: &str) -> Self {
        match raw {
            "pending" => JobStatus::Pending,
            "waiting" => JobStatus::Waiting,
            "processing" => JobStatus::Processing,
            "building" => JobStatus::Building,
            "ready" => JobStatus::Ready,
            "completed" => JobStatus::Completed,
            "failed" => JobStatus::Failed,
            other => JobStatus::Other(other.to_string()),
        }
    }
}

impl From<String> for JobStatus {
    fn from(raw: String) -> Self {
        JobStatus::from(raw.as_str())
    }
}

impl From<JobStatus> for String {
    fn from(status: JobStatus) -> Self {
        status.as_str().to_string()
    }
}

impl std::fmt::Display for JobStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Result of a single status query
///
/// `payload` is the full document returned by the backend: build metadata
/// for a deployment, response status code and body for an execution.
#[derive(Debug, Clone)]
pub struct JobSnapshot {
    pub status: JobStatus,
    pub payload: serde_json::Value,
}

impl JobSnapshot {
    /// Builds a snapshot from a job document, reading its `status` field
    ///
    /// A document without a string `status` is treated as still pending.
    pub fn from_payload(payload: serde_json::Value) -> Self {
        let status = payload
            .get("status")
            .and_then(|s| s.as_str())
            .map(JobStatus::from)
            .unwrap_or(JobStatus::Pending);

        Self { status, payload }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_terminal_classification() {
        assert_eq!(JobStatus::Ready.phase(), JobPhase::Succeeded);
        assert_eq!(JobStatus::Completed.phase(), JobPhase::Succeeded);
        assert_eq!(JobStatus::Failed.phase(), JobPhase::Failed);

        for status in [
            JobStatus::Pending,
            JobStatus::Waiting,
            JobStatus::Processing,
            JobStatus::Building,
        ] {
            assert_eq!(status.phase(), JobPhase::Pending, "{} should not be terminal", status);
        }
    }

    #[test]
    fn test_unknown_status_is_kept_and_non_terminal() {
        let status: JobStatus = serde_json::from_str("\"cancelled\"").unwrap();
        assert_eq!(status, JobStatus::Other("cancelled".to_string()));
        assert_eq!(status.phase(), JobPhase::Pending);
        assert_eq!(serde_json::to_string(&status).unwrap(), "\"cancelled\"");
    }

    #[test]
    fn test_snapshot_reads_status_field() {
        let snapshot = JobSnapshot::from_payload(serde_json::json!({
            "$id": "exec1",
            "status": "completed",
            "responseStatusCode": 200,
        }));
        assert_eq!(snapshot.status, JobStatus::Completed);
        assert_eq!(snapshot.payload["responseStatusCode"], 200);
    }

    #[test]
    fn test_snapshot_without_status_is_pending() {
        let snapshot = JobSnapshot::from_payload(serde_json::json!({ "$id": "dep1" }));
        assert_eq!(snapshot.status, JobStatus::Pending);
    }

    #[test]
    fn test_handle_display() {
        let handle = JobHandle::deployment("fn1", "dep1");
        assert_eq!(handle.to_string(), "deployment dep1 (function fn1)");
    }
}
