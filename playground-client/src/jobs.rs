//! Job status queries
//!
//! Deployments and asynchronous executions are polled through the
//! [`JobStatusSource`] trait so the waiting logic does not depend on the HTTP
//! client directly.

use async_trait::async_trait;
use playground_core::domain::job::{JobHandle, JobKind, JobSnapshot};
use reqwest::Method;
use tracing::debug;

use crate::BaasClient;
use crate::error::Result;
use crate::functions::{deployment_path, execution_path};

/// Source of job status snapshots
#[async_trait]
pub trait JobStatusSource: Send + Sync {
    /// Queries the current status of a job
    ///
    /// Issues exactly one remote query. Transport and API errors are
    /// returned as-is; nothing is retried.
    async fn fetch_status(&self, handle: &JobHandle) -> Result<JobSnapshot>;
}

#[async_trait]
impl JobStatusSource for BaasClient {
    async fn fetch_status(&self, handle: &JobHandle) -> Result<JobSnapshot> {
        let path = match handle.kind {
            JobKind::Deployment => deployment_path(&handle.function_id, &handle.job_id),
            JobKind::Execution => execution_path(&handle.function_id, &handle.job_id),
        };

        let response = self.request(Method::GET, &path).send().await?;
        let payload: serde_json::Value = self.handle_response(response).await?;
        let snapshot = JobSnapshot::from_payload(payload);

        debug!("Status of {}: {}", handle, snapshot.status);

        Ok(snapshot)
    }
}
