//! Function endpoints
//!
//! Functions, their deployments and executions. Deployments and asynchronous
//! executions finish after the request returns; see [`crate::jobs`] for the
//! status queries used to wait on them.

use crate::BaasClient;
use crate::error::Result;
use crate::upload::Upload;
use playground_core::domain::resource::{Resource, ResourceList};
use playground_core::dto::function::{CreateDeployment, CreateExecution, CreateFunction};
use reqwest::Method;

pub(crate) fn deployment_path(function_id: &str, deployment_id: &str) -> String {
    format!("/functions/{}/deployments/{}", function_id, deployment_id)
}

pub(crate) fn execution_path(function_id: &str, execution_id: &str) -> String {
    format!("/functions/{}/executions/{}", function_id, execution_id)
}

impl BaasClient {
    // =============================================================================
    // Functions
    // =============================================================================

    /// Create a function
    pub async fn create_function(&self, req: CreateFunction) -> Result<Resource> {
        let response = self
            .request(Method::POST, "/functions")
            .json(&req)
            .send()
            .await?;

        self.handle_response(response).await
    }

    /// List functions
    pub async fn list_functions(&self) -> Result<ResourceList> {
        let response = self.request(Method::GET, "/functions").send().await?;

        self.handle_response(response).await
    }

    /// Delete a function with its deployments and executions
    pub async fn delete_function(&self, function_id: &str) -> Result<()> {
        let path = format!("/functions/{}", function_id);
        let response = self.request(Method::DELETE, &path).send().await?;

        self.handle_empty_response(response).await
    }

    // =============================================================================
    // Deployments
    // =============================================================================

    /// Upload a code archive as a new deployment
    ///
    /// The server builds the deployment in the background; the returned
    /// resource is usually still `waiting` or `processing`.
    pub async fn create_deployment(&self, req: CreateDeployment) -> Result<Resource> {
        let path = format!("/functions/{}/deployments", req.function_id);

        self.upload(Upload {
            path: &path,
            fields: vec![
                ("entrypoint", req.entrypoint.clone()),
                ("activate", req.activate.to_string()),
            ],
            file_field: "code",
            file_path: &req.code_path,
        })
        .await
    }

    /// Get a deployment, including its build status
    pub async fn get_deployment(&self, function_id: &str, deployment_id: &str) -> Result<Resource> {
        let response = self
            .request(Method::GET, &deployment_path(function_id, deployment_id))
            .send()
            .await?;

        self.handle_response(response).await
    }

    // =============================================================================
    // Executions
    // =============================================================================

    /// Execute a function
    ///
    /// With `req.is_async` the execution is queued and must be polled.
    pub async fn create_execution(
        &self,
        function_id: &str,
        req: CreateExecution,
    ) -> Result<Resource> {
        let path = format!("/functions/{}/executions", function_id);
        let response = self.request(Method::POST, &path).json(&req).send().await?;

        self.handle_response(response).await
    }

    /// Get an execution, including its status and response
    pub async fn get_execution(&self, function_id: &str, execution_id: &str) -> Result<Resource> {
        let response = self
            .request(Method::GET, &execution_path(function_id, execution_id))
            .send()
            .await?;

        self.handle_response(response).await
    }

    /// List executions of a function
    pub async fn list_executions(&self, function_id: &str) -> Result<ResourceList> {
        let path = format!("/functions/{}/executions", function_id);
        let response = self.request(Method::GET, &path).send().await?;

        self.handle_response(response).await
    }
}
