//! Function steps
//!
//! Creates a function and, when a code archive is configured, deploys it,
//! waits for the build, runs it asynchronously and waits for the result.

use std::path::Path;

use anyhow::{Context, Result};
use playground_core::domain::id;
use playground_core::domain::job::JobHandle;
use playground_core::dto::function::{CreateDeployment, CreateExecution, CreateFunction};

use super::Workflow;
use crate::context::require;
use crate::theme;

impl Workflow {
    pub(super) async fn run_functions(&mut self) -> Result<()> {
        self.create_function().await?;
        self.list_functions().await?;

        match self.config.function_code.clone() {
            Some(code) => {
                self.create_deployment(&code).await?;
                self.create_execution().await?;
                self.list_executions().await?;
            }
            None => {
                theme::warning("Skipping deployment and execution: no function code archive");
            }
        }

        self.delete_function().await
    }

    async fn create_function(&mut self) -> Result<()> {
        theme::info("Running Create Function API");

        let function = self
            .client
            .create_function(CreateFunction {
                function_id: id::unique(),
                name: "Test Function".to_string(),
                runtime: self.config.function_runtime.clone(),
                execute: vec!["any".to_string()],
                entrypoint: Some(self.config.function_entrypoint.clone()),
                timeout: None,
            })
            .await
            .context("Failed to create function")?;

        self.context.function_id = Some(function.id.clone());
        theme::print_json(&function);
        Ok(())
    }

    async fn list_functions(&self) -> Result<()> {
        theme::info("Running List Functions API");

        let functions = self
            .client
            .list_functions()
            .await
            .context("Failed to list functions")?;

        theme::print_json(&functions);
        Ok(())
    }

    async fn create_deployment(&mut self, code: &Path) -> Result<()> {
        theme::info("Running Create Deployment API");

        let function_id = require(&self.context.function_id, "function")?.to_string();
        let deployment = self
            .client
            .create_deployment(CreateDeployment {
                function_id: function_id.clone(),
                entrypoint: self.config.function_entrypoint.clone(),
                code_path: code.to_path_buf(),
                activate: true,
            })
            .await
            .with_context(|| format!("Failed to deploy {}", code.display()))?;

        self.context.deployment_id = Some(deployment.id.clone());
        theme::print_json(&deployment);

        theme::info("Waiting for deployment to be ready");
        let handle = JobHandle::deployment(function_id, deployment.id);
        let build = self
            .poller(self.config.deployment_poll_interval)
            .await_completion(&handle)
            .await
            .context("Deployment did not become ready")?;

        theme::success(&format!("Deployment {} is {}", handle.job_id, build.status));
        theme::print_json(&build.payload);
        Ok(())
    }

    async fn create_execution(&mut self) -> Result<()> {
        theme::info("Running Create Execution API");

        let function_id = require(&self.context.function_id, "function")?.to_string();
        let execution = self
            .client
            .create_execution(
                &function_id,
                CreateExecution {
                    body: Some(r#"{"hello":"world"}"#.to_string()),
                    is_async: true,
                    ..Default::default()
                },
            )
            .await
            .context("Failed to create execution")?;

        self.context.execution_id = Some(execution.id.clone());
        theme::print_json(&execution);

        theme::info("Waiting for execution to complete");
        let handle = JobHandle::execution(function_id, execution.id);
        let result = self
            .poller(self.config.execution_poll_interval)
            .await_completion(&handle)
            .await
            .context("Execution did not complete")?;

        theme::success(&format!("Execution {} is {}", handle.job_id, result.status));
        theme::print_json(&result.payload);
        Ok(())
    }

    async fn list_executions(&self) -> Result<()> {
        theme::info("Running List Executions API");

        let function_id = require(&self.context.function_id, "function")?;
        let executions = self
            .client
            .list_executions(function_id)
            .await
            .context("Failed to list executions")?;

        theme::print_json(&executions);
        Ok(())
    }

    async fn delete_function(&mut self) -> Result<()> {
        theme::info("Running Delete Function API");

        let function_id = require(&self.context.function_id, "function")?;
        self.client
            .delete_function(function_id)
            .await
            .context("Failed to delete function")?;

        theme::success(&format!("Deleted function {}", function_id));
        self.context.function_id = None;
        self.context.deployment_id = None;
        self.context.execution_id = None;
        Ok(())
    }
}
