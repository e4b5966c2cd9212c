//! Playground workflow
//!
//! Runs every step group in a fixed order: each step calls one API, prints
//! the response, and records the ids later steps need in the
//! [`WorkflowContext`]. Resources are deleted in reverse order of creation
//! within each group. The first error aborts the run.

mod account;
mod databases;
mod functions;
mod storage;
mod users;

use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use clap::ValueEnum;
use playground_client::BaasClient;
use tracing::info;

use crate::config::Config;
use crate::context::WorkflowContext;
use crate::scheduler::CompletionPoller;

/// Groups of related steps
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum StepGroup {
    /// Current account (requires a JWT)
    Account,
    /// Create, list and delete a user
    Users,
    /// Database, collection, attributes, index and documents
    Databases,
    /// Bucket and files
    Storage,
    /// Function, deployment and execution
    Functions,
}

impl StepGroup {
    /// Execution order
    pub const ALL: [StepGroup; 5] = [
        StepGroup::Account,
        StepGroup::Users,
        StepGroup::Databases,
        StepGroup::Storage,
        StepGroup::Functions,
    ];
}

/// A single playground run
pub struct Workflow {
    config: Config,
    client: Arc<BaasClient>,
    context: WorkflowContext,
}

impl Workflow {
    pub fn new(config: Config, client: BaasClient) -> Self {
        Self {
            config,
            client: Arc::new(client),
            context: WorkflowContext::default(),
        }
    }

    /// Ids recorded so far
    pub fn context(&self) -> &WorkflowContext {
        &self.context
    }

    /// Runs the selected step groups in order
    pub async fn run(&mut self) -> Result<()> {
        for group in StepGroup::ALL {
            if !self.config.runs(group) {
                continue;
            }

            info!("Running {:?} steps", group);

            match group {
                StepGroup::Account => self.run_account().await?,
                StepGroup::Users => self.run_users().await?,
                StepGroup::Databases => self.run_databases().await?,
                StepGroup::Storage => self.run_storage().await?,
                StepGroup::Functions => self.run_functions().await?,
            }
        }

        Ok(())
    }

    /// Builds a poller over this run's client
    fn poller(&self, interval: Duration) -> CompletionPoller {
        CompletionPoller::new(self.client.clone(), interval).with_timeout(self.config.poll_timeout)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use playground_client::testing::{self, Canned, CannedServer, RecordedRequest, StatusCode};
    use serde_json::json;

    /// A backend that accepts every step and hands out fixed ids
    fn backend(request: &RecordedRequest) -> Canned {
        let path = request.path.as_str();
        match (request.method.as_str(), path) {
            ("DELETE", _) => Canned::NoContent,
            ("GET", "/account") => Canned::ok(json!({ "$id": "me", "name": "Tester" })),
            ("GET", "/functions/fn1/deployments/dep1") => {
                Canned::ok(json!({ "$id": "dep1", "status": "ready" }))
            }
            ("GET", "/functions/fn1/executions/exec1") => {
                Canned::ok(json!({ "$id": "exec1", "status": "completed" }))
            }
            ("GET", _) => Canned::ok(json!({ "total": 0 })),
            ("POST", "/users") => Canned::created(json!({ "$id": "user1" })),
            ("POST", "/databases") => Canned::created(json!({ "$id": "db1", "name": "Movies" })),
            ("POST", "/databases/db1/collections") => Canned::created(json!({ "$id": "col1" })),
            ("POST", p) if p.contains("/attributes/") || p.ends_with("/indexes") => {
                Canned::Json(StatusCode::ACCEPTED, json!({ "key": "k", "status": "processing" }))
            }
            ("POST", "/databases/db1/collections/col1/documents") => {
                Canned::created(json!({ "$id": "doc1" }))
            }
            ("POST", "/storage/buckets") => Canned::created(json!({ "$id": "bucket1" })),
            ("POST", "/storage/buckets/bucket1/files") => Canned::created(json!({ "$id": "file1" })),
            ("POST", "/functions") => Canned::created(json!({ "$id": "fn1" })),
            ("POST", "/functions/fn1/deployments") => {
                Canned::Json(StatusCode::ACCEPTED, json!({ "$id": "dep1", "status": "waiting" }))
            }
            ("POST", "/functions/fn1/executions") => {
                Canned::Json(StatusCode::ACCEPTED, json!({ "$id": "exec1", "status": "waiting" }))
            }
            _ => Canned::error(StatusCode::NOT_FOUND, "Route not found"),
        }
    }

    fn test_config(groups: &[StepGroup]) -> Config {
        let mut config = Config::new("http://127.0.0.1/v1".to_string(), "test".to_string());
        config.api_key = Some("secret".to_string());
        config.attribute_settle = Duration::ZERO;
        config.deployment_poll_interval = Duration::from_millis(10);
        config.execution_poll_interval = Duration::from_millis(10);
        config.groups = groups.to_vec();
        config
    }

    fn database_steps() -> Vec<&'static str> {
        vec![
            "POST /databases",
            "POST /databases/db1/collections",
            "POST /databases/db1/collections/col1/attributes/string",
            "POST /databases/db1/collections/col1/attributes/integer",
            "POST /databases/db1/collections/col1/attributes/float",
            "POST /databases/db1/collections/col1/attributes/boolean",
            "POST /databases/db1/collections/col1/attributes/email",
            "POST /databases/db1/collections/col1/indexes",
            "GET /databases/db1/collections",
            "POST /databases/db1/collections/col1/documents",
            "GET /databases/db1/collections/col1/documents",
            "DELETE /databases/db1/collections/col1/documents/doc1",
            "DELETE /databases/db1/collections/col1",
            "DELETE /databases/db1",
        ]
    }

    #[tokio::test]
    async fn test_full_run_threads_ids_through_every_group() {
        let server = CannedServer::start(backend).await.unwrap();
        let mut config = test_config(&[]);
        config.jwt = Some("jwt".to_string());
        config.upload_file = Some(testing::temp_file("workflow-upload.txt", b"hello").unwrap());
        config.function_code =
            Some(testing::temp_file("workflow-code.tar.gz", b"not really gzip").unwrap());

        let mut workflow = Workflow::new(config, server.client().with_jwt("jwt"));
        workflow.run().await.unwrap();

        let mut expected = vec!["GET /account", "POST /users", "GET /users", "DELETE /users/user1"];
        expected.extend(database_steps());
        expected.extend([
            "POST /storage/buckets",
            "GET /storage/buckets",
            "POST /storage/buckets/bucket1/files",
            "GET /storage/buckets/bucket1/files",
            "DELETE /storage/buckets/bucket1/files/file1",
            "DELETE /storage/buckets/bucket1",
            "POST /functions",
            "GET /functions",
            "POST /functions/fn1/deployments",
            "GET /functions/fn1/deployments/dep1",
            "POST /functions/fn1/executions",
            "GET /functions/fn1/executions/exec1",
            "GET /functions/fn1/executions",
            "DELETE /functions/fn1",
        ]);
        assert_eq!(server.lines(), expected);
        assert!(workflow.context().leftovers().is_empty());

        let requests = server.requests();
        let collection = requests[5].json();
        assert_eq!(collection["name"], "Movies");
        assert_eq!(collection["permissions"], json!(["create(\"any\")"]));

        let execution = requests
            .iter()
            .find(|r| r.line() == "POST /functions/fn1/executions")
            .map(RecordedRequest::json)
            .unwrap();
        assert_eq!(execution["async"], true);
    }

    #[tokio::test]
    async fn test_only_runs_selected_groups() {
        let server = CannedServer::start(backend).await.unwrap();
        let config = test_config(&[StepGroup::Storage, StepGroup::Users]);

        let mut workflow = Workflow::new(config, server.client());
        workflow.run().await.unwrap();

        // Group order is fixed regardless of the order they were selected in
        assert_eq!(
            server.lines(),
            vec![
                "POST /users",
                "GET /users",
                "DELETE /users/user1",
                "POST /storage/buckets",
                "GET /storage/buckets",
                "GET /storage/buckets/bucket1/files",
                "DELETE /storage/buckets/bucket1",
            ]
        );
    }

    #[tokio::test]
    async fn test_account_is_skipped_without_jwt() {
        let server = CannedServer::start(backend).await.unwrap();
        let config = test_config(&[StepGroup::Account]);

        let mut workflow = Workflow::new(config, server.client());
        workflow.run().await.unwrap();

        assert!(server.requests().is_empty());
    }

    #[tokio::test]
    async fn test_first_error_aborts_and_reports_leftovers() {
        let server = CannedServer::start(|request| {
            if request.line() == "POST /databases/db1/collections/col1/documents" {
                Canned::error(StatusCode::BAD_REQUEST, "Invalid document structure")
            } else {
                backend(request)
            }
        })
        .await
        .unwrap();
        let config = test_config(&[]);

        let mut workflow = Workflow::new(config, server.client());
        let err = workflow.run().await.unwrap_err();

        let message = format!("{:#}", err);
        assert!(message.contains("Failed to create document"), "{}", message);
        assert!(message.contains("Invalid document structure"), "{}", message);

        // Nothing after the failing step was attempted
        let lines = server.lines();
        assert_eq!(
            lines.last().map(String::as_str),
            Some("POST /databases/db1/collections/col1/documents")
        );
        assert!(!lines.iter().any(|line| line.starts_with("DELETE /databases")));
        assert!(!lines.iter().any(|line| line.contains("/storage/")));

        assert_eq!(
            workflow.context().leftovers(),
            vec![("collection", "col1"), ("database", "db1")]
        );
    }

    #[tokio::test]
    async fn test_failed_file_delete_keeps_file_in_leftovers() {
        let server = CannedServer::start(|request| {
            if request.line() == "DELETE /storage/buckets/bucket1/files/file1" {
                Canned::error(StatusCode::INTERNAL_SERVER_ERROR, "Storage unavailable")
            } else {
                backend(request)
            }
        })
        .await
        .unwrap();
        let mut config = test_config(&[StepGroup::Storage]);
        config.upload_file = Some(testing::temp_file("workflow-leftover.txt", b"hello").unwrap());

        let mut workflow = Workflow::new(config, server.client());
        let err = workflow.run().await.unwrap_err();

        assert!(format!("{:#}", err).contains("Failed to delete file"));
        assert_eq!(
            workflow.context().leftovers(),
            vec![("file", "file1"), ("bucket", "bucket1")]
        );
    }

    #[tokio::test]
    async fn test_failed_deployment_leaves_function_behind() {
        let server = CannedServer::start(|request| {
            if request.line() == "GET /functions/fn1/deployments/dep1" {
                Canned::ok(json!({ "$id": "dep1", "status": "failed" }))
            } else {
                backend(request)
            }
        })
        .await
        .unwrap();
        let mut config = test_config(&[StepGroup::Functions]);
        config.function_code =
            Some(testing::temp_file("workflow-broken.tar.gz", b"broken").unwrap());

        let mut workflow = Workflow::new(config, server.client());
        let err = workflow.run().await.unwrap_err();

        assert!(format!("{:#}", err).contains("Deployment did not become ready"));
        assert!(!server.lines().iter().any(|line| line.contains("/executions")));
        assert_eq!(workflow.context().leftovers(), vec![("function", "fn1")]);
    }
}
