//! Playground configuration
//!
//! Defines the endpoint, credentials and timing parameters the workflow runs
//! with. Built from command-line flags (with environment fallbacks) in
//! `main.rs`.

use std::path::PathBuf;
use std::time::Duration;

use crate::workflow::StepGroup;

/// Default API endpoint
pub const DEFAULT_ENDPOINT: &str = "https://cloud.appwrite.io/v1";

/// Playground configuration
///
/// All intervals are configurable to allow tuning for slow self-hosted
/// instances versus the hosted cloud.
#[derive(Debug, Clone)]
pub struct Config {
    /// API base URL (e.g., "https://cloud.appwrite.io/v1")
    pub endpoint: String,

    /// Project all resources are created in
    pub project_id: String,

    /// Server API key
    pub api_key: Option<String>,

    /// User session JWT, enables the account step
    pub jwt: Option<String>,

    /// How often to check a deployment build
    pub deployment_poll_interval: Duration,

    /// How often to check an asynchronous execution
    pub execution_poll_interval: Duration,

    /// Maximum time to wait for a deployment or execution, `None` waits forever
    pub poll_timeout: Option<Duration>,

    /// Pause between creating attributes and creating the index on them
    pub attribute_settle: Duration,

    /// Local file uploaded to the bucket
    pub upload_file: Option<PathBuf>,

    /// Code archive (tar.gz) deployed to the function
    pub function_code: Option<PathBuf>,

    /// Entrypoint inside the code archive
    pub function_entrypoint: String,

    /// Runtime of the created function
    pub function_runtime: String,

    /// Step groups to run; empty runs all of them
    pub groups: Vec<StepGroup>,
}

impl Config {
    /// Creates a new configuration with defaults
    pub fn new(endpoint: String, project_id: String) -> Self {
        Self {
            endpoint,
            project_id,
            api_key: None,
            jwt: None,
            deployment_poll_interval: Duration::from_secs(5),
            execution_poll_interval: Duration::from_secs(2),
            poll_timeout: Some(Duration::from_secs(300)), // 5 minutes
            attribute_settle: Duration::from_secs(2),
            upload_file: None,
            function_code: None,
            function_entrypoint: "main.py".to_string(),
            function_runtime: "python-3.9".to_string(),
            groups: Vec::new(),
        }
    }

    /// Whether the given step group is selected
    pub fn runs(&self, group: StepGroup) -> bool {
        self.groups.is_empty() || self.groups.contains(&group)
    }

    /// Validates the configuration
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.endpoint.is_empty() {
            anyhow::bail!("endpoint cannot be empty");
        }

        if !self.endpoint.starts_with("http://") && !self.endpoint.starts_with("https://") {
            anyhow::bail!("endpoint must start with http:// or https://");
        }

        if self.project_id.is_empty() {
            anyhow::bail!("project id cannot be empty");
        }

        let has_key = self.api_key.as_deref().is_some_and(|k| !k.is_empty());
        let has_jwt = self.jwt.as_deref().is_some_and(|j| !j.is_empty());
        if !has_key && !has_jwt {
            anyhow::bail!("either an API key or a JWT is required");
        }

        if self.deployment_poll_interval.is_zero() {
            anyhow::bail!("deployment poll interval must be greater than 0");
        }

        if self.execution_poll_interval.is_zero() {
            anyhow::bail!("execution poll interval must be greater than 0");
        }

        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new(DEFAULT_ENDPOINT.to_string(), String::new())
    }
}
