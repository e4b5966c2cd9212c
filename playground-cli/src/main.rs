//! Playground
//!
//! Exercises the backend API end to end: creates users, databases,
//! collections, documents, buckets, files and functions, prints every
//! response, then deletes what it created.
//!
//! Architecture:
//! - Configuration: flags with environment fallbacks
//! - Workflow: the ordered API steps and the context threaded between them
//! - Scheduler: waiting on deployment builds and asynchronous executions

mod config;
mod context;
mod scheduler;
mod theme;
mod workflow;

use std::path::PathBuf;
use std::time::Duration;

use anyhow::Result;
use clap::Parser;
use playground_client::BaasClient;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::{Config, DEFAULT_ENDPOINT};
use crate::workflow::{StepGroup, Workflow};

#[derive(Parser)]
#[command(name = "playground")]
#[command(about = "Backend API playground", long_about = None)]
struct Cli {
    /// API endpoint
    #[arg(long, env = "PLAYGROUND_ENDPOINT", default_value = DEFAULT_ENDPOINT)]
    endpoint: String,

    /// Project ID
    #[arg(long, env = "PLAYGROUND_PROJECT")]
    project: String,

    /// Server API key
    #[arg(long, env = "PLAYGROUND_API_KEY", hide_env_values = true)]
    api_key: Option<String>,

    /// User JWT, enables the account steps
    #[arg(long, env = "PLAYGROUND_JWT", hide_env_values = true)]
    jwt: Option<String>,

    /// Seconds between deployment status checks
    #[arg(long, default_value_t = 5)]
    deployment_poll_interval: u64,

    /// Seconds between execution status checks
    #[arg(long, default_value_t = 2)]
    execution_poll_interval: u64,

    /// Seconds to wait for a deployment or execution (0 waits forever)
    #[arg(long, default_value_t = 300)]
    poll_timeout: u64,

    /// Seconds to wait for attributes before creating the index
    #[arg(long, default_value_t = 2)]
    attribute_settle: u64,

    /// File to upload to the bucket
    #[arg(long)]
    upload_file: Option<PathBuf>,

    /// Function code archive (tar.gz) to deploy and execute
    #[arg(long)]
    function_code: Option<PathBuf>,

    /// Entrypoint inside the code archive
    #[arg(long, default_value = "main.py")]
    function_entrypoint: String,

    /// Function runtime
    #[arg(long, default_value = "python-3.9")]
    function_runtime: String,

    /// Only run these step groups (repeatable)
    #[arg(long, value_enum)]
    only: Vec<StepGroup>,
}

impl Cli {
    fn into_config(self) -> Config {
        let mut config = Config::new(self.endpoint, self.project);

        config.api_key = self.api_key;
        config.jwt = self.jwt;
        config.deployment_poll_interval = Duration::from_secs(self.deployment_poll_interval);
        config.execution_poll_interval = Duration::from_secs(self.execution_poll_interval);
        config.poll_timeout = match self.poll_timeout {
            0 => None,
            secs => Some(Duration::from_secs(secs)),
        };
        config.attribute_settle = Duration::from_secs(self.attribute_settle);
        config.upload_file = self.upload_file;
        config.function_code = self.function_code;
        config.function_entrypoint = self.function_entrypoint;
        config.function_runtime = self.function_runtime;
        config.groups = self.only;

        config
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging; stdout is reserved for responses
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "playground=info,playground_client=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let config = Cli::parse().into_config();
    config.validate()?;

    info!(
        "Loaded configuration: endpoint={}, project={}",
        config.endpoint, config.project_id
    );

    let mut workflow = Workflow::new(config.clone(), build_client(&config));

    if let Err(e) = workflow.run().await {
        theme::danger(&format!("Playground failed: {:#}", e));
        for (kind, id) in workflow.context().leftovers() {
            warn!("Left behind {} {}", kind, id);
        }
        return Err(e);
    }

    theme::success("Successfully ran playground!");
    Ok(())
}

fn build_client(config: &Config) -> BaasClient {
    let mut client =
        BaasClient::new(config.endpoint.clone()).with_project(config.project_id.clone());

    if let Some(key) = &config.api_key {
        client = client.with_key(key.clone());
    }
    if let Some(jwt) = &config.jwt {
        client = client.with_jwt(jwt.clone());
    }

    client
}
