//! Account steps

use anyhow::{Context, Result};
use tracing::info;

use super::Workflow;
use crate::theme;

impl Workflow {
    pub(super) async fn run_account(&mut self) -> Result<()> {
        if self.config.jwt.is_none() {
            info!("No JWT configured, skipping account steps");
            return Ok(());
        }

        self.get_account().await
    }

    async fn get_account(&self) -> Result<()> {
        theme::info("Running Get Account API");

        let account = self
            .client
            .get_account()
            .await
            .context("Failed to get account")?;

        theme::print_json(&account);
        Ok(())
    }
}
