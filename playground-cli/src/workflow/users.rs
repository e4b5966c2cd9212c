//! User steps

use anyhow::{Context, Result};
use chrono::Utc;
use playground_core::domain::id;
use playground_core::dto::user::CreateUser;

use super::Workflow;
use crate::context::require;
use crate::theme;

impl Workflow {
    pub(super) async fn run_users(&mut self) -> Result<()> {
        self.create_user().await?;
        self.list_users().await?;
        self.delete_user().await
    }

    async fn create_user(&mut self) -> Result<()> {
        theme::info("Running Create User API");

        let name = Utc::now().timestamp().to_string();
        let user = self
            .client
            .create_user(CreateUser {
                user_id: id::unique(),
                email: Some(format!("{}@example.com", name)),
                phone: None,
                password: Some(format!("{}1234", name)),
                name: Some(name),
            })
            .await
            .context("Failed to create user")?;

        self.context.user_id = Some(user.id.clone());
        theme::print_json(&user);
        Ok(())
    }

    async fn list_users(&self) -> Result<()> {
        theme::info("Running List Users API");

        let users = self
            .client
            .list_users()
            .await
            .context("Failed to list users")?;

        theme::print_json(&users);
        Ok(())
    }

    async fn delete_user(&mut self) -> Result<()> {
        theme::info("Running Delete User API");

        let user_id = require(&self.context.user_id, "user")?;
        self.client
            .delete_user(user_id)
            .await
            .context("Failed to delete user")?;

        theme::success(&format!("Deleted user {}", user_id));
        self.context.user_id = None;
        Ok(())
    }
}
