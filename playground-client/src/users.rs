//! User endpoints

use crate::BaasClient;
use crate::error::Result;
use playground_core::domain::resource::{Resource, ResourceList};
use playground_core::dto::user::CreateUser;
use reqwest::Method;

impl BaasClient {
    // =============================================================================
    // Users
    // =============================================================================

    /// Create a new user
    ///
    /// # Arguments
    /// * `req` - The user creation request
    ///
    /// # Returns
    /// The created user
    pub async fn create_user(&self, req: CreateUser) -> Result<Resource> {
        let response = self
            .request(Method::POST, "/users")
            .json(&req)
            .send()
            .await?;

        self.handle_response(response).await
    }

    /// List users in the project
    ///
    /// # Returns
    /// A list envelope with the users under `users`
    pub async fn list_users(&self) -> Result<ResourceList> {
        let response = self.request(Method::GET, "/users").send().await?;

        self.handle_response(response).await
    }

    /// Delete a user
    ///
    /// # Arguments
    /// * `user_id` - The user ID to delete
    pub async fn delete_user(&self, user_id: &str) -> Result<()> {
        let path = format!("/users/{}", user_id);
        let response = self.request(Method::DELETE, &path).send().await?;

        self.handle_empty_response(response).await
    }
}
