//! Account endpoints

use crate::BaasClient;
use crate::error::Result;
use playground_core::domain::resource::Resource;
use reqwest::Method;

impl BaasClient {
    /// Get the account of the currently authenticated user
    ///
    /// Only meaningful when the client authenticates with a JWT; an API key
    /// has no associated account.
    pub async fn get_account(&self) -> Result<Resource> {
        let response = self.request(Method::GET, "/account").send().await?;

        self.handle_response(response).await
    }
}
