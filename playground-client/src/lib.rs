//! Playground HTTP Client
//!
//! A thin, typed HTTP client for the backend-as-a-service REST API exercised by
//! the playground: users, databases, storage and functions.
//!
//! Every request is scoped to a project and authenticated with either a
//! server API key or a user JWT.
//!
//! # Example
//!
//! ```no_run
//! use playground_client::BaasClient;
//! use playground_core::domain::id;
//! use playground_core::dto::database::CreateDatabase;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let client = BaasClient::new("https://cloud.appwrite.io/v1")
//!         .with_project("<PROJECT_ID>")
//!         .with_key("<API_KEY>");
//!
//!     let database = client
//!         .create_database(CreateDatabase {
//!             database_id: id::unique(),
//!             name: "Movies".to_string(),
//!             enabled: None,
//!         })
//!         .await?;
//!
//!     println!("Created database: {}", database.id);
//!     Ok(())
//! }
//! ```

mod account;
mod databases;
pub mod error;
mod functions;
pub mod jobs;
mod storage;
#[cfg(any(test, feature = "testing"))]
pub mod testing;
mod upload;
mod users;

// Re-export commonly used types
pub use error::{ClientError, Result};
pub use jobs::JobStatusSource;

use reqwest::{Client, Method, RequestBuilder};
use serde::de::DeserializeOwned;
use tracing::debug;

const PROJECT_HEADER: &str = "x-appwrite-project";
const KEY_HEADER: &str = "x-appwrite-key";
const JWT_HEADER: &str = "x-appwrite-jwt";
const RESPONSE_FORMAT_HEADER: &str = "x-appwrite-response-format";
const RESPONSE_FORMAT: &str = "1.5.0";

/// HTTP client for the backend API
///
/// Endpoint methods are grouped by service:
/// - Account and users
/// - Databases, collections, attributes, indexes and documents
/// - Storage buckets and files
/// - Functions, deployments and executions
#[derive(Debug, Clone)]
pub struct BaasClient {
    /// Base URL of the API (e.g., "https://cloud.appwrite.io/v1")
    endpoint: String,
    /// Project every request is scoped to
    project: Option<String>,
    /// Server API key
    key: Option<String>,
    /// User session JWT
    jwt: Option<String>,
    /// HTTP client instance
    client: Client,
}

impl BaasClient {
    /// Create a new client for the given API endpoint
    ///
    /// # Example
    /// ```
    /// use playground_client::BaasClient;
    ///
    /// let client = BaasClient::new("https://cloud.appwrite.io/v1/");
    /// assert_eq!(client.endpoint(), "https://cloud.appwrite.io/v1");
    /// ```
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self::with_client(endpoint, Client::new())
    }

    /// Create a new client with a custom HTTP client
    ///
    /// This allows you to configure timeouts, proxies, TLS settings, etc.
    pub fn with_client(endpoint: impl Into<String>, client: Client) -> Self {
        let endpoint = endpoint.into();
        Self {
            endpoint: endpoint.trim_end_matches('/').to_string(),
            project: None,
            key: None,
            jwt: None,
            client,
        }
    }

    /// Scope requests to a project
    pub fn with_project(mut self, project: impl Into<String>) -> Self {
        self.project = Some(project.into());
        self
    }

    /// Authenticate with a server API key
    pub fn with_key(mut self, key: impl Into<String>) -> Self {
        self.key = Some(key.into());
        self
    }

    /// Authenticate as a user with a session JWT
    pub fn with_jwt(mut self, jwt: impl Into<String>) -> Self {
        self.jwt = Some(jwt.into());
        self
    }

    /// Get the API endpoint
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Get the project id, if set
    pub fn project(&self) -> Option<&str> {
        self.project.as_deref()
    }

    // =============================================================================
    // Request Builders
    // =============================================================================

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.endpoint, path)
    }

    /// Start a request with the project and credential headers attached
    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let url = self.url(path);
        debug!("{} {}", method, url);

        let mut builder = self
            .client
            .request(method, url)
            .header(RESPONSE_FORMAT_HEADER, RESPONSE_FORMAT);

        if let Some(project) = &self.project {
            builder = builder.header(PROJECT_HEADER, project);
        }
        if let Some(key) = &self.key {
            builder = builder.header(KEY_HEADER, key);
        }
        if let Some(jwt) = &self.jwt {
            builder = builder.header(JWT_HEADER, jwt);
        }

        builder
    }

    // =============================================================================
    // Response Handlers
    // =============================================================================

    /// Turn a non-success status into an error carrying the API's message
    async fn check_status(response: reqwest::Response) -> Result<reqwest::Response> {
        let status = response.status();

        if status.is_success() {
            return Ok(response);
        }

        let error_text = response
            .text()
            .await
            .unwrap_or_else(|_| "Unknown error".to_string());
        Err(ClientError::from_body(status.as_u16(), &error_text))
    }

    /// Handle an API response and deserialize JSON
    ///
    /// This method checks the status code and returns an appropriate error if
    /// the request failed, or deserializes the response body if successful.
    async fn handle_response<T: DeserializeOwned>(&self, response: reqwest::Response) -> Result<T> {
        Self::check_status(response)
            .await?
            .json()
            .await
            .map_err(|e| ClientError::ParseError(format!("Failed to parse JSON response: {}", e)))
    }

    /// Handle an API response that returns no content (e.g., DELETE operations)
    async fn handle_empty_response(&self, response: reqwest::Response) -> Result<()> {
        Self::check_status(response).await.map(|_| ())
    }
}
