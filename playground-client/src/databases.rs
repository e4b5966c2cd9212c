//! Database endpoints
//!
//! Databases, collections, attributes, indexes and documents.

use crate::BaasClient;
use crate::error::Result;
use playground_core::domain::resource::{Resource, ResourceList};
use playground_core::dto::database::{
    CreateBooleanAttribute, CreateCollection, CreateDatabase, CreateDocument,
    CreateEmailAttribute, CreateFloatAttribute, CreateIndex, CreateIntegerAttribute,
    CreateStringAttribute,
};
use reqwest::Method;
use serde::Serialize;
use serde_json::Value;

fn collections_path(database_id: &str) -> String {
    format!("/databases/{}/collections", database_id)
}

fn collection_path(database_id: &str, collection_id: &str) -> String {
    format!("{}/{}", collections_path(database_id), collection_id)
}

impl BaasClient {
    // =============================================================================
    // Databases
    // =============================================================================

    /// Create a new database
    ///
    /// # Arguments
    /// * `req` - The database creation request
    ///
    /// # Returns
    /// The created database
    pub async fn create_database(&self, req: CreateDatabase) -> Result<Resource> {
        let response = self
            .request(Method::POST, "/databases")
            .json(&req)
            .send()
            .await?;

        self.handle_response(response).await
    }

    /// Delete a database and everything in it
    pub async fn delete_database(&self, database_id: &str) -> Result<()> {
        let path = format!("/databases/{}", database_id);
        let response = self.request(Method::DELETE, &path).send().await?;

        self.handle_empty_response(response).await
    }

    // =============================================================================
    // Collections
    // =============================================================================

    /// Create a collection inside a database
    ///
    /// # Arguments
    /// * `database_id` - The owning database
    /// * `req` - The collection creation request
    pub async fn create_collection(
        &self,
        database_id: &str,
        req: CreateCollection,
    ) -> Result<Resource> {
        let response = self
            .request(Method::POST, &collections_path(database_id))
            .json(&req)
            .send()
            .await?;

        self.handle_response(response).await
    }

    /// List collections of a database
    pub async fn list_collections(&self, database_id: &str) -> Result<ResourceList> {
        let response = self
            .request(Method::GET, &collections_path(database_id))
            .send()
            .await?;

        self.handle_response(response).await
    }

    /// Delete a collection
    pub async fn delete_collection(&self, database_id: &str, collection_id: &str) -> Result<()> {
        let response = self
            .request(
                Method::DELETE,
                &collection_path(database_id, collection_id),
            )
            .send()
            .await?;

        self.handle_empty_response(response).await
    }

    // =============================================================================
    // Attributes
    // =============================================================================

    /// Create an attribute of the given kind (`string`, `integer`, ...)
    ///
    /// Attributes are created asynchronously on the server: the response
    /// describes an attribute that may still be `processing`. Attributes are
    /// keyed by `key` and carry no `$id`, so the body is returned as plain JSON.
    async fn create_attribute<B: Serialize>(
        &self,
        database_id: &str,
        collection_id: &str,
        kind: &str,
        body: &B,
    ) -> Result<Value> {
        let path = format!(
            "{}/attributes/{}",
            collection_path(database_id, collection_id),
            kind
        );
        let response = self.request(Method::POST, &path).json(body).send().await?;

        self.handle_response(response).await
    }

    pub async fn create_string_attribute(
        &self,
        database_id: &str,
        collection_id: &str,
        req: CreateStringAttribute,
    ) -> Result<Value> {
        self.create_attribute(database_id, collection_id, "string", &req)
            .await
    }

    pub async fn create_integer_attribute(
        &self,
        database_id: &str,
        collection_id: &str,
        req: CreateIntegerAttribute,
    ) -> Result<Value> {
        self.create_attribute(database_id, collection_id, "integer", &req)
            .await
    }

    pub async fn create_float_attribute(
        &self,
        database_id: &str,
        collection_id: &str,
        req: CreateFloatAttribute,
    ) -> Result<Value> {
        self.create_attribute(database_id, collection_id, "float", &req)
            .await
    }

    pub async fn create_boolean_attribute(
        &self,
        database_id: &str,
        collection_id: &str,
        req: CreateBooleanAttribute,
    ) -> Result<Value> {
        self.create_attribute(database_id, collection_id, "boolean", &req)
            .await
    }

    pub async fn create_email_attribute(
        &self,
        database_id: &str,
        collection_id: &str,
        req: CreateEmailAttribute,
    ) -> Result<Value> {
        self.create_attribute(database_id, collection_id, "email", &req)
            .await
    }

    // =============================================================================
    // Indexes
    // =============================================================================

    /// Create an index over existing attributes
    ///
    /// Like attributes, indexes are keyed by `key` rather than `$id`.
    pub async fn create_index(
        &self,
        database_id: &str,
        collection_id: &str,
        req: CreateIndex,
    ) -> Result<Value> {
        let path = format!("{}/indexes", collection_path(database_id, collection_id));
        let response = self.request(Method::POST, &path).json(&req).send().await?;

        self.handle_response(response).await
    }

    // =============================================================================
    // Documents
    // =============================================================================

    /// Create a document in a collection
    pub async fn create_document(
        &self,
        database_id: &str,
        collection_id: &str,
        req: CreateDocument,
    ) -> Result<Resource> {
        let path = format!("{}/documents", collection_path(database_id, collection_id));
        let response = self.request(Method::POST, &path).json(&req).send().await?;

        self.handle_response(response).await
    }

    /// List documents of a collection
    pub async fn list_documents(
        &self,
        database_id: &str,
        collection_id: &str,
    ) -> Result<ResourceList> {
        let path = format!("{}/documents", collection_path(database_id, collection_id));
        let response = self.request(Method::GET, &path).send().await?;

        self.handle_response(response).await
    }

    /// Delete a document
    pub async fn delete_document(
        &self,
        database_id: &str,
        collection_id: &str,
        document_id: &str,
    ) -> Result<()> {
        let path = format!(
            "{}/documents/{}",
            collection_path(database_id, collection_id),
            document_id
        );
        let response = self.request(Method::DELETE, &path).send().await?;

        self.handle_empty_response(response).await
    }
}
