//! Storage endpoints
//!
//! Buckets and the files stored in them.

use std::path::Path;

use crate::BaasClient;
use crate::error::Result;
use crate::upload::Upload;
use playground_core::domain::resource::{Resource, ResourceList};
use playground_core::dto::storage::CreateBucket;
use reqwest::Method;

fn files_path(bucket_id: &str) -> String {
    format!("/storage/buckets/{}/files", bucket_id)
}

impl BaasClient {
    // =============================================================================
    // Buckets
    // =============================================================================

    /// Create a storage bucket
    pub async fn create_bucket(&self, req: CreateBucket) -> Result<Resource> {
        let response = self
            .request(Method::POST, "/storage/buckets")
            .json(&req)
            .send()
            .await?;

        self.handle_response(response).await
    }

    /// List storage buckets
    pub async fn list_buckets(&self) -> Result<ResourceList> {
        let response = self.request(Method::GET, "/storage/buckets").send().await?;

        self.handle_response(response).await
    }

    /// Delete a bucket and its files
    pub async fn delete_bucket(&self, bucket_id: &str) -> Result<()> {
        let path = format!("/storage/buckets/{}", bucket_id);
        let response = self.request(Method::DELETE, &path).send().await?;

        self.handle_empty_response(response).await
    }

    // =============================================================================
    // Files
    // =============================================================================

    /// Upload a local file into a bucket
    ///
    /// # Arguments
    /// * `bucket_id` - The target bucket
    /// * `file_id` - Id for the new file
    /// * `file_path` - Local file to upload
    /// * `permissions` - Permission strings for the file
    pub async fn upload_file(
        &self,
        bucket_id: &str,
        file_id: &str,
        file_path: &Path,
        permissions: &[String],
    ) -> Result<Resource> {
        let path = files_path(bucket_id);

        let mut fields = vec![("fileId", file_id.to_string())];
        fields.extend(permissions.iter().map(|p| ("permissions[]", p.clone())));

        self.upload(Upload {
            path: &path,
            fields,
            file_field: "file",
            file_path,
        })
        .await
    }

    /// List files in a bucket
    pub async fn list_files(&self, bucket_id: &str) -> Result<ResourceList> {
        let response = self
            .request(Method::GET, &files_path(bucket_id))
            .send()
            .await?;

        self.handle_response(response).await
    }

    /// Delete a file from a bucket
    pub async fn delete_file(&self, bucket_id: &str, file_id: &str) -> Result<()> {
        let path = format!("{}/{}", files_path(bucket_id), file_id);
        let response = self.request(Method::DELETE, &path).send().await?;

        self.handle_empty_response(response).await
    }
}
