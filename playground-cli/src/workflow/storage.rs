//! Storage steps

use anyhow::{Context, Result};
use playground_core::domain::id;
use playground_core::domain::permission::{self, Role};
use playground_core::dto::storage::CreateBucket;
use tracing::info;

use super::Workflow;
use crate::context::require;
use crate::theme;

impl Workflow {
    pub(super) async fn run_storage(&mut self) -> Result<()> {
        self.create_bucket().await?;
        self.list_buckets().await?;
        self.upload_file().await?;
        self.list_files().await?;
        self.delete_file().await?;
        self.delete_bucket().await
    }

    async fn create_bucket(&mut self) -> Result<()> {
        theme::info("Running Create Bucket API");

        let bucket = self
            .client
            .create_bucket(CreateBucket {
                bucket_id: id::unique(),
                name: "awesome-bucket".to_string(),
                permissions: vec![permission::read(&Role::Any), permission::create(&Role::Any)],
                file_security: false,
                maximum_file_size: None,
                allowed_file_extensions: Vec::new(),
            })
            .await
            .context("Failed to create bucket")?;

        self.context.bucket_id = Some(bucket.id.clone());
        theme::print_json(&bucket);
        Ok(())
    }

    async fn list_buckets(&self) -> Result<()> {
        theme::info("Running List Buckets API");

        let buckets = self
            .client
            .list_buckets()
            .await
            .context("Failed to list buckets")?;

        theme::print_json(&buckets);
        Ok(())
    }

    async fn upload_file(&mut self) -> Result<()> {
        let Some(path) = self.config.upload_file.clone() else {
            theme::warning("Skipping Upload File API: no file to upload");
            return Ok(());
        };

        theme::info("Running Upload File API");

        let bucket_id = require(&self.context.bucket_id, "bucket")?;
        let file = self
            .client
            .upload_file(
                bucket_id,
                &id::unique(),
                &path,
                &[permission::read(&Role::Any)],
            )
            .await
            .with_context(|| format!("Failed to upload {}", path.display()))?;

        self.context.file_id = Some(file.id.clone());
        theme::print_json(&file);
        Ok(())
    }

    async fn list_files(&self) -> Result<()> {
        theme::info("Running List Files API");

        let bucket_id = require(&self.context.bucket_id, "bucket")?;
        let files = self
            .client
            .list_files(bucket_id)
            .await
            .context("Failed to list files")?;

        theme::print_json(&files);
        Ok(())
    }

    async fn delete_file(&mut self) -> Result<()> {
        if self.context.file_id.is_none() {
            info!("No file was uploaded, nothing to delete");
            return Ok(());
        }

        theme::info("Running Delete File API");

        let bucket_id = require(&self.context.bucket_id, "bucket")?;
        let file_id = require(&self.context.file_id, "file")?;
        self.client
            .delete_file(bucket_id, file_id)
            .await
            .context("Failed to delete file")?;

        theme::success(&format!("Deleted file {}", file_id));
        self.context.file_id = None;
        Ok(())
    }

    async fn delete_bucket(&mut self) -> Result<()> {
        theme::info("Running Delete Bucket API");

        let bucket_id = require(&self.context.bucket_id, "bucket")?;
        self.client
            .delete_bucket(bucket_id)
            .await
            .context("Failed to delete bucket")?;

        theme::success(&format!("Deleted bucket {}", bucket_id));
        self.context.bucket_id = None;
        Ok(())
    }
}
