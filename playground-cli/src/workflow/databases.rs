//! Database steps
//!
//! Creates a "Movies" database with a typed collection, inserts and lists a
//! document, then deletes document, collection and database.

use anyhow::{Context, Result};
use playground_core::domain::id;
use playground_core::domain::permission::{self, Role};
use playground_core::dto::database::{
    CreateBooleanAttribute, CreateCollection, CreateDatabase, CreateDocument,
    CreateEmailAttribute, CreateFloatAttribute, CreateIndex, CreateIntegerAttribute,
    CreateStringAttribute, IndexType,
};
use tracing::info;

use super::Workflow;
use crate::context::require;
use crate::theme;

const DEFAULT_EMAIL: &str = "example@email.com";

impl Workflow {
    pub(super) async fn run_databases(&mut self) -> Result<()> {
        self.create_database().await?;
        self.create_collection().await?;
        self.list_collections().await?;
        self.create_document().await?;
        self.list_documents().await?;
        self.delete_document().await?;
        self.delete_collection().await?;
        self.delete_database().await
    }

    async fn create_database(&mut self) -> Result<()> {
        theme::info("Running Create Database API");

        let database = self
            .client
            .create_database(CreateDatabase {
                database_id: id::unique(),
                name: "Movies".to_string(),
                enabled: None,
            })
            .await
            .context("Failed to create database")?;

        self.context.database_id = Some(database.id.clone());
        theme::print_json(&database);
        Ok(())
    }

    async fn create_collection(&mut self) -> Result<()> {
        theme::info("Running Create Collection API");

        let database_id = require(&self.context.database_id, "database")?.to_string();

        let collection = self
            .client
            .create_collection(
                &database_id,
                CreateCollection {
                    collection_id: id::unique(),
                    name: "Movies".to_string(),
                    permissions: vec![permission::create(&Role::Any)],
                    document_security: true,
                },
            )
            .await
            .context("Failed to create collection")?;

        let collection_id = collection.id.clone();
        self.context.collection_id = Some(collection_id.clone());
        theme::print_json(&collection);

        self.create_attributes(&database_id, &collection_id).await?;

        // Attributes are built in the background; the index needs them to exist
        info!(
            "Waiting {:?} for attributes to be created",
            self.config.attribute_settle
        );
        tokio::time::sleep(self.config.attribute_settle).await;

        theme::info("Running Create Index API");
        let index = self
            .client
            .create_index(
                &database_id,
                &collection_id,
                CreateIndex {
                    key: "name_email_idx".to_string(),
                    index_type: IndexType::Fulltext,
                    attributes: vec!["email".to_string()],
                },
            )
            .await
            .context("Failed to create index")?;

        theme::print_json(&index);
        Ok(())
    }

    async fn create_attributes(&self, database_id: &str, collection_id: &str) -> Result<()> {
        let name = self
            .client
            .create_string_attribute(
                database_id,
                collection_id,
                CreateStringAttribute {
                    key: "name".to_string(),
                    size: 255,
                    required: true,
                    default: None,
                    array: None,
                },
            )
            .await
            .context("Failed to create attribute 'name'")?;
        theme::print_json(&name);

        let release_year = self
            .client
            .create_integer_attribute(
                database_id,
                collection_id,
                CreateIntegerAttribute {
                    key: "release_year".to_string(),
                    required: true,
                    min: Some(0),
                    max: Some(9999),
                    default: None,
                },
            )
            .await
            .context("Failed to create attribute 'release_year'")?;
        theme::print_json(&release_year);

        let rating = self
            .client
            .create_float_attribute(
                database_id,
                collection_id,
                CreateFloatAttribute {
                    key: "rating".to_string(),
                    required: true,
                    min: Some(0.0),
                    max: Some(99.99),
                    default: None,
                },
            )
            .await
            .context("Failed to create attribute 'rating'")?;
        theme::print_json(&rating);

        let kids = self
            .client
            .create_boolean_attribute(
                database_id,
                collection_id,
                CreateBooleanAttribute {
                    key: "kids".to_string(),
                    required: true,
                    default: None,
                },
            )
            .await
            .context("Failed to create attribute 'kids'")?;
        theme::print_json(&kids);

        let email = self
            .client
            .create_email_attribute(
                database_id,
                collection_id,
                CreateEmailAttribute {
                    key: "email".to_string(),
                    required: false,
                    default: Some(DEFAULT_EMAIL.to_string()),
                },
            )
            .await
            .context("Failed to create attribute 'email'")?;
        theme::print_json(&email);

        Ok(())
    }

    async fn list_collections(&self) -> Result<()> {
        theme::info("Running List Collections API");

        let database_id = require(&self.context.database_id, "database")?;
        let collections = self
            .client
            .list_collections(database_id)
            .await
            .context("Failed to list collections")?;

        theme::print_json(&collections);
        Ok(())
    }

    async fn create_document(&mut self) -> Result<()> {
        theme::info("Running Create Document API");

        let database_id = require(&self.context.database_id, "database")?;
        let collection_id = require(&self.context.collection_id, "collection")?;

        let document = self
            .client
            .create_document(
                database_id,
                collection_id,
                CreateDocument {
                    document_id: id::unique(),
                    data: serde_json::json!({
                        "name": "Spider Man",
                        "release_year": 1920,
                        "rating": 99,
                        "kids": false,
                        "email": DEFAULT_EMAIL,
                    }),
                    permissions: None,
                },
            )
            .await
            .context("Failed to create document")?;

        self.context.document_id = Some(document.id.clone());
        theme::print_json(&document);
        Ok(())
    }

    async fn list_documents(&self) -> Result<()> {
        theme::info("Running List Documents API");

        let database_id = require(&self.context.database_id, "database")?;
        let collection_id = require(&self.context.collection_id, "collection")?;

        let documents = self
            .client
            .list_documents(database_id, collection_id)
            .await
            .context("Failed to list documents")?;

        theme::print_json(&documents);
        Ok(())
    }

    async fn delete_document(&mut self) -> Result<()> {
        theme::info("Running Delete Document API");

        let database_id = require(&self.context.database_id, "database")?;
        let collection_id = require(&self.context.collection_id, "collection")?;
        let document_id = require(&self.context.document_id, "document")?;

        self.client
            .delete_document(database_id, collection_id, document_id)
            .await
            .context("Failed to delete document")?;

        theme::success(&format!("Deleted document {}", document_id));
        self.context.document_id = None;
        Ok(())
    }

    async fn delete_collection(&mut self) -> Result<()> {
        theme::info("Running Delete Collection API");

        let database_id = require(&self.context.database_id, "database")?;
        let collection_id = require(&self.context.collection_id, "collection")?;

        self.client
            .delete_collection(database_id, collection_id)
            .await
            .context("Failed to delete collection")?;

        theme::success(&format!("Deleted collection {}", collection_id));
        self.context.collection_id = None;
        Ok(())
    }

    async fn delete_database(&mut self) -> Result<()> {
        theme::info("Running Delete Database API");

        let database_id = require(&self.context.database_id, "database")?;

        self.client
            .delete_database(database_id)
            .await
            .context("Failed to delete database")?;

        theme::success(&format!("Deleted database {}", database_id));
        self.context.database_id = None;
        Ok(())
    }
}
