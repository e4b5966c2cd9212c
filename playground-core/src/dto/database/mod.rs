//! Database DTOs
//!
//! Requests for databases, collections, attributes, indexes and documents.

use serde::{Deserialize, Serialize};

/// Request to create a database
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateDatabase {
    pub database_id: String,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enabled: Option<bool>,
}

/// Request to create a collection inside a database
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateCollection {
    pub collection_id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub permissions: Vec<String>,
    pub document_security: bool,
}

/// Request to create a string attribute
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateStringAttribute {
    pub key: String,
    pub size: u32,
    pub required: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub array: Option<bool>,
}

/// Request to create an integer attribute
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateIntegerAttribute {
    pub key: String,
    pub required: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default: Option<i64>,
}

/// Request to create a float attribute
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateFloatAttribute {
    pub key: String,
    pub required: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default: Option<f64>,
}

/// Request to create a boolean attribute
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateBooleanAttribute {
    pub key: String,
    pub required: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default: Option<bool>,
}

/// Request to create an email attribute
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateEmailAttribute {
    pub key: String,
    pub required: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default: Option<String>,
}

/// Index kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IndexType {
    Key,
    Fulltext,
    Unique,
}

/// Request to create an index over one or more attributes
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateIndex {
    pub key: String,
    #[serde(rename = "type")]
    pub index_type: IndexType,
    pub attributes: Vec<String>,
}

/// Request to create a document
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateDocument {
    pub document_id: String,
    pub data: serde_json::Value,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub permissions: Option<Vec<String>>,
}
