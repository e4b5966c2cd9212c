//! Storage DTOs

use serde::{Deserialize, Serialize};

/// Request to create a storage bucket
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateBucket {
    pub bucket_id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub permissions: Vec<String>,
    pub file_security: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub maximum_file_size: Option<u64>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub allowed_file_extensions: Vec<String>,
}
