//! Function DTOs
//!
//! Requests for serverless functions and their executions. Deployments are
//! uploaded as multipart forms and have no JSON body.

use serde::{Deserialize, Serialize};

/// Request to create a function
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateFunction {
    pub function_id: String,
    pub name: String,
    pub runtime: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub execute: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub entrypoint: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timeout: Option<u32>,
}

/// Request to execute a function
///
/// With `async` set the backend answers immediately with a pending execution
/// that must be polled.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateExecution {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub body: Option<String>,
    #[serde(rename = "async")]
    pub is_async: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub method: Option<String>,
}

/// Deployment upload parameters
#[derive(Debug, Clone)]
pub struct CreateDeployment {
    pub function_id: String,
    pub entrypoint: String,
    pub code_path: std::path::PathBuf,
    pub activate: bool,
}
