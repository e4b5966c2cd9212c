//! Workflow context
//!
//! Carries the ids of resources created by earlier steps to the steps that
//! use or delete them. Each playground run owns exactly one context.

use anyhow::{Result, anyhow};

/// Ids of the resources created so far
#[derive(Debug, Default, Clone)]
pub struct WorkflowContext {
    pub user_id: Option<String>,
    pub database_id: Option<String>,
    pub collection_id: Option<String>,
    pub document_id: Option<String>,
    pub bucket_id: Option<String>,
    pub file_id: Option<String>,
    pub function_id: Option<String>,
    pub deployment_id: Option<String>,
    pub execution_id: Option<String>,
}

impl WorkflowContext {
    /// Resources that were created but not deleted, as `(kind, id)` pairs
    ///
    /// Deployments and executions are owned by their function and are not
    /// listed separately.
    pub fn leftovers(&self) -> Vec<(&'static str, &str)> {
        [
            ("user", &self.user_id),
            ("document", &self.document_id),
            ("collection", &self.collection_id),
            ("database", &self.database_id),
            ("file", &self.file_id),
            ("bucket", &self.bucket_id),
            ("function", &self.function_id),
        ]
        .into_iter()
        .filter_map(|(kind, id)| id.as_deref().map(|id| (kind, id)))
        .collect()
    }
}

/// Returns the id stored in `slot`, or an error naming the missing resource
pub fn require<'a>(slot: &'a Option<String>, resource: &str) -> Result<&'a str> {
    slot.as_deref()
        .ok_or_else(|| anyhow!("No {} has been created yet", resource))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_require_present() {
        let context = WorkflowContext {
            database_id: Some("db1".to_string()),
            ..Default::default()
        };

        assert_eq!(require(&context.database_id, "database").unwrap(), "db1");
    }

    #[test]
    fn test_require_missing_names_resource() {
        let context = WorkflowContext::default();
        let err = require(&context.bucket_id, "bucket").unwrap_err();

        assert_eq!(err.to_string(), "No bucket has been created yet");
    }

    #[test]
    fn test_leftovers_in_deletion_order() {
        let context = WorkflowContext {
            database_id: Some("db1".to_string()),
            collection_id: Some("c1".to_string()),
            deployment_id: Some("dep1".to_string()),
            ..Default::default()
        };

        assert_eq!(
            context.leftovers(),
            vec![("collection", "c1"), ("database", "db1")]
        );
        assert!(WorkflowContext::default().leftovers().is_empty());
    }
}
