//! Generic backend resources
//!
//! Every backend document carries a `$id` plus type-specific fields. The
//! playground only needs the id to chain calls together, so the rest is kept
//! as raw JSON and printed verbatim.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A single backend document (user, database, collection, bucket, ...)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Resource {
    #[serde(rename = "$id")]
    pub id: String,

    #[serde(flatten)]
    pub fields: Map<String, Value>,
}

/// A list envelope: `{ "total": N, "<items>": [...] }`
///
/// The item key differs per endpoint (`users`, `collections`, `files`, ...),
/// so everything except `total` is kept in `fields`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResourceList {
    pub total: u64,

    #[serde(flatten)]
    pub fields: Map<String, Value>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resource_keeps_unknown_fields() {
        let raw = serde_json::json!({
            "$id": "db1",
            "name": "Movies",
            "$createdAt": "2024-01-01T00:00:00.000+00:00",
        });
        let resource: Resource = serde_json::from_value(raw.clone()).unwrap();

        assert_eq!(resource.id, "db1");
        assert_eq!(resource.fields["name"], "Movies");
        assert_eq!(serde_json::to_value(&resource).unwrap(), raw);
    }

    #[test]
    fn test_list_keeps_items_under_their_key() {
        let raw = serde_json::json!({
            "total": 2,
            "users": [{ "$id": "u1" }, { "$id": "u2" }],
        });
        let list: ResourceList = serde_json::from_value(raw.clone()).unwrap();

        assert_eq!(list.total, 2);
        assert_eq!(list.fields["users"].as_array().map(Vec::len), Some(2));
        assert_eq!(serde_json::to_value(&list).unwrap(), raw);
    }

    #[test]
    fn test_resource_requires_id() {
        let raw = serde_json::json!({ "key": "name", "type": "string" });
        assert!(serde_json::from_value::<Resource>(raw).is_err());
    }
}
