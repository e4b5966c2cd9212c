//! User DTOs

use serde::{Deserialize, Serialize};

/// Request to create a user
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateUser {
    pub user_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_user_omits_unset_fields() {
        let req = CreateUser {
            user_id: "u1".to_string(),
            email: Some("a@example.com".to_string()),
            phone: None,
            password: None,
            name: Some("a".to_string()),
        };

        assert_eq!(
            serde_json::to_value(&req).unwrap(),
            serde_json::json!({ "userId": "u1", "email": "a@example.com", "name": "a" })
        );
    }
}
