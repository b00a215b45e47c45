//! User document types.

use serde::{Deserialize, Serialize};

/// A stored user document.
///
/// The `orders` sequence holds foreign references to orders owned by the
/// remote Orders service, never order content.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    /// Opaque document id.
    pub id: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub address: String,
    /// Ordered sequence of order ids owned by the Orders service.
    #[serde(default)]
    pub orders: Vec<String>,
}

/// Fields accepted when creating a user.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewUser {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub address: String,
    /// Optional initial order references.
    #[serde(default)]
    pub orders: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_user_wire_names() {
        let json = r#"{
            "firstName": "Ada",
            "lastName": "Lovelace",
            "email": "ada@example.com",
            "phone": "555-0100",
            "address": "12 Analytical Way"
        }"#;

        let user: NewUser = serde_json::from_str(json).unwrap();
        assert_eq!(user.first_name, "Ada");
        assert!(user.orders.is_empty());
    }

    #[test]
    fn test_user_serializes_camel_case() {
        let user = User {
            id: "u1".to_string(),
            first_name: "Ada".to_string(),
            last_name: "Lovelace".to_string(),
            email: "ada@example.com".to_string(),
            phone: "555-0100".to_string(),
            address: "12 Analytical Way".to_string(),
            orders: vec!["o1".to_string()],
        };

        let json = serde_json::to_string(&user).unwrap();
        assert!(json.contains("\"firstName\""));
        assert!(json.contains("\"orders\":[\"o1\"]"));
    }
}
