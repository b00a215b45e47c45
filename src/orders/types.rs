//! Wire types for the Orders service.

use serde::{Deserialize, Serialize};

/// Order fields accepted on `POST /users/{uid}/order`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderFields {
    pub name: String,
    pub amount: f64,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
    /// Accepts the Orders service's short `qty` spelling too.
    #[serde(default, alias = "qty")]
    pub quantity: Option<u32>,
}

/// Create-order request sent to the Orders service.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateOrderRequest {
    pub name: String,
    /// Owning user id.
    pub customer_id: String,
    pub amount: f64,
    pub image: Option<String>,
    pub created_at: Option<String>,
    /// The Orders service wire format uses `qty`.
    #[serde(rename = "qty")]
    pub quantity: Option<u32>,
}

impl CreateOrderRequest {
    /// Build the remote request from inbound fields and the owning user id.
    pub fn for_user(user_id: &str, fields: OrderFields) -> Self {
        Self {
            name: fields.name,
            customer_id: user_id.to_string(),
            amount: fields.amount,
            image: fields.image,
            created_at: fields.created_at,
            quantity: fields.quantity,
        }
    }
}

/// Create-order response returned by the Orders service.
#[derive(Debug, Clone, Deserialize)]
pub struct CreatedOrder {
    /// Id assigned by the Orders service.
    #[serde(rename = "_id")]
    pub id: String,
}
