use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;
use validator::Validate;

/// Largest quantity a single cart line may hold
pub const MAX_CART_QUANTITY: i32 = 99;

/// Cart line joined with the product document it points at
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct CartItem {
    pub id: Uuid,
    pub product_id: Uuid,
    pub quantity: i32,
    /// `None` once the product has been deleted
    pub product: Option<serde_json::Value>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct AddCartItem {
    pub product_id: Uuid,
    #[validate(range(min = 1, max = 99))]
    #[serde(default = "default_quantity")]
    pub quantity: i32,
}

#[derive(Debug, Deserialize, Validate)]
pub struct UpdateCartItem {
    #[validate(range(min = 1, max = 99))]
    pub quantity: i32,
}

fn default_quantity() -> i32 {
    1
}

/// Unused coupon joined with its offer
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Coupon {
    pub id: Uuid,
    pub offer_id: Uuid,
    pub code: String,
    pub offer: Option<serde_json::Value>,
    pub created_at: DateTime<Utc>,
}
