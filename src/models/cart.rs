use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::entities::cart_items;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AddToCartRequest {
    pub product_id: i32,
    pub retailer_id: i32,
    #[serde(default = "default_quantity")]
    pub quantity: i32,
}

fn default_quantity() -> i32 {
    1
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CartItemResponse {
    pub id: i32,
    pub product_id: i32,
    pub retailer_id: i32,
    pub quantity: i32,
    #[serde(with = "rust_decimal::serde::float")]
    pub price: Decimal,
}

impl From<cart_items::Model> for CartItemResponse {
    fn from(item: cart_items::Model) -> Self {
        Self {
            id: item.id,
            product_id: item.product_id,
            retailer_id: item.retailer_id,
            quantity: item.quantity,
            price: item.price,
        }
    }
}
