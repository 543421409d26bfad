use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::entities::{order_items, orders};
use crate::models::common::check_amount;

/// Checkout payload as posted by the storefront.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderSubmission {
    pub user_id: i32,
    pub date: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub total: Decimal,
    pub payment: String,
    pub address: String,
    pub items: Vec<OrderItemInput>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderItemInput {
    pub product_name: String,
    pub quantity: i32,
    pub retailer: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub price: Decimal,
}

impl OrderSubmission {
    /// Shape checks that must pass before anything touches storage.
    ///
    /// Product and retailer names are free text and are not matched against
    /// the catalog; `total` is not compared with the line items.
    pub fn validate(&self) -> Result<(), String> {
        if self.items.is_empty() {
            return Err("Order must contain at least one item".to_string());
        }
        check_amount("Order total", self.total)?;
        if self.date.trim().is_empty() {
            return Err("Order date is required".to_string());
        }

        for (idx, item) in self.items.iter().enumerate() {
            if item.product_name.trim().is_empty() {
                return Err(format!("Item {} is missing a product name", idx));
            }
            if item.retailer.trim().is_empty() {
                return Err(format!("Item {} is missing a retailer", idx));
            }
            if item.quantity < 1 {
                return Err(format!(
                    "Item {} has invalid quantity {}",
                    idx, item.quantity
                ));
            }
            check_amount(&format!("Item {} price", idx), item.price)?;
        }

        Ok(())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderItemResponse {
    pub id: i32,
    pub order_id: i32,
    pub product_name: String,
    pub quantity: i32,
    pub retailer: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub price: Decimal,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderResponse {
    pub id: i32,
    pub user_id: i32,
    pub date: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub total: Decimal,
    pub payment: String,
    pub address: String,
    pub items: Vec<OrderItemResponse>,
    /// Only present on the placement response
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub points_awarded: Option<i32>,
}

impl OrderResponse {
    pub fn from_models(order: orders::Model, items: Vec<order_items::Model>) -> Self {
        Self {
            id: order.id,
            user_id: order.user_id,
            date: order.date,
            total: order.total,
            payment: order.payment,
            address: order.address,
            items: items.into_iter().map(OrderItemResponse::from).collect(),
            points_awarded: None,
        }
    }
}

impl From<order_items::Model> for OrderItemResponse {
    fn from(item: order_items::Model) -> Self {
        Self {
            id: item.id,
            order_id: item.order_id,
            product_name: item.product_name,
            quantity: item.quantity,
            retailer: item.retailer,
            price: item.price,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct OrdersQuery {
    #[serde(rename = "userId")]
    pub user_id: i32,
}
