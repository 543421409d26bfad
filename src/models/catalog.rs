use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::entities::{products, retailers};

pub const DEFAULT_PAGE_LIMIT: u64 = 100;
pub const MAX_PAGE_LIMIT: u64 = 100;

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProductsQuery {
    pub skip: Option<u64>,
    pub limit: Option<u64>,
}

impl ProductsQuery {
    /// Resolved (offset, limit) with the limit clamped to 1..=100.
    pub fn page(&self) -> (u64, u64) {
        let skip = self.skip.unwrap_or(0);
        let limit = self
            .limit
            .unwrap_or(DEFAULT_PAGE_LIMIT)
            .clamp(1, MAX_PAGE_LIMIT);
        (skip, limit)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RetailerResponse {
    pub id: i32,
    pub name: String,
    pub logo: Option<String>,
    pub description: Option<String>,
    pub rating: Option<f64>,
    pub delivery_options: Option<String>,
    pub product_id: i32,
    #[serde(default, with = "rust_decimal::serde::float_option")]
    pub price: Option<Decimal>,
}

impl From<retailers::Model> for RetailerResponse {
    fn from(r: retailers::Model) -> Self {
        Self {
            id: r.id,
            name: r.name,
            logo: r.logo,
            description: r.description,
            rating: r.rating,
            delivery_options: r.delivery_options,
            product_id: r.product_id,
            price: r.price,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductResponse {
    pub id: i32,
    pub name: String,
    pub category: String,
    pub image: Option<String>,
    pub description: Option<String>,
    /// Lowest offer price at the time of the last catalog change
    #[serde(default, with = "rust_decimal::serde::float_option")]
    pub price: Option<Decimal>,
    pub retailers: Vec<RetailerResponse>,
}

impl ProductResponse {
    pub fn from_models(product: products::Model, offers: Vec<retailers::Model>) -> Self {
        Self {
            id: product.id,
            name: product.name,
            category: product.category,
            image: product.image,
            description: product.description,
            price: product.price,
            retailers: offers.into_iter().map(RetailerResponse::from).collect(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RetailerInput {
    pub name: String,
    pub logo: Option<String>,
    pub description: Option<String>,
    pub rating: Option<f64>,
    pub delivery_options: Option<String>,
    #[serde(with = "rust_decimal::serde::float")]
    pub price: Decimal,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateProductRequest {
    pub name: String,
    pub category: String,
    pub image: Option<String>,
    pub description: Option<String>,
    /// Used as the cached price only when no offers are supplied
    #[serde(default, with = "rust_decimal::serde::float_option")]
    pub price: Option<Decimal>,
    #[serde(default)]
    pub retailers: Vec<RetailerInput>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateProductRequest {
    pub name: Option<String>,
    pub category: Option<String>,
    pub image: Option<String>,
    pub description: Option<String>,
}
