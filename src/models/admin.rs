use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Dashboard payload; field names follow the admin frontend.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MetricsResponse {
    #[serde(with = "rust_decimal::serde::float")]
    pub revenue: Decimal,
    pub total_users: u64,
    pub orders_today: u64,
    pub active_users: u64,
    pub orders_this_week: u64,
    pub total_products: u64,
    pub total_stores: u64,
    pub top_products: Vec<TopProduct>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TopProduct {
    pub name: String,
    pub quantity: i64,
}

/// `date` is a prefix match (`2025-07-22`); `from`/`to` bound the date string
/// inclusively. Both compare the stored ISO-8601 text.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AdminOrdersQuery {
    pub date: Option<String>,
    pub from: Option<String>,
    pub to: Option<String>,
}
