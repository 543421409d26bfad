//! Dashboard aggregates. Everything is recomputed per request.
//!
//! Order dates are stored as client ISO-8601 strings, so day and week
//! windows are expressed as string prefix / lower-bound comparisons.

use chrono::{Datelike, Duration, NaiveDate};
use rust_decimal::Decimal;
use sea_orm::sea_query::Expr;
use sea_orm::{
    ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder,
    QuerySelect,
};

use crate::entities::{order_items, orders, prelude::*, retailers, users};
use crate::errors::ServiceResult;
use crate::models::account::UserOut;
use crate::models::admin::{AdminOrdersQuery, MetricsResponse, TopProduct};
use crate::models::order::OrderResponse;
use crate::services::order::with_items;

pub const TOP_PRODUCTS: u64 = 5;

fn week_start(today: NaiveDate) -> NaiveDate {
    today - Duration::days(today.weekday().num_days_from_monday() as i64)
}

pub async fn metrics(db: &DatabaseConnection, today: NaiveDate) -> ServiceResult<MetricsResponse> {
    let today_prefix = today.format("%Y-%m-%d").to_string();
    let week_prefix = week_start(today).format("%Y-%m-%d").to_string();

    let revenue = Orders::find()
        .select_only()
        .column_as(Expr::col(orders::Column::Total).sum(), "revenue")
        .into_tuple::<Option<Decimal>>()
        .one(db)
        .await?
        .flatten()
        .unwrap_or(Decimal::ZERO);

    let total_users = Users::find().count(db).await?;

    let orders_today = Orders::find()
        .filter(orders::Column::Date.starts_with(&today_prefix))
        .count(db)
        .await?;

    let active_users = Orders::find()
        .select_only()
        .column(orders::Column::UserId)
        .distinct()
        .filter(orders::Column::Date.starts_with(&today_prefix))
        .count(db)
        .await?;

    let orders_this_week = Orders::find()
        .filter(orders::Column::Date.gte(week_prefix.as_str()))
        .count(db)
        .await?;

    let total_products = Products::find().count(db).await?;

    let total_stores = Retailers::find()
        .select_only()
        .column(retailers::Column::Name)
        .distinct()
        .count(db)
        .await?;

    let top_products = top_products(db, TOP_PRODUCTS).await?;

    tracing::debug!(
        "Metrics for {}: {} orders today, revenue {}",
        today_prefix,
        orders_today,
        revenue
    );

    Ok(MetricsResponse {
        revenue,
        total_users,
        orders_today,
        active_users,
        orders_this_week,
        total_products,
        total_stores,
        top_products,
    })
}

/// Product names ranked by quantity sold across all orders.
pub async fn top_products(db: &DatabaseConnection, limit: u64) -> ServiceResult<Vec<TopProduct>> {
    let rows = OrderItems::find()
        .select_only()
        .column(order_items::Column::ProductName)
        .column_as(Expr::col(order_items::Column::Quantity).sum(), "quantity")
        .group_by(order_items::Column::ProductName)
        .order_by_desc(Expr::col(order_items::Column::Quantity).sum())
        .order_by_asc(order_items::Column::ProductName)
        .limit(limit)
        .into_tuple::<(String, i64)>()
        .all(db)
        .await?;

    Ok(rows
        .into_iter()
        .map(|(name, quantity)| TopProduct { name, quantity })
        .collect())
}

pub async fn list_users(db: &DatabaseConnection) -> ServiceResult<Vec<UserOut>> {
    let users = Users::find()
        .order_by_asc(users::Column::Id)
        .all(db)
        .await?;

    Ok(users.into_iter().map(UserOut::from).collect())
}

pub async fn list_orders(
    db: &DatabaseConnection,
    filter: &AdminOrdersQuery,
) -> ServiceResult<Vec<OrderResponse>> {
    let mut query = Orders::find();

    if let Some(prefix) = filter.date.as_deref().filter(|d| !d.is_empty()) {
        query = query.filter(orders::Column::Date.starts_with(prefix));
    }
    if let Some(from) = filter.from.as_deref().filter(|d| !d.is_empty()) {
        query = query.filter(orders::Column::Date.gte(from));
    }
    if let Some(to) = filter.to.as_deref().filter(|d| !d.is_empty()) {
        // A bare date includes that whole day
        query = match NaiveDate::parse_from_str(to, "%Y-%m-%d") {
            Ok(day) => {
                let next = (day + Duration::days(1)).format("%Y-%m-%d").to_string();
                query.filter(orders::Column::Date.lt(next))
            }
            Err(_) => query.filter(orders::Column::Date.lte(to)),
        };
    }

    let orders = query
        .order_by_desc(orders::Column::Id)
        .all(db)
        .await?;

    Ok(with_items(db, orders).await?)
}
