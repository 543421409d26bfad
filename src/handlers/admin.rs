use axum::{
    extract::{Query, State},
    Json,
};
use chrono::Utc;

use crate::errors::ApiError;
use crate::handlers::auth::AdminUser;
use crate::models::account::UserOut;
use crate::models::admin::{AdminOrdersQuery, MetricsResponse};
use crate::models::order::OrderResponse;
use crate::services::admin;
use crate::AppState;

pub async fn metrics(
    State(state): State<AppState>,
    AdminUser(_admin): AdminUser,
) -> Result<Json<MetricsResponse>, ApiError> {
    let today = Utc::now().date_naive();
    Ok(Json(admin::metrics(&state.db, today).await?))
}

pub async fn users(
    State(state): State<AppState>,
    AdminUser(_admin): AdminUser,
) -> Result<Json<Vec<UserOut>>, ApiError> {
    Ok(Json(admin::list_users(&state.db).await?))
}

pub async fn orders(
    State(state): State<AppState>,
    AdminUser(_admin): AdminUser,
    Query(filter): Query<AdminOrdersQuery>,
) -> Result<Json<Vec<OrderResponse>>, ApiError> {
    Ok(Json(admin::list_orders(&state.db, &filter).await?))
}
