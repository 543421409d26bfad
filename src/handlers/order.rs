use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Query, State,
    },
    http::StatusCode,
    Json,
};

use crate::errors::ApiError;
use crate::handlers::body_rejection;
use crate::models::common::ErrorResponse;
use crate::models::order::{OrderResponse, OrderSubmission, OrdersQuery};
use crate::services::order;
use crate::AppState;

// POST /api/orders
pub async fn create_order(
    State(state): State<AppState>,
    payload: Result<Json<OrderSubmission>, JsonRejection>,
) -> Result<(StatusCode, Json<OrderResponse>), ApiError> {
    let Json(submission) = payload.map_err(body_rejection)?;
    let placed = order::place_order(&state.db, &submission).await?;
    Ok((StatusCode::CREATED, Json(placed)))
}

// GET /api/orders?userId=
pub async fn get_orders(
    State(state): State<AppState>,
    query: Result<Query<OrdersQuery>, QueryRejection>,
) -> Result<Json<Vec<OrderResponse>>, ApiError> {
    let Query(query) = query.map_err(|e| {
        (
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse {
                error: e.body_text(),
            }),
        )
    })?;

    let orders = order::orders_for_user(&state.db, query.user_id).await?;
    Ok(Json(orders))
}
