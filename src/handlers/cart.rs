use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    Json,
};

use crate::errors::ApiError;
use crate::handlers::auth::CurrentUser;
use crate::handlers::body_rejection;
use crate::models::cart::{AddToCartRequest, CartItemResponse};
use crate::services::cart;
use crate::AppState;

pub async fn get_cart(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
) -> Result<Json<Vec<CartItemResponse>>, ApiError> {
    Ok(Json(cart::list_cart(&state.db, user.id).await?))
}

pub async fn add_to_cart(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    payload: Result<Json<AddToCartRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<CartItemResponse>), ApiError> {
    let Json(req) = payload.map_err(body_rejection)?;
    let item = cart::add_to_cart(&state.db, user.id, &req).await?;
    Ok((StatusCode::CREATED, Json(item)))
}

pub async fn remove_from_cart(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Path(id): Path<i32>,
) -> Result<StatusCode, ApiError> {
    cart::remove_cart_item(&state.db, user.id, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
