use axum::{
    extract::{rejection::JsonRejection, Path, Query, State},
    http::StatusCode,
    Json,
};

use crate::errors::ApiError;
use crate::handlers::auth::AdminUser;
use crate::handlers::body_rejection;
use crate::models::catalog::{
    CreateProductRequest, ProductResponse, ProductsQuery, RetailerInput, RetailerResponse,
    UpdateProductRequest,
};
use crate::services::catalog;
use crate::AppState;

pub async fn list_products(
    State(state): State<AppState>,
    Query(query): Query<ProductsQuery>,
) -> Result<Json<Vec<ProductResponse>>, ApiError> {
    Ok(Json(catalog::list_products(&state.db, &query).await?))
}

pub async fn get_product(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<ProductResponse>, ApiError> {
    Ok(Json(catalog::get_product(&state.db, id).await?))
}

pub async fn best_price(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<RetailerResponse>, ApiError> {
    Ok(Json(catalog::best_offer(&state.db, id).await?))
}

pub async fn create_product(
    State(state): State<AppState>,
    AdminUser(admin): AdminUser,
    payload: Result<Json<CreateProductRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<ProductResponse>), ApiError> {
    let Json(req) = payload.map_err(body_rejection)?;
    tracing::info!("Admin {} creating product '{}'", admin.id, req.name);
    let product = catalog::create_product(&state.db, &req).await?;
    Ok((StatusCode::CREATED, Json(product)))
}

pub async fn update_product(
    State(state): State<AppState>,
    AdminUser(_admin): AdminUser,
    Path(id): Path<i32>,
    payload: Result<Json<UpdateProductRequest>, JsonRejection>,
) -> Result<Json<ProductResponse>, ApiError> {
    let Json(req) = payload.map_err(body_rejection)?;
    Ok(Json(catalog::update_product(&state.db, id, &req).await?))
}

pub async fn delete_product(
    State(state): State<AppState>,
    AdminUser(admin): AdminUser,
    Path(id): Path<i32>,
) -> Result<StatusCode, ApiError> {
    tracing::info!("Admin {} deleting product {}", admin.id, id);
    catalog::delete_product(&state.db, id).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn add_retailer(
    State(state): State<AppState>,
    AdminUser(_admin): AdminUser,
    Path(product_id): Path<i32>,
    payload: Result<Json<RetailerInput>, JsonRejection>,
) -> Result<(StatusCode, Json<RetailerResponse>), ApiError> {
    let Json(offer) = payload.map_err(body_rejection)?;
    let created = catalog::add_retailer(&state.db, product_id, &offer).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

pub async fn delete_retailer(
    State(state): State<AppState>,
    AdminUser(_admin): AdminUser,
    Path(id): Path<i32>,
) -> Result<StatusCode, ApiError> {
    catalog::delete_retailer(&state.db, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
