//! Product catalog: listing, best-offer lookup and admin maintenance.
//!
//! `products.price` caches the cheapest priced offer and is refreshed inside
//! the same transaction as any offer change.

use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, EntityTrait,
    IntoActiveModel, LoaderTrait, ModelTrait, QueryFilter, QueryOrder, QuerySelect, Set,
    TransactionTrait,
};

use crate::entities::{cart_items, prelude::*, products, retailers};
use crate::errors::{ServiceError, ServiceResult};
use crate::models::catalog::{
    CreateProductRequest, ProductResponse, ProductsQuery, RetailerInput, RetailerResponse,
    UpdateProductRequest,
};
use crate::models::common::check_amount;

const MAX_NAME_LEN: usize = 255;
const MAX_CATEGORY_LEN: usize = 128;

pub async fn list_products(
    db: &DatabaseConnection,
    query: &ProductsQuery,
) -> ServiceResult<Vec<ProductResponse>> {
    let (skip, limit) = query.page();

    let products = Products::find()
        .order_by_asc(products::Column::Id)
        .offset(skip)
        .limit(limit)
        .all(db)
        .await?;

    let offers = products.load_many(Retailers, db).await?;

    Ok(products
        .into_iter()
        .zip(offers)
        .map(|(product, mut offers)| {
            sort_offers(&mut offers);
            ProductResponse::from_models(product, offers)
        })
        .collect())
}

async fn find_product<C: ConnectionTrait>(conn: &C, id: i32) -> ServiceResult<products::Model> {
    Products::find_by_id(id)
        .one(conn)
        .await?
        .ok_or_else(|| ServiceError::NotFound(format!("Product {} not found", id)))
}

pub async fn get_product(db: &DatabaseConnection, id: i32) -> ServiceResult<ProductResponse> {
    let product = find_product(db, id).await?;
    let mut offers = product.find_related(Retailers).all(db).await?;
    sort_offers(&mut offers);
    Ok(ProductResponse::from_models(product, offers))
}

/// Cheapest priced offer for a product; ties go to the older offer.
pub async fn best_offer(
    db: &DatabaseConnection,
    product_id: i32,
) -> ServiceResult<RetailerResponse> {
    find_product(db, product_id).await?;

    cheapest_offer(db, product_id)
        .await?
        .map(RetailerResponse::from)
        .ok_or_else(|| {
            ServiceError::NotFound(format!("Product {} has no priced offers", product_id))
        })
}

async fn cheapest_offer<C: ConnectionTrait>(
    conn: &C,
    product_id: i32,
) -> ServiceResult<Option<retailers::Model>> {
    Ok(Retailers::find()
        .filter(retailers::Column::ProductId.eq(product_id))
        .filter(retailers::Column::Price.is_not_null())
        .order_by_asc(retailers::Column::Price)
        .order_by_asc(retailers::Column::Id)
        .one(conn)
        .await?)
}

/// Recompute the cached best price from the current offers.
async fn refresh_best_price<C: ConnectionTrait>(conn: &C, product_id: i32) -> ServiceResult<()> {
    let best = cheapest_offer(conn, product_id).await?.and_then(|r| r.price);

    Products::update_many()
        .col_expr(products::Column::Price, Expr::value(best))
        .filter(products::Column::Id.eq(product_id))
        .exec(conn)
        .await?;

    Ok(())
}

fn sort_offers(offers: &mut [retailers::Model]) {
    // Unpriced offers last
    offers.sort_by(|a, b| match (a.price, b.price) {
        (Some(x), Some(y)) => x.cmp(&y).then(a.id.cmp(&b.id)),
        (Some(_), None) => std::cmp::Ordering::Less,
        (None, Some(_)) => std::cmp::Ordering::Greater,
        (None, None) => a.id.cmp(&b.id),
    });
}

fn validate_offer(offer: &RetailerInput) -> ServiceResult<()> {
    let name = offer.name.trim();
    if name.is_empty() {
        return Err(ServiceError::Validation("Retailer name is required".to_string()));
    }
    check_len("Retailer name", name, MAX_NAME_LEN)?;
    check_amount(&format!("Price from {}", name), offer.price).map_err(ServiceError::Validation)?;
    if let Some(rating) = offer.rating {
        if !(0.0..=5.0).contains(&rating) {
            return Err(ServiceError::Validation(format!(
                "Rating {} is outside 0-5",
                rating
            )));
        }
    }
    Ok(())
}

/// Length limit of a `varchar(n)` column, counted in characters.
fn check_len(what: &str, value: &str, max: usize) -> ServiceResult<()> {
    if value.chars().count() > max {
        return Err(ServiceError::Validation(format!(
            "{} is longer than {} characters",
            what, max
        )));
    }
    Ok(())
}

fn offer_model(product_id: i32, offer: &RetailerInput) -> retailers::ActiveModel {
    retailers::ActiveModel {
        name: Set(offer.name.trim().to_string()),
        logo: Set(offer.logo.clone()),
        description: Set(offer.description.clone()),
        rating: Set(offer.rating),
        delivery_options: Set(offer.delivery_options.clone()),
        product_id: Set(product_id),
        price: Set(Some(offer.price)),
        ..Default::default()
    }
}

pub async fn create_product(
    db: &DatabaseConnection,
    req: &CreateProductRequest,
) -> ServiceResult<ProductResponse> {
    if req.name.trim().is_empty() || req.category.trim().is_empty() {
        return Err(ServiceError::Validation(
            "Product name and category are required".to_string(),
        ));
    }
    check_len("Product name", req.name.trim(), MAX_NAME_LEN)?;
    check_len("Category", req.category.trim(), MAX_CATEGORY_LEN)?;
    if let Some(price) = req.price {
        check_amount("Price", price).map_err(ServiceError::Validation)?;
    }
    for offer in &req.retailers {
        validate_offer(offer)?;
    }

    let best_price = req
        .retailers
        .iter()
        .map(|offer| offer.price)
        .min()
        .or(req.price);

    let txn = db.begin().await?;

    let product = products::ActiveModel {
        name: Set(req.name.trim().to_string()),
        category: Set(req.category.trim().to_string()),
        image: Set(req.image.clone()),
        description: Set(req.description.clone()),
        price: Set(best_price),
        ..Default::default()
    }
    .insert(&txn)
    .await?;

    let mut offers = Vec::with_capacity(req.retailers.len());
    for offer in &req.retailers {
        offers.push(offer_model(product.id, offer).insert(&txn).await?);
    }

    txn.commit().await?;

    tracing::info!(
        "Created product {} '{}' with {} offers",
        product.id,
        product.name,
        offers.len()
    );

    sort_offers(&mut offers);
    Ok(ProductResponse::from_models(product, offers))
}

pub async fn update_product(
    db: &DatabaseConnection,
    id: i32,
    req: &UpdateProductRequest,
) -> ServiceResult<ProductResponse> {
    let product = find_product(db, id).await?;
    let mut active = product.into_active_model();

    if let Some(name) = &req.name {
        if name.trim().is_empty() {
            return Err(ServiceError::Validation("Product name cannot be empty".to_string()));
        }
        check_len("Product name", name.trim(), MAX_NAME_LEN)?;
        active.name = Set(name.trim().to_string());
    }
    if let Some(category) = &req.category {
        if category.trim().is_empty() {
            return Err(ServiceError::Validation("Category cannot be empty".to_string()));
        }
        check_len("Category", category.trim(), MAX_CATEGORY_LEN)?;
        active.category = Set(category.trim().to_string());
    }
    if let Some(image) = &req.image {
        active.image = Set(Some(image.clone()));
    }
    if let Some(description) = &req.description {
        active.description = Set(Some(description.clone()));
    }

    active.update(db).await?;
    tracing::info!("Updated product {}", id);

    get_product(db, id).await
}

/// Removes the product together with its offers and any cart lines that
/// point at it, in one transaction.
pub async fn delete_product(db: &DatabaseConnection, id: i32) -> ServiceResult<()> {
    let txn = db.begin().await?;

    find_product(&txn, id).await?;

    let carts = CartItems::delete_many()
        .filter(cart_items::Column::ProductId.eq(id))
        .exec(&txn)
        .await?;
    let offers = Retailers::delete_many()
        .filter(retailers::Column::ProductId.eq(id))
        .exec(&txn)
        .await?;
    Products::delete_by_id(id).exec(&txn).await?;

    txn.commit().await?;

    tracing::info!(
        "Deleted product {} ({} offers, {} cart lines)",
        id,
        offers.rows_affected,
        carts.rows_affected
    );
    Ok(())
}

pub async fn add_retailer(
    db: &DatabaseConnection,
    product_id: i32,
    offer: &RetailerInput,
) -> ServiceResult<RetailerResponse> {
    validate_offer(offer)?;

    let txn = db.begin().await?;
    find_product(&txn, product_id).await?;

    let created = offer_model(product_id, offer).insert(&txn).await?;
    refresh_best_price(&txn, product_id).await?;

    txn.commit().await?;

    tracing::info!(
        "Added offer {} from {} to product {}",
        created.id,
        created.name,
        product_id
    );
    Ok(created.into())
}

pub async fn delete_retailer(db: &DatabaseConnection, id: i32) -> ServiceResult<()> {
    let txn = db.begin().await?;

    let offer = Retailers::find_by_id(id)
        .one(&txn)
        .await?
        .ok_or_else(|| ServiceError::NotFound(format!("Retailer offer {} not found", id)))?;

    CartItems::delete_many()
        .filter(cart_items::Column::RetailerId.eq(id))
        .exec(&txn)
        .await?;
    Retailers::delete_by_id(id).exec(&txn).await?;
    refresh_best_price(&txn, offer.product_id).await?;

    txn.commit().await?;

    tracing::info!("Deleted offer {} from product {}", id, offer.product_id);
    Ok(())
}
