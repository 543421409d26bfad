//! Per-user shopping cart. Lines are pending selections and are not read by
//! order placement.

use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set,
};

use crate::entities::{cart_items, prelude::*, retailers};
use crate::errors::{ServiceError, ServiceResult};
use crate::models::cart::{AddToCartRequest, CartItemResponse};

pub async fn list_cart(db: &DatabaseConnection, user_id: i32) -> ServiceResult<Vec<CartItemResponse>> {
    let items = CartItems::find()
        .filter(cart_items::Column::UserId.eq(user_id))
        .order_by_asc(cart_items::Column::Id)
        .all(db)
        .await?;

    Ok(items.into_iter().map(CartItemResponse::from).collect())
}

/// Adds a line priced from the chosen offer. Re-adding the same offer bumps
/// the existing line's quantity.
pub async fn add_to_cart(
    db: &DatabaseConnection,
    user_id: i32,
    req: &AddToCartRequest,
) -> ServiceResult<CartItemResponse> {
    if req.quantity < 1 {
        return Err(ServiceError::Validation(format!(
            "Invalid quantity {}",
            req.quantity
        )));
    }

    let offer = Retailers::find_by_id(req.retailer_id)
        .filter(retailers::Column::ProductId.eq(req.product_id))
        .one(db)
        .await?
        .ok_or_else(|| {
            ServiceError::NotFound(format!(
                "Offer {} not found for product {}",
                req.retailer_id, req.product_id
            ))
        })?;

    let price = offer.price.ok_or_else(|| {
        ServiceError::Validation(format!("Offer {} has no price", offer.id))
    })?;

    let existing = CartItems::find()
        .filter(cart_items::Column::UserId.eq(user_id))
        .filter(cart_items::Column::RetailerId.eq(offer.id))
        .one(db)
        .await?;

    let item = match existing {
        Some(line) => {
            CartItems::update_many()
                .col_expr(
                    cart_items::Column::Quantity,
                    Expr::col(cart_items::Column::Quantity).add(req.quantity),
                )
                .filter(cart_items::Column::Id.eq(line.id))
                .exec(db)
                .await?;

            CartItems::find_by_id(line.id)
                .one(db)
                .await?
                .ok_or_else(|| ServiceError::NotFound(format!("Cart item {} vanished", line.id)))?
        }
        None => {
            cart_items::ActiveModel {
                user_id: Set(user_id),
                product_id: Set(offer.product_id),
                retailer_id: Set(offer.id),
                quantity: Set(req.quantity),
                price: Set(price),
                ..Default::default()
            }
            .insert(db)
            .await?
        }
    };

    tracing::debug!(
        "Cart line {} for user {} now x{}",
        item.id,
        user_id,
        item.quantity
    );
    Ok(item.into())
}

pub async fn remove_cart_item(db: &DatabaseConnection, user_id: i32, id: i32) -> ServiceResult<()> {
    let result = CartItems::delete_many()
        .filter(cart_items::Column::Id.eq(id))
        .filter(cart_items::Column::UserId.eq(user_id))
        .exec(db)
        .await?;

    if result.rows_affected == 0 {
        return Err(ServiceError::NotFound(format!("Cart item {} not found", id)));
    }

    Ok(())
}
