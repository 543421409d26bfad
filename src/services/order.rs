//! Order placement and loyalty-point accrual.
//!
//! An order, its line items and the buyer's point award are written in one
//! database transaction. The award is applied as `points = points + n` in
//! SQL so concurrent orders from the same user never overwrite each other.

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, DatabaseTransaction, DbErr,
    EntityTrait, LoaderTrait, QueryFilter, QueryOrder, Set, TransactionTrait,
};

use crate::entities::{order_items, orders, prelude::*, users};
use crate::errors::{ServiceError, ServiceResult};
use crate::models::order::{OrderResponse, OrderSubmission};

/// Points granted per whole step of the order total.
const POINTS_PER_STEP: i32 = 2;
const CURRENCY_PER_STEP: Decimal = Decimal::TEN;

/// `floor(total / 10) * 2`; remainders below a full step earn nothing.
pub fn loyalty_points(total: Decimal) -> i32 {
    if total <= Decimal::ZERO {
        return 0;
    }

    (total / CURRENCY_PER_STEP)
        .floor()
        .to_i32()
        .map(|steps| steps.saturating_mul(POINTS_PER_STEP))
        .unwrap_or(i32::MAX)
}

/// Validate and persist an order submission in its own transaction.
///
/// Orders for ids with no matching user are stored without a point award.
/// Re-submitting the same payload creates a new order.
pub async fn place_order(
    db: &DatabaseConnection,
    submission: &OrderSubmission,
) -> ServiceResult<OrderResponse> {
    let placed = async {
        // Dropping `txn` without commit rolls everything back
        let txn = db.begin().await?;
        let order = record_order(&txn, submission).await?;
        txn.commit().await?;
        Ok::<_, ServiceError>(order)
    }
    .await;

    match placed {
        Ok(order) => {
            tracing::info!(
                "Placed order {} for user {} ({} items, total {}, {:?} points)",
                order.id,
                order.user_id,
                order.items.len(),
                order.total,
                order.points_awarded
            );
            Ok(order)
        }
        Err(ServiceError::Validation(reason)) => {
            tracing::warn!("Rejected order for user {}: {}", submission.user_id, reason);
            Err(ServiceError::Validation(reason))
        }
        Err(e) => {
            tracing::error!(?submission, "Failed to place order: {}", e);
            Err(e)
        }
    }
}

/// Validates and writes an order inside the caller's transaction.
///
/// The point award runs first, so a concurrent order for the same user
/// waits on the user row before writing anything else.
pub async fn record_order(
    txn: &DatabaseTransaction,
    submission: &OrderSubmission,
) -> ServiceResult<OrderResponse> {
    submission.validate().map_err(ServiceError::Validation)?;

    let points_awarded =
        award_points(txn, submission.user_id, loyalty_points(submission.total)).await?;

    let order = orders::ActiveModel {
        user_id: Set(submission.user_id),
        date: Set(submission.date.clone()),
        total: Set(submission.total),
        payment: Set(submission.payment.clone()),
        address: Set(submission.address.clone()),
        ..Default::default()
    }
    .insert(txn)
    .await?;

    let mut items = Vec::with_capacity(submission.items.len());
    for item in &submission.items {
        let row = order_items::ActiveModel {
            order_id: Set(order.id),
            product_name: Set(item.product_name.clone()),
            quantity: Set(item.quantity),
            retailer: Set(item.retailer.clone()),
            price: Set(item.price),
            ..Default::default()
        }
        .insert(txn)
        .await?;
        items.push(row);
    }

    let mut response = OrderResponse::from_models(order, items);
    response.points_awarded = points_awarded;
    Ok(response)
}

/// Returns `None` when no user row matched.
async fn award_points<C: ConnectionTrait>(
    conn: &C,
    user_id: i32,
    award: i32,
) -> Result<Option<i32>, DbErr> {
    let result = Users::update_many()
        .col_expr(
            users::Column::Points,
            Expr::col(users::Column::Points).add(award),
        )
        .filter(users::Column::Id.eq(user_id))
        .exec(conn)
        .await?;

    if result.rows_affected == 0 {
        tracing::debug!("No user {}, skipping loyalty award", user_id);
        return Ok(None);
    }

    Ok(Some(award))
}

/// All orders of one user in placement order, items in insertion order.
pub async fn orders_for_user(
    db: &DatabaseConnection,
    user_id: i32,
) -> ServiceResult<Vec<OrderResponse>> {
    let orders = Orders::find()
        .filter(orders::Column::UserId.eq(user_id))
        .order_by_asc(orders::Column::Id)
        .all(db)
        .await?;

    Ok(with_items(db, orders).await?)
}

pub(crate) async fn with_items(
    db: &DatabaseConnection,
    orders: Vec<orders::Model>,
) -> Result<Vec<OrderResponse>, DbErr> {
    let items = orders
        .load_many(
            OrderItems::find().order_by_asc(order_items::Column::Id),
            db,
        )
        .await?;

    Ok(orders
        .into_iter()
        .zip(items)
        .map(|(order, items)| OrderResponse::from_models(order, items))
        .collect())
}
