//! Order placement and administration.

use sea_orm::ConnectionTrait;
use tracing::info;

use crate::error::AppError;
use crate::errors::ErrorCode;
use crate::repos::orders::{self, CartLine, Order};
use crate::repos::store::{merge_and_save, SeaStore};

/// Status given to every newly placed order.
pub const ORDER_CONFIRMED: &str = "Order is comfirmed";

/// Place an order for `user_id`. The status is always [`ORDER_CONFIRMED`].
pub async fn create_order<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    user_id: i64,
    total: f64,
    snapshots: Vec<CartLine>,
) -> Result<Order, AppError> {
    let order = orders::create(
        conn,
        Order {
            total,
            status: ORDER_CONFIRMED.to_string(),
            snapshots,
            user_id,
            ..Default::default()
        },
    )
    .await?;

    info!(order_id = order.id, user_id, "order created");
    Ok(order)
}

pub async fn delete_order<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    order_id: i64,
) -> Result<Order, AppError> {
    let order = orders::delete(conn, order_id).await?;
    info!(order_id, "order deleted");
    Ok(order)
}

pub async fn list_orders<C: ConnectionTrait + Send + Sync>(conn: &C) -> Result<Vec<Order>, AppError> {
    Ok(orders::list_all(conn).await?)
}

pub async fn list_orders_for_user<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    user_id: i64,
) -> Result<Vec<Order>, AppError> {
    Ok(orders::list_by_user(conn, user_id).await?)
}

/// Merge a status/owner edit into the stored order.
pub async fn edit_order<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    incoming: Order,
) -> Result<Order, AppError> {
    if incoming.id == 0 {
        return Err(AppError::invalid(
            ErrorCode::InvalidId,
            "Order request ID does not exist",
        ));
    }

    let order = merge_and_save(&SeaStore::new(conn), &incoming).await?;
    info!(order_id = order.id, status = %order.status, "order updated");
    Ok(order)
}
