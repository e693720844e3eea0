use actix_web::{web, HttpResponse, Result};
use serde::Deserialize;

use crate::error::AppError;
use crate::extractors::{AdminUser, CurrentUser, Gated, IdQuery, ValidatedJson};
use crate::http::success;
use crate::repos::orders::{CartLine, Order};
use crate::routes::views::{ListOrdersView, OrderView};
use crate::services::orders as order_service;
use crate::state::app_state::AppState;

/// New order. Status and owner come from the server, not the payload.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct OrderRequest {
    pub total: f64,
    pub snapshots: Vec<CartLine>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct EditOrderRequest {
    pub id: i64,
    pub status: String,
    pub user_id: i64,
}

async fn create_order(
    Gated(current, body): Gated<CurrentUser, ValidatedJson<OrderRequest>>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let req = body.into_inner();
    let order = order_service::create_order(&app_state.db, current.id, req.total, req.snapshots)
        .await?;
    Ok(success(
        format!("{} is inserted successfully", order.id),
        OrderView::from(order),
    ))
}

async fn delete_order(
    Gated(_admin, IdQuery(id)): Gated<AdminUser, IdQuery>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let order = order_service::delete_order(&app_state.db, id).await?;
    Ok(success(
        format!("{} is deleted successfully", order.id),
        OrderView::from(order),
    ))
}

async fn edit_order_status(
    Gated(_admin, body): Gated<AdminUser, ValidatedJson<EditOrderRequest>>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let req = body.into_inner();
    let incoming = Order {
        id: req.id,
        status: req.status,
        user_id: req.user_id,
        ..Default::default()
    };
    let order = order_service::edit_order(&app_state.db, incoming).await?;
    Ok(success("SUCCESS", OrderView::from(order)))
}

async fn list_orders(
    _admin: AdminUser,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let orders = order_service::list_orders(&app_state.db).await?;
    Ok(success("SUCCESS", ListOrdersView::from(orders)))
}

async fn list_orders_user(
    current: CurrentUser,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let orders = order_service::list_orders_for_user(&app_state.db, current.id).await?;
    Ok(success("SUCCESS", ListOrdersView::from(orders)))
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/create-order", web::post().to(create_order))
        .route("/delete-order", web::delete().to(delete_order))
        .route("/edit-order-status", web::patch().to(edit_order_status))
        .route("/list-orders", web::get().to(list_orders))
        .route("/list-orders-user", web::get().to(list_orders_user));
}
