use actix_web::{web, HttpResponse, Result};
use serde::Deserialize;

use crate::error::AppError;
use crate::extractors::{AdminUser, Gated, IdQuery, ValidatedJson};
use crate::http::success;
use crate::repos::products::{Product, Sizing};
use crate::routes::views::ProductView;
use crate::services::products as product_service;
use crate::state::app_state::AppState;

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct ProductRequest {
    /// Only read by edits; ignored on create.
    pub id: i64,
    pub item: String,
    pub price: f64,
    pub stock: i32,
    pub pictures: Vec<String>,
    pub xs: Option<Sizing>,
    pub s: Option<Sizing>,
    pub m: Option<Sizing>,
    pub l: Option<Sizing>,
    pub xl: Option<Sizing>,
}

impl From<ProductRequest> for Product {
    fn from(req: ProductRequest) -> Self {
        Self {
            id: req.id,
            item: req.item,
            price: req.price,
            stock: req.stock,
            pictures: req.pictures,
            xs: req.xs,
            s: req.s,
            m: req.m,
            l: req.l,
            xl: req.xl,
            ..Default::default()
        }
    }
}

async fn create_product(
    Gated(_admin, body): Gated<AdminUser, ValidatedJson<ProductRequest>>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let mut product = Product::from(body.into_inner());
    product.id = 0;
    let product = product_service::create_product(&app_state.db, product).await?;
    Ok(success(
        format!("{} is inserted successfully", product.item),
        ProductView::from(product),
    ))
}

async fn delete_product(
    Gated(_admin, IdQuery(id)): Gated<AdminUser, IdQuery>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let product = product_service::delete_product(&app_state.db, id).await?;
    Ok(success(
        format!("{} is deleted successfully", product.item),
        ProductView::from(product),
    ))
}

/// Public catalogue; no token required.
async fn list_products(app_state: web::Data<AppState>) -> Result<HttpResponse, AppError> {
    let products = product_service::list_products(&app_state.db).await?;
    let views: Vec<ProductView> = products.into_iter().map(ProductView::from).collect();
    Ok(success("SUCCESS", views))
}

async fn edit_product(
    Gated(_admin, body): Gated<AdminUser, ValidatedJson<ProductRequest>>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let product = product_service::edit_product(&app_state.db, body.into_inner().into()).await?;
    Ok(success(
        format!("{} is updated successfully", product.item),
        ProductView::from(product),
    ))
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/create-product", web::post().to(create_product))
        .route("/delete-product", web::delete().to(delete_product))
        .route("/list-products", web::get().to(list_products))
        .route("/edit-product", web::patch().to(edit_product));
}
