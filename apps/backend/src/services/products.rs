//! Catalogue management.

use sea_orm::ConnectionTrait;
use tracing::info;

use crate::error::AppError;
use crate::errors::ErrorCode;
use crate::repos::products::{self, Product};
use crate::repos::store::{merge_and_save, SeaStore};

fn validate_new(product: &Product) -> Result<(), AppError> {
    if product.item.is_empty() || product.price == 0.0 {
        return Err(AppError::invalid(
            ErrorCode::ValidationError,
            "item name or price cannot be empty",
        ));
    }
    Ok(())
}

pub async fn create_product<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    product: Product,
) -> Result<Product, AppError> {
    validate_new(&product)?;
    let product = products::create(conn, product).await?;
    info!(product_id = product.id, "product created");
    Ok(product)
}

pub async fn list_products<C: ConnectionTrait + Send + Sync>(
    conn: &C,
) -> Result<Vec<Product>, AppError> {
    Ok(products::list_all(conn).await?)
}

pub async fn delete_product<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    product_id: i64,
) -> Result<Product, AppError> {
    let product = products::delete(conn, product_id).await?;
    info!(product_id, "product deleted");
    Ok(product)
}

pub async fn edit_product<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    incoming: Product,
) -> Result<Product, AppError> {
    if incoming.id == 0 {
        return Err(AppError::invalid(
            ErrorCode::InvalidId,
            "User request ID does not exist",
        ));
    }

    let product = merge_and_save(&SeaStore::new(conn), &incoming).await?;
    info!(product_id = product.id, "product updated");
    Ok(product)
}
