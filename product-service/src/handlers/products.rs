//! Product resource handlers. Each issues a single store call.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use metrics::counter;
use service_core::error::AppError;
use service_core::extract::{QueryParams, ValidatedJson};

use crate::dtos::{CreateProductRequest, ProductListParams};
use crate::models::Product;
use crate::startup::AppState;

fn product_not_found(id: &str) -> AppError {
    AppError::NotFound(anyhow::anyhow!("Product {} not found", id))
}

pub async fn create_product(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<CreateProductRequest>,
) -> Result<(StatusCode, Json<Product>), AppError> {
    let product = Product::from(payload);

    state.products.insert(&product).await.map_err(|e| {
        tracing::error!(product_id = %product.id, "Failed to insert product: {}", e);
        e
    })?;

    counter!("products_created_total").increment(1);
    tracing::info!(
        product_id = %product.id,
        prodname = %product.product_name,
        "Product created"
    );

    Ok((StatusCode::CREATED, Json(product)))
}

pub async fn get_product(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Product>, AppError> {
    let product = state
        .products
        .find_by_id(&id)
        .await?
        .ok_or_else(|| product_not_found(&id))?;

    tracing::debug!(product_id = %product.id, "Found product");
    Ok(Json(product))
}

pub async fn list_products(
    State(state): State<AppState>,
    QueryParams(params): QueryParams<ProductListParams>,
) -> Result<Json<Vec<Product>>, AppError> {
    let pagination = params.pagination();
    let products = state.products.list(pagination).await?;

    tracing::debug!(
        skip = pagination.skip,
        limit = pagination.limit,
        count = products.len(),
        "Listed products"
    );
    Ok(Json(products))
}

/// Only the price carried in the path is applied; a request body, if any,
/// is not read.
pub async fn update_product(
    State(state): State<AppState>,
    Path((id, prodprice)): Path<(String, String)>,
) -> Result<Json<Product>, AppError> {
    let product = state
        .products
        .update_price(&id, &prodprice)
        .await?
        .ok_or_else(|| product_not_found(&id))?;

    tracing::info!(product_id = %product.id, prodprice = %product.unit_price, "Product price updated");
    Ok(Json(product))
}

pub async fn delete_product(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, AppError> {
    let deleted_count = state.products.delete(&id).await?;

    counter!("products_deleted_total").increment(deleted_count);
    tracing::info!(product_id = %id, deleted_count, "Deleted products");

    Ok(StatusCode::NO_CONTENT)
}
