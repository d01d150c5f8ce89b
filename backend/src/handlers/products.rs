//! HTTP handlers for product catalog endpoints

use axum::{extract::State, http::StatusCode, Json};

use crate::error::AppResult;
use crate::models::CreateProductInput;
use crate::services::{products::CreatedProduct, ProductService};
use crate::AppState;

/// Create a product, optionally with opening stock
pub async fn create_product(
    State(state): State<AppState>,
    Json(input): Json<CreateProductInput>,
) -> AppResult<(StatusCode, Json<CreatedProduct>)> {
    let service = ProductService::new(state.db);
    let product = service.create_product(input).await?;
    Ok((StatusCode::CREATED, Json(product)))
}
