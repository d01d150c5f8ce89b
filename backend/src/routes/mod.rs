//! Route definitions for the StockFlow inventory service

use axum::{
    routing::{get, post},
    Router,
};

use crate::{handlers, AppState};

/// Create API routes
pub fn api_routes() -> Router<AppState> {
    Router::new()
        // Health check
        .route("/health", get(handlers::health_check))
        // Table counts for inspecting a deployment
        .route("/__debug/state", get(handlers::debug_state))
        // Product catalog
        .nest("/products", product_routes())
        // Company-scoped reports
        .nest("/companies", company_routes())
}

/// Product catalog routes
fn product_routes() -> Router<AppState> {
    Router::new().route("/", post(handlers::create_product))
}

/// Company-scoped alert routes
fn company_routes() -> Router<AppState> {
    Router::new().route(
        "/:company_id/alerts/low-stock",
        get(handlers::get_low_stock_alerts),
    )
}
