//! Health check handlers

use axum::{extract::State, Json};
use serde::Serialize;

use crate::error::AppResult;
use crate::AppState;

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub database: String,
}

/// Health check endpoint handler
pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    // Check database connectivity
    let db_status = match sqlx::query("SELECT 1").execute(&state.db).await {
        Ok(_) => "connected".to_string(),
        Err(_) => "disconnected".to_string(),
    };

    Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        database: db_status,
    })
}

#[derive(Serialize)]
pub struct StateCounts {
    pub companies: i64,
    pub warehouses: i64,
    pub inventory_rows: i64,
    pub orders: i64,
}

#[derive(Serialize)]
pub struct DebugStateResponse {
    pub environment: String,
    pub counts: StateCounts,
}

/// Row counts of the main tables, for checking what a database holds
pub async fn debug_state(State(state): State<AppState>) -> AppResult<Json<DebugStateResponse>> {
    let (companies, warehouses, inventory_rows, orders) =
        sqlx::query_as::<_, (i64, i64, i64, i64)>(
            r#"
            SELECT (SELECT COUNT(*) FROM companies),
                   (SELECT COUNT(*) FROM warehouses),
                   (SELECT COUNT(*) FROM inventory),
                   (SELECT COUNT(*) FROM orders)
            "#,
        )
        .fetch_one(&state.db)
        .await?;

    Ok(Json(DebugStateResponse {
        environment: state.config.environment.clone(),
        counts: StateCounts {
            companies,
            warehouses,
            inventory_rows,
            orders,
        },
    }))
}
