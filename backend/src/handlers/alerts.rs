//! HTTP handlers for low-stock alert endpoints

use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::Deserialize;
use shared::alerts::AlertRequest;
use shared::validation::validate_lookback_days;

use crate::error::{AppError, AppResult};
use crate::models::LowStockReport;
use crate::services::AlertService;
use crate::AppState;

/// Raw query parameters; parsed by hand so bad values become field errors
#[derive(Debug, Default, Deserialize)]
pub struct LowStockQuery {
    pub lookback_days: Option<String>,
    pub warehouse_id: Option<String>,
    pub debug: Option<String>,
}

fn parse_lookback(raw: Option<&str>, default_days: u32, max_days: u32) -> AppResult<u32> {
    let Some(raw) = raw.map(str::trim).filter(|s| !s.is_empty()) else {
        return Ok(default_days);
    };
    let days = raw
        .parse::<i64>()
        .map_err(|_| AppError::validation("lookback_days", "lookback_days must be an integer"))?;
    validate_lookback_days(days, max_days).map_err(|msg| AppError::validation("lookback_days", msg))
}

fn parse_warehouse_id(raw: Option<&str>) -> AppResult<Option<i64>> {
    match raw.map(str::trim).filter(|s| !s.is_empty()) {
        None => Ok(None),
        Some(s) => s
            .parse::<i64>()
            .ok()
            .filter(|id| *id > 0)
            .map(Some)
            .ok_or_else(|| {
                AppError::validation("warehouse_id", "warehouse_id must be a positive integer")
            }),
    }
}

fn parse_flag(raw: Option<&str>) -> bool {
    raw.map(|s| matches!(s.trim().to_ascii_lowercase().as_str(), "1" | "true" | "yes"))
        .unwrap_or(false)
}

/// Build the engine request from path and query parameters
fn build_request(
    company_id: i64,
    query: &LowStockQuery,
    default_days: u32,
    max_days: u32,
) -> AppResult<AlertRequest> {
    let lookback_days = parse_lookback(query.lookback_days.as_deref(), default_days, max_days)?;
    let warehouse_id = parse_warehouse_id(query.warehouse_id.as_deref())?;

    Ok(AlertRequest::new(company_id, lookback_days)?
        .with_warehouse(warehouse_id)
        .with_debug(parse_flag(query.debug.as_deref())))
}

/// Low-stock alerts for a company
pub async fn get_low_stock_alerts(
    State(state): State<AppState>,
    Path(company_id): Path<i64>,
    Query(query): Query<LowStockQuery>,
) -> AppResult<Json<LowStockReport>> {
    let alerts_config = &state.config.alerts;
    let request = build_request(
        company_id,
        &query,
        alerts_config.default_lookback_days,
        alerts_config.max_lookback_days,
    )?;

    let service = AlertService::new(state.db, alerts_config.sale_statuses());
    let report = service.low_stock_report(&request).await?;
    Ok(Json(report))
}
