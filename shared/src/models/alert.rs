//! Low-stock alert report models

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::alerts::ThresholdSource;

/// Supplier attached to an alert entry
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AlertSupplier {
    pub id: i64,
    pub name: String,
    pub lead_time_days: i32,
}

/// One (product, warehouse) pair that is below threshold with live demand
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LowStockAlert {
    pub product_id: i64,
    pub product_name: String,
    pub sku: String,
    pub warehouse_id: i64,
    pub warehouse_name: String,
    pub current_stock: Decimal,
    pub threshold: i32,
    /// Average daily sales, rounded to 2 decimal places
    pub avg_daily_sales: Decimal,
    /// Rounded to 1 decimal place
    pub days_until_stockout: Decimal,
    pub supplier: Option<AlertSupplier>,
    /// Layer the threshold came from; only filled in debug mode
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub threshold_source: Option<ThresholdSource>,
}

/// Counters surfaced when a report is generated in debug mode
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct AlertDiagnostics {
    pub inventory_rows_scanned: usize,
    pub excluded_total: usize,
    /// Stock at or above the resolved threshold
    pub excluded_above_threshold: usize,
    /// Below threshold but no sales in the window
    pub excluded_no_sales: usize,
    pub lookback_days: u32,
    pub window_start: Option<DateTime<Utc>>,
    pub as_of: Option<DateTime<Utc>>,
}

/// Low-stock report for a company
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct LowStockReport {
    pub alerts: Vec<LowStockAlert>,
    pub total_alerts: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub diagnostics: Option<AlertDiagnostics>,
}

impl LowStockReport {
    pub fn is_empty(&self) -> bool {
        self.alerts.is_empty()
    }
}
