//! Inventory models

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Current quantity of one product in one warehouse (one row per pair)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Inventory {
    pub product_id: i64,
    pub warehouse_id: i64,
    pub quantity: Decimal,
}

/// Reason for a stock movement
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum InventoryReason {
    Sale,
    Purchase,
    Adjustment,
    TransferOut,
    TransferIn,
    Return,
}

impl InventoryReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            InventoryReason::Sale => "SALE",
            InventoryReason::Purchase => "PURCHASE",
            InventoryReason::Adjustment => "ADJUSTMENT",
            InventoryReason::TransferOut => "TRANSFER_OUT",
            InventoryReason::TransferIn => "TRANSFER_IN",
            InventoryReason::Return => "RETURN",
        }
    }
}

impl std::fmt::Display for InventoryReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Ledger entry for a stock movement
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InventoryTransaction {
    pub id: i64,
    pub product_id: i64,
    pub warehouse_id: i64,
    pub qty_delta: Decimal,
    pub reason: InventoryReason,
    pub ref_type: Option<String>,
    pub ref_id: Option<String>,
    pub occurred_at: DateTime<Utc>,
}

/// Inventory row joined with the product and warehouse columns the alert report needs
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct InventoryPosition {
    pub product_id: i64,
    pub sku: String,
    pub product_name: String,
    pub product_type_id: Option<i64>,
    pub warehouse_id: i64,
    pub warehouse_name: String,
    pub quantity: Decimal,
}
