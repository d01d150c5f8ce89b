//! Sales history models

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Order header; `status` is free text ('placed', 'shipped', 'completed', ...)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Order {
    pub id: i64,
    pub company_id: i64,
    pub status: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderLine {
    pub id: i64,
    pub order_id: i64,
    pub product_id: i64,
    pub warehouse_id: i64,
    pub qty: Decimal,
}

/// Order line flattened with its order's status and timestamp
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SaleLine {
    pub order_id: i64,
    pub order_status: String,
    pub ordered_at: DateTime<Utc>,
    pub product_id: i64,
    pub warehouse_id: i64,
    pub qty: Decimal,
}
