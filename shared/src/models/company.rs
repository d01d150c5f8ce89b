//! Company and warehouse models

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A tenant of the platform; owns warehouses, thresholds, suppliers and orders
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Company {
    pub id: i64,
    pub name: String,
    pub created_at: DateTime<Utc>,
}

/// A stock-holding location belonging to exactly one company
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Warehouse {
    pub id: i64,
    pub company_id: i64,
    pub name: String,
    pub location: Option<String>,
    pub created_at: DateTime<Utc>,
}
