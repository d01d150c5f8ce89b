//! Supplier models

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Default lead time applied when a mapping does not specify one
pub const DEFAULT_LEAD_TIME_DAYS: i32 = 7;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Supplier {
    pub id: i64,
    pub name: String,
    pub contact_email: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// A supplier's offer of a product to a specific company.
///
/// Keyed by (supplier, company, product); a product may have several
/// suppliers per company.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductSupplier {
    pub supplier_id: i64,
    pub company_id: i64,
    pub product_id: i64,
    pub supplier_sku: Option<String>,
    pub lead_time_days: i32,
    pub preferred: bool,
}

/// `ProductSupplier` joined with the supplier's display name
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SupplierOffer {
    pub supplier_id: i64,
    pub supplier_name: String,
    pub company_id: i64,
    pub product_id: i64,
    pub lead_time_days: i32,
    pub preferred: bool,
}
