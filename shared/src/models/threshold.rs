//! Low-stock threshold overrides

use serde::{Deserialize, Serialize};

/// Threshold override scoped to a company and product.
///
/// With `warehouse_id` set it applies to that warehouse only; with `None`
/// it applies to every warehouse of the company.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ProductThreshold {
    pub company_id: i64,
    pub product_id: i64,
    pub warehouse_id: Option<i64>,
    pub threshold: i32,
}

impl ProductThreshold {
    pub fn is_company_wide(&self) -> bool {
        self.warehouse_id.is_none()
    }
}
