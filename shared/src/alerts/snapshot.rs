//! Read snapshot consumed by the alert engine
//!
//! A report is computed from one consistent batch of rows. The engine only
//! sees that batch through [`SnapshotSource`], so it stays a pure function
//! of its inputs regardless of where the rows came from.

use std::collections::HashMap;

use crate::models::{InventoryPosition, ProductThreshold, SaleLine, SupplierOffer};

/// Query interface over the rows a report reads
pub trait SnapshotSource {
    /// Inventory rows in the company's warehouses, optionally limited to one warehouse
    fn company_inventory(&self, company_id: i64, warehouse_id: Option<i64>)
        -> Vec<InventoryPosition>;

    /// Threshold overrides configured for (company, product), any warehouse scope
    fn threshold_overrides(&self, company_id: i64, product_id: i64) -> Vec<ProductThreshold>;

    /// Default threshold of the product's type, if the product has one
    fn product_type_default(&self, product_id: i64) -> Option<i32>;

    /// All order lines for (product, warehouse), regardless of status or age
    fn sales_lines(&self, product_id: i64, warehouse_id: i64) -> Vec<SaleLine>;

    /// Supplier offers for (company, product)
    fn product_suppliers(&self, company_id: i64, product_id: i64) -> Vec<SupplierOffer>;
}

/// Snapshot held entirely in memory.
///
/// The backend fills one from a single read-only transaction; tests build
/// them by hand.
#[derive(Debug, Clone, Default)]
pub struct InMemorySnapshot {
    warehouses: HashMap<i64, i64>,
    inventory: Vec<InventoryPosition>,
    thresholds: Vec<ProductThreshold>,
    type_defaults: HashMap<i64, i32>,
    product_types: HashMap<i64, i64>,
    sales: Vec<SaleLine>,
    suppliers: Vec<SupplierOffer>,
}

impl InMemorySnapshot {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_warehouse(mut self, warehouse_id: i64, company_id: i64) -> Self {
        self.warehouses.insert(warehouse_id, company_id);
        self
    }

    /// Register a product type and its default threshold
    pub fn with_product_type(mut self, product_type_id: i64, default_threshold: i32) -> Self {
        self.type_defaults.insert(product_type_id, default_threshold);
        self
    }

    /// Inventory row; the product's type link is taken from the position
    pub fn with_inventory(mut self, position: InventoryPosition) -> Self {
        if let Some(type_id) = position.product_type_id {
            self.product_types.insert(position.product_id, type_id);
        }
        self.inventory.push(position);
        self
    }

    /// Link a product to a type without an inventory row
    pub fn with_product_type_link(mut self, product_id: i64, product_type_id: i64) -> Self {
        self.product_types.insert(product_id, product_type_id);
        self
    }

    pub fn with_threshold(mut self, threshold: ProductThreshold) -> Self {
        self.thresholds.push(threshold);
        self
    }

    pub fn with_sale(mut self, line: SaleLine) -> Self {
        self.sales.push(line);
        self
    }

    pub fn with_supplier(mut self, offer: SupplierOffer) -> Self {
        self.suppliers.push(offer);
        self
    }

    pub fn inventory_len(&self) -> usize {
        self.inventory.len()
    }
}

impl SnapshotSource for InMemorySnapshot {
    fn company_inventory(
        &self,
        company_id: i64,
        warehouse_id: Option<i64>,
    ) -> Vec<InventoryPosition> {
        self.inventory
            .iter()
            .filter(|row| self.warehouses.get(&row.warehouse_id) == Some(&company_id))
            .filter(|row| warehouse_id.map_or(true, |id| row.warehouse_id == id))
            .cloned()
            .collect()
    }

    fn threshold_overrides(&self, company_id: i64, product_id: i64) -> Vec<ProductThreshold> {
        self.thresholds
            .iter()
            .filter(|t| t.company_id == company_id && t.product_id == product_id)
            .cloned()
            .collect()
    }

    fn product_type_default(&self, product_id: i64) -> Option<i32> {
        self.product_types
            .get(&product_id)
            .and_then(|type_id| self.type_defaults.get(type_id))
            .copied()
    }

    fn sales_lines(&self, product_id: i64, warehouse_id: i64) -> Vec<SaleLine> {
        self.sales
            .iter()
            .filter(|l| l.product_id == product_id && l.warehouse_id == warehouse_id)
            .cloned()
            .collect()
    }

    fn product_suppliers(&self, company_id: i64, product_id: i64) -> Vec<SupplierOffer> {
        self.suppliers
            .iter()
            .filter(|s| s.company_id == company_id && s.product_id == product_id)
            .cloned()
            .collect()
    }
}
