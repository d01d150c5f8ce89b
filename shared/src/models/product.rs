//! Product catalog models

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Product category carrying the fallback low-stock threshold
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductType {
    pub id: i64,
    pub name: String,
    pub default_low_stock_threshold: i32,
}

/// A sellable product, identified globally by its SKU
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Product {
    pub id: i64,
    pub sku: String,
    pub name: String,
    pub product_type_id: Option<i64>,
    pub price: Decimal,
    /// Bundles are stored but never expanded into components for alerting
    pub is_bundle: bool,
    pub created_at: DateTime<Utc>,
}

/// Component line of a bundle product
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductBundle {
    pub bundle_product_id: i64,
    pub component_product_id: i64,
    pub component_qty: Decimal,
}

/// Input for creating a product
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateProductInput {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub sku: String,
    /// Kept as text so malformed prices surface as field errors
    #[serde(default, deserialize_with = "price_text")]
    pub price: String,
    pub product_type_id: Option<i64>,
    pub warehouse_id: Option<i64>,
    pub initial_quantity: Option<Decimal>,
}

/// Accept a price sent either as a JSON string or a JSON number
fn price_text<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::String(s) => s,
        Value::Null => String::new(),
        other => other.to_string(),
    })
}
