//! Validation utilities for the StockFlow inventory platform

use std::collections::BTreeMap;
use std::str::FromStr;

use rust_decimal::Decimal;

use crate::models::CreateProductInput;

/// Longest accepted SKU
pub const MAX_SKU_LENGTH: usize = 64;

/// Longest accepted product name
pub const MAX_NAME_LENGTH: usize = 255;

// ============================================================================
// Product Validations
// ============================================================================

/// Validate SKU format (non-empty, alphanumeric plus '-', '_' and '.')
pub fn validate_sku(sku: &str) -> Result<(), &'static str> {
    let sku = sku.trim();
    if sku.is_empty() {
        return Err("SKU is required");
    }
    if sku.len() > MAX_SKU_LENGTH {
        return Err("SKU must be at most 64 characters");
    }
    if !sku
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.'))
    {
        return Err("SKU may only contain letters, digits, '-', '_' and '.'");
    }
    Ok(())
}

/// Validate product name
pub fn validate_product_name(name: &str) -> Result<(), &'static str> {
    let name = name.trim();
    if name.is_empty() {
        return Err("Name is required");
    }
    if name.chars().count() > MAX_NAME_LENGTH {
        return Err("Name must be at most 255 characters");
    }
    Ok(())
}

/// Parse a price: non-negative decimal with at most 2 decimal places
pub fn parse_price(price: &str) -> Result<Decimal, &'static str> {
    let value = Decimal::from_str(price.trim()).map_err(|_| "Price must be a decimal number")?;
    if value < Decimal::ZERO {
        return Err("Price cannot be negative");
    }
    if value.normalize().scale() > 2 {
        return Err("Price must have at most 2 decimal places");
    }
    Ok(value)
}

/// Decimal places a stored quantity keeps (`NUMERIC(16, 4)`)
pub const QUANTITY_SCALE: u32 = 4;

/// Validate a stock quantity is non-negative and fits the stored precision
pub fn validate_quantity(quantity: Decimal) -> Result<(), &'static str> {
    if quantity < Decimal::ZERO {
        return Err("Quantity cannot be negative");
    }
    if quantity.normalize().scale() > QUANTITY_SCALE {
        return Err("Quantity must have at most 4 decimal places");
    }
    Ok(())
}

// ============================================================================
// Alert Parameter Validations
// ============================================================================

/// Validate the sales lookback window (1..=max days)
pub fn validate_lookback_days(days: i64, max_days: u32) -> Result<u32, &'static str> {
    if days <= 0 {
        return Err("lookback_days must be a positive integer");
    }
    if days > i64::from(max_days) {
        return Err("lookback_days exceeds the allowed maximum");
    }
    Ok(days as u32)
}

// ============================================================================
// Product Creation
// ============================================================================

/// Product input that passed validation
#[derive(Debug, Clone, PartialEq)]
pub struct ValidatedProduct {
    pub name: String,
    pub sku: String,
    pub price: Decimal,
    pub product_type_id: Option<i64>,
    pub warehouse_id: Option<i64>,
    pub initial_quantity: Decimal,
}

/// Validate every field of a product creation request, collecting all failures
pub fn validate_create_product(
    input: &CreateProductInput,
) -> Result<ValidatedProduct, BTreeMap<&'static str, &'static str>> {
    let mut errors = BTreeMap::new();

    if let Err(e) = validate_product_name(&input.name) {
        errors.insert("name", e);
    }
    if let Err(e) = validate_sku(&input.sku) {
        errors.insert("sku", e);
    }
    let price = match parse_price(&input.price) {
        Ok(price) => price,
        Err(e) => {
            errors.insert("price", e);
            Decimal::ZERO
        }
    };

    let initial_quantity = input.initial_quantity.unwrap_or(Decimal::ZERO);
    if let Err(e) = validate_quantity(initial_quantity) {
        errors.insert("initial_quantity", e);
    } else if input.initial_quantity.is_some() && input.warehouse_id.is_none() {
        errors.insert("warehouse_id", "warehouse_id is required with initial_quantity");
    }

    if !errors.is_empty() {
        return Err(errors);
    }

    Ok(ValidatedProduct {
        name: input.name.trim().to_string(),
        sku: input.sku.trim().to_string(),
        price,
        product_type_id: input.product_type_id,
        warehouse_id: input.warehouse_id,
        initial_quantity,
    })
}
