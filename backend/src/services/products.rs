//! Product catalog service
//!
//! Creates products and, optionally, their opening stock in a warehouse.

use rust_decimal::Decimal;
use serde::Serialize;
use shared::validation::validate_create_product;
use sqlx::PgPool;

use crate::error::{AppError, AppResult};
use crate::models::{CreateProductInput, InventoryReason};

/// Product service for catalog management
#[derive(Clone)]
pub struct ProductService {
    db: PgPool,
}

/// Result of creating a product
#[derive(Debug, Clone, Serialize)]
pub struct CreatedProduct {
    pub product_id: i64,
    pub sku: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub warehouse_id: Option<i64>,
    pub initial_quantity: Decimal,
}

fn sku_conflict() -> AppError {
    AppError::Conflict {
        code: "SKU_ALREADY_EXISTS".to_string(),
        message: "A product with this SKU already exists".to_string(),
    }
}

impl ProductService {
    /// Create a new ProductService instance
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    /// Create a product with its opening inventory, atomically
    pub async fn create_product(&self, input: CreateProductInput) -> AppResult<CreatedProduct> {
        let product = validate_create_product(&input).map_err(|errors| {
            AppError::ValidationErrors(
                errors
                    .into_iter()
                    .map(|(field, message)| (field.to_string(), message.to_string()))
                    .collect(),
            )
        })?;

        let mut tx = self.db.begin().await?;

        if let Some(warehouse_id) = product.warehouse_id {
            let exists = sqlx::query_scalar::<_, bool>(
                "SELECT EXISTS(SELECT 1 FROM warehouses WHERE id = $1)",
            )
            .bind(warehouse_id)
            .fetch_one(&mut *tx)
            .await?;

            if !exists {
                return Err(AppError::NotFound("Warehouse".to_string()));
            }
        }

        if let Some(type_id) = product.product_type_id {
            let exists = sqlx::query_scalar::<_, bool>(
                "SELECT EXISTS(SELECT 1 FROM product_types WHERE id = $1)",
            )
            .bind(type_id)
            .fetch_one(&mut *tx)
            .await?;

            if !exists {
                return Err(AppError::NotFound("Product type".to_string()));
            }
        }

        let sku_taken =
            sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM products WHERE sku = $1)")
                .bind(&product.sku)
                .fetch_one(&mut *tx)
                .await?;

        if sku_taken {
            return Err(sku_conflict());
        }

        let product_id = sqlx::query_scalar::<_, i64>(
            r#"
            INSERT INTO products (sku, name, product_type_id, price)
            VALUES ($1, $2, $3, $4)
            RETURNING id
            "#,
        )
        .bind(&product.sku)
        .bind(&product.name)
        .bind(product.product_type_id)
        .bind(product.price)
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| {
            // Lost a race with a concurrent insert of the same SKU
            if let sqlx::Error::Database(db) = &e {
                if db.is_unique_violation() {
                    return sku_conflict();
                }
            }
            AppError::DatabaseError(e)
        })?;

        if let Some(warehouse_id) = product.warehouse_id {
            sqlx::query(
                r#"
                INSERT INTO inventory (product_id, warehouse_id, quantity)
                VALUES ($1, $2, $3)
                "#,
            )
            .bind(product_id)
            .bind(warehouse_id)
            .bind(product.initial_quantity)
            .execute(&mut *tx)
            .await?;

            if product.initial_quantity > Decimal::ZERO {
                sqlx::query(
                    r#"
                    INSERT INTO inventory_transactions
                        (product_id, warehouse_id, qty_delta, reason, ref_type, ref_id)
                    VALUES ($1, $2, $3, $4, 'product_create', $5)
                    "#,
                )
                .bind(product_id)
                .bind(warehouse_id)
                .bind(product.initial_quantity)
                .bind(InventoryReason::Adjustment.as_str())
                .bind(product_id.to_string())
                .execute(&mut *tx)
                .await?;
            }
        }

        tx.commit().await?;

        tracing::info!(product_id, sku = %product.sku, "Created product");

        Ok(CreatedProduct {
            product_id,
            sku: product.sku,
            warehouse_id: product.warehouse_id,
            initial_quantity: product.initial_quantity,
        })
    }
}
