//! Low-stock alert service
//!
//! Loads the rows a report needs from Postgres in one read-only transaction
//! and hands them to the pure engine in `shared::alerts`.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use shared::alerts::{generate_alerts, AlertRequest, InMemorySnapshot, SaleStatuses};
use sqlx::{FromRow, PgPool, Postgres, Transaction};

use crate::error::{AppError, AppResult};
use crate::models::{InventoryPosition, LowStockReport, ProductThreshold, SaleLine, SupplierOffer};

/// Alert service for computing low-stock reports
#[derive(Clone)]
pub struct AlertService {
    db: PgPool,
    statuses: SaleStatuses,
}

/// Row for the inventory position query
#[derive(Debug, FromRow)]
struct PositionRow {
    product_id: i64,
    sku: String,
    product_name: String,
    product_type_id: Option<i64>,
    warehouse_id: i64,
    warehouse_name: String,
    quantity: Decimal,
}

impl From<PositionRow> for InventoryPosition {
    fn from(r: PositionRow) -> Self {
        Self {
            product_id: r.product_id,
            sku: r.sku,
            product_name: r.product_name,
            product_type_id: r.product_type_id,
            warehouse_id: r.warehouse_id,
            warehouse_name: r.warehouse_name,
            quantity: r.quantity,
        }
    }
}

/// Row for the threshold override query
#[derive(Debug, FromRow)]
struct ThresholdRow {
    company_id: i64,
    product_id: i64,
    warehouse_id: Option<i64>,
    threshold: i32,
}

/// Row for the sales history query
#[derive(Debug, FromRow)]
struct SaleRow {
    order_id: i64,
    status: String,
    created_at: DateTime<Utc>,
    product_id: i64,
    warehouse_id: i64,
    qty: Decimal,
}

/// Row for the supplier offer query
#[derive(Debug, FromRow)]
struct SupplierRow {
    supplier_id: i64,
    supplier_name: String,
    company_id: i64,
    product_id: i64,
    lead_time_days: i32,
    preferred: bool,
}

impl AlertService {
    /// Create a new AlertService instance
    pub fn new(db: PgPool, statuses: SaleStatuses) -> Self {
        Self { db, statuses }
    }

    /// Generate the low-stock report for a company.
    ///
    /// Returns `NotFound` when the company, or the requested warehouse within
    /// it, does not exist.
    pub async fn low_stock_report(&self, request: &AlertRequest) -> AppResult<LowStockReport> {
        let snapshot = self.load_snapshot(request).await?;
        Ok(generate_alerts(&snapshot, request, &self.statuses))
    }

    /// Read every row the report needs from one consistent snapshot
    async fn load_snapshot(&self, request: &AlertRequest) -> AppResult<InMemorySnapshot> {
        let mut tx = self.db.begin().await?;
        sqlx::query("SET TRANSACTION ISOLATION LEVEL REPEATABLE READ, READ ONLY")
            .execute(&mut *tx)
            .await?;

        let company_exists =
            sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM companies WHERE id = $1)")
                .bind(request.company_id)
                .fetch_one(&mut *tx)
                .await?;

        if !company_exists {
            return Err(AppError::NotFound("Company".to_string()));
        }

        let warehouses = sqlx::query_as::<_, (i64, i64)>(
            "SELECT id, company_id FROM warehouses WHERE company_id = $1 ORDER BY id",
        )
        .bind(request.company_id)
        .fetch_all(&mut *tx)
        .await?;

        if let Some(warehouse_id) = request.warehouse_id {
            if !warehouses.iter().any(|(id, _)| *id == warehouse_id) {
                return Err(AppError::NotFound("Warehouse".to_string()));
            }
        }

        let mut snapshot = warehouses
            .into_iter()
            .fold(InMemorySnapshot::new(), |s, (id, company_id)| {
                s.with_warehouse(id, company_id)
            });

        snapshot = Self::load_inventory(&mut tx, request, snapshot).await?;
        snapshot = Self::load_thresholds(&mut tx, request.company_id, snapshot).await?;
        snapshot = Self::load_sales(&mut tx, request, snapshot).await?;
        snapshot = Self::load_suppliers(&mut tx, request.company_id, snapshot).await?;

        tx.commit().await?;

        tracing::debug!(
            company_id = request.company_id,
            inventory_rows = snapshot.inventory_len(),
            "Loaded alert snapshot"
        );

        Ok(snapshot)
    }

    async fn load_inventory(
        tx: &mut Transaction<'_, Postgres>,
        request: &AlertRequest,
        mut snapshot: InMemorySnapshot,
    ) -> AppResult<InMemorySnapshot> {
        let rows = sqlx::query_as::<_, PositionRow>(
            r#"
            SELECT i.product_id, p.sku, p.name AS product_name, p.product_type_id,
                   i.warehouse_id, w.name AS warehouse_name, i.quantity
            FROM inventory i
            JOIN products p ON p.id = i.product_id
            JOIN warehouses w ON w.id = i.warehouse_id
            WHERE w.company_id = $1
              AND ($2::BIGINT IS NULL OR i.warehouse_id = $2)
            ORDER BY i.product_id, i.warehouse_id
            "#,
        )
        .bind(request.company_id)
        .bind(request.warehouse_id)
        .fetch_all(&mut **tx)
        .await?;

        let types = sqlx::query_as::<_, (i64, i32)>(
            r#"
            SELECT pt.id, pt.default_low_stock_threshold
            FROM product_types pt
            WHERE pt.id IN (
                SELECT DISTINCT p.product_type_id
                FROM inventory i
                JOIN products p ON p.id = i.product_id
                JOIN warehouses w ON w.id = i.warehouse_id
                WHERE w.company_id = $1 AND p.product_type_id IS NOT NULL
            )
            "#,
        )
        .bind(request.company_id)
        .fetch_all(&mut **tx)
        .await?;

        for (type_id, default_threshold) in types {
            snapshot = snapshot.with_product_type(type_id, default_threshold);
        }
        for row in rows {
            snapshot = snapshot.with_inventory(row.into());
        }
        Ok(snapshot)
    }

    async fn load_thresholds(
        tx: &mut Transaction<'_, Postgres>,
        company_id: i64,
        mut snapshot: InMemorySnapshot,
    ) -> AppResult<InMemorySnapshot> {
        let rows = sqlx::query_as::<_, ThresholdRow>(
            r#"
            SELECT company_id, product_id, warehouse_id, threshold
            FROM product_thresholds
            WHERE company_id = $1
            "#,
        )
        .bind(company_id)
        .fetch_all(&mut **tx)
        .await?;

        for r in rows {
            snapshot = snapshot.with_threshold(ProductThreshold {
                company_id: r.company_id,
                product_id: r.product_id,
                warehouse_id: r.warehouse_id,
                threshold: r.threshold,
            });
        }
        Ok(snapshot)
    }

    /// Order lines inside the lookback window; status filtering happens in the engine
    async fn load_sales(
        tx: &mut Transaction<'_, Postgres>,
        request: &AlertRequest,
        mut snapshot: InMemorySnapshot,
    ) -> AppResult<InMemorySnapshot> {
        let window = request.window();
        let rows = sqlx::query_as::<_, SaleRow>(
            r#"
            SELECT o.id AS order_id, o.status, o.created_at,
                   ol.product_id, ol.warehouse_id, ol.qty
            FROM order_lines ol
            JOIN orders o ON o.id = ol.order_id
            JOIN warehouses w ON w.id = ol.warehouse_id
            WHERE o.company_id = $1
              AND w.company_id = $1
              AND ($2::BIGINT IS NULL OR ol.warehouse_id = $2)
              AND o.created_at >= $3
              AND o.created_at <= $4
            "#,
        )
        .bind(request.company_id)
        .bind(request.warehouse_id)
        .bind(window.start)
        .bind(window.end)
        .fetch_all(&mut **tx)
        .await?;

        for r in rows {
            snapshot = snapshot.with_sale(SaleLine {
                order_id: r.order_id,
                order_status: r.status,
                ordered_at: r.created_at,
                product_id: r.product_id,
                warehouse_id: r.warehouse_id,
                qty: r.qty,
            });
        }
        Ok(snapshot)
    }

    async fn load_suppliers(
        tx: &mut Transaction<'_, Postgres>,
        company_id: i64,
        mut snapshot: InMemorySnapshot,
    ) -> AppResult<InMemorySnapshot> {
        let rows = sqlx::query_as::<_, SupplierRow>(
            r#"
            SELECT ps.supplier_id, s.name AS supplier_name, ps.company_id, ps.product_id,
                   ps.lead_time_days, ps.preferred
            FROM product_suppliers ps
            JOIN suppliers s ON s.id = ps.supplier_id
            WHERE ps.company_id = $1
            "#,
        )
        .bind(company_id)
        .fetch_all(&mut **tx)
        .await?;

        for r in rows {
            snapshot = snapshot.with_supplier(SupplierOffer {
                supplier_id: r.supplier_id,
                supplier_name: r.supplier_name,
                company_id: r.company_id,
                product_id: r.product_id,
                lead_time_days: r.lead_time_days,
                preferred: r.preferred,
            });
        }
        Ok(snapshot)
    }
}
