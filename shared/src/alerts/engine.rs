//! Low-stock alert report generation
//!
//! For every inventory row of a company the engine resolves a threshold,
//! estimates sales velocity, and keeps the row only when stock is below the
//! threshold *and* there has been demand in the lookback window. Rows with no
//! recent sales are dead stock and are never alerted.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use rust_decimal::{Decimal, RoundingStrategy};
use thiserror::Error;

use super::snapshot::SnapshotSource;
use super::supplier::{select_supplier, SupplierSummary};
use super::threshold::{resolve_threshold_with_source, ThresholdSource};
use super::velocity::{compute_ads_in_window, SaleStatuses, SalesVelocity};
use crate::models::{AlertDiagnostics, InventoryPosition, LowStockAlert, LowStockReport};
use crate::types::LookbackWindow;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum AlertRequestError {
    #[error("lookback_days must be a positive integer")]
    NonPositiveLookback,
}

/// Parameters of one report
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AlertRequest {
    pub company_id: i64,
    pub lookback_days: u32,
    pub warehouse_id: Option<i64>,
    pub debug: bool,
    /// End of the lookback window
    pub as_of: DateTime<Utc>,
}

impl AlertRequest {
    pub fn new(company_id: i64, lookback_days: u32) -> Result<Self, AlertRequestError> {
        if lookback_days == 0 {
            return Err(AlertRequestError::NonPositiveLookback);
        }
        Ok(Self {
            company_id,
            lookback_days,
            warehouse_id: None,
            debug: false,
            as_of: Utc::now(),
        })
    }

    pub fn with_warehouse(mut self, warehouse_id: Option<i64>) -> Self {
        self.warehouse_id = warehouse_id;
        self
    }

    pub fn with_debug(mut self, debug: bool) -> Self {
        self.debug = debug;
        self
    }

    pub fn as_of(mut self, as_of: DateTime<Utc>) -> Self {
        self.as_of = as_of;
        self
    }

    pub fn window(&self) -> LookbackWindow {
        LookbackWindow::ending_at(self.as_of, self.lookback_days)
    }
}

/// Outcome of the inclusion rule for one pair
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Inclusion {
    /// Below threshold with demand; carries the unrounded days until stockout
    Alert(Decimal),
    AboveThreshold,
    NoDemand,
}

/// Include iff `stock < threshold` and ADS > 0
pub fn evaluate_inclusion(stock: Decimal, threshold: i32, velocity: &SalesVelocity) -> Inclusion {
    if stock >= Decimal::from(threshold) {
        return Inclusion::AboveThreshold;
    }
    match velocity.days_until_stockout(stock) {
        Some(days) => Inclusion::Alert(days),
        None => Inclusion::NoDemand,
    }
}

/// Round days until stockout for presentation
pub fn round_days(days: Decimal) -> Decimal {
    days.round_dp_with_strategy(1, RoundingStrategy::MidpointAwayFromZero)
}

fn round_ads(ads: Decimal) -> Decimal {
    ads.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

struct RankedAlert {
    days_exact: Decimal,
    alert: LowStockAlert,
}

fn build_alert(
    position: &InventoryPosition,
    threshold: i32,
    threshold_source: Option<ThresholdSource>,
    velocity: &SalesVelocity,
    days_exact: Decimal,
    supplier: Option<SupplierSummary>,
) -> LowStockAlert {
    LowStockAlert {
        product_id: position.product_id,
        product_name: position.product_name.clone(),
        sku: position.sku.clone(),
        warehouse_id: position.warehouse_id,
        warehouse_name: position.warehouse_name.clone(),
        current_stock: position.quantity,
        threshold,
        avg_daily_sales: round_ads(velocity.per_day()),
        days_until_stockout: round_days(days_exact),
        supplier: supplier.map(Into::into),
        threshold_source,
    }
}

/// Build the low-stock report for `request.company_id`.
///
/// Never fails: an unknown company, a company without warehouses, or one
/// without inventory all produce an empty report.
pub fn generate_alerts<S: SnapshotSource + ?Sized>(
    snapshot: &S,
    request: &AlertRequest,
    statuses: &SaleStatuses,
) -> LowStockReport {
    let window = request.window();
    let candidates = snapshot.company_inventory(request.company_id, request.warehouse_id);

    let mut diagnostics = AlertDiagnostics {
        inventory_rows_scanned: candidates.len(),
        lookback_days: request.lookback_days,
        window_start: Some(window.start),
        as_of: Some(window.end),
        ..AlertDiagnostics::default()
    };

    // Several warehouses may stock the same product
    let mut suppliers: HashMap<i64, Option<SupplierSummary>> = HashMap::new();
    let mut ranked = Vec::new();

    for position in &candidates {
        let (threshold, source) = resolve_threshold_with_source(
            snapshot,
            request.company_id,
            position.product_id,
            position.warehouse_id,
        );
        let velocity = compute_ads_in_window(
            snapshot,
            position.product_id,
            position.warehouse_id,
            &window,
            statuses,
        );

        match evaluate_inclusion(position.quantity, threshold, &velocity) {
            Inclusion::Alert(days_exact) => {
                let supplier = suppliers
                    .entry(position.product_id)
                    .or_insert_with(|| {
                        select_supplier(snapshot, request.company_id, position.product_id)
                    })
                    .clone();
                ranked.push(RankedAlert {
                    days_exact,
                    alert: build_alert(
                        position,
                        threshold,
                        request.debug.then_some(source),
                        &velocity,
                        days_exact,
                        supplier,
                    ),
                });
            }
            Inclusion::AboveThreshold => diagnostics.excluded_above_threshold += 1,
            Inclusion::NoDemand => diagnostics.excluded_no_sales += 1,
        }
    }

    ranked.sort_by(|a, b| {
        a.days_exact
            .cmp(&b.days_exact)
            .then(a.alert.product_id.cmp(&b.alert.product_id))
            .then(a.alert.warehouse_id.cmp(&b.alert.warehouse_id))
    });

    let alerts: Vec<LowStockAlert> = ranked.into_iter().map(|r| r.alert).collect();
    diagnostics.excluded_total = candidates.len() - alerts.len();

    tracing::debug!(
        company_id = request.company_id,
        warehouse_id = ?request.warehouse_id,
        lookback_days = request.lookback_days,
        scanned = diagnostics.inventory_rows_scanned,
        alerts = alerts.len(),
        "Generated low-stock report"
    );

    LowStockReport {
        total_alerts: alerts.len(),
        alerts,
        diagnostics: request.debug.then_some(diagnostics),
    }
}
