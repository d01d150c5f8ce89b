//! Low-stock alert tests
//!
//! Scenario tests over a small two-warehouse company plus property tests for
//! the inclusion rule, threshold precedence and supplier ordering.

use chrono::{DateTime, Duration, TimeZone, Utc};
use proptest::prelude::*;
use rust_decimal::Decimal;
use std::str::FromStr;

use shared::alerts::{
    best_offer, compute_ads, generate_alerts, resolve_threshold, AlertRequest, InMemorySnapshot,
    SaleStatuses, ThresholdSource,
};
use shared::models::{InventoryPosition, ProductThreshold, SaleLine, SupplierOffer};

// Helper to create Decimal from string
fn dec(s: &str) -> Decimal {
    Decimal::from_str(s).unwrap()
}

fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 5, 15, 12, 0, 0).unwrap()
}

const ACME: i64 = 1;
const MAIN: i64 = 10;
const AUX: i64 = 11;
const WID1: i64 = 100;
const WID2: i64 = 101;
const GAD1: i64 = 102;
const WIDGETS: i64 = 1;
const GADGETS: i64 = 2;

fn position(
    product_id: i64,
    sku: &str,
    type_id: i64,
    warehouse_id: i64,
    quantity: &str,
) -> InventoryPosition {
    InventoryPosition {
        product_id,
        sku: sku.to_string(),
        product_name: format!("{} name", sku),
        product_type_id: Some(type_id),
        warehouse_id,
        warehouse_name: if warehouse_id == MAIN {
            "Main Warehouse".to_string()
        } else {
            "Aux Warehouse".to_string()
        },
        quantity: dec(quantity),
    }
}

fn sale(order_id: i64, status: &str, days_ago: i64, product_id: i64, qty: i64) -> SaleLine {
    SaleLine {
        order_id,
        order_status: status.to_string(),
        ordered_at: now() - Duration::days(days_ago),
        product_id,
        warehouse_id: MAIN,
        qty: Decimal::from(qty),
    }
}

fn offer(supplier_id: i64, name: &str, product_id: i64, preferred: bool, lead: i32) -> SupplierOffer {
    SupplierOffer {
        supplier_id,
        supplier_name: name.to_string(),
        company_id: ACME,
        product_id,
        lead_time_days: lead,
        preferred,
    }
}

/// Acme Inc with Main/Aux warehouses, widgets (default 20) and gadgets (default 10)
fn acme_snapshot() -> InMemorySnapshot {
    InMemorySnapshot::new()
        .with_warehouse(MAIN, ACME)
        .with_warehouse(AUX, ACME)
        .with_product_type(WIDGETS, 20)
        .with_product_type(GADGETS, 10)
        .with_inventory(position(WID1, "WID-001", WIDGETS, MAIN, "5"))
        .with_inventory(position(WID1, "WID-001", WIDGETS, AUX, "50"))
        .with_inventory(position(WID2, "WID-002", WIDGETS, MAIN, "25"))
        .with_inventory(position(GAD1, "GAD-001", GADGETS, MAIN, "2"))
        .with_threshold(ProductThreshold {
            company_id: ACME,
            product_id: WID1,
            warehouse_id: Some(MAIN),
            threshold: 18,
        })
        .with_threshold(ProductThreshold {
            company_id: ACME,
            product_id: GAD1,
            warehouse_id: None,
            threshold: 8,
        })
        .with_supplier(offer(1, "Supplier Corp", WID1, true, 7))
        .with_supplier(offer(1, "Supplier Corp", WID2, false, 10))
        .with_supplier(offer(2, "Fast Supply", WID1, false, 5))
        .with_supplier(offer(2, "Fast Supply", GAD1, true, 4))
        .with_sale(sale(1, "completed", 3, WID1, 10))
        .with_sale(sale(2, "shipped", 8, WID1, 6))
        .with_sale(sale(1, "completed", 3, WID2, 3))
        .with_sale(sale(2, "shipped", 8, GAD1, 2))
}

fn request(lookback_days: u32) -> AlertRequest {
    AlertRequest::new(ACME, lookback_days).unwrap().as_of(now())
}

// ============================================================================
// Scenario Tests
// ============================================================================

#[test]
fn test_happy_path_report() {
    let report = generate_alerts(&acme_snapshot(), &request(30), &SaleStatuses::default());

    assert_eq!(report.total_alerts, report.alerts.len());
    assert_eq!(report.total_alerts, 2);
    assert!(report.diagnostics.is_none());

    // GAD-001: 2 / (2/30) = 30 days; WID-001: 5 / (16/30) = 9.375 days
    let first = &report.alerts[0];
    assert_eq!(first.sku, "WID-001");
    assert_eq!(first.warehouse_id, MAIN);
    assert_eq!(first.warehouse_name, "Main Warehouse");
    assert_eq!(first.current_stock, dec("5"));
    assert_eq!(first.threshold, 18);
    assert_eq!(first.avg_daily_sales, dec("0.53"));
    assert_eq!(first.days_until_stockout, dec("9.4"));
    let supplier = first.supplier.as_ref().unwrap();
    assert_eq!(supplier.id, 1);
    assert_eq!(supplier.name, "Supplier Corp");
    assert_eq!(supplier.lead_time_days, 7);

    let second = &report.alerts[1];
    assert_eq!(second.sku, "GAD-001");
    assert_eq!(second.threshold, 8);
    assert_eq!(second.days_until_stockout, dec("30"));
    assert_eq!(second.supplier.as_ref().map(|s| s.id), Some(2));
}

#[test]
fn test_stock_at_or_above_threshold_not_alerted() {
    // WID-002 in Main: 25 >= type default 20; WID-001 in Aux: 50 >= 20
    let report = generate_alerts(&acme_snapshot(), &request(30), &SaleStatuses::default());
    assert!(report.alerts.iter().all(|a| a.sku != "WID-002"));
    assert!(report.alerts.iter().all(|a| a.warehouse_id != AUX));

    let snapshot = InMemorySnapshot::new()
        .with_warehouse(MAIN, ACME)
        .with_inventory(position(WID1, "WID-001", WIDGETS, MAIN, "20"))
        .with_threshold(ProductThreshold {
            company_id: ACME,
            product_id: WID1,
            warehouse_id: Some(MAIN),
            threshold: 18,
        })
        .with_sale(sale(1, "completed", 1, WID1, 30));
    let report = generate_alerts(&snapshot, &request(30), &SaleStatuses::default());
    assert_eq!(report.total_alerts, 0);
}

#[test]
fn test_below_threshold_without_sales_not_alerted() {
    let snapshot = InMemorySnapshot::new()
        .with_warehouse(MAIN, ACME)
        .with_product_type(WIDGETS, 1000)
        .with_inventory(position(WID1, "WID-001", WIDGETS, MAIN, "0"));

    let report = generate_alerts(
        &snapshot,
        &request(30).with_debug(true),
        &SaleStatuses::default(),
    );
    assert_eq!(report.total_alerts, 0);
    let diagnostics = report.diagnostics.unwrap();
    assert_eq!(diagnostics.excluded_no_sales, 1);
    assert_eq!(diagnostics.excluded_total, 1);
}

#[test]
fn test_sales_outside_window_do_not_count() {
    // Only sales 3 and 8 days ago exist; a 2-day window sees nothing
    let report = generate_alerts(&acme_snapshot(), &request(2), &SaleStatuses::default());
    assert_eq!(report.total_alerts, 0);

    let report = generate_alerts(&acme_snapshot(), &request(5), &SaleStatuses::default());
    assert_eq!(report.total_alerts, 1);
    assert_eq!(report.alerts[0].sku, "WID-001");
    // 10 units over 5 days = 2/day; 5 / 2 = 2.5
    assert_eq!(report.alerts[0].days_until_stockout, dec("2.5"));
}

#[test]
fn test_empty_company_gives_empty_report() {
    let snapshot = InMemorySnapshot::new().with_warehouse(MAIN, ACME);
    let report = generate_alerts(&snapshot, &request(30), &SaleStatuses::default());
    assert!(report.alerts.is_empty());
    assert_eq!(report.total_alerts, 0);

    let no_warehouses = InMemorySnapshot::new();
    let report = generate_alerts(&no_warehouses, &request(30), &SaleStatuses::default());
    assert!(report.is_empty());
    assert_eq!(report.total_alerts, 0);
}

#[test]
fn test_empty_report_json_shape() {
    let report = generate_alerts(&InMemorySnapshot::new(), &request(30), &SaleStatuses::default());
    let json = serde_json::to_value(&report).unwrap();
    assert_eq!(json, serde_json::json!({"alerts": [], "total_alerts": 0}));
}

#[test]
fn test_warehouse_filter() {
    let snapshot = acme_snapshot();

    let main_only = generate_alerts(
        &snapshot,
        &request(30).with_warehouse(Some(MAIN)),
        &SaleStatuses::default(),
    );
    assert_eq!(main_only.total_alerts, 2);
    assert!(main_only.alerts.iter().all(|a| a.warehouse_id == MAIN));

    let aux_only = generate_alerts(
        &snapshot,
        &request(30).with_warehouse(Some(AUX)).with_debug(true),
        &SaleStatuses::default(),
    );
    assert_eq!(aux_only.total_alerts, 0);
    assert_eq!(aux_only.diagnostics.unwrap().inventory_rows_scanned, 1);
}

#[test]
fn test_other_company_rows_never_leak() {
    let snapshot = acme_snapshot()
        .with_warehouse(99, 2)
        .with_inventory(position(WID1, "WID-001", WIDGETS, 99, "0"))
        .with_sale(SaleLine {
            warehouse_id: 99,
            ..sale(9, "completed", 1, WID1, 40)
        });

    let report = generate_alerts(&snapshot, &request(30), &SaleStatuses::default());
    assert!(report.alerts.iter().all(|a| a.warehouse_id != 99));

    // Filtering Acme by the other company's warehouse yields nothing
    let report = generate_alerts(
        &snapshot,
        &request(30).with_warehouse(Some(99)),
        &SaleStatuses::default(),
    );
    assert_eq!(report.total_alerts, 0);
}

#[test]
fn test_debug_does_not_change_alerts() {
    let snapshot = acme_snapshot();
    let plain = generate_alerts(&snapshot, &request(30), &SaleStatuses::default());
    let debug = generate_alerts(&snapshot, &request(30).with_debug(true), &SaleStatuses::default());

    assert_eq!(plain.total_alerts, debug.total_alerts);
    assert!(plain.alerts.iter().all(|a| a.threshold_source.is_none()));

    // Apart from the threshold layer, debug output carries the same alerts
    let sources: Vec<_> = debug.alerts.iter().map(|a| a.threshold_source).collect();
    assert_eq!(
        sources,
        vec![
            Some(ThresholdSource::WarehouseOverride),
            Some(ThresholdSource::CompanyOverride),
        ]
    );
    let stripped: Vec<_> = debug
        .alerts
        .iter()
        .cloned()
        .map(|mut a| {
            a.threshold_source = None;
            a
        })
        .collect();
    assert_eq!(plain.alerts, stripped);

    let json = serde_json::to_value(&plain.alerts[0]).unwrap();
    assert!(json.get("threshold_source").is_none());
    let json = serde_json::to_value(&debug.alerts[0]).unwrap();
    assert_eq!(json["threshold_source"], "warehouse_override");

    let diagnostics = debug.diagnostics.unwrap();
    assert_eq!(diagnostics.inventory_rows_scanned, 4);
    assert_eq!(diagnostics.excluded_total, 2);
    assert_eq!(diagnostics.excluded_above_threshold, 2);
    assert_eq!(diagnostics.excluded_no_sales, 0);
    assert_eq!(diagnostics.lookback_days, 30);
    assert_eq!(diagnostics.as_of, Some(now()));
}

#[test]
fn test_missing_supplier_is_null() {
    let snapshot = InMemorySnapshot::new()
        .with_warehouse(MAIN, ACME)
        .with_product_type(WIDGETS, 20)
        .with_inventory(position(WID2, "WID-002", WIDGETS, MAIN, "1"))
        .with_sale(sale(1, "placed", 1, WID2, 3));

    let report = generate_alerts(&snapshot, &request(30), &SaleStatuses::default());
    assert_eq!(report.total_alerts, 1);
    assert!(report.alerts[0].supplier.is_none());

    let json = serde_json::to_value(&report.alerts[0]).unwrap();
    assert!(json["supplier"].is_null());
}

#[test]
fn test_report_is_deterministic() {
    let snapshot = acme_snapshot();
    let a = generate_alerts(&snapshot, &request(30), &SaleStatuses::default());
    let b = generate_alerts(&snapshot, &request(30), &SaleStatuses::default());
    assert_eq!(a, b);
}

#[test]
fn test_equal_days_sorted_by_product_then_warehouse() {
    let snapshot = InMemorySnapshot::new()
        .with_warehouse(MAIN, ACME)
        .with_warehouse(AUX, ACME)
        .with_product_type(WIDGETS, 20)
        .with_inventory(position(WID2, "WID-002", WIDGETS, AUX, "3"))
        .with_inventory(position(WID2, "WID-002", WIDGETS, MAIN, "3"))
        .with_inventory(position(WID1, "WID-001", WIDGETS, MAIN, "3"))
        .with_sale(sale(1, "completed", 1, WID1, 30))
        .with_sale(sale(2, "completed", 1, WID2, 30))
        .with_sale(SaleLine {
            warehouse_id: AUX,
            ..sale(3, "completed", 1, WID2, 30)
        });

    let report = generate_alerts(&snapshot, &request(30), &SaleStatuses::default());
    let keys: Vec<(i64, i64)> = report
        .alerts
        .iter()
        .map(|a| (a.product_id, a.warehouse_id))
        .collect();
    assert_eq!(keys, vec![(WID1, MAIN), (WID2, MAIN), (WID2, AUX)]);
}

#[test]
fn test_ads_zero_without_lines_for_any_window() {
    let snapshot = acme_snapshot();
    for days in [1, 30, 90] {
        let v = compute_ads(&snapshot, WID2, AUX, days, now(), &SaleStatuses::default());
        assert_eq!(v.per_day(), Decimal::ZERO);
    }
}

// ============================================================================
// Property Tests
// ============================================================================

fn quantity_strategy() -> impl Strategy<Value = Decimal> {
    (0i64..10_000).prop_map(|n| Decimal::new(n, 1))
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// Included alerts satisfy stock < threshold and ads > 0, and their
    /// unrounded days until stockout equal stock / ads exactly
    #[test]
    fn prop_inclusion_rule(
        stock in quantity_strategy(),
        threshold in 0i32..500,
        sold in 0i64..200,
        lookback in 1u32..120,
    ) {
        let snapshot = InMemorySnapshot::new()
            .with_warehouse(MAIN, ACME)
            .with_inventory(InventoryPosition {
                quantity: stock,
                product_type_id: None,
                ..position(WID1, "WID-001", WIDGETS, MAIN, "0")
            })
            .with_threshold(ProductThreshold {
                company_id: ACME,
                product_id: WID1,
                warehouse_id: None,
                threshold,
            });
        let snapshot = if sold > 0 {
            snapshot.with_sale(sale(1, "completed", 0, WID1, sold))
        } else {
            snapshot
        };

        let report = generate_alerts(&snapshot, &request(lookback), &SaleStatuses::default());
        let should_alert = stock < Decimal::from(threshold) && sold > 0;
        prop_assert_eq!(report.total_alerts, usize::from(should_alert));

        if let Some(alert) = report.alerts.first() {
            let velocity = compute_ads(&snapshot, WID1, MAIN, lookback, now(), &SaleStatuses::default());
            let exact = velocity.days_until_stockout(stock).unwrap();
            // exact == stock / (sold / lookback), up to the 28-digit Decimal precision
            let residual = (exact * Decimal::from(sold) - stock * Decimal::from(lookback)).abs();
            prop_assert!(residual < dec("0.000000000001"));
            prop_assert_eq!(alert.days_until_stockout, shared::alerts::round_days(exact));
        }
    }

    /// Warehouse override > company override > type default > 0
    #[test]
    fn prop_threshold_precedence(
        type_default in proptest::option::of(0i32..100),
        company_wide in proptest::option::of(0i32..100),
        warehouse_specific in proptest::option::of(0i32..100),
    ) {
        let mut snapshot = InMemorySnapshot::new().with_warehouse(MAIN, ACME);
        if let Some(value) = type_default {
            snapshot = snapshot.with_product_type(WIDGETS, value).with_product_type_link(WID1, WIDGETS);
        }
        if let Some(value) = company_wide {
            snapshot = snapshot.with_threshold(ProductThreshold {
                company_id: ACME, product_id: WID1, warehouse_id: None, threshold: value,
            });
        }
        if let Some(value) = warehouse_specific {
            snapshot = snapshot.with_threshold(ProductThreshold {
                company_id: ACME, product_id: WID1, warehouse_id: Some(MAIN), threshold: value,
            });
        }

        let expected = warehouse_specific.or(company_wide).or(type_default).unwrap_or(0);
        prop_assert_eq!(resolve_threshold(&snapshot, ACME, WID1, MAIN), expected);
    }

    /// The chosen supplier is never beaten by another offer on (preferred, lead time, id)
    #[test]
    fn prop_supplier_is_minimal(
        offers in prop::collection::vec((any::<bool>(), 0i32..30), 1..8),
    ) {
        let offers: Vec<SupplierOffer> = offers
            .into_iter()
            .enumerate()
            .map(|(i, (preferred, lead))| offer(i as i64 + 1, "S", WID1, preferred, lead))
            .collect();

        let best = best_offer(&offers).unwrap();
        for other in &offers {
            let best_key = (!best.preferred, best.lead_time_days, best.supplier_id);
            let other_key = (!other.preferred, other.lead_time_days, other.supplier_id);
            prop_assert!(best_key <= other_key);
        }
        if offers.iter().any(|o| o.preferred) {
            prop_assert!(best.preferred);
        }
    }

    /// Sales older than the window never contribute; sales inside always do
    #[test]
    fn prop_window_filter(
        lookback in 1u32..60,
        ages in prop::collection::vec(0i64..120, 0..10),
    ) {
        let mut snapshot = InMemorySnapshot::new();
        for (i, age) in ages.iter().enumerate() {
            snapshot = snapshot.with_sale(sale(i as i64, "completed", *age, WID1, 1));
        }

        let expected = ages.iter().filter(|age| **age <= i64::from(lookback)).count();
        let v = compute_ads(&snapshot, WID1, MAIN, lookback, now(), &SaleStatuses::default());
        prop_assert_eq!(v.units_sold, Decimal::from(expected as i64));
        prop_assert_eq!(v.window_days, lookback);
    }
}
