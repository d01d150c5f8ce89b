//! Threshold resolution by override precedence

use serde::{Deserialize, Serialize};

use super::snapshot::SnapshotSource;

/// Layer a resolved threshold came from, highest precedence first
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ThresholdSource {
    /// Override for this exact (company, product, warehouse)
    WarehouseOverride,
    /// Override for (company, product) with no warehouse
    CompanyOverride,
    /// Default threshold of the product's type
    ProductTypeDefault,
    /// Nothing configured
    Fallback,
}

impl ThresholdSource {
    /// Evaluation order; the first layer yielding a value wins
    pub const PRECEDENCE: [ThresholdSource; 4] = [
        ThresholdSource::WarehouseOverride,
        ThresholdSource::CompanyOverride,
        ThresholdSource::ProductTypeDefault,
        ThresholdSource::Fallback,
    ];

    fn lookup<S: SnapshotSource + ?Sized>(
        self,
        snapshot: &S,
        company_id: i64,
        product_id: i64,
        warehouse_id: i64,
    ) -> Option<i32> {
        match self {
            ThresholdSource::WarehouseOverride => snapshot
                .threshold_overrides(company_id, product_id)
                .into_iter()
                .find(|t| t.warehouse_id == Some(warehouse_id))
                .map(|t| t.threshold),
            ThresholdSource::CompanyOverride => snapshot
                .threshold_overrides(company_id, product_id)
                .into_iter()
                .find(|t| t.is_company_wide())
                .map(|t| t.threshold),
            ThresholdSource::ProductTypeDefault => snapshot.product_type_default(product_id),
            ThresholdSource::Fallback => Some(0),
        }
    }
}

/// Resolve the threshold and report which layer supplied it
pub fn resolve_threshold_with_source<S: SnapshotSource + ?Sized>(
    snapshot: &S,
    company_id: i64,
    product_id: i64,
    warehouse_id: i64,
) -> (i32, ThresholdSource) {
    ThresholdSource::PRECEDENCE
        .iter()
        .find_map(|source| {
            source
                .lookup(snapshot, company_id, product_id, warehouse_id)
                .map(|value| (value.max(0), *source))
        })
        .unwrap_or((0, ThresholdSource::Fallback))
}

/// Low-stock threshold for (company, product, warehouse); never negative
pub fn resolve_threshold<S: SnapshotSource + ?Sized>(
    snapshot: &S,
    company_id: i64,
    product_id: i64,
    warehouse_id: i64,
) -> i32 {
    resolve_threshold_with_source(snapshot, company_id, product_id, warehouse_id).0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::alerts::InMemorySnapshot;
    use crate::models::ProductThreshold;

    fn override_row(warehouse_id: Option<i64>, threshold: i32) -> ProductThreshold {
        ProductThreshold {
            company_id: 1,
            product_id: 100,
            warehouse_id,
            threshold,
        }
    }

    #[test]
    fn test_no_configuration_falls_back_to_zero() {
        let snapshot = InMemorySnapshot::new();
        assert_eq!(
            resolve_threshold_with_source(&snapshot, 1, 100, 10),
            (0, ThresholdSource::Fallback)
        );
    }

    #[test]
    fn test_type_default_used_without_overrides() {
        let snapshot = InMemorySnapshot::new()
            .with_product_type(7, 20)
            .with_product_type_link(100, 7);
        assert_eq!(
            resolve_threshold_with_source(&snapshot, 1, 100, 10),
            (20, ThresholdSource::ProductTypeDefault)
        );
    }

    #[test]
    fn test_company_override_beats_type_default() {
        let snapshot = InMemorySnapshot::new()
            .with_product_type(7, 20)
            .with_product_type_link(100, 7)
            .with_threshold(override_row(None, 8));
        assert_eq!(
            resolve_threshold_with_source(&snapshot, 1, 100, 10),
            (8, ThresholdSource::CompanyOverride)
        );
    }

    #[test]
    fn test_warehouse_override_beats_everything() {
        let snapshot = InMemorySnapshot::new()
            .with_product_type(7, 20)
            .with_product_type_link(100, 7)
            .with_threshold(override_row(None, 8))
            .with_threshold(override_row(Some(10), 18));

        assert_eq!(resolve_threshold(&snapshot, 1, 100, 10), 18);
        // Another warehouse only sees the company-wide row
        assert_eq!(resolve_threshold(&snapshot, 1, 100, 11), 8);
    }

    #[test]
    fn test_overrides_of_other_company_ignored() {
        let snapshot = InMemorySnapshot::new().with_threshold(ProductThreshold {
            company_id: 2,
            product_id: 100,
            warehouse_id: None,
            threshold: 50,
        });
        assert_eq!(resolve_threshold(&snapshot, 1, 100, 10), 0);
    }

    #[test]
    fn test_explicit_zero_override_still_wins() {
        let snapshot = InMemorySnapshot::new()
            .with_product_type(7, 20)
            .with_product_type_link(100, 7)
            .with_threshold(override_row(Some(10), 0));
        assert_eq!(
            resolve_threshold_with_source(&snapshot, 1, 100, 10),
            (0, ThresholdSource::WarehouseOverride)
        );
    }

    #[test]
    fn test_negative_value_clamped() {
        let snapshot = InMemorySnapshot::new().with_threshold(override_row(None, -4));
        assert_eq!(resolve_threshold(&snapshot, 1, 100, 10), 0);
    }
}
