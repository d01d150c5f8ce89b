//! Sales velocity (average daily sales) estimation

use std::collections::HashSet;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::snapshot::SnapshotSource;
use crate::types::LookbackWindow;

/// Order statuses that count as realized demand
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SaleStatuses(HashSet<String>);

impl SaleStatuses {
    pub const DEFAULT: [&'static str; 3] = ["placed", "shipped", "completed"];

    pub fn new<I, T>(statuses: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: AsRef<str>,
    {
        Self(
            statuses
                .into_iter()
                .map(|s| s.as_ref().trim().to_lowercase())
                .filter(|s| !s.is_empty())
                .collect(),
        )
    }

    /// Case-insensitive membership
    pub fn counts(&self, status: &str) -> bool {
        self.0.contains(&status.trim().to_lowercase())
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl Default for SaleStatuses {
    fn default() -> Self {
        Self::new(Self::DEFAULT)
    }
}

/// Units sold over a window, kept as an exact ratio
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SalesVelocity {
    pub units_sold: Decimal,
    pub window_days: u32,
}

impl SalesVelocity {
    pub fn zero(window_days: u32) -> Self {
        Self {
            units_sold: Decimal::ZERO,
            window_days,
        }
    }

    /// Average daily sales; always divided by the full window length
    pub fn per_day(&self) -> Decimal {
        if self.window_days == 0 {
            return Decimal::ZERO;
        }
        self.units_sold / Decimal::from(self.window_days)
    }

    pub fn is_positive(&self) -> bool {
        self.window_days > 0 && self.units_sold > Decimal::ZERO
    }

    /// `stock / ads`, evaluated as `stock * window_days / units_sold` so no
    /// rounded ADS enters the quotient. `None` when there is no demand.
    pub fn days_until_stockout(&self, stock: Decimal) -> Option<Decimal> {
        if !self.is_positive() {
            return None;
        }
        Some(stock * Decimal::from(self.window_days) / self.units_sold)
    }
}

/// Velocity for (product, warehouse) over an explicit window
pub fn compute_ads_in_window<S: SnapshotSource + ?Sized>(
    snapshot: &S,
    product_id: i64,
    warehouse_id: i64,
    window: &LookbackWindow,
    statuses: &SaleStatuses,
) -> SalesVelocity {
    let units_sold: Decimal = snapshot
        .sales_lines(product_id, warehouse_id)
        .iter()
        .filter(|line| statuses.counts(&line.order_status))
        .filter(|line| window.contains(line.ordered_at))
        .map(|line| line.qty)
        .sum();

    SalesVelocity {
        units_sold,
        window_days: window.days,
    }
}

/// Velocity for (product, warehouse) over the `lookback_days` ending at `as_of`
pub fn compute_ads<S: SnapshotSource + ?Sized>(
    snapshot: &S,
    product_id: i64,
    warehouse_id: i64,
    lookback_days: u32,
    as_of: DateTime<Utc>,
    statuses: &SaleStatuses,
) -> SalesVelocity {
    let window = LookbackWindow::ending_at(as_of, lookback_days);
    compute_ads_in_window(snapshot, product_id, warehouse_id, &window, statuses)
}
