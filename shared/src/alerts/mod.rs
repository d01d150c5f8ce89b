//! Low-stock alert engine
//!
//! Pure computations over a [`SnapshotSource`]: threshold resolution, sales
//! velocity, supplier selection, and the report that combines them.

mod engine;
mod snapshot;
mod supplier;
mod threshold;
mod velocity;

pub use engine::{
    evaluate_inclusion, generate_alerts, round_days, AlertRequest, AlertRequestError, Inclusion,
};
pub use snapshot::{InMemorySnapshot, SnapshotSource};
pub use supplier::{best_offer, select_supplier, SupplierSummary};
pub use threshold::{resolve_threshold, resolve_threshold_with_source, ThresholdSource};
pub use velocity::{compute_ads, compute_ads_in_window, SaleStatuses, SalesVelocity};
