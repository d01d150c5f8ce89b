//! Supplier selection for restocking

use std::cmp::Reverse;

use serde::{Deserialize, Serialize};

use super::snapshot::SnapshotSource;
use crate::models::{AlertSupplier, SupplierOffer};

/// The supplier chosen for a (company, product)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SupplierSummary {
    pub id: i64,
    pub name: String,
    pub lead_time_days: i32,
    pub preferred: bool,
}

impl From<&SupplierOffer> for SupplierSummary {
    fn from(offer: &SupplierOffer) -> Self {
        Self {
            id: offer.supplier_id,
            name: offer.supplier_name.clone(),
            lead_time_days: offer.lead_time_days,
            preferred: offer.preferred,
        }
    }
}

impl From<SupplierSummary> for AlertSupplier {
    fn from(summary: SupplierSummary) -> Self {
        Self {
            id: summary.id,
            name: summary.name,
            lead_time_days: summary.lead_time_days,
        }
    }
}

/// Pick the best offer: preferred first, then shortest lead time, then lowest supplier id
pub fn best_offer(offers: &[SupplierOffer]) -> Option<&SupplierOffer> {
    offers
        .iter()
        .min_by_key(|o| (Reverse(o.preferred), o.lead_time_days, o.supplier_id))
}

/// Supplier for (company, product); `None` means no supplier on file
pub fn select_supplier<S: SnapshotSource + ?Sized>(
    snapshot: &S,
    company_id: i64,
    product_id: i64,
) -> Option<SupplierSummary> {
    let offers = snapshot.product_suppliers(company_id, product_id);
    best_offer(&offers).map(SupplierSummary::from)
}
