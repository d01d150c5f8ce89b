//! Common types used across the platform

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

/// Default sales lookback when a caller does not specify one
pub const DEFAULT_LOOKBACK_DAYS: u32 = 30;

/// Trailing time window `[start, end]`, both ends inclusive
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct LookbackWindow {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    pub days: u32,
}

impl LookbackWindow {
    /// Window of `days` whole days ending at `end`.
    ///
    /// A window reaching past the earliest representable instant starts there.
    pub fn ending_at(end: DateTime<Utc>, days: u32) -> Self {
        Self {
            start: end
                .checked_sub_signed(Duration::days(i64::from(days)))
                .unwrap_or(DateTime::<Utc>::MIN_UTC),
            end,
            days,
        }
    }

    pub fn contains(&self, at: DateTime<Utc>) -> bool {
        at >= self.start && at <= self.end
    }
}
