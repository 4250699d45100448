//! Mint window bounds.

use serde::{Deserialize, Serialize};

use crate::{TimestampMs, TypesError};

/// Extra time granted to still-pending transactions to absorb feed indexing
/// lag: 14 days.
pub const GRACE_PERIOD_MS: u64 = 14 * 24 * 60 * 60 * 1000;

/// The `[start, end)` interval during which opening an envelope is possible.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MintWindow {
    pub start: TimestampMs,
    pub end: TimestampMs,
}

impl MintWindow {
    /// Build a window, rejecting `start > end`.
    pub fn new(start: TimestampMs, end: TimestampMs) -> Result<Self, TypesError> {
        if start > end {
            return Err(TypesError::InvertedWindow {
                start_ms: start.as_millis(),
                end_ms: end.as_millis(),
            });
        }
        Ok(Self { start, end })
    }

    /// Half-open membership: `start <= t < end`.
    pub fn contains(&self, t: TimestampMs) -> bool {
        self.start <= t && t < self.end
    }

    /// Membership in `[start, end + grace)`.
    pub fn contains_with_grace(&self, t: TimestampMs, grace_ms: u64) -> bool {
        self.start <= t && t < self.end.saturating_add(grace_ms)
    }

    pub fn is_before_start(&self, t: TimestampMs) -> bool {
        t < self.start
    }
}
