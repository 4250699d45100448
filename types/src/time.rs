//! Millisecond timestamps.
//!
//! Every time value the engine compares (window bounds, feed creation times,
//! approval timestamps, the opened cursor) is Unix epoch milliseconds.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::{SystemTime, UNIX_EPOCH};

/// A Unix timestamp in milliseconds since epoch (UTC).
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TimestampMs(u64);

impl TimestampMs {
    pub const EPOCH: Self = Self(0);

    pub const fn new(millis: u64) -> Self {
        Self(millis)
    }

    /// Build a timestamp from whole seconds.
    pub const fn from_secs(secs: u64) -> Self {
        Self(secs.saturating_mul(1000))
    }

    /// Get the current system time.
    ///
    /// A clock set before the epoch reads as [`TimestampMs::EPOCH`].
    pub fn now() -> Self {
        let millis = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_millis() as u64)
            .unwrap_or(0);
        Self(millis)
    }

    pub const fn as_millis(&self) -> u64 {
        self.0
    }

    pub const fn saturating_add(self, millis: u64) -> Self {
        Self(self.0.saturating_add(millis))
    }
}

impl fmt::Display for TimestampMs {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}ms", self.0)
    }
}

impl From<u64> for TimestampMs {
    fn from(millis: u64) -> Self {
        Self(millis)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_secs_scales_to_millis() {
        assert_eq!(TimestampMs::from_secs(1_700_000_000).as_millis(), 1_700_000_000_000);
    }

    #[test]
    fn saturating_add_does_not_wrap() {
        let t = TimestampMs::new(u64::MAX - 1);
        assert_eq!(t.saturating_add(10).as_millis(), u64::MAX);
    }
}
