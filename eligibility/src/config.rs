//! Reconciler parameters.
//!
//! Everything the engine compares against is passed in explicitly, so any
//! window and destination chain can be exercised in tests.

use serde::{Deserialize, Serialize};

use envelope_feed::source::DEFAULT_PAGE_SIZE;
use envelope_types::GRACE_PERIOD_MS;

/// How a fetched page is screened before per-item work.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PageProbe {
    /// Only process a page whose first or last record is relevant.
    ///
    /// Can miss a page whose interior alone is relevant.
    #[default]
    Edges,
    /// Process every record of every page.
    Exhaustive,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReconcilerConfig {
    /// Destination chain a transaction must target to count.
    pub target_chain_id: u16,

    /// Records requested per feed page.
    #[serde(default = "default_page_size")]
    pub page_size: u32,

    /// Extra time after the window end during which in-flight transactions
    /// still count as relevant.
    #[serde(default = "default_grace_period_ms")]
    pub grace_period_ms: u64,

    #[serde(default)]
    pub page_probe: PageProbe,
}

fn default_page_size() -> u32 {
    DEFAULT_PAGE_SIZE
}

fn default_grace_period_ms() -> u64 {
    GRACE_PERIOD_MS
}

impl ReconcilerConfig {
    /// Defaults for everything except the destination chain.
    pub fn new(target_chain_id: u16) -> Self {
        Self {
            target_chain_id,
            page_size: default_page_size(),
            grace_period_ms: default_grace_period_ms(),
            page_probe: PageProbe::default(),
        }
    }

    pub fn with_page_probe(mut self, probe: PageProbe) -> Self {
        self.page_probe = probe;
        self
    }

    pub fn with_page_size(mut self, page_size: u32) -> Self {
        self.page_size = page_size;
        self.validated()
    }

    /// Clamp values the feed cannot serve. A zero page size becomes one.
    pub fn validated(mut self) -> Self {
        self.page_size = self.page_size.max(1);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_uses_defaults() {
        let config = ReconcilerConfig::new(2);
        assert_eq!(config.page_size, DEFAULT_PAGE_SIZE);
        assert_eq!(config.grace_period_ms, GRACE_PERIOD_MS);
        assert_eq!(config.page_probe, PageProbe::Edges);
    }

    #[test]
    fn page_size_is_at_least_one() {
        assert_eq!(ReconcilerConfig::new(2).with_page_size(0).page_size, 1);
    }

    #[test]
    fn literal_and_deserialized_zero_page_size_validate_to_one() {
        let literal = ReconcilerConfig {
            page_size: 0,
            ..ReconcilerConfig::new(2)
        };
        assert_eq!(literal.validated().page_size, 1);

        let parsed: ReconcilerConfig =
            serde_json::from_str(r#"{"target_chain_id": 2, "page_size": 0}"#).unwrap();
        assert_eq!(parsed.validated().page_size, 1);
    }
}
