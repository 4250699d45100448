//! Page-level relevance probe.
//!
//! [`classify`] is a cheap screen run on the edges of each fetched page. It is
//! not the per-transaction eligibility decision, which lives in the reconciler.

use envelope_approval::decode;
use envelope_types::{MintWindow, TransactionRecord, TransactionStatus};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Classification {
    Ineligible,
    /// In flight and created within the window plus grace.
    PendingRecheck,
    /// Redeemed with an approval inside the window.
    Candidate,
}

impl Classification {
    pub fn is_relevant(&self) -> bool {
        !matches!(self, Classification::Ineligible)
    }
}

/// Classify one record against the window.
///
/// Redeemed records whose approval cannot be decoded are ineligible.
pub fn classify(txn: &TransactionRecord, window: &MintWindow, grace_period_ms: u64) -> Classification {
    match txn.status {
        TransactionStatus::Redeemed => match txn.redeemed_approval().map(decode) {
            Some(Ok(approval)) if window.contains(approval.timestamp) => Classification::Candidate,
            _ => Classification::Ineligible,
        },
        TransactionStatus::Pending | TransactionStatus::Confirmed => {
            if window.contains_with_grace(txn.created_at, grace_period_ms) {
                Classification::PendingRecheck
            } else {
                Classification::Ineligible
            }
        }
    }
}

/// Whether the first or last record of a page is relevant.
pub fn page_edges_relevant(page: &[TransactionRecord], window: &MintWindow, grace_period_ms: u64) -> bool {
    let edge = |txn: Option<&TransactionRecord>| {
        txn.map(|t| classify(t, window, grace_period_ms).is_relevant())
            .unwrap_or(false)
    };
    edge(page.first()) || edge(page.last())
}
