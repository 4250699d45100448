//! Per-wallet reconciliation record and the storage trait.

use std::collections::BTreeSet;
use std::sync::Arc;

use envelope_types::{TimestampMs, WalletAddress};

use crate::StoreError;

/// Everything remembered about one wallet between reconciliation runs.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct WalletReconciliationState {
    /// Last approval the wallet acted on.
    pub last_checked_approval_hash: Option<String>,
    /// Set externally once a winner is chosen. Reconciliation only reads it.
    pub winning_approval_hash: Option<String>,
    /// Cursor of the last opened envelope. Absent means "window start".
    pub last_opened_at: Option<TimestampMs>,
    /// In-flight transactions to re-check on a later run.
    pub skipped_transaction_ids: BTreeSet<String>,
}

impl WalletReconciliationState {
    /// The opened cursor, defaulting to `window_start` when never set.
    pub fn last_opened_or(&self, window_start: TimestampMs) -> TimestampMs {
        self.last_opened_at.unwrap_or(window_start)
    }

    pub fn is_skipped(&self, txn_id: &str) -> bool {
        self.skipped_transaction_ids.contains(txn_id)
    }
}

/// Raw, fallible storage of wallet records keyed by normalised address.
///
/// Implementations do no merging: `save` replaces the whole record.
pub trait WalletStateStore: Send + Sync {
    fn load(&self, wallet: &WalletAddress) -> Result<Option<WalletReconciliationState>, StoreError>;

    fn save(&self, wallet: &WalletAddress, state: &WalletReconciliationState) -> Result<(), StoreError>;
}

impl<T: WalletStateStore + ?Sized> WalletStateStore for Arc<T> {
    fn load(&self, wallet: &WalletAddress) -> Result<Option<WalletReconciliationState>, StoreError> {
        (**self).load(wallet)
    }

    fn save(&self, wallet: &WalletAddress, state: &WalletReconciliationState) -> Result<(), StoreError> {
        (**self).save(wallet, state)
    }
}
