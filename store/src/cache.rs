//! Fail-soft access to wallet records.
//!
//! Storage errors are logged and swallowed: a lost record only costs a
//! re-scan of the feed, because eligibility is always recomputed from it.

use std::collections::BTreeSet;

use tracing::{debug, warn};

use envelope_types::{TimestampMs, WalletAddress};

use crate::{WalletReconciliationState, WalletStateStore};

/// Merging, never-failing operations over a [`WalletStateStore`].
pub struct WalletStateCache<S> {
    store: S,
}

impl<S: WalletStateStore> WalletStateCache<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Load a wallet's record. Read failures read as absent.
    pub fn get(&self, wallet: &WalletAddress) -> Option<WalletReconciliationState> {
        match self.store.load(wallet) {
            Ok(state) => state,
            Err(e) => {
                warn!(%wallet, error = %e, "wallet state read failed, treating as absent");
                None
            }
        }
    }

    /// Record the approval the wallet last acted on and when.
    ///
    /// Leaves the winning hash and skip list untouched.
    pub fn upsert_last_checked(&self, wallet: &WalletAddress, approval_hash: &str, opened_at: TimestampMs) {
        self.modify(wallet, "upsert_last_checked", |state| {
            state.last_checked_approval_hash = Some(approval_hash.to_string());
            state.last_opened_at = Some(opened_at);
            true
        });
    }

    /// Record the externally chosen winning approval. Touches nothing else.
    pub fn upsert_winning(&self, wallet: &WalletAddress, approval_hash: &str) {
        self.modify(wallet, "upsert_winning", |state| {
            state.winning_approval_hash = Some(approval_hash.to_string());
            true
        });
    }

    /// Replace the skip list wholesale.
    pub fn upsert_skipped(&self, wallet: &WalletAddress, ids: BTreeSet<String>) {
        self.modify(wallet, "upsert_skipped", |state| {
            state.skipped_transaction_ids = ids;
            true
        });
    }

    /// Add ids to the freshly loaded skip list, writing only if it grew.
    ///
    /// Ids already stored are kept even when the caller never saw them.
    pub fn add_skipped<'a, I>(&self, wallet: &WalletAddress, ids: I)
    where
        I: IntoIterator<Item = &'a str>,
    {
        self.modify(wallet, "add_skipped", |state| {
            let before = state.skipped_transaction_ids.len();
            state
                .skipped_transaction_ids
                .extend(ids.into_iter().map(str::to_string));
            state.skipped_transaction_ids.len() > before
        });
    }

    /// Remove ids from the skip list, writing only if it actually shrank.
    pub fn remove_skipped<'a, I>(&self, wallet: &WalletAddress, ids: I)
    where
        I: IntoIterator<Item = &'a str>,
    {
        self.modify(wallet, "remove_skipped", |state| {
            let before = state.skipped_transaction_ids.len();
            for id in ids {
                state.skipped_transaction_ids.remove(id);
            }
            state.skipped_transaction_ids.len() < before
        });
    }

    /// Read-modify-write of the whole record. `apply` returns whether a
    /// write is needed.
    ///
    /// A failed read aborts the write so a transient error never replaces a
    /// stored record with a blank one.
    fn modify<F>(&self, wallet: &WalletAddress, op: &'static str, apply: F)
    where
        F: FnOnce(&mut WalletReconciliationState) -> bool,
    {
        let mut state = match self.store.load(wallet) {
            Ok(existing) => existing.unwrap_or_default(),
            Err(e) => {
                warn!(%wallet, op, error = %e, "wallet state read failed, dropping write");
                return;
            }
        };
        if !apply(&mut state) {
            debug!(%wallet, op, "wallet state unchanged, skipping write");
            return;
        }
        if let Err(e) = self.store.save(wallet, &state) {
            warn!(%wallet, op, error = %e, "wallet state write failed");
        }
    }
}
