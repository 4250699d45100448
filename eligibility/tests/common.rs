//! Shared fixtures for reconciler tests.

#![allow(dead_code)]

use std::sync::Arc;

use envelope_eligibility::{Reconciler, ReconcilerConfig};
use envelope_nullables::{pending_record, redeemed_record, ApprovalBuilder, NullTransactionFeed, NullWalletStore};
use envelope_types::{MintWindow, TimestampMs, TransactionRecord, WalletAddress};

pub const CHAIN: u16 = 2;
pub const OTHER_CHAIN: u16 = 4;
pub const SEC: u64 = 1000;
pub const DAY: u64 = 24 * 60 * 60 * SEC;
pub const START: u64 = 1_000_000 * SEC;
pub const END: u64 = START + 10 * DAY;
pub const WALLET: &str = "0xWaLLeT00000000000000000000000000000001";

pub type TestReconciler = Reconciler<NullTransactionFeed, Arc<NullWalletStore>>;

pub fn window() -> MintWindow {
    MintWindow::new(TimestampMs::new(START), TimestampMs::new(END)).unwrap()
}

pub fn wallet() -> WalletAddress {
    WalletAddress::parse(WALLET).unwrap()
}

fn sequence_of(id: &str) -> u64 {
    id.bytes().fold(0u64, |acc, b| acc.wrapping_mul(31).wrapping_add(u64::from(b)))
}

pub fn approval(id: &str, millis: u64) -> ApprovalBuilder {
    ApprovalBuilder::at_millis(millis).sequence(sequence_of(id))
}

/// Redeemed on the target chain, approval timestamp `millis`.
pub fn redeemed(id: &str, millis: u64) -> TransactionRecord {
    redeemed_record(id, CHAIN, TimestampMs::new(millis), &approval(id, millis))
}

pub fn redeemed_on(id: &str, chain: u16, millis: u64) -> TransactionRecord {
    redeemed_record(id, chain, TimestampMs::new(millis), &approval(id, millis))
}

pub fn pending(id: &str, created_millis: u64) -> TransactionRecord {
    pending_record(id, CHAIN, TimestampMs::new(created_millis))
}

pub fn reconciler(pages: Vec<Vec<TransactionRecord>>) -> (TestReconciler, Arc<NullWalletStore>) {
    reconciler_with(pages, ReconcilerConfig::new(CHAIN))
}

pub fn reconciler_with(
    pages: Vec<Vec<TransactionRecord>>,
    config: ReconcilerConfig,
) -> (TestReconciler, Arc<NullWalletStore>) {
    let store = Arc::new(NullWalletStore::new());
    let reconciler = Reconciler::new(NullTransactionFeed::with_pages(pages), Arc::clone(&store), config);
    (reconciler, store)
}
