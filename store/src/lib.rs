//! Wallet reconciliation state storage.
//!
//! Every storage backend (LMDB, in-memory for testing) implements
//! [`WalletStateStore`]. The reconciler only talks to the fail-soft
//! [`WalletStateCache`] wrapped around it, so a broken backend degrades to
//! re-scanning instead of blocking eligibility.

pub mod cache;
pub mod error;
pub mod layout;
pub mod state;

pub use cache::WalletStateCache;
pub use error::StoreError;
pub use layout::PersistedWalletState;
pub use state::{WalletReconciliationState, WalletStateStore};
