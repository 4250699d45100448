//! Nullable infrastructure for deterministic testing.
//!
//! All external dependencies of the reconciler (transaction feed, wallet
//! state storage) are abstracted behind traits. This crate provides
//! test-friendly implementations that:
//! - Return scripted, deterministic values
//! - Can be controlled programmatically (failures, stalls)
//! - Never touch the filesystem or network
//!
//! Usage: swap real implementations for nullables in tests.

pub mod approval;
pub mod feed;
pub mod store;

pub use approval::{pending_record, redeemed_record, ApprovalBuilder};
pub use feed::NullTransactionFeed;
pub use store::NullWalletStore;
