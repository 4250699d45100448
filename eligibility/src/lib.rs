//! Eligibility reconciliation engine.
//!
//! Given a mint window and a wallet, walks the wallet's bridge transactions
//! newest-first and decides which ones may open an envelope:
//!
//! - redeemed transactions whose approval falls inside the window and is newer
//!   than the last opened envelope (or was previously skipped while in flight);
//! - a previously chosen winning approval, re-surfaced if the wallet has not
//!   minted yet;
//! - in-flight transactions are remembered in the wallet's skip list so they
//!   are re-checked once they redeem.

pub mod classify;
pub mod config;
pub mod error;
pub mod reconciler;

pub use classify::{classify, Classification};
pub use config::{PageProbe, ReconcilerConfig};
pub use error::ReconcileError;
pub use reconciler::{EligibilityResult, EligibleTransaction, Reconciler};
