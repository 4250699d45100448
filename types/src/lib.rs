//! Fundamental types for envelope eligibility reconciliation.
//!
//! This crate defines the types shared across every other crate in the workspace:
//! wallet addresses, millisecond timestamps, approval hashes, token ids,
//! mint windows and the bridge transaction records reported by the feed.

pub mod address;
pub mod error;
pub mod hash;
pub mod time;
pub mod token;
pub mod transaction;
pub mod window;

pub use address::WalletAddress;
pub use error::TypesError;
pub use hash::ApprovalHash;
pub use time::TimestampMs;
pub use token::TokenId;
pub use transaction::{TransactionRecord, TransactionStatus, TransferKind};
pub use window::{MintWindow, GRACE_PERIOD_MS};
