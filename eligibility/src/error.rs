use thiserror::Error;

use envelope_feed::FeedError;

/// Reasons a reconciliation run produced no result.
///
/// Every error means "no eligible transactions"; partial progress is never
/// returned or persisted.
#[derive(Debug, Error)]
pub enum ReconcileError {
    #[error("no wallet address given")]
    MissingWallet,

    #[error("transaction feed unavailable: {0}")]
    FeedUnavailable(#[from] FeedError),

    #[error("reconciliation cancelled")]
    Cancelled,
}
