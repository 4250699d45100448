use thiserror::Error;

use envelope_eligibility::ReconcileError;
use envelope_store_lmdb::LmdbError;
use envelope_types::TypesError;
use envelope_utils::LoggingError;

use crate::ProviderError;

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error(transparent)]
    Reconcile(#[from] ReconcileError),

    /// The mint window could not be read. Never defaulted.
    #[error("mint window unavailable: {0}")]
    WindowUnavailable(#[from] ProviderError),

    #[error("invalid mint window: {0}")]
    InvalidWindow(#[from] TypesError),

    #[error("storage error: {0}")]
    Storage(#[from] LmdbError),

    #[error("logging error: {0}")]
    Logging(#[from] LoggingError),

    #[error("config error: {0}")]
    Config(String),
}
