//! Errors raised while constructing fundamental types.

use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum TypesError {
    #[error("wallet address is empty")]
    EmptyAddress,

    #[error("invalid approval hash: {0}")]
    InvalidHash(String),

    #[error("unknown transaction status: {0}")]
    UnknownStatus(String),

    #[error("mint window starts after it ends: start {start_ms} > end {end_ms}")]
    InvertedWindow { start_ms: u64, end_ms: u64 },
}
