use thiserror::Error;

/// Reasons approval bytes cannot be decoded.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ApprovalError {
    #[error("approval truncated: need {needed} bytes at offset {offset}, have {available}")]
    Truncated {
        offset: usize,
        needed: usize,
        available: usize,
    },

    #[error("unsupported approval version {0}")]
    UnsupportedVersion(u8),
}
