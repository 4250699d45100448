//! Approval decoder.
//!
//! An approval is a guardian-signed cross-chain message (VAA). Eligibility only
//! needs two things from it: the embedded timestamp and a stable content hash.
//! Decoding is pure and performs no signature verification.

pub mod decode;
pub mod error;
pub mod hash;

pub use decode::{decode, DecodedApproval, SIGNATURE_LEN, SUPPORTED_VERSION};
pub use error::ApprovalError;
pub use hash::keccak256;
