//! Keccak-256 hashing of approval bodies.

use sha3::{Digest, Keccak256};

/// Compute the Keccak-256 digest of arbitrary data.
pub fn keccak256(data: &[u8]) -> [u8; 32] {
    let mut hasher = Keccak256::new();
    hasher.update(data);
    let result = hasher.finalize();
    let mut output = [0u8; 32];
    output.copy_from_slice(&result);
    output
}
