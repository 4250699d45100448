//! Approval content hash.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::TypesError;

/// A 32-byte approval content hash.
///
/// Rendered as lowercase `0x`-prefixed hex. Parsing is case-insensitive and
/// accepts input with or without the `0x` prefix, so hashes recorded by other
/// tools compare equal to freshly decoded ones.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ApprovalHash([u8; 32]);

impl ApprovalHash {
    pub const ZERO: Self = Self([0u8; 32]);

    pub fn new(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    /// Whether `other` (a stored hex string) names this hash.
    ///
    /// Strings that do not parse never match.
    pub fn matches(&self, other: &str) -> bool {
        other.parse::<ApprovalHash>().map(|h| h == *self).unwrap_or(false)
    }
}

impl FromStr for ApprovalHash {
    type Err = TypesError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let digits = trimmed
            .strip_prefix("0x")
            .or_else(|| trimmed.strip_prefix("0X"))
            .unwrap_or(trimmed);
        let bytes = hex::decode(digits).map_err(|e| TypesError::InvalidHash(e.to_string()))?;
        let arr: [u8; 32] = bytes
            .try_into()
            .map_err(|v: Vec<u8>| TypesError::InvalidHash(format!("expected 32 bytes, got {}", v.len())))?;
        Ok(Self(arr))
    }
}

impl TryFrom<String> for ApprovalHash {
    type Error = TypesError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<ApprovalHash> for String {
    fn from(hash: ApprovalHash) -> Self {
        hash.to_string()
    }
}

impl fmt::Debug for ApprovalHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ApprovalHash({})", hex::encode(&self.0[..4]))
    }
}

impl fmt::Display for ApprovalHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{}", hex::encode(self.0))
    }
}
