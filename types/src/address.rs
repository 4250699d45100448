//! Wallet address type, normalised to lowercase.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::TypesError;

/// A wallet address as used for feed queries and state keys.
///
/// Addresses are trimmed and lowercased on construction so that the same
/// wallet always maps to the same persisted record regardless of checksum
/// casing.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct WalletAddress(String);

impl WalletAddress {
    /// Parse and normalise a raw address string.
    ///
    /// Fails with [`TypesError::EmptyAddress`] when the input is blank.
    pub fn parse(raw: impl AsRef<str>) -> Result<Self, TypesError> {
        let trimmed = raw.as_ref().trim();
        if trimmed.is_empty() {
            return Err(TypesError::EmptyAddress);
        }
        Ok(Self(trimmed.to_ascii_lowercase()))
    }

    /// Return the normalised address string.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for WalletAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<String> for WalletAddress {
    type Error = TypesError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::parse(s)
    }
}

impl From<WalletAddress> for String {
    fn from(addr: WalletAddress) -> Self {
        addr.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_lowercases_and_trims() {
        let addr = WalletAddress::parse("  0xAbCdEF0123 ").unwrap();
        assert_eq!(addr.as_str(), "0xabcdef0123");
    }

    #[test]
    fn blank_address_is_rejected() {
        assert!(matches!(
            WalletAddress::parse("   "),
            Err(TypesError::EmptyAddress)
        ));
        assert!(WalletAddress::parse("").is_err());
    }

    #[test]
    fn checksum_variants_compare_equal() {
        let a = WalletAddress::parse("0xDEADbeef").unwrap();
        let b = WalletAddress::parse("0xdeadBEEF").unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn serde_rejects_blank() {
        let ok: WalletAddress = serde_json::from_str("\"0xAA\"").unwrap();
        assert_eq!(ok.as_str(), "0xaa");
        assert!(serde_json::from_str::<WalletAddress>("\"\"").is_err());
    }
}
