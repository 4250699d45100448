//! Minted token identifier.

use serde::{Deserialize, Serialize};
use std::fmt;

/// The token id a wallet currently holds from the mint contract.
///
/// Zero is the contract's sentinel for "nothing minted yet".
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TokenId(u128);

impl TokenId {
    pub const NONE: Self = Self(0);

    pub const fn new(id: u128) -> Self {
        Self(id)
    }

    pub const fn value(&self) -> u128 {
        self.0
    }

    /// Whether the wallet has not minted yet.
    pub const fn is_none(&self) -> bool {
        self.0 == 0
    }
}

impl fmt::Display for TokenId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}
