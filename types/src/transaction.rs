//! Bridge transaction records as reported by the transaction feed.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::{TimestampMs, TypesError};

/// Lifecycle status of a bridge transaction.
///
/// `Pending`/`Confirmed` move to `Redeemed` upstream; the engine only
/// observes the transition across separate reconciliation runs.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionStatus {
    Pending,
    Confirmed,
    Redeemed,
}

impl TransactionStatus {
    /// Whether the transaction may still redeem later.
    pub fn is_in_flight(&self) -> bool {
        matches!(self, Self::Pending | Self::Confirmed)
    }
}

impl FromStr for TransactionStatus {
    type Err = TypesError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "pending" => Ok(Self::Pending),
            "confirmed" => Ok(Self::Confirmed),
            "redeemed" => Ok(Self::Redeemed),
            other => Err(TypesError::UnknownStatus(other.to_string())),
        }
    }
}

impl fmt::Display for TransactionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Pending => "pending",
            Self::Confirmed => "confirmed",
            Self::Redeemed => "redeemed",
        };
        f.write_str(s)
    }
}

/// Transfer categories the feed can be filtered by.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransferKind {
    Nft,
    Token,
}

impl TransferKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Nft => "nft",
            Self::Token => "token",
        }
    }
}

/// One bridge transaction, immutable from the engine's point of view.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionRecord {
    /// Unique per wallet and feed.
    pub id: String,
    pub status: TransactionStatus,
    /// Wormhole chain id of the destination.
    pub destination_chain_id: u16,
    pub created_at: TimestampMs,
    /// Signed approval bytes, present only once redeemed.
    pub approval_bytes: Option<Vec<u8>>,
    /// Approval hash as reported by the feed, present only once redeemed.
    pub approval_hash: Option<String>,
}

impl TransactionRecord {
    /// Redeemed with both approval fields present.
    pub fn redeemed_approval(&self) -> Option<&[u8]> {
        match (self.status, &self.approval_bytes, &self.approval_hash) {
            (TransactionStatus::Redeemed, Some(bytes), Some(_)) => Some(bytes.as_slice()),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(status: TransactionStatus) -> TransactionRecord {
        TransactionRecord {
            id: "0xabc".into(),
            status,
            destination_chain_id: 2,
            created_at: TimestampMs::new(1),
            approval_bytes: Some(vec![1, 2, 3]),
            approval_hash: Some("0x01".into()),
        }
    }

    #[test]
    fn status_parses_case_insensitively() {
        assert_eq!("REDEEMED".parse::<TransactionStatus>().unwrap(), TransactionStatus::Redeemed);
        assert_eq!(" pending ".parse::<TransactionStatus>().unwrap(), TransactionStatus::Pending);
        assert!("failed".parse::<TransactionStatus>().is_err());
    }

    #[test]
    fn in_flight_covers_pending_and_confirmed() {
        assert!(TransactionStatus::Pending.is_in_flight());
        assert!(TransactionStatus::Confirmed.is_in_flight());
        assert!(!TransactionStatus::Redeemed.is_in_flight());
    }

    #[test]
    fn redeemed_approval_requires_both_fields() {
        assert!(record(TransactionStatus::Redeemed).redeemed_approval().is_some());
        assert!(record(TransactionStatus::Confirmed).redeemed_approval().is_none());

        let mut missing_hash = record(TransactionStatus::Redeemed);
        missing_hash.approval_hash = None;
        assert!(missing_hash.redeemed_approval().is_none());

        let mut missing_bytes = record(TransactionStatus::Redeemed);
        missing_bytes.approval_bytes = None;
        assert!(missing_bytes.redeemed_approval().is_none());
    }
}
