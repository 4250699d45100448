//! On-disk layout of a wallet record.
//!
//! The field names and string-typed numbers match records written by earlier
//! clients: `{vaaHash, luckyVaaHash, lastOpened, skippedTxns[]}`. Loading is
//! lenient. A `lastOpened` that is not a decimal integer reads as absent.

use serde::{Deserialize, Serialize};

use envelope_types::TimestampMs;

use crate::{StoreError, WalletReconciliationState};

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersistedWalletState {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vaa_hash: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lucky_vaa_hash: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_opened: Option<String>,
    #[serde(default)]
    pub skipped_txns: Vec<String>,
}

impl PersistedWalletState {
    pub fn from_json(bytes: &[u8]) -> Result<Self, StoreError> {
        Ok(serde_json::from_slice(bytes)?)
    }

    pub fn to_json(&self) -> Result<Vec<u8>, StoreError> {
        Ok(serde_json::to_vec(self)?)
    }
}

impl From<PersistedWalletState> for WalletReconciliationState {
    fn from(p: PersistedWalletState) -> Self {
        let last_opened_at = p
            .last_opened
            .as_deref()
            .and_then(|s| s.trim().parse::<u64>().ok())
            .map(TimestampMs::new);
        Self {
            last_checked_approval_hash: p.vaa_hash.filter(|s| !s.is_empty()),
            winning_approval_hash: p.lucky_vaa_hash.filter(|s| !s.is_empty()),
            last_opened_at,
            skipped_transaction_ids: p.skipped_txns.into_iter().collect(),
        }
    }
}

impl From<&WalletReconciliationState> for PersistedWalletState {
    fn from(s: &WalletReconciliationState) -> Self {
        Self {
            vaa_hash: s.last_checked_approval_hash.clone(),
            lucky_vaa_hash: s.winning_approval_hash.clone(),
            last_opened: s.last_opened_at.map(|t| t.as_millis().to_string()),
            skipped_txns: s.skipped_transaction_ids.iter().cloned().collect(),
        }
    }
}
