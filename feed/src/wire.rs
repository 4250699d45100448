//! JSON shapes returned by the feed and their conversion to domain records.

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use serde::Deserialize;
use tracing::warn;

use envelope_types::{TimestampMs, TransactionRecord, TransactionStatus};

use crate::source::FeedPage;

#[derive(Debug, Deserialize)]
pub struct TransactionsResponse {
    pub results: TransactionsResults,
}

#[derive(Debug, Deserialize)]
pub struct TransactionsResults {
    /// Kept as raw JSON so one malformed entry cannot reject the page.
    #[serde(default)]
    pub transactions: Vec<serde_json::Value>,
    /// Total page count for the query.
    #[serde(default)]
    pub page: u32,
}

/// Millisecond values arrive either as JSON numbers or decimal strings.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum Millis {
    Number(u64),
    Text(String),
}

impl Millis {
    fn value(&self) -> Option<u64> {
        match self {
            Millis::Number(n) => Some(*n),
            Millis::Text(s) => s.trim().parse().ok(),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawTransaction {
    pub id: String,
    pub status: String,
    #[serde(default, alias = "toChain")]
    pub destination_chain_id: Option<u64>,
    #[serde(default)]
    pub created_at: Option<Millis>,
    /// Base64-encoded signed approval.
    #[serde(default, alias = "vaa", rename = "signedVAA")]
    pub signed_vaa: Option<String>,
    #[serde(default)]
    pub vaa_hash: Option<String>,
}

impl RawTransaction {
    /// Parse one entry of the `transactions` array.
    ///
    /// Entries that do not have the record shape at all are dropped.
    pub fn from_value(value: serde_json::Value) -> Option<Self> {
        match serde_json::from_value(value) {
            Ok(raw) => Some(raw),
            Err(e) => {
                warn!(error = %e, "dropping malformed feed record");
                None
            }
        }
    }

    /// Convert to a domain record.
    ///
    /// Records with an unknown status, an unreadable creation time or a
    /// missing or out-of-range destination chain are dropped. Approval bytes
    /// that are not valid base64 are dropped from the record, which leaves it
    /// ineligible without failing the page.
    pub fn into_record(self) -> Option<TransactionRecord> {
        let status = match self.status.parse::<TransactionStatus>() {
            Ok(status) => status,
            Err(e) => {
                warn!(id = %self.id, error = %e, "dropping feed record");
                return None;
            }
        };
        let Some(created_at) = self.created_at.as_ref().and_then(Millis::value) else {
            warn!(id = %self.id, "dropping feed record with unreadable createdAt");
            return None;
        };
        let Some(destination_chain_id) = self.destination_chain_id.and_then(|c| u16::try_from(c).ok()) else {
            warn!(id = %self.id, chain = ?self.destination_chain_id, "dropping feed record with invalid destination chain");
            return None;
        };
        let approval_bytes = self.signed_vaa.and_then(|encoded| match STANDARD.decode(encoded.trim()) {
            Ok(bytes) => Some(bytes),
            Err(e) => {
                warn!(id = %self.id, error = %e, "approval is not valid base64");
                None
            }
        });
        Some(TransactionRecord {
            id: self.id,
            status,
            destination_chain_id,
            created_at: TimestampMs::new(created_at),
            approval_bytes,
            approval_hash: self.vaa_hash.filter(|h| !h.is_empty()),
        })
    }
}

impl From<TransactionsResponse> for FeedPage {
    fn from(resp: TransactionsResponse) -> Self {
        FeedPage {
            transactions: resp
                .results
                .transactions
                .into_iter()
                .filter_map(RawTransaction::from_value)
                .filter_map(RawTransaction::into_record)
                .collect(),
            page_count: resp.results.page,
        }
    }
}
