//! Builders for signed approvals and feed records.

use envelope_approval::{decode, SIGNATURE_LEN, SUPPORTED_VERSION};
use envelope_types::{ApprovalHash, TimestampMs, TransactionRecord, TransactionStatus};

/// Builds approval bytes in the signed approval layout.
///
/// Signatures are zero-filled; nothing verifies them.
#[derive(Clone, Debug)]
pub struct ApprovalBuilder {
    pub timestamp_secs: u32,
    pub nonce: u32,
    pub emitter_chain: u16,
    pub sequence: u64,
    pub signatures: u8,
    pub payload: Vec<u8>,
}

impl ApprovalBuilder {
    pub fn at_secs(timestamp_secs: u32) -> Self {
        Self {
            timestamp_secs,
            nonce: 0,
            emitter_chain: 2,
            sequence: 0,
            signatures: 1,
            payload: Vec::new(),
        }
    }

    /// Timestamp given in milliseconds, truncated to whole seconds.
    pub fn at_millis(millis: u64) -> Self {
        Self::at_secs((millis / 1000) as u32)
    }

    /// Vary the body (and so the hash) without changing the timestamp.
    pub fn sequence(mut self, sequence: u64) -> Self {
        self.sequence = sequence;
        self
    }

    pub fn build(&self) -> Vec<u8> {
        let mut v = vec![SUPPORTED_VERSION];
        v.extend_from_slice(&0u32.to_be_bytes());
        v.push(self.signatures);
        v.extend(std::iter::repeat(0u8).take(self.signatures as usize * SIGNATURE_LEN));
        v.extend_from_slice(&self.timestamp_secs.to_be_bytes());
        v.extend_from_slice(&self.nonce.to_be_bytes());
        v.extend_from_slice(&self.emitter_chain.to_be_bytes());
        v.extend_from_slice(&[0u8; 32]);
        v.extend_from_slice(&self.sequence.to_be_bytes());
        v.push(1);
        v.extend_from_slice(&self.payload);
        v
    }

    /// The content hash the decoder will report for [`Self::build`].
    pub fn hash(&self) -> ApprovalHash {
        match decode(&self.build()) {
            Ok(decoded) => decoded.hash,
            Err(e) => panic!("builder produced undecodable approval: {e}"),
        }
    }
}

/// A redeemed record carrying `approval`.
pub fn redeemed_record(
    id: &str,
    destination_chain_id: u16,
    created_at: TimestampMs,
    approval: &ApprovalBuilder,
) -> TransactionRecord {
    TransactionRecord {
        id: id.to_string(),
        status: TransactionStatus::Redeemed,
        destination_chain_id,
        created_at,
        approval_bytes: Some(approval.build()),
        approval_hash: Some(approval.hash().to_string()),
    }
}

/// A pending record without approval data.
pub fn pending_record(id: &str, destination_chain_id: u16, created_at: TimestampMs) -> TransactionRecord {
    TransactionRecord {
        id: id.to_string(),
        status: TransactionStatus::Pending,
        destination_chain_id,
        created_at,
        approval_bytes: None,
        approval_hash: None,
    }
}
