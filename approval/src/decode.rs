//! Signed approval (VAA) parsing.
//!
//! Layout, all integers big-endian:
//!
//! ```text
//! header: version u8 | guardian_set_index u32 | signature_count u8 | signatures (66 bytes each)
//! body:   timestamp u32 | nonce u32 | emitter_chain u16 | emitter_address [u8; 32]
//!         | sequence u64 | consistency_level u8 | payload ..
//! ```
//!
//! The content hash is `keccak256(body)`.

use envelope_types::{ApprovalHash, TimestampMs};

use crate::hash::keccak256;
use crate::ApprovalError;

/// The only approval format version understood.
pub const SUPPORTED_VERSION: u8 = 1;

/// Guardian index (1 byte) followed by a 65-byte recoverable signature.
pub const SIGNATURE_LEN: usize = 66;

/// Fixed-size prefix of the body before the payload.
const BODY_FIXED_LEN: usize = 4 + 4 + 2 + 32 + 8 + 1;

/// The parts of an approval eligibility cares about.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DecodedApproval {
    /// Embedded timestamp, whole seconds scaled to milliseconds.
    pub timestamp: TimestampMs,
    pub hash: ApprovalHash,
    pub guardian_set_index: u32,
    pub emitter_chain: u16,
    pub sequence: u64,
}

struct Reader<'a> {
    bytes: &'a [u8],
    offset: usize,
}

impl<'a> Reader<'a> {
    fn new(bytes: &'a [u8]) -> Self {
        Self { bytes, offset: 0 }
    }

    fn take(&mut self, n: usize) -> Result<&'a [u8], ApprovalError> {
        let end = self
            .offset
            .checked_add(n)
            .filter(|end| *end <= self.bytes.len())
            .ok_or(ApprovalError::Truncated {
                offset: self.offset,
                needed: n,
                available: self.bytes.len().saturating_sub(self.offset),
            })?;
        let slice = &self.bytes[self.offset..end];
        self.offset = end;
        Ok(slice)
    }

    fn u8(&mut self) -> Result<u8, ApprovalError> {
        Ok(self.take(1)?[0])
    }

    fn u16(&mut self) -> Result<u16, ApprovalError> {
        let b = self.take(2)?;
        Ok(u16::from_be_bytes([b[0], b[1]]))
    }

    fn u32(&mut self) -> Result<u32, ApprovalError> {
        let b = self.take(4)?;
        Ok(u32::from_be_bytes([b[0], b[1], b[2], b[3]]))
    }

    fn u64(&mut self) -> Result<u64, ApprovalError> {
        let b = self.take(8)?;
        let mut arr = [0u8; 8];
        arr.copy_from_slice(b);
        Ok(u64::from_be_bytes(arr))
    }

    fn rest(&self) -> &'a [u8] {
        &self.bytes[self.offset..]
    }
}

/// Decode signed approval bytes into their timestamp and content hash.
///
/// Pure: the same bytes always yield the same [`DecodedApproval`].
pub fn decode(approval_bytes: &[u8]) -> Result<DecodedApproval, ApprovalError> {
    let mut reader = Reader::new(approval_bytes);

    let version = reader.u8()?;
    if version != SUPPORTED_VERSION {
        return Err(ApprovalError::UnsupportedVersion(version));
    }
    let guardian_set_index = reader.u32()?;
    let signature_count = reader.u8()? as usize;
    reader.take(signature_count * SIGNATURE_LEN)?;

    let body = reader.rest();
    if body.len() < BODY_FIXED_LEN {
        return Err(ApprovalError::Truncated {
            offset: reader.offset,
            needed: BODY_FIXED_LEN,
            available: body.len(),
        });
    }

    let mut body_reader = Reader::new(body);
    let timestamp_secs = body_reader.u32()?;
    let _nonce = body_reader.u32()?;
    let emitter_chain = body_reader.u16()?;
    let _emitter_address = body_reader.take(32)?;
    let sequence = body_reader.u64()?;

    Ok(DecodedApproval {
        timestamp: TimestampMs::from_secs(u64::from(timestamp_secs)),
        hash: ApprovalHash::new(keccak256(body)),
        guardian_set_index,
        emitter_chain,
        sequence,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn body(timestamp: u32, sequence: u64, payload: &[u8]) -> Vec<u8> {
        let mut b = Vec::new();
        b.extend_from_slice(&timestamp.to_be_bytes());
        b.extend_from_slice(&7u32.to_be_bytes());
        b.extend_from_slice(&2u16.to_be_bytes());
        b.extend_from_slice(&[0x11; 32]);
        b.extend_from_slice(&sequence.to_be_bytes());
        b.push(15);
        b.extend_from_slice(payload);
        b
    }

    fn approval(signatures: u8, body: &[u8]) -> Vec<u8> {
        let mut v = vec![SUPPORTED_VERSION];
        v.extend_from_slice(&3u32.to_be_bytes());
        v.push(signatures);
        for i in 0..signatures {
            let mut sig = [0u8; SIGNATURE_LEN];
            sig[0] = i;
            v.extend_from_slice(&sig);
        }
        v.extend_from_slice(body);
        v
    }

    #[test]
    fn decodes_timestamp_and_hash() {
        let b = body(1_700_000_000, 42, b"payload");
        let decoded = decode(&approval(2, &b)).unwrap();
        assert_eq!(decoded.timestamp.as_millis(), 1_700_000_000_000);
        assert_eq!(decoded.hash, ApprovalHash::new(keccak256(&b)));
        assert_eq!(decoded.guardian_set_index, 3);
        assert_eq!(decoded.emitter_chain, 2);
        assert_eq!(decoded.sequence, 42);
    }

    #[test]
    fn hash_ignores_signatures() {
        let b = body(10, 1, b"x");
        let one = decode(&approval(1, &b)).unwrap();
        let three = decode(&approval(3, &b)).unwrap();
        assert_eq!(one.hash, three.hash);
    }

    #[test]
    fn payload_changes_hash() {
        let a = decode(&approval(0, &body(10, 1, b"a"))).unwrap();
        let b = decode(&approval(0, &body(10, 1, b"b"))).unwrap();
        assert_ne!(a.hash, b.hash);
        assert_eq!(a.timestamp, b.timestamp);
    }

    #[test]
    fn empty_bytes_are_truncated() {
        assert!(matches!(decode(&[]), Err(ApprovalError::Truncated { .. })));
    }

    #[test]
    fn wrong_version_is_rejected() {
        let mut bytes = approval(0, &body(10, 1, b""));
        bytes[0] = 2;
        assert_eq!(decode(&bytes), Err(ApprovalError::UnsupportedVersion(2)));
    }

    #[test]
    fn missing_signatures_are_truncated() {
        let mut bytes = approval(0, &body(10, 1, b""));
        bytes[5] = 4;
        assert!(matches!(decode(&bytes), Err(ApprovalError::Truncated { .. })));
    }

    #[test]
    fn short_body_is_truncated() {
        let b = body(10, 1, b"");
        let bytes = approval(1, &b[..BODY_FIXED_LEN - 1]);
        assert!(matches!(decode(&bytes), Err(ApprovalError::Truncated { .. })));
    }
}
