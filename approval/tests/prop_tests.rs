use proptest::prelude::*;

use envelope_approval::{decode, SIGNATURE_LEN, SUPPORTED_VERSION};

fn encode(timestamp: u32, signatures: u8, sequence: u64, payload: &[u8]) -> Vec<u8> {
    let mut v = vec![SUPPORTED_VERSION];
    v.extend_from_slice(&0u32.to_be_bytes());
    v.push(signatures);
    v.extend(std::iter::repeat(0xEE).take(signatures as usize * SIGNATURE_LEN));
    v.extend_from_slice(&timestamp.to_be_bytes());
    v.extend_from_slice(&0u32.to_be_bytes());
    v.extend_from_slice(&1u16.to_be_bytes());
    v.extend_from_slice(&[0u8; 32]);
    v.extend_from_slice(&sequence.to_be_bytes());
    v.push(1);
    v.extend_from_slice(payload);
    v
}

proptest! {
    /// Decoding is deterministic and the timestamp is seconds * 1000.
    #[test]
    fn decode_is_pure(
        ts in any::<u32>(),
        sigs in 0u8..20,
        seq in any::<u64>(),
        payload in prop::collection::vec(any::<u8>(), 0..64),
    ) {
        let bytes = encode(ts, sigs, seq, &payload);
        let first = decode(&bytes).unwrap();
        let second = decode(&bytes).unwrap();
        prop_assert_eq!(&first, &second);
        prop_assert_eq!(first.timestamp.as_millis(), u64::from(ts) * 1000);
        prop_assert_eq!(first.sequence, seq);
    }

    /// Arbitrary bytes never panic the decoder.
    #[test]
    fn arbitrary_bytes_do_not_panic(bytes in prop::collection::vec(any::<u8>(), 0..512)) {
        let _ = decode(&bytes);
    }
}
