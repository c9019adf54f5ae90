//! Property and fuzz-style tests for robustness of the alarm blob codec.
//!
//! Runs on host (x86_64) only — proptest is not available for ESP32
//! targets.  On ESP32, these tests are compiled out.

#![cfg(not(target_os = "espidf"))]

use plantpump::alarm::store::{decode, encode};
use plantpump::alarm::AlarmRecord;
use proptest::prelude::*;

fn arb_record() -> impl Strategy<Value = AlarmRecord> {
    (
        0u8..=23u8,
        0u8..=59u8,
        proptest::string::string_regex("[ -~]{0,31}").unwrap(),
    )
        .prop_map(|(hour, minute, name)| AlarmRecord::new(hour, minute, &name))
}

proptest! {
    /// decode(encode(records)) == records for any valid alarm list.
    #[test]
    fn codec_round_trip(records in proptest::collection::vec(arb_record(), 0..=40)) {
        let decoded = decode(&encode(&records));
        prop_assert_eq!(decoded, records);
    }

    /// Any prefix of an encoded buffer decodes to a prefix of the
    /// original records — never garbage, never a panic.
    #[test]
    fn truncation_yields_record_prefix(
        records in proptest::collection::vec(arb_record(), 0..=20),
        cut_fraction in 0.0f64..=1.0f64,
    ) {
        let bytes = encode(&records);
        let cut = (bytes.len() as f64 * cut_fraction) as usize;
        let decoded = decode(&bytes[..cut.min(bytes.len())]);

        prop_assert!(decoded.len() <= records.len());
        prop_assert_eq!(&decoded[..], &records[..decoded.len()]);
    }

    /// Arbitrary byte soup must never panic the decoder, and every
    /// record it does produce must respect the name bound.
    #[test]
    fn arbitrary_bytes_decode_safely(
        bytes in proptest::collection::vec(0u8..=255u8, 0..=512),
    ) {
        let decoded = decode(&bytes);
        for record in &decoded {
            prop_assert!(record.name.len() <= 31);
            prop_assert!(!record.fired_today);
        }
    }

    /// Re-encoding a decode of arbitrary bytes is a fixed point: the
    /// decoder's output is always a cleanly encodable alarm list.
    #[test]
    fn decode_output_is_always_encodable(
        bytes in proptest::collection::vec(0u8..=255u8, 0..=512),
    ) {
        let once = decode(&bytes);
        let twice = decode(&encode(&once));
        prop_assert_eq!(once, twice);
    }
}
