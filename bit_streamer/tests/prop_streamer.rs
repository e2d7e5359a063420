//! Property-based tests for the bit cursor.

use proptest::prelude::*;

use bit_streamer::{BitStreamer, ErrorKind, WORD_SIZE, zigzag};

/// A bit count in 1..=64 paired with a value that fits in it.
fn field_strategy() -> impl Strategy<Value = (u32, u64)> {
    (1u32..=64, any::<u64>()).prop_map(|(bits, raw)| {
        let mask = if bits == 64 { u64::MAX } else { (1u64 << bits) - 1 };
        (bits, raw & mask)
    })
}

/// Smallest bit count holding the zigzag form of `v`.
fn zigzag_width(v: i64) -> u32 {
    (64 - zigzag::encode(v).leading_zeros()).max(1)
}

//
// -----------------------------------------------------------------------------
// Round Trips
// -----------------------------------------------------------------------------

proptest! {
    #[test]
    fn prop_fields_round_trip(ref fields in prop::collection::vec(field_strategy(), 1..200)) {
        let mut bs = BitStreamer::new();
        bs.reset_write().unwrap();
        for &(bits, value) in fields {
            bs.write_bits(value, bits).unwrap();
        }

        let total: usize = fields.iter().map(|&(bits, _)| bits as usize).sum();
        prop_assert_eq!(bs.bit_offset(), total);

        bs.reset_read().unwrap();
        for &(bits, value) in fields {
            prop_assert_eq!(bs.read_bits(bits).unwrap(), value);
        }
    }
}

proptest! {
    #[test]
    fn prop_extra_bits_are_masked(value in any::<u64>(), bits in 1u32..64) {
        let mut bs = BitStreamer::new();
        bs.reset_write().unwrap();
        bs.write_bits(value, bits).unwrap();
        bs.write_bits(0, 64 - bits).unwrap();

        bs.reset_read().unwrap();
        prop_assert_eq!(bs.read_u64().unwrap(), value & ((1u64 << bits) - 1));
    }
}

proptest! {
    #[test]
    fn prop_zigzag_narrow_round_trip(ref values in prop::collection::vec(any::<i64>(), 1..100)) {
        let mut bs = BitStreamer::new();
        bs.reset_write().unwrap();
        for &v in values {
            bs.write_i64_bits(v, zigzag_width(v)).unwrap();
        }

        bs.reset_read().unwrap();
        for &v in values {
            prop_assert_eq!(bs.read_i64_bits(zigzag_width(v)).unwrap(), v);
        }
    }
}

proptest! {
    #[test]
    fn prop_zigzag_small_magnitudes_stay_small(v in -1000i64..1000) {
        prop_assert!(zigzag::encode(v) <= 2 * v.unsigned_abs());
        prop_assert_eq!(zigzag::decode(zigzag::encode(v)), v);
    }
}

proptest! {
    #[test]
    fn prop_aligned_bytes_match_unaligned(ref payload in prop::collection::vec(any::<u8>(), 0..300), lead in 1u32..8) {
        let mut bs = BitStreamer::new();
        bs.reset_write().unwrap();
        bs.write_bits(0, lead).unwrap();
        bs.write_bytes(payload).unwrap();

        bs.reset_read().unwrap();
        bs.skip(lead as usize).unwrap();
        let mut out = vec![0u8; payload.len()];
        bs.read_bytes(&mut out).unwrap();
        prop_assert_eq!(&out, payload);
    }
}

//
// -----------------------------------------------------------------------------
// Sizing
// -----------------------------------------------------------------------------

proptest! {
    #[test]
    fn prop_bytes_used_is_ceiling(ref fields in prop::collection::vec(field_strategy(), 0..50)) {
        let mut bs = BitStreamer::new();
        bs.reset_write().unwrap();
        for &(bits, value) in fields {
            bs.write_bits(value, bits).unwrap();
            prop_assert_eq!(bs.bytes_used(), bs.bit_offset().div_ceil(8));
            prop_assert_eq!(bs.byte_offset(), bs.bit_offset() as f64 / 8.0);
        }
    }
}

proptest! {
    #[test]
    fn prop_owned_growth_stays_word_aligned(initial in 1usize..64, ref payload in prop::collection::vec(any::<u8>(), 1..500)) {
        let mut bs = BitStreamer::new();
        bs.reset_write_sized(initial).unwrap();
        prop_assert_eq!(bs.byte_length(), initial.div_ceil(WORD_SIZE) * WORD_SIZE);

        bs.write_bytes(payload).unwrap();
        prop_assert!(bs.byte_length() >= bs.bytes_used());
        prop_assert_eq!(bs.byte_length() % WORD_SIZE, 0);
        prop_assert_eq!(bs.written(), &payload[..]);
    }
}

proptest! {
    #[test]
    fn prop_borrowed_write_window_is_floored(len in 0usize..200) {
        let mut backing = vec![0u8; len];
        let mut bs = BitStreamer::new();
        bs.reset_write_borrowed(&mut backing).unwrap();
        let window = len / WORD_SIZE * WORD_SIZE;
        prop_assert_eq!(bs.byte_length(), window);

        bs.skip(window * 8).unwrap();
        let err = bs.write_bool(true).unwrap_err();
        prop_assert_eq!(err.kind(), ErrorKind::CapacityExceeded);
        prop_assert_eq!(bs.bit_offset(), window * 8);
    }
}

//
// -----------------------------------------------------------------------------
// Framing
// -----------------------------------------------------------------------------

proptest! {
    #[test]
    fn prop_prefix_matches_bytes_used(ref fields in prop::collection::vec(field_strategy(), 0..40)) {
        let mut bs = BitStreamer::new();
        bs.reset_write().unwrap();
        bs.reserve_size_prefix().unwrap();
        for &(bits, value) in fields {
            bs.write_bits(value, bits).unwrap();
        }

        let offset = bs.bit_offset();
        let size = bs.prefix_size().unwrap();
        prop_assert_eq!(size as usize, bs.bytes_used());
        prop_assert_eq!(bs.bit_offset(), offset);

        let frame = bs.written().to_vec();
        let mut reader = BitStreamer::new();
        reader.reset_read_borrowed(&frame).unwrap();
        prop_assert_eq!(reader.read_u32().unwrap(), size);
        for &(bits, value) in fields {
            prop_assert_eq!(reader.read_bits(bits).unwrap(), value);
        }
    }
}
