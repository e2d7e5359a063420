//! Zigzag mapping between signed and unsigned integers.
//!
//! `0, -1, 1, -2, 2, ...` map to `0, 1, 2, 3, 4, ...`, so a value of small
//! magnitude needs few bits whatever its sign. Narrower signed types are
//! widened to `i64` first; for any `v: i32`, `encode(v as i64)` equals the
//! 32-bit mapping `((v << 1) ^ (v >> 31)) as u32`.

#[inline]
pub const fn encode(value: i64) -> u64 {
    ((value << 1) ^ (value >> 63)) as u64
}

#[inline]
pub const fn decode(value: u64) -> i64 {
    ((value >> 1) as i64) ^ -((value & 1) as i64)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn interleaves_signs() {
        assert_eq!(encode(0), 0);
        assert_eq!(encode(-1), 1);
        assert_eq!(encode(1), 2);
        assert_eq!(encode(-2), 3);
        assert_eq!(encode(2), 4);
        assert_eq!(encode(i64::MAX), u64::MAX - 1);
        assert_eq!(encode(i64::MIN), u64::MAX);
    }

    #[test]
    fn narrow_types_match_native_width() {
        for v in [i32::MIN, -65, -1, 0, 1, 64, i32::MAX] {
            let native = ((v << 1) ^ (v >> 31)) as u32;
            assert_eq!(encode(v as i64), native as u64);
        }
        for v in [i8::MIN, -1, 0, i8::MAX] {
            let native = ((v << 1) ^ (v >> 7)) as u8;
            assert_eq!(encode(v as i64), native as u64);
        }
    }

    #[test]
    fn decode_inverts_encode() {
        for v in [i64::MIN, i64::MIN + 1, -300, -1, 0, 1, 300, i64::MAX] {
            assert_eq!(decode(encode(v)), v);
        }
    }
}
