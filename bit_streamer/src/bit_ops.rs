//! Unchecked bit copies between a `u64` and a byte slice.
//!
//! Bits are laid out least-significant first inside little-endian bytes, so a
//! byte-aligned 64-bit field holds exactly `value.to_le_bytes()`. Callers are
//! responsible for bounds; the slice must cover every touched byte.

#[inline(always)]
pub(crate) const fn low_mask(bits: usize) -> u64 {
    if bits >= 64 { u64::MAX } else { (1u64 << bits) - 1 }
}

/// Overwrites `bit_width` bits starting at `bit_offset` with the low bits of `value`.
///
/// Surrounding bits are preserved; higher bits of `value` are ignored.
pub fn set_bits(slice: &mut [u8], bit_offset: usize, bit_width: u32, value: u64) {
    debug_assert!((1..=64).contains(&bit_width));

    let mut remaining = bit_width as usize;
    let mut value = value & low_mask(remaining);
    let mut byte = bit_offset / 8;
    let shift = bit_offset % 8;

    if shift == 0 && remaining % 8 == 0 {
        let n = remaining / 8;
        slice[byte..byte + n].copy_from_slice(&value.to_le_bytes()[..n]);
        return;
    }

    // leading partial byte
    if shift != 0 {
        let take = remaining.min(8 - shift);
        let mask = (low_mask(take) as u8) << shift;
        slice[byte] = (slice[byte] & !mask) | (((value as u8) << shift) & mask);
        value >>= take;
        remaining -= take;
        byte += 1;
    }

    while remaining >= 8 {
        slice[byte] = value as u8;
        value >>= 8;
        remaining -= 8;
        byte += 1;
    }

    if remaining > 0 {
        let mask = low_mask(remaining) as u8;
        slice[byte] = (slice[byte] & !mask) | (value as u8 & mask);
    }
}

/// Reads `bit_width` bits starting at `bit_offset`.
pub fn get_bits(slice: &[u8], bit_offset: usize, bit_width: u32) -> u64 {
    debug_assert!((1..=64).contains(&bit_width));

    let mut remaining = bit_width as usize;
    let mut byte = bit_offset / 8;
    let shift = bit_offset % 8;

    if shift == 0 && remaining % 8 == 0 {
        let n = remaining / 8;
        let mut word = [0u8; 8];
        word[..n].copy_from_slice(&slice[byte..byte + n]);
        return u64::from_le_bytes(word);
    }

    let mut value = 0u64;
    let mut filled = 0usize;

    if shift != 0 {
        let take = remaining.min(8 - shift);
        value = (slice[byte] >> shift) as u64 & low_mask(take);
        filled = take;
        remaining -= take;
        byte += 1;
    }

    while remaining >= 8 {
        value |= (slice[byte] as u64) << filled;
        filled += 8;
        remaining -= 8;
        byte += 1;
    }

    if remaining > 0 {
        value |= (slice[byte] as u64 & low_mask(remaining)) << filled;
    }

    value
}

/// Copies `bytes` into the slice starting at `bit_offset`.
pub fn write_bytes(slice: &mut [u8], bit_offset: usize, bytes: &[u8]) {
    if bit_offset % 8 == 0 {
        let start = bit_offset / 8;
        slice[start..start + bytes.len()].copy_from_slice(bytes);
        return;
    }

    let mut chunks = bytes.chunks_exact(8);
    let mut offset = bit_offset;
    for chunk in &mut chunks {
        let mut word = [0u8; 8];
        word.copy_from_slice(chunk);
        set_bits(slice, offset, 64, u64::from_le_bytes(word));
        offset += 64;
    }
    for &b in chunks.remainder() {
        set_bits(slice, offset, 8, b as u64);
        offset += 8;
    }
}

/// Fills `out` from the slice starting at `bit_offset`.
pub fn read_bytes(slice: &[u8], bit_offset: usize, out: &mut [u8]) {
    if bit_offset % 8 == 0 {
        let start = bit_offset / 8;
        out.copy_from_slice(&slice[start..start + out.len()]);
        return;
    }

    let mut chunks = out.chunks_exact_mut(8);
    let mut offset = bit_offset;
    for chunk in &mut chunks {
        chunk.copy_from_slice(&get_bits(slice, offset, 64).to_le_bytes());
        offset += 64;
    }
    for b in chunks.into_remainder() {
        *b = get_bits(slice, offset, 8) as u8;
        offset += 8;
    }
}
