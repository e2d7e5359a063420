//! Length-prefixed text on top of the byte primitives.
//!
//! A string is a 16-bit byte count followed by that many encoded bytes. The
//! byte count may not exceed [`STRING_BYTES_MAX`]; a longer value is rejected
//! before anything is written. On the way back in, a declared count above the
//! maximum is clamped to it and only that many bytes are consumed.
//!
//! ```rust
//! use bit_streamer::{BitStreamer, Utf16Le, Utf8};
//!
//! let mut bs = BitStreamer::new();
//! bs.reset_write().unwrap();
//! bs.write_string("grüße", &Utf8).unwrap();
//! bs.write_string("ok", &Utf16Le).unwrap();
//!
//! bs.reset_read().unwrap();
//! assert_eq!(bs.read_string(&Utf8).unwrap(), "grüße");
//!
//! let mut chars = ['\0'; 8];
//! assert_eq!(bs.read_chars(&mut chars, &Utf16Le).unwrap(), 2);
//! assert_eq!(&chars[..2], &['o', 'k']);
//! ```

#[cfg(not(feature = "std"))]
use alloc::string::String;

use crate::{BitStreamer, Mode, Result, StreamError};

/// Longest string, in characters, the format is meant to carry.
pub const STRING_LENGTH_MAX: usize = u8::MAX as usize;

/// Largest encoded byte count accepted on write and honoured on read.
pub const STRING_BYTES_MAX: usize = STRING_LENGTH_MAX * 4;

/// Converts between text and its byte form on the wire.
pub trait TextCodec {
    /// Number of bytes `encode` will produce for `text`.
    fn encoded_len(&self, text: &str) -> usize;

    /// Encodes `text` into `out`, which is exactly `encoded_len(text)` bytes.
    fn encode(&self, text: &str, out: &mut [u8]);

    /// Appends the text held in `bytes` to `out`. Malformed input decodes to
    /// U+FFFD rather than failing.
    fn decode(&self, bytes: &[u8], out: &mut String);
}

#[derive(Copy, Clone, Debug, Default)]
pub struct Utf8;

impl TextCodec for Utf8 {
    fn encoded_len(&self, text: &str) -> usize {
        text.len()
    }

    fn encode(&self, text: &str, out: &mut [u8]) {
        out.copy_from_slice(text.as_bytes());
    }

    fn decode(&self, bytes: &[u8], out: &mut String) {
        out.push_str(&String::from_utf8_lossy(bytes));
    }
}

/// UTF-16 code units, little-endian.
#[derive(Copy, Clone, Debug, Default)]
pub struct Utf16Le;

impl TextCodec for Utf16Le {
    fn encoded_len(&self, text: &str) -> usize {
        text.encode_utf16().count() * 2
    }

    fn encode(&self, text: &str, out: &mut [u8]) {
        for (unit, dst) in text.encode_utf16().zip(out.chunks_exact_mut(2)) {
            dst.copy_from_slice(&unit.to_le_bytes());
        }
    }

    fn decode(&self, bytes: &[u8], out: &mut String) {
        let units = bytes
            .chunks_exact(2)
            .map(|pair| u16::from_le_bytes([pair[0], pair[1]]));
        out.extend(
            char::decode_utf16(units).map(|ch| ch.unwrap_or(char::REPLACEMENT_CHARACTER)),
        );
        if bytes.len() % 2 != 0 {
            out.push(char::REPLACEMENT_CHARACTER);
        }
    }
}

impl<'a> BitStreamer<'a> {
    /// Writes `text` as a 16-bit byte count followed by its encoding.
    ///
    /// # Errors
    ///
    /// - `StringTooLong` if the encoding exceeds [`STRING_BYTES_MAX`]
    /// - `CapacityExceeded` if a non-owned region cannot hold the whole string
    ///
    /// Either way nothing is written.
    pub fn write_string<C: TextCodec + ?Sized>(&mut self, text: &str, codec: &C) -> Result<()> {
        let len = codec.encoded_len(text);
        if len > STRING_BYTES_MAX {
            return Err(StreamError::StringTooLong {
                len,
                max: STRING_BYTES_MAX,
            });
        }
        self.expect_mode(Mode::Writing)?;
        self.reserve_bits(16 + len * 8)?;

        let mut scratch = [0u8; STRING_BYTES_MAX];
        let encoded = &mut scratch[..len];
        codec.encode(text, encoded);

        self.write_u16(len as u16)?;
        self.write_bytes(encoded)
    }

    /// Reads a string written by [`write_string`](Self::write_string).
    ///
    /// A declared length above [`STRING_BYTES_MAX`] is clamped to it. On error
    /// the cursor is left where it was.
    pub fn read_string<C: TextCodec + ?Sized>(&mut self, codec: &C) -> Result<String> {
        self.rewind_on_error(|bs| {
            let len = (bs.read_u16()? as usize).min(STRING_BYTES_MAX);
            let mut scratch = [0u8; STRING_BYTES_MAX];
            let encoded = &mut scratch[..len];
            bs.read_bytes(encoded)?;

            let mut text = String::with_capacity(len);
            codec.decode(encoded, &mut text);
            Ok(text)
        })
    }

    /// Reads a string into `dest`, returning how many characters were stored.
    ///
    /// Characters that do not fit in `dest` are dropped; the whole encoded
    /// string is still consumed.
    pub fn read_chars<C: TextCodec + ?Sized>(
        &mut self,
        dest: &mut [char],
        codec: &C,
    ) -> Result<usize> {
        if dest.is_empty() {
            return Err(StreamError::EmptyDestination);
        }
        let text = self.read_string(codec)?;

        let mut stored = 0;
        for (slot, ch) in dest.iter_mut().zip(text.chars()) {
            *slot = ch;
            stored += 1;
        }
        Ok(stored)
    }

    /// Like [`read_chars`](Self::read_chars), filling `dest[offset..]`.
    pub fn read_chars_at<C: TextCodec + ?Sized>(
        &mut self,
        dest: &mut [char],
        offset: usize,
        codec: &C,
    ) -> Result<usize> {
        if offset >= dest.len() {
            return Err(StreamError::RangeOutOfBounds {
                offset,
                count: 1,
                len: dest.len(),
            });
        }
        self.read_chars(&mut dest[offset..], codec)
    }
}
