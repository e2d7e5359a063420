//! # bit_streamer
//!
//! A `no_std` compatible bit cursor for packing values into byte buffers.
//!
//! One [`BitStreamer`] reads or writes arbitrary-width fields (1 to 64 bits)
//! at a bit position inside a [`Region`]. Owned regions grow on demand;
//! borrowed ones are used in place and never reallocated.
//!
//! ```rust
//! use bit_streamer::{BitStreamer, Utf8};
//!
//! let mut writer = BitStreamer::new();
//! writer.reset_write().unwrap();
//! writer.write_u8_bits(5, 3).unwrap();       // 3 bits
//! writer.write_i16_bits(-20, 7).unwrap();    // zigzag, 7 bits
//! writer.write_string("hi", &Utf8).unwrap();
//! assert_eq!(writer.bytes_used(), 6);
//!
//! let mut reader = BitStreamer::new();
//! reader.reset_read_copied(writer.written()).unwrap();
//! assert_eq!(reader.read_u8_bits(3).unwrap(), 5);
//! assert_eq!(reader.read_i16_bits(7).unwrap(), -20);
//! assert_eq!(reader.read_string(&Utf8).unwrap(), "hi");
//! ```
//!
//! ## Reusing a writer
//!
//! Resetting keeps an owned region and zero-fills it, so a long-lived
//! streamer settles on one allocation:
//!
//! ```rust
//! use bit_streamer::BitStreamer;
//!
//! let mut bs = BitStreamer::new();
//! bs.reset_write_sized(64).unwrap();
//! for frame in 0..3u32 {
//!     bs.reset_write().unwrap();
//!     bs.write_u32(frame).unwrap();
//!     assert_eq!(bs.byte_length(), 64);
//! }
//! ```

#![cfg_attr(not(feature = "std"), no_std)]

#[cfg(not(feature = "std"))]
extern crate alloc;

pub mod error;
pub use error::{ErrorKind, StreamError};

mod bit_ops;

pub mod binding;
pub use binding::{Binding, Mode};

pub mod streamer;
pub use streamer::{BitStreamer, Scoped};

mod framing;
pub use framing::SIZE_PREFIX_BITS;

mod primitives;

pub mod strings;
pub use strings::{STRING_BYTES_MAX, STRING_LENGTH_MAX, TextCodec, Utf8, Utf16Le};

pub mod zigzag;

pub use raw_region::{Access, DEFAULT_SIZE, Region, WORD_SIZE};

pub type Result<T> = core::result::Result<T, StreamError>;
