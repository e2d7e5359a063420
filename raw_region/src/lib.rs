//! # raw_region
//!
//! Word-granular byte regions with an ownership tag.
//!
//! A [`Region`] is either *owned* (allocated and grown here) or *borrowed*
//! from a caller, in which case it is never reallocated and writes are kept
//! inside the largest whole-word prefix of the borrowed span.
//!
//! ```rust
//! use raw_region::{Access, Region};
//!
//! let region = Region::allocate(7);
//! assert_eq!(region.extent(), 8);
//! assert!(region.is_owned());
//!
//! let mut backing = [0u8; 12];
//! let borrowed = Region::borrowed(&mut backing);
//! assert_eq!(borrowed.window(Access::Write), 8);
//! assert_eq!(borrowed.window(Access::Read), 12);
//! ```

#![cfg_attr(not(feature = "std"), no_std)]

#[cfg(not(feature = "std"))]
extern crate alloc;

pub mod error;
pub mod region;
#[doc(hidden)]
pub mod storage;

pub use error::RegionError;
pub use region::Region;
pub use storage::Storage;

/// Granularity of every owned allocation and of the write window over borrowed memory.
pub const WORD_SIZE: usize = 8;

/// Bytes allocated when a writer is reset without a size and nothing is bound.
pub const DEFAULT_SIZE: usize = 16;

/// Direction a region is bound for.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Access {
    Read,
    Write,
}

/// Rounds `bytes` up to a whole number of words.
#[inline]
pub const fn word_capacity(bytes: usize) -> usize {
    bytes.div_ceil(WORD_SIZE) * WORD_SIZE
}

/// Rounds `bytes` down to a whole number of words.
#[inline]
pub const fn word_floor(bytes: usize) -> usize {
    bytes / WORD_SIZE * WORD_SIZE
}
