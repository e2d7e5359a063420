//! The bit cursor and its region lifecycle.
//!
//! # Examples
//!
//! ```rust
//! use bit_streamer::BitStreamer;
//!
//! let mut writer = BitStreamer::new();
//! writer.reset_write_sized(60).unwrap();
//! assert_eq!(writer.byte_length(), 64);
//!
//! writer.write_u32_bits(1, 28).unwrap();
//! assert_eq!(writer.bit_offset(), 28);
//! assert_eq!(writer.byte_offset(), 3.5);
//! assert_eq!(writer.bytes_used(), 4);
//!
//! let mut reader = BitStreamer::new();
//! reader.reset_read_borrowed(writer.written()).unwrap();
//! assert_eq!(reader.read_u32_bits(28).unwrap(), 1);
//! ```
//!
//! ## Borrowed memory
//!
//! ```rust
//! use bit_streamer::{BitStreamer, ErrorKind};
//!
//! let mut backing = [0u8; 12];
//! let mut writer = BitStreamer::new();
//! writer.reset_write_borrowed(&mut backing).unwrap();
//!
//! // Only whole words of borrowed memory are writable.
//! assert_eq!(writer.byte_length(), 8);
//! writer.write_u64(123).unwrap();
//! let err = writer.write_u8(1).unwrap_err();
//! assert_eq!(err.kind(), ErrorKind::CapacityExceeded);
//! ```

use core::ops::{Deref, DerefMut};

use crate::binding::{Binding, Mode};
use crate::{Result, StreamError, bit_ops};
use raw_region::{Access, DEFAULT_SIZE, Region, RegionError};
use tracing::{debug, trace};

#[cfg(feature = "mmap")]
use std::path::Path;

/// A single read/write cursor over a word-granular byte region.
#[derive(Debug, Default)]
pub struct BitStreamer<'a> {
    region: Option<Region<'a>>,
    mode: Mode,
    bit_offset: usize,
    bit_length: usize,
    pub(crate) size_prefix_at: Option<usize>,
}

/// Validates a requested bit count against the width of the target type.
#[inline(always)]
pub(crate) fn check_bit_count(bits: u32, max: u32) -> Result<()> {
    if (1..=max).contains(&bits) {
        Ok(())
    } else {
        Err(StreamError::InvalidBitCount { bits, max })
    }
}

impl<'a> BitStreamer<'a> {
    /// Creates an idle streamer with nothing bound.
    pub fn new() -> Self {
        Self::default()
    }

    /// Binds the cursor for `access` according to `binding`.
    ///
    /// On failure the streamer keeps its previous binding, mode and offset.
    ///
    /// # Errors
    ///
    /// - `Unbound` when reusing for reading with nothing bound
    /// - `NoData` for `NewOwned` with `Access::Read`
    /// - `ReadOnlyRegion` when a read-only region would be bound for writing
    /// - `OwnedRegionHeld` when adopting external memory over an owned region
    pub fn reset(&mut self, access: Access, binding: Binding<'_, 'a>) -> Result<()> {
        let (region, bit_offset) = match binding {
            Binding::Reuse => (self.take_for_reuse(access)?, 0),

            Binding::NewOwned(size) => {
                if access == Access::Read {
                    return Err(StreamError::NoData);
                }
                let size = if size == 0 { DEFAULT_SIZE } else { size };
                (Region::reuse_or_allocate(self.region.take(), size), 0)
            }

            Binding::AdoptCopied(bytes) => {
                let region = if bytes.is_empty() {
                    Region::reuse_or_allocate(self.region.take(), DEFAULT_SIZE)
                } else {
                    Region::reuse_or_copy(self.region.take(), bytes)
                };
                let bit_offset = match access {
                    Access::Write => bytes.len() * 8,
                    Access::Read => 0,
                };
                (region, bit_offset)
            }

            Binding::AdoptBorrowed(bytes) => {
                self.ensure_not_owning()?;
                (Region::borrowed(bytes), 0)
            }

            Binding::AdoptBorrowedReadOnly(bytes) => {
                if access == Access::Write {
                    return Err(StreamError::ReadOnlyRegion);
                }
                self.ensure_not_owning()?;
                (Region::borrowed_read_only(bytes), 0)
            }

            #[cfg(feature = "mmap")]
            Binding::MapFile(path) => {
                self.ensure_not_owning()?;
                let region = match access {
                    Access::Read => Region::map_readonly(path)?,
                    Access::Write => Region::map_readwrite(path)?,
                };
                (region, 0)
            }
        };

        self.bind(region, access, bit_offset);
        Ok(())
    }

    /// Resets for writing over the bound region, or a default-sized owned one.
    pub fn reset_write(&mut self) -> Result<()> {
        self.reset(Access::Write, Binding::Reuse)
    }

    /// Resets for writing over an owned region of at least `bytes` bytes.
    pub fn reset_write_sized(&mut self, bytes: usize) -> Result<()> {
        self.reset(Access::Write, Binding::NewOwned(bytes))
    }

    /// Resets for writing after an owned copy of `bytes`.
    pub fn reset_write_copied(&mut self, bytes: &[u8]) -> Result<()> {
        self.reset(Access::Write, Binding::AdoptCopied(bytes))
    }

    /// Resets for writing directly into caller memory.
    pub fn reset_write_borrowed(&mut self, bytes: &'a mut [u8]) -> Result<()> {
        self.reset(Access::Write, Binding::AdoptBorrowed(bytes))
    }

    /// Resets for reading the bound region from the start.
    pub fn reset_read(&mut self) -> Result<()> {
        self.reset(Access::Read, Binding::Reuse)
    }

    /// Resets for reading an owned copy of `bytes`.
    pub fn reset_read_copied(&mut self, bytes: &[u8]) -> Result<()> {
        self.reset(Access::Read, Binding::AdoptCopied(bytes))
    }

    /// Resets for reading an owned copy of `bytes[offset..offset + count]`.
    pub fn reset_read_range(&mut self, bytes: &[u8], offset: usize, count: usize) -> Result<()> {
        let end = offset
            .checked_add(count)
            .filter(|&end| end <= bytes.len())
            .ok_or(StreamError::RangeOutOfBounds {
                offset,
                count,
                len: bytes.len(),
            })?;
        self.reset(Access::Read, Binding::AdoptCopied(&bytes[offset..end]))
    }

    /// Resets for reading caller memory in place.
    pub fn reset_read_borrowed(&mut self, bytes: &'a [u8]) -> Result<()> {
        self.reset(Access::Read, Binding::AdoptBorrowedReadOnly(bytes))
    }

    /// Resets for reading writable caller memory in place; a later
    /// [`reset_write`](Self::reset_write) can write into it again.
    pub fn reset_read_borrowed_mut(&mut self, bytes: &'a mut [u8]) -> Result<()> {
        self.reset(Access::Read, Binding::AdoptBorrowed(bytes))
    }

    #[cfg(feature = "mmap")]
    pub fn reset_read_mapped<P: AsRef<Path>>(&mut self, path: P) -> Result<()> {
        self.reset(Access::Read, Binding::MapFile(path.as_ref()))
    }

    #[cfg(feature = "mmap")]
    pub fn reset_write_mapped<P: AsRef<Path>>(&mut self, path: P) -> Result<()> {
        self.reset(Access::Write, Binding::MapFile(path.as_ref()))
    }

    /// Detaches the region, freeing it if owned, and returns to [`Mode::Idle`].
    ///
    /// Calling this on an idle streamer does nothing.
    pub fn release(&mut self) {
        if let Some(region) = self.region.take() {
            debug!(
                bytes = region.extent(),
                owned = region.is_owned(),
                "releasing region"
            );
        }
        self.mode = Mode::Idle;
        self.bit_offset = 0;
        self.bit_length = 0;
        self.size_prefix_at = None;
    }

    /// Borrows the streamer behind a guard that releases it when dropped.
    pub fn scoped(&mut self) -> Scoped<'_, 'a> {
        Scoped { streamer: self }
    }

    //  State queries

    #[inline]
    pub fn mode(&self) -> Mode {
        self.mode
    }

    #[inline]
    pub fn is_reading(&self) -> bool {
        self.mode == Mode::Reading
    }

    #[inline]
    pub fn is_writing(&self) -> bool {
        self.mode == Mode::Writing
    }

    /// Bits the cursor may currently address.
    #[inline]
    pub fn bit_length(&self) -> usize {
        self.bit_length
    }

    #[inline]
    pub fn byte_length(&self) -> usize {
        self.bit_length / 8
    }

    #[inline]
    pub fn bit_offset(&self) -> usize {
        self.bit_offset
    }

    /// Cursor position in bytes, including the fraction of a partial byte.
    #[inline]
    pub fn byte_offset(&self) -> f64 {
        self.bit_offset as f64 / 8.0
    }

    /// Whole bytes touched so far, rounded up.
    #[inline]
    pub fn bytes_used(&self) -> usize {
        self.bit_offset.div_ceil(8)
    }

    pub fn owns_buffer(&self) -> bool {
        self.region.as_ref().is_some_and(Region::is_owned)
    }

    pub fn region(&self) -> Option<&Region<'a>> {
        self.region.as_ref()
    }

    /// The addressable bytes, `byte_length()` long. Empty when idle.
    pub fn buffer(&self) -> &[u8] {
        match &self.region {
            Some(region) => &region.as_slice()[..self.byte_length()],
            None => &[],
        }
    }

    /// The first `bytes_used()` bytes, ready to hand to a transport.
    pub fn written(&self) -> &[u8] {
        &self.buffer()[..self.bytes_used()]
    }

    //  Generic bit primitive

    /// Writes the low `bits` bits of `value`. Higher bits are ignored.
    ///
    /// # Errors
    ///
    /// - `InvalidBitCount` unless `1 <= bits <= 64`
    /// - `InvalidMode` unless writing
    /// - `CapacityExceeded` if a non-owned region would be overrun
    pub fn write_bits(&mut self, value: u64, bits: u32) -> Result<()> {
        check_bit_count(bits, u64::BITS)?;
        self.expect_mode(Mode::Writing)?;
        self.reserve_bits(bits as usize)?;

        let offset = self.bit_offset;
        bit_ops::set_bits(self.writable()?, offset, bits, value);
        self.bit_offset += bits as usize;
        Ok(())
    }

    /// Reads `bits` bits as an unsigned value.
    ///
    /// # Errors
    ///
    /// - `InvalidBitCount` unless `1 <= bits <= 64`
    /// - `InvalidMode` unless reading
    /// - `ReadPastEnd` if fewer than `bits` bits remain
    pub fn read_bits(&mut self, bits: u32) -> Result<u64> {
        check_bit_count(bits, u64::BITS)?;
        self.expect_mode(Mode::Reading)?;
        self.check_readable(bits as usize)?;

        let value = bit_ops::get_bits(self.readable()?, self.bit_offset, bits);
        self.bit_offset += bits as usize;
        Ok(value)
    }

    /// Advances the cursor by `bits` without transferring values.
    ///
    /// A writer grows or fails exactly as a write of `bits` bits would; the
    /// skipped span of an owned region reads back as zero.
    pub fn skip(&mut self, bits: usize) -> Result<()> {
        match self.mode {
            Mode::Writing => self.reserve_bits(bits)?,
            Mode::Reading => self.check_readable(bits)?,
            Mode::Idle => return Err(StreamError::Unbound),
        }
        self.bit_offset += bits;
        Ok(())
    }

    //  Bulk transfer

    /// Writes `bytes` as consecutive 8-bit fields.
    pub fn write_bytes(&mut self, bytes: &[u8]) -> Result<()> {
        self.expect_mode(Mode::Writing)?;
        let bits = byte_bits(bytes.len(), self.bit_length)?;
        self.reserve_bits(bits)?;

        let offset = self.bit_offset;
        bit_ops::write_bytes(self.writable()?, offset, bytes);
        self.bit_offset += bits;
        Ok(())
    }

    /// Fills `out` from consecutive 8-bit fields.
    pub fn read_bytes(&mut self, out: &mut [u8]) -> Result<()> {
        self.expect_mode(Mode::Reading)?;
        let bits = out.len().checked_mul(8).ok_or(StreamError::ReadPastEnd {
            offset: self.bit_offset,
            requested: usize::MAX,
            length: self.bit_length,
        })?;
        self.check_readable(bits)?;

        bit_ops::read_bytes(self.readable()?, self.bit_offset, out);
        self.bit_offset += bits;
        Ok(())
    }

    /// Writes the raw memory of `values` in their native byte order.
    pub fn write_memory<T: bytemuck::Pod>(&mut self, values: &[T]) -> Result<()> {
        self.write_bytes(bytemuck::cast_slice(values))
    }

    /// Reads raw memory into `out` in native byte order.
    pub fn read_memory<T: bytemuck::Pod>(&mut self, out: &mut [T]) -> Result<()> {
        self.read_bytes(bytemuck::cast_slice_mut(out))
    }

    //  Internals shared with the codec, framing and string layers

    pub(crate) fn expect_mode(&self, expected: Mode) -> Result<()> {
        if self.mode == expected {
            Ok(())
        } else {
            Err(StreamError::InvalidMode {
                expected,
                found: self.mode,
            })
        }
    }

    /// Makes room for `bits` more bits after the cursor, growing an owned region.
    pub(crate) fn reserve_bits(&mut self, bits: usize) -> Result<()> {
        let capacity = self.bit_length;
        let required = self
            .bit_offset
            .checked_add(bits)
            .ok_or(StreamError::CapacityExceeded {
                required: usize::MAX,
                capacity,
            })?;
        if required <= capacity {
            return Ok(());
        }

        let region = self.region.as_mut().ok_or(StreamError::Unbound)?;
        region
            .grow(required.div_ceil(8))
            .map_err(|err| match err {
                RegionError::NotGrowable { .. } => {
                    StreamError::CapacityExceeded { required, capacity }
                }
                other => StreamError::from(other),
            })?;
        self.bit_length = region.extent() * 8;
        trace!(from = capacity, to = self.bit_length, "grew write window");
        Ok(())
    }

    pub(crate) fn check_readable(&self, bits: usize) -> Result<()> {
        match self.bit_offset.checked_add(bits) {
            Some(end) if end <= self.bit_length => Ok(()),
            _ => Err(StreamError::ReadPastEnd {
                offset: self.bit_offset,
                requested: bits,
                length: self.bit_length,
            }),
        }
    }

    pub(crate) fn writable(&mut self) -> Result<&mut [u8]> {
        let region = self.region.as_mut().ok_or(StreamError::Unbound)?;
        Ok(region.as_mut_slice()?)
    }

    pub(crate) fn readable(&self) -> Result<&[u8]> {
        self.region
            .as_ref()
            .map(Region::as_slice)
            .ok_or(StreamError::Unbound)
    }

    /// Runs `op`, restoring the cursor if it fails.
    pub(crate) fn rewind_on_error<T>(
        &mut self,
        op: impl FnOnce(&mut Self) -> Result<T>,
    ) -> Result<T> {
        let start = self.bit_offset;
        let result = op(self);
        if result.is_err() {
            self.bit_offset = start;
        }
        result
    }

    fn take_for_reuse(&mut self, access: Access) -> Result<Region<'a>> {
        match (access, &self.region) {
            (Access::Read, None) => return Err(StreamError::Unbound),
            (Access::Write, Some(region)) if !region.is_writable() => {
                return Err(StreamError::ReadOnlyRegion);
            }
            _ => {}
        }

        Ok(match self.region.take() {
            Some(mut region) => {
                if access == Access::Write {
                    region.zero();
                }
                region
            }
            None => Region::allocate(DEFAULT_SIZE),
        })
    }

    fn ensure_not_owning(&self) -> Result<()> {
        if self.owns_buffer() {
            Err(StreamError::OwnedRegionHeld)
        } else {
            Ok(())
        }
    }

    fn bind(&mut self, region: Region<'a>, access: Access, bit_offset: usize) {
        self.bit_length = region.window(access) * 8;
        self.bit_offset = bit_offset;
        self.mode = Mode::from(access);
        self.size_prefix_at = None;
        debug!(
            ?access,
            bytes = self.bit_length / 8,
            owned = region.is_owned(),
            "bound region"
        );
        self.region = Some(region);
    }
}

fn byte_bits(len: usize, capacity: usize) -> Result<usize> {
    len.checked_mul(8).ok_or(StreamError::CapacityExceeded {
        required: usize::MAX,
        capacity,
    })
}

/// Releases the wrapped streamer on drop. See [`BitStreamer::scoped`].
pub struct Scoped<'s, 'a> {
    streamer: &'s mut BitStreamer<'a>,
}

impl<'a> Deref for Scoped<'_, 'a> {
    type Target = BitStreamer<'a>;

    fn deref(&self) -> &Self::Target {
        self.streamer
    }
}

impl<'a> DerefMut for Scoped<'_, 'a> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        self.streamer
    }
}

impl Drop for Scoped<'_, '_> {
    fn drop(&mut self) {
        self.streamer.release();
    }
}
