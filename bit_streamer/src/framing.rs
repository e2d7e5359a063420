//! Length-prefixed frames via reserve and backpatch.
//!
//! ```rust
//! use bit_streamer::BitStreamer;
//!
//! let mut writer = BitStreamer::new();
//! writer.reset_write().unwrap();
//! writer.reserve_size_prefix().unwrap();
//! writer.write_u16(0xCAFE).unwrap();
//! writer.write_bool(true).unwrap();
//!
//! let size = writer.prefix_size().unwrap();
//! assert_eq!(size, 7);
//!
//! let mut reader = BitStreamer::new();
//! reader.reset_read_borrowed(writer.written()).unwrap();
//! assert_eq!(reader.read_u32().unwrap(), size);
//! ```

use crate::{BitStreamer, Mode, Result, StreamError, bit_ops};

/// Width of the length field reserved at the head of a frame.
pub const SIZE_PREFIX_BITS: u32 = u32::BITS;

impl<'a> BitStreamer<'a> {
    /// Reserves a zeroed 32-bit length field at the cursor.
    ///
    /// The field belongs at the head of the frame, so call this before
    /// writing any payload.
    pub fn reserve_size_prefix(&mut self) -> Result<()> {
        let at = self.bit_offset();
        self.write_bits(0, SIZE_PREFIX_BITS)?;
        self.size_prefix_at = Some(at);
        Ok(())
    }

    /// Stores [`bytes_used`](Self::bytes_used) in the reserved field and returns it.
    ///
    /// The cursor does not move. The value is a plain unsigned integer, so a
    /// reader takes it back with `read_u32`.
    ///
    /// # Errors
    ///
    /// - `PrefixNotReserved` if nothing was reserved since the last reset
    /// - `PrefixOverflow` if the frame is longer than `u32::MAX` bytes
    pub fn prefix_size(&mut self) -> Result<u32> {
        self.expect_mode(Mode::Writing)?;
        let at = self.size_prefix_at.ok_or(StreamError::PrefixNotReserved)?;
        let used = self.bytes_used();
        let size = u32::try_from(used).map_err(|_| StreamError::PrefixOverflow(used))?;

        bit_ops::set_bits(self.writable()?, at, SIZE_PREFIX_BITS, size as u64);
        Ok(size)
    }
}
