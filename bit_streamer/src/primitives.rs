//! Fixed-width codecs layered on [`BitStreamer::write_bits`] / [`BitStreamer::read_bits`].
//!
//! Unsigned and floating-point values are written as their plain bit
//! patterns. Signed values go through the zigzag mapping first, so a narrow
//! explicit bit count still holds small negative numbers:
//!
//! ```rust
//! use bit_streamer::BitStreamer;
//!
//! let mut bs = BitStreamer::new();
//! bs.reset_write().unwrap();
//! bs.write_i32_bits(-3, 4).unwrap();
//! bs.write_f32(1.5).unwrap();
//!
//! bs.reset_read().unwrap();
//! assert_eq!(bs.read_i32_bits(4).unwrap(), -3);
//! assert_eq!(bs.read_f32().unwrap(), 1.5);
//! ```
//!
//! Bits above the requested count are dropped silently, both for unsigned
//! values and for the zigzag-mapped form of signed ones.

use crate::streamer::check_bit_count;
use crate::{BitStreamer, Result, zigzag};

macro_rules! unsigned_codec {
    ($($ty:ty => $write:ident, $write_bits:ident, $read:ident, $read_bits:ident;)*) => {
        impl<'a> BitStreamer<'a> {
            $(
                #[doc = concat!("Writes a full-width `", stringify!($ty), "`.")]
                #[inline]
                pub fn $write(&mut self, value: $ty) -> Result<()> {
                    self.write_bits(value as u64, <$ty>::BITS)
                }

                #[doc = concat!("Writes the low `bits` bits of a `", stringify!($ty), "`.")]
                #[inline]
                pub fn $write_bits(&mut self, value: $ty, bits: u32) -> Result<()> {
                    check_bit_count(bits, <$ty>::BITS)?;
                    self.write_bits(value as u64, bits)
                }

                #[inline]
                pub fn $read(&mut self) -> Result<$ty> {
                    Ok(self.read_bits(<$ty>::BITS)? as $ty)
                }

                #[inline]
                pub fn $read_bits(&mut self, bits: u32) -> Result<$ty> {
                    check_bit_count(bits, <$ty>::BITS)?;
                    Ok(self.read_bits(bits)? as $ty)
                }
            )*
        }
    };
}

macro_rules! signed_codec {
    ($($ty:ty => $write:ident, $write_bits:ident, $read:ident, $read_bits:ident;)*) => {
        impl<'a> BitStreamer<'a> {
            $(
                #[doc = concat!("Writes a zigzag-mapped `", stringify!($ty), "` at full width.")]
                #[inline]
                pub fn $write(&mut self, value: $ty) -> Result<()> {
                    self.$write_bits(value, <$ty>::BITS)
                }

                #[doc = concat!("Writes a zigzag-mapped `", stringify!($ty), "` in `bits` bits.")]
                #[inline]
                pub fn $write_bits(&mut self, value: $ty, bits: u32) -> Result<()> {
                    check_bit_count(bits, <$ty>::BITS)?;
                    self.write_bits(zigzag::encode(value as i64), bits)
                }

                #[inline]
                pub fn $read(&mut self) -> Result<$ty> {
                    self.$read_bits(<$ty>::BITS)
                }

                #[inline]
                pub fn $read_bits(&mut self, bits: u32) -> Result<$ty> {
                    check_bit_count(bits, <$ty>::BITS)?;
                    Ok(zigzag::decode(self.read_bits(bits)?) as $ty)
                }
            )*
        }
    };
}

unsigned_codec! {
    u8 => write_u8, write_u8_bits, read_u8, read_u8_bits;
    u16 => write_u16, write_u16_bits, read_u16, read_u16_bits;
    u32 => write_u32, write_u32_bits, read_u32, read_u32_bits;
    u64 => write_u64, write_u64_bits, read_u64, read_u64_bits;
}

signed_codec! {
    i8 => write_i8, write_i8_bits, read_i8, read_i8_bits;
    i16 => write_i16, write_i16_bits, read_i16, read_i16_bits;
    i32 => write_i32, write_i32_bits, read_i32, read_i32_bits;
    i64 => write_i64, write_i64_bits, read_i64, read_i64_bits;
}

impl<'a> BitStreamer<'a> {
    pub fn write_bool(&mut self, value: bool) -> Result<()> {
        self.write_bits(value as u64, 1)
    }

    pub fn read_bool(&mut self) -> Result<bool> {
        Ok(self.read_bits(1)? != 0)
    }

    pub fn write_f32(&mut self, value: f32) -> Result<()> {
        self.write_bits(value.to_bits() as u64, 32)
    }

    pub fn read_f32(&mut self) -> Result<f32> {
        Ok(f32::from_bits(self.read_bits(32)? as u32))
    }

    pub fn write_f64(&mut self, value: f64) -> Result<()> {
        self.write_bits(value.to_bits(), 64)
    }

    pub fn read_f64(&mut self) -> Result<f64> {
        Ok(f64::from_bits(self.read_bits(64)?))
    }
}

#[cfg(test)]
mod tests {
    use crate::{BitStreamer, ErrorKind, Result, StreamError};

    #[test]
    fn unsigned_full_width() -> Result<()> {
        let mut bs = BitStreamer::new();
        bs.reset_write()?;
        bs.write_u8(0xAB)?;
        bs.write_u16(0xBEEF)?;
        bs.write_u32(0xDEAD_BEEF)?;
        bs.write_u64(85_830_981_411_525)?;
        assert_eq!(bs.bit_offset(), 8 + 16 + 32 + 64);

        bs.reset_read()?;
        assert_eq!(bs.read_u8()?, 0xAB);
        assert_eq!(bs.read_u16()?, 0xBEEF);
        assert_eq!(bs.read_u32()?, 0xDEAD_BEEF);
        assert_eq!(bs.read_u64()?, 85_830_981_411_525);
        Ok(())
    }

    #[test]
    fn typed_bit_count_is_capped_by_width() -> Result<()> {
        let mut bs = BitStreamer::new();
        bs.reset_write()?;
        assert!(matches!(
            bs.write_u8_bits(1, 9),
            Err(StreamError::InvalidBitCount { bits: 9, max: 8 })
        ));
        assert_eq!(bs.write_i16_bits(1, 17).unwrap_err().kind(), ErrorKind::OutOfRange);
        assert_eq!(bs.write_u32_bits(1, 0).unwrap_err().kind(), ErrorKind::OutOfRange);
        assert_eq!(bs.bit_offset(), 0);
        Ok(())
    }

    #[test]
    fn narrow_unsigned_is_masked() -> Result<()> {
        let mut bs = BitStreamer::new();
        bs.reset_write()?;
        bs.write_u32_bits(0x1FF, 4)?;
        bs.write_u8_bits(0b10, 2)?;

        bs.reset_read()?;
        assert_eq!(bs.read_u32_bits(4)?, 0xF);
        assert_eq!(bs.read_u8_bits(2)?, 0b10);
        Ok(())
    }

    #[test]
    fn signed_boundaries() -> Result<()> {
        let mut bs = BitStreamer::new();
        bs.reset_write()?;
        for v in [i8::MIN, -1, 0, 1, i8::MAX] {
            bs.write_i8(v)?;
        }
        for v in [i16::MIN, -1, 0, i16::MAX] {
            bs.write_i16(v)?;
        }
        for v in [i32::MIN, -1, 0, i32::MAX] {
            bs.write_i32(v)?;
        }
        for v in [i64::MIN, -1, 0, i64::MAX] {
            bs.write_i64(v)?;
        }

        bs.reset_read()?;
        for v in [i8::MIN, -1, 0, 1, i8::MAX] {
            assert_eq!(bs.read_i8()?, v);
        }
        for v in [i16::MIN, -1, 0, i16::MAX] {
            assert_eq!(bs.read_i16()?, v);
        }
        for v in [i32::MIN, -1, 0, i32::MAX] {
            assert_eq!(bs.read_i32()?, v);
        }
        for v in [i64::MIN, -1, 0, i64::MAX] {
            assert_eq!(bs.read_i64()?, v);
        }
        Ok(())
    }

    #[test]
    fn small_negatives_pack_narrow() -> Result<()> {
        let mut bs = BitStreamer::new();
        bs.reset_write()?;
        // zigzag(-4) = 7 fits in 3 bits
        bs.write_i32_bits(-4, 3)?;
        bs.write_i64_bits(3, 3)?;
        assert_eq!(bs.bit_offset(), 6);

        bs.reset_read()?;
        assert_eq!(bs.read_i32_bits(3)?, -4);
        assert_eq!(bs.read_i64_bits(3)?, 3);
        Ok(())
    }

    #[test]
    fn signed_full_width_reads_back_as_zigzag() -> Result<()> {
        let mut bs = BitStreamer::new();
        bs.reset_write()?;
        bs.write_i32(-1)?;

        bs.reset_read()?;
        assert_eq!(bs.read_u32()?, 1);
        Ok(())
    }

    #[test]
    fn floats_and_bools() -> Result<()> {
        let mut bs = BitStreamer::new();
        bs.reset_write()?;
        bs.write_bool(true)?;
        bs.write_f32(-0.15625)?;
        bs.write_bool(false)?;
        bs.write_f64(core::f64::consts::PI)?;
        bs.write_f32(f32::INFINITY)?;

        bs.reset_read()?;
        assert!(bs.read_bool()?);
        assert_eq!(bs.read_f32()?, -0.15625);
        assert!(!bs.read_bool()?);
        assert_eq!(bs.read_f64()?, core::f64::consts::PI);
        assert_eq!(bs.read_f32()?, f32::INFINITY);
        Ok(())
    }

    #[test]
    fn nan_bit_pattern_survives() -> Result<()> {
        let nan = f64::from_bits(0x7FF8_0000_0000_0123);
        let mut bs = BitStreamer::new();
        bs.reset_write()?;
        bs.write_f64(nan)?;

        bs.reset_read()?;
        assert_eq!(bs.read_f64()?.to_bits(), 0x7FF8_0000_0000_0123);
        Ok(())
    }
}
