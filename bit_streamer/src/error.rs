use crate::Mode;
use raw_region::RegionError;
#[cfg(feature = "std")]
use thiserror::Error;

/// Broad category of a [`StreamError`].
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ErrorKind {
    /// The cursor is in the wrong mode or has nothing bound.
    InvalidState,
    /// A write would pass the end of a region that cannot grow, or growing
    /// an owned region failed to allocate.
    CapacityExceeded,
    /// A read, index, bit count or length is outside its allowed range.
    OutOfRange,
    /// An argument can never be valid for the requested operation.
    InvalidArgument,
    /// Mapping a file failed.
    Io,
}

#[cfg_attr(feature = "std", derive(Error))]
#[derive(Debug)]
pub enum StreamError {
    #[cfg_attr(feature = "std", error("expected {expected:?} mode, cursor is {found:?}"))]
    InvalidMode { expected: Mode, found: Mode },

    #[cfg_attr(feature = "std", error("no region is bound"))]
    Unbound,

    #[cfg_attr(
        feature = "std",
        error("an owned region is bound; release it before adopting external memory")
    )]
    OwnedRegionHeld,

    #[cfg_attr(feature = "std", error("no size prefix has been reserved"))]
    PrefixNotReserved,

    #[cfg_attr(
        feature = "std",
        error("writing needs {required} bits but the region is fixed at {capacity} bits")
    )]
    CapacityExceeded { required: usize, capacity: usize },

    #[cfg_attr(
        feature = "std",
        error("reading {requested} bits at bit {offset} passes the end at bit {length}")
    )]
    ReadPastEnd {
        offset: usize,
        requested: usize,
        length: usize,
    },

    #[cfg_attr(feature = "std", error("bit count must be in 1..={max}, got {bits}"))]
    InvalidBitCount { bits: u32, max: u32 },

    #[cfg_attr(
        feature = "std",
        error("range {offset}+{count} is out of bounds for length {len}")
    )]
    RangeOutOfBounds {
        offset: usize,
        count: usize,
        len: usize,
    },

    #[cfg_attr(
        feature = "std",
        error("encoded string is {len} bytes, the maximum is {max}")
    )]
    StringTooLong { len: usize, max: usize },

    #[cfg_attr(feature = "std", error("frame of {0} bytes does not fit a 32-bit prefix"))]
    PrefixOverflow(usize),

    #[cfg_attr(feature = "std", error("region is read-only"))]
    ReadOnlyRegion,

    #[cfg_attr(feature = "std", error("a read cursor must be given data"))]
    NoData,

    #[cfg_attr(feature = "std", error("destination holds no characters"))]
    EmptyDestination,

    #[cfg_attr(feature = "std", error("region error: {0}"))]
    Region(#[cfg_attr(feature = "std", from)] RegionError),
}

impl StreamError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            StreamError::InvalidMode { .. }
            | StreamError::Unbound
            | StreamError::OwnedRegionHeld
            | StreamError::PrefixNotReserved => ErrorKind::InvalidState,

            StreamError::CapacityExceeded { .. } => ErrorKind::CapacityExceeded,

            StreamError::ReadPastEnd { .. }
            | StreamError::InvalidBitCount { .. }
            | StreamError::RangeOutOfBounds { .. }
            | StreamError::StringTooLong { .. }
            | StreamError::PrefixOverflow(_) => ErrorKind::OutOfRange,

            StreamError::ReadOnlyRegion | StreamError::NoData | StreamError::EmptyDestination => {
                ErrorKind::InvalidArgument
            }

            StreamError::Region(err) => match err {
                RegionError::NotGrowable { .. } | RegionError::AllocationFailed { .. } => {
                    ErrorKind::CapacityExceeded
                }
                RegionError::ReadOnly => ErrorKind::InvalidArgument,
                #[cfg(feature = "mmap")]
                RegionError::Io(_) => ErrorKind::Io,
            },
        }
    }
}

#[cfg(not(feature = "std"))]
impl From<RegionError> for StreamError {
    fn from(err: RegionError) -> Self {
        StreamError::Region(err)
    }
}

#[cfg(not(feature = "std"))]
impl core::fmt::Display for StreamError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            StreamError::InvalidMode { expected, found } => {
                write!(f, "expected {:?} mode, cursor is {:?}", expected, found)
            }
            StreamError::Unbound => write!(f, "no region is bound"),
            StreamError::OwnedRegionHeld => write!(
                f,
                "an owned region is bound; release it before adopting external memory"
            ),
            StreamError::PrefixNotReserved => write!(f, "no size prefix has been reserved"),
            StreamError::CapacityExceeded { required, capacity } => write!(
                f,
                "writing needs {} bits but the region is fixed at {} bits",
                required, capacity
            ),
            StreamError::ReadPastEnd {
                offset,
                requested,
                length,
            } => write!(
                f,
                "reading {} bits at bit {} passes the end at bit {}",
                requested, offset, length
            ),
            StreamError::InvalidBitCount { bits, max } => {
                write!(f, "bit count must be in 1..={}, got {}", max, bits)
            }
            StreamError::RangeOutOfBounds { offset, count, len } => write!(
                f,
                "range {}+{} is out of bounds for length {}",
                offset, count, len
            ),
            StreamError::StringTooLong { len, max } => write!(
                f,
                "encoded string is {} bytes, the maximum is {}",
                len, max
            ),
            StreamError::PrefixOverflow(n) => {
                write!(f, "frame of {} bytes does not fit a 32-bit prefix", n)
            }
            StreamError::ReadOnlyRegion => write!(f, "region is read-only"),
            StreamError::NoData => write!(f, "a read cursor must be given data"),
            StreamError::EmptyDestination => write!(f, "destination holds no characters"),
            StreamError::Region(e) => write!(f, "region error: {}", e),
        }
    }
}
