#[cfg(feature = "std")]
use thiserror::Error;

/// Region errors
#[cfg_attr(feature = "std", derive(Error))]
#[derive(Debug)]
pub enum RegionError {
    /// The region is not owned, so it cannot be reallocated to the required size.
    #[cfg_attr(
        feature = "std",
        error("borrowed region of {capacity} bytes cannot grow to {required} bytes")
    )]
    NotGrowable { required: usize, capacity: usize },

    /// The allocator could not provide the grown size.
    #[cfg_attr(
        feature = "std",
        error("allocation failed while growing to {required} bytes")
    )]
    AllocationFailed { required: usize },

    /// Mutable access was requested on read-only memory.
    #[cfg_attr(feature = "std", error("region is read-only"))]
    ReadOnly,

    /// IO error while mapping a file
    #[cfg(feature = "mmap")]
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

#[cfg(not(feature = "std"))]
impl core::fmt::Display for RegionError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            RegionError::NotGrowable { required, capacity } => write!(
                f,
                "borrowed region of {} bytes cannot grow to {} bytes",
                capacity, required
            ),
            RegionError::AllocationFailed { required } => {
                write!(f, "allocation failed while growing to {} bytes", required)
            }
            RegionError::ReadOnly => write!(f, "region is read-only"),
        }
    }
}
