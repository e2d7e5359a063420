use crate::{Access, RegionError, Storage, WORD_SIZE, word_capacity, word_floor};
use tracing::{debug, trace};

#[cfg(not(feature = "std"))]
use alloc::vec;

/// A byte region bound to a cursor, tagged with who owns it.
///
/// `Region` decides what memory a reset uses and how far it may grow:
///
/// - **Owned** regions are always a whole number of words long, are zero
///   filled when (re)acquired, and grow on demand.
/// - **Borrowed** regions wrap caller memory. They never grow. When bound for
///   writing only the largest whole-word prefix is exposed; when bound for
///   reading the full extent is.
///
/// # Examples
///
/// ```
/// use raw_region::{Access, Region};
///
/// // Requesting 7 bytes yields one word.
/// let mut region = Region::allocate(7);
/// assert_eq!(region.window(Access::Write), 8);
///
/// // Growth keeps the contents and rounds up to a word.
/// region.as_mut_slice().unwrap()[0] = 0xAB;
/// region.grow(9).unwrap();
/// assert_eq!(region.extent(), 16);
/// assert_eq!(region.as_slice()[0], 0xAB);
/// ```
///
/// Borrowed memory is never reallocated:
///
/// ```
/// use raw_region::{Region, RegionError};
///
/// let mut backing = [0u8; 9];
/// let mut region = Region::borrowed(&mut backing);
/// assert!(matches!(region.grow(16), Err(RegionError::NotGrowable { .. })));
/// ```
#[derive(Debug)]
pub struct Region<'a> {
    storage: Storage<'a>,
}

impl<'a> Region<'a> {
    /// Allocates a zero-filled owned region of `word_capacity(size)` bytes.
    pub fn allocate(size: usize) -> Self {
        let bytes = word_capacity(size);
        debug!(bytes, "allocating owned region");
        Region {
            storage: Storage::Owned(vec![0u8; bytes]),
        }
    }

    /// Allocates an owned region holding a copy of `bytes`, zero-filled past them.
    pub fn copied(bytes: &[u8]) -> Self {
        let mut region = Self::allocate(bytes.len());
        region.load(bytes);
        region
    }

    /// Wraps writable caller memory without copying.
    pub fn borrowed(bytes: &'a mut [u8]) -> Self {
        debug!(bytes = bytes.len(), "adopting borrowed region");
        Region {
            storage: Storage::Borrowed(bytes),
        }
    }

    /// Wraps read-only caller memory without copying.
    pub fn borrowed_read_only(bytes: &'a [u8]) -> Self {
        debug!(bytes = bytes.len(), "adopting read-only region");
        Region {
            storage: Storage::BorrowedReadOnly(bytes),
        }
    }

    /// Maps a file read-only. The mapping is a non-owned region.
    #[cfg(feature = "mmap")]
    pub fn map_readonly<P: AsRef<std::path::Path>>(path: P) -> Result<Self, RegionError> {
        let storage = Storage::from_mmap_readonly(path.as_ref())?;
        debug!(bytes = storage.len(), "mapped file read-only");
        Ok(Region { storage })
    }

    /// Maps a file read-write. The mapping is a non-owned region.
    #[cfg(feature = "mmap")]
    pub fn map_readwrite<P: AsRef<std::path::Path>>(path: P) -> Result<Self, RegionError> {
        let storage = Storage::from_mmap_readwrite(path.as_ref())?;
        debug!(bytes = storage.len(), "mapped file read-write");
        Ok(Region { storage })
    }

    /// Returns `current` zero-filled if it is an owned region of at least
    /// `word_capacity(size)` bytes, otherwise a freshly allocated one.
    ///
    /// A borrowed `current` is simply dropped; the caller's memory is untouched.
    pub fn reuse_or_allocate(current: Option<Self>, size: usize) -> Self {
        match current {
            Some(mut region) if region.fits(size) => {
                trace!(bytes = region.extent(), "reusing owned region");
                region.zero();
                region
            }
            _ => Self::allocate(size),
        }
    }

    /// Like [`Region::reuse_or_allocate`], then copies `bytes` to the start of the region.
    pub fn reuse_or_copy(current: Option<Self>, bytes: &[u8]) -> Self {
        match current {
            Some(mut region) if region.fits(bytes.len()) => {
                trace!(bytes = bytes.len(), "copying into reused owned region");
                region.load(bytes);
                region
            }
            _ => Self::copied(bytes),
        }
    }

    #[inline]
    pub fn is_owned(&self) -> bool {
        self.storage.is_owned()
    }

    #[inline]
    pub fn is_writable(&self) -> bool {
        self.storage.is_writable()
    }

    /// Full byte length of the underlying memory.
    #[inline]
    pub fn extent(&self) -> usize {
        self.storage.len()
    }

    /// Bytes a cursor bound for `access` may touch.
    ///
    /// Writes over non-owned memory stop at the last whole word, since a
    /// partial trailing word would reach past memory the region may not own.
    pub fn window(&self, access: Access) -> usize {
        match access {
            Access::Write if !self.is_owned() => word_floor(self.extent()),
            _ => self.extent(),
        }
    }

    /// Whether this is an owned region already holding `word_capacity(size)` bytes.
    pub fn fits(&self, size: usize) -> bool {
        self.is_owned() && self.extent() >= word_capacity(size)
    }

    #[inline]
    pub fn as_slice(&self) -> &[u8] {
        self.storage.as_slice()
    }

    #[inline]
    pub fn as_mut_slice(&mut self) -> Result<&mut [u8], RegionError> {
        self.storage.as_mut_slice()
    }

    /// Zero-fills an owned region. Caller memory is never cleared.
    pub fn zero(&mut self) {
        if let Storage::Owned(vec) = &mut self.storage {
            vec.fill(0);
        }
    }

    /// Grows an owned region to hold at least `required` bytes, keeping its
    /// contents and zero-filling the new tail.
    ///
    /// # Errors
    ///
    /// - `RegionError::NotGrowable` if the region is not owned
    /// - `RegionError::AllocationFailed` if the allocator refuses the new size;
    ///   the region keeps its old contents and extent
    pub fn grow(&mut self, required: usize) -> Result<(), RegionError> {
        let capacity = self.extent();
        match &mut self.storage {
            Storage::Owned(vec) => {
                let bytes = required
                    .checked_next_multiple_of(WORD_SIZE)
                    .ok_or(RegionError::AllocationFailed { required })?;
                if bytes > vec.len() {
                    trace!(from = vec.len(), to = bytes, "growing owned region");
                    vec.try_reserve_exact(bytes - vec.len())
                        .map_err(|_| RegionError::AllocationFailed { required })?;
                    vec.resize(bytes, 0);
                }
                Ok(())
            }
            _ => Err(RegionError::NotGrowable { required, capacity }),
        }
    }

    // Precondition: owned and large enough.
    fn load(&mut self, bytes: &[u8]) {
        if let Storage::Owned(vec) = &mut self.storage {
            debug_assert!(vec.len() >= bytes.len() && vec.len() % WORD_SIZE == 0);
            vec[..bytes.len()].copy_from_slice(bytes);
            vec[bytes.len()..].fill(0);
        }
    }
}
