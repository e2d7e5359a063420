#[cfg(not(feature = "std"))]
use alloc::vec::Vec;

#[cfg(feature = "mmap")]
use std::{fs::File, path::Path};

#[cfg(feature = "mmap")]
use memmap2::{Mmap, MmapMut};

use crate::RegionError;

/// The low-level backing memory of a region.
///
/// - `Owned` is the only variant that may be reallocated
/// - the borrowed variants are views over caller memory
/// - the mapped variants exist only when feature = "mmap"
#[derive(Debug)]
pub enum Storage<'a> {
    /// Heap memory allocated and released by the region
    Owned(Vec<u8>),

    /// Writable caller memory
    Borrowed(&'a mut [u8]),

    /// Read-only caller memory
    BorrowedReadOnly(&'a [u8]),

    /// Read-only memory mapped file
    #[cfg(feature = "mmap")]
    MmapReadOnly(Mmap),

    /// Read-write memory mapped file
    #[cfg(feature = "mmap")]
    MmapReadWrite(MmapMut),
}

impl<'a> Storage<'a> {
    /// Full byte length of the backing memory
    pub fn len(&self) -> usize {
        match self {
            Storage::Owned(vec) => vec.len(),
            Storage::Borrowed(slice) => slice.len(),
            Storage::BorrowedReadOnly(slice) => slice.len(),

            #[cfg(feature = "mmap")]
            Storage::MmapReadOnly(m) => m.len(),

            #[cfg(feature = "mmap")]
            Storage::MmapReadWrite(m) => m.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn is_owned(&self) -> bool {
        matches!(self, Storage::Owned(_))
    }

    pub fn is_writable(&self) -> bool {
        match self {
            Storage::Owned(_) | Storage::Borrowed(_) => true,
            Storage::BorrowedReadOnly(_) => false,

            #[cfg(feature = "mmap")]
            Storage::MmapReadOnly(_) => false,

            #[cfg(feature = "mmap")]
            Storage::MmapReadWrite(_) => true,
        }
    }

    pub fn as_slice(&self) -> &[u8] {
        match self {
            Storage::Owned(vec) => vec.as_slice(),
            Storage::Borrowed(slice) => &**slice,
            Storage::BorrowedReadOnly(slice) => *slice,

            #[cfg(feature = "mmap")]
            Storage::MmapReadOnly(m) => m.as_ref(),

            #[cfg(feature = "mmap")]
            Storage::MmapReadWrite(m) => m.as_ref(),
        }
    }

    /// Mutable view; fails for read-only variants
    pub fn as_mut_slice(&mut self) -> Result<&mut [u8], RegionError> {
        match self {
            Storage::Owned(vec) => Ok(vec.as_mut_slice()),
            Storage::Borrowed(slice) => Ok(&mut **slice),
            Storage::BorrowedReadOnly(_) => Err(RegionError::ReadOnly),

            #[cfg(feature = "mmap")]
            Storage::MmapReadOnly(_) => Err(RegionError::ReadOnly),

            #[cfg(feature = "mmap")]
            Storage::MmapReadWrite(m) => Ok(m.as_mut()),
        }
    }

    //  Mmap constructors

    #[cfg(feature = "mmap")]
    pub fn from_mmap_readonly(path: &Path) -> Result<Self, RegionError> {
        let file = File::open(path)?;
        let mmap = unsafe { Mmap::map(&file)? };
        Ok(Storage::MmapReadOnly(mmap))
    }

    #[cfg(feature = "mmap")]
    pub fn from_mmap_readwrite(path: &Path) -> Result<Self, RegionError> {
        let file = File::options().read(true).write(true).open(path)?;
        let mmap = unsafe { MmapMut::map_mut(&file)? };
        Ok(Storage::MmapReadWrite(mmap))
    }
}
