//! What a reset binds the cursor to.

use raw_region::Access;

/// Current state of a [`BitStreamer`](crate::BitStreamer).
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum Mode {
    /// Nothing bound; every read and write fails.
    #[default]
    Idle,
    Reading,
    Writing,
}

impl From<Access> for Mode {
    fn from(access: Access) -> Self {
        match access {
            Access::Read => Mode::Reading,
            Access::Write => Mode::Writing,
        }
    }
}

/// Memory source for [`BitStreamer::reset`](crate::BitStreamer::reset).
///
/// `'s` is only borrowed for the duration of the reset (the data is copied or
/// only names a file); `'a` is borrowed for as long as the streamer uses it.
#[derive(Debug)]
pub enum Binding<'s, 'a> {
    /// Keep the bound region. Writing zero-fills an owned region and allocates
    /// [`DEFAULT_SIZE`](raw_region::DEFAULT_SIZE) bytes when nothing is bound;
    /// reading requires a bound region.
    Reuse,

    /// An owned region of at least this many bytes (0 means the default size).
    /// Writing only.
    NewOwned(usize),

    /// An owned copy of the bytes. A writer is positioned after them, a reader
    /// at the start.
    AdoptCopied(&'s [u8]),

    /// Caller memory, used in place and never grown.
    AdoptBorrowed(&'a mut [u8]),

    /// Read-only caller memory. Reading only.
    AdoptBorrowedReadOnly(&'a [u8]),

    /// A memory-mapped file, treated like borrowed memory.
    #[cfg(feature = "mmap")]
    MapFile(&'s std::path::Path),
}
