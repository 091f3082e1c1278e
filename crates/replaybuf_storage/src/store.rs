//! Spill store trait definition.

use crate::error::StorageResult;

/// A persisted, randomly readable byte log backing a replay stream.
///
/// Spill stores are **opaque byte logs**. The replay stream appends every
/// byte it pulls from its source while recording, and reads ranges back when
/// the consumer rewinds. Stores never interpret the bytes.
///
/// # Invariants
///
/// - `append` writes at the current end and returns that offset
/// - `read_at` fills the buffer with exactly the bytes previously appended
///   at that offset
/// - `size` equals the sum of all appended lengths
/// - `remove` deletes whatever the store persisted and consumes the handle
///
/// # Implementors
///
/// - [`super::FileSpillStore`] - Temporary file on disk
/// - [`super::InMemorySpillStore`] - For testing
pub trait SpillStore: Send + Sync {
    /// Appends data to the end of the store.
    ///
    /// Returns the offset where the data was written.
    ///
    /// # Errors
    ///
    /// Returns an error if an I/O error occurs.
    fn append(&mut self, data: &[u8]) -> StorageResult<u64>;

    /// Reads exactly `buf.len()` bytes starting at `offset`.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The range `[offset, offset + buf.len())` was not fully appended
    /// - An I/O error occurs
    fn read_at(&self, offset: u64, buf: &mut [u8]) -> StorageResult<()>;

    /// Returns the number of bytes appended so far.
    ///
    /// # Errors
    ///
    /// Returns an error if the size cannot be determined.
    fn size(&self) -> StorageResult<u64>;

    /// Deletes the persisted backing and releases the handle.
    ///
    /// # Errors
    ///
    /// Returns an error if the backing could not be removed. The handle is
    /// released either way.
    fn remove(self) -> StorageResult<()>
    where
        Self: Sized;
}
