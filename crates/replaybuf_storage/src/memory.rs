//! In-memory spill store for testing.

use crate::error::{StorageError, StorageResult};
use crate::store::SpillStore;
use parking_lot::RwLock;

/// An in-memory spill store.
///
/// This store keeps all spilled bytes in memory and is suitable for:
/// - Unit tests
/// - Integration tests
/// - Small sources where a temporary file is not worth it
///
/// # Example
///
/// ```rust
/// use replaybuf_storage::{SpillStore, InMemorySpillStore};
///
/// let mut store = InMemorySpillStore::new();
/// let offset = store.append(b"test data").unwrap();
/// assert_eq!(offset, 0);
/// assert_eq!(store.size().unwrap(), 9);
/// ```
#[derive(Debug, Default)]
pub struct InMemorySpillStore {
    data: RwLock<Vec<u8>>,
}

impl InMemorySpillStore {
    /// Creates a new empty in-memory store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a copy of all spilled bytes.
    ///
    /// Useful for testing and debugging.
    #[must_use]
    pub fn data(&self) -> Vec<u8> {
        self.data.read().clone()
    }
}

impl SpillStore for InMemorySpillStore {
    fn append(&mut self, new_data: &[u8]) -> StorageResult<u64> {
        let data = self.data.get_mut();
        let offset = data.len() as u64;
        data.extend_from_slice(new_data);
        Ok(offset)
    }

    fn read_at(&self, offset: u64, buf: &mut [u8]) -> StorageResult<()> {
        let data = self.data.read();
        let size = data.len() as u64;
        let len = buf.len();
        let end = offset.saturating_add(len as u64);

        if offset > size || end > size {
            return Err(StorageError::ReadPastEnd { offset, len, size });
        }

        let start = offset as usize;
        buf.copy_from_slice(&data[start..start + len]);
        Ok(())
    }

    fn size(&self) -> StorageResult<u64> {
        Ok(self.data.read().len() as u64)
    }

    fn remove(self) -> StorageResult<()> {
        Ok(())
    }
}
