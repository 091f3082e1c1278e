//! Error types for spill store operations.

use std::io;
use thiserror::Error;

/// Result type for spill store operations.
pub type StorageResult<T> = Result<T, StorageError>;

/// Errors that can occur during spill store operations.
#[derive(Debug, Error)]
pub enum StorageError {
    /// An I/O error occurred (disk full, permission denied, file deleted).
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Attempted to read bytes that were never appended.
    #[error("read beyond end of spill store: offset {offset}, len {len}, size {size}")]
    ReadPastEnd {
        /// The requested read offset.
        offset: u64,
        /// The requested read length.
        len: usize,
        /// The current store size.
        size: u64,
    },
}
