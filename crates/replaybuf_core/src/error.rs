//! Error types for replay stream operations.

use replaybuf_storage::StorageError;
use std::io;
use thiserror::Error;

/// Result type for replay stream operations.
pub type ReplayResult<T> = Result<T, ReplayError>;

/// Errors that can occur in replay stream operations.
///
/// Reaching the end of the source during a plain read is not an error; it is
/// reported through [`crate::ReadStatus::EndOfData`].
#[derive(Debug, Error)]
pub enum ReplayError {
    /// The source failed for a reason other than end-of-data.
    #[error("source error: {0}")]
    Source(#[source] io::Error),

    /// The spill store could not be allocated, written, read or removed.
    #[error("spill store error: {0}")]
    Storage(#[from] StorageError),

    /// Operation not permitted in the current state.
    #[error("invalid operation: {message}")]
    InvalidOperation {
        /// Description of why the operation is invalid.
        message: String,
    },

    /// An argument resolved to an invalid position.
    #[error("invalid argument: {message}")]
    InvalidArgument {
        /// Description of the invalid argument.
        message: String,
    },

    /// The source ended before the requested offset.
    #[error("end of data: offset {offset} is past the {available} bytes the source produced")]
    EndOfData {
        /// The requested offset.
        offset: u64,
        /// Bytes the source produced in total.
        available: u64,
    },
}

impl From<ReplayError> for io::Error {
    fn from(err: ReplayError) -> Self {
        match err {
            ReplayError::Source(err) => err,
            ReplayError::Storage(StorageError::Io(err)) => err,
            ReplayError::InvalidOperation { .. } => {
                io::Error::new(io::ErrorKind::Unsupported, err)
            }
            ReplayError::InvalidArgument { .. } => {
                io::Error::new(io::ErrorKind::InvalidInput, err)
            }
            ReplayError::EndOfData { .. } => io::Error::new(io::ErrorKind::UnexpectedEof, err),
            other => io::Error::new(io::ErrorKind::Other, other),
        }
    }
}
