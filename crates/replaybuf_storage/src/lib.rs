//! # replaybuf storage
//!
//! Spill store trait and implementations for replaybuf.
//!
//! A spill store holds the bytes a replay stream has already pulled from its
//! source, so they can be read again after the source has moved on. Stores
//! are **opaque append-only byte logs** - they know nothing about sources,
//! cursors or recording state.
//!
//! ## Design Principles
//!
//! - Stores are simple byte logs (append, positional read, remove)
//! - Bytes are only ever appended, never rewritten or compacted
//! - A store belongs to exactly one stream and is removed with it
//! - Must be `Send + Sync` so a stream can move between threads
//!
//! ## Available Stores
//!
//! - [`FileSpillStore`] - Uniquely named temporary file, deleted on removal
//! - [`InMemorySpillStore`] - For testing and small ephemeral sources
//!
//! ## Example
//!
//! ```rust
//! use replaybuf_storage::{SpillStore, InMemorySpillStore};
//!
//! let mut store = InMemorySpillStore::new();
//! let offset = store.append(b"hello world").unwrap();
//! let mut buf = [0u8; 5];
//! store.read_at(offset + 6, &mut buf).unwrap();
//! assert_eq!(&buf, b"world");
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

mod error;
mod file;
mod memory;
mod store;

pub use error::{StorageError, StorageResult};
pub use file::{FileSpillStore, SpillFileOptions, DEFAULT_SPILL_PREFIX};
pub use memory::InMemorySpillStore;
pub use store::SpillStore;
