//! # replaybuf core
//!
//! Replay and random access over forward-only byte sources.
//!
//! A [`BufferedReplayStream`] wraps a [`Source`] that can only be pulled
//! once, in order (a network body, a decompression pipe, an archive entry),
//! and spills every byte it pulls into a [`SpillStore`]. Consumers can then
//! rewind, seek and read at arbitrary offsets. Once replay is no longer
//! needed, [`BufferedReplayStream::stop`] turns the stream into a plain
//! forward-only passthrough so the spill file stops growing.
//!
//! ## Example
//!
//! ```rust
//! use replaybuf_core::{BufferedReplayStream, ReadStatus};
//! use std::io::Cursor;
//!
//! let mut stream = BufferedReplayStream::from_reader(Cursor::new(b"OneTwoThree".to_vec())).unwrap();
//!
//! let mut head = [0u8; 3];
//! stream.read(&mut head).unwrap();
//! assert_eq!(&head, b"One");
//!
//! // Sniffed the header; go back and hand the whole stream to a parser.
//! stream.reset().unwrap();
//! stream.stop();
//!
//! let mut all = [0u8; 11];
//! let outcome = stream.read(&mut all).unwrap();
//! assert_eq!(outcome.len, 11);
//! assert_eq!(outcome.status, ReadStatus::Ok);
//! assert_eq!(&all, b"OneTwoThree");
//!
//! stream.close().unwrap();
//! ```
//!
//! ## States
//!
//! - **Recording** (initial): every pulled byte is spilled; all operations
//!   are available.
//! - **Passthrough** (after [`BufferedReplayStream::stop`]): already spilled
//!   bytes are still served, then bytes come straight from the source.
//!   Seeking and resetting fail with [`ReplayError::InvalidOperation`].

#![deny(unsafe_code)]
#![warn(missing_docs)]

mod config;
mod error;
mod io;
mod source;
mod stream;

pub use config::{Config, DEFAULT_CHUNK_SIZE};
pub use error::{ReplayError, ReplayResult};
pub use source::{Pulled, ReaderSource, Source};
pub use stream::{BufferedReplayStream, ReadOutcome, ReadStatus};

pub use replaybuf_storage::{
    FileSpillStore, InMemorySpillStore, SpillFileOptions, SpillStore, StorageError,
};
