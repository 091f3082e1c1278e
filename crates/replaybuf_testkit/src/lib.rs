//! # replaybuf testkit
//!
//! Test utilities for replaybuf.
//!
//! This crate provides:
//! - Stream fixtures over in-memory and file-backed spill stores
//! - Sources with controlled pull sizes, failures and pull accounting
//! - A fault-injecting spill store wrapper
//! - Property-based test generators using proptest
//!
//! ## Usage
//!
//! ```rust,ignore
//! use replaybuf_testkit::prelude::*;
//!
//! #[test]
//! fn replays_header() {
//!     let mut stream = memory_stream(SAMPLE_CONTENT);
//!     assert_eq!(read_chunk(&mut stream, 3).0, b"One");
//! }
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

pub mod faults;
pub mod fixtures;
pub mod generators;
pub mod sources;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::faults::*;
    pub use crate::fixtures::*;
    pub use crate::generators::*;
    pub use crate::sources::*;
}

pub use faults::*;
pub use fixtures::*;
pub use generators::*;
pub use sources::*;
