//! Benchmark helpers for replaybuf.

#![deny(unsafe_code)]
#![warn(missing_docs)]

pub mod utils;
