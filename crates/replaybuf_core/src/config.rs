//! Stream configuration.

use replaybuf_storage::{SpillFileOptions, DEFAULT_SPILL_PREFIX};
use std::path::PathBuf;

/// Default upper bound on bytes requested per source pull while buffering.
pub const DEFAULT_CHUNK_SIZE: usize = 8 * 1024;

/// Configuration for a replay stream.
///
/// Only the spill file's name and location and the pull granularity are
/// configurable; replay semantics are fixed.
#[derive(Debug, Clone)]
pub struct Config {
    /// Prefix for the spill file name.
    pub backing_store_name: String,

    /// Directory for the spill file (`None` = OS temp directory).
    pub spill_dir: Option<PathBuf>,

    /// Maximum bytes requested from the source in one pull when filling the
    /// spill store.
    pub chunk_size: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            backing_store_name: DEFAULT_SPILL_PREFIX.to_string(),
            spill_dir: None,
            chunk_size: DEFAULT_CHUNK_SIZE, // 8 KiB
        }
    }
}

impl Config {
    /// Creates a new configuration with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the spill file name prefix.
    #[must_use]
    pub fn backing_store_name(mut self, name: impl Into<String>) -> Self {
        self.backing_store_name = name.into();
        self
    }

    /// Sets the directory the spill file is created in.
    #[must_use]
    pub fn spill_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.spill_dir = Some(dir.into());
        self
    }

    /// Sets the maximum bytes per source pull while buffering.
    #[must_use]
    pub const fn chunk_size(mut self, size: usize) -> Self {
        self.chunk_size = size;
        self
    }

    /// Pull size actually used; never zero.
    pub(crate) fn effective_chunk_size(&self) -> usize {
        self.chunk_size.max(1)
    }

    /// Spill file options derived from this configuration.
    #[must_use]
    pub fn spill_file_options(&self) -> SpillFileOptions {
        SpillFileOptions {
            prefix: self.backing_store_name.clone(),
            dir: self.spill_dir.clone(),
        }
    }
}
