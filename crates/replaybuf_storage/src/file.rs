//! File-based spill store backed by a uniquely named temporary file.

use crate::error::{StorageError, StorageResult};
use crate::store::SpillStore;
use parking_lot::Mutex;
use std::fs::File;
use std::io::{Read, Seek, SeekFrom, Write};
use std::path::{Path, PathBuf};
use tempfile::{Builder, TempPath};

/// Default file name prefix for spill files.
pub const DEFAULT_SPILL_PREFIX: &str = "disk-buffer-file";

/// Naming and placement of a spill file.
#[derive(Debug, Clone)]
pub struct SpillFileOptions {
    /// Prefix of the generated file name. A random suffix keeps every
    /// instance unique.
    pub prefix: String,

    /// Directory to create the file in. `None` uses the OS temp directory.
    pub dir: Option<PathBuf>,
}

impl Default for SpillFileOptions {
    fn default() -> Self {
        Self {
            prefix: DEFAULT_SPILL_PREFIX.to_string(),
            dir: None,
        }
    }
}

/// A spill store living in a temporary file.
///
/// The file is created fresh for each store and deleted when the store is
/// removed. If the store is dropped without [`SpillStore::remove`] (panic,
/// early return), the file is still deleted on a best-effort basis.
///
/// # Thread Safety
///
/// Positional reads take `&self`, so the file cursor is guarded by a mutex.
///
/// # Example
///
/// ```no_run
/// use replaybuf_storage::{FileSpillStore, SpillFileOptions, SpillStore};
///
/// let mut store = FileSpillStore::create(&SpillFileOptions::default()).unwrap();
/// store.append(b"spilled bytes").unwrap();
/// let path = store.path().to_path_buf();
/// store.remove().unwrap();
/// assert!(!path.exists());
/// ```
#[derive(Debug)]
pub struct FileSpillStore {
    file: Mutex<File>,
    path: TempPath,
    size: u64,
}

impl FileSpillStore {
    /// Creates a new, empty spill file according to `options`.
    ///
    /// The target directory is created if it does not exist.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory or the file cannot be created.
    pub fn create(options: &SpillFileOptions) -> StorageResult<Self> {
        let mut builder = Builder::new();
        builder.prefix(&options.prefix);

        let named = match &options.dir {
            Some(dir) => {
                std::fs::create_dir_all(dir)?;
                builder.tempfile_in(dir)?
            }
            None => builder.tempfile()?,
        };
        let (file, path) = named.into_parts();

        tracing::debug!(path = %path.display(), "allocated spill file");

        Ok(Self {
            file: Mutex::new(file),
            path,
            size: 0,
        })
    }

    /// Returns the path to the underlying file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl SpillStore for FileSpillStore {
    fn append(&mut self, data: &[u8]) -> StorageResult<u64> {
        let offset = self.size;
        if data.is_empty() {
            return Ok(offset);
        }

        // Writing at the committed size overwrites any tail left behind by
        // an earlier append that failed halfway.
        let file = self.file.get_mut();
        file.seek(SeekFrom::Start(offset))?;
        file.write_all(data)?;
        self.size += data.len() as u64;

        tracing::trace!(offset, bytes = data.len(), "spilled bytes");
        Ok(offset)
    }

    fn read_at(&self, offset: u64, buf: &mut [u8]) -> StorageResult<()> {
        let len = buf.len();
        let end = offset.saturating_add(len as u64);

        if offset > self.size || end > self.size {
            return Err(StorageError::ReadPastEnd {
                offset,
                len,
                size: self.size,
            });
        }

        if len == 0 {
            return Ok(());
        }

        let mut file = self.file.lock();
        file.seek(SeekFrom::Start(offset))?;
        file.read_exact(buf)?;

        Ok(())
    }

    fn size(&self) -> StorageResult<u64> {
        Ok(self.size)
    }

    fn remove(self) -> StorageResult<()> {
        let Self { file, path, .. } = self;
        // Release the handle before unlinking so removal also works where
        // open files cannot be deleted.
        drop(file);

        let shown = path.display().to_string();
        path.close().map_err(|err| {
            tracing::warn!(path = %shown, error = %err, "failed to remove spill file");
            StorageError::Io(err)
        })?;

        tracing::debug!(path = %shown, "removed spill file");
        Ok(())
    }
}
