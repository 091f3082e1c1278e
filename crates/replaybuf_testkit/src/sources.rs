//! Sources with controlled behavior.
//!
//! Real producers rarely fill the whole buffer they are given, sometimes
//! fail halfway and cannot be rewound. These sources reproduce that on
//! demand.

use replaybuf_core::{Pulled, Source};
use std::io;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

/// Serves fixed content in pulls of at most `max_pull` bytes.
#[derive(Debug, Clone)]
pub struct ChunkedSource {
    data: Vec<u8>,
    offset: usize,
    max_pull: usize,
    end_with_last_chunk: bool,
}

impl ChunkedSource {
    /// Creates a source that delivers at most `max_pull` bytes per pull.
    ///
    /// End-of-data is signaled by a separate empty pull, the way readers do.
    pub fn new(data: impl Into<Vec<u8>>, max_pull: usize) -> Self {
        Self {
            data: data.into(),
            offset: 0,
            max_pull: max_pull.max(1),
            end_with_last_chunk: false,
        }
    }

    /// Signals end-of-data together with the final bytes instead of in a
    /// separate empty pull.
    #[must_use]
    pub fn end_with_last_chunk(mut self) -> Self {
        self.end_with_last_chunk = true;
        self
    }

    /// Returns the number of bytes handed out so far.
    pub fn consumed(&self) -> usize {
        self.offset
    }
}

impl Source for ChunkedSource {
    fn pull(&mut self, buf: &mut [u8]) -> io::Result<Pulled> {
        let remaining = self.data.len() - self.offset;
        if remaining == 0 {
            return Ok(Pulled::end(0));
        }

        let len = buf.len().min(self.max_pull).min(remaining);
        buf[..len].copy_from_slice(&self.data[self.offset..self.offset + len]);
        self.offset += len;

        if self.end_with_last_chunk && self.offset == self.data.len() {
            Ok(Pulled::end(len))
        } else {
            Ok(Pulled::more(len))
        }
    }
}

/// Serves content, then fails once `fail_after` bytes have been handed out.
///
/// By default every pull past the threshold fails; see
/// [`recover_after_failure`](Self::recover_after_failure).
#[derive(Debug, Clone)]
pub struct FailingSource {
    inner: ChunkedSource,
    fail_after: usize,
    kind: io::ErrorKind,
    recover: bool,
    failed: bool,
}

impl FailingSource {
    /// Creates a source that fails with `kind` after `fail_after` bytes.
    pub fn new(data: impl Into<Vec<u8>>, fail_after: usize, kind: io::ErrorKind) -> Self {
        let data = data.into();
        let max_pull = data.len().max(1);
        Self {
            inner: ChunkedSource::new(data, max_pull),
            fail_after,
            kind,
            recover: false,
            failed: false,
        }
    }

    /// Fails a single pull at the threshold, then serves the rest normally
    /// (a timeout that clears up).
    #[must_use]
    pub fn recover_after_failure(mut self) -> Self {
        self.recover = true;
        self
    }
}

impl Source for FailingSource {
    fn pull(&mut self, buf: &mut [u8]) -> io::Result<Pulled> {
        if self.recover && self.failed {
            return self.inner.pull(buf);
        }

        let allowed = self.fail_after.saturating_sub(self.inner.consumed());
        if allowed == 0 {
            self.failed = true;
            return Err(io::Error::new(self.kind, "simulated source failure"));
        }

        let len = buf.len().min(allowed);
        self.inner.pull(&mut buf[..len])
    }
}

/// Pull statistics shared between a [`CountingSource`] and the test.
#[derive(Debug, Default)]
pub struct PullStats {
    pulls: AtomicUsize,
    bytes: AtomicUsize,
}

impl PullStats {
    /// Number of pulls made.
    pub fn pulls(&self) -> usize {
        self.pulls.load(Ordering::SeqCst)
    }

    /// Number of bytes delivered.
    pub fn bytes(&self) -> usize {
        self.bytes.load(Ordering::SeqCst)
    }
}

/// Wraps a source and records every pull.
#[derive(Debug)]
pub struct CountingSource<S> {
    inner: S,
    stats: Arc<PullStats>,
}

impl<S: Source> CountingSource<S> {
    /// Wraps `inner`; keep the returned stats handle to inspect pulls after
    /// the source has been moved into a stream.
    pub fn new(inner: S) -> (Self, Arc<PullStats>) {
        let stats = Arc::new(PullStats::default());
        (
            Self {
                inner,
                stats: Arc::clone(&stats),
            },
            stats,
        )
    }
}

impl<S: Source> Source for CountingSource<S> {
    fn pull(&mut self, buf: &mut [u8]) -> io::Result<Pulled> {
        let pulled = self.inner.pull(buf)?;
        self.stats.pulls.fetch_add(1, Ordering::SeqCst);
        self.stats.bytes.fetch_add(pulled.len, Ordering::SeqCst);
        Ok(pulled)
    }
}
