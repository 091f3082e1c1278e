//! The replay stream state machine.

use crate::config::Config;
use crate::error::{ReplayError, ReplayResult};
use crate::source::{Pulled, ReaderSource, Source};
use replaybuf_storage::{FileSpillStore, SpillStore};
use std::io::{self, Read, SeekFrom};
use std::path::Path;

/// Whether a read reached the end of the source.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReadStatus {
    /// More bytes may follow.
    Ok,
    /// The source is exhausted. May accompany a short, non-empty read.
    EndOfData,
}

/// Result of [`BufferedReplayStream::read`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReadOutcome {
    /// Bytes written to the front of the caller's buffer.
    pub len: usize,
    /// End-of-data indicator.
    pub status: ReadStatus,
}

impl ReadOutcome {
    const fn new(len: usize, status: ReadStatus) -> Self {
        Self { len, status }
    }

    /// Returns true if the source is exhausted.
    #[must_use]
    pub fn is_end(&self) -> bool {
        self.status == ReadStatus::EndOfData
    }
}

/// Where the next bytes of a read come from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Segment {
    /// Already spilled; read back from the store.
    Replay { offset: u64, len: usize },
    /// Pulled while recording but not yet committed to the store.
    Unspilled { start: usize, len: usize },
    /// Straight from the source, bypassing the store.
    Live { len: usize },
    /// Nothing left.
    Exhausted,
}

/// Replayable, seekable view over a forward-only [`Source`].
///
/// While recording, every byte pulled from the source is appended to the
/// spill store, so the stream can be rewound with [`reset`](Self::reset),
/// repositioned with [`seek`](Self::seek) or read at an offset with
/// [`read_at`](Self::read_at). [`stop`](Self::stop) ends recording for good:
/// spilled bytes are still served, then reads pass straight through to the
/// source.
///
/// # Invariants
///
/// - Store bytes `[0, buffered)` are the first `buffered` source bytes
/// - `buffered` never shrinks and is frozen after `stop`
/// - After `stop`, the cursor only moves forward
///
/// # Cleanup
///
/// [`close`](Self::close) consumes the stream and removes the spill store.
/// A stream dropped without closing still deletes a file-backed store.
///
/// Not internally synchronized; methods that advance the source take
/// `&mut self`.
#[derive(Debug)]
pub struct BufferedReplayStream<S, B = FileSpillStore> {
    source: S,
    store: B,
    config: Config,
    recording: bool,
    buffered: u64,
    position: u64,
    source_exhausted: bool,
    /// Pulled source bytes whose append has not succeeded yet. They sit
    /// directly after `buffered` in stream order.
    unspilled: Vec<u8>,
    /// Source error hit after a passthrough read had already assembled
    /// bytes; returned by the next read.
    pending_error: Option<io::Error>,
}

impl<R: Read> BufferedReplayStream<ReaderSource<R>> {
    /// Wraps a reader with the default configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the spill file cannot be created.
    pub fn from_reader(reader: R) -> ReplayResult<Self> {
        Self::new(ReaderSource::new(reader))
    }
}

impl<S: Source> BufferedReplayStream<S> {
    /// Creates a file-backed stream with the default configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the spill file cannot be created.
    pub fn new(source: S) -> ReplayResult<Self> {
        Self::with_config(source, Config::default())
    }

    /// Creates a file-backed stream.
    ///
    /// # Errors
    ///
    /// Returns an error if the spill directory or file cannot be created.
    pub fn with_config(source: S, config: Config) -> ReplayResult<Self> {
        let store = FileSpillStore::create(&config.spill_file_options())?;
        Self::with_store(source, store, config)
    }

    /// Returns the path of the spill file.
    #[must_use]
    pub fn spill_path(&self) -> &Path {
        self.store.path()
    }
}

impl<S: Source, B: SpillStore> BufferedReplayStream<S, B> {
    /// Creates a stream over a caller-supplied spill store.
    ///
    /// # Errors
    ///
    /// Returns [`ReplayError::InvalidArgument`] if the store already holds
    /// bytes, or [`ReplayError::Storage`] if its size cannot be read.
    pub fn with_store(source: S, store: B, config: Config) -> ReplayResult<Self> {
        let size = store.size()?;
        if size != 0 {
            return Err(ReplayError::InvalidArgument {
                message: format!("spill store must start empty, found {size} bytes"),
            });
        }

        Ok(Self {
            source,
            store,
            config,
            recording: true,
            buffered: 0,
            position: 0,
            source_exhausted: false,
            unspilled: Vec::new(),
            pending_error: None,
        })
    }

    /// Returns the cursor for the next read.
    #[must_use]
    pub fn position(&self) -> u64 {
        self.position
    }

    /// Returns the number of bytes committed to the spill store.
    #[must_use]
    pub fn buffered_len(&self) -> u64 {
        self.buffered
    }

    /// Returns true until [`stop`](Self::stop) is called.
    #[must_use]
    pub fn is_recording(&self) -> bool {
        self.recording
    }

    /// Returns true once the source has signaled end-of-data.
    #[must_use]
    pub fn is_source_exhausted(&self) -> bool {
        self.source_exhausted
    }

    /// Returns the spill store.
    pub fn store(&self) -> &B {
        &self.store
    }

    /// Returns the configuration.
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Reads up to `buf.len()` bytes at the cursor.
    ///
    /// While recording, missing bytes are first pulled from the source and
    /// spilled. After [`stop`](Self::stop), bytes beyond the spilled range
    /// come straight from the source.
    ///
    /// A read returns fewer bytes than requested only at the end of the
    /// source. [`ReadStatus::EndOfData`] accompanies such a short read when
    /// the end was already known from recording; when a live read after
    /// `stop` hits the end it returns [`ReadStatus::Ok`] and the next read
    /// reports `(0, EndOfData)`.
    ///
    /// # Errors
    ///
    /// Returns [`ReplayError::Source`] or [`ReplayError::Storage`] if I/O
    /// fails. Bytes spilled before the failure stay spilled and the cursor
    /// does not move. A source failure during passthrough that follows
    /// bytes already delivered in the same call is returned by the next
    /// read instead.
    pub fn read(&mut self, buf: &mut [u8]) -> ReplayResult<ReadOutcome> {
        if buf.is_empty() {
            return Ok(ReadOutcome::new(0, ReadStatus::Ok));
        }
        if let Some(err) = self.pending_error.take() {
            return Err(ReplayError::Source(err));
        }

        let needed = self.position.saturating_add(buf.len() as u64);
        if self.recording && needed > self.buffered {
            self.fill_to(needed)?;
        }

        let mut filled = 0;
        let mut live_end = false;
        while filled < buf.len() {
            let cursor = self.position + filled as u64;
            let want = buf.len() - filled;

            match self.next_segment(cursor, want) {
                Segment::Replay { offset, len } => {
                    self.store.read_at(offset, &mut buf[filled..filled + len])?;
                    filled += len;
                }
                Segment::Unspilled { start, len } => {
                    buf[filled..filled + len].copy_from_slice(&self.unspilled[start..start + len]);
                    filled += len;
                }
                Segment::Live { len } => {
                    let pulled = match self.pull_live(&mut buf[filled..filled + len]) {
                        Ok(pulled) => pulled,
                        // Live bytes already in `buf` are gone from the
                        // source; hand them out and report the error next.
                        Err(err) if filled > 0 => {
                            tracing::debug!(error = %err, filled, "live pull failed mid-read");
                            self.pending_error = Some(err);
                            break;
                        }
                        Err(err) => return Err(ReplayError::Source(err)),
                    };
                    filled += pulled.len;
                    if !pulled.more {
                        self.source_exhausted = true;
                        live_end = true;
                    }
                }
                Segment::Exhausted => break,
            }
        }

        self.position += filled as u64;

        let short = filled < buf.len();
        let status = if short && self.source_exhausted && !(live_end && filled > 0) {
            ReadStatus::EndOfData
        } else {
            ReadStatus::Ok
        };
        Ok(ReadOutcome::new(filled, status))
    }

    /// Moves the cursor and returns its new value.
    ///
    /// Seeking past the spilled range pulls and spills the gap. Seeking
    /// relative to the end drains the whole source first.
    ///
    /// # Errors
    ///
    /// - [`ReplayError::InvalidOperation`] after [`stop`](Self::stop)
    /// - [`ReplayError::InvalidArgument`] if the target is before the start
    /// - [`ReplayError::Source`] / [`ReplayError::Storage`] if buffering fails
    pub fn seek(&mut self, pos: SeekFrom) -> ReplayResult<u64> {
        self.ensure_recording("seek")?;

        let target = match pos {
            SeekFrom::Start(offset) => offset,
            SeekFrom::Current(delta) => offset_by(self.position, delta)?,
            SeekFrom::End(delta) => {
                self.fill_to(u64::MAX)?;
                tracing::debug!(buffered = self.buffered, "drained source for seek from end");
                offset_by(self.buffered, delta)?
            }
        };

        if target > self.buffered {
            self.fill_to(target)?;
        }

        self.position = target;
        Ok(target)
    }

    /// Reads up to `buf.len()` bytes starting at `offset`.
    ///
    /// Equivalent to seeking to `offset` and reading; the cursor ends up
    /// after the bytes read.
    ///
    /// # Errors
    ///
    /// Returns [`ReplayError::EndOfData`] without moving the cursor if the
    /// source ends before `offset`, plus every error of [`seek`](Self::seek)
    /// and [`read`](Self::read).
    pub fn read_at(&mut self, buf: &mut [u8], offset: u64) -> ReplayResult<ReadOutcome> {
        let previous = self.position;
        self.seek(SeekFrom::Start(offset))?;

        if self.buffered < offset {
            self.position = previous;
            return Err(ReplayError::EndOfData {
                offset,
                available: self.buffered,
            });
        }

        self.read(buf)
    }

    /// Rewinds the cursor to the start of the stream.
    ///
    /// # Errors
    ///
    /// Returns [`ReplayError::InvalidOperation`] after [`stop`](Self::stop).
    pub fn reset(&mut self) -> ReplayResult<()> {
        self.ensure_recording("reset")?;
        self.position = 0;
        Ok(())
    }

    /// Stops spilling. Irreversible and idempotent.
    ///
    /// Spilled bytes past the cursor are still served; after them, reads
    /// pass straight through to the source.
    pub fn stop(&mut self) {
        if self.recording {
            self.recording = false;
            tracing::debug!(
                position = self.position,
                buffered = self.buffered,
                "stopped recording"
            );
        }
    }

    /// Removes the spill store and releases the source.
    ///
    /// # Errors
    ///
    /// Returns [`ReplayError::Storage`] if the store cannot be removed.
    pub fn close(self) -> ReplayResult<()> {
        tracing::debug!(
            position = self.position,
            buffered = self.buffered,
            "closing replay stream"
        );
        self.store.remove()?;
        Ok(())
    }

    fn ensure_recording(&self, operation: &str) -> ReplayResult<()> {
        if self.recording {
            Ok(())
        } else {
            Err(ReplayError::InvalidOperation {
                message: format!("cannot {operation} after buffering is stopped"),
            })
        }
    }

    fn next_segment(&self, cursor: u64, want: usize) -> Segment {
        if cursor < self.buffered {
            let len = want.min(usize::try_from(self.buffered - cursor).unwrap_or(usize::MAX));
            return Segment::Replay {
                offset: cursor,
                len,
            };
        }

        let unspilled_end = self.buffered + self.unspilled.len() as u64;
        if cursor < unspilled_end {
            // Within `unspilled`, so the difference fits in usize.
            let start = (cursor - self.buffered) as usize;
            let len = want.min(self.unspilled.len() - start);
            return Segment::Unspilled { start, len };
        }

        // Past `stop` the cursor only moves forward from here, one live pull
        // at a time.
        if !self.recording && !self.source_exhausted && cursor >= unspilled_end {
            return Segment::Live { len: want };
        }

        Segment::Exhausted
    }

    /// Pulls and spills until `target` bytes are buffered or the source ends.
    fn fill_to(&mut self, target: u64) -> ReplayResult<()> {
        self.commit_unspilled()?;

        let chunk = self.config.effective_chunk_size();
        while self.buffered < target && !self.source_exhausted {
            let gap = target - self.buffered;
            let want = usize::try_from(gap).map_or(chunk, |gap| gap.min(chunk));

            self.unspilled.resize(want, 0);
            let pulled = match self.source.pull(&mut self.unspilled) {
                Ok(pulled) => pulled,
                Err(err) => {
                    self.unspilled.clear();
                    return Err(ReplayError::Source(err));
                }
            };
            self.unspilled.truncate(pulled.len);
            tracing::trace!(requested = want, bytes = pulled.len, more = pulled.more, "pulled from source");

            if !pulled.more {
                self.source_exhausted = true;
            }
            self.commit_unspilled()?;
        }

        Ok(())
    }

    fn commit_unspilled(&mut self) -> ReplayResult<()> {
        if self.unspilled.is_empty() || !self.recording {
            return Ok(());
        }

        self.store.append(&self.unspilled)?;
        self.buffered += self.unspilled.len() as u64;
        self.unspilled.clear();
        Ok(())
    }

    fn pull_live(&mut self, buf: &mut [u8]) -> io::Result<Pulled> {
        let pulled = self.source.pull(buf)?;
        tracing::trace!(requested = buf.len(), bytes = pulled.len, more = pulled.more, "passthrough pull");
        Ok(pulled)
    }
}

fn offset_by(base: u64, delta: i64) -> ReplayResult<u64> {
    base.checked_add_signed(delta)
        .ok_or_else(|| ReplayError::InvalidArgument {
            message: format!("seek target {base} {delta:+} is outside the stream"),
        })
}
