//! Test fixtures and stream helpers.

use replaybuf_core::{
    BufferedReplayStream, Config, InMemorySpillStore, ReadStatus, ReaderSource, Source,
    SpillStore,
};
use std::io::Cursor;
use std::path::Path;

/// The content used throughout the replay examples.
pub const SAMPLE_CONTENT: &[u8] = b"OneTwoThreeFourFive";

/// A stream over an in-memory reader and an in-memory spill store.
pub type MemoryStream = BufferedReplayStream<ReaderSource<Cursor<Vec<u8>>>, InMemorySpillStore>;

/// Creates a stream over `content` that spills into memory.
pub fn memory_stream(content: &[u8]) -> MemoryStream {
    BufferedReplayStream::with_store(
        ReaderSource::new(Cursor::new(content.to_vec())),
        InMemorySpillStore::new(),
        Config::default(),
    )
    .expect("Failed to create memory stream")
}

/// Creates a stream over `source` that spills into memory.
pub fn memory_stream_from<S: Source>(source: S) -> BufferedReplayStream<S, InMemorySpillStore> {
    BufferedReplayStream::with_store(source, InMemorySpillStore::new(), Config::default())
        .expect("Failed to create memory stream")
}

/// Creates a file-backed stream over `content` with its spill file in `dir`.
pub fn file_stream_in(
    dir: &Path,
    content: &[u8],
) -> BufferedReplayStream<ReaderSource<Cursor<Vec<u8>>>> {
    let config = Config::new().backing_store_name("testkit-spill").spill_dir(dir);
    BufferedReplayStream::with_config(ReaderSource::new(Cursor::new(content.to_vec())), config)
        .expect("Failed to create file-backed stream")
}

/// Reads up to `n` bytes, returning exactly what was delivered.
pub fn read_chunk<S: Source, B: SpillStore>(
    stream: &mut BufferedReplayStream<S, B>,
    n: usize,
) -> (Vec<u8>, ReadStatus) {
    let mut buf = vec![0u8; n];
    let outcome = stream.read(&mut buf).expect("read failed");
    buf.truncate(outcome.len);
    (buf, outcome.status)
}

/// Reads in steps of the given sizes until the plan ends or the stream
/// reports end-of-data. Zero-sized steps are skipped.
pub fn read_with_plan<S: Source, B: SpillStore>(
    stream: &mut BufferedReplayStream<S, B>,
    plan: &[usize],
) -> Vec<u8> {
    let mut out = Vec::new();
    for &n in plan {
        if n == 0 {
            continue;
        }
        let (bytes, status) = read_chunk(stream, n);
        out.extend_from_slice(&bytes);
        if status == ReadStatus::EndOfData {
            break;
        }
    }
    out
}

/// Reads until end-of-data in steps of `step` bytes.
pub fn read_to_end<S: Source, B: SpillStore>(
    stream: &mut BufferedReplayStream<S, B>,
    step: usize,
) -> Vec<u8> {
    let step = step.max(1);
    let mut out = Vec::new();
    loop {
        let (bytes, status) = read_chunk(stream, step);
        let empty = bytes.is_empty();
        out.extend_from_slice(&bytes);
        if status == ReadStatus::EndOfData || empty {
            return out;
        }
    }
}
