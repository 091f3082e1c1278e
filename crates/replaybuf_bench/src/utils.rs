//! Benchmark utilities.

use rand::Rng;
use replaybuf_core::{BufferedReplayStream, Config, InMemorySpillStore, ReaderSource};
use std::io::Cursor;
use std::path::Path;

/// Generate random source content of the specified size.
pub fn random_data(size: usize) -> Vec<u8> {
    let mut rng = rand::thread_rng();
    (0..size).map(|_| rng.gen()).collect()
}

/// A stream over `data` spilling into memory.
pub fn memory_stream(
    data: &[u8],
) -> BufferedReplayStream<ReaderSource<Cursor<Vec<u8>>>, InMemorySpillStore> {
    BufferedReplayStream::with_store(
        ReaderSource::new(Cursor::new(data.to_vec())),
        InMemorySpillStore::new(),
        Config::default(),
    )
    .expect("Failed to create stream")
}

/// A stream over `data` spilling into a file under `dir`.
pub fn file_stream(dir: &Path, data: &[u8]) -> BufferedReplayStream<ReaderSource<Cursor<Vec<u8>>>> {
    let config = Config::new().backing_store_name("bench-spill").spill_dir(dir);
    BufferedReplayStream::with_config(ReaderSource::new(Cursor::new(data.to_vec())), config)
        .expect("Failed to create spill file")
}

/// Drains a `Read` in `step`-sized reads, returning the byte count.
pub fn drain<R: std::io::Read>(reader: &mut R, step: usize) -> usize {
    let mut buf = vec![0u8; step];
    let mut total = 0;
    loop {
        let n = reader.read(&mut buf).expect("read failed");
        if n == 0 {
            return total;
        }
        total += n;
    }
}
