//! `std::io` adapters so a replay stream can feed any `Read + Seek` consumer.

use crate::source::Source;
use crate::stream::BufferedReplayStream;
use replaybuf_storage::SpillStore;
use std::io::{self, Read, Seek, SeekFrom};

impl<S: Source, B: SpillStore> Read for BufferedReplayStream<S, B> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        let outcome = BufferedReplayStream::read(self, buf)?;
        Ok(outcome.len)
    }
}

impl<S: Source, B: SpillStore> Seek for BufferedReplayStream<S, B> {
    fn seek(&mut self, pos: SeekFrom) -> io::Result<u64> {
        Ok(BufferedReplayStream::seek(self, pos)?)
    }

    // Still answerable after `stop`, unlike a zero-length relative seek.
    fn stream_position(&mut self) -> io::Result<u64> {
        Ok(self.position())
    }
}
