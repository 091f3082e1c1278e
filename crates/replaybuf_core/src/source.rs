//! Forward-only byte sources.

use std::io::{self, Read};

/// Result of a single [`Source::pull`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pulled {
    /// Bytes written to the front of the caller's buffer.
    pub len: usize,
    /// `false` once the source has signaled end-of-data. The final bytes may
    /// arrive in the same pull as the signal.
    pub more: bool,
}

impl Pulled {
    /// `len` bytes delivered, more may follow.
    #[must_use]
    pub const fn more(len: usize) -> Self {
        Self { len, more: true }
    }

    /// `len` final bytes delivered, end-of-data reached.
    #[must_use]
    pub const fn end(len: usize) -> Self {
        Self { len, more: false }
    }
}

/// A sequential, non-rewindable byte producer.
///
/// # Contract
///
/// - Bytes are produced once, in order
/// - A pull may deliver fewer bytes than requested without ending
/// - A pull should block until it can deliver at least one byte or report
///   end-of-data; a source that keeps returning zero bytes with `more` set
///   stalls the caller
/// - Errors are returned verbatim and never retried by the replay stream
pub trait Source {
    /// Pulls up to `buf.len()` bytes into the front of `buf`.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying producer fails.
    fn pull(&mut self, buf: &mut [u8]) -> io::Result<Pulled>;
}

impl<S: Source + ?Sized> Source for &mut S {
    fn pull(&mut self, buf: &mut [u8]) -> io::Result<Pulled> {
        (**self).pull(buf)
    }
}

impl<S: Source + ?Sized> Source for Box<S> {
    fn pull(&mut self, buf: &mut [u8]) -> io::Result<Pulled> {
        (**self).pull(buf)
    }
}

/// Adapts any [`Read`] into a [`Source`].
///
/// A zero-byte read is end-of-data. Interrupted reads are retried.
#[derive(Debug)]
pub struct ReaderSource<R> {
    inner: R,
}

impl<R: Read> ReaderSource<R> {
    /// Wraps a reader.
    pub fn new(inner: R) -> Self {
        Self { inner }
    }

    /// Returns a reference to the wrapped reader.
    pub fn get_ref(&self) -> &R {
        &self.inner
    }

    /// Unwraps the reader.
    pub fn into_inner(self) -> R {
        self.inner
    }
}

impl<R: Read> Source for ReaderSource<R> {
    fn pull(&mut self, buf: &mut [u8]) -> io::Result<Pulled> {
        if buf.is_empty() {
            return Ok(Pulled::more(0));
        }

        loop {
            match self.inner.read(buf) {
                Ok(0) => return Ok(Pulled::end(0)),
                Ok(n) => return Ok(Pulled::more(n)),
                Err(err) if err.kind() == io::ErrorKind::Interrupted => continue,
                Err(err) => return Err(err),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    /// Fails with `Interrupted` once before every real read.
    struct Interrupting {
        inner: Cursor<Vec<u8>>,
        interrupt_next: bool,
    }

    impl Read for Interrupting {
        fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
            let interrupt = self.interrupt_next;
            self.interrupt_next = !interrupt;
            if interrupt {
                return Err(io::Error::from(io::ErrorKind::Interrupted));
            }
            self.inner.read(buf)
        }
    }

    #[test]
    fn reader_source_signals_end_on_zero_read() {
        let mut source = ReaderSource::new(Cursor::new(b"abc".to_vec()));
        let mut buf = [0u8; 8];

        assert_eq!(source.pull(&mut buf).unwrap(), Pulled::more(3));
        assert_eq!(&buf[..3], b"abc");
        assert_eq!(source.pull(&mut buf).unwrap(), Pulled::end(0));
    }

    #[test]
    fn reader_source_empty_buffer_does_not_touch_reader() {
        let mut source = ReaderSource::new(Cursor::new(b"abc".to_vec()));
        assert_eq!(source.pull(&mut []).unwrap(), Pulled::more(0));
        assert_eq!(source.get_ref().position(), 0);
    }

    #[test]
    fn reader_source_retries_interrupted() {
        let mut source = ReaderSource::new(Interrupting {
            inner: Cursor::new(b"xy".to_vec()),
            interrupt_next: true,
        });
        let mut buf = [0u8; 4];

        assert_eq!(source.pull(&mut buf).unwrap(), Pulled::more(2));
        assert_eq!(source.pull(&mut buf).unwrap(), Pulled::end(0));
    }

    #[test]
    fn boxed_and_borrowed_sources_delegate() {
        let mut inner = ReaderSource::new(Cursor::new(b"boxed".to_vec()));
        let mut boxed: Box<dyn Source + '_> = Box::new(&mut inner);
        let mut buf = [0u8; 5];

        assert_eq!(boxed.pull(&mut buf).unwrap(), Pulled::more(5));
        assert_eq!(&buf, b"boxed");
    }

    #[test]
    fn reader_source_into_inner() {
        let source = ReaderSource::new(Cursor::new(b"abc".to_vec()));
        assert_eq!(source.into_inner().into_inner(), b"abc");
    }
}
