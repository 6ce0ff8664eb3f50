//! Length-declaring stream wrapper.

use std::io::{self, Read, Seek, SeekFrom};

/// A stream paired with its declared total length.
///
/// Transports size physical upload calls from the declared length; the
/// wrapper itself never enforces it.
pub struct StreamWithLength<S> {
    inner: S,
    length: u64,
}

impl<S> StreamWithLength<S> {
    pub fn new(inner: S, length: u64) -> Self {
        Self { inner, length }
    }

    /// Declared total length in bytes.
    pub fn len(&self) -> u64 {
        self.length
    }

    pub fn is_empty(&self) -> bool {
        self.length == 0
    }

    pub fn into_inner(self) -> S {
        self.inner
    }
}

impl<S: Read> Read for StreamWithLength<S> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        self.inner.read(buf)
    }
}

impl<S: Seek> Seek for StreamWithLength<S> {
    fn seek(&mut self, pos: SeekFrom) -> io::Result<u64> {
        self.inner.seek(pos)
    }
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use super::*;

    #[test]
    fn test_declares_length_and_delegates() {
        let mut stream = StreamWithLength::new(Cursor::new(b"abcdef".to_vec()), 6);
        assert_eq!(stream.len(), 6);
        let mut out = Vec::new();
        stream.read_to_end(&mut out).unwrap();
        assert_eq!(out, b"abcdef");
        stream.seek(SeekFrom::Start(0)).unwrap();
        out.clear();
        stream.read_to_end(&mut out).unwrap();
        assert_eq!(out, b"abcdef");
    }
}
