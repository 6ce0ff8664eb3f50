//! Offset-window view over a seekable stream.

use std::io::{self, Read, Seek, SeekFrom};

use crate::error::StreamError;

/// Restricts a seekable stream to the window `[offset, offset + length)`.
///
/// Positions accepted and reported by the view are relative to `offset`;
/// reads never hand out bytes past the window. Dropping the view drops
/// the inner stream with it.
pub struct RangeReader<S> {
    inner: S,
    offset: u64,
    length: u64,
    position: u64,
}

impl<S: Read + Seek> RangeReader<S> {
    /// Wrap `inner`, seeking it to `offset` immediately.
    pub fn new(mut inner: S, offset: u64, length: u64) -> io::Result<Self> {
        inner.seek(SeekFrom::Start(offset))?;
        Ok(Self {
            inner,
            offset,
            length,
            position: 0,
        })
    }

    /// Declared window length in bytes.
    pub fn len(&self) -> u64 {
        self.length
    }

    pub fn is_empty(&self) -> bool {
        self.length == 0
    }
}

impl<S: Read> Read for RangeReader<S> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        let remaining = self.length.saturating_sub(self.position);
        if remaining == 0 {
            return Ok(0);
        }
        let cap = remaining.min(buf.len() as u64) as usize;
        let n = self.inner.read(&mut buf[..cap])?;
        self.position += n as u64;
        Ok(n)
    }
}

impl<S: Read + Seek> Seek for RangeReader<S> {
    fn seek(&mut self, pos: SeekFrom) -> io::Result<u64> {
        match pos {
            SeekFrom::Start(p) => {
                self.inner.seek(SeekFrom::Start(self.offset + p))?;
                self.position = p;
                Ok(p)
            }
            SeekFrom::Current(0) => Ok(self.position),
            _ => Err(StreamError::UnsupportedSeek.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use super::*;

    fn alphabet() -> Cursor<Vec<u8>> {
        Cursor::new(b"abcdefghijklmnopqrstuvwxyz".to_vec())
    }

    fn read_all<S: Read>(reader: &mut S) -> Vec<u8> {
        let mut out = Vec::new();
        reader.read_to_end(&mut out).unwrap();
        out
    }

    #[test]
    fn test_window_is_exact() {
        let mut view = RangeReader::new(alphabet(), 5, 10).unwrap();
        assert_eq!(read_all(&mut view), b"fghijklmno");
    }

    #[test]
    fn test_small_reads_stop_at_window_end() {
        let mut view = RangeReader::new(alphabet(), 23, 3).unwrap();
        let mut out = Vec::new();
        let mut buf = [0u8; 2];
        loop {
            let n = view.read(&mut buf).unwrap();
            if n == 0 {
                break;
            }
            out.extend_from_slice(&buf[..n]);
        }
        assert_eq!(out, b"xyz");
    }

    #[test]
    fn test_seek_is_window_relative() {
        let mut view = RangeReader::new(alphabet(), 5, 10).unwrap();
        view.seek(SeekFrom::Start(3)).unwrap();
        assert_eq!(read_all(&mut view), b"ijklmno");
        view.seek(SeekFrom::Start(0)).unwrap();
        assert_eq!(view.seek(SeekFrom::Current(0)).unwrap(), 0);
        assert_eq!(read_all(&mut view), b"fghijklmno");
    }

    #[test]
    fn test_seek_past_window_reads_nothing() {
        let mut view = RangeReader::new(alphabet(), 5, 10).unwrap();
        view.seek(SeekFrom::Start(10)).unwrap();
        assert_eq!(read_all(&mut view), b"");
    }

    #[test]
    fn test_arbitrary_seek_rejected() {
        let mut view = RangeReader::new(alphabet(), 0, 5).unwrap();
        assert!(view.seek(SeekFrom::End(0)).is_err());
        assert!(view.seek(SeekFrom::Current(2)).is_err());
    }

    #[test]
    fn test_empty_window() {
        let mut view = RangeReader::new(alphabet(), 7, 0).unwrap();
        assert!(view.is_empty());
        assert_eq!(read_all(&mut view), b"");
    }
}
