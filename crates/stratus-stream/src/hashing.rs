//! Stream view appending a trailing hex digest.

use std::io::{self, Read, Seek, SeekFrom};

use stratus_verify::{Hasher, Sha1Hasher, Sha1Hex};

use crate::error::StreamError;

/// Length of the appended hex digest trailer in bytes.
pub const TRAILER_LEN: u64 = 2 * Sha1Hasher::OUTPUT_LEN as u64;

/// Appends `hex(sha1(payload))` after the wrapped stream's bytes.
///
/// The digest is fed incrementally as the payload streams through; once
/// the inner stream reports end of data the 40-character trailer is
/// served, possibly within the same read call. Rewinding to the start
/// restarts both the inner stream and the digest, so a replayed stream
/// produces the identical byte sequence.
pub struct HashingReader<S> {
    inner: S,
    hasher: Option<Sha1Hasher>,
    trailer: Option<Sha1Hex>,
    trailer_pos: usize,
    position: u64,
}

impl<S> HashingReader<S> {
    pub fn new(inner: S) -> Self {
        Self {
            inner,
            hasher: Some(Sha1Hasher::new()),
            trailer: None,
            trailer_pos: 0,
            position: 0,
        }
    }
}

impl<S: Read> Read for HashingReader<S> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        let mut filled = 0;
        if self.trailer.is_none() {
            while filled < buf.len() {
                let n = self.inner.read(&mut buf[filled..])?;
                if n == 0 {
                    let hasher = self.hasher.take().unwrap_or_default();
                    self.trailer = Some(Sha1Hex::from_digest(&hasher.finalize()));
                    break;
                }
                if let Some(hasher) = self.hasher.as_mut() {
                    hasher.update(&buf[filled..filled + n]);
                }
                filled += n;
            }
        }
        if filled < buf.len() {
            if let Some(trailer) = self.trailer.as_ref() {
                let pending = &trailer.as_str().as_bytes()[self.trailer_pos..];
                let take = pending.len().min(buf.len() - filled);
                buf[filled..filled + take].copy_from_slice(&pending[..take]);
                self.trailer_pos += take;
                filled += take;
            }
        }
        self.position += filled as u64;
        Ok(filled)
    }
}

impl<S: Read + Seek> Seek for HashingReader<S> {
    fn seek(&mut self, pos: SeekFrom) -> io::Result<u64> {
        match pos {
            SeekFrom::Start(0) => {
                self.inner.seek(SeekFrom::Start(0))?;
                self.hasher = Some(Sha1Hasher::new());
                self.trailer = None;
                self.trailer_pos = 0;
                self.position = 0;
                Ok(0)
            }
            SeekFrom::Current(0) => Ok(self.position),
            _ => Err(StreamError::UnsupportedSeek.into()),
        }
    }
}
