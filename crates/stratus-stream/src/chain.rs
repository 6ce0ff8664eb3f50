//! Lazy concatenation of streams produced by openers.

use std::io::{self, Cursor, Read, Seek, SeekFrom};
use std::sync::Mutex;

use bytes::Bytes;

use crate::error::StreamError;

/// Boxed blocking reader produced by a [`StreamOpener`].
pub type BoxReader = Box<dyn Read + Send>;

/// Factory for the byte stream of one chain link.
///
/// An opener may be invoked any number of times; each call yields a fresh
/// stream positioned at the link's first byte. Openers that cache fetched
/// bytes release them in [`cleanup`](StreamOpener::cleanup).
pub trait StreamOpener: Send {
    /// Open a fresh stream over the link's bytes.
    fn open(&self) -> Result<BoxReader, StreamError>;

    /// Release cached bytes, if any. Idempotent.
    fn cleanup(&self) {}
}

impl<F> StreamOpener for F
where
    F: Fn() -> Result<BoxReader, StreamError> + Send,
{
    fn open(&self) -> Result<BoxReader, StreamError> {
        self()
    }
}

/// Read-only stream concatenating lazily opened links.
///
/// At most one underlying stream is open at a time; an opener is not
/// invoked until reading reaches its link. Rewinding to the start via
/// [`Seek`] restarts the iteration without touching opener caches, so a
/// replayed chain reuses bytes its openers already fetched.
/// [`close`](ChainedStream::close) additionally cleans up every opener
/// and runs automatically on drop.
pub struct ChainedStream {
    openers: Vec<Box<dyn StreamOpener>>,
    current: Option<BoxReader>,
    next_opener: usize,
    position: u64,
    closed: bool,
}

impl ChainedStream {
    /// Build a chain over `openers`; fails when there are none.
    pub fn new(openers: Vec<Box<dyn StreamOpener>>) -> Result<Self, StreamError> {
        if openers.is_empty() {
            return Err(StreamError::EmptyChain);
        }
        Ok(Self {
            openers,
            current: None,
            next_opener: 0,
            position: 0,
            closed: false,
        })
    }

    /// Bytes handed out since construction or the last rewind.
    pub fn position(&self) -> u64 {
        self.position
    }

    /// Drop the current stream and clean up every opener.
    ///
    /// Idempotent; a closed chain reads as exhausted.
    pub fn close(&mut self) {
        if self.closed {
            return;
        }
        self.current = None;
        for opener in &self.openers {
            opener.cleanup();
        }
        self.closed = true;
    }

    /// Open the next link, dropping the exhausted one first.
    fn advance(&mut self) -> Result<bool, StreamError> {
        self.current = None;
        match self.openers.get(self.next_opener) {
            Some(opener) => {
                self.current = Some(opener.open()?);
                self.next_opener += 1;
                Ok(true)
            }
            None => Ok(false),
        }
    }
}

impl Read for ChainedStream {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        if self.closed {
            return Ok(0);
        }
        let mut filled = 0;
        while filled < buf.len() {
            if self.current.is_none() && !self.advance().map_err(io::Error::from)? {
                break;
            }
            let Some(stream) = self.current.as_mut() else {
                break;
            };
            let n = stream.read(&mut buf[filled..])?;
            if n == 0 {
                self.current = None;
                continue;
            }
            filled += n;
        }
        self.position += filled as u64;
        Ok(filled)
    }
}

impl Seek for ChainedStream {
    fn seek(&mut self, pos: SeekFrom) -> io::Result<u64> {
        match pos {
            SeekFrom::Start(0) => {
                self.current = None;
                self.next_opener = 0;
                self.position = 0;
                Ok(0)
            }
            SeekFrom::Current(0) => Ok(self.position),
            _ => Err(StreamError::UnsupportedSeek.into()),
        }
    }
}

impl Drop for ChainedStream {
    fn drop(&mut self) {
        self.close();
    }
}

/// Opener that fetches its bytes once and serves later opens from cache.
///
/// Chain rewinds keep the cache warm; [`cleanup`](StreamOpener::cleanup)
/// drops it, so the next open after a cleanup fetches again.
pub struct CachedBytesOpener<F> {
    fetch: F,
    cache: Mutex<Option<Bytes>>,
}

impl<F> CachedBytesOpener<F>
where
    F: Fn() -> Result<Bytes, StreamError> + Send,
{
    pub fn new(fetch: F) -> Self {
        Self {
            fetch,
            cache: Mutex::new(None),
        }
    }
}

impl<F> StreamOpener for CachedBytesOpener<F>
where
    F: Fn() -> Result<Bytes, StreamError> + Send,
{
    fn open(&self) -> Result<BoxReader, StreamError> {
        let mut cache = self.cache.lock().unwrap_or_else(|e| e.into_inner());
        let bytes = match cache.as_ref() {
            Some(bytes) => bytes.clone(),
            None => {
                let fetched = (self.fetch)()?;
                *cache = Some(fetched.clone());
                fetched
            }
        };
        Ok(Box::new(Cursor::new(bytes)))
    }

    fn cleanup(&self) {
        self.cache.lock().unwrap_or_else(|e| e.into_inner()).take();
    }
}
