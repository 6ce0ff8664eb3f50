//! Progress-reporting stream wrappers.

use std::io::{self, Read, Seek, SeekFrom, Write};
use std::sync::Arc;

/// Callback receiving cumulative completed byte counts.
///
/// Listeners are shared across wrappers and worker tasks, so reports go
/// through `&self`.
pub trait ProgressListener: Send + Sync {
    /// Total number of bytes completed so far.
    fn bytes_completed(&self, total: u64);
}

impl<T: ProgressListener + ?Sized> ProgressListener for Arc<T> {
    fn bytes_completed(&self, total: u64) {
        (**self).bytes_completed(total)
    }
}

/// Listener that ignores every report.
pub struct NoProgress;

impl ProgressListener for NoProgress {
    fn bytes_completed(&self, _total: u64) {}
}

/// Reports cumulative bytes read from the wrapped stream.
///
/// Rewinding to the start restarts the count: a replayed upload body
/// reports from zero again rather than double-counting. An `offset`
/// shifts every report, for streams that are one slice of a larger
/// operation.
pub struct ProgressReader<S, L> {
    inner: S,
    listener: L,
    offset: u64,
    completed: u64,
}

impl<S, L: ProgressListener> ProgressReader<S, L> {
    pub fn new(inner: S, listener: L) -> Self {
        Self::with_offset(inner, listener, 0)
    }

    /// Report on top of `offset` bytes already completed elsewhere.
    #[must_use]
    pub fn with_offset(inner: S, listener: L, offset: u64) -> Self {
        Self {
            inner,
            listener,
            offset,
            completed: 0,
        }
    }
}

impl<S: Read, L: ProgressListener> Read for ProgressReader<S, L> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        let n = self.inner.read(buf)?;
        self.completed += n as u64;
        self.listener.bytes_completed(self.offset + self.completed);
        Ok(n)
    }
}

impl<S: Seek, L: ProgressListener> Seek for ProgressReader<S, L> {
    fn seek(&mut self, pos: SeekFrom) -> io::Result<u64> {
        let new_pos = self.inner.seek(pos)?;
        if matches!(pos, SeekFrom::Start(0)) {
            self.completed = 0;
        }
        Ok(new_pos)
    }
}

/// Reports cumulative bytes written to the wrapped sink.
///
/// The count never resets; one sink collects every part of a download,
/// so progress only moves forward. Seeks pass through untouched.
pub struct ProgressWriter<W, L> {
    inner: W,
    listener: L,
    offset: u64,
    completed: u64,
}

impl<W, L: ProgressListener> ProgressWriter<W, L> {
    pub fn new(inner: W, listener: L) -> Self {
        Self::with_offset(inner, listener, 0)
    }

    /// Report on top of `offset` bytes already completed elsewhere.
    #[must_use]
    pub fn with_offset(inner: W, listener: L, offset: u64) -> Self {
        Self {
            inner,
            listener,
            offset,
            completed: 0,
        }
    }

    /// The wrapped sink.
    pub fn into_inner(self) -> W {
        self.inner
    }
}

impl<W: Write, L: ProgressListener> Write for ProgressWriter<W, L> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let n = self.inner.write(buf)?;
        self.completed += n as u64;
        self.listener.bytes_completed(self.offset + self.completed);
        Ok(n)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.inner.flush()
    }
}

impl<W: Seek, L: ProgressListener> Seek for ProgressWriter<W, L> {
    fn seek(&mut self, pos: SeekFrom) -> io::Result<u64> {
        self.inner.seek(pos)
    }
}
