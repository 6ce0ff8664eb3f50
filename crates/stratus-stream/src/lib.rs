//! Composable blocking stream views for chunked object transfers.
//!
//! Upload bodies are built by stacking small wrappers over `Read`: a
//! [`ChainedStream`] concatenates lazily opened sources, a
//! [`HashingReader`] appends the payload's hex digest as a trailer, and
//! a [`StreamWithLength`] declares the total so transports can size the
//! call. Every wrapper supports rewinding to the start, which is how
//! upload retries replay a body byte for byte.
//!
//! # Key Features
//!
//! - **Lazy chains**: at most one source stream open at a time, openers
//!   invoked only when reading reaches them
//! - **Cached links**: [`CachedBytesOpener`] fetches remote bytes once
//!   per upload call and serves retries from memory
//! - **Windowed views**: [`RangeReader`] restricts a seekable stream to
//!   an offset window with window-relative positions
//! - **Progress taps**: [`ProgressReader`] and [`ProgressWriter`] report
//!   cumulative counts to a shared [`ProgressListener`]
//!
//! # Example
//!
//! ```
//! use std::io::Read;
//! use stratus_stream::{BoxReader, ChainedStream, StreamError, StreamOpener};
//!
//! let openers: Vec<Box<dyn StreamOpener>> = vec![
//!     Box::new(|| -> Result<BoxReader, StreamError> { Ok(Box::new(&b"hello "[..])) }),
//!     Box::new(|| -> Result<BoxReader, StreamError> { Ok(Box::new(&b"world"[..])) }),
//! ];
//! let mut chain = ChainedStream::new(openers)?;
//! let mut out = String::new();
//! chain.read_to_string(&mut out)?;
//! assert_eq!(out, "hello world");
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub use chain::{BoxReader, CachedBytesOpener, ChainedStream, StreamOpener};
pub use error::StreamError;
pub use hashing::{HashingReader, TRAILER_LEN};
pub use progress::{NoProgress, ProgressListener, ProgressReader, ProgressWriter};
pub use range::RangeReader;
pub use wrapper::StreamWithLength;

mod chain;
mod error;
mod hashing;
mod progress;
mod range;
mod wrapper;
