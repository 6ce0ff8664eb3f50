//! I/O capabilities consumed by the transfer engine.
//!
//! Transport and source access sit behind traits so the engine can be
//! driven by any HTTP stack, and by in-memory doubles in tests.

pub mod source;
pub mod transport;

pub use source::{BoxSeekReader, OutboundSource, RemoteSource, UploadSource};
pub use transport::{BoxByteStream, RangeFetcher, RangeResponse, RangedTransport};
