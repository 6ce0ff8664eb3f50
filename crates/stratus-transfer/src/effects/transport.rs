//! Transport capabilities for ranged object access.

use std::future::Future;
use std::pin::Pin;

use bytes::Bytes;
use futures_util::Stream;

use crate::data::ByteRange;
use crate::error::TransportError;

/// Boxed stream of body chunks from a ranged GET.
pub type BoxByteStream =
    Pin<Box<dyn Stream<Item = Result<Bytes, TransportError>> + Send + 'static>>;

/// Response to a ranged GET.
pub struct RangeResponse {
    /// Length in bytes the transport promises to deliver.
    pub content_length: u64,
    /// Body chunks; the engine drops this exactly once, consumed or not.
    pub body: BoxByteStream,
}

/// Asynchronous ranged-read capability over stored objects.
///
/// The downloader issues one GET per part plus one per retry.
/// Implementations own authentication, endpoint resolution and wire
/// mapping; mid-body failures must surface as
/// [`TransportError::Interrupted`] when a re-request could succeed.
pub trait RangedTransport: Send + Sync {
    /// Open a streaming GET for `range` of the stored object.
    fn ranged_get(
        &self,
        object_id: &str,
        range: ByteRange,
    ) -> impl Future<Output = Result<RangeResponse, TransportError>> + Send;
}

/// Blocking buffered-read capability used by remote upload subparts.
///
/// The whole range comes back at once; remote subpart openers cache the
/// bytes for the duration of one upload call, so implementations should
/// not add caching of their own.
pub trait RangeFetcher: Send + Sync {
    /// Fetch `range` of the stored object into memory.
    fn fetch_range(&self, file_id: &str, range: ByteRange) -> Result<Bytes, TransportError>;
}
