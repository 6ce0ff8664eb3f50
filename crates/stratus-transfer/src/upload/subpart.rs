//! Addressable slices of outbound sources.

use std::sync::Arc;

use stratus_stream::{BoxReader, CachedBytesOpener, RangeReader, StreamError, StreamOpener};
use stratus_verify::sha1_of_reader;

use crate::data::{ByteRange, SubpartId};
use crate::effects::{RangeFetcher, RemoteSource, UploadSource};
use crate::error::{Result, TransferError};

/// One contiguous byte range of an outbound source.
///
/// Local subparts re-open their source for every pass over the bytes;
/// remote subparts fetch their range at most once per upload call and
/// serve replays from cache. Offsets are relative to the source, which
/// for remote sources is itself a window into the stored object.
#[derive(Debug, Clone)]
pub enum Subpart {
    Local {
        source: Arc<UploadSource>,
        offset: u64,
        length: u64,
    },
    Remote {
        source: Arc<RemoteSource>,
        offset: u64,
        length: u64,
    },
}

impl Subpart {
    /// Bytes this subpart covers.
    pub fn len(&self) -> u64 {
        match self {
            Subpart::Local { length, .. } | Subpart::Remote { length, .. } => *length,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Whether the identity is a content digest, which requires a pass
    /// over local bytes.
    pub fn is_hashable(&self) -> bool {
        matches!(self, Subpart::Local { .. })
    }

    /// Identity for content-addressed resumability.
    ///
    /// Local subparts hash their exact byte range in one throwaway
    /// pass; remote identities are built from coordinates alone.
    pub fn id(&self) -> Result<SubpartId> {
        match self {
            Subpart::Local {
                source,
                offset,
                length,
            } => {
                let mut stream = open_local(source, *offset, *length)?;
                let (sha1, _) = sha1_of_reader(&mut stream)?;
                Ok(SubpartId::Content(sha1))
            }
            Subpart::Remote {
                source,
                offset,
                length,
            } => Ok(SubpartId::Remote {
                file_id: source.file_id.clone(),
                offset: *offset,
                length: *length,
            }),
        }
    }

    /// Build the opener that feeds this subpart's bytes into a chain.
    ///
    /// Remote subparts need the `fetcher` capability and fail with
    /// [`TransferError::MissingRangeFetcher`] without one; the fetch
    /// itself is deferred until the chain reaches the subpart.
    pub fn stream_opener(
        &self,
        fetcher: Option<&Arc<dyn RangeFetcher>>,
    ) -> Result<Box<dyn StreamOpener>> {
        match self {
            Subpart::Local {
                source,
                offset,
                length,
            } => {
                let source = Arc::clone(source);
                let (offset, length) = (*offset, *length);
                Ok(Box::new(move || -> std::result::Result<BoxReader, StreamError> {
                    open_local(&source, offset, length)
                }))
            }
            Subpart::Remote {
                source,
                offset,
                length,
            } => {
                let fetcher = Arc::clone(fetcher.ok_or(TransferError::MissingRangeFetcher)?);
                let file_id = source.file_id.clone();
                let range = ByteRange::from_offset_length(source.offset + offset, *length);
                Ok(Box::new(CachedBytesOpener::new(move || {
                    fetcher
                        .fetch_range(&file_id, range)
                        .map_err(|e| StreamError::Opener(Box::new(e)))
                })))
            }
        }
    }
}

fn open_local(
    source: &UploadSource,
    offset: u64,
    length: u64,
) -> std::result::Result<BoxReader, StreamError> {
    let stream = source.open()?;
    Ok(Box::new(RangeReader::new(stream, offset, length)?))
}

#[cfg(test)]
mod tests {
    use std::io::Read;
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use bytes::Bytes;

    use crate::error::TransportError;

    use super::*;

    struct MockFetcher {
        object: Vec<u8>,
        calls: AtomicUsize,
        requests: Mutex<Vec<(String, ByteRange)>>,
    }

    impl MockFetcher {
        fn new(object: Vec<u8>) -> Self {
            Self {
                object,
                calls: AtomicUsize::new(0),
                requests: Mutex::new(Vec::new()),
            }
        }
    }

    impl RangeFetcher for MockFetcher {
        fn fetch_range(
            &self,
            file_id: &str,
            range: ByteRange,
        ) -> std::result::Result<Bytes, TransportError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.requests
                .lock()
                .unwrap()
                .push((file_id.to_string(), range));
            let slice = &self.object[range.start() as usize..=range.end() as usize];
            Ok(Bytes::copy_from_slice(slice))
        }
    }

    fn local_subpart(data: impl Into<Bytes>, offset: u64, length: u64) -> Subpart {
        Subpart::Local {
            source: Arc::new(UploadSource::bytes(data)),
            offset,
            length,
        }
    }

    #[test]
    fn test_local_id_hashes_exact_window() {
        let subpart = local_subpart(b"dummy".repeat(20), 0, 100);
        match subpart.id().unwrap() {
            SubpartId::Content(sha1) => {
                assert_eq!(sha1.as_str(), "7804df8c623573ccfc1993e04981006e5bc30383")
            }
            other => panic!("expected content id, got {other:?}"),
        }
    }

    #[test]
    fn test_local_window_id_differs_from_whole() {
        let whole = local_subpart(&b"abcdef"[..], 0, 6);
        let window = local_subpart(&b"abcdef"[..], 2, 3);
        assert_ne!(whole.id().unwrap(), window.id().unwrap());
    }

    #[test]
    fn test_remote_id_needs_no_fetch() {
        let subpart = Subpart::Remote {
            source: Arc::new(RemoteSource::new("file-9", 1000, 400)),
            offset: 40,
            length: 100,
        };
        assert_eq!(
            subpart.id().unwrap(),
            SubpartId::Remote {
                file_id: "file-9".to_string(),
                offset: 40,
                length: 100,
            }
        );
    }

    #[test]
    fn test_local_opener_replays_bytes() {
        let subpart = local_subpart(&b"abcdefgh"[..], 2, 4);
        let opener = subpart.stream_opener(None).unwrap();
        for _ in 0..2 {
            let mut out = Vec::new();
            opener.open().unwrap().read_to_end(&mut out).unwrap();
            assert_eq!(out, b"cdef");
        }
    }

    #[test]
    fn test_remote_opener_fetches_absolute_range_once() {
        let object: Vec<u8> = (0u8..=255).cycle().take(2000).collect();
        let fetcher = Arc::new(MockFetcher::new(object.clone()));
        let subpart = Subpart::Remote {
            source: Arc::new(RemoteSource::new("file-3", 1000, 500)),
            offset: 100,
            length: 50,
        };

        let capability: Arc<dyn RangeFetcher> = fetcher.clone();
        let opener = subpart.stream_opener(Some(&capability)).unwrap();
        let mut out = Vec::new();
        opener.open().unwrap().read_to_end(&mut out).unwrap();
        // Relative offset 100 in a source window starting at 1000.
        assert_eq!(out, &object[1100..1150]);
        assert_eq!(
            fetcher.requests.lock().unwrap()[0],
            ("file-3".to_string(), ByteRange::new(1100, 1149))
        );

        opener.open().unwrap();
        assert_eq!(fetcher.calls.load(Ordering::SeqCst), 1);

        opener.cleanup();
        opener.open().unwrap();
        assert_eq!(fetcher.calls.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn test_remote_opener_requires_fetcher() {
        let subpart = Subpart::Remote {
            source: Arc::new(RemoteSource::new("file-1", 0, 10)),
            offset: 0,
            length: 10,
        };
        assert!(matches!(
            subpart.stream_opener(None),
            Err(TransferError::MissingRangeFetcher)
        ));
    }
}
