//! Outbound byte sources for planned uploads.

use std::fs::File;
use std::io::{self, Cursor, Read, Seek};
use std::path::PathBuf;
use std::sync::{Arc, OnceLock};

use bytes::Bytes;

use stratus_verify::{Sha1Hex, sha1_of_reader};

/// Blocking seekable reader over a local source.
pub type BoxSeekReader = Box<dyn ReadSeek + Send>;

/// Object-safe `Read + Seek`.
pub trait ReadSeek: Read + Seek {}

impl<T: Read + Seek + ?Sized> ReadSeek for T {}

/// A local byte source an upload is planned from.
///
/// Sources are re-opened for every pass over their bytes: identity
/// hashing, the upload itself and any retry each get a fresh stream.
/// The whole-content digest is computed at most once and cached.
#[derive(Debug)]
pub struct UploadSource {
    kind: SourceKind,
    length: u64,
    content_sha1: OnceLock<Sha1Hex>,
}

#[derive(Debug)]
enum SourceKind {
    File { path: PathBuf },
    Buffer { data: Bytes },
}

impl UploadSource {
    /// Source backed by a local file; the length is captured now.
    pub fn local_file(path: impl Into<PathBuf>) -> io::Result<Self> {
        let path = path.into();
        let length = std::fs::metadata(&path)?.len();
        Ok(Self {
            kind: SourceKind::File { path },
            length,
            content_sha1: OnceLock::new(),
        })
    }

    /// Source backed by an in-memory buffer.
    pub fn bytes(data: impl Into<Bytes>) -> Self {
        let data = data.into();
        let length = data.len() as u64;
        Self {
            kind: SourceKind::Buffer { data },
            length,
            content_sha1: OnceLock::new(),
        }
    }

    /// Declared content length in bytes.
    pub fn len(&self) -> u64 {
        self.length
    }

    pub fn is_empty(&self) -> bool {
        self.length == 0
    }

    /// Open a fresh seekable stream over the whole source.
    pub fn open(&self) -> io::Result<BoxSeekReader> {
        match &self.kind {
            SourceKind::File { path } => Ok(Box::new(File::open(path)?)),
            SourceKind::Buffer { data } => Ok(Box::new(Cursor::new(data.clone()))),
        }
    }

    /// Whole-content SHA-1, computed on first use and cached.
    pub fn content_sha1(&self) -> io::Result<Sha1Hex> {
        if let Some(sha1) = self.content_sha1.get() {
            return Ok(sha1.clone());
        }
        let mut stream = self.open()?;
        let (sha1, _) = sha1_of_reader(&mut stream)?;
        Ok(self.content_sha1.get_or_init(|| sha1).clone())
    }
}

/// An object range already stored remotely, usable as upload input
/// without downloading it ahead of time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteSource {
    /// Stored object identifier.
    pub file_id: String,
    /// Absolute offset of the range within the stored object.
    pub offset: u64,
    /// Range length in bytes.
    pub length: u64,
}

impl RemoteSource {
    pub fn new(file_id: impl Into<String>, offset: u64, length: u64) -> Self {
        Self {
            file_id: file_id.into(),
            offset,
            length,
        }
    }

    pub fn len(&self) -> u64 {
        self.length
    }

    pub fn is_empty(&self) -> bool {
        self.length == 0
    }
}

/// One entry in a planned concatenation: local bytes or stored bytes.
#[derive(Debug, Clone)]
pub enum OutboundSource {
    Local(Arc<UploadSource>),
    Remote(Arc<RemoteSource>),
}

impl OutboundSource {
    /// Bytes this source contributes to the object.
    pub fn len(&self) -> u64 {
        match self {
            OutboundSource::Local(source) => source.len(),
            OutboundSource::Remote(source) => source.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl From<UploadSource> for OutboundSource {
    fn from(source: UploadSource) -> Self {
        Self::Local(Arc::new(source))
    }
}

impl From<Arc<UploadSource>> for OutboundSource {
    fn from(source: Arc<UploadSource>) -> Self {
        Self::Local(source)
    }
}

impl From<RemoteSource> for OutboundSource {
    fn from(source: RemoteSource) -> Self {
        Self::Remote(Arc::new(source))
    }
}

impl From<Arc<RemoteSource>> for OutboundSource {
    fn from(source: Arc<RemoteSource>) -> Self {
        Self::Remote(source)
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    #[test]
    fn test_buffer_source_reads_back() {
        let source = UploadSource::bytes(&b"dummy bytes"[..]);
        assert_eq!(source.len(), 11);
        let mut out = Vec::new();
        source.open().unwrap().read_to_end(&mut out).unwrap();
        assert_eq!(out, b"dummy bytes");
    }

    #[test]
    fn test_file_source_length_and_content() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("source.bin");
        File::create(&path)
            .unwrap()
            .write_all(&b"dummy".repeat(20))
            .unwrap();

        let source = UploadSource::local_file(&path).unwrap();
        assert_eq!(source.len(), 100);
        assert_eq!(
            source.content_sha1().unwrap().as_str(),
            "7804df8c623573ccfc1993e04981006e5bc30383"
        );
    }

    #[test]
    fn test_content_sha1_is_cached() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("source.bin");
        File::create(&path).unwrap().write_all(b"abc").unwrap();

        let source = UploadSource::local_file(&path).unwrap();
        let first = source.content_sha1().unwrap();
        // Removing the file proves the second call never re-reads it.
        std::fs::remove_file(&path).unwrap();
        assert_eq!(source.content_sha1().unwrap(), first);
    }

    #[test]
    fn test_missing_file_rejected() {
        assert!(UploadSource::local_file("/nonexistent/source.bin").is_err());
    }

    #[test]
    fn test_outbound_lengths() {
        let local: OutboundSource = UploadSource::bytes(&b"abcd"[..]).into();
        let remote: OutboundSource = RemoteSource::new("file-1", 100, 50).into();
        assert_eq!(local.len(), 4);
        assert_eq!(remote.len(), 50);
        assert!(!remote.is_empty());
    }
}
