//! Download configuration, targets and outcomes.

use serde::{Deserialize, Serialize};

use stratus_verify::Sha1Hex;

use super::range::ByteRange;

const KIBIBYTE: u64 = 1024;
const MEBIBYTE: u64 = 1024 * 1024;

/// Configuration for parallel ranged downloads.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DownloadOptions {
    /// Maximum number of concurrent part streams.
    pub max_streams: usize,

    /// Minimum amount of data a single stream is responsible for; the
    /// stream count is the range length divided by this.
    pub min_part_size: u64,

    /// Fixed read granularity, overriding the computed chunk size.
    pub force_chunk_size: Option<u64>,

    /// Lower bound of the computed chunk size.
    pub min_chunk_size: u64,

    /// Upper bound of the computed chunk size.
    pub max_chunk_size: u64,

    /// Computed chunk sizes are aligned down to a multiple of this.
    pub align_factor: u64,

    /// Maintain a running SHA-1 over the bytes written to the sink.
    pub check_hash: bool,

    /// Attempt budget per part, counting the first try.
    pub max_part_attempts: u32,
}

impl Default for DownloadOptions {
    fn default() -> Self {
        Self {
            max_streams: 10,
            min_part_size: 100 * MEBIBYTE,
            force_chunk_size: None,
            min_chunk_size: 8 * KIBIBYTE,
            max_chunk_size: MEBIBYTE,
            align_factor: 4 * KIBIBYTE,
            check_hash: true,
            max_part_attempts: 15,
        }
    }
}

impl DownloadOptions {
    /// Set the concurrent stream cap.
    #[must_use]
    pub fn max_streams(mut self, n: usize) -> Self {
        self.max_streams = n;
        self
    }

    /// Set the minimum bytes per stream.
    #[must_use]
    pub fn min_part_size(mut self, size: u64) -> Self {
        self.min_part_size = size;
        self
    }

    /// Force a fixed read granularity.
    #[must_use]
    pub fn force_chunk_size(mut self, size: u64) -> Self {
        self.force_chunk_size = Some(size);
        self
    }

    /// Set the computed chunk lower bound.
    #[must_use]
    pub fn min_chunk_size(mut self, size: u64) -> Self {
        self.min_chunk_size = size;
        self
    }

    /// Set the computed chunk upper bound.
    #[must_use]
    pub fn max_chunk_size(mut self, size: u64) -> Self {
        self.max_chunk_size = size;
        self
    }

    /// Set the chunk alignment factor.
    #[must_use]
    pub fn align_factor(mut self, factor: u64) -> Self {
        self.align_factor = factor;
        self
    }

    /// Enable or disable the running content hash.
    #[must_use]
    pub fn check_hash(mut self, check: bool) -> Self {
        self.check_hash = check;
        self
    }

    /// Set the per-part attempt budget.
    #[must_use]
    pub fn max_part_attempts(mut self, attempts: u32) -> Self {
        self.max_part_attempts = attempts;
        self
    }
}

/// What to download: a stored object, optionally restricted to a byte
/// range and verified against an expected digest.
#[derive(Debug, Clone)]
pub struct DownloadTarget {
    /// Identifier the transport resolves to the stored object.
    pub object_id: String,

    /// Byte range to download; `None` means the whole object.
    pub range: Option<ByteRange>,

    /// Expected content digest; a mismatch fails the download after the
    /// bytes are written.
    pub expected_sha1: Option<Sha1Hex>,
}

impl DownloadTarget {
    /// Whole-object target without verification.
    pub fn new(object_id: impl Into<String>) -> Self {
        Self {
            object_id: object_id.into(),
            range: None,
            expected_sha1: None,
        }
    }

    /// Restrict the download to `range`.
    #[must_use]
    pub fn range(mut self, range: ByteRange) -> Self {
        self.range = Some(range);
        self
    }

    /// Verify the written bytes against `sha1`.
    #[must_use]
    pub fn expected_sha1(mut self, sha1: Sha1Hex) -> Self {
        self.expected_sha1 = Some(sha1);
        self
    }
}

/// Result of a completed download.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DownloadOutcome {
    /// Bytes flushed to the sink; equals the requested range length.
    pub bytes_written: u64,

    /// Hex digest of the flushed bytes, `None` when hashing is disabled.
    pub sha1: Option<Sha1Hex>,
}
