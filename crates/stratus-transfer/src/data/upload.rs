//! Upload part sizing policy.

use serde::{Deserialize, Serialize};

const MEGABYTE: u64 = 1000 * 1000;
const GIGABYTE: u64 = 1000 * MEGABYTE;

/// Sizing policy for splitting outbound objects into parts.
///
/// Defaults follow the storage service's published limits: parts of
/// 5 MB to 5 GB (decimal), 100 MB preferred, at most 10 000 parts per
/// object.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct UploadPartPolicy {
    /// Smallest part the service accepts; only an object shorter than
    /// this produces a smaller (single) part.
    pub min_part_size: u64,

    /// Preferred part size. Grows for very large objects so the split
    /// stays within `max_part_count`.
    pub recommended_part_size: u64,

    /// Largest part the service accepts.
    pub max_part_size: u64,

    /// Upper bound on the number of parts per object.
    pub max_part_count: u64,
}

impl Default for UploadPartPolicy {
    fn default() -> Self {
        Self {
            min_part_size: 5 * MEGABYTE,
            recommended_part_size: 100 * MEGABYTE,
            max_part_size: 5 * GIGABYTE,
            max_part_count: 10_000,
        }
    }
}

impl UploadPartPolicy {
    /// Set the smallest allowed part size.
    #[must_use]
    pub fn min_part_size(mut self, size: u64) -> Self {
        self.min_part_size = size;
        self
    }

    /// Set the preferred part size.
    #[must_use]
    pub fn recommended_part_size(mut self, size: u64) -> Self {
        self.recommended_part_size = size;
        self
    }

    /// Set the largest allowed part size.
    #[must_use]
    pub fn max_part_size(mut self, size: u64) -> Self {
        self.max_part_size = size;
        self
    }

    /// Set the part count bound.
    #[must_use]
    pub fn max_part_count(mut self, count: u64) -> Self {
        self.max_part_count = count;
        self
    }
}
