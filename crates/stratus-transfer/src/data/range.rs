//! Inclusive byte ranges.

use std::fmt;

/// Inclusive byte range `[start, end]`, as ranged GET requests express it.
///
/// The empty range is the sentinel `start = 1, end = 0`, which keeps
/// `len` well defined as `end - start + 1`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ByteRange {
    start: u64,
    end: u64,
}

impl ByteRange {
    /// Inclusive range from `start` to `end`.
    ///
    /// # Panics
    ///
    /// Panics when `start > end + 1`.
    pub fn new(start: u64, end: u64) -> Self {
        assert!(start == 0 || start - 1 <= end, "invalid range: {start}-{end}");
        Self { start, end }
    }

    /// The empty range.
    pub fn empty() -> Self {
        Self { start: 1, end: 0 }
    }

    /// Range covering `length` bytes starting at `offset`.
    pub fn from_offset_length(offset: u64, length: u64) -> Self {
        if length == 0 {
            return Self::empty();
        }
        Self {
            start: offset,
            end: offset + length - 1,
        }
    }

    pub fn start(&self) -> u64 {
        self.start
    }

    pub fn end(&self) -> u64 {
        self.end
    }

    /// Number of bytes covered.
    pub fn len(&self) -> u64 {
        if self.start > self.end {
            0
        } else {
            self.end - self.start + 1
        }
    }

    pub fn is_empty(&self) -> bool {
        self.start > self.end
    }

    /// Sub-range selected by offsets relative to `start`, both inclusive.
    ///
    /// # Panics
    ///
    /// Panics when the sub-offsets do not select a non-empty slice of
    /// this range.
    pub fn subrange(&self, start_offset: u64, end_offset: u64) -> Self {
        assert!(
            start_offset <= end_offset && end_offset < self.len(),
            "subrange {start_offset}-{end_offset} outside of {self}"
        );
        Self::new(self.start + start_offset, self.start + end_offset)
    }
}

impl fmt::Display for ByteRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.start, self.end)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_len_counts_both_ends() {
        assert_eq!(ByteRange::new(0, 0).len(), 1);
        assert_eq!(ByteRange::new(5, 14).len(), 10);
    }

    #[test]
    fn test_empty_sentinel() {
        let empty = ByteRange::empty();
        assert!(empty.is_empty());
        assert_eq!(empty.len(), 0);
        assert_eq!(empty, ByteRange::new(1, 0));
    }

    #[test]
    fn test_from_offset_length() {
        assert_eq!(ByteRange::from_offset_length(10, 5), ByteRange::new(10, 14));
        assert!(ByteRange::from_offset_length(10, 0).is_empty());
    }

    #[test]
    fn test_subrange_is_relative() {
        let range = ByteRange::new(100, 199);
        assert_eq!(range.subrange(0, 99), range);
        assert_eq!(range.subrange(30, 99), ByteRange::new(130, 199));
        assert_eq!(range.subrange(10, 19), ByteRange::new(110, 119));
    }

    #[test]
    #[should_panic(expected = "subrange")]
    fn test_subrange_beyond_end_panics() {
        ByteRange::new(0, 9).subrange(5, 10);
    }

    #[test]
    #[should_panic(expected = "invalid range")]
    fn test_inverted_range_panics() {
        ByteRange::new(7, 2);
    }
}
