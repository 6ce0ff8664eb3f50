//! Partitioning of a download range across streams.

use crate::data::ByteRange;

/// Number of parallel streams used for `range_len` bytes.
///
/// One stream per `min_part_size` bytes, at least one, at most
/// `max_streams`, and never more streams than bytes.
pub fn stream_count(range_len: u64, min_part_size: u64, max_streams: usize) -> usize {
    let by_size = range_len / min_part_size.max(1);
    by_size.min(max_streams as u64).min(range_len).max(1) as usize
}

/// Split `range` into `count` contiguous parts covering it exactly.
///
/// Each part takes `remaining / parts_left` bytes rounded down, so an
/// uneven split puts the smaller parts first.
pub fn split_range(range: ByteRange, count: usize) -> Vec<ByteRange> {
    if range.is_empty() {
        return Vec::new();
    }
    let len = range.len();
    let count = (count as u64).clamp(1, len);
    let mut parts = Vec::with_capacity(count as usize);
    let mut offset = 0;
    let mut remaining = len;
    for i in 0..count {
        let part_len = remaining / (count - i);
        parts.push(range.subrange(offset, offset + part_len - 1));
        offset += part_len;
        remaining -= part_len;
    }
    parts
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stream_count_scales_with_length() {
        assert_eq!(stream_count(0, 100, 10), 1);
        assert_eq!(stream_count(99, 100, 10), 1);
        assert_eq!(stream_count(100, 100, 10), 1);
        assert_eq!(stream_count(350, 100, 10), 3);
        assert_eq!(stream_count(10_000, 100, 10), 10);
    }

    #[test]
    fn test_stream_count_never_exceeds_bytes() {
        assert_eq!(stream_count(3, 1, 10), 3);
    }

    #[test]
    fn test_even_split() {
        let parts = split_range(ByteRange::new(0, 99), 4);
        assert_eq!(
            parts,
            vec![
                ByteRange::new(0, 24),
                ByteRange::new(25, 49),
                ByteRange::new(50, 74),
                ByteRange::new(75, 99),
            ]
        );
    }

    #[test]
    fn test_uneven_split_puts_smaller_parts_first() {
        let parts = split_range(ByteRange::new(0, 9), 3);
        let lens: Vec<u64> = parts.iter().map(ByteRange::len).collect();
        assert_eq!(lens, vec![3, 3, 4]);
    }

    #[test]
    fn test_split_covers_range_contiguously() {
        let range = ByteRange::new(17, 116);
        let parts = split_range(range, 7);
        assert_eq!(parts.first().map(ByteRange::start), Some(17));
        assert_eq!(parts.last().map(|p| p.end()), Some(116));
        for pair in parts.windows(2) {
            assert_eq!(pair[1].start(), pair[0].end() + 1);
        }
        assert_eq!(parts.iter().map(ByteRange::len).sum::<u64>(), range.len());
    }

    #[test]
    fn test_count_clamped_to_length() {
        let parts = split_range(ByteRange::new(0, 4), 10);
        assert_eq!(parts.len(), 5);
        assert!(parts.iter().all(|p| p.len() == 1));
    }

    #[test]
    fn test_empty_range_has_no_parts() {
        assert!(split_range(ByteRange::empty(), 3).is_empty());
    }
}
