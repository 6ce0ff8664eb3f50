//! Part sizing and source slicing for outbound objects.

use crate::data::UploadPartPolicy;

/// Part size actually used for an object of `total` bytes.
///
/// The preferred size grows once the object is large enough that the
/// preferred split would exceed the part-count bound; the growth keeps
/// half the bound in reserve for later appends.
pub fn effective_part_size(policy: &UploadPartPolicy, total: u64) -> u64 {
    let max_count = policy.max_part_count.max(1);
    let by_count = (3 * total).div_ceil(2 * max_count).min(policy.max_part_size);
    policy.recommended_part_size.max(by_count)
}

/// Lengths of the parts an object of `total` bytes splits into.
///
/// Full-size parts are emitted while at least `min_part_size` bytes
/// would remain; the final part takes the whole remainder, so it spans
/// anywhere from `min_part_size` to just under their sum. An empty
/// object still yields one zero-length part.
pub fn part_lengths(policy: &UploadPartPolicy, total: u64) -> Vec<u64> {
    if total == 0 {
        return vec![0];
    }
    let part_size = effective_part_size(policy, total);
    let mut lengths = Vec::new();
    let mut remaining = total;
    while remaining >= part_size + policy.min_part_size {
        lengths.push(part_size);
        remaining -= part_size;
    }
    lengths.push(remaining);
    lengths
}

/// One slice of part content: which source, where in it, how much.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SourceSlice {
    /// Index into the planner's source list.
    pub source: usize,
    /// Offset within that source.
    pub offset: u64,
    /// Bytes taken from that source.
    pub length: u64,
}

/// Map part lengths onto an ordered list of source lengths.
///
/// Returns one slice list per part. Slices preserve source order and
/// tile every source exactly; `part_lens` must sum to the total of
/// `source_lengths`.
pub fn concatenation_slices(source_lengths: &[u64], part_lens: &[u64]) -> Vec<Vec<SourceSlice>> {
    debug_assert_eq!(
        source_lengths.iter().sum::<u64>(),
        part_lens.iter().sum::<u64>(),
    );
    let mut parts = Vec::with_capacity(part_lens.len());
    let mut source = 0usize;
    let mut source_pos = 0u64;
    for &part_len in part_lens {
        let mut slices = Vec::new();
        if part_len == 0 {
            slices.push(SourceSlice {
                source: 0,
                offset: 0,
                length: 0,
            });
        }
        let mut needed = part_len;
        while needed > 0 {
            while source < source_lengths.len() && source_pos == source_lengths[source] {
                source += 1;
                source_pos = 0;
            }
            let available = source_lengths[source] - source_pos;
            let take = available.min(needed);
            slices.push(SourceSlice {
                source,
                offset: source_pos,
                length: take,
            });
            source_pos += take;
            needed -= take;
        }
        parts.push(slices);
    }
    parts
}
