//! Read-granularity sizing for download streams.

use crate::data::DownloadOptions;

/// Size of one read from a part's response stream.
///
/// A forced size always wins. Otherwise the ideal is one thousandth of
/// the transfer, raised to the configured minimum, capped at the
/// configured maximum (the cap wins when the bounds conflict) and
/// aligned down to the alignment factor so writes land on buffer
/// boundaries.
pub fn chunk_size(options: &DownloadOptions, range_len: u64) -> u64 {
    if let Some(forced) = options.force_chunk_size {
        return forced;
    }
    let align = options.align_factor.max(1);
    let ideal = (range_len / 1000).max(align);
    let bounded = ideal.max(options.min_chunk_size).min(options.max_chunk_size);
    (bounded / align) * align
}
