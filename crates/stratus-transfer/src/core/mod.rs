//! Pure sizing and partitioning math.
//!
//! Everything here transforms lengths and ranges without performing any
//! I/O; the upload planner and the parallel downloader build on these
//! functions.

pub mod chunk;
pub mod parts;
pub mod plan;

pub use chunk::chunk_size;
pub use parts::{split_range, stream_count};
pub use plan::{SourceSlice, concatenation_slices, effective_part_size, part_lengths};
