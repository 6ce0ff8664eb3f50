//! Parallel ranged reconstruction of stored objects.
//!
//! Parts are fetched concurrently with a bounded per-part retry budget
//! and flushed to the sink strictly in offset order by a single
//! assembly stage, which also maintains the running content hash.

mod assembly;
mod parallel;

pub use parallel::ParallelDownloader;
