//! Immutable data types for transfer operations.
//!
//! Configuration, byte ranges and identity values passed between the
//! planner, the downloader and transport capabilities without mutation.

pub mod download;
pub mod ids;
pub mod range;
pub mod upload;

pub use download::{DownloadOptions, DownloadOutcome, DownloadTarget};
pub use ids::{PartId, SubpartId};
pub use range::ByteRange;
pub use upload::UploadPartPolicy;
