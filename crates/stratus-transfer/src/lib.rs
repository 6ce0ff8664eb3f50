//! Chunked, resumable, verified object transfer engine.
//!
//! This crate plans uploads and reconstructs downloads for an
//! object-storage service that speaks ranged GETs and multipart PUTs.
//! Outbound objects are split into parts and subparts whose byte
//! streams are rebuilt on demand, so a failed call can be retried
//! without buffering whole parts; inbound objects are fetched over
//! concurrent range requests and reassembled in strict offset order
//! under a running SHA-1.
//!
//! # Architecture
//!
//! The crate follows a three-layer pattern:
//! - [`data`] - Immutable configuration, ranges and identity types
//! - [`core`] - Pure sizing and partitioning math
//! - [`effects`] - I/O capabilities behind traits
//!
//! with the operation layers composed from them:
//! - [`upload`] - planning outbound objects into parts and subparts
//! - [`download`] - parallel ranged reconstruction of stored objects
//!
//! # Key Features
//!
//! - **Composable sources**: local files, in-memory buffers and
//!   already-stored remote ranges concatenate into one logical object
//! - **Content-addressed identities**: parts and subparts carry ids a
//!   resumed session can match without re-uploading
//! - **Suffix retries**: an interrupted part stream re-requests only
//!   the bytes it is missing, within a bounded attempt budget
//! - **Single-pass verification**: downloads hash bytes as they are
//!   flushed, no second read of the sink

pub mod core;
pub mod data;
pub mod download;
pub mod effects;
pub mod error;
pub mod upload;

pub use data::{
    ByteRange, DownloadOptions, DownloadOutcome, DownloadTarget, PartId, SubpartId,
    UploadPartPolicy,
};
pub use download::ParallelDownloader;
pub use effects::{
    BoxByteStream, OutboundSource, RangeFetcher, RangeResponse, RangedTransport, RemoteSource,
    UploadSource,
};
pub use error::{Result, TransferError, TransportError};
pub use upload::{Subpart, UploadPart, UploadPlan, plan_concatenation, plan_upload};
