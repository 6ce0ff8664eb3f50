//! Streaming checksum primitives for object transfers.
//!
//! The storage protocol identifies content by SHA-1, so every upload part
//! and every downloaded byte range passes through one of the hashers in
//! this crate. Digests travel as lowercase hex strings ([`Sha1Hex`]) both
//! on the wire and in part identities.
//!
//! # Key Features
//!
//! - **Incremental hashing**: [`Hasher`] feeds arbitrary-size chunks as
//!   they stream through, no buffering of whole payloads
//! - **Single-pass digests**: [`sha1_of_reader`] consumes a blocking
//!   reader once and reports both digest and byte count
//! - **Opt-out**: [`EmptyHasher`] keeps the call shape when verification
//!   is disabled
//!
//! # Example
//!
//! ```
//! use std::io::Cursor;
//! use stratus_verify::sha1_of_reader;
//!
//! let (digest, len) = sha1_of_reader(&mut Cursor::new(b"hello world"))?;
//! assert_eq!(digest.as_str(), "2aae6c35c94fcfb415dbe95f408b9ce91ee846ed");
//! assert_eq!(len, 11);
//! # Ok::<(), std::io::Error>(())
//! ```

pub use checksum::Sha1Hex;
pub use error::ParseSha1HexError;
pub use hasher::{EmptyHasher, Hasher, Sha1Hasher};
pub use reader::sha1_of_reader;

mod checksum;
mod error;
mod hasher;
mod reader;
