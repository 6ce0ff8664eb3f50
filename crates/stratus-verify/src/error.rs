//! Error types for stratus-verify.

use thiserror::Error;

/// A string that is not a valid 40-character hex SHA-1 digest.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid sha1 hex digest: {0:?}")]
pub struct ParseSha1HexError(pub String);
