//! Error types for stratus-transfer.

use std::io;

use thiserror::Error;

use stratus_stream::StreamError;

/// Errors surfaced by transport capability implementations.
///
/// The engine retries `Interrupted` errors within a part's attempt
/// budget; `Fatal` errors abort the whole operation immediately.
#[derive(Debug, Error)]
pub enum TransportError {
    #[error("stream interrupted: {reason}")]
    Interrupted { reason: String },

    #[error("transport failure: {reason}")]
    Fatal { reason: String },
}

impl TransportError {
    pub fn interrupted(reason: impl Into<String>) -> Self {
        Self::Interrupted {
            reason: reason.into(),
        }
    }

    pub fn fatal(reason: impl Into<String>) -> Self {
        Self::Fatal {
            reason: reason.into(),
        }
    }

    /// Whether the engine may retry after this error.
    pub fn is_retryable(&self) -> bool {
        matches!(self, TransportError::Interrupted { .. })
    }
}

/// Errors raised by planning and transfer operations.
#[derive(Debug, Error)]
pub enum TransferError {
    #[error("invalid source: {0}")]
    InvalidSource(String),

    #[error("remote subpart requires a range fetcher")]
    MissingRangeFetcher,

    #[error(transparent)]
    Stream(#[from] StreamError),

    #[error(transparent)]
    Io(#[from] io::Error),

    #[error(transparent)]
    Transport(#[from] TransportError),

    #[error("truncated output: only {bytes_read} of {expected} bytes read")]
    TruncatedOutput { bytes_read: u64, expected: u64 },

    #[error("checksum mismatch: expected {expected}, got {actual}")]
    ChecksumMismatch { expected: String, actual: String },
}

pub type Result<T> = std::result::Result<T, TransferError>;
