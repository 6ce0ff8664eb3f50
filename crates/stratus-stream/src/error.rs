//! Error types for stratus-stream.

use std::io;

use thiserror::Error;

/// Errors produced by the composable stream layer.
#[derive(Debug, Error)]
pub enum StreamError {
    #[error(transparent)]
    Io(#[from] io::Error),

    #[error("chain requires at least one stream opener")]
    EmptyChain,

    #[error("unsupported seek: streams only rewind to the start")]
    UnsupportedSeek,

    #[error("stream opener failed: {0}")]
    Opener(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl From<StreamError> for io::Error {
    fn from(e: StreamError) -> Self {
        match e {
            StreamError::Io(io) => io,
            StreamError::UnsupportedSeek => {
                io::Error::new(io::ErrorKind::Unsupported, StreamError::UnsupportedSeek)
            }
            other => io::Error::other(other),
        }
    }
}
