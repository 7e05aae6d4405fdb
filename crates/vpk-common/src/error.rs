//! Error types for vpk-common.

use thiserror::Error;

/// Common error type for VPK stream reads.
#[derive(Debug, Error)]
pub enum Error {
    /// I/O error, including an unexpected end of stream.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Check whether this error was caused by the stream ending early.
    pub fn is_eof(&self) -> bool {
        matches!(self, Self::Io(e) if e.kind() == std::io::ErrorKind::UnexpectedEof)
    }
}

/// Result type alias using the common Error type.
pub type Result<T> = std::result::Result<T, Error>;
