//! Error types for the VPK archive crate.

use thiserror::Error;

/// Errors that can occur when working with VPK archives.
#[derive(Debug, Error)]
pub enum Error {
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Common library error.
    #[error("{0}")]
    Common(#[from] vpk_common::Error),

    /// The file does not start with the VPK signature.
    #[error("Invalid signature {found:#010x} (expected {expected:#010x})")]
    InvalidSignature { found: u32, expected: u32 },

    /// The header names a version this reader does not know.
    #[error("Unknown version {found}")]
    UnsupportedVersion { found: u32 },

    /// The stream ended inside a fixed-size section.
    #[error("truncated {section}")]
    Truncated { section: &'static str },

    /// The tree length pushes the data offset past `u32::MAX`.
    #[error("tree length {tree_length} overflows the data offset")]
    TreeOffsetOverflow { tree_length: u32 },

    /// The tree lists the same file twice.
    #[error("Duplicate file in same tree: {path}/{filename}.{extension}")]
    DuplicateEntry {
        extension: String,
        path: String,
        filename: String,
    },

    /// Data lives in an archive part but the container name has no `_dir.vpk` suffix.
    #[error("Filename {filename:?} does not end with \"_dir.vpk\"")]
    UnexpectedSuffix { filename: String },
}

/// Result type for VPK operations.
pub type Result<T> = std::result::Result<T, Error>;
