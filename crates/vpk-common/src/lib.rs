//! Common utilities for the VPK crates.
//!
//! This crate provides the low-level pieces shared by the archive reader:
//!
//! - [`ReadExt`] - Little-endian integers, NUL-terminated strings and
//!   fixed-size byte blocks read straight from any [`std::io::Read`]
//! - [`Error`] - The error type those reads produce

mod error;
mod reader;

pub use error::{Error, Result};
pub use reader::ReadExt;
