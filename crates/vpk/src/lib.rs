//! VPK - Valve packed archive reading library.
//!
//! This crate provides a unified interface to the VPK crates.
//!
//! # Crates
//!
//! - [`vpk_common`] - Stream reading primitives
//! - [`vpk_archive`] - Header and tree parsing, lookup, content streaming
//!
//! # Example
//!
//! ```no_run
//! use vpk::prelude::*;
//!
//! let archive = VpkArchive::open("pak01_dir.vpk")?;
//!
//! if let Some(entry) = archive.find("materials/brick/wall01.vmt") {
//!     let data = archive.read(entry, "pak01_dir.vpk")?;
//!     println!("{} bytes", data.len());
//! }
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub use vpk_archive as archive;
pub use vpk_common as common;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use vpk_archive::{EntryKey, EntryReader, VpkArchive, VpkEntry};
    pub use vpk_common::ReadExt;
}

pub use vpk_archive::{Error, Result};

/// Version information.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
