//! VPK archive reader for Valve packed archives.
//!
//! A VPK "directory" file (conventionally `*_dir.vpk`) holds a versioned
//! header and a tree of file entries. File contents are split between:
//!
//! - Preload bytes stored inside the tree itself
//! - Data after the tree in the directory file (archive index `0x7FFF`)
//! - Data in numbered sibling parts (`*_000.vpk`, `*_001.vpk`, ...)
//!
//! Parsing is a single sequential pass. The resulting [`VpkArchive`] owns no
//! file handles and can be shared across threads; each content read opens
//! its own handle.
//!
//! # Example
//!
//! ```no_run
//! use std::io::Read;
//! use vpk_archive::VpkArchive;
//!
//! let archive = VpkArchive::open("pak01_dir.vpk")?;
//!
//! for name in archive.list_files() {
//!     println!("{name}");
//! }
//!
//! if let Some(entry) = archive.find("scripts/items/items_game.txt") {
//!     let mut text = String::new();
//!     archive
//!         .open_entry(entry, "pak01_dir.vpk")?
//!         .read_to_string(&mut text)?;
//! }
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

mod archive;
mod content;
mod entry;
mod error;
mod header;
pub mod path;
mod tree;

pub use archive::VpkArchive;
pub use content::{part_path, EntryReader, DIR_SUFFIX};
pub use entry::{EntryKey, VpkEntry, ENTRY_TERMINATOR, INLINE_ARCHIVE_INDEX};
pub use error::{Error, Result};
pub use header::{HeaderV1, HeaderV2, VpkHeader, VPK_SIGNATURE};
pub use tree::{decode_name, read_tree, EntryMap, EntryRecord};
