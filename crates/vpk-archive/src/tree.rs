//! Directory tree decoding.
//!
//! The tree is three nested lists of NUL-terminated strings: extensions,
//! then paths within an extension, then file names within a path. An empty
//! string closes the current level. Each file name is followed by a fixed
//! 18-byte record and its preload bytes.
//!
//! Names are lower-cased when decoded so that keys match what
//! [`path::resolve`](crate::path::resolve) produces for a query.

use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::io::Read;

use tracing::{debug, trace, warn};
use vpk_common::ReadExt;

use crate::entry::{EntryKey, VpkEntry, ENTRY_TERMINATOR};
use crate::{Error, Result};

/// Entries indexed by their `(extension, path, filename)` key.
pub type EntryMap = HashMap<EntryKey, VpkEntry>;

/// Fixed part of a tree entry, as stored after the file name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EntryRecord {
    pub crc: u32,
    pub preload_length: u16,
    pub archive_index: u16,
    pub entry_offset: u32,
    pub entry_length: u32,
    pub terminator: u16,
}

impl EntryRecord {
    /// Encoded size of the record in bytes.
    pub const SIZE: usize = 18;

    /// Decode a record field by field.
    pub fn read<R: Read>(reader: &mut R) -> Result<Self> {
        Ok(Self {
            crc: reader.read_u32_le()?,
            preload_length: reader.read_u16_le()?,
            archive_index: reader.read_u16_le()?,
            entry_offset: reader.read_u32_le()?,
            entry_length: reader.read_u32_le()?,
            terminator: reader.read_u16_le()?,
        })
    }
}

/// Decode the whole directory tree.
///
/// The reader must be positioned right after the header. Any I/O error or
/// duplicate entry aborts the parse; no partial map is returned.
pub fn read_tree<R: Read>(reader: &mut R) -> Result<EntryMap> {
    let mut buf = Vec::with_capacity(64);
    let mut entries = EntryMap::new();

    loop {
        let extension = decode_name(reader.read_cstring_into(&mut buf)?);
        if extension.is_empty() {
            break;
        }

        loop {
            let path = decode_name(reader.read_cstring_into(&mut buf)?);
            if path.is_empty() {
                break;
            }

            loop {
                let filename = decode_name(reader.read_cstring_into(&mut buf)?);
                if filename.is_empty() {
                    break;
                }

                let key = EntryKey::new(extension.as_str(), path.as_str(), filename);
                read_entry(reader, key, &mut entries)?;
            }
        }
    }

    debug!(entries = entries.len(), "decoded VPK tree");

    Ok(entries)
}

/// Decode a tree name and lower-case it.
///
/// Names are UTF-8 in practice. Anything else is taken as Latin-1, one
/// character per byte, so no byte sequence is rejected.
pub fn decode_name(bytes: &[u8]) -> String {
    match std::str::from_utf8(bytes) {
        Ok(name) => name.to_lowercase(),
        Err(_) => bytes.iter().map(|&b| char::from(b)).collect::<String>().to_lowercase(),
    }
}

fn read_entry<R: Read>(reader: &mut R, key: EntryKey, entries: &mut EntryMap) -> Result<()> {
    let record = EntryRecord::read(reader)?;

    if record.terminator != ENTRY_TERMINATOR {
        warn!(
            terminator = record.terminator,
            extension = %key.extension,
            path = %key.path,
            filename = %key.filename,
            "unexpected entry terminator"
        );
    }

    let slot = match entries.entry(key) {
        Entry::Occupied(slot) => {
            let key = slot.key().clone();
            return Err(Error::DuplicateEntry {
                extension: key.extension,
                path: key.path,
                filename: key.filename,
            });
        }
        Entry::Vacant(slot) => slot,
    };

    let preload = reader.read_vec(usize::from(record.preload_length))?;

    trace!(
        path = %slot.key().path,
        filename = %slot.key().filename,
        extension = %slot.key().extension,
        archive_index = record.archive_index,
        preload = preload.len(),
        length = record.entry_length,
        "decoded entry"
    );

    let entry = VpkEntry::new(
        slot.key().clone(),
        record.crc,
        preload,
        record.archive_index,
        record.entry_offset,
        record.entry_length,
    );
    slot.insert(entry);

    Ok(())
}
