//! VPK archive model.

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use tracing::debug;

use crate::content::EntryReader;
use crate::entry::{EntryKey, VpkEntry};
use crate::header::VpkHeader;
use crate::path;
use crate::tree::{self, EntryMap};
use crate::Result;

/// A parsed VPK directory.
///
/// Holds the tree and the data offset only; no file handles. Every content
/// read opens its own handle, so the archive can be shared between threads.
#[derive(Debug, Clone)]
pub struct VpkArchive {
    /// Absolute offset of inline file data in the directory file
    tree_offset: u32,
    /// Entries keyed by `(extension, path, filename)`
    entries: EntryMap,
}

impl VpkArchive {
    /// Parse a VPK directory from a stream positioned at its start.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        let mut reader = BufReader::new(reader);

        let header = VpkHeader::read(&mut reader)?;
        let tree_offset = header.tree_offset()?;
        let entries = tree::read_tree(&mut reader)?;

        debug!(
            version = header.version(),
            tree_offset,
            entries = entries.len(),
            "opened VPK archive"
        );

        Ok(Self {
            tree_offset,
            entries,
        })
    }

    /// Open and parse the directory file at `path`.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        Self::from_reader(File::open(path)?)
    }

    /// Get the absolute offset where inline file data begins.
    #[inline]
    pub fn tree_offset(&self) -> u32 {
        self.tree_offset
    }

    /// Get the number of entries.
    #[inline]
    pub fn entry_count(&self) -> usize {
        self.entries.len()
    }

    /// Iterate over all entries in no particular order.
    #[inline]
    pub fn iter(&self) -> impl Iterator<Item = &VpkEntry> + '_ {
        self.entries.values()
    }

    /// List the canonical names of all files, in no particular order.
    pub fn list_files(&self) -> Vec<String> {
        self.entries.keys().map(path::join).collect()
    }

    /// Find an entry by logical name (case-insensitive).
    pub fn find(&self, name: &str) -> Option<&VpkEntry> {
        self.get(&path::resolve(name))
    }

    /// Find an entry by its exact key.
    #[inline]
    pub fn get(&self, key: &EntryKey) -> Option<&VpkEntry> {
        self.entries.get(key)
    }

    /// Open a reader over the full contents of `entry`.
    ///
    /// `container` is the path of the directory file this archive was parsed
    /// from; archive parts are located next to it.
    pub fn open_entry<'a, P: AsRef<Path>>(
        &self,
        entry: &'a VpkEntry,
        container: P,
    ) -> Result<EntryReader<'a>> {
        EntryReader::open(entry, self.tree_offset, container.as_ref())
    }

    /// Read the full contents of `entry` into memory.
    pub fn read<P: AsRef<Path>>(&self, entry: &VpkEntry, container: P) -> Result<Vec<u8>> {
        let mut reader = self.open_entry(entry, container)?;
        let mut data = Vec::with_capacity(usize::try_from(entry.total_len()).unwrap_or(0));
        reader.read_to_end(&mut data)?;
        Ok(data)
    }

    /// Parallel extraction of multiple entries.
    ///
    /// Each read opens its own file handle.
    #[cfg(feature = "parallel")]
    pub fn read_parallel<P: AsRef<Path> + Sync>(
        &self,
        entries: &[&VpkEntry],
        container: P,
    ) -> Vec<Result<Vec<u8>>> {
        use rayon::prelude::*;

        entries
            .par_iter()
            .map(|entry| self.read(entry, container.as_ref()))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EMPTY_V1: &[u8] = b"\x34\x12\xaa\x55\x01\x00\x00\x00\x01\x00\x00\x00\x00";

    #[test]
    fn test_empty_archive() {
        let archive = VpkArchive::from_reader(EMPTY_V1).unwrap();

        assert_eq!(archive.tree_offset(), 13);
        assert_eq!(archive.entry_count(), 0);
        assert!(archive.list_files().is_empty());
        assert!(archive.find("some/file.txt").is_none());
        assert!(archive.find("").is_none());
    }

    #[test]
    fn test_not_a_vpk() {
        let err = VpkArchive::from_reader(&b"This is plain text"[..]).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Invalid signature 0x73696854 (expected 0x55aa1234)"
        );
    }

    #[test]
    fn test_archive_is_shareable() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<VpkArchive>();
    }
}
