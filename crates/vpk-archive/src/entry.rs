//! VPK archive entry.

use crate::path;

/// Archive index marking data stored inline in the directory file.
pub const INLINE_ARCHIVE_INDEX: u16 = 0x7FFF;

/// Value the tree writer places after every fixed entry record.
pub const ENTRY_TERMINATOR: u16 = 0xFFFF;

/// Lookup key of an entry: `(extension, path, filename)`.
///
/// Empty components are stored as the single-space placeholder
/// [`path::PLACEHOLDER`], matching what Valve's tools write.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct EntryKey {
    pub extension: String,
    pub path: String,
    pub filename: String,
}

impl EntryKey {
    /// Create a key from already-normalized components.
    pub fn new(
        extension: impl Into<String>,
        path: impl Into<String>,
        filename: impl Into<String>,
    ) -> Self {
        Self {
            extension: extension.into(),
            path: path.into(),
            filename: filename.into(),
        }
    }
}

/// An entry (file) within a VPK archive.
///
/// This holds the tree metadata and the preload bytes, not the remaining
/// file data. Use [`VpkArchive::open_entry`](crate::VpkArchive::open_entry)
/// to stream the full contents.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VpkEntry {
    key: EntryKey,
    crc: u32,
    preload: Vec<u8>,
    archive_index: u16,
    offset: u32,
    length: u32,
}

impl VpkEntry {
    pub(crate) fn new(
        key: EntryKey,
        crc: u32,
        preload: Vec<u8>,
        archive_index: u16,
        offset: u32,
        length: u32,
    ) -> Self {
        Self {
            key,
            crc,
            preload,
            archive_index,
            offset,
            length,
        }
    }

    /// Get the lookup key.
    #[inline]
    pub fn key(&self) -> &EntryKey {
        &self.key
    }

    /// Get the extension component (`" "` when the file has none).
    #[inline]
    pub fn extension(&self) -> &str {
        &self.key.extension
    }

    /// Get the directory path component (`" "` for the root).
    #[inline]
    pub fn path(&self) -> &str {
        &self.key.path
    }

    /// Get the file name without extension.
    #[inline]
    pub fn filename(&self) -> &str {
        &self.key.filename
    }

    /// Get the CRC32 recorded in the tree. Not verified by this crate.
    #[inline]
    pub fn crc(&self) -> u32 {
        self.crc
    }

    /// Get the preload bytes stored inside the tree.
    #[inline]
    pub fn preload(&self) -> &[u8] {
        &self.preload
    }

    /// Get the archive part index, or [`INLINE_ARCHIVE_INDEX`].
    #[inline]
    pub fn archive_index(&self) -> u16 {
        self.archive_index
    }

    /// Get the data offset (relative to the tree end for inline entries).
    #[inline]
    pub fn offset(&self) -> u32 {
        self.offset
    }

    /// Get the number of bytes stored outside the preload.
    #[inline]
    pub fn length(&self) -> u32 {
        self.length
    }

    /// Check if the non-preload bytes live in the directory file itself.
    #[inline]
    pub fn is_inline(&self) -> bool {
        self.archive_index == INLINE_ARCHIVE_INDEX
    }

    /// Get the full size of the file contents.
    #[inline]
    pub fn total_len(&self) -> u64 {
        self.preload.len() as u64 + u64::from(self.length)
    }

    /// Get the canonical name, e.g. `materials/brick.vmt`.
    pub fn full_path(&self) -> String {
        path::join(&self.key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(archive_index: u16, preload: &[u8], length: u32) -> VpkEntry {
        VpkEntry::new(
            EntryKey::new("vmt", "materials/brick", "wall01"),
            0xDEADBEEF,
            preload.to_vec(),
            archive_index,
            0,
            length,
        )
    }

    #[test]
    fn test_is_inline() {
        assert!(entry(INLINE_ARCHIVE_INDEX, b"", 0).is_inline());
        assert!(!entry(0, b"", 0).is_inline());
        // Only the operational sentinel counts as inline.
        assert!(!entry(0xFFFF, b"", 0).is_inline());
    }

    #[test]
    fn test_total_len() {
        assert_eq!(entry(0, b"abcd", 10).total_len(), 14);
        assert_eq!(entry(0, b"", u32::MAX).total_len(), u64::from(u32::MAX));
    }

    #[test]
    fn test_full_path() {
        assert_eq!(
            entry(0, b"", 0).full_path(),
            "materials/brick/wall01.vmt"
        );
    }
}
