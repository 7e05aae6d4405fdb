//! Entry content streaming.
//!
//! A file's bytes are its preload (kept in the tree) followed by `length`
//! bytes that live either after the tree in the directory file or in a
//! numbered archive part next to it.

use std::fs::File;
use std::io::{self, Read, Seek, SeekFrom};
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::entry::VpkEntry;
use crate::{Error, Result};

/// Suffix every directory file is expected to carry.
pub const DIR_SUFFIX: &str = "_dir.vpk";

/// Derive the file name of archive part `index` from the directory file name.
///
/// `pak01_dir.vpk` with index 3 becomes `pak01_003.vpk`. A path that is not
/// valid UTF-8 cannot be matched against the suffix and is rejected.
pub fn part_path(container: &Path, index: u16) -> Result<PathBuf> {
    let unexpected = || Error::UnexpectedSuffix {
        filename: container.to_string_lossy().into_owned(),
    };

    let stem = container
        .to_str()
        .ok_or_else(unexpected)?
        .strip_suffix(DIR_SUFFIX)
        .ok_or_else(unexpected)?;

    Ok(PathBuf::from(format!("{stem}_{index:03}.vpk")))
}

/// Reader over the full contents of one entry.
///
/// Yields the preload bytes, then exactly `length` bytes from the data file.
/// Owns its own file handle, which is closed when the reader is dropped.
#[derive(Debug)]
pub struct EntryReader<'a> {
    preload: &'a [u8],
    file: File,
    remaining: u64,
}

impl<'a> EntryReader<'a> {
    /// Open `entry` from the directory file at `container`.
    ///
    /// `tree_offset` is the archive's data offset; it only applies to inline
    /// entries.
    pub(crate) fn open(entry: &'a VpkEntry, tree_offset: u32, container: &Path) -> Result<Self> {
        let (source, start) = if entry.is_inline() {
            (
                container.to_path_buf(),
                u64::from(tree_offset) + u64::from(entry.offset()),
            )
        } else {
            (
                part_path(container, entry.archive_index())?,
                u64::from(entry.offset()),
            )
        };

        debug!(
            source = %source.display(),
            start,
            length = entry.length(),
            "opening entry data"
        );

        let mut file = File::open(&source)?;
        file.seek(SeekFrom::Start(start))?;

        Ok(Self {
            preload: entry.preload(),
            file,
            remaining: u64::from(entry.length()),
        })
    }

    /// Number of bytes still to be read.
    pub fn remaining(&self) -> u64 {
        self.preload.len() as u64 + self.remaining
    }
}

impl Read for EntryReader<'_> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        if buf.is_empty() {
            return Ok(0);
        }

        if !self.preload.is_empty() {
            return self.preload.read(buf);
        }

        if self.remaining == 0 {
            return Ok(0);
        }

        let max = buf.len().min(usize::try_from(self.remaining).unwrap_or(usize::MAX));
        let n = self.file.read(&mut buf[..max])?;
        if n == 0 {
            return Err(io::Error::new(
                io::ErrorKind::UnexpectedEof,
                format!("entry data ends {} bytes early", self.remaining),
            ));
        }

        self.remaining -= n as u64;
        Ok(n)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_part_path() {
        let path = part_path(Path::new("hl2/pak01_dir.vpk"), 3).unwrap();
        assert_eq!(path, PathBuf::from("hl2/pak01_003.vpk"));

        let path = part_path(Path::new("pak01_dir.vpk"), 128).unwrap();
        assert_eq!(path, PathBuf::from("pak01_128.vpk"));
    }

    #[test]
    fn test_part_path_unexpected_suffix() {
        let err = part_path(Path::new("singlefile.vpk"), 0).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Filename \"singlefile.vpk\" does not end with \"_dir.vpk\""
        );
    }

    #[cfg(unix)]
    #[test]
    fn test_part_path_non_utf8() {
        use std::ffi::OsStr;
        use std::os::unix::ffi::OsStrExt;

        let path = Path::new(OsStr::from_bytes(b"pak\xff_dir.vpk"));
        let err = part_path(path, 0).unwrap_err();
        assert!(matches!(err, Error::UnexpectedSuffix { .. }));
    }
}
