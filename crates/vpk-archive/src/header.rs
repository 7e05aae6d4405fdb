//! VPK header structures.
//!
//! Every VPK directory file starts with an 8-byte start record (signature and
//! version) followed by a version-specific trailer. The trailer fixes where
//! the directory tree ends and inline file data begins.

use std::io::Read;

use tracing::debug;
use vpk_common::ReadExt;

use crate::{Error, Result};

/// VPK signature, stored little-endian as `34 12 AA 55`.
pub const VPK_SIGNATURE: u32 = 0x55AA_1234;

/// Size of the signature + version start record.
const START_SIZE: u32 = 8;

/// Version 1 header trailer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HeaderV1 {
    /// Size of the directory tree in bytes.
    pub tree_length: u32,
}

impl HeaderV1 {
    /// Size of the full v1 header, start record included.
    pub const SIZE: u32 = START_SIZE + 4;
}

/// Version 2 header trailer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HeaderV2 {
    /// Size of the directory tree in bytes.
    pub tree_length: u32,
    /// Reserved.
    pub reserved1: u32,
    /// Size of the footer section.
    pub footer_length: u32,
    /// Reserved.
    pub reserved2: u32,
    /// Reserved.
    pub reserved3: u32,
}

impl HeaderV2 {
    /// Size of the full v2 header, start record included.
    pub const SIZE: u32 = START_SIZE + 20;
}

/// A parsed VPK header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VpkHeader {
    V1(HeaderV1),
    V2(HeaderV2),
}

impl VpkHeader {
    /// Read a header from a stream positioned at the start of the file.
    pub fn read<R: Read>(reader: &mut R) -> Result<Self> {
        let signature = read_field(reader)?;
        if signature != VPK_SIGNATURE {
            return Err(Error::InvalidSignature {
                found: signature,
                expected: VPK_SIGNATURE,
            });
        }

        let version = read_field(reader)?;
        let header = match version {
            1 => Self::V1(HeaderV1 {
                tree_length: read_field(reader)?,
            }),
            2 => Self::V2(HeaderV2 {
                tree_length: read_field(reader)?,
                reserved1: read_field(reader)?,
                footer_length: read_field(reader)?,
                reserved2: read_field(reader)?,
                reserved3: read_field(reader)?,
            }),
            found => return Err(Error::UnsupportedVersion { found }),
        };

        debug!(
            version,
            tree_length = header.tree_length(),
            "read VPK header"
        );

        Ok(header)
    }

    /// Get the header version number.
    pub fn version(&self) -> u32 {
        match self {
            Self::V1(_) => 1,
            Self::V2(_) => 2,
        }
    }

    /// Get the size of the fixed header layout.
    pub fn size(&self) -> u32 {
        match self {
            Self::V1(_) => HeaderV1::SIZE,
            Self::V2(_) => HeaderV2::SIZE,
        }
    }

    /// Get the size of the directory tree in bytes.
    pub fn tree_length(&self) -> u32 {
        match self {
            Self::V1(h) => h.tree_length,
            Self::V2(h) => h.tree_length,
        }
    }

    /// Absolute offset of the first byte after the directory tree.
    ///
    /// Inline entry offsets are relative to this position.
    pub fn tree_offset(&self) -> Result<u32> {
        let tree_length = self.tree_length();
        self.size()
            .checked_add(tree_length)
            .ok_or(Error::TreeOffsetOverflow { tree_length })
    }
}

fn read_field<R: Read>(reader: &mut R) -> Result<u32> {
    reader.read_u32_le().map_err(|e| {
        if e.is_eof() {
            Error::Truncated { section: "header" }
        } else {
            Error::Common(e)
        }
    })
}
