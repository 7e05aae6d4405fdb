//! Stream reading primitives.
//!
//! VPK directory files are parsed front to back from a stream: the tree
//! section has no index, so each record has to be decoded in order. This
//! module extends [`Read`] with the handful of operations the format needs.

use std::io::Read;

use byteorder::{LittleEndian, ReadBytesExt};

use crate::Result;

/// Extension trait for reading VPK primitives from a stream.
///
/// All integers are little-endian.
///
/// # Example
///
/// ```
/// use vpk_common::ReadExt;
///
/// let data = b"txt\0\x34\x12\xaa\x55";
/// let mut reader = &data[..];
/// let mut buf = Vec::new();
///
/// assert_eq!(reader.read_cstring_into(&mut buf).unwrap(), b"txt");
/// assert_eq!(reader.read_u32_le().unwrap(), 0x55aa1234);
/// ```
pub trait ReadExt: Read {
    /// Read a little-endian u16.
    #[inline]
    fn read_u16_le(&mut self) -> Result<u16> {
        Ok(self.read_u16::<LittleEndian>()?)
    }

    /// Read a little-endian u32.
    #[inline]
    fn read_u32_le(&mut self) -> Result<u32> {
        Ok(self.read_u32::<LittleEndian>()?)
    }

    /// Read a NUL-terminated string into a reusable buffer.
    ///
    /// The buffer is cleared first and holds the string bytes (without the
    /// terminator) afterwards. Reading stops at the first NUL byte; hitting
    /// the end of the stream before it is an error. No text encoding is
    /// assumed.
    fn read_cstring_into<'b>(&mut self, buf: &'b mut Vec<u8>) -> Result<&'b [u8]> {
        buf.clear();

        loop {
            match self.read_u8()? {
                0 => break,
                c => buf.push(c),
            }
        }

        Ok(buf)
    }

    /// Read exactly `count` bytes into a new vector.
    fn read_vec(&mut self, count: usize) -> Result<Vec<u8>> {
        let mut bytes = vec![0u8; count];
        self.read_exact(&mut bytes)?;
        Ok(bytes)
    }
}

impl<R: Read + ?Sized> ReadExt for R {}
