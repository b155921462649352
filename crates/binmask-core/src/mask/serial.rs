//! BMSK serialization - compact container for binary masks
//!
//! Besides the raw element buffer exposed by [`Mask::data`], a mask can be
//! moved between processes in a small self-describing container.
//!
//! # Format layout
//!
//! ```text
//! Offset       Size          Field
//! ------       ----          -----
//! 0            4             "bmsk" magic bytes
//! 4            4             width (u32, little endian)
//! 8            4             height (u32, little endian)
//! 12           w * h         elements, bottom row first, 0x00 or 0x01
//! ```
//!
//! Writers store exactly 0x00/0x01. Readers accept any byte and treat a
//! non-zero one as ON.

use super::Mask;
use crate::binary::{OFF, ON};
use crate::error::{Error, Result};
use std::io::{Read, Write};

/// Magic bytes opening a BMSK stream
pub const BMSK_MAGIC: &[u8; 4] = b"bmsk";

/// Size of the fixed BMSK header in bytes
pub const BMSK_HEADER_SIZE: usize = 12;

/// BMSK header information
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BmskHeader {
    pub width: u32,
    pub height: u32,
}

impl BmskHeader {
    fn parse(bytes: &[u8]) -> Result<Self> {
        if bytes.len() < BMSK_HEADER_SIZE {
            return Err(Error::DecodeError(format!(
                "header needs {} bytes, got {}",
                BMSK_HEADER_SIZE,
                bytes.len()
            )));
        }
        if &bytes[0..4] != BMSK_MAGIC {
            return Err(Error::DecodeError("missing bmsk magic".into()));
        }
        let width = u32::from_le_bytes([bytes[4], bytes[5], bytes[6], bytes[7]]);
        let height = u32::from_le_bytes([bytes[8], bytes[9], bytes[10], bytes[11]]);
        Ok(BmskHeader { width, height })
    }

    fn encode(&self) -> [u8; BMSK_HEADER_SIZE] {
        let mut out = [0u8; BMSK_HEADER_SIZE];
        out[0..4].copy_from_slice(BMSK_MAGIC);
        out[4..8].copy_from_slice(&self.width.to_le_bytes());
        out[8..12].copy_from_slice(&self.height.to_le_bytes());
        out
    }
}

impl Mask {
    /// Build a mask from arbitrary bytes, treating any non-zero byte as ON.
    ///
    /// Unlike [`Mask::wrap`] this copies and normalizes the input.
    ///
    /// # Errors
    ///
    /// - [`Error::IllegalSize`] if width or height is 0
    /// - [`Error::BufferSize`] if `bytes.len() != width * height`
    pub fn from_bytes(width: usize, height: usize, bytes: &[u8]) -> Result<Self> {
        let len = Self::checked_len(width, height)?;
        if bytes.len() != len {
            return Err(Error::BufferSize {
                width,
                height,
                len: bytes.len(),
            });
        }
        let data = bytes.iter().map(|&b| if b != 0 { ON } else { OFF }).collect();
        Ok(Mask {
            width,
            height,
            data,
        })
    }

    /// Copy the elements out as a byte vector, bottom row first.
    pub fn to_bytes(&self) -> Vec<u8> {
        self.data.clone()
    }

    /// Read only the BMSK header.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DecodeError`] if the bytes do not start with a
    /// valid header.
    pub fn read_bmsk_header(bytes: &[u8]) -> Result<BmskHeader> {
        BmskHeader::parse(bytes)
    }

    /// Deserialize a mask from BMSK bytes.
    ///
    /// # Errors
    ///
    /// - [`Error::DecodeError`] for a bad header or a truncated body
    /// - [`Error::IllegalSize`] for a zero dimension
    pub fn read_bmsk_from_bytes(bytes: &[u8]) -> Result<Self> {
        let header = BmskHeader::parse(bytes)?;
        let (w, h) = (header.width as usize, header.height as usize);
        let len = Self::checked_len(w, h)?;
        let body = &bytes[BMSK_HEADER_SIZE..];
        if body.len() != len {
            return Err(Error::DecodeError(format!(
                "expected {} elements for {}x{}, got {}",
                len,
                w,
                h,
                body.len()
            )));
        }
        Mask::from_bytes(w, h, body)
    }

    /// Deserialize a mask from a BMSK stream.
    ///
    /// # Errors
    ///
    /// Same as [`Mask::read_bmsk_from_bytes`], plus [`Error::Io`] when
    /// the reader fails.
    pub fn read_bmsk(reader: &mut impl Read) -> Result<Self> {
        let mut head = [0u8; BMSK_HEADER_SIZE];
        reader.read_exact(&mut head)?;
        let header = BmskHeader::parse(&head)?;
        let (w, h) = (header.width as usize, header.height as usize);
        let len = Self::checked_len(w, h)?;

        // The header is untrusted: grow with the body actually present
        let mut body = Vec::new();
        reader.take(len as u64).read_to_end(&mut body)?;
        if body.len() != len {
            return Err(Error::DecodeError(format!(
                "expected {} elements for {}x{}, got {}",
                len,
                w,
                h,
                body.len()
            )));
        }
        Mask::from_bytes(w, h, &body)
    }

    /// Serialize this mask to BMSK bytes.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidParameter`] if a dimension does not fit in
    /// a `u32`.
    pub fn write_bmsk_to_bytes(&self) -> Result<Vec<u8>> {
        let header = self.bmsk_header()?;
        let mut out = Vec::with_capacity(BMSK_HEADER_SIZE + self.data.len());
        out.extend_from_slice(&header.encode());
        out.extend_from_slice(&self.data);
        Ok(out)
    }

    /// Serialize this mask to a BMSK stream.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Io`] if writing fails and
    /// [`Error::InvalidParameter`] for dimensions beyond `u32`.
    pub fn write_bmsk(&self, writer: &mut impl Write) -> Result<()> {
        let header = self.bmsk_header()?;
        writer.write_all(&header.encode())?;
        writer.write_all(&self.data)?;
        Ok(())
    }

    fn bmsk_header(&self) -> Result<BmskHeader> {
        let width = u32::try_from(self.width)
            .map_err(|_| Error::InvalidParameter(format!("width {} exceeds u32", self.width)))?;
        let height = u32::try_from(self.height)
            .map_err(|_| Error::InvalidParameter(format!("height {} exceeds u32", self.height)))?;
        Ok(BmskHeader { width, height })
    }
}
