// Bundle header, section tags and footer.
//
// Header layout:
//   [0..4)  magic "MDIC"
//   [4..6)  byte-order mark 0xFEFF, written in the bundle's byte order
//   [6..8)  format version (u16)
//   [8..)   language code (length-prefixed string)
//
// Footer: tag "DEND" followed by the CRC-32 (u32) of every byte that precedes
// the footer tag.

use std::io::{self, Read, Write};

use crate::FormatError;
use crate::reader::{ByteReader, Endian};
use crate::writer::ByteWriter;

pub const MAGIC: [u8; 4] = *b"MDIC";
pub const BYTE_ORDER_MARK: u16 = 0xFEFF;
pub const FORMAT_VERSION: u16 = 1;

pub const TAG_GRAMMEMES: [u8; 4] = *b"GRAM";
pub const TAG_TAGS: [u8; 4] = *b"TAGS";
pub const TAG_PARADIGMS: [u8; 4] = *b"PARA";
pub const TAG_RANKS: [u8; 4] = *b"RANK";
pub const TAG_WORDS: [u8; 4] = *b"WORD";
pub const TAG_PREDICTION: [u8; 4] = *b"PRED";
pub const TAG_FOOTER: [u8; 4] = *b"DEND";

/// Parsed bundle header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BundleHeader {
    pub endian: Endian,
    pub version: u16,
    pub language: String,
}

/// Read and validate the bundle header.
///
/// The byte-order mark decides how every later integer is decoded; the
/// reader is switched to that byte order before returning.
pub fn read_header<R: Read>(reader: &mut ByteReader<R>) -> Result<BundleHeader, FormatError> {
    reader.set_section("header");
    let magic = reader.read_array::<4>()?;
    if magic != MAGIC {
        return Err(FormatError::InvalidMagic);
    }

    let bom = reader.read_array::<2>()?;
    let endian = match bom {
        [0xFF, 0xFE] => Endian::Little,
        [0xFE, 0xFF] => Endian::Big,
        other => return Err(FormatError::InvalidByteOrderMark(u16::from_le_bytes(other))),
    };
    reader.set_endian(endian);

    let version = reader.read_u16()?;
    if version != FORMAT_VERSION {
        return Err(FormatError::UnsupportedVersion {
            found: version,
            supported: FORMAT_VERSION,
        });
    }

    let language = reader.read_string()?;
    Ok(BundleHeader {
        endian,
        version,
        language,
    })
}

/// Write a bundle header in the writer's byte order.
pub fn write_header<W: Write>(writer: &mut ByteWriter<W>, language: &str) -> io::Result<()> {
    writer.write_raw(&MAGIC)?;
    writer.write_u16(BYTE_ORDER_MARK)?;
    writer.write_u16(FORMAT_VERSION)?;
    writer.write_string(language)
}

/// Read the footer and verify the checksum of everything before it.
pub fn read_footer<R: Read>(reader: &mut ByteReader<R>) -> Result<(), FormatError> {
    reader.set_section("footer");
    let computed = reader.checksum();
    reader.expect_tag(&TAG_FOOTER)?;
    let stored = reader.read_u32()?;
    if stored != computed {
        return Err(FormatError::ChecksumMismatch { stored, computed });
    }
    Ok(())
}

/// Write the footer tag and checksum.
pub fn write_footer<W: Write>(writer: &mut ByteWriter<W>) -> io::Result<()> {
    let checksum = writer.checksum();
    writer.write_raw(&TAG_FOOTER)?;
    writer.write_u32(checksum)
}
