// Checksumming, endian-aware reader for dictionary bundles.
//
// Every byte consumed is fed into a running CRC-32 so the footer checksum can
// be verified without buffering the whole bundle.

use std::io::{self, Read};

use byteorder::{BigEndian, LittleEndian, ReadBytesExt};

use crate::FormatError;
use crate::record::Record;

/// Maximum encoded length of a `u64` varint.
const MAX_VARINT_BYTES: usize = 10;

/// Upper bound on speculative preallocation driven by untrusted counts.
const MAX_PREALLOC: usize = 4096;

/// Records copied per read when loading a record table.
const RECORD_CHUNK: usize = 16 * 1024;

/// Byte order of multi-byte integers in a bundle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Endian {
    Little,
    Big,
}

impl Endian {
    /// Byte order of the running platform.
    pub const fn native() -> Self {
        if cfg!(target_endian = "little") {
            Endian::Little
        } else {
            Endian::Big
        }
    }

    #[inline]
    pub fn is_native(self) -> bool {
        self == Endian::native()
    }
}

/// Reader adapter that hashes everything passing through it.
struct Checksummed<R> {
    inner: R,
    hasher: crc32fast::Hasher,
    position: u64,
}

impl<R: Read> Read for Checksummed<R> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        let n = self.inner.read(buf)?;
        self.hasher.update(&buf[..n]);
        self.position += n as u64;
        Ok(n)
    }
}

/// Map an I/O error to a [`FormatError`] tagged with the current section.
fn io_error(section: &'static str, err: io::Error) -> FormatError {
    if err.kind() == io::ErrorKind::UnexpectedEof {
        FormatError::Truncated { section }
    } else {
        FormatError::Io {
            section,
            source: err,
        }
    }
}

/// Binary reader for bundle sections.
///
/// Integers are decoded in the byte order announced by the bundle header
/// (see [`ByteReader::set_endian`]). Errors carry the name of the section set
/// with [`ByteReader::set_section`].
pub struct ByteReader<R> {
    source: Checksummed<R>,
    endian: Endian,
    section: &'static str,
}

impl<R: Read> ByteReader<R> {
    pub fn new(inner: R) -> Self {
        Self {
            source: Checksummed {
                inner,
                hasher: crc32fast::Hasher::new(),
                position: 0,
            },
            endian: Endian::native(),
            section: "header",
        }
    }

    pub fn endian(&self) -> Endian {
        self.endian
    }

    pub fn set_endian(&mut self, endian: Endian) {
        self.endian = endian;
    }

    /// Name of the section currently being decoded.
    pub fn section(&self) -> &'static str {
        self.section
    }

    pub fn set_section(&mut self, section: &'static str) {
        self.section = section;
    }

    /// Number of bytes consumed so far.
    pub fn position(&self) -> u64 {
        self.source.position
    }

    /// CRC-32 of every byte consumed so far.
    pub fn checksum(&self) -> u32 {
        self.source.hasher.clone().finalize()
    }

    /// Read exactly `N` raw bytes.
    pub fn read_array<const N: usize>(&mut self) -> Result<[u8; N], FormatError> {
        let mut buf = [0u8; N];
        let section = self.section;
        self.source
            .read_exact(&mut buf)
            .map_err(|e| io_error(section, e))?;
        Ok(buf)
    }

    pub fn read_u8(&mut self) -> Result<u8, FormatError> {
        let section = self.section;
        self.source.read_u8().map_err(|e| io_error(section, e))
    }

    pub fn read_u16(&mut self) -> Result<u16, FormatError> {
        let section = self.section;
        match self.endian {
            Endian::Little => self.source.read_u16::<LittleEndian>(),
            Endian::Big => self.source.read_u16::<BigEndian>(),
        }
        .map_err(|e| io_error(section, e))
    }

    pub fn read_u32(&mut self) -> Result<u32, FormatError> {
        let section = self.section;
        match self.endian {
            Endian::Little => self.source.read_u32::<LittleEndian>(),
            Endian::Big => self.source.read_u32::<BigEndian>(),
        }
        .map_err(|e| io_error(section, e))
    }

    /// Read a variable-length integer (7 bits per byte, high bit continues).
    pub fn read_varint(&mut self) -> Result<u64, FormatError> {
        let mut value = 0u64;
        let mut shift = 0u32;
        for _ in 0..MAX_VARINT_BYTES {
            let byte = self.read_u8()?;
            let low = u64::from(byte & 0x7F);
            if shift == 63 && low > 1 {
                return Err(FormatError::VarintOverflow {
                    section: self.section,
                });
            }
            value |= low << shift;
            if byte & 0x80 == 0 {
                return Ok(value);
            }
            shift += 7;
        }
        Err(FormatError::VarintOverflow {
            section: self.section,
        })
    }

    /// Read a varint used as a length or count.
    pub fn read_len(&mut self) -> Result<usize, FormatError> {
        let value = self.read_varint()?;
        usize::try_from(value).map_err(|_| FormatError::VarintOverflow {
            section: self.section,
        })
    }

    /// Read a varint that must fit in a `u16` identifier.
    pub fn read_id(&mut self) -> Result<u16, FormatError> {
        let value = self.read_varint()?;
        u16::try_from(value).map_err(|_| {
            FormatError::inconsistent(self.section, format!("identifier {value} exceeds u16"))
        })
    }

    /// Read a length-prefixed UTF-8 string.
    pub fn read_string(&mut self) -> Result<String, FormatError> {
        let len = self.read_len()?;
        let section = self.section;
        let mut buf = Vec::with_capacity(len.min(MAX_PREALLOC));
        (&mut self.source)
            .take(len as u64)
            .read_to_end(&mut buf)
            .map_err(|e| io_error(section, e))?;
        if buf.len() != len {
            return Err(FormatError::Truncated { section });
        }
        String::from_utf8(buf).map_err(|_| FormatError::InvalidUtf8 { section })
    }

    /// Read a 4-byte section tag and check that it is `expected`.
    pub fn expect_tag(&mut self, expected: &[u8; 4]) -> Result<(), FormatError> {
        let found = self.read_array::<4>()?;
        if &found != expected {
            return Err(FormatError::UnexpectedSection {
                expected: String::from_utf8_lossy(expected).into_owned(),
                found: String::from_utf8_lossy(&found).into_owned(),
            });
        }
        Ok(())
    }

    /// Read `count` fixed-size records.
    ///
    /// Records are copied into an aligned `Vec<T>` in bulk and byte-swapped
    /// afterwards when the bundle byte order differs from the platform's.
    pub fn read_records<T: Record>(&mut self, count: usize) -> Result<Vec<T>, FormatError> {
        let section = self.section;
        let mut records: Vec<T> = Vec::with_capacity(count.min(MAX_PREALLOC));
        let mut remaining = count;
        while remaining > 0 {
            let n = remaining.min(RECORD_CHUNK);
            let start = records.len();
            records.resize(start + n, T::zeroed());
            let dst = bytemuck::cast_slice_mut::<T, u8>(&mut records[start..]);
            self.source
                .read_exact(dst)
                .map_err(|e| io_error(section, e))?;
            remaining -= n;
        }
        if !self.endian.is_native() {
            for record in &mut records {
                *record = record.swap_bytes();
            }
        }
        Ok(records)
    }
}
