// Checksumming, endian-aware writer for dictionary bundles.

use std::io::{self, Write};

use byteorder::{BigEndian, LittleEndian, WriteBytesExt};

use crate::reader::Endian;
use crate::record::Record;

/// Binary writer mirroring [`ByteReader`](crate::reader::ByteReader).
///
/// Keeps a running CRC-32 of everything written so the bundle footer can be
/// emitted with [`ByteWriter::checksum`].
pub struct ByteWriter<W> {
    writer: W,
    endian: Endian,
    hasher: crc32fast::Hasher,
    position: u64,
}

impl<W: Write> ByteWriter<W> {
    pub fn new(writer: W, endian: Endian) -> Self {
        Self {
            writer,
            endian,
            hasher: crc32fast::Hasher::new(),
            position: 0,
        }
    }

    pub fn endian(&self) -> Endian {
        self.endian
    }

    pub fn position(&self) -> u64 {
        self.position
    }

    /// CRC-32 of every byte written so far.
    pub fn checksum(&self) -> u32 {
        self.hasher.clone().finalize()
    }

    /// Write raw bytes without a length prefix.
    pub fn write_raw(&mut self, bytes: &[u8]) -> io::Result<()> {
        self.writer.write_all(bytes)?;
        self.hasher.update(bytes);
        self.position += bytes.len() as u64;
        Ok(())
    }

    pub fn write_u8(&mut self, value: u8) -> io::Result<()> {
        self.write_raw(&[value])
    }

    pub fn write_u16(&mut self, value: u16) -> io::Result<()> {
        let mut buf = [0u8; 2];
        match self.endian {
            Endian::Little => (&mut buf[..]).write_u16::<LittleEndian>(value)?,
            Endian::Big => (&mut buf[..]).write_u16::<BigEndian>(value)?,
        }
        self.write_raw(&buf)
    }

    pub fn write_u32(&mut self, value: u32) -> io::Result<()> {
        let mut buf = [0u8; 4];
        match self.endian {
            Endian::Little => (&mut buf[..]).write_u32::<LittleEndian>(value)?,
            Endian::Big => (&mut buf[..]).write_u32::<BigEndian>(value)?,
        }
        self.write_raw(&buf)
    }

    /// Write a variable-length integer (7 bits per byte, high bit continues).
    pub fn write_varint(&mut self, mut value: u64) -> io::Result<()> {
        let mut buf = [0u8; 10];
        let mut len = 0;
        loop {
            let byte = (value & 0x7F) as u8;
            value >>= 7;
            if value == 0 {
                buf[len] = byte;
                len += 1;
                break;
            }
            buf[len] = byte | 0x80;
            len += 1;
        }
        self.write_raw(&buf[..len])
    }

    pub fn write_len(&mut self, len: usize) -> io::Result<()> {
        self.write_varint(len as u64)
    }

    /// Write a length-prefixed UTF-8 string.
    pub fn write_string(&mut self, value: &str) -> io::Result<()> {
        self.write_len(value.len())?;
        self.write_raw(value.as_bytes())
    }

    /// Write a slice of records in this writer's byte order.
    pub fn write_records<T: Record>(&mut self, records: &[T]) -> io::Result<()> {
        if self.endian.is_native() {
            return self.write_raw(bytemuck::cast_slice(records));
        }
        for record in records {
            let swapped = record.swap_bytes();
            self.write_raw(bytemuck::bytes_of(&swapped))?;
        }
        Ok(())
    }

    pub fn flush(&mut self) -> io::Result<()> {
        self.writer.flush()
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}
