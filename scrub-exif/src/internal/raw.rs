use std::io::{Cursor, Read, Seek, SeekFrom, Write};

use scrub_common::math::*;

use crate::error::{Error, Result, ResultExt};

/// Byte order of a TIFF structure
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ByteOrder {
    /// `II`
    #[default]
    LittleEndian,
    /// `MM`
    BigEndian,
}

impl ByteOrder {
    pub fn from_marker(marker: [u8; 2]) -> Option<Self> {
        match &marker {
            b"II" => Some(Self::LittleEndian),
            b"MM" => Some(Self::BigEndian),
            _ => None,
        }
    }

    pub fn u16(self, bytes: [u8; 2]) -> u16 {
        match self {
            Self::LittleEndian => u16::from_le_bytes(bytes),
            Self::BigEndian => u16::from_be_bytes(bytes),
        }
    }

    pub fn u32(self, bytes: [u8; 4]) -> u32 {
        match self {
            Self::LittleEndian => u32::from_le_bytes(bytes),
            Self::BigEndian => u32::from_be_bytes(bytes),
        }
    }

    pub fn u16_bytes(self, value: u16) -> [u8; 2] {
        match self {
            Self::LittleEndian => value.to_le_bytes(),
            Self::BigEndian => value.to_be_bytes(),
        }
    }

    pub fn u32_bytes(self, value: u32) -> [u8; 4] {
        match self {
            Self::LittleEndian => value.to_le_bytes(),
            Self::BigEndian => value.to_be_bytes(),
        }
    }
}

/// Buffer with reader and writer for integers in the buffer's byte order
#[derive(Debug, Clone)]
pub struct Raw {
    pub byte_order: ByteOrder,
    pub buffer: Cursor<Vec<u8>>,
}

impl Raw {
    pub fn new(data: Vec<u8>) -> Self {
        Self {
            byte_order: ByteOrder::default(),
            buffer: Cursor::new(data),
        }
    }

    pub fn into_inner(self) -> Vec<u8> {
        self.buffer.into_inner()
    }

    pub fn len(&self) -> Result<u32> {
        self.buffer.get_ref().len().u32().e(Error::OffsetTooLarge)
    }

    pub fn position(&self) -> Result<u32> {
        self.buffer.position().u32().e(Error::OffsetTooLarge)
    }

    pub fn seek_start(&mut self, seek: u32) -> Result<()> {
        self.buffer.seek(SeekFrom::Start(seek.into()))?;

        Ok(())
    }

    pub fn read_exact<const N: usize>(&mut self) -> Result<[u8; N]> {
        let mut bytes: [u8; N] = [0; N];
        self.buffer.read_exact(&mut bytes)?;
        Ok(bytes)
    }

    pub fn read_u16(&mut self) -> Result<u16> {
        let bytes = self.read_exact()?;
        Ok(self.byte_order.u16(bytes))
    }

    pub fn read_u32(&mut self) -> Result<u32> {
        let bytes = self.read_exact()?;
        Ok(self.byte_order.u32(bytes))
    }

    /// Overwrites existing data
    ///
    /// Writing beyond the end of the buffer is an error since the editor never
    /// adds data.
    pub fn write_all(&mut self, bytes: &[u8]) -> Result<()> {
        let end = self
            .position()?
            .safe_add(bytes.len().u32().e(Error::DataSizeTooLarge)?)?;
        if end > self.len()? {
            return Err(Error::OffsetTooLarge);
        }

        self.buffer.write_all(bytes).map_err(Into::into)
    }

    pub fn write_u16(&mut self, value: u16) -> Result<()> {
        let bytes = self.byte_order.u16_bytes(value);
        self.write_all(&bytes)
    }

    pub fn write_u32(&mut self, value: u32) -> Result<()> {
        let bytes = self.byte_order.u32_bytes(value);
        self.write_all(&bytes)
    }

    /// Cut off all data from `len` on
    pub fn truncate(&mut self, len: u32) -> Result<()> {
        self.buffer.get_mut().truncate(len.usize()?);
        if self.buffer.position() > len.into() {
            self.seek_start(len)?;
        }

        Ok(())
    }
}
