mod decode;
mod edit;
mod lookup;

use std::collections::BTreeMap;

use scrub_common::math::*;

use super::*;
use crate::error::{Error, Result, ResultExt};

/// Size reported for a removed GPS IFD that can not be measured
pub const GPS_IFD_NOMINAL_SIZE: u64 = 200;

/// Size of an IFD entry in bytes
pub const ENTRY_SIZE: u32 = 12;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EntryRef {
    pub position: u32,
    pub data_type: Type,
    pub count: u32,
    pub value_offset: ValueOffset,
}

impl EntryRef {
    pub fn value_offset_position(&self) -> Result<u32> {
        Ok(self.position.safe_add(8)?)
    }

    pub fn data_len(&self) -> Result<u32> {
        self.count
            .checked_mul(self.data_type.size())
            .e(Error::DataSizeTooLarge)
    }

    /// Data size derived from type and count
    ///
    /// Unlike [`Self::data_len`] this can not overflow.
    pub fn data_size(&self) -> u64 {
        u64::from(self.count).saturating_mul(self.data_type.size().into())
    }

    pub fn offset(&self) -> Option<u32> {
        if let ValueOffset::Offset(offset) = self.value_offset {
            Some(offset)
        } else {
            None
        }
    }
}

/// This can either be a value or an offset where to find the value
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueOffset {
    Value(u32),
    Offset(u32),
}

impl ValueOffset {
    /// Sizes that do not fit into `u32` are treated as offsets
    fn new(data_type: Type, count: u32, value: u32) -> Self {
        match data_type.size().checked_mul(count) {
            Some(size) if size <= 4 => Self::Value(value),
            _ => Self::Offset(value),
        }
    }

    pub fn u32(&self) -> u32 {
        match self {
            Self::Value(x) => *x,
            Self::Offset(x) => *x,
        }
    }
}

/// Exif data with the positions of decoded entries
///
/// All positions are relative to the start of the TIFF header.
#[derive(Debug, Clone)]
pub struct ExifRaw {
    pub raw: Raw,
    pub locations: BTreeMap<TagIfd, Vec<EntryRef>>,
    /// The locations where the offsets to IFDs are stored
    pub ifd_locations: BTreeMap<Ifd, u32>,
}

impl ExifRaw {
    pub fn new(raw: Vec<u8>) -> Self {
        Self {
            raw: Raw::new(raw),
            locations: Default::default(),
            ifd_locations: Default::default(),
        }
    }

    pub fn into_inner(self) -> Vec<u8> {
        self.raw.into_inner()
    }

    pub fn byte_order(&self) -> ByteOrder {
        self.raw.byte_order
    }
}
