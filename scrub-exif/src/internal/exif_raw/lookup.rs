use std::io::Read;

use super::*;

impl super::ExifRaw {
    pub fn lookup_entry(&self, tagifd: TagIfd) -> Option<EntryRef> {
        self.locations
            .get(&tagifd)
            .and_then(|x| x.first())
            .copied()
    }

    /// All decoded entries of an IFD
    pub fn ifd_entries(&self, ifd: Ifd) -> impl Iterator<Item = (Tag, &EntryRef)> {
        self.locations
            .iter()
            .filter(move |(tagifd, _)| tagifd.ifd == ifd)
            .flat_map(|(tagifd, entries)| {
                let tag = tagifd.tag;
                entries.iter().map(move |entry| (tag, entry))
            })
    }

    pub fn lookup_data(&mut self, tagifd: TagIfd) -> Result<Option<(Type, Vec<u8>)>> {
        let Some(entry) = self.lookup_entry(tagifd) else {
            return Ok(None);
        };

        let value = match entry.value_offset {
            ValueOffset::Offset(offset) => {
                self.raw.seek_start(offset)?;
                let mut buf = vec![0; entry.data_len()?.usize()?];
                self.raw.buffer.read_exact(&mut buf).e(Error::ValueEof)?;
                buf
            }
            ValueOffset::Value(value) => {
                let mut bytes = self.raw.byte_order.u32_bytes(value).to_vec();
                bytes.truncate(entry.data_len()?.usize()?);
                bytes
            }
        };

        Ok(Some((entry.data_type, value)))
    }

    /// Returns an ASCII or UTF-8 field with NULL bytes removed
    pub fn lookup_string(&mut self, tagifd: TagIfd) -> Result<Option<String>> {
        let Some((_, data)) = self.lookup_data(tagifd)? else {
            return Ok(None);
        };

        let data = data.into_iter().filter(|x| *x != 0).collect::<Vec<_>>();

        Ok(Some(String::from_utf8_lossy(&data).to_string()))
    }

    /// Read a single entry from IFD
    pub fn read_entry(&mut self) -> Result<(Tag, EntryRef)> {
        let position = self.raw.position()?;
        let tag_id = self.raw.read_u16().e(Error::EntryEof)?;
        let data_type = self.raw.read_u16().e(Error::EntryEof)?.into();
        let count = self.raw.read_u32().e(Error::EntryEof)?;
        let value = ValueOffset::new(data_type, count, self.raw.read_u32().e(Error::EntryEof)?);

        Ok((
            Tag(tag_id),
            EntryRef {
                position,
                data_type,
                count,
                value_offset: value,
            },
        ))
    }

    /// Number of bytes an IFD occupies including the data its entries point to
    ///
    /// Fails if any part is not within the data.
    pub fn ifd_extent(&mut self, offset: u32) -> Result<u64> {
        self.raw.seek_start(offset)?;
        let n_entries = self.raw.read_u16().e(Error::IfdNumEntriesEof)?;

        let mut extent = u64::from(n_entries)
            .safe_mul(ENTRY_SIZE.into())?
            .safe_add(2 + 4)?;

        let mut value_offsets = Vec::new();
        for _ in 0..n_entries {
            let (_, entry) = self.read_entry()?;
            if let Some(offset) = entry.offset() {
                value_offsets.push((offset, entry.data_len()?));
            }
        }
        self.raw.read_u32().e(Error::NextIfdOffsetEof)?;

        let len = self.raw.len()?;
        for (offset, data_len) in value_offsets {
            if offset.safe_add(data_len)? > len {
                return Err(Error::ValueEof);
            }
            extent = extent.safe_add(data_len.into())?;
        }

        Ok(extent)
    }
}
