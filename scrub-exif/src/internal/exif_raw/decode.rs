use super::*;

impl super::ExifRaw {
    /// Decode header and primary IFD
    ///
    /// Only the primary IFD is decoded. The location of the offset to the
    /// thumbnail IFD is recorded even if the offset is zero.
    pub fn decode(&mut self) -> Result<()> {
        self.locations = Default::default();
        self.ifd_locations = Default::default();

        self.decode_header()?;

        self.add_ifd_offset_location(Ifd::Primary, 4);

        self.decode_ifd_entries(Ifd::Primary)?;

        Ok(())
    }

    pub fn decode_header(&mut self) -> Result<()> {
        self.raw.seek_start(0)?;

        self.read_byte_order()?;
        self.read_magic_42()?;

        let offset = self.raw.read_u32().e(Error::IfdOffsetEof)?;
        self.raw.seek_start(offset)
    }

    pub fn read_byte_order(&mut self) -> Result<()> {
        let marker = self.raw.read_exact().e(Error::ByteOrderEof)?;
        self.raw.byte_order = ByteOrder::from_marker(marker).e(Error::UnkownByteOrder(marker))?;

        Ok(())
    }

    /// Reads the magic number
    ///
    /// A number other than 42 is only logged.
    pub fn read_magic_42(&mut self) -> Result<()> {
        let magic = self.raw.read_u16().e(Error::MagicBytesEof)?;
        if magic != 42 {
            tracing::debug!("TIFF magic number should be 42 but is {magic}");
        }

        Ok(())
    }

    /// Reads the IFD at the current position and returns the offset to the next
    pub fn decode_ifd_entries(&mut self, ifd: Ifd) -> Result<u32> {
        tracing::debug!("Reading number of entries in IFD '{ifd:?}'");
        let n_entries = self.raw.read_u16().e(Error::IfdNumEntriesEof)?;
        tracing::debug!(
            "Reading IFD '{ifd:?}' with {n_entries} entries at byte {}",
            self.raw.position()?
        );

        for _ in 0..n_entries {
            let (tag, entry) = self.read_entry()?;

            if let Some(specific_ifd) = tag.exif_specific_ifd() {
                self.add_ifd_offset_location(specific_ifd, entry.value_offset_position()?);
            }

            self.locations
                .entry(TagIfd::new(tag, ifd))
                .or_default()
                .push(entry);
        }

        let offset_location = self.raw.position()?;
        let ifd_offset = self.raw.read_u32().e(Error::NextIfdOffsetEof)?;

        if ifd == Ifd::Primary {
            self.add_ifd_offset_location(Ifd::Thumbnail, offset_location);
        }

        Ok(ifd_offset)
    }

    /// Adds location of IFD offset
    pub fn add_ifd_offset_location(&mut self, ifd: Ifd, location: u32) -> bool {
        let exists = self.ifd_locations.insert(ifd, location).is_some();

        if exists {
            tracing::info!("IFD '{ifd:?}' referenced twice");
        }

        exists
    }
}
