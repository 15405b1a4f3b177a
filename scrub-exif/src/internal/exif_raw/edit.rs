use super::*;

impl super::ExifRaw {
    /// Removes the thumbnail IFD and all data behind it
    ///
    /// The data are truncated at the start of the thumbnail IFD and the offset
    /// pointing to it is set to zero. Returns the number of removed bytes or
    /// `None` if there is no thumbnail.
    pub fn remove_thumbnail(&mut self) -> Result<Option<u64>> {
        let location = self
            .ifd_locations
            .get(&Ifd::Thumbnail)
            .copied()
            .e(Error::IfdNotFound(Ifd::Thumbnail))?;

        self.raw.seek_start(location)?;
        let offset = self.raw.read_u32().e(Error::NextIfdOffsetEof)?;

        if offset == 0 {
            return Ok(None);
        }

        // Truncating must not cut into the header or the primary IFD
        if offset < location.safe_add(4)? {
            return Err(Error::ThumbnailOverlapsPrimary(offset));
        }

        if let Some(tag) = self.retained_reference_from(offset) {
            return Err(Error::ReferenceBehindThumbnail(tag));
        }

        let len = self.raw.len()?;

        self.raw.seek_start(location)?;
        self.raw.write_u32(0)?;

        let removed = len.saturating_sub(offset);
        if removed > 0 {
            self.raw.truncate(offset)?;
        } else {
            tracing::info!("Thumbnail IFD offset {offset} lies behind the end of the data");
        }

        tracing::debug!("Removed thumbnail starting at byte {offset} with {removed} bytes");

        Ok(Some(removed.into()))
    }

    /// Sets the offsets to the GPS IFD to zero
    ///
    /// The GPS IFD itself stays in the data. The returned number of bytes is
    /// the size of the GPS IFD including its values. If the IFD can not be
    /// read, [`GPS_IFD_NOMINAL_SIZE`] is returned instead.
    pub fn remove_gps(&mut self) -> Result<Option<u64>> {
        let tagifd = TagIfd::primary(Tag::GPS_INFO_IFD_POINTER);
        let entries = self.locations.get(&tagifd).cloned().unwrap_or_default();

        let mut removed = None;
        let mut updated = Vec::with_capacity(entries.len());
        for mut entry in entries {
            let offset = entry.value_offset.u32();
            if offset != 0 {
                let size = match self.ifd_extent(offset) {
                    Ok(size) => size,
                    Err(err) => {
                        tracing::info!("Could not measure GPS IFD at {offset}: {err}");
                        GPS_IFD_NOMINAL_SIZE
                    }
                };

                self.raw.seek_start(entry.value_offset_position()?)?;
                self.raw.write_u32(0)?;
                entry.value_offset = ValueOffset::new(entry.data_type, entry.count, 0);

                removed = Some(removed.unwrap_or(0_u64).safe_add(size)?);
            }
            updated.push(entry);
        }

        if removed.is_some() {
            tracing::debug!("Removed pointer to GPS IFD");
            self.locations.insert(tagifd, updated);
            self.ifd_locations.remove(&Ifd::Gps);
        }

        Ok(removed)
    }

    /// Overwrites entries with camera information with zeros
    ///
    /// The number of entries in the IFD stays the same. The returned number of
    /// bytes is derived from the type and count of the removed entries.
    pub fn remove_camera_info(&mut self) -> Result<Option<u64>> {
        let mut removed = None;

        for tag in Tag::CAMERA {
            let tagifd = TagIfd::primary(tag);
            let Some(entries) = self.locations.get(&tagifd).cloned() else {
                continue;
            };

            for entry in &entries {
                self.zero_entry(entry)?;
                removed = Some(removed.unwrap_or(0_u64).safe_add(entry.data_size())?);
                tracing::debug!("Removed entry {tag:?} at byte {}", entry.position);
            }

            self.locations.remove(&tagifd);
            if let Some(ifd) = tag.exif_specific_ifd() {
                self.ifd_locations.remove(&ifd);
            }
        }

        Ok(removed)
    }

    fn zero_entry(&mut self, entry: &EntryRef) -> Result<()> {
        self.raw.seek_start(entry.position)?;
        self.raw.write_all(&[0; ENTRY_SIZE as usize])
    }

    /// First primary IFD entry that survives the removal and references data at
    /// or behind `offset`
    fn retained_reference_from(&self, offset: u32) -> Option<Tag> {
        self.ifd_entries(Ifd::Primary)
            .filter(|(tag, _)| !tag.is_camera() && *tag != Tag::GPS_INFO_IFD_POINTER)
            .find(|(tag, entry)| {
                let reference = if tag.exif_specific_ifd().is_some() {
                    Some(entry.value_offset.u32())
                } else {
                    entry.offset()
                };
                reference.is_some_and(|x| x >= offset)
            })
            .map(|(tag, _)| tag)
    }
}
