use crate::error::Result;
use crate::internal::*;

/// Bytes removed from Exif data
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ExifRemoved {
    pub thumbnail: u64,
    pub gps: u64,
    pub camera_info: u64,
}

impl ExifRemoved {
    pub fn total(&self) -> u64 {
        self.thumbnail
            .saturating_add(self.gps)
            .saturating_add(self.camera_info)
    }
}

/// Result of [`Exif::clean`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cleaned {
    /// Exif data after removal, identical to the input if not modified
    pub data: Vec<u8>,
    pub modified: bool,
    pub removed: ExifRemoved,
}

/// Exif data that have been decoded and can be cleaned
#[derive(Debug)]
pub struct Exif {
    decoder: ExifRaw,
    removed: ExifRemoved,
    modified: bool,
}

impl Exif {
    /// Decodes the TIFF header and primary IFD
    ///
    /// * `data`: Exif data starting with the TIFF header
    pub fn new(data: Vec<u8>) -> Result<Self> {
        let mut decoder = ExifRaw::new(data);
        decoder.decode()?;

        Ok(Self {
            decoder,
            removed: ExifRemoved::default(),
            modified: false,
        })
    }

    /// Removes thumbnail, GPS location and camera information
    ///
    /// Data that can not be decoded are returned unmodified. Each removal step
    /// is tried independently. A failing step leaves the data as they were
    /// before the step.
    pub fn clean(data: &[u8]) -> Cleaned {
        let mut exif = match Self::new(data.to_vec()) {
            Ok(exif) => exif,
            Err(err) => {
                tracing::info!("Leaving undecodable Exif data untouched: {err}");
                return Cleaned {
                    data: data.to_vec(),
                    modified: false,
                    removed: ExifRemoved::default(),
                };
            }
        };

        exif.remove_thumbnail();
        exif.remove_gps();
        exif.remove_camera_info();

        exif.into_cleaned()
    }

    pub fn remove_thumbnail(&mut self) -> bool {
        let removed = self.attempt("thumbnail", ExifRaw::remove_thumbnail);
        if let Some(removed) = removed {
            self.removed.thumbnail = self.removed.thumbnail.saturating_add(removed);
        }
        removed.is_some()
    }

    pub fn remove_gps(&mut self) -> bool {
        let removed = self.attempt("GPS", ExifRaw::remove_gps);
        if let Some(removed) = removed {
            self.removed.gps = self.removed.gps.saturating_add(removed);
        }
        removed.is_some()
    }

    pub fn remove_camera_info(&mut self) -> bool {
        let removed = self.attempt("camera info", ExifRaw::remove_camera_info);
        if let Some(removed) = removed {
            self.removed.camera_info = self.removed.camera_info.saturating_add(removed);
        }
        removed.is_some()
    }

    pub fn removed(&self) -> ExifRemoved {
        self.removed
    }

    pub fn is_modified(&self) -> bool {
        self.modified
    }

    pub fn into_cleaned(self) -> Cleaned {
        Cleaned {
            data: self.decoder.into_inner(),
            modified: self.modified,
            removed: self.removed,
        }
    }

    /// Runs `edit` on a copy and only keeps the copy if the edit succeeds
    fn attempt(
        &mut self,
        name: &str,
        edit: impl FnOnce(&mut ExifRaw) -> Result<Option<u64>>,
    ) -> Option<u64> {
        let mut copy = self.decoder.clone();

        match edit(&mut copy) {
            Ok(Some(removed)) => {
                self.decoder = copy;
                self.modified = true;
                Some(removed)
            }
            Ok(None) => None,
            Err(err) => {
                tracing::info!("Could not remove {name}: {err}");
                None
            }
        }
    }
}
