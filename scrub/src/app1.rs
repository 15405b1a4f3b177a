//! Exif and XMP in APP1 segments

use scrub_exif::{Exif, ExifRemoved};
use scrub_jpeg::{EXIF_IDENTIFIER_STRING, XMP_IDENTIFIER_STRING};

use crate::Category;

/// Content of an APP1 segment according to its identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Kind {
    Exif,
    Xmp,
    Other,
}

impl Kind {
    pub fn for_data(data: &[u8]) -> Self {
        if data.starts_with(EXIF_IDENTIFIER_STRING) {
            Self::Exif
        } else if data.starts_with(XMP_IDENTIFIER_STRING) {
            Self::Xmp
        } else {
            Self::Other
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Keep,
    Drop(Category),
    /// New payload including the Exif identifier
    Replace {
        data: Vec<u8>,
        removed: ExifRemoved,
    },
}

/// Decides on an APP1 payload
///
/// Exif data are cleaned. The segment is only replaced if cleaning changed
/// something.
pub fn process(data: &[u8]) -> Outcome {
    match Kind::for_data(data) {
        Kind::Exif => {
            let Some(tiff) = data.strip_prefix(EXIF_IDENTIFIER_STRING) else {
                return Outcome::Keep;
            };

            let cleaned = Exif::clean(tiff);
            if !cleaned.modified {
                tracing::debug!("Exif data unchanged");
                return Outcome::Keep;
            }

            let mut data = EXIF_IDENTIFIER_STRING.to_vec();
            data.extend(cleaned.data);

            Outcome::Replace {
                data,
                removed: cleaned.removed,
            }
        }
        Kind::Xmp => Outcome::Drop(Category::Xmp),
        Kind::Other => Outcome::Keep,
    }
}
