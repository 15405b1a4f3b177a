use scrub_common::math::MathError;

use crate::internal::{Ifd, Tag};

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Unknown byte order {0:x?}")]
    UnkownByteOrder([u8; 2]),
    #[error("IO: {0}")]
    Io(#[from] std::io::Error),
    #[error("Math: {0}")]
    Math(#[from] MathError),
    #[error("Unexpected end of data in byte order")]
    ByteOrderEof,
    #[error("Unexpected end of data in magic bytes")]
    MagicBytesEof,
    #[error("Unexpected end of data in IFD offset")]
    IfdOffsetEof,
    #[error("Unexpected end of data in number of IFD entries")]
    IfdNumEntriesEof,
    #[error("Unexpected end of data in IFD entry")]
    EntryEof,
    #[error("Unexpected end of data in offset to next IFD")]
    NextIfdOffsetEof,
    #[error("Value data of IFD entry not within data")]
    ValueEof,
    #[error("IFD {0:?} not found")]
    IfdNotFound(Ifd),
    #[error("Data size too large")]
    DataSizeTooLarge,
    #[error("Offset too large")]
    OffsetTooLarge,
    #[error("Thumbnail IFD at {0} overlaps header or primary IFD")]
    ThumbnailOverlapsPrimary(u32),
    #[error("Entry {0:?} references data behind thumbnail start")]
    ReferenceBehindThumbnail(Tag),
}

pub(crate) trait ResultExt<T> {
    fn e(self, err: Error) -> Result<T>;
}

impl<T, E> ResultExt<T> for std::result::Result<T, E> {
    fn e(self, err: Error) -> Result<T> {
        self.map_err(|_| err)
    }
}

impl<T> ResultExt<T> for Option<T> {
    fn e(self, err: Error) -> Result<T> {
        match self {
            Some(v) => Ok(v),
            None => Err(err),
        }
    }
}
