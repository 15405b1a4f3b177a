use scrub_common::math::MathError;

#[derive(Debug, thiserror::Error, Clone, PartialEq, Eq)]
pub enum Error {
    #[error("Unexpected end of file")]
    UnexpectedEof,
    #[error("Invalid magic bytes: {0:x?}")]
    InvalidMagicBytes(Vec<u8>),
    #[error("Expected marker at byte {0}")]
    MarkerExpected(usize),
    #[error("Invalid segment length {length} at byte {pos}")]
    InvalidSegmentLength { pos: usize, length: u16 },
    #[error("Segment {0:?} data too large for a single segment")]
    SegmentTooLarge(crate::Marker),
    #[error("Writing failed: {0}")]
    Write(String),
    #[error("Math: {0}")]
    Math(#[from] MathError),
}

impl From<std::io::Error> for Error {
    fn from(value: std::io::Error) -> Self {
        Self::Write(value.to_string())
    }
}
