#![doc = include_str!("../README.md")]

mod error;

use std::borrow::Cow;
use std::io::{Cursor, Read, Write};

pub use error::Error;
use scrub_common::math::*;

pub const MAGIC_BYTES: &[u8] = &[0xFF, 0xD8];
pub const EXIF_IDENTIFIER_STRING: &[u8] = b"Exif\0\0";
pub const XMP_IDENTIFIER_STRING: &[u8] = b"http://ns.adobe.com/xap/1.0/\0";

pub const MARKER_START: u8 = 0xFF;

/// A marker segment
///
/// The data are borrowed from the parsed image until they are replaced via
/// [`Segment::with_data`]. A start of scan segment additionally carries the
/// entropy-coded data that follow its header.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Segment<'a> {
    marker: Marker,
    pos: u64,
    data: Cow<'a, [u8]>,
    scan: &'a [u8],
}

impl<'a> Segment<'a> {
    /// Creates a segment that does not originate from parsed data
    pub fn new(marker: Marker, data: impl Into<Cow<'a, [u8]>>) -> Self {
        Self {
            marker,
            pos: 0,
            data: data.into(),
            scan: &[],
        }
    }

    pub fn marker(&self) -> Marker {
        self.marker
    }

    /// Position of the length field in the source data
    ///
    /// For segments without length, this is the position after the marker.
    pub fn pos(&self) -> u64 {
        self.pos
    }

    pub fn data_pos(&self) -> u64 {
        if self.marker.is_standalone() {
            self.pos
        } else {
            self.pos.saturating_add(2)
        }
    }

    /// Segment payload without marker and length
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Entropy-coded data behind a start of scan header
    ///
    /// Includes restart markers. Empty for all other segments.
    pub fn scan_data(&self) -> &'a [u8] {
        self.scan
    }

    /// Same segment with replaced payload
    ///
    /// Scan data stay the same.
    pub fn with_data(self, data: Vec<u8>) -> Segment<'a> {
        Segment {
            marker: self.marker,
            pos: self.pos,
            data: Cow::Owned(data),
            scan: self.scan,
        }
    }

    /// Number of bytes the segment occupies when written
    pub fn encoded_len(&self) -> Result<usize, Error> {
        if self.marker.is_standalone() {
            Ok(2)
        } else {
            Ok(self.data.len().safe_add(4)?.safe_add(self.scan.len())?)
        }
    }

    fn write_to(&self, w: &mut impl Write) -> Result<(), Error> {
        w.write_all(&[MARKER_START, self.marker.into()])?;

        if !self.marker.is_standalone() {
            let length = self
                .data
                .len()
                .safe_add(2)?
                .u16()
                .map_err(|_| Error::SegmentTooLarge(self.marker))?;
            w.write_all(&length.to_be_bytes())?;
            w.write_all(&self.data)?;
            w.write_all(self.scan)?;
        }

        Ok(())
    }
}

/// JPEG image split into segments
///
/// All segments up to the end of image marker are split up. Scan data are
/// attached to their start of scan segment. Bytes behind the end of image are
/// kept as [`Jpeg::trailer`].
#[derive(Clone, Debug)]
pub struct Jpeg<'a> {
    segments: Vec<Segment<'a>>,
    trailer: &'a [u8],
}

impl<'a> Jpeg<'a> {
    pub fn new(data: &'a [u8]) -> Result<Self, Error> {
        let (segments, trailer_start) = Self::find_segments(data)?;
        let trailer = data.get(trailer_start..).ok_or(Error::UnexpectedEof)?;

        Ok(Self { segments, trailer })
    }

    /// List all segments in their order of appearance
    pub fn segments(&self) -> &[Segment<'a>] {
        &self.segments
    }

    /// Takes the segments out, leaving the image without segments
    pub fn take_segments(&mut self) -> Vec<Segment<'a>> {
        std::mem::take(&mut self.segments)
    }

    /// Replaces all segments
    ///
    /// The trailer stays untouched.
    pub fn replace_segments(&mut self, segments: Vec<Segment<'a>>) {
        self.segments = segments;
    }

    /// List all segments with the given marker
    pub fn segments_marker(&self, marker: Marker) -> impl Iterator<Item = &Segment<'a>> {
        self.segments.iter().filter(move |x| x.marker == marker)
    }

    /// Data behind the end of image marker
    pub fn trailer(&self) -> &'a [u8] {
        self.trailer
    }

    pub fn exif(&self) -> impl Iterator<Item = &Segment<'a>> {
        self.segments_marker(Marker::APP1)
            .filter(|x| x.data().starts_with(EXIF_IDENTIFIER_STRING))
    }

    pub fn exif_data(&self) -> impl Iterator<Item = &[u8]> {
        self.exif()
            .filter_map(|x| x.data().get(EXIF_IDENTIFIER_STRING.len()..))
    }

    pub fn xmp(&self) -> impl Iterator<Item = &Segment<'a>> {
        self.segments_marker(Marker::APP1)
            .filter(|x| x.data().starts_with(XMP_IDENTIFIER_STRING))
    }

    /// Write segments and trailer
    pub fn write_to(&self, w: &mut impl Write) -> Result<(), Error> {
        for segment in &self.segments {
            segment.write_to(w)?;
        }
        w.write_all(self.trailer)?;

        Ok(())
    }

    /// Returns the encoded image
    pub fn encode(&self) -> Result<Vec<u8>, Error> {
        let mut len = self.trailer.len();
        for segment in &self.segments {
            len = len.safe_add(segment.encoded_len()?)?;
        }

        let mut buf = Vec::with_capacity(len);
        self.write_to(&mut buf)?;

        Ok(buf)
    }

    fn find_segments(data: &'a [u8]) -> Result<(Vec<Segment<'a>>, usize), Error> {
        let mut cur = Cursor::new(data);

        let magic_bytes = &mut [0; MAGIC_BYTES.len()];
        cur.read_exact(magic_bytes)
            .map_err(|_| Error::UnexpectedEof)?;
        if magic_bytes != MAGIC_BYTES {
            return Err(Error::InvalidMagicBytes(magic_bytes.to_vec()));
        }

        let mut segments = vec![Segment {
            marker: Marker::SOI,
            pos: cur.position(),
            data: Cow::Borrowed(&[]),
            scan: &[],
        }];

        loop {
            let marker_pos = cur.position().usize()?;
            if read_u8(&mut cur)? != MARKER_START {
                return Err(Error::MarkerExpected(marker_pos));
            }

            // Any number of fill bytes can preceed a marker
            let mut code = read_u8(&mut cur)?;
            while code == MARKER_START {
                code = read_u8(&mut cur)?;
            }

            // An escaped 0xFF is only valid inside entropy-coded data
            if code == 0 {
                return Err(Error::MarkerExpected(marker_pos));
            }

            let marker = Marker::from(code);
            let pos = cur.position();

            if marker.is_standalone() {
                tracing::debug!("Found stand-alone marker {marker:?} at byte {marker_pos}");
                segments.push(Segment {
                    marker,
                    pos,
                    data: Cow::Borrowed(&[]),
                    scan: &[],
                });

                if marker == Marker::EOI {
                    break;
                }
                continue;
            }

            let length = read_be_u16(&mut cur)?;
            if length < 2 {
                return Err(Error::InvalidSegmentLength {
                    pos: pos.usize()?,
                    length,
                });
            }

            let data_start = pos.usize()?.safe_add(2)?;
            let data_end = pos.usize()?.safe_add(length.into())?;
            let segment_data = data
                .get(data_start..data_end)
                .ok_or(Error::UnexpectedEof)?;

            tracing::debug!(
                "Found segment {marker:?} at byte {marker_pos} with {} bytes of data",
                segment_data.len()
            );

            let mut segment = Segment {
                marker,
                pos,
                data: Cow::Borrowed(segment_data),
                scan: &[],
            };

            let mut next = data_end;
            if marker == Marker::SOS {
                next = scan_end(data, data_end);
                segment.scan = data.get(data_end..next).ok_or(Error::UnexpectedEof)?;
                tracing::debug!(
                    "Found {} bytes of scan data at byte {data_end}",
                    segment.scan.len()
                );
            }

            segments.push(segment);
            cur.set_position(next.u64()?);

            if next == data.len() && marker == Marker::SOS {
                tracing::info!("Scan data reach the end of the data without end of image");
                break;
            }
        }

        Ok((segments, cur.position().usize()?))
    }
}

/// Position of the first marker behind entropy-coded data starting at `start`
///
/// Stuffed zero bytes and restart markers are part of the scan data. Returns
/// the length of `data` if no marker follows.
fn scan_end(data: &[u8], start: usize) -> usize {
    let mut pos = start;

    while let Some(rest) = data.get(pos..) {
        let Some(offset) = rest.iter().position(|x| *x == MARKER_START) else {
            break;
        };
        let marker_pos = pos.saturating_add(offset);

        match data.get(marker_pos.saturating_add(1)).copied() {
            Some(0x00 | 0xD0..=0xD7) => pos = marker_pos.saturating_add(2),
            Some(_) => return marker_pos,
            None => break,
        }
    }

    data.len()
}

fn read_u8(cur: &mut Cursor<&[u8]>) -> Result<u8, Error> {
    let buf = &mut [0; 1];
    cur.read_exact(buf).map_err(|_| Error::UnexpectedEof)?;
    Ok(buf[0])
}

fn read_be_u16(cur: &mut Cursor<&[u8]>) -> Result<u16, Error> {
    let buf = &mut [0; 2];
    cur.read_exact(buf).map_err(|_| Error::UnexpectedEof)?;
    Ok(u16::from_be_bytes(*buf))
}

scrub_common::utils::convertible_enum!(
    #[repr(u8)]
    #[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
    pub enum Marker {
        /// Temporary private use in arithmetic coding
        TEM = 0x01,
        /// Baseline DCT
        SOF0 = 0xC0,
        /// Extended sequential DCT
        SOF1 = 0xC1,
        /// Progressive DCT
        SOF2 = 0xC2,
        /// Lossless
        SOF3 = 0xC3,
        /// Define Huffman table
        DHT = 0xC4,
        SOF5 = 0xC5,
        SOF6 = 0xC6,
        SOF7 = 0xC7,
        JPG = 0xC8,
        SOF9 = 0xC9,
        SOF10 = 0xCA,
        SOF11 = 0xCB,
        /// Define arithmetic coding conditioning
        DAC = 0xCC,
        SOF13 = 0xCD,
        SOF14 = 0xCE,
        SOF15 = 0xCF,
        RST0 = 0xD0,
        RST1 = 0xD1,
        RST2 = 0xD2,
        RST3 = 0xD3,
        RST4 = 0xD4,
        RST5 = 0xD5,
        RST6 = 0xD6,
        RST7 = 0xD7,
        /// Start of image
        SOI = 0xD8,
        /// End of image
        EOI = 0xD9,
        /// Start of scan
        SOS = 0xDA,
        /// Define quantization table
        DQT = 0xDB,
        DNL = 0xDC,
        /// Define restart interval
        DRI = 0xDD,
        DHP = 0xDE,
        EXP = 0xDF,
        /// JFIF
        APP0 = 0xE0,
        /// Exif, XMP
        APP1 = 0xE1,
        /// ICC color profile
        APP2 = 0xE2,
        APP3 = 0xE3,
        APP4 = 0xE4,
        APP5 = 0xE5,
        APP6 = 0xE6,
        APP7 = 0xE7,
        APP8 = 0xE8,
        APP9 = 0xE9,
        APP10 = 0xEA,
        APP11 = 0xEB,
        APP12 = 0xEC,
        /// Photoshop image resources, IPTC
        APP13 = 0xED,
        /// Adobe
        APP14 = 0xEE,
        APP15 = 0xEF,
        /// Comment
        COM = 0xFE,
    }
);

impl Marker {
    /// Markers that are not followed by a length and payload
    pub fn is_standalone(self) -> bool {
        matches!(
            self,
            Self::TEM
                | Self::SOI
                | Self::EOI
                | Self::RST0
                | Self::RST1
                | Self::RST2
                | Self::RST3
                | Self::RST4
                | Self::RST5
                | Self::RST6
                | Self::RST7
        )
    }

    /// Start of frame in any of its variants
    pub fn is_sof(self) -> bool {
        matches!(
            self,
            Self::SOF0
                | Self::SOF1
                | Self::SOF2
                | Self::SOF3
                | Self::SOF5
                | Self::SOF6
                | Self::SOF7
                | Self::SOF9
                | Self::SOF10
                | Self::SOF11
                | Self::SOF13
                | Self::SOF14
                | Self::SOF15
        )
    }
}
