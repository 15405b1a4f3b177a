#![allow(dead_code)]

pub use scrub_exif::internal::*;
pub use scrub_exif::{Cleaned, Exif, ExifRemoved};

pub const MAKE: u16 = 0x010F;
pub const MODEL: u16 = 0x0110;
pub const ORIENTATION: u16 = 0x0112;
pub const X_RESOLUTION: u16 = 0x011A;
pub const Y_RESOLUTION: u16 = 0x011B;
pub const GPS_LATITUDE_REF: u16 = 0x1;
pub const GPS_LATITUDE: u16 = 0x2;
pub const COLOR_SPACE: u16 = 0xA001;
pub const GAMMA: u16 = 0xA500;

#[derive(Debug, Clone)]
pub enum Value {
    Ascii(&'static str),
    Short(u16),
    Long(u32),
    Rational(Vec<(u32, u32)>),
    Undefined(Vec<u8>),
}

impl Value {
    fn data_type(&self) -> u16 {
        match self {
            Self::Ascii(_) => 2,
            Self::Short(_) => 3,
            Self::Long(_) => 4,
            Self::Rational(_) => 5,
            Self::Undefined(_) => 7,
        }
    }

    fn count(&self) -> u32 {
        match self {
            Self::Ascii(s) => s.len() as u32 + 1,
            Self::Short(_) | Self::Long(_) => 1,
            Self::Rational(r) => r.len() as u32,
            Self::Undefined(d) => d.len() as u32,
        }
    }

    fn bytes(&self, big_endian: bool) -> Vec<u8> {
        let u16_bytes = |v: u16| {
            if big_endian {
                v.to_be_bytes()
            } else {
                v.to_le_bytes()
            }
        };
        let u32_bytes = |v: u32| {
            if big_endian {
                v.to_be_bytes()
            } else {
                v.to_le_bytes()
            }
        };

        match self {
            Self::Ascii(s) => {
                let mut data = s.as_bytes().to_vec();
                data.push(0);
                data
            }
            Self::Short(v) => u16_bytes(*v).to_vec(),
            Self::Long(v) => u32_bytes(*v).to_vec(),
            Self::Rational(r) => r
                .iter()
                .flat_map(|(n, d)| [u32_bytes(*n), u32_bytes(*d)].concat())
                .collect(),
            Self::Undefined(d) => d.clone(),
        }
    }
}

/// Builds TIFF data in the usual Exif layout
///
/// Header, primary IFD with its values, Exif IFD, GPS IFD, thumbnail IFD and
/// thumbnail data. The Exif IFD can be moved behind the thumbnail data.
#[derive(Debug, Clone, Default)]
pub struct TiffBuilder {
    pub big_endian: bool,
    pub ifd0: Vec<(u16, Value)>,
    pub exif: Vec<(u16, Value)>,
    pub exif_last: bool,
    pub gps: Vec<(u16, Value)>,
    pub thumbnail: Option<Vec<u8>>,
}

impl TiffBuilder {
    pub fn new(big_endian: bool) -> Self {
        Self {
            big_endian,
            ..Default::default()
        }
    }

    pub fn entry(mut self, tag: u16, value: Value) -> Self {
        self.ifd0.push((tag, value));
        self
    }

    pub fn exif_entry(mut self, tag: u16, value: Value) -> Self {
        self.exif.push((tag, value));
        self
    }

    /// Store the Exif IFD behind the thumbnail
    pub fn exif_last(mut self) -> Self {
        self.exif_last = true;
        self
    }

    pub fn gps_entry(mut self, tag: u16, value: Value) -> Self {
        self.gps.push((tag, value));
        self
    }

    pub fn thumbnail(mut self, data: Vec<u8>) -> Self {
        self.thumbnail = Some(data);
        self
    }

    /// Position of the n-th entry in the primary IFD
    pub fn ifd0_entry_position(n: usize) -> usize {
        8 + 2 + 12 * n
    }

    /// Position of the offset to the thumbnail IFD
    pub fn next_ifd_position(&self) -> usize {
        Self::ifd0_entry_position(self.ifd0_entries().len())
    }

    fn ifd0_end(&self) -> usize {
        let mut pointers = 0;
        if !self.exif.is_empty() {
            pointers += 1;
        }
        if !self.gps.is_empty() {
            pointers += 1;
        }
        8 + ifd_len(&self.ifd0) + 12 * pointers
    }

    fn exif_len(&self) -> usize {
        if self.exif.is_empty() {
            0
        } else {
            ifd_len(&self.exif)
        }
    }

    pub fn exif_ifd_start(&self) -> usize {
        if self.exif_last {
            let thumbnail_len = self
                .thumbnail
                .as_ref()
                .map_or(0, |x| 2 + 2 * 12 + 4 + x.len());
            self.thumbnail_ifd_start() + thumbnail_len
        } else {
            self.ifd0_end()
        }
    }

    pub fn exif_ifd_len(&self) -> usize {
        self.exif_len()
    }

    fn gps_ifd_start(&self) -> usize {
        if self.exif_last {
            self.ifd0_end()
        } else {
            self.ifd0_end() + self.exif_len()
        }
    }

    pub fn thumbnail_ifd_start(&self) -> usize {
        let gps_len = if self.gps.is_empty() {
            0
        } else {
            ifd_len(&self.gps)
        };
        self.gps_ifd_start() + gps_len
    }

    fn ifd0_entries(&self) -> Vec<(u16, Value)> {
        let mut entries = self.ifd0.clone();
        if !self.exif.is_empty() {
            entries.push((0x8769, Value::Long(self.exif_ifd_start() as u32)));
        }
        if !self.gps.is_empty() {
            entries.push((0x8825, Value::Long(self.gps_ifd_start() as u32)));
        }
        entries
    }

    pub fn build(&self) -> Vec<u8> {
        let mut out = Vec::new();
        out.extend_from_slice(if self.big_endian { b"MM" } else { b"II" });
        out.extend_from_slice(&self.u16_bytes(42));
        out.extend_from_slice(&self.u32_bytes(8));

        let ifd1_start = self.thumbnail_ifd_start();
        let next = if self.thumbnail.is_some() {
            ifd1_start as u32
        } else {
            0
        };

        self.write_ifd(&mut out, &self.ifd0_entries(), next);

        if !self.exif.is_empty() && !self.exif_last {
            assert_eq!(out.len(), self.exif_ifd_start());
            self.write_ifd(&mut out, &self.exif, 0);
        }

        if !self.gps.is_empty() {
            assert_eq!(out.len(), self.gps_ifd_start());
            self.write_ifd(&mut out, &self.gps, 0);
        }

        if let Some(thumbnail) = &self.thumbnail {
            assert_eq!(out.len(), ifd1_start);
            let data_start = ifd1_start + 2 + 2 * 12 + 4;
            let entries = [
                (0x201, Value::Long(data_start as u32)),
                (0x202, Value::Long(thumbnail.len() as u32)),
            ];
            self.write_ifd(&mut out, &entries, 0);
            out.extend_from_slice(thumbnail);
        }

        if !self.exif.is_empty() && self.exif_last {
            assert_eq!(out.len(), self.exif_ifd_start());
            self.write_ifd(&mut out, &self.exif, 0);
        }

        out
    }

    /// Complete APP1 payload
    pub fn build_app1(&self) -> Vec<u8> {
        let mut data = b"Exif\0\0".to_vec();
        data.extend(self.build());
        data
    }

    fn write_ifd(&self, out: &mut Vec<u8>, entries: &[(u16, Value)], next: u32) {
        let start = out.len();
        let mut overflow_pos = start + 2 + 12 * entries.len() + 4;
        let mut overflow = Vec::new();

        out.extend_from_slice(&self.u16_bytes(entries.len() as u16));
        for (tag, value) in entries {
            out.extend_from_slice(&self.u16_bytes(*tag));
            out.extend_from_slice(&self.u16_bytes(value.data_type()));
            out.extend_from_slice(&self.u32_bytes(value.count()));

            let mut bytes = value.bytes(self.big_endian);
            if bytes.len() <= 4 {
                bytes.resize(4, 0);
                out.extend_from_slice(&bytes);
            } else {
                out.extend_from_slice(&self.u32_bytes(overflow_pos as u32));
                overflow_pos += bytes.len();
                overflow.extend_from_slice(&bytes);
            }
        }
        out.extend_from_slice(&self.u32_bytes(next));
        out.extend_from_slice(&overflow);
    }

    fn u16_bytes(&self, v: u16) -> [u8; 2] {
        if self.big_endian {
            v.to_be_bytes()
        } else {
            v.to_le_bytes()
        }
    }

    pub fn u32_bytes(&self, v: u32) -> [u8; 4] {
        if self.big_endian {
            v.to_be_bytes()
        } else {
            v.to_le_bytes()
        }
    }
}

fn ifd_len(entries: &[(u16, Value)]) -> usize {
    let overflow: usize = entries
        .iter()
        .map(|(_, value)| value.bytes(false).len())
        .filter(|len| *len > 4)
        .sum();
    2 + 12 * entries.len() + 4 + overflow
}

/// Camera, orientation and resolution in the primary IFD
pub fn camera(big_endian: bool) -> TiffBuilder {
    TiffBuilder::new(big_endian)
        .entry(MAKE, Value::Ascii("Canon"))
        .entry(MODEL, Value::Ascii("EOS 5D Mark IV"))
        .entry(ORIENTATION, Value::Short(6))
        .entry(X_RESOLUTION, Value::Rational(vec![(72, 1)]))
        .entry(Y_RESOLUTION, Value::Rational(vec![(72, 1)]))
        .exif_entry(COLOR_SPACE, Value::Short(1))
        .exif_entry(GAMMA, Value::Rational(vec![(22, 10)]))
}

/// Everything the cleaner removes
pub fn everything(big_endian: bool) -> TiffBuilder {
    camera(big_endian)
        .gps_entry(GPS_LATITUDE_REF, Value::Ascii("N"))
        .gps_entry(GPS_LATITUDE, Value::Rational(vec![(40, 1), (42, 1), (5123, 100)]))
        .thumbnail(vec![0xD8; 100])
}

pub fn decoded(data: Vec<u8>) -> ExifRaw {
    let mut exif = ExifRaw::new(data);
    exif.decode().unwrap();
    exif
}
