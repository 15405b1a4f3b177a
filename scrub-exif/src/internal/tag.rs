#[derive(Debug, PartialEq, Eq, Hash, Clone, Copy, PartialOrd, Ord)]
pub struct Tag(pub u16);

impl Tag {
    pub const MAKE: Self = Self(0x010F);
    pub const MODEL: Self = Self(0x0110);
    pub const ORIENTATION: Self = Self(0x0112);
    pub const X_RESOLUTION: Self = Self(0x011A);
    pub const Y_RESOLUTION: Self = Self(0x011B);
    pub const MAKER_NOTE: Self = Self(0x927C);

    pub const EXIF_IFD_POINTER: Self = Self(0x8769);
    pub const GPS_INFO_IFD_POINTER: Self = Self(0x8825);
    pub const INTEROPERABILITY_IFD_POINTER: Self = Self(0xA005);

    /// Tags that identify the camera
    pub const CAMERA: [Self; 4] = [
        Self::MAKE,
        Self::MODEL,
        Self::MAKER_NOTE,
        Self::INTEROPERABILITY_IFD_POINTER,
    ];

    /// IFD the value of this tag points to
    pub fn exif_specific_ifd(&self) -> Option<Ifd> {
        match *self {
            Self::EXIF_IFD_POINTER => Some(Ifd::Exif),
            Self::GPS_INFO_IFD_POINTER => Some(Ifd::Gps),
            Self::INTEROPERABILITY_IFD_POINTER => Some(Ifd::Interoperability),
            _ => None,
        }
    }

    pub fn is_camera(&self) -> bool {
        Self::CAMERA.contains(self)
    }
}

/// Image file directory
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub enum Ifd {
    Primary,
    Thumbnail,
    Exif,
    Gps,
    Interoperability,
}

#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub struct TagIfd {
    pub tag: Tag,
    pub ifd: Ifd,
}

impl TagIfd {
    pub fn new(tag: Tag, ifd: Ifd) -> Self {
        Self { tag, ifd }
    }

    pub fn primary(tag: Tag) -> Self {
        Self::new(tag, Ifd::Primary)
    }
}
