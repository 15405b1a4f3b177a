use std::ops::AddAssign;

use scrub_exif::ExifRemoved;

/// Kind of removed metadata
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Category {
    /// Exif thumbnail IFD and image
    Thumbnail,
    /// Exif GPS IFD
    Gps,
    /// Camera make, model and maker note
    CameraInfo,
    Xmp,
    /// IPTC-NAA record inside Photoshop resources
    Iptc,
    /// Photoshop image resources except IPTC
    PhotoshopIrb,
    Comments,
}

impl Category {
    pub const ALL: [Self; 7] = [
        Self::Thumbnail,
        Self::Gps,
        Self::CameraInfo,
        Self::Xmp,
        Self::Iptc,
        Self::PhotoshopIrb,
        Self::Comments,
    ];
}

/// Number of removed bytes per category
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Summary {
    pub thumbnail: u64,
    pub gps: u64,
    pub camera_info: u64,
    pub xmp: u64,
    pub iptc: u64,
    pub photoshop_irb: u64,
    pub comments: u64,
    /// Sum of all categories
    pub total: u64,
}

impl Summary {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds `bytes` to the category and the total
    pub fn record(&mut self, category: Category, bytes: u64) {
        let counter = self.counter_mut(category);
        *counter = counter.saturating_add(bytes);
        self.total = self.total.saturating_add(bytes);
    }

    pub fn record_len(&mut self, category: Category, len: usize) {
        self.record(category, saturating_u64(len));
    }

    pub fn get(&self, category: Category) -> u64 {
        match category {
            Category::Thumbnail => self.thumbnail,
            Category::Gps => self.gps,
            Category::CameraInfo => self.camera_info,
            Category::Xmp => self.xmp,
            Category::Iptc => self.iptc,
            Category::PhotoshopIrb => self.photoshop_irb,
            Category::Comments => self.comments,
        }
    }

    /// Returns `true` if nothing has been removed
    pub fn is_empty(&self) -> bool {
        self.total == 0
    }

    fn counter_mut(&mut self, category: Category) -> &mut u64 {
        match category {
            Category::Thumbnail => &mut self.thumbnail,
            Category::Gps => &mut self.gps,
            Category::CameraInfo => &mut self.camera_info,
            Category::Xmp => &mut self.xmp,
            Category::Iptc => &mut self.iptc,
            Category::PhotoshopIrb => &mut self.photoshop_irb,
            Category::Comments => &mut self.comments,
        }
    }
}

impl AddAssign for Summary {
    fn add_assign(&mut self, rhs: Self) {
        for category in Category::ALL {
            self.record(category, rhs.get(category));
        }
    }
}

impl From<ExifRemoved> for Summary {
    fn from(removed: ExifRemoved) -> Self {
        let mut summary = Self::new();
        summary.record(Category::Thumbnail, removed.thumbnail);
        summary.record(Category::Gps, removed.gps);
        summary.record(Category::CameraInfo, removed.camera_info);
        summary
    }
}

pub(crate) fn saturating_u64(len: usize) -> u64 {
    u64::try_from(len).unwrap_or(u64::MAX)
}
