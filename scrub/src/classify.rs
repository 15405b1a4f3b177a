use scrub_jpeg::Marker;

use crate::Category;

/// What happens to a segment
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    /// Write the segment unchanged
    Keep,
    /// Remove the segment and account its payload
    Drop(Category),
    /// Decide based on the payload, see [`crate::app1`]
    App1,
}

/// Decides on a segment by its marker
///
/// APP13 segments are accounted as [`Category::PhotoshopIrb`] here. Their
/// IPTC part is split off via [`crate::irb::split`].
pub fn classify(marker: Marker) -> Decision {
    match marker {
        Marker::APP1 => Decision::App1,
        Marker::APP13 => Decision::Drop(Category::PhotoshopIrb),
        Marker::COM => Decision::Drop(Category::Comments),
        _ => Decision::Keep,
    }
}
