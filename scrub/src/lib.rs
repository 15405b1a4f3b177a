#![doc = include_str!("../README.md")]

pub mod app1;
pub mod classify;
pub mod irb;
mod summary;

use scrub_jpeg::{Jpeg, Segment};

use crate::app1::Outcome;
use crate::classify::{classify, Decision};
pub use crate::summary::{Category, Summary};

#[derive(Debug, thiserror::Error, Clone, PartialEq, Eq)]
pub enum Error {
    #[error("JPEG: {0}")]
    Jpeg(#[from] scrub_jpeg::Error),
}

/// Removes metadata from a JPEG image
///
/// Returns the new image and the number of removed bytes per category. Fails
/// only if `data` can not be read as a JPEG.
pub fn strip(data: &[u8]) -> Result<(Vec<u8>, Summary), Error> {
    let mut jpeg = Jpeg::new(data)?;
    let mut summary = Summary::new();

    let segments = jpeg.take_segments();
    let mut kept = Vec::with_capacity(segments.len());

    for segment in segments {
        if let Some(segment) = process_segment(segment, &mut summary) {
            kept.push(segment);
        }
    }

    jpeg.replace_segments(kept);
    let stripped = jpeg.encode()?;

    tracing::debug!(
        "Removed {} bytes, {} bytes before and {} bytes after",
        summary.total,
        data.len(),
        stripped.len()
    );

    Ok((stripped, summary))
}

fn process_segment<'a>(segment: Segment<'a>, summary: &mut Summary) -> Option<Segment<'a>> {
    let marker = segment.marker();

    match classify(marker) {
        Decision::Keep => Some(segment),
        Decision::Drop(category) => {
            tracing::debug!(
                "Dropping {marker:?} segment at byte {} as {category:?}",
                segment.pos()
            );
            record_dropped(summary, category, segment.data());
            None
        }
        Decision::App1 => match app1::process(segment.data()) {
            Outcome::Keep => Some(segment),
            Outcome::Drop(category) => {
                tracing::debug!(
                    "Dropping APP1 segment at byte {} as {category:?}",
                    segment.pos()
                );
                summary.record_len(category, segment.data().len());
                None
            }
            Outcome::Replace { data, removed } => {
                tracing::debug!("Replacing Exif segment at byte {}", segment.pos());
                *summary += Summary::from(removed);
                Some(segment.with_data(data))
            }
        },
    }
}

fn record_dropped(summary: &mut Summary, category: Category, data: &[u8]) {
    match category {
        Category::PhotoshopIrb => {
            let split = irb::split(data);
            summary.record(Category::Iptc, split.iptc);
            summary.record(Category::PhotoshopIrb, split.photoshop_irb);
        }
        category => summary.record_len(category, data.len()),
    }
}
