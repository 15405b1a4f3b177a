#![doc = include_str!("../README.md")]

mod cleaner;
pub mod error;
pub mod internal;

pub use cleaner::{Cleaned, Exif, ExifRemoved};
