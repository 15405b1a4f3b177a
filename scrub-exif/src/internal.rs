//! Low level access to the Exif structure

mod exif_raw;
mod raw;
mod tag;
mod type_;

pub use exif_raw::*;
pub use raw::*;
pub use tag::*;
pub use type_::*;
