//! Helpers shared between the scrub crates

pub mod math;
pub mod utils;
