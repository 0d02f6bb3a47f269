//! Output writers for chart artifacts and series exports.
//!
//! This module handles writing data to disk:
//! - SVG charts
//! - JSON series documents (versioned)

pub mod json;
pub mod svg;

// Re-export main functions
pub use json::{read_series, write_series, SeriesDocument};
pub use svg::write_svg;
