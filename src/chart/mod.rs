//! Chart generation for aligned time series.
//!
//! Produces self-contained SVG documents; writing them to disk lives in
//! `output::svg`.

pub mod line;

// Re-export main types and functions
pub use line::{render_line_chart, ChartConfig};
