//! Aggregation of transaction records into aligned time series.
//!
//! This module transforms raw transaction records into:
//! - Sparse per-window series (TPS and mean latency)
//! - Aligned timelines with zero-filled gaps (for chart rendering)
//! - Summary statistics (for chart annotations)

pub mod intervals;
pub mod merge;
pub mod stats;

// Re-export main types and functions
pub use intervals::{bucket_start, latency_intervals, parse_timestamp, tps_intervals, IntervalSeries};
pub use merge::{merge_series, AlignedSeries};
pub use stats::{latency_stats, tps_stats, LatencyStats, TpsStats};
