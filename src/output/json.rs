//! JSON export of aligned series.
//!
//! Writes the exact data a chart was drawn from, so downstream tooling can
//! re-plot or diff runs without re-reading the transaction database. The
//! document is versioned to allow future evolution.

use crate::aggregator::AlignedSeries;
use crate::utils::config::SERIES_SCHEMA_VERSION;
use crate::utils::error::OutputError;
use chrono::Utc;
use log::info;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

/// Aligned-series export document
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SeriesDocument {
    /// Schema version for compatibility checking
    pub version: String,

    /// Series pair kind: "tps" or "latency"
    pub kind: String,

    /// Batch identifier, or "all" when unfiltered
    pub batch: String,

    /// Aggregation window width in seconds
    pub window_secs: u32,

    /// Window starts, ISO 8601, strictly increasing
    pub timeline: Vec<String>,

    /// Submission-side values, aligned with `timeline`
    pub submission: Vec<f64>,

    /// Confirmation-side values, aligned with `timeline`
    pub confirmation: Vec<f64>,

    /// Timestamp when the document was generated
    pub generated_at: String,
}

impl SeriesDocument {
    /// Build a document from an aligned series
    ///
    /// **Public** - called by the graph command when export is requested
    pub fn from_aligned(
        kind: &str,
        batch: &str,
        window_secs: u32,
        series: &AlignedSeries,
    ) -> Self {
        Self {
            version: SERIES_SCHEMA_VERSION.to_string(),
            kind: kind.to_string(),
            batch: batch.to_string(),
            window_secs,
            timeline: series
                .timeline
                .iter()
                .map(|ts| ts.format("%Y-%m-%dT%H:%M:%S").to_string())
                .collect(),
            submission: series.submission.clone(),
            confirmation: series.confirmation.clone(),
            generated_at: Utc::now().to_rfc3339(),
        }
    }
}

/// Write a series document as pretty-printed JSON
///
/// **Public** - main entry point for JSON output
pub fn write_series(doc: &SeriesDocument, output_path: impl AsRef<Path>) -> Result<(), OutputError> {
    let output_path = output_path.as_ref();

    super::svg::validate_output_path(output_path)?;
    super::svg::ensure_parent_dir(output_path)?;

    let file = File::create(output_path).map_err(OutputError::WriteFailed)?;
    let writer = BufWriter::new(file);
    serde_json::to_writer_pretty(writer, doc).map_err(OutputError::SerializationFailed)?;

    info!("Series exported to: {}", output_path.display());

    Ok(())
}

/// Read a series document back from disk
///
/// **Public** - useful for downstream tooling and tests
pub fn read_series(input_path: impl AsRef<Path>) -> Result<SeriesDocument, OutputError> {
    let file = File::open(input_path.as_ref()).map_err(OutputError::WriteFailed)?;
    serde_json::from_reader(file).map_err(OutputError::SerializationFailed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregator::merge::AlignedSeries;
    use chrono::NaiveDate;
    use tempfile::tempdir;

    fn sample_series() -> AlignedSeries {
        let base = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        AlignedSeries {
            timeline: vec![
                base.and_hms_opt(0, 0, 0).unwrap(),
                base.and_hms_opt(0, 0, 1).unwrap(),
            ],
            submission: vec![2.0, 1.0],
            confirmation: vec![0.0, 2.0],
        }
    }

    #[test]
    fn test_document_shape() {
        let doc = SeriesDocument::from_aligned("tps", "batch_001", 1, &sample_series());

        assert_eq!(doc.version, SERIES_SCHEMA_VERSION);
        assert_eq!(doc.kind, "tps");
        assert_eq!(doc.batch, "batch_001");
        assert_eq!(doc.timeline, vec!["2024-01-01T00:00:00", "2024-01-01T00:00:01"]);
        assert_eq!(doc.timeline.len(), doc.submission.len());
        assert_eq!(doc.timeline.len(), doc.confirmation.len());
    }

    #[test]
    fn test_write_and_read_round_trip() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("tps_series_all.json");
        let doc = SeriesDocument::from_aligned("tps", "all", 1, &sample_series());

        write_series(&doc, &path).unwrap();
        let loaded = read_series(&path).unwrap();

        assert_eq!(loaded.kind, doc.kind);
        assert_eq!(loaded.timeline, doc.timeline);
        assert_eq!(loaded.submission, doc.submission);
        assert_eq!(loaded.confirmation, doc.confirmation);
    }
}
