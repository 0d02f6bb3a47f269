//! Bucket raw transaction records into fixed-width time windows.
//!
//! Two independent passes share the same bucketing rule:
//! - TPS: per-window transaction counts for submission and confirmation
//! - Latency: per-window mean submission and confirmation delay
//!
//! Both are pure functions of (records, batch filter, window width); calling
//! them twice on the same input yields identical series.

use crate::record::TransactionRecord;
use chrono::{DateTime, Duration, NaiveDateTime, Timelike};
use log::debug;
use std::collections::BTreeMap;

/// Ordered mapping from window start to metric value
///
/// Sparse: windows with no contributing records are simply absent.
/// Zero-filling happens later, at the merge step.
pub type IntervalSeries = BTreeMap<NaiveDateTime, f64>;

// Timestamp shapes the submitter and the store exchange. Offset-bearing
// variants keep the local clock value (fromisoformat semantics).
const NAIVE_FORMATS: &[&str] = &["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"];
const OFFSET_FORMATS: &[&str] = &["%Y-%m-%dT%H:%M:%S%.f%:z", "%Y-%m-%d %H:%M:%S%.f%:z"];

/// Parse a raw timestamp from a transaction record
///
/// **Public** - shared by both aggregation passes and by tests
///
/// Returns None for anything unparsable; callers treat that as a
/// data-quality skip, never an error.
pub fn parse_timestamp(raw: &str) -> Option<NaiveDateTime> {
    let raw = raw.trim();

    for format in NAIVE_FORMATS {
        if let Ok(ts) = NaiveDateTime::parse_from_str(raw, format) {
            return Some(ts);
        }
    }

    for format in OFFSET_FORMATS {
        if let Ok(ts) = DateTime::parse_from_str(raw, format) {
            return Some(ts.naive_local());
        }
    }

    None
}

/// Truncate a timestamp to the start of its containing window
///
/// **Public** - the bucketing rule for every series
///
/// Drops sub-second precision, then rounds the second-of-minute down to a
/// multiple of the window width. This matches the submitter's reporting,
/// which aligns windows within the minute rather than against the epoch.
pub fn bucket_start(ts: NaiveDateTime, window_secs: u32) -> NaiveDateTime {
    let window_secs = window_secs.max(1);
    let truncated = ts.with_nanosecond(0).unwrap_or(ts);
    truncated - Duration::seconds(i64::from(truncated.second() % window_secs))
}

/// Records that participate under a batch filter
///
/// **Private** - Some(id) keeps matching batches only, None keeps everything
fn filtered<'a>(
    records: &'a [TransactionRecord],
    batch: Option<&'a str>,
) -> impl Iterator<Item = &'a TransactionRecord> {
    records
        .iter()
        .filter(move |record| batch.is_none() || record.batch_id.as_deref() == batch)
}

/// Compute TPS series for submission and confirmation streams
///
/// **Public** - main entry point for throughput aggregation
///
/// # Arguments
/// * `records` - full record set, any order
/// * `batch` - optional batch filter
/// * `window_secs` - window width in seconds
///
/// # Returns
/// (submission TPS, confirmation TPS), each keyed by its own window start.
/// A record's confirmation may land in a different window than its
/// submission.
pub fn tps_intervals(
    records: &[TransactionRecord],
    batch: Option<&str>,
    window_secs: u32,
) -> (IntervalSeries, IntervalSeries) {
    let mut submission: BTreeMap<NaiveDateTime, u64> = BTreeMap::new();
    let mut confirmation: BTreeMap<NaiveDateTime, u64> = BTreeMap::new();

    for record in filtered(records, batch) {
        let Some(submitted) = parse_timestamp(&record.submitted_at) else {
            debug!("Skipping record with unparsable submitted_at: {:?}", record.submitted_at);
            continue;
        };

        *submission.entry(bucket_start(submitted, window_secs)).or_insert(0) += 1;

        // Confirmation counts only for successful transactions, in the
        // window the confirmation itself fell into.
        if record.status.is_success() {
            if let Some(raw) = &record.confirmed_at {
                if let Some(confirmed) = parse_timestamp(raw) {
                    *confirmation.entry(bucket_start(confirmed, window_secs)).or_insert(0) += 1;
                }
            }
        }
    }

    let width = f64::from(window_secs.max(1));
    (counts_to_tps(submission, width), counts_to_tps(confirmation, width))
}

/// Convert raw window counts to transactions-per-second
fn counts_to_tps(counts: BTreeMap<NaiveDateTime, u64>, window_width: f64) -> IntervalSeries {
    counts
        .into_iter()
        .map(|(ts, count)| (ts, count as f64 / window_width))
        .collect()
}

/// Compute mean latency series for submission and confirmation streams
///
/// **Public** - main entry point for latency aggregation
///
/// Submission latency is the recorded execution time (time to submit).
/// Confirmation latency is confirmed-minus-submitted in milliseconds, keyed
/// by the *submission* window: the series answers "how long did transactions
/// submitted in this window take to confirm". Non-positive or missing
/// measurements are excluded from their bucket, never zero-filled.
///
/// # Returns
/// (submission latency, confirmation latency) in milliseconds, both keyed by
/// submission window start.
pub fn latency_intervals(
    records: &[TransactionRecord],
    batch: Option<&str>,
    window_secs: u32,
) -> (IntervalSeries, IntervalSeries) {
    let mut submission: BTreeMap<NaiveDateTime, Vec<f64>> = BTreeMap::new();
    let mut confirmation: BTreeMap<NaiveDateTime, Vec<f64>> = BTreeMap::new();

    for record in filtered(records, batch) {
        let Some(submitted) = parse_timestamp(&record.submitted_at) else {
            debug!("Skipping record with unparsable submitted_at: {:?}", record.submitted_at);
            continue;
        };
        let bucket = bucket_start(submitted, window_secs);

        if let Some(exec_ms) = record.execution_time_ms {
            if exec_ms > 0.0 {
                submission.entry(bucket).or_default().push(exec_ms);
            }
        }

        if record.status.is_success() {
            if let Some(raw) = &record.confirmed_at {
                if let Some(confirmed) = parse_timestamp(raw) {
                    let delay_ms = millis_between(submitted, confirmed);
                    if delay_ms > 0.0 {
                        confirmation.entry(bucket).or_default().push(delay_ms);
                    }
                }
            }
        }
    }

    (collapse_to_means(submission), collapse_to_means(confirmation))
}

/// Signed duration from `from` to `to` in fractional milliseconds
fn millis_between(from: NaiveDateTime, to: NaiveDateTime) -> f64 {
    let delta = to.signed_duration_since(from);
    match delta.num_microseconds() {
        Some(micros) => micros as f64 / 1000.0,
        // Only reachable for deltas beyond ~292k years
        None => delta.num_milliseconds() as f64,
    }
}

/// Collapse each bucket's sample list to its arithmetic mean
///
/// Buckets only exist here because at least one sample was pushed, so the
/// list is never empty.
fn collapse_to_means(buckets: BTreeMap<NaiveDateTime, Vec<f64>>) -> IntervalSeries {
    buckets
        .into_iter()
        .map(|(ts, samples)| {
            let mean = samples.iter().sum::<f64>() / samples.len() as f64;
            (ts, mean)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::{TransactionRecord, TxStatus};
    use chrono::NaiveDate;

    fn at(h: u32, m: u32, s: u32, milli: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 1, 1)
            .unwrap()
            .and_hms_milli_opt(h, m, s, milli)
            .unwrap()
    }

    #[test]
    fn test_parse_timestamp_formats() {
        assert_eq!(parse_timestamp("2024-01-01T00:00:00.200"), Some(at(0, 0, 0, 200)));
        assert_eq!(parse_timestamp("2024-01-01 00:00:00.200"), Some(at(0, 0, 0, 200)));
        assert_eq!(parse_timestamp("2024-01-01T00:00:00"), Some(at(0, 0, 0, 0)));
        assert_eq!(parse_timestamp("2024-01-01 00:00:00.200+00:00"), Some(at(0, 0, 0, 200)));
    }

    #[test]
    fn test_parse_timestamp_rejects_garbage() {
        assert_eq!(parse_timestamp(""), None);
        assert_eq!(parse_timestamp("not-a-timestamp"), None);
        assert_eq!(parse_timestamp("2024-13-01T00:00:00"), None);
    }

    #[test]
    fn test_bucket_start_truncates_subseconds() {
        assert_eq!(bucket_start(at(12, 30, 5, 999), 1), at(12, 30, 5, 0));
    }

    #[test]
    fn test_bucket_start_wider_window() {
        assert_eq!(bucket_start(at(12, 30, 7, 250), 5), at(12, 30, 5, 0));
        assert_eq!(bucket_start(at(12, 30, 5, 0), 5), at(12, 30, 5, 0));
    }

    #[test]
    fn test_tps_counts_per_window() {
        let records = vec![
            TransactionRecord::new("2024-01-01T00:00:00.100", TxStatus::Success),
            TransactionRecord::new("2024-01-01T00:00:00.900", TxStatus::Failed),
            TransactionRecord::new("2024-01-01T00:00:01.100", TxStatus::Success),
        ];

        let (submission, confirmation) = tps_intervals(&records, None, 1);

        assert_eq!(submission.get(&at(0, 0, 0, 0)), Some(&2.0));
        assert_eq!(submission.get(&at(0, 0, 1, 0)), Some(&1.0));
        assert!(confirmation.is_empty());
    }

    #[test]
    fn test_tps_confirmation_needs_success() {
        let records = vec![
            TransactionRecord::new("2024-01-01T00:00:00", TxStatus::Failed)
                .with_confirmation("2024-01-01T00:00:01"),
            TransactionRecord::new("2024-01-01T00:00:00", TxStatus::Success)
                .with_confirmation("2024-01-01T00:00:01"),
        ];

        let (submission, confirmation) = tps_intervals(&records, None, 1);

        assert_eq!(submission.get(&at(0, 0, 0, 0)), Some(&2.0));
        assert_eq!(confirmation.get(&at(0, 0, 1, 0)), Some(&1.0));
        assert_eq!(confirmation.len(), 1);
    }

    #[test]
    fn test_tps_unparsable_confirmation_keeps_submission() {
        let records = vec![TransactionRecord::new("2024-01-01T00:00:00", TxStatus::Success)
            .with_confirmation("garbage")];

        let (submission, confirmation) = tps_intervals(&records, None, 1);

        assert_eq!(submission.len(), 1);
        assert!(confirmation.is_empty());
    }

    #[test]
    fn test_tps_scales_by_window_width() {
        let records = vec![
            TransactionRecord::new("2024-01-01T00:00:01", TxStatus::Success),
            TransactionRecord::new("2024-01-01T00:00:03", TxStatus::Success),
        ];

        let (submission, _) = tps_intervals(&records, None, 5);

        assert_eq!(submission.get(&at(0, 0, 0, 0)), Some(&0.4));
    }

    #[test]
    fn test_batch_filter() {
        let records = vec![
            TransactionRecord::new("2024-01-01T00:00:00", TxStatus::Success).with_batch("a"),
            TransactionRecord::new("2024-01-01T00:00:00", TxStatus::Success).with_batch("b"),
        ];

        let (all, _) = tps_intervals(&records, None, 1);
        let (only_a, _) = tps_intervals(&records, Some("a"), 1);
        let (none, _) = tps_intervals(&records, Some("missing"), 1);

        assert_eq!(all.get(&at(0, 0, 0, 0)), Some(&2.0));
        assert_eq!(only_a.get(&at(0, 0, 0, 0)), Some(&1.0));
        assert!(none.is_empty());
    }

    #[test]
    fn test_latency_means_per_window() {
        let records = vec![
            TransactionRecord::new("2024-01-01T00:00:00.200", TxStatus::Success)
                .with_execution_time(50.0),
            TransactionRecord::new("2024-01-01T00:00:00.700", TxStatus::Success)
                .with_execution_time(30.0),
        ];

        let (submission, confirmation) = latency_intervals(&records, None, 1);

        assert_eq!(submission.get(&at(0, 0, 0, 0)), Some(&40.0));
        assert!(confirmation.is_empty());
    }

    #[test]
    fn test_latency_confirmation_keyed_by_submission_window() {
        // Confirmed in the next window, but the measurement belongs to the
        // window the transaction was submitted in.
        let records = vec![TransactionRecord::new("2024-01-01T00:00:00.200", TxStatus::Success)
            .with_confirmation("2024-01-01T00:00:01.700")];

        let (_, confirmation) = latency_intervals(&records, None, 1);

        assert_eq!(confirmation.get(&at(0, 0, 0, 0)), Some(&1500.0));
        assert!(confirmation.get(&at(0, 0, 1, 0)).is_none());
    }

    #[test]
    fn test_latency_excludes_non_positive() {
        let records = vec![
            TransactionRecord::new("2024-01-01T00:00:00", TxStatus::Success)
                .with_execution_time(0.0),
            TransactionRecord::new("2024-01-01T00:00:00.500", TxStatus::Success)
                // Confirmed before submission (clock skew): excluded
                .with_confirmation("2024-01-01T00:00:00.100"),
        ];

        let (submission, confirmation) = latency_intervals(&records, None, 1);

        assert!(submission.is_empty());
        assert!(confirmation.is_empty());
    }

    #[test]
    fn test_empty_input_yields_empty_series() {
        let (sub_tps, conf_tps) = tps_intervals(&[], None, 1);
        let (sub_lat, conf_lat) = latency_intervals(&[], None, 1);

        assert!(sub_tps.is_empty());
        assert!(conf_tps.is_empty());
        assert!(sub_lat.is_empty());
        assert!(conf_lat.is_empty());
    }
}
