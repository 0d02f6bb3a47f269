//! Merge two sparse interval series onto one aligned timeline.
//!
//! The submission and confirmation series are keyed independently, so their
//! key sets can be disjoint. Charting needs one x-axis: the sorted union of
//! both key sets, with each series zero-filled where it has no window.

use super::intervals::IntervalSeries;
use chrono::NaiveDateTime;
use std::collections::BTreeSet;

/// One timeline, two parallel value arrays
///
/// **Public** - the data contract consumed by the rendering sink
///
/// Invariant: `timeline`, `submission` and `confirmation` have equal length,
/// and `timeline` is strictly increasing.
#[derive(Debug, Clone, PartialEq)]
pub struct AlignedSeries {
    /// Sorted union of both series' window starts
    pub timeline: Vec<NaiveDateTime>,

    /// Submission-side values, 0.0 where the window had no data
    pub submission: Vec<f64>,

    /// Confirmation-side values, 0.0 where the window had no data
    pub confirmation: Vec<f64>,
}

impl AlignedSeries {
    pub fn len(&self) -> usize {
        self.timeline.len()
    }

    pub fn is_empty(&self) -> bool {
        self.timeline.is_empty()
    }
}

/// Align two sparse series onto their merged timeline
///
/// **Public** - invoked once for the TPS pair and once for the latency pair
///
/// # Arguments
/// * `submission` - submission-side series
/// * `confirmation` - confirmation-side series
///
/// # Returns
/// AlignedSeries with zero-filled gaps. Two empty inputs produce an empty
/// timeline and empty arrays, which the caller reports as "nothing to plot".
pub fn merge_series(submission: &IntervalSeries, confirmation: &IntervalSeries) -> AlignedSeries {
    let timeline: Vec<NaiveDateTime> = submission
        .keys()
        .chain(confirmation.keys())
        .copied()
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect();

    let submission_values = timeline
        .iter()
        .map(|ts| submission.get(ts).copied().unwrap_or(0.0))
        .collect();
    let confirmation_values = timeline
        .iter()
        .map(|ts| confirmation.get(ts).copied().unwrap_or(0.0))
        .collect();

    AlignedSeries {
        timeline,
        submission: submission_values,
        confirmation: confirmation_values,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn at(s: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 1, 1)
            .unwrap()
            .and_hms_opt(0, 0, s)
            .unwrap()
    }

    #[test]
    fn test_merge_disjoint_keys_zero_fills() {
        let submission: IntervalSeries = [(at(0), 2.0), (at(2), 1.0)].into_iter().collect();
        let confirmation: IntervalSeries = [(at(1), 3.0)].into_iter().collect();

        let aligned = merge_series(&submission, &confirmation);

        assert_eq!(aligned.timeline, vec![at(0), at(1), at(2)]);
        assert_eq!(aligned.submission, vec![2.0, 0.0, 1.0]);
        assert_eq!(aligned.confirmation, vec![0.0, 3.0, 0.0]);
    }

    #[test]
    fn test_merge_lengths_match_and_timeline_sorted() {
        let submission: IntervalSeries = [(at(5), 1.0), (at(1), 1.0)].into_iter().collect();
        let confirmation: IntervalSeries = [(at(3), 1.0), (at(1), 2.0)].into_iter().collect();

        let aligned = merge_series(&submission, &confirmation);

        assert_eq!(aligned.len(), aligned.submission.len());
        assert_eq!(aligned.len(), aligned.confirmation.len());
        assert!(aligned.timeline.windows(2).all(|pair| pair[0] < pair[1]));
    }

    #[test]
    fn test_merge_shared_key_keeps_both_values() {
        let submission: IntervalSeries = [(at(0), 4.0)].into_iter().collect();
        let confirmation: IntervalSeries = [(at(0), 2.5)].into_iter().collect();

        let aligned = merge_series(&submission, &confirmation);

        assert_eq!(aligned.timeline.len(), 1);
        assert_eq!(aligned.submission, vec![4.0]);
        assert_eq!(aligned.confirmation, vec![2.5]);
    }

    #[test]
    fn test_merge_empty() {
        let empty = IntervalSeries::new();
        let aligned = merge_series(&empty, &empty);

        assert!(aligned.is_empty());
        assert!(aligned.submission.is_empty());
        assert!(aligned.confirmation.is_empty());
    }
}
