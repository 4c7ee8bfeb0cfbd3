//! Gap-based merging of detected runs into utterance intervals.

use crate::constants::grid;
use crate::detect::RawSegment;
use crate::error::{Error, Result};

/// An utterance interval in seconds.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TimeInterval {
    /// Start time in seconds.
    pub start: f64,
    /// End time in seconds.
    pub end: f64,
}

impl TimeInterval {
    /// Interval duration in seconds.
    pub fn duration(&self) -> f64 {
        self.end - self.start
    }
}

/// How many merged intervals a recording is allowed to produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MergePolicy {
    /// Keep however many intervals emerge from merging.
    Free,
    /// Require exactly this many intervals, failing otherwise.
    ExactCount(usize),
}

impl MergePolicy {
    /// Policy for the fixed experiment grid of trials and repetitions.
    pub const fn fixed_grid() -> Self {
        Self::ExactCount(grid::INTERVALS)
    }
}

/// Merge sample-index runs into time intervals, closing gaps up to
/// `merge_gap` seconds.
///
/// Runs are taken left to right. A run whose start lies within
/// `merge_gap` seconds of the current interval's end (inclusive) is
/// absorbed into it; the absorbed run's end replaces the interval's end
/// unconditionally. Runs further away open a new interval.
///
/// With an exact-count policy the merged intervals must match the
/// required count or [`Error::SegmentCountMismatch`] is returned.
pub fn merge_runs(
    runs: &[RawSegment],
    sample_rate: u32,
    merge_gap: f64,
    policy: MergePolicy,
) -> Result<Vec<TimeInterval>> {
    let rate = f64::from(sample_rate);
    let mut merged: Vec<TimeInterval> = Vec::new();

    for run in runs {
        #[allow(clippy::cast_precision_loss)]
        let start = run.start as f64 / rate;
        #[allow(clippy::cast_precision_loss)]
        let end = run.end as f64 / rate;

        match merged.last_mut() {
            Some(last) if start <= last.end + merge_gap => {
                // The later run always supplies the end.
                last.end = end;
            }
            _ => merged.push(TimeInterval { start, end }),
        }
    }

    if let MergePolicy::ExactCount(expected) = policy {
        if merged.len() != expected {
            return Err(Error::SegmentCountMismatch {
                expected,
                actual: merged.len(),
            });
        }
    }
    Ok(merged)
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::float_cmp)]
mod tests {
    use super::*;

    fn run(start: usize, end: usize) -> RawSegment {
        RawSegment { start, end }
    }

    #[test]
    fn test_merge_empty_runs() {
        let merged = merge_runs(&[], 10, 2.0, MergePolicy::Free).unwrap();
        assert!(merged.is_empty());
    }

    #[test]
    fn test_merge_close_runs_into_one() {
        // Gap between runs is 1 s, under the 2 s limit.
        let runs = vec![run(0, 10), run(20, 30)];
        let merged = merge_runs(&runs, 10, 2.0, MergePolicy::Free).unwrap();
        assert_eq!(merged.len(), 1);
        assert_eq!(merged[0].start, 0.0);
        assert_eq!(merged[0].end, 3.0);
    }

    #[test]
    fn test_merge_distant_runs_stay_apart() {
        // Gap between runs is 3 s, over the 2 s limit.
        let runs = vec![run(0, 10), run(40, 50)];
        let merged = merge_runs(&runs, 10, 2.0, MergePolicy::Free).unwrap();
        assert_eq!(merged.len(), 2);
        assert_eq!(merged[1].start, 4.0);
        assert_eq!(merged[1].end, 5.0);
    }

    #[test]
    fn test_merge_gap_boundary_is_inclusive() {
        // Run starts exactly merge_gap after the previous end.
        let runs = vec![run(0, 10), run(30, 40)];
        let merged = merge_runs(&runs, 10, 2.0, MergePolicy::Free).unwrap();
        assert_eq!(merged.len(), 1);
        assert_eq!(merged[0].end, 4.0);

        let merged = merge_runs(&runs, 10, 1.9, MergePolicy::Free).unwrap();
        assert_eq!(merged.len(), 2);
    }

    #[test]
    fn test_merge_later_run_owns_the_end() {
        // An absorbed run with an earlier end still overwrites it.
        let runs = vec![run(0, 10), run(2, 5)];
        let merged = merge_runs(&runs, 1, 0.0, MergePolicy::Free).unwrap();
        assert_eq!(merged.len(), 1);
        assert_eq!(merged[0].start, 0.0);
        assert_eq!(merged[0].end, 5.0);
    }

    #[test]
    fn test_merge_chain_of_runs() {
        let runs = vec![run(0, 5), run(10, 15), run(20, 25), run(60, 65)];
        let merged = merge_runs(&runs, 10, 1.0, MergePolicy::Free).unwrap();
        assert_eq!(merged.len(), 2);
        assert_eq!(merged[0].start, 0.0);
        assert_eq!(merged[0].end, 2.5);
        assert_eq!(merged[1].start, 6.0);
    }

    #[test]
    fn test_exact_count_satisfied() {
        let runs: Vec<RawSegment> = (0..30).map(|i| run(i * 100, i * 100 + 10)).collect();
        let merged = merge_runs(&runs, 10, 2.0, MergePolicy::ExactCount(30)).unwrap();
        assert_eq!(merged.len(), 30);
    }

    #[test]
    fn test_exact_count_mismatch() {
        let runs: Vec<RawSegment> = (0..29).map(|i| run(i * 100, i * 100 + 10)).collect();
        let err = merge_runs(&runs, 10, 2.0, MergePolicy::ExactCount(30)).unwrap_err();
        match err {
            Error::SegmentCountMismatch { expected, actual } => {
                assert_eq!(expected, 30);
                assert_eq!(actual, 29);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_exact_count_surplus() {
        let runs: Vec<RawSegment> = (0..31).map(|i| run(i * 100, i * 100 + 10)).collect();
        let err = merge_runs(&runs, 10, 2.0, MergePolicy::ExactCount(30)).unwrap_err();
        match err {
            Error::SegmentCountMismatch { actual, .. } => assert_eq!(actual, 31),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_merge_is_idempotent() {
        let runs = vec![run(0, 5), run(10, 15), run(20, 25), run(60, 65)];
        let merged = merge_runs(&runs, 10, 1.0, MergePolicy::Free).unwrap();

        // Feeding the merged intervals back in changes nothing.
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let as_runs: Vec<RawSegment> = merged
            .iter()
            .map(|iv| run((iv.start * 10.0) as usize, (iv.end * 10.0) as usize))
            .collect();
        let remerged = merge_runs(&as_runs, 10, 1.0, MergePolicy::Free).unwrap();
        assert_eq!(remerged, merged);
    }

    #[test]
    fn test_exact_count_empty_input() {
        let err = merge_runs(&[], 10, 2.0, MergePolicy::fixed_grid()).unwrap_err();
        match err {
            Error::SegmentCountMismatch { expected, actual } => {
                assert_eq!(expected, 30);
                assert_eq!(actual, 0);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_fixed_grid_policy_count() {
        assert_eq!(MergePolicy::fixed_grid(), MergePolicy::ExactCount(30));
    }

    #[test]
    fn test_interval_duration() {
        let interval = TimeInterval {
            start: 1.5,
            end: 4.0,
        };
        assert_eq!(interval.duration(), 2.5);
    }
}
