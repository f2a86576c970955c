//! Searching trace generators
//!
//! Linear search stops at the first match. Binary search runs on a sorted
//! copy of its input and, when the target is absent, ends without any
//! `found` flag: consumers read that as "not found", not as an error.

use super::recorder::StepRecorder;
use crate::snapshot::{Flag, MetricsDelta, Snapshot, Touched, TraceOutcome};

pub(crate) fn linear_search(mut rec: StepRecorder, target: i32) -> (Vec<Snapshot>, TraceOutcome) {
    for i in 0..rec.len() {
        let value = rec.value(i);
        rec.emit(
            format!("Check index {}: {} == {}?", i, value, target),
            Touched {
                comparing: vec![i],
                swapping: Vec::new(),
            },
            &[(i, Flag::Searching)],
            MetricsDelta::COMPARISON,
        );
        if value == target {
            rec.mark(i, Flag::Found);
            rec.note(format!("Found {} at index {}", target, i));
            return (rec.finish(), TraceOutcome::Found { index: i });
        }
    }
    rec.note(format!("{} is not in the array", target));
    (rec.finish(), TraceOutcome::NotFound)
}

/// `rec` must already hold the sorted input and its leading snapshot
pub(crate) fn binary_search(mut rec: StepRecorder, target: i32) -> (Vec<Snapshot>, TraceOutcome) {
    // half-open active window
    let (mut lo, mut hi) = (0, rec.len());
    while lo < hi {
        let mid = lo + (hi - lo) / 2;
        let value = rec.value(mid);
        rec.emit(
            format!(
                "Search indices {}..={}, middle {} is {}",
                lo,
                hi - 1,
                mid,
                value
            ),
            Touched {
                comparing: (lo..hi).collect(),
                swapping: Vec::new(),
            },
            &[(mid, Flag::Searching)],
            MetricsDelta::COMPARISON,
        );
        if value == target {
            rec.mark(mid, Flag::Found);
            rec.note(format!("Found {} at index {}", target, mid));
            return (rec.finish(), TraceOutcome::Found { index: mid });
        }
        if value < target {
            lo = mid + 1;
        } else {
            hi = mid;
        }
    }
    rec.note(format!("{} is not in the array", target));
    (rec.finish(), TraceOutcome::NotFound)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn linear_search_stops_at_first_match() {
        let mut rec = StepRecorder::new(&[4, 8, 8, 1]);
        rec.start();
        let (snapshots, outcome) = linear_search(rec, 8);

        assert_eq!(outcome, TraceOutcome::Found { index: 1 });
        // start, look at 0, look at 1, found
        assert_eq!(snapshots.len(), 4);
        let last = snapshots.last().unwrap();
        assert_eq!(last.indices_with(Flag::Found), vec![1]);
        assert!(last.is_settled());
    }

    #[test]
    fn binary_search_window_shrinks() {
        let mut rec = StepRecorder::new(&[1, 3, 5, 7, 9, 11, 13]);
        rec.start();
        let (snapshots, outcome) = binary_search(rec, 11);

        assert_eq!(outcome, TraceOutcome::Found { index: 5 });
        let windows: Vec<usize> = snapshots
            .iter()
            .filter(|s| s.metrics_delta.comparisons == 1)
            .map(|s| s.indices_with(Flag::Comparing).len())
            .collect();
        assert_eq!(windows, vec![7, 3]);
    }

    #[test]
    fn binary_search_absent_target_has_no_found_flag() {
        let mut rec = StepRecorder::new(&[2, 4, 6]);
        rec.start();
        let (snapshots, outcome) = binary_search(rec, 5);

        assert_eq!(outcome, TraceOutcome::NotFound);
        assert!(snapshots
            .iter()
            .all(|s| s.indices_with(Flag::Found).is_empty()));
    }
}
