//! Step emission side channel shared by every generator
//!
//! Generators never touch a caller's slice. They drive a [`StepRecorder`],
//! which owns a working copy of the elements and appends a fresh
//! [`Snapshot`] (a full clone of that copy plus per-step flags) every time
//! the algorithm compares, swaps, moves or finishes something.
//!
//! Persistent flags (`sorted`, `pivot`, `found`, `highlighted`) live on the
//! working elements and travel with them through swaps. Transient flags
//! (`comparing`, `swapping`, `searching`) are applied only to the emitted
//! copy, so they are cleared automatically on the next step.

use crate::snapshot::{elements_from, Element, Flag, MetricsDelta, Snapshot, Touched};
use std::ops::Range;

pub(crate) struct StepRecorder {
    elements: Vec<Element>,
    snapshots: Vec<Snapshot>,
}

impl StepRecorder {
    pub fn new(input: &[i32]) -> Self {
        StepRecorder {
            elements: elements_from(input),
            snapshots: Vec::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn value(&self, index: usize) -> i32 {
        self.elements[index].value
    }

    /// Emit a snapshot of the working state with extra per-step flags
    pub fn emit(
        &mut self,
        label: String,
        touched: Touched,
        transient: &[(usize, Flag)],
        delta: MetricsDelta,
    ) {
        let mut elements = self.elements.clone();
        for &i in &touched.comparing {
            elements[i].flags.insert(Flag::Comparing);
        }
        for &i in &touched.swapping {
            elements[i].flags.insert(Flag::Swapping);
        }
        for &(i, flag) in transient {
            elements[i].flags.insert(flag);
        }
        self.snapshots.push(Snapshot {
            sequence_index: self.snapshots.len(),
            elements,
            touched,
            metrics_delta: delta,
            label,
        });
    }

    /// Emit a step with no touched indices and no metrics
    pub fn note(&mut self, label: impl Into<String>) {
        self.emit(label.into(), Touched::default(), &[], MetricsDelta::NONE);
    }

    /// Leading snapshot of the untouched input
    pub fn start(&mut self) {
        let label = format!("Initial array of {} elements", self.len());
        self.note(label);
    }

    fn compare(&mut self, i: usize, j: usize) {
        let label = format!("Compare {} and {}", self.value(i), self.value(j));
        self.emit(
            label,
            Touched {
                comparing: vec![i, j],
                swapping: Vec::new(),
            },
            &[],
            MetricsDelta::COMPARISON,
        );
    }

    /// Record one comparison and report `value(i) > value(j)`
    pub fn greater(&mut self, i: usize, j: usize) -> bool {
        self.compare(i, j);
        self.value(i) > self.value(j)
    }

    /// Record one comparison and report `value(i) < value(j)`
    pub fn less(&mut self, i: usize, j: usize) -> bool {
        self.compare(i, j);
        self.value(i) < self.value(j)
    }

    pub fn swap(&mut self, i: usize, j: usize) {
        let label = format!("Swap {} and {}", self.value(i), self.value(j));
        self.elements.swap(i, j);
        self.emit(
            label,
            Touched {
                comparing: Vec::new(),
                swapping: vec![i, j],
            },
            &[],
            MetricsDelta::SWAP,
        );
    }

    /// Move the element at `from` down to `to`, shifting `to..from` right by one
    pub fn move_left(&mut self, from: usize, to: usize) {
        let value = self.value(from);
        self.elements[to..=from].rotate_right(1);
        self.emit(
            format!("Write {} at index {}", value, to),
            Touched {
                comparing: Vec::new(),
                swapping: vec![to],
            },
            &[],
            MetricsDelta::SWAP,
        );
    }

    pub fn mark(&mut self, index: usize, flag: Flag) {
        self.elements[index].flags.insert(flag);
    }

    pub fn unmark(&mut self, index: usize, flag: Flag) {
        self.elements[index].flags.remove(flag);
    }

    /// Set `flag` on `range` and clear it everywhere else
    pub fn mark_only(&mut self, range: Range<usize>, flag: Flag) {
        for (i, element) in self.elements.iter_mut().enumerate() {
            if range.contains(&i) {
                element.flags.insert(flag);
            } else {
                element.flags.remove(flag);
            }
        }
    }

    /// Final sort step: every element carries `sorted` and nothing else
    pub fn finish_sorted(mut self, label: impl Into<String>) -> Vec<Snapshot> {
        for element in &mut self.elements {
            element.flags = [Flag::Sorted].into_iter().collect();
        }
        self.note(label);
        self.snapshots
    }

    pub fn finish(self) -> Vec<Snapshot> {
        self.snapshots
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn transient_flags_do_not_leak_into_next_step() {
        let mut rec = StepRecorder::new(&[3, 1]);
        rec.start();
        assert!(rec.greater(0, 1));
        rec.swap(0, 1);
        let snapshots = rec.finish();

        assert_eq!(snapshots.len(), 3);
        assert!(snapshots[1].elements[0].has(Flag::Comparing));
        assert!(!snapshots[2].elements[0].has(Flag::Comparing));
        assert!(snapshots[2].elements[0].has(Flag::Swapping));
        assert_eq!(snapshots[2].values(), vec![1, 3]);
        // earlier steps keep their own copy
        assert_eq!(snapshots[1].values(), vec![3, 1]);
    }

    #[test]
    fn move_left_keeps_ids_unique() {
        let mut rec = StepRecorder::new(&[4, 5, 1]);
        rec.move_left(2, 0);
        let snapshots = rec.finish();

        let ids: Vec<usize> = snapshots[0].elements.iter().map(|e| e.id).collect();
        assert_eq!(ids, vec![2, 0, 1]);
        assert_eq!(snapshots[0].values(), vec![1, 4, 5]);
        assert_eq!(snapshots[0].touched.swapping, vec![0]);
    }

    #[test]
    fn persistent_flags_travel_with_swaps() {
        let mut rec = StepRecorder::new(&[7, 2]);
        rec.mark(0, Flag::Pivot);
        rec.swap(0, 1);
        let snapshots = rec.finish();
        assert!(snapshots[0].elements[1].has(Flag::Pivot));
        assert_eq!(snapshots[0].elements[1].value, 7);
    }
}
