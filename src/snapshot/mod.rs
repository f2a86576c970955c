//! Snapshot model for step-by-step replay
//!
//! This module defines the immutable value types that represent "the array at
//! instant t" and the recorded sequence of them:
//! - [`Element`]: one array slot with a stable id, its value and its flags
//! - [`FlagSet`]: compact set of [`Flag`]s attached to an element
//! - [`Snapshot`]: a full copy of the array plus the indices touched by the step
//! - [`Trace`]: the complete ordered list of snapshots for one run
//!
//! # Value semantics
//!
//! Every snapshot owns its own copy of the elements. A later step is always
//! built from a clone of the previous elements, so stepping backward or
//! seeking never observes aliasing between steps.

use crate::trace::AlgorithmId;
use strum::{Display, EnumIter, IntoEnumIterator};

/// Visual state tags carried by an element
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumIter)]
#[strum(serialize_all = "lowercase")]
pub enum Flag {
    Comparing,
    Swapping,
    Sorted,
    Pivot,
    Searching,
    Found,
    Highlighted,
}

impl Flag {
    const fn bit(self) -> u8 {
        1 << (self as u8)
    }

    /// Flags that only live for a single step
    pub fn is_transient(self) -> bool {
        matches!(self, Flag::Comparing | Flag::Swapping | Flag::Searching)
    }
}

/// Bitset over [`Flag`]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct FlagSet(u8);

impl FlagSet {
    pub const fn empty() -> Self {
        FlagSet(0)
    }

    pub fn insert(&mut self, flag: Flag) {
        self.0 |= flag.bit();
    }

    pub fn remove(&mut self, flag: Flag) {
        self.0 &= !flag.bit();
    }

    pub fn contains(&self, flag: Flag) -> bool {
        self.0 & flag.bit() != 0
    }

    pub fn is_empty(&self) -> bool {
        self.0 == 0
    }

    /// Drop every transient flag, keeping sorted/pivot/found/highlighted
    pub fn clear_transient(&mut self) {
        for flag in Flag::iter().filter(|f| f.is_transient()) {
            self.remove(flag);
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = Flag> + '_ {
        Flag::iter().filter(move |f| self.contains(*f))
    }
}

impl FromIterator<Flag> for FlagSet {
    fn from_iter<I: IntoIterator<Item = Flag>>(iter: I) -> Self {
        let mut set = FlagSet::empty();
        for flag in iter {
            set.insert(flag);
        }
        set
    }
}

/// Stable identity of a logical element across steps
pub type ElementId = usize;

/// One slot of the visualized array
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    pub id: ElementId,
    pub value: i32,
    pub flags: FlagSet,
}

impl Element {
    pub fn new(id: ElementId, value: i32) -> Self {
        Element {
            id,
            value,
            flags: FlagSet::empty(),
        }
    }

    pub fn has(&self, flag: Flag) -> bool {
        self.flags.contains(flag)
    }
}

/// Build the unflagged element list for an input, ids are original indices
pub fn elements_from(values: &[i32]) -> Vec<Element> {
    values
        .iter()
        .enumerate()
        .map(|(id, &value)| Element::new(id, value))
        .collect()
}

/// Indices a step operated on
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Touched {
    pub comparing: Vec<usize>,
    pub swapping: Vec<usize>,
}

/// Counters contributed by a single step (each 0 or 1)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MetricsDelta {
    pub comparisons: u8,
    pub swaps: u8,
}

impl MetricsDelta {
    pub const NONE: MetricsDelta = MetricsDelta {
        comparisons: 0,
        swaps: 0,
    };
    pub const COMPARISON: MetricsDelta = MetricsDelta {
        comparisons: 1,
        swaps: 0,
    };
    pub const SWAP: MetricsDelta = MetricsDelta {
        comparisons: 0,
        swaps: 1,
    };
}

/// Running totals over a prefix of a trace
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Metrics {
    pub comparisons: usize,
    pub swaps: usize,
}

impl Metrics {
    fn add(&mut self, delta: MetricsDelta) {
        self.comparisons += delta.comparisons as usize;
        self.swaps += delta.swaps as usize;
    }
}

/// The array at one instant of a run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snapshot {
    pub sequence_index: usize,
    pub elements: Vec<Element>,
    pub touched: Touched,
    pub metrics_delta: MetricsDelta,
    pub label: String,
}

impl Snapshot {
    pub fn values(&self) -> Vec<i32> {
        self.elements.iter().map(|e| e.value).collect()
    }

    /// Positions of elements carrying `flag`
    pub fn indices_with(&self, flag: Flag) -> Vec<usize> {
        self.elements
            .iter()
            .enumerate()
            .filter(|(_, e)| e.has(flag))
            .map(|(i, _)| i)
            .collect()
    }

    /// True if no element carries a transient flag
    pub fn is_settled(&self) -> bool {
        self.elements
            .iter()
            .all(|e| !e.has(Flag::Comparing) && !e.has(Flag::Swapping))
    }
}

/// How a run ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TraceOutcome {
    Sorted,
    Found { index: usize },
    NotFound,
}

/// Complete, precomputed sequence of snapshots for one run
#[derive(Debug, Clone)]
pub struct Trace {
    pub algorithm: AlgorithmId,
    pub input: Vec<i32>,
    pub target: Option<i32>,
    pub outcome: TraceOutcome,
    snapshots: Vec<Snapshot>,
    /// cumulative[i] = metrics after applying snapshots[0..=i]
    cumulative: Vec<Metrics>,
}

impl Trace {
    pub(crate) fn new(
        algorithm: AlgorithmId,
        input: Vec<i32>,
        target: Option<i32>,
        outcome: TraceOutcome,
        snapshots: Vec<Snapshot>,
    ) -> Self {
        let mut running = Metrics::default();
        let cumulative = snapshots
            .iter()
            .map(|s| {
                running.add(s.metrics_delta);
                running
            })
            .collect();
        Trace {
            algorithm,
            input,
            target,
            outcome,
            snapshots,
            cumulative,
        }
    }

    /// Get a snapshot by index
    pub fn get(&self, index: usize) -> Option<&Snapshot> {
        self.snapshots.get(index)
    }

    pub fn snapshots(&self) -> &[Snapshot] {
        &self.snapshots
    }

    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }

    /// Highest valid cursor position
    pub fn total_steps(&self) -> usize {
        self.snapshots.len().saturating_sub(1)
    }

    pub fn last(&self) -> Option<&Snapshot> {
        self.snapshots.last()
    }

    /// Cumulative counters up to and including `position` (clamped)
    pub fn metrics_at(&self, position: usize) -> Metrics {
        if self.cumulative.is_empty() {
            return Metrics::default();
        }
        self.cumulative[position.min(self.cumulative.len() - 1)]
    }

    pub fn totals(&self) -> Metrics {
        self.cumulative.last().copied().unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flag_set_insert_and_remove() {
        let mut flags = FlagSet::empty();
        flags.insert(Flag::Sorted);
        flags.insert(Flag::Comparing);
        assert!(flags.contains(Flag::Sorted));
        assert!(flags.contains(Flag::Comparing));

        flags.clear_transient();
        assert!(flags.contains(Flag::Sorted));
        assert!(!flags.contains(Flag::Comparing));

        flags.remove(Flag::Sorted);
        assert!(flags.is_empty());
    }

    #[test]
    fn flag_set_iterates_in_declaration_order() {
        let flags: FlagSet = [Flag::Found, Flag::Pivot].into_iter().collect();
        let collected: Vec<Flag> = flags.iter().collect();
        assert_eq!(collected, vec![Flag::Pivot, Flag::Found]);
    }

    #[test]
    fn flag_display_is_lowercase() {
        assert_eq!(Flag::Highlighted.to_string(), "highlighted");
    }

    #[test]
    fn metrics_accumulate_per_position() {
        let mk = |i: usize, delta| Snapshot {
            sequence_index: i,
            elements: elements_from(&[1, 2]),
            touched: Touched::default(),
            metrics_delta: delta,
            label: String::new(),
        };
        let trace = Trace::new(
            AlgorithmId::BubbleSort,
            vec![1, 2],
            None,
            TraceOutcome::Sorted,
            vec![
                mk(0, MetricsDelta::NONE),
                mk(1, MetricsDelta::COMPARISON),
                mk(2, MetricsDelta::SWAP),
                mk(3, MetricsDelta::COMPARISON),
            ],
        );

        assert_eq!(trace.total_steps(), 3);
        assert_eq!(trace.metrics_at(0), Metrics::default());
        assert_eq!(
            trace.metrics_at(2),
            Metrics {
                comparisons: 1,
                swaps: 1
            }
        );
        assert_eq!(trace.metrics_at(99), trace.totals());
        assert_eq!(trace.totals().comparisons, 2);
    }
}
