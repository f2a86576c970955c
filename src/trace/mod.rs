//! Trace generation
//!
//! This module turns an algorithm and an input into a [`Trace`]:
//! - [`AlgorithmId`]: the supported algorithms and their metadata
//! - [`generate_trace`]: pure, deterministic entry point
//! - `recorder`: the step emission side channel the generators write to
//! - `sorts` / `search`: one generator per algorithm
//!
//! # Trace shape
//!
//! Index 0 is always the untouched input. For sorts of zero or one element
//! that single snapshot is already flagged `sorted` and nothing else is
//! emitted. The last snapshot never carries `comparing` or `swapping`.

pub mod errors;
mod recorder;
mod search;
mod sorts;

use crate::snapshot::{Flag, Snapshot, Trace, TraceOutcome};
use errors::TraceError;
use rand::Rng;
use recorder::StepRecorder;
use std::ops::RangeInclusive;
use std::str::FromStr;
use strum::{Display, EnumIter, IntoEnumIterator};
use tracing::debug;

/// Algorithms that can be traced
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumIter)]
#[strum(serialize_all = "kebab-case")]
pub enum AlgorithmId {
    BubbleSort,
    SelectionSort,
    InsertionSort,
    MergeSort,
    QuickSort,
    HeapSort,
    LinearSearch,
    BinarySearch,
}

/// Big-O summary shown next to a run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Complexity {
    pub best: &'static str,
    pub average: &'static str,
    pub worst: &'static str,
    pub space: &'static str,
}

impl AlgorithmId {
    pub fn all() -> impl Iterator<Item = AlgorithmId> {
        AlgorithmId::iter()
    }

    pub fn is_search(self) -> bool {
        matches!(self, AlgorithmId::LinearSearch | AlgorithmId::BinarySearch)
    }

    /// Equal values keep their relative order
    pub fn is_stable(self) -> bool {
        matches!(
            self,
            AlgorithmId::BubbleSort | AlgorithmId::InsertionSort | AlgorithmId::MergeSort
        )
    }

    pub fn title(self) -> &'static str {
        match self {
            AlgorithmId::BubbleSort => "Bubble Sort",
            AlgorithmId::SelectionSort => "Selection Sort",
            AlgorithmId::InsertionSort => "Insertion Sort",
            AlgorithmId::MergeSort => "Merge Sort",
            AlgorithmId::QuickSort => "Quick Sort",
            AlgorithmId::HeapSort => "Heap Sort",
            AlgorithmId::LinearSearch => "Linear Search",
            AlgorithmId::BinarySearch => "Binary Search",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            AlgorithmId::BubbleSort => {
                "Repeatedly swaps adjacent out-of-order pairs until a pass makes no swap."
            }
            AlgorithmId::SelectionSort => {
                "Selects the smallest remaining element and swaps it to the front."
            }
            AlgorithmId::InsertionSort => {
                "Grows a sorted prefix by sliding each new element left into place."
            }
            AlgorithmId::MergeSort => {
                "Splits the array in halves, sorts each half, then merges the runs."
            }
            AlgorithmId::QuickSort => {
                "Partitions around a pivot so smaller values go left, then recurses."
            }
            AlgorithmId::HeapSort => {
                "Builds a max heap, then repeatedly moves the root to the end."
            }
            AlgorithmId::LinearSearch => "Checks each element in order until the target is found.",
            AlgorithmId::BinarySearch => {
                "Halves the sorted search window by comparing against its middle."
            }
        }
    }

    pub fn complexity(self) -> Complexity {
        let c = |best, average, worst, space| Complexity {
            best,
            average,
            worst,
            space,
        };
        match self {
            AlgorithmId::BubbleSort => c("O(n)", "O(n²)", "O(n²)", "O(1)"),
            AlgorithmId::SelectionSort => c("O(n²)", "O(n²)", "O(n²)", "O(1)"),
            AlgorithmId::InsertionSort => c("O(n)", "O(n²)", "O(n²)", "O(1)"),
            AlgorithmId::MergeSort => c("O(n log n)", "O(n log n)", "O(n log n)", "O(n)"),
            AlgorithmId::QuickSort => c("O(n log n)", "O(n log n)", "O(n²)", "O(log n)"),
            AlgorithmId::HeapSort => c("O(n log n)", "O(n log n)", "O(n log n)", "O(1)"),
            AlgorithmId::LinearSearch => c("O(1)", "O(n)", "O(n)", "O(1)"),
            AlgorithmId::BinarySearch => c("O(1)", "O(log n)", "O(log n)", "O(1)"),
        }
    }
}

impl FromStr for AlgorithmId {
    type Err = TraceError;

    /// Accepts `bubble`, `bubble-sort`, `bubble_sort`, `BubbleSort`, ...
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key: String = s
            .chars()
            .filter(|c| c.is_ascii_alphanumeric())
            .collect::<String>()
            .to_ascii_lowercase();
        let key = key
            .strip_suffix("sort")
            .or_else(|| key.strip_suffix("search"))
            .unwrap_or(&key);
        match key {
            "bubble" => Ok(AlgorithmId::BubbleSort),
            "selection" => Ok(AlgorithmId::SelectionSort),
            "insertion" => Ok(AlgorithmId::InsertionSort),
            "merge" => Ok(AlgorithmId::MergeSort),
            "quick" => Ok(AlgorithmId::QuickSort),
            "heap" => Ok(AlgorithmId::HeapSort),
            "linear" => Ok(AlgorithmId::LinearSearch),
            "binary" => Ok(AlgorithmId::BinarySearch),
            _ => Err(TraceError::UnknownAlgorithm {
                name: s.to_string(),
            }),
        }
    }
}

/// Run `algorithm` against a copy of `input` and record every step
///
/// `target` is required for searches and ignored for sorts.
pub fn generate_trace(
    algorithm: AlgorithmId,
    input: &[i32],
    target: Option<i32>,
) -> Result<Trace, TraceError> {
    let trace = match sort_generator(algorithm) {
        Some(sort) => sort_trace(algorithm, input, sort),
        None => {
            let target = target.ok_or(TraceError::MissingTarget { algorithm })?;
            search_trace(algorithm, input, target)
        }
    };
    debug!(
        %algorithm,
        input_len = input.len(),
        steps = trace.len(),
        "generated trace"
    );
    Ok(trace)
}

/// [`generate_trace`] with the algorithm given by name
pub fn generate_trace_by_name(
    name: &str,
    input: &[i32],
    target: Option<i32>,
) -> Result<Trace, TraceError> {
    generate_trace(name.parse()?, input, target)
}

type SortGenerator = fn(StepRecorder) -> Vec<Snapshot>;

fn sort_generator(algorithm: AlgorithmId) -> Option<SortGenerator> {
    match algorithm {
        AlgorithmId::BubbleSort => Some(sorts::bubble_sort),
        AlgorithmId::SelectionSort => Some(sorts::selection_sort),
        AlgorithmId::InsertionSort => Some(sorts::insertion_sort),
        AlgorithmId::MergeSort => Some(sorts::merge_sort),
        AlgorithmId::QuickSort => Some(sorts::quick_sort),
        AlgorithmId::HeapSort => Some(sorts::heap_sort),
        AlgorithmId::LinearSearch | AlgorithmId::BinarySearch => None,
    }
}

fn sort_trace(algorithm: AlgorithmId, input: &[i32], sort: SortGenerator) -> Trace {
    let mut rec = StepRecorder::new(input);

    if input.len() <= 1 {
        for i in 0..input.len() {
            rec.mark(i, Flag::Sorted);
        }
        rec.note(if input.is_empty() {
            "Nothing to sort"
        } else {
            "A single element is already sorted"
        });
        return Trace::new(
            algorithm,
            input.to_vec(),
            None,
            TraceOutcome::Sorted,
            rec.finish(),
        );
    }

    rec.start();
    Trace::new(
        algorithm,
        input.to_vec(),
        None,
        TraceOutcome::Sorted,
        sort(rec),
    )
}

fn search_trace(algorithm: AlgorithmId, input: &[i32], target: i32) -> Trace {
    let (snapshots, outcome) = match algorithm {
        AlgorithmId::BinarySearch => {
            let mut sorted = input.to_vec();
            sorted.sort();
            let mut rec = StepRecorder::new(&sorted);
            rec.note(format!(
                "Sorted input of {} elements, looking for {}",
                sorted.len(),
                target
            ));
            search::binary_search(rec, target)
        }
        _ => {
            let mut rec = StepRecorder::new(input);
            rec.note(format!(
                "Input of {} elements, looking for {}",
                input.len(),
                target
            ));
            search::linear_search(rec, target)
        }
    };
    Trace::new(algorithm, input.to_vec(), Some(target), outcome, snapshots)
}

/// Random input for a new run
pub fn random_input<R: Rng + ?Sized>(
    len: usize,
    range: RangeInclusive<i32>,
    rng: &mut R,
) -> Vec<i32> {
    (0..len).map(|_| rng.gen_range(range.clone())).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn parses_algorithm_aliases() {
        assert_eq!("bubble".parse::<AlgorithmId>(), Ok(AlgorithmId::BubbleSort));
        assert_eq!(
            "Quick-Sort".parse::<AlgorithmId>(),
            Ok(AlgorithmId::QuickSort)
        );
        assert_eq!(
            "binary_search".parse::<AlgorithmId>(),
            Ok(AlgorithmId::BinarySearch)
        );
        assert_eq!(
            "bogo".parse::<AlgorithmId>(),
            Err(TraceError::UnknownAlgorithm {
                name: "bogo".to_string()
            })
        );
    }

    #[test]
    fn display_round_trips_through_from_str() {
        for algorithm in AlgorithmId::all() {
            assert_eq!(algorithm.to_string().parse::<AlgorithmId>(), Ok(algorithm));
        }
    }

    #[test]
    fn search_without_target_is_rejected() {
        let err = generate_trace(AlgorithmId::LinearSearch, &[1, 2], None).unwrap_err();
        assert_eq!(
            err,
            TraceError::MissingTarget {
                algorithm: AlgorithmId::LinearSearch
            }
        );
        assert_eq!(err.to_string(), "linear-search needs a target value");
    }

    #[test]
    fn trivial_sort_inputs_have_a_single_sorted_snapshot() {
        for input in [vec![], vec![42]] {
            let trace = generate_trace(AlgorithmId::QuickSort, &input, None).unwrap();
            assert_eq!(trace.len(), 1);
            assert_eq!(trace.total_steps(), 0);
            assert_eq!(trace.totals().comparisons, 0);
            let snapshot = &trace.snapshots()[0];
            assert!(snapshot.elements.iter().all(|e| e.has(Flag::Sorted)));
        }
    }

    #[test]
    fn empty_search_is_not_found_without_comparisons() {
        let trace = generate_trace(AlgorithmId::BinarySearch, &[], Some(3)).unwrap();
        assert_eq!(trace.outcome, TraceOutcome::NotFound);
        assert_eq!(trace.totals().comparisons, 0);
    }

    #[test]
    fn bubble_sort_example_counts() {
        let trace = generate_trace(AlgorithmId::BubbleSort, &[42, 15, 73, 28], None).unwrap();
        let snapshots = trace.snapshots();

        let comparing = snapshots
            .iter()
            .filter(|s| !s.touched.comparing.is_empty())
            .count();
        let swapping = snapshots
            .iter()
            .filter(|s| !s.touched.swapping.is_empty())
            .count();
        assert_eq!(comparing, 6);
        assert!(swapping >= 3);
        assert_eq!(trace.totals().comparisons, 6);

        let last = trace.last().unwrap();
        assert_eq!(last.values(), vec![15, 28, 42, 73]);
        assert!(last.elements.iter().all(|e| e.has(Flag::Sorted)));
    }

    #[test]
    fn random_input_respects_range() {
        let mut rng = StdRng::seed_from_u64(7);
        let input = random_input(50, 1..=100, &mut rng);
        assert_eq!(input.len(), 50);
        assert!(input.iter().all(|v| (1..=100).contains(v)));
    }
}
