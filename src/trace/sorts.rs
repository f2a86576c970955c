//! Sorting trace generators
//!
//! Each generator is the textbook algorithm run against a [`StepRecorder`].
//! Only strict `<` / `>` comparisons are used, so equal elements never swap
//! and the stable algorithms (bubble, insertion, merge) stay stable.
//!
//! Step counting conventions:
//! - selection and quick sort skip swaps where both indices are the same
//! - insertion sort records the final, failing comparison of each pass
//! - merge sort moves an element only when it comes from the right run;
//!   each move counts as one swap

use super::recorder::StepRecorder;
use crate::snapshot::{Flag, Snapshot};

pub(crate) fn bubble_sort(mut rec: StepRecorder) -> Vec<Snapshot> {
    let n = rec.len();
    for pass in 0..n - 1 {
        let mut swapped = false;
        for j in 0..n - 1 - pass {
            if rec.greater(j, j + 1) {
                rec.swap(j, j + 1);
                swapped = true;
            }
        }
        rec.mark(n - 1 - pass, Flag::Sorted);
        if !swapped {
            // nothing moved, the rest is already in order
            break;
        }
    }
    rec.finish_sorted("Array sorted")
}

pub(crate) fn selection_sort(mut rec: StepRecorder) -> Vec<Snapshot> {
    let n = rec.len();
    for i in 0..n - 1 {
        let mut min = i;
        rec.mark(min, Flag::Highlighted);
        for j in i + 1..n {
            if rec.less(j, min) {
                rec.unmark(min, Flag::Highlighted);
                min = j;
                rec.mark(min, Flag::Highlighted);
            }
        }
        rec.unmark(min, Flag::Highlighted);
        if min != i {
            rec.swap(i, min);
        }
        rec.mark(i, Flag::Sorted);
    }
    rec.finish_sorted("Array sorted")
}

pub(crate) fn insertion_sort(mut rec: StepRecorder) -> Vec<Snapshot> {
    let n = rec.len();
    for i in 1..n {
        let mut j = i;
        while j > 0 {
            if !rec.greater(j - 1, j) {
                break;
            }
            rec.swap(j - 1, j);
            j -= 1;
        }
    }
    rec.finish_sorted("Array sorted")
}

pub(crate) fn merge_sort(mut rec: StepRecorder) -> Vec<Snapshot> {
    let n = rec.len();
    merge_sort_range(&mut rec, 0, n);
    rec.finish_sorted("Array sorted")
}

fn merge_sort_range(rec: &mut StepRecorder, lo: usize, hi: usize) {
    if hi - lo <= 1 {
        return;
    }
    let mid = lo + (hi - lo) / 2;
    merge_sort_range(rec, lo, mid);
    merge_sort_range(rec, mid, hi);
    merge(rec, lo, mid, hi);
}

/// In-place merge of `lo..mid` and `mid..hi`
///
/// `i` is the head of the left run and `j` the head of the right run. When
/// the right head is strictly smaller it is rotated into `i`, which keeps
/// every element id unique in every snapshot.
fn merge(rec: &mut StepRecorder, lo: usize, mid: usize, hi: usize) {
    let (mut i, mut j) = (lo, mid);
    while i < j && j < hi {
        if rec.less(j, i) {
            rec.move_left(j, i);
            j += 1;
        }
        i += 1;
    }
    rec.mark_only(lo..hi, Flag::Highlighted);
    rec.note(format!("Merged indices {}..={}", lo, hi - 1));
}

pub(crate) fn quick_sort(mut rec: StepRecorder) -> Vec<Snapshot> {
    let n = rec.len();
    quick_sort_range(&mut rec, 0, n);
    rec.finish_sorted("Array sorted")
}

fn quick_sort_range(rec: &mut StepRecorder, lo: usize, hi: usize) {
    match hi - lo {
        0 => {}
        1 => rec.mark(lo, Flag::Sorted),
        _ => {
            let p = partition(rec, lo, hi);
            quick_sort_range(rec, lo, p);
            quick_sort_range(rec, p + 1, hi);
        }
    }
}

/// Lomuto partition around the last element of `lo..hi`
fn partition(rec: &mut StepRecorder, lo: usize, hi: usize) -> usize {
    let pivot = hi - 1;
    rec.mark(pivot, Flag::Pivot);
    let pivot_value = rec.value(pivot);
    rec.note(format!("Pivot {}", pivot_value));

    let mut store = lo;
    for j in lo..pivot {
        if rec.less(j, pivot) {
            if store != j {
                rec.swap(store, j);
            }
            store += 1;
        }
    }
    if store != pivot {
        rec.swap(store, pivot);
    }
    rec.unmark(store, Flag::Pivot);
    rec.mark(store, Flag::Sorted);
    rec.note(format!("{} is in its final place", pivot_value));
    store
}

pub(crate) fn heap_sort(mut rec: StepRecorder) -> Vec<Snapshot> {
    let n = rec.len();
    for root in (0..n / 2).rev() {
        sift_down(&mut rec, root, n);
    }
    rec.note("Max heap built");
    for end in (1..n).rev() {
        rec.swap(0, end);
        rec.mark(end, Flag::Sorted);
        sift_down(&mut rec, 0, end);
    }
    rec.finish_sorted("Array sorted")
}

fn sift_down(rec: &mut StepRecorder, mut root: usize, end: usize) {
    loop {
        let left = 2 * root + 1;
        if left >= end {
            return;
        }
        let mut largest = root;
        if rec.greater(left, largest) {
            largest = left;
        }
        let right = left + 1;
        if right < end && rec.greater(right, largest) {
            largest = right;
        }
        if largest == root {
            return;
        }
        rec.swap(root, largest);
        root = largest;
    }
}
