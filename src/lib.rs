//! # Introduction
//!
//! algotty records every step of a sorting or searching algorithm as an
//! immutable snapshot, then lets you move back and forth through the recorded
//! run in a terminal UI built with [ratatui](https://docs.rs/ratatui). A second
//! mode edits live data structures with full undo/redo.
//!
//! ## Execution pipeline
//!
//! ```text
//! Input → Trace generator → Snapshots → Playback cursor → TUI
//! Key → Structure operation → History tape → TUI
//! ```
//!
//! 1. [`trace`] — runs an algorithm on a copy of the input and records a
//!    [`snapshot::Snapshot`] for every comparison, swap, write and lookup.
//! 2. [`snapshot`] — the value types: elements with stable ids and flags,
//!    snapshots, and the finished [`snapshot::Trace`] with cumulative counters.
//! 3. [`playback`] — a non-blocking cursor over a trace with play, pause,
//!    stepping, seeking and cancellable autoplay ticks.
//! 4. [`structures`] — stack, queue, linked lists, binary search tree and
//!    graph as plain cloneable values.
//! 5. [`mutation`] and [`history`] — apply operations to a live structure and
//!    keep a linear undo/redo tape of committed states.
//! 6. [`config`] — TOML configuration for the terminal host.
//! 7. [`ui`] — ratatui-based TUI; not part of the stable library API.
//!
//! ## Supported algorithms
//!
//! Sorts: bubble, selection, insertion, merge, quick, heap.
//! Searches: linear, binary.

pub mod config;
pub mod history;
pub mod mutation;
pub mod playback;
pub mod snapshot;
pub mod structures;
pub mod trace;
pub mod ui;
