//! Live structure editing with undo/redo
//!
//! [`MutationController`] owns the single writable copy of a structure and
//! the [`History`] tape of committed states. Operations run against a scratch
//! copy; only a successful result replaces the live state and is appended to
//! the tape, so a refused operation can never corrupt either one.
//!
//! Failures are not errors at this boundary. They become [`Feedback`] data
//! plus a failed-op count, ready for a status line.

use crate::history::History;
use crate::structures::{OpError, OpOutcome, Structure};
use rand::Rng;
use tracing::{debug, info};

/// How a status message should be presented
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Success,
    Info,
    Error,
}

/// User-facing result of the last request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Feedback {
    pub message: String,
    pub severity: Severity,
}

impl Feedback {
    fn new(message: impl Into<String>, severity: Severity) -> Self {
        Feedback {
            message: message.into(),
            severity,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct OpMetrics {
    pub total_ops: usize,
    pub successful_ops: usize,
    pub failed_ops: usize,
}

pub struct MutationController<S: Structure> {
    live: S,
    history: History<S>,
    metrics: OpMetrics,
    last_feedback: Option<Feedback>,
    /// Path touched by the last operation, for highlighting
    last_path: Vec<usize>,
}

impl<S: Structure> MutationController<S> {
    pub fn new(initial: S) -> Self {
        MutationController {
            history: History::new(initial.clone(), "Initial"),
            live: initial,
            metrics: OpMetrics::default(),
            last_feedback: None,
            last_path: Vec::new(),
        }
    }

    /// Like [`new`](Self::new), but the tape keeps at most `limit` entries
    pub fn with_history_limit(initial: S, limit: usize) -> Self {
        MutationController {
            history: History::with_limit(initial.clone(), "Initial", limit),
            ..Self::new(initial)
        }
    }

    /// Record `new_state` as the result of a successful operation
    pub fn commit(&mut self, label: impl Into<String>, new_state: S) {
        let label = label.into();
        debug!(
            structure = %new_state.kind(),
            %label,
            state = %new_state.summary(),
            "commit"
        );
        self.history.commit(label.clone(), new_state.clone());
        self.live = new_state;
        self.metrics.total_ops += 1;
        self.metrics.successful_ops += 1;
        self.last_feedback = Some(Feedback::new(label, Severity::Success));
    }

    /// Count a refused operation without touching state or history
    pub fn record_failure(&mut self, label: &str, error: &OpError) {
        info!(structure = %self.live.kind(), label, %error, "operation refused");
        self.metrics.total_ops += 1;
        self.metrics.failed_ops += 1;
        self.last_feedback = Some(Feedback::new(error.to_string(), Severity::Error));
        self.last_path.clear();
    }

    /// Run a mutating operation on a copy of the live state
    pub fn apply(
        &mut self,
        label: &str,
        op: impl FnOnce(&mut S) -> Result<OpOutcome, OpError>,
    ) -> &Feedback {
        let mut next = self.live.clone();
        match op(&mut next) {
            Ok(outcome) => {
                self.commit(outcome.message, next);
                self.last_path = outcome.path;
            }
            Err(error) => self.record_failure(label, &error),
        }
        self.feedback()
    }

    /// Run a read-only operation; counted, never recorded in history
    pub fn inspect(
        &mut self,
        label: &str,
        op: impl FnOnce(&S) -> Result<OpOutcome, OpError>,
    ) -> &Feedback {
        match op(&self.live) {
            Ok(outcome) => {
                self.metrics.total_ops += 1;
                self.metrics.successful_ops += 1;
                self.last_feedback = Some(Feedback::new(outcome.message, Severity::Info));
                self.last_path = outcome.path;
            }
            Err(error) => self.record_failure(label, &error),
        }
        self.feedback()
    }

    /// Committed mutation that refills the structure with random values
    pub fn randomize<R: Rng + ?Sized>(&mut self, rng: &mut R) -> &Feedback {
        let mut next = self.live.clone();
        next.randomize(rng);
        self.commit("Randomized", next);
        self.last_path.clear();
        self.feedback()
    }

    /// Committed mutation that empties the structure, undoable
    pub fn clear(&mut self) -> &Feedback {
        let mut next = self.live.clone();
        next.clear();
        self.commit("Cleared", next);
        self.last_path.clear();
        self.feedback()
    }

    /// Start a fresh session: empty structure, single-entry history
    pub fn reset(&mut self) {
        self.live.clear();
        self.history.reset(self.live.clone(), "Initial");
        self.metrics = OpMetrics::default();
        self.last_feedback = None;
        self.last_path.clear();
        debug!(structure = %self.live.kind(), "session reset");
    }

    pub fn undo(&mut self) -> bool {
        let Some(entry) = self.history.undo() else {
            return false;
        };
        self.live = entry.state.clone();
        let message = format!("Undo, back to: {}", entry.label);
        debug!(cursor = self.history.cursor(), "undo");
        self.last_feedback = Some(Feedback::new(message, Severity::Info));
        self.last_path.clear();
        true
    }

    pub fn redo(&mut self) -> bool {
        let Some(entry) = self.history.redo() else {
            return false;
        };
        self.live = entry.state.clone();
        let message = format!("Redo: {}", entry.label);
        debug!(cursor = self.history.cursor(), "redo");
        self.last_feedback = Some(Feedback::new(message, Severity::Info));
        self.last_path.clear();
        true
    }

    pub fn live_state(&self) -> &S {
        &self.live
    }

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    pub fn metrics(&self) -> OpMetrics {
        self.metrics
    }

    pub fn history(&self) -> &History<S> {
        &self.history
    }

    pub fn last_feedback(&self) -> Option<&Feedback> {
        self.last_feedback.as_ref()
    }

    pub fn last_path(&self) -> &[usize] {
        &self.last_path
    }

    fn feedback(&self) -> &Feedback {
        static NONE: Feedback = Feedback {
            message: String::new(),
            severity: Severity::Info,
        };
        self.last_feedback.as_ref().unwrap_or(&NONE)
    }
}
