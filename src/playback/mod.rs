//! Playback over a recorded trace
//!
//! [`PlaybackController`] is a cursor over a fixed, already generated
//! [`Trace`]. It never blocks: autoplay is a chain of [`ScheduledTick`]s that
//! the host fires when they fall due (from a timer, or by calling
//! [`PlaybackController::poll`] from its event loop).
//!
//! # Cancellation
//!
//! Every `play` starts a new run and hands out a fresh [`RunToken`]. Pausing,
//! resetting or loading another trace retires the token, so a tick that was
//! already scheduled arrives as [`TickOutcome::Stale`] and changes nothing.
//!
//! # Bounds
//!
//! Nothing here fails. Playing without a trace, stepping past either end and
//! seeking out of range all degrade to clamped no-ops reported through the
//! returned outcome.

use crate::snapshot::{Metrics, Snapshot, Trace};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::debug;

/// Shortest accepted delay between two autoplay steps
pub const MIN_SPEED: Duration = Duration::from_millis(1);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Idle,
    Running,
    Paused,
    Finished,
}

/// Identity of one autoplay run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunToken(u64);

/// A tick the host must fire at or after `due`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScheduledTick {
    pub token: RunToken,
    pub due: Instant,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayOutcome {
    Started(ScheduledTick),
    AlreadyRunning,
    /// Already at the last step
    Finished,
    NothingToPlay,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepOutcome {
    Moved {
        position: usize,
    },
    /// Clamped at a boundary, position unchanged
    AtBoundary,
    /// Manual moves are ignored while autoplay runs
    Running,
    NothingToPlay,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    Advanced {
        position: usize,
        next: ScheduledTick,
    },
    Finished {
        position: usize,
    },
    /// The run this tick belonged to was paused or discarded
    Stale,
}

type Observer = Box<dyn FnMut(usize, Mode)>;

pub struct PlaybackController {
    trace: Option<Arc<Trace>>,
    position: usize,
    mode: Mode,
    speed: Duration,
    generation: u64,
    pending: Option<ScheduledTick>,
    observers: Vec<Observer>,
}

impl PlaybackController {
    /// Controller with no trace yet
    pub fn new(speed: Duration) -> Self {
        PlaybackController {
            trace: None,
            position: 0,
            mode: Mode::Idle,
            speed: speed.max(MIN_SPEED),
            generation: 0,
            pending: None,
            observers: Vec::new(),
        }
    }

    pub fn with_trace(trace: Trace, speed: Duration) -> Self {
        let mut controller = Self::new(speed);
        controller.load(trace);
        controller
    }

    /// Replace the current trace, implies [`reset`](Self::reset)
    pub fn load(&mut self, trace: Trace) {
        self.reset();
        debug!(
            algorithm = %trace.algorithm,
            total_steps = trace.total_steps(),
            "trace loaded"
        );
        self.trace = Some(Arc::new(trace));
        self.notify();
    }

    /// Called with `(position, mode)` after every change
    pub fn subscribe(&mut self, observer: impl FnMut(usize, Mode) + 'static) {
        self.observers.push(Box::new(observer));
    }

    pub fn play(&mut self, now: Instant) -> PlayOutcome {
        let Some(total) = self.trace.as_ref().map(|t| t.total_steps()) else {
            return PlayOutcome::NothingToPlay;
        };
        match self.mode {
            Mode::Finished => PlayOutcome::Finished,
            Mode::Running => PlayOutcome::AlreadyRunning,
            Mode::Idle | Mode::Paused if self.position >= total => {
                self.set_mode(Mode::Finished);
                PlayOutcome::Finished
            }
            Mode::Idle | Mode::Paused => {
                self.generation += 1;
                self.set_mode(Mode::Running);
                let tick = self.schedule(now);
                debug!(position = self.position, "playback started");
                PlayOutcome::Started(tick)
            }
        }
    }

    pub fn pause(&mut self) {
        if self.mode == Mode::Running {
            self.cancel_pending();
            self.set_mode(Mode::Paused);
            debug!(position = self.position, "playback paused");
        }
    }

    /// Fire a scheduled tick
    pub fn tick(&mut self, token: RunToken, now: Instant) -> TickOutcome {
        if self.mode != Mode::Running || token != RunToken(self.generation) {
            return TickOutcome::Stale;
        }
        let total = self.total_steps();
        self.position = (self.position + 1).min(total);
        if self.position >= total {
            self.pending = None;
            self.mode = Mode::Finished;
            self.notify();
            debug!(position = self.position, "playback finished");
            return TickOutcome::Finished {
                position: self.position,
            };
        }
        self.notify();
        TickOutcome::Advanced {
            position: self.position,
            next: self.schedule(now),
        }
    }

    /// Fire the pending tick if it is due
    pub fn poll(&mut self, now: Instant) -> Option<TickOutcome> {
        let pending = self.pending?;
        if now < pending.due {
            return None;
        }
        Some(self.tick(pending.token, now))
    }

    pub fn step_forward(&mut self) -> StepOutcome {
        self.move_to(|position, _| position.checked_add(1))
    }

    pub fn step_backward(&mut self) -> StepOutcome {
        self.move_to(|position, _| position.checked_sub(1))
    }

    /// Jump straight to `index`, clamped to the trace
    pub fn seek(&mut self, index: usize) -> StepOutcome {
        self.move_to(|_, total| Some(index.min(total)))
    }

    pub fn seek_to_start(&mut self) -> StepOutcome {
        self.seek(0)
    }

    pub fn seek_to_end(&mut self) -> StepOutcome {
        self.seek(usize::MAX)
    }

    /// Cancel autoplay and drop the trace
    pub fn reset(&mut self) {
        self.cancel_pending();
        self.trace = None;
        self.position = 0;
        self.mode = Mode::Idle;
        self.notify();
    }

    /// Applies from the next scheduled tick on
    pub fn set_speed(&mut self, speed: Duration) {
        self.speed = speed.max(MIN_SPEED);
    }

    pub fn speed(&self) -> Duration {
        self.speed
    }

    pub fn current_snapshot(&self) -> Option<&Snapshot> {
        self.trace.as_ref().and_then(|t| t.get(self.position))
    }

    /// Counters accumulated up to the current position
    pub fn metrics(&self) -> Metrics {
        self.trace
            .as_ref()
            .map(|t| t.metrics_at(self.position))
            .unwrap_or_default()
    }

    pub fn position(&self) -> usize {
        self.position
    }

    pub fn total_steps(&self) -> usize {
        self.trace.as_ref().map_or(0, |t| t.total_steps())
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// Shared handle to the trace for other read-only observers
    pub fn trace(&self) -> Option<Arc<Trace>> {
        self.trace.clone()
    }

    pub fn pending_tick(&self) -> Option<ScheduledTick> {
        self.pending
    }

    fn move_to(&mut self, target: impl FnOnce(usize, usize) -> Option<usize>) -> StepOutcome {
        if self.trace.is_none() {
            return StepOutcome::NothingToPlay;
        }
        if self.mode == Mode::Running {
            return StepOutcome::Running;
        }
        let total = self.total_steps();
        match target(self.position, total) {
            Some(next) if next <= total && next != self.position => {
                self.position = next;
                self.mode = if next == total {
                    Mode::Finished
                } else {
                    Mode::Paused
                };
                self.notify();
                StepOutcome::Moved { position: next }
            }
            _ => StepOutcome::AtBoundary,
        }
    }

    fn schedule(&mut self, now: Instant) -> ScheduledTick {
        let tick = ScheduledTick {
            token: RunToken(self.generation),
            due: now + self.speed,
        };
        self.pending = Some(tick);
        tick
    }

    fn cancel_pending(&mut self) {
        self.generation += 1;
        self.pending = None;
    }

    fn set_mode(&mut self, mode: Mode) {
        if self.mode != mode {
            self.mode = mode;
            self.notify();
        }
    }

    fn notify(&mut self) {
        let (position, mode) = (self.position, self.mode);
        for observer in &mut self.observers {
            observer(position, mode);
        }
    }
}
