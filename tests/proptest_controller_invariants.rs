//! Property-based invariant tests for the playback and mutation controllers.
//!
//! 1. The playback cursor stays within `0..=total_steps` under any commands
//! 2. Finished is only ever reported at the last position
//! 3. A tick from an earlier run never moves the cursor
//! 4. The history tape matches a simple vector model under commit/undo/redo
//! 5. Failed operations never change the live structure or the tape

use std::time::{Duration, Instant};

use algotty::history::History;
use algotty::mutation::MutationController;
use algotty::playback::{Mode, PlayOutcome, PlaybackController, RunToken, TickOutcome};
use algotty::structures::stack::Stack;
use algotty::structures::Structure;
use algotty::trace::{generate_trace, AlgorithmId};
use proptest::prelude::*;

// ── Strategies ──────────────────────────────────────────────────────────

#[derive(Debug, Clone)]
enum PlaybackOp {
    Play,
    Pause,
    Poll(u64),
    StepForward,
    StepBackward,
    Seek(usize),
    SeekStart,
    SeekEnd,
    StaleTick,
}

fn playback_op_strategy() -> impl Strategy<Value = PlaybackOp> {
    prop_oneof![
        Just(PlaybackOp::Play),
        Just(PlaybackOp::Pause),
        (0u64..40).prop_map(PlaybackOp::Poll),
        Just(PlaybackOp::StepForward),
        Just(PlaybackOp::StepBackward),
        (0usize..200).prop_map(PlaybackOp::Seek),
        Just(PlaybackOp::SeekStart),
        Just(PlaybackOp::SeekEnd),
        Just(PlaybackOp::StaleTick),
    ]
}

#[derive(Debug, Clone)]
enum TapeOp {
    Commit(u8),
    Undo,
    Redo,
}

fn tape_op_strategy() -> impl Strategy<Value = TapeOp> {
    prop_oneof![
        3 => any::<u8>().prop_map(TapeOp::Commit),
        2 => Just(TapeOp::Undo),
        1 => Just(TapeOp::Redo),
    ]
}

#[derive(Debug, Clone)]
enum StackOp {
    Push(i32),
    Pop,
    Undo,
    Redo,
}

fn stack_op_strategy() -> impl Strategy<Value = StackOp> {
    prop_oneof![
        (0i32..100).prop_map(StackOp::Push),
        Just(StackOp::Pop),
        Just(StackOp::Undo),
        Just(StackOp::Redo),
    ]
}

// ── Playback ────────────────────────────────────────────────────────────

proptest! {
    #[test]
    fn cursor_stays_in_bounds(
        input in prop::collection::vec(0i32..50, 0..12),
        ops in prop::collection::vec(playback_op_strategy(), 0..80),
    ) {
        let trace = generate_trace(AlgorithmId::InsertionSort, &input, None).unwrap();
        let total = trace.total_steps();
        let mut playback = PlaybackController::with_trace(trace, Duration::from_millis(10));
        let start = Instant::now();
        let mut clock = 0u64;
        let mut old_tokens: Vec<RunToken> = Vec::new();

        for op in ops {
            let now = start + Duration::from_millis(clock);
            match op {
                PlaybackOp::Play => {
                    if let PlayOutcome::Started(tick) = playback.play(now) {
                        old_tokens.push(tick.token);
                    }
                }
                PlaybackOp::Pause => playback.pause(),
                PlaybackOp::Poll(ms) => {
                    clock += ms;
                    let outcome = playback.poll(start + Duration::from_millis(clock));
                    if let Some(TickOutcome::Finished { position }) = outcome {
                        prop_assert_eq!(position, total);
                        prop_assert_eq!(playback.mode(), Mode::Finished);
                    }
                }
                PlaybackOp::StepForward => {
                    playback.step_forward();
                }
                PlaybackOp::StepBackward => {
                    playback.step_backward();
                }
                PlaybackOp::Seek(index) => {
                    playback.seek(index);
                }
                PlaybackOp::SeekStart => {
                    playback.seek_to_start();
                }
                PlaybackOp::SeekEnd => {
                    playback.seek_to_end();
                }
                PlaybackOp::StaleTick => {
                    // every token but the live one belongs to a dead run
                    let live = playback.pending_tick().map(|t| t.token);
                    let position = playback.position();
                    for token in old_tokens.iter().copied().filter(|t| Some(*t) != live) {
                        prop_assert_eq!(playback.tick(token, now), TickOutcome::Stale);
                    }
                    prop_assert_eq!(playback.position(), position);
                }
            }

            prop_assert!(playback.position() <= total);
            prop_assert!(playback.current_snapshot().is_some());
            if playback.mode() == Mode::Finished {
                prop_assert_eq!(playback.position(), total);
            }
            if playback.mode() != Mode::Running {
                prop_assert!(playback.pending_tick().is_none());
            }
        }
    }
}

// ── History ─────────────────────────────────────────────────────────────

proptest! {
    #[test]
    fn history_matches_vector_model(ops in prop::collection::vec(tape_op_strategy(), 0..100)) {
        let mut history = History::new(0u8, "start");
        let mut model: Vec<u8> = vec![0];
        let mut cursor = 0usize;

        for op in ops {
            match op {
                TapeOp::Commit(v) => {
                    history.commit(format!("set {}", v), v);
                    model.truncate(cursor + 1);
                    model.push(v);
                    cursor += 1;
                }
                TapeOp::Undo => {
                    let moved = history.undo().is_some();
                    prop_assert_eq!(moved, cursor > 0);
                    cursor = cursor.saturating_sub(1);
                }
                TapeOp::Redo => {
                    let moved = history.redo().is_some();
                    prop_assert_eq!(moved, cursor + 1 < model.len());
                    if moved {
                        cursor += 1;
                    }
                }
            }

            prop_assert_eq!(history.cursor(), cursor);
            prop_assert_eq!(history.len(), model.len());
            prop_assert_eq!(history.current().state, model[cursor]);
            prop_assert_eq!(history.can_undo(), cursor > 0);
            prop_assert_eq!(history.can_redo(), cursor + 1 < model.len());
        }
    }

    #[test]
    fn stack_session_matches_vector_model(
        capacity in 1usize..6,
        ops in prop::collection::vec(stack_op_strategy(), 0..60),
    ) {
        let mut session = MutationController::new(Stack::new(capacity));
        let mut states: Vec<Vec<i32>> = vec![Vec::new()];
        let mut cursor = 0usize;
        let mut failures = 0usize;

        for op in ops {
            let tape_len = session.history().len();
            match op {
                StackOp::Push(v) => {
                    let mut next = states[cursor].clone();
                    session.apply("push", |s| s.push(v));
                    if next.len() < capacity {
                        next.push(v);
                        states.truncate(cursor + 1);
                        states.push(next);
                        cursor += 1;
                    } else {
                        failures += 1;
                        prop_assert_eq!(session.history().len(), tape_len);
                    }
                }
                StackOp::Pop => {
                    let mut next = states[cursor].clone();
                    session.apply("pop", |s| s.pop());
                    if next.pop().is_some() {
                        states.truncate(cursor + 1);
                        states.push(next);
                        cursor += 1;
                    } else {
                        failures += 1;
                        prop_assert_eq!(session.history().len(), tape_len);
                    }
                }
                StackOp::Undo => {
                    if session.undo() {
                        cursor -= 1;
                    }
                }
                StackOp::Redo => {
                    if session.redo() {
                        cursor += 1;
                    }
                }
            }

            prop_assert_eq!(session.live_state().items(), states[cursor].as_slice());
            prop_assert!(session.live_state().len() <= capacity);
            prop_assert_eq!(session.metrics().failed_ops, failures);
        }
    }
}
