// Integration tests for trace generation, playback and structure editing

use std::time::{Duration, Instant};

use algotty::config::{Config, ConfigError};
use algotty::mutation::{MutationController, Severity};
use algotty::playback::{Mode, PlayOutcome, PlaybackController, StepOutcome, TickOutcome};
use algotty::snapshot::{Flag, TraceOutcome};
use algotty::structures::bst::Bst;
use algotty::structures::linked_list::LinkedList;
use algotty::structures::Structure;
use algotty::trace::errors::TraceError;
use algotty::trace::{generate_trace, generate_trace_by_name, AlgorithmId};

/// Drive autoplay to the end by firing each scheduled tick on time
fn play_to_end(playback: &mut PlaybackController, start: Instant) -> usize {
    let PlayOutcome::Started(mut tick) = playback.play(start) else {
        panic!("playback did not start");
    };
    let mut ticks = 0;
    loop {
        ticks += 1;
        match playback.tick(tick.token, tick.due) {
            TickOutcome::Advanced { next, .. } => tick = next,
            TickOutcome::Finished { .. } => return ticks,
            TickOutcome::Stale => panic!("tick went stale during an uninterrupted run"),
        }
    }
}

#[test]
fn test_bubble_sort_playback_end_to_end() {
    let trace = generate_trace_by_name("bubble", &[42, 15, 73, 28], None)
        .expect("Trace generation failed");
    let total = trace.total_steps();
    let totals = trace.totals();

    let mut playback = PlaybackController::with_trace(trace, Duration::from_millis(10));
    assert_eq!(playback.mode(), Mode::Idle);

    let ticks = play_to_end(&mut playback, Instant::now());
    assert_eq!(ticks, total);
    assert_eq!(playback.mode(), Mode::Finished);
    assert_eq!(playback.metrics(), totals);
    assert_eq!(totals.comparisons, 6);

    let last = playback.current_snapshot().expect("No snapshot at the end");
    assert_eq!(last.values(), vec![15, 28, 42, 73]);
    assert!(last.elements.iter().all(|e| e.has(Flag::Sorted)));

    // Finished only leaves through a manual move or reset
    assert_eq!(playback.play(Instant::now()), PlayOutcome::Finished);
    let back = playback.step_backward();
    assert!(matches!(back, StepOutcome::Moved { .. }));
    assert_eq!(playback.mode(), Mode::Paused);
}

#[test]
fn test_every_sort_ends_sorted_with_unique_ids() {
    let input = [5, 3, 8, 3, 1, 9, 2, 7];
    let mut expected = input.to_vec();
    expected.sort();

    for algorithm in AlgorithmId::all().filter(|a| !a.is_search()) {
        let trace = generate_trace(algorithm, &input, None).expect("Trace generation failed");
        assert_eq!(trace.outcome, TraceOutcome::Sorted);

        for snapshot in trace.snapshots() {
            let mut ids: Vec<usize> = snapshot.elements.iter().map(|e| e.id).collect();
            ids.sort();
            let expected_ids: Vec<usize> = (0..input.len()).collect();
            let step = snapshot.sequence_index;
            assert_eq!(ids, expected_ids, "{algorithm} step {step}");
        }

        let last = trace.last().expect("Empty trace");
        assert_eq!(last.values(), expected, "{} did not sort", algorithm);
        assert!(last.elements.iter().all(|e| e.has(Flag::Sorted)));
    }
}

#[test]
fn test_binary_search_found_and_not_found() {
    let found = generate_trace(AlgorithmId::BinarySearch, &[9, 1, 5, 3, 7], Some(7))
        .expect("Trace generation failed");
    assert_eq!(found.outcome, TraceOutcome::Found { index: 3 });
    let last = found.last().expect("Empty trace");
    assert_eq!(last.indices_with(Flag::Found), vec![3]);
    assert_eq!(last.values(), vec![1, 3, 5, 7, 9]);

    let missing = generate_trace(AlgorithmId::BinarySearch, &[9, 1, 5, 3, 7], Some(4))
        .expect("Trace generation failed");
    assert_eq!(missing.outcome, TraceOutcome::NotFound);
    assert!(missing
        .snapshots()
        .iter()
        .all(|s| s.indices_with(Flag::Found).is_empty()));
    // a window of 5 halves at most three times
    assert!(missing.totals().comparisons <= 3);
}

#[test]
fn test_linear_search_stops_at_first_match() {
    let trace = generate_trace(AlgorithmId::LinearSearch, &[4, 8, 8, 1], Some(8))
        .expect("Trace generation failed");
    assert_eq!(trace.outcome, TraceOutcome::Found { index: 1 });
    assert_eq!(trace.totals().comparisons, 2);
}

#[test]
fn test_invalid_requests_are_rejected() {
    let result = generate_trace_by_name("bogo-sort", &[1, 2], None);
    assert!(matches!(result, Err(TraceError::UnknownAlgorithm { .. })));

    let result = generate_trace(AlgorithmId::BinarySearch, &[1, 2], None);
    assert!(matches!(result, Err(TraceError::MissingTarget { .. })));
}

#[test]
fn test_pause_cancels_scheduled_tick() {
    let trace = generate_trace(AlgorithmId::SelectionSort, &[3, 2, 1], None)
        .expect("Trace generation failed");
    let mut playback = PlaybackController::with_trace(trace, Duration::from_millis(100));
    let now = Instant::now();

    let PlayOutcome::Started(tick) = playback.play(now) else {
        panic!("playback did not start");
    };
    playback.pause();
    assert_eq!(playback.tick(tick.token, tick.due), TickOutcome::Stale);
    assert_eq!(playback.position(), 0);

    // resuming hands out a new token, the old one stays dead
    let PlayOutcome::Started(resumed) = playback.play(now) else {
        panic!("playback did not resume");
    };
    assert_ne!(resumed.token, tick.token);
    assert_eq!(playback.tick(tick.token, tick.due), TickOutcome::Stale);
    assert!(matches!(
        playback.tick(resumed.token, resumed.due),
        TickOutcome::Advanced { position: 1, .. }
    ));
}

#[test]
fn test_reset_discards_trace() {
    let algorithm = AlgorithmId::HeapSort;
    let trace = generate_trace(algorithm, &[2, 1], None).expect("Trace generation failed");
    let mut playback = PlaybackController::with_trace(trace, Duration::from_millis(5));
    playback.seek_to_end();
    playback.reset();

    assert_eq!(playback.mode(), Mode::Idle);
    assert_eq!(playback.position(), 0);
    assert!(playback.current_snapshot().is_none());
    assert_eq!(playback.play(Instant::now()), PlayOutcome::NothingToPlay);
    assert_eq!(playback.step_forward(), StepOutcome::NothingToPlay);
}

#[test]
fn test_linked_list_session_with_undo_redo() {
    let mut session = MutationController::new(LinkedList::doubly(3));
    session.apply("insert tail", |l| l.insert_tail(1));
    session.apply("insert tail", |l| l.insert_tail(2));
    session.apply("insert head", |l| l.insert_head(0));

    let feedback = session.apply("insert tail", |l| l.insert_tail(3)).clone();
    assert_eq!(feedback.severity, Severity::Error);
    assert_eq!(feedback.message, "List is full");
    assert_eq!(session.live_state().values(), vec![0, 1, 2]);

    assert!(session.undo());
    assert!(session.undo());
    assert_eq!(session.live_state().values(), vec![1]);
    assert!(session.redo());
    assert_eq!(session.live_state().values(), vec![1, 2]);

    // committing after an undo drops the redo future
    session.apply("delete value", |l| l.delete_value(1));
    assert!(!session.can_redo());
    assert_eq!(session.live_state().values(), vec![2]);
    assert_eq!(session.history().len(), 4);

    let metrics = session.metrics();
    assert_eq!(metrics.total_ops, 5);
    assert_eq!(metrics.failed_ops, 1);
}

#[test]
fn test_clear_is_undoable_and_reset_is_not() {
    let mut session = MutationController::new(Bst::new(15));
    for v in [50, 30, 70] {
        session.apply("insert", |t| t.insert(v));
    }
    session.clear();
    assert!(session.live_state().is_empty());
    assert!(session.undo());
    assert_eq!(session.live_state().values(), vec![30, 50, 70]);

    session.reset();
    assert!(session.live_state().is_empty());
    assert!(!session.can_undo());
    assert_eq!(session.history().len(), 1);
}

#[test]
fn test_config_file_round_trip() {
    let dir = std::env::temp_dir().join(format!("algotty-test-{}", std::process::id()));
    std::fs::create_dir_all(&dir).expect("Could not create temp dir");

    let good = dir.join("good.toml");
    std::fs::write(&good, "[playback]\nstep_ms = 250\n").expect("Could not write config");
    let config = Config::load(&good).expect("Config failed to load");
    assert_eq!(config.playback.step_ms, 250);
    assert_eq!(config.limits.bst, 15);

    let bad = dir.join("bad.toml");
    std::fs::write(&bad, "[limits]\nstack = 0\n").expect("Could not write config");
    match Config::load(&bad) {
        Err(ConfigError::Invalid(problems)) => {
            assert_eq!(problems, vec!["limits.stack must be > 0".to_string()]);
        }
        other => panic!("expected an invalid config, got {:?}", other),
    }

    assert!(matches!(
        Config::load(dir.join("missing.toml")),
        Err(ConfigError::Io(_))
    ));

    let _ = std::fs::remove_dir_all(&dir);
}
