//! Main TUI application state and logic

use crate::config::Config;
use crate::mutation::Severity;
use crate::playback::{Mode, PlayOutcome, PlaybackController, StepOutcome, TickOutcome};
use crate::structures::StructureKind;
use crate::trace::errors::TraceError;
use crate::trace::{generate_trace, random_input, AlgorithmId};
use crate::ui::live::{key_hints, KeyResult, LiveStructure};
use crate::ui::panes::{self, Badge, InfoRenderData, StatusRenderData};
use crate::ui::theme::DEFAULT_THEME;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use ratatui::{
    backend::Backend,
    layout::{Constraint, Direction, Layout},
    Frame, Terminal,
};
use std::io;
use std::time::{Duration, Instant};
use tracing::{debug, info};

const RUN_HINTS: &[(&str, &str)] = &[
    ("←/→", "step"),
    ("⎵", "play"),
    ("↵ / ⌫", "end/start"),
    ("+/-", "speed"),
    ("r", "reset"),
    ("n", "new input"),
    ("q", "quit"),
];

const STRUCTURE_HINTS: &[(&str, &str)] = &[
    ("0-9", "value"),
    ("u/U", "undo/redo"),
    ("x", "random"),
    ("c", "clear"),
    ("q", "quit"),
];

/// Which pane is currently focused in structure mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FocusedPane {
    Structure,
    History,
}

impl FocusedPane {
    pub fn next(self) -> Self {
        match self {
            FocusedPane::Structure => FocusedPane::History,
            FocusedPane::History => FocusedPane::Structure,
        }
    }
}

/// A traced algorithm run under playback
pub struct AlgorithmSession {
    pub algorithm: AlgorithmId,
    pub input: Vec<i32>,
    pub target: Option<i32>,
    pub playback: PlaybackController,
}

impl AlgorithmSession {
    pub fn new(
        algorithm: AlgorithmId,
        input: Vec<i32>,
        target: Option<i32>,
        speed: Duration,
    ) -> Result<Self, TraceError> {
        let trace = generate_trace(algorithm, &input, target)?;
        Ok(AlgorithmSession {
            algorithm,
            input,
            target,
            playback: PlaybackController::with_trace(trace, speed),
        })
    }

    /// Regenerate the trace from the current input and target
    fn reload(&mut self) -> Result<(), TraceError> {
        let trace = generate_trace(self.algorithm, &self.input, self.target)?;
        self.playback.load(trace);
        Ok(())
    }
}

/// What the app is showing
pub enum Screen {
    Algorithm(AlgorithmSession),
    Structure {
        live: LiveStructure,
        /// Digits typed so far, space or comma separated
        input: String,
    },
}

/// The main application state
pub struct App {
    pub config: Config,
    pub screen: Screen,

    /// Currently focused pane
    pub focused_pane: FocusedPane,

    /// Scroll offset of the history pane
    pub history_scroll: usize,

    /// Whether the app should quit
    pub should_quit: bool,

    /// Status message to display
    pub status_message: String,
    pub status_severity: Severity,

    /// Last time space was pressed (for debouncing)
    pub last_space_press: Instant,

    rng: StdRng,
}

impl App {
    pub fn new(config: Config, screen: Screen) -> Self {
        App {
            config,
            screen,
            focused_pane: FocusedPane::Structure,
            history_scroll: 0,
            should_quit: false,
            status_message: String::from("Ready!"),
            status_severity: Severity::Info,
            last_space_press: Instant::now()
                .checked_sub(Duration::from_secs(1))
                .unwrap_or(Instant::now()),
            rng: StdRng::from_entropy(),
        }
    }

    pub fn for_algorithm(config: Config, session: AlgorithmSession) -> Self {
        Self::new(config, Screen::Algorithm(session))
    }

    pub fn for_structure(config: Config, kind: StructureKind) -> Self {
        let live = LiveStructure::new(kind, &config.limits);
        Self::new(
            config,
            Screen::Structure {
                live,
                input: String::new(),
            },
        )
    }

    /// Run the TUI application
    pub fn run<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> io::Result<()> {
        loop {
            terminal.draw(|f| self.render(f))?;

            if self.should_quit {
                break;
            }

            self.poll_playback(Instant::now());

            // Use poll with timeout to allow auto-play to work
            if event::poll(Duration::from_millis(50))? {
                if let Event::Key(key) = event::read()? {
                    if key.kind == KeyEventKind::Press {
                        self.handle_key_event(key);
                    }
                }
            }
        }

        Ok(())
    }

    /// Fire the pending autoplay tick once it is due
    pub fn poll_playback(&mut self, now: Instant) {
        let Screen::Algorithm(session) = &mut self.screen else {
            return;
        };
        match session.playback.poll(now) {
            Some(TickOutcome::Advanced { .. }) => self.set_status("Playing...", Severity::Info),
            Some(TickOutcome::Finished { .. }) => {
                self.set_status("Playback complete", Severity::Success)
            }
            Some(TickOutcome::Stale) | None => {}
        }
    }

    fn set_status(&mut self, message: impl Into<String>, severity: Severity) {
        self.status_message = message.into();
        self.status_severity = severity;
    }

    /// Render the UI
    fn render(&mut self, frame: &mut Frame) {
        let main_chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(0), Constraint::Length(1)])
            .split(frame.area());

        let pane_area = main_chunks[0];
        let status_area = main_chunks[1];

        match &self.screen {
            Screen::Algorithm(session) => {
                let rows = Layout::default()
                    .direction(Direction::Vertical)
                    .constraints([Constraint::Percentage(65), Constraint::Percentage(35)])
                    .split(pane_area);

                let playback = &session.playback;
                let snapshot = playback.current_snapshot();
                let title = format!(" {} ", session.algorithm.title());
                panes::render_array_pane(frame, rows[0], snapshot, &title);

                panes::render_info_pane(
                    frame,
                    rows[1],
                    InfoRenderData {
                        algorithm: session.algorithm,
                        step_label: snapshot.map_or("", |s| s.label.as_str()),
                        position: playback.position(),
                        total_steps: playback.total_steps(),
                        metrics: playback.metrics(),
                        mode: playback.mode(),
                        speed: playback.speed(),
                        target: session.target,
                        outcome: playback.trace().map(|t| t.outcome),
                    },
                );

                let badge = match playback.mode() {
                    Mode::Running => Some(Badge::Playing),
                    Mode::Finished => Some(Badge::End),
                    _ if playback.position() == 0 => Some(Badge::Start),
                    _ => None,
                };
                panes::render_status_bar(
                    frame,
                    status_area,
                    StatusRenderData {
                        message: &self.status_message,
                        message_color: DEFAULT_THEME.severity_color(self.status_severity),
                        tag: format!("Step {}/{}", playback.position(), playback.total_steps()),
                        badge,
                        hints: RUN_HINTS,
                    },
                );
            }
            Screen::Structure { live, input } => {
                let columns = Layout::default()
                    .direction(Direction::Horizontal)
                    .constraints([Constraint::Percentage(65), Constraint::Percentage(35)])
                    .split(pane_area);

                panes::render_structure_pane(
                    frame,
                    columns[0],
                    live,
                    self.focused_pane == FocusedPane::Structure,
                );

                let (rows, cursor) = live.history_rows();
                panes::render_history_pane(
                    frame,
                    columns[1],
                    &rows,
                    cursor,
                    self.focused_pane == FocusedPane::History,
                    &mut self.history_scroll,
                );

                let metrics = live.metrics();
                let mut hints: Vec<(&str, &str)> = key_hints(live.kind()).to_vec();
                hints.extend_from_slice(STRUCTURE_HINTS);
                let tag = if input.is_empty() {
                    format!(
                        "Ops {} ✓{} ✗{}",
                        metrics.total_ops, metrics.successful_ops, metrics.failed_ops
                    )
                } else {
                    format!("> {}", input)
                };
                panes::render_status_bar(
                    frame,
                    status_area,
                    StatusRenderData {
                        message: &self.status_message,
                        message_color: DEFAULT_THEME.severity_color(self.status_severity),
                        tag,
                        badge: (!input.is_empty()).then_some(Badge::Input),
                        hints: &hints,
                    },
                );
            }
        }
    }

    /// Handle keyboard events
    pub fn handle_key_event(&mut self, key: KeyEvent) {
        if matches!(self.screen, Screen::Algorithm(_)) {
            self.handle_run_key(key);
        } else {
            self.handle_structure_key(key);
        }
    }

    fn handle_run_key(&mut self, key: KeyEvent) {
        let bounds = self.config.playback.clone();
        let Screen::Algorithm(session) = &mut self.screen else {
            return;
        };
        let playback = &mut session.playback;
        let (message, severity) = match key.code {
            KeyCode::Char('q') | KeyCode::Char('Q') => {
                self.should_quit = true;
                return;
            }
            // Number keys step forward N times directly
            KeyCode::Char(c @ '1'..='9') => {
                playback.pause();
                let mut stepped = 0;
                for _ in 0..c.to_digit(10).unwrap_or(1) {
                    if !matches!(playback.step_forward(), StepOutcome::Moved { .. }) {
                        break;
                    }
                    stepped += 1;
                }
                info_status(format!("Stepped forward {} step(s)", stepped))
            }
            KeyCode::Left => {
                playback.pause();
                let outcome = playback.step_backward();
                step_message(outcome, "Stepped backward", "Already at the start")
            }
            KeyCode::Right => {
                playback.pause();
                let outcome = playback.step_forward();
                step_message(outcome, "Stepped forward", "Already at the end")
            }
            KeyCode::Char(' ') => {
                // 200ms debounce to prevent key repeat spam
                if self.last_space_press.elapsed() < Duration::from_millis(200) {
                    return;
                }
                self.last_space_press = Instant::now();
                if playback.mode() == Mode::Running {
                    playback.pause();
                    info_status("Paused")
                } else {
                    match playback.play(Instant::now()) {
                        PlayOutcome::Started(_) | PlayOutcome::AlreadyRunning => {
                            info_status("Playing...")
                        }
                        PlayOutcome::Finished => {
                            info_status("Already at the end, press ⌫ to rewind")
                        }
                        PlayOutcome::NothingToPlay => error_status("Nothing to play"),
                    }
                }
            }
            KeyCode::Enter => {
                playback.pause();
                playback.seek_to_end();
                info_status("Jumped to end")
            }
            KeyCode::Backspace => {
                playback.pause();
                playback.seek_to_start();
                info_status("Jumped to start")
            }
            KeyCode::Char('+') | KeyCode::Char('=') => {
                let ms = playback.speed().as_millis() as u64;
                let speed = bounds.clamp(ms.saturating_sub(bounds.speed_step_ms));
                playback.set_speed(speed);
                info_status(format!("Speed {} ms/step", speed.as_millis()))
            }
            KeyCode::Char('-') => {
                let ms = playback.speed().as_millis() as u64;
                let speed = bounds.clamp(ms.saturating_add(bounds.speed_step_ms));
                playback.set_speed(speed);
                info_status(format!("Speed {} ms/step", speed.as_millis()))
            }
            KeyCode::Char('r') => match session.reload() {
                Ok(()) => info_status("Reset"),
                Err(e) => error_status(e.to_string()),
            },
            KeyCode::Char('n') => {
                let input_cfg = &self.config.input;
                let len = session.input.len().clamp(1, input_cfg.max_len);
                session.input = random_input(
                    len,
                    input_cfg.min_value..=input_cfg.max_value,
                    &mut self.rng,
                );
                if session.algorithm.is_search() {
                    session.target = session.input.choose(&mut self.rng).copied();
                }
                info!(algorithm = %session.algorithm, len, "new random input");
                match session.reload() {
                    Ok(()) => info_status("New random input"),
                    Err(e) => error_status(e.to_string()),
                }
            }
            _ => return,
        };
        self.set_status(message, severity);
    }

    fn handle_structure_key(&mut self, key: KeyEvent) {
        let Screen::Structure { live, input } = &mut self.screen else {
            return;
        };
        let (message, severity) = match key.code {
            KeyCode::Char('q') | KeyCode::Char('Q') => {
                self.should_quit = true;
                return;
            }
            KeyCode::Char(c) if c.is_ascii_digit() => {
                input.push(c);
                return;
            }
            KeyCode::Char(' ') | KeyCode::Char(',') => {
                if !input.is_empty() && !input.ends_with(' ') {
                    input.push(' ');
                }
                return;
            }
            KeyCode::Backspace => {
                input.pop();
                return;
            }
            KeyCode::Esc => {
                input.clear();
                return;
            }
            KeyCode::Tab => {
                self.focused_pane = self.focused_pane.next();
                return;
            }
            KeyCode::Up if self.focused_pane == FocusedPane::History => {
                self.history_scroll = self.history_scroll.saturating_sub(1);
                return;
            }
            KeyCode::Down if self.focused_pane == FocusedPane::History => {
                self.history_scroll = self.history_scroll.saturating_add(1);
                return;
            }
            KeyCode::Char('u') => {
                if live.undo() {
                    feedback_status(live)
                } else {
                    info_status("Nothing to undo")
                }
            }
            KeyCode::Char('U') => {
                if live.redo() {
                    feedback_status(live)
                } else {
                    info_status("Nothing to redo")
                }
            }
            KeyCode::Char('x') => {
                live.randomize(&mut self.rng);
                feedback_status(live)
            }
            KeyCode::Char('c') => {
                live.clear();
                feedback_status(live)
            }
            KeyCode::Char('R') => {
                live.reset();
                self.history_scroll = 0;
                info_status("New session")
            }
            KeyCode::Char(c) => {
                let args = parse_args(input);
                match live.perform(c, &args) {
                    KeyResult::Applied => {
                        input.clear();
                        debug!(key = %c, ?args, "structure operation");
                        feedback_status(live)
                    }
                    KeyResult::MissingArgs(usage) => info_status(usage),
                    KeyResult::Unbound => return,
                }
            }
            _ => return,
        };
        // keep the newest history entry in view
        self.history_scroll = usize::MAX;
        self.set_status(message, severity);
    }
}

fn info_status(message: impl Into<String>) -> (String, Severity) {
    (message.into(), Severity::Info)
}

fn error_status(message: impl Into<String>) -> (String, Severity) {
    (message.into(), Severity::Error)
}

fn step_message(outcome: StepOutcome, moved: &str, boundary: &str) -> (String, Severity) {
    match outcome {
        StepOutcome::Moved { .. } => info_status(moved),
        StepOutcome::AtBoundary => info_status(boundary),
        StepOutcome::Running => info_status("Pause playback first"),
        StepOutcome::NothingToPlay => error_status("Nothing to play"),
    }
}

fn feedback_status(live: &LiveStructure) -> (String, Severity) {
    match live.feedback() {
        Some(feedback) => (feedback.message.clone(), feedback.severity),
        None => info_status(""),
    }
}

/// Numbers typed into the input buffer
fn parse_args(input: &str) -> Vec<i32> {
    input
        .split(|c: char| c == ' ' || c == ',')
        .filter_map(|part| part.parse().ok())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyModifiers;

    fn press(app: &mut App, code: KeyCode) {
        app.handle_key_event(KeyEvent::new(code, KeyModifiers::NONE));
    }

    fn type_str(app: &mut App, text: &str) {
        for c in text.chars() {
            press(app, KeyCode::Char(c));
        }
    }

    fn run_app(algorithm: AlgorithmId, input: Vec<i32>) -> App {
        let speed = Duration::from_millis(100);
        let session = AlgorithmSession::new(algorithm, input, None, speed).unwrap();
        App::for_algorithm(Config::default(), session)
    }

    fn playback(app: &App) -> &PlaybackController {
        match &app.screen {
            Screen::Algorithm(session) => &session.playback,
            Screen::Structure { .. } => panic!("not a run screen"),
        }
    }

    #[test]
    fn parse_args_accepts_spaces_and_commas() {
        assert_eq!(parse_args("1 22,3"), vec![1, 22, 3]);
        assert!(parse_args("").is_empty());
    }

    #[test]
    fn arrow_keys_step_and_clamp() {
        let mut app = run_app(AlgorithmId::BubbleSort, vec![3, 1, 2]);
        press(&mut app, KeyCode::Left);
        assert_eq!(app.status_message, "Already at the start");
        press(&mut app, KeyCode::Right);
        assert_eq!(playback(&app).position(), 1);
        press(&mut app, KeyCode::Enter);
        assert_eq!(playback(&app).mode(), Mode::Finished);
        press(&mut app, KeyCode::Backspace);
        assert_eq!(playback(&app).position(), 0);
    }

    #[test]
    fn speed_keys_stay_within_bounds() {
        let mut app = run_app(AlgorithmId::QuickSort, vec![2, 1]);
        for _ in 0..10 {
            press(&mut app, KeyCode::Char('+'));
        }
        assert_eq!(playback(&app).speed(), Duration::from_millis(50));
        for _ in 0..100 {
            press(&mut app, KeyCode::Char('-'));
        }
        assert_eq!(playback(&app).speed(), Duration::from_millis(2000));
    }

    #[test]
    fn autoplay_advances_on_poll() {
        let mut app = run_app(AlgorithmId::InsertionSort, vec![2, 1]);
        press(&mut app, KeyCode::Char(' '));
        assert_eq!(playback(&app).mode(), Mode::Running);
        let due = playback(&app).pending_tick().map(|t| t.due).unwrap();
        app.poll_playback(due);
        assert_eq!(playback(&app).position(), 1);
    }

    #[test]
    fn structure_keys_type_and_apply() {
        let mut app = App::for_structure(Config::default(), StructureKind::Stack);
        type_str(&mut app, "42");
        press(&mut app, KeyCode::Char('p'));
        assert_eq!(app.status_message, "Pushed 42");
        press(&mut app, KeyCode::Char('o'));
        press(&mut app, KeyCode::Char('o'));
        assert_eq!(app.status_message, "Stack Underflow");
        assert_eq!(app.status_severity, Severity::Error);
        press(&mut app, KeyCode::Char('u'));
        assert_eq!(app.status_message, "Undo, back to: Pushed 42");
    }

    #[test]
    fn missing_value_shows_usage() {
        let mut app = App::for_structure(Config::default(), StructureKind::Queue);
        press(&mut app, KeyCode::Char('e'));
        assert_eq!(app.status_message, "Type a value, then e to enqueue");
    }
}
