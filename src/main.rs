// algotty: Time-Travel Algorithm and Data Structure Visualizer

use std::io;
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use ratatui::{backend::CrosstermBackend, Terminal};
use tracing::info;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use algotty::config::Config;
use algotty::snapshot::{Flag, Trace, TraceOutcome};
use algotty::structures::StructureKind;
use algotty::trace::{generate_trace, random_input, AlgorithmId};
use algotty::ui::{AlgorithmSession, App};

/// Step through sorting and searching algorithms, or edit data structures
/// with undo/redo, in the terminal.
#[derive(Parser, Debug)]
#[command(name = "algotty", version)]
struct Cli {
    /// TOML config file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Log file used while the TUI is open
    #[arg(long, global = true)]
    log_file: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Play back an algorithm run in the TUI
    Run {
        algorithm: AlgorithmId,
        #[command(flatten)]
        input: InputArgs,
        /// Milliseconds per autoplay step
        #[arg(long)]
        speed: Option<u64>,
    },
    /// Edit a live data structure in the TUI
    Structure { kind: StructureKind },
    /// Print every step of a run to stdout
    Trace {
        algorithm: AlgorithmId,
        #[command(flatten)]
        input: InputArgs,
    },
    /// List the available algorithms
    List,
}

#[derive(clap::Args, Debug)]
struct InputArgs {
    /// Comma separated values, e.g. 42,15,73,28
    #[arg(long, value_delimiter = ',', allow_negative_numbers = true)]
    input: Option<Vec<i32>>,

    /// Length of a random input
    #[arg(long)]
    len: Option<usize>,

    /// Value to look for (searches only)
    #[arg(long, allow_negative_numbers = true)]
    target: Option<i32>,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => match Config::load(path) {
            Ok(config) => config,
            Err(e) => {
                eprintln!("Error: {}", e);
                std::process::exit(1);
            }
        },
        None => Config::default(),
    };

    let mut rng = StdRng::from_entropy();

    match cli.command {
        Command::Run {
            algorithm,
            input,
            speed,
        } => {
            let log_file = cli.log_file.unwrap_or_else(|| config.log.file.clone());
            let _guard = init_file_logging(&log_file);

            let (values, target) = match resolve_input(&config, &input, algorithm, &mut rng) {
                Ok(resolved) => resolved,
                Err(e) => {
                    eprintln!("Error: {}", e);
                    std::process::exit(1);
                }
            };
            let speed = config
                .playback
                .clamp(speed.unwrap_or(config.playback.step_ms));
            info!(%algorithm, len = values.len(), ?target, "starting run");
            let session = match AlgorithmSession::new(algorithm, values, target, speed) {
                Ok(session) => session,
                Err(e) => {
                    eprintln!("Error: {}", e);
                    std::process::exit(1);
                }
            };
            run_tui(App::for_algorithm(config, session))
        }
        Command::Structure { kind } => {
            let log_file = cli.log_file.unwrap_or_else(|| config.log.file.clone());
            let _guard = init_file_logging(&log_file);
            info!(%kind, "starting structure session");
            run_tui(App::for_structure(config, kind))
        }
        Command::Trace { algorithm, input } => {
            init_stderr_logging();
            let (values, target) = match resolve_input(&config, &input, algorithm, &mut rng) {
                Ok(resolved) => resolved,
                Err(e) => {
                    eprintln!("Error: {}", e);
                    std::process::exit(1);
                }
            };
            match generate_trace(algorithm, &values, target) {
                Ok(trace) => {
                    print_trace(&trace);
                    Ok(())
                }
                Err(e) => {
                    eprintln!("Error: {}", e);
                    std::process::exit(1);
                }
            }
        }
        Command::List => {
            print_algorithms();
            Ok(())
        }
    }
}

/// Input values and search target, explicit or random
fn resolve_input(
    config: &Config,
    args: &InputArgs,
    algorithm: AlgorithmId,
    rng: &mut StdRng,
) -> Result<(Vec<i32>, Option<i32>), String> {
    let input_cfg = &config.input;
    let values = match &args.input {
        Some(values) => {
            input_cfg.check_len(values.len())?;
            values.clone()
        }
        None => {
            let len = args.len.unwrap_or(input_cfg.default_len);
            random_input(
                len.min(input_cfg.max_len),
                input_cfg.min_value..=input_cfg.max_value,
                rng,
            )
        }
    };

    // a random search target is picked from the input so the run finds it
    let target = match args.target {
        Some(target) => Some(target),
        None if algorithm.is_search() => values.choose(rng).copied(),
        None => None,
    };
    Ok((values, target))
}

fn env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("algotty=info"))
}

/// The TUI owns the terminal, so logs go to a file
fn init_file_logging(path: &Path) -> WorkerGuard {
    let dir = path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));
    let file_name = path
        .file_name()
        .map_or_else(|| "algotty.log".into(), |name| name.to_owned());
    let file_appender = tracing_appender::rolling::never(dir, file_name);
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    tracing_subscriber::registry()
        .with(env_filter())
        .with(fmt::layer().with_writer(non_blocking).with_ansi(false))
        .init();
    guard
}

fn init_stderr_logging() {
    tracing_subscriber::registry()
        .with(env_filter())
        .with(fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn run_tui(mut app: App) -> Result<(), Box<dyn std::error::Error>> {
    // Set up terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = app.run(&mut terminal);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        eprintln!("Error: {:?}", err);
    }

    Ok(())
}

fn print_trace(trace: &Trace) {
    println!(
        "{} on {:?}{}",
        trace.algorithm.title(),
        trace.input,
        trace
            .target
            .map(|t| format!(", target {}", t))
            .unwrap_or_default()
    );
    for (position, snapshot) in trace.snapshots().iter().enumerate() {
        let metrics = trace.metrics_at(position);
        let cells: Vec<String> = snapshot
            .elements
            .iter()
            .map(|e| {
                if e.has(Flag::Comparing) || e.has(Flag::Swapping) || e.has(Flag::Searching) {
                    format!("[{}]", e.value)
                } else if e.has(Flag::Found) {
                    format!("*{}*", e.value)
                } else {
                    e.value.to_string()
                }
            })
            .collect();
        println!(
            "{:>4}  c={:<4} s={:<4} {:<40} {}",
            position,
            metrics.comparisons,
            metrics.swaps,
            cells.join(" "),
            snapshot.label
        );
    }
    let totals = trace.totals();
    let outcome = match trace.outcome {
        TraceOutcome::Sorted => "sorted".to_string(),
        TraceOutcome::Found { index } => format!("found at index {}", index),
        TraceOutcome::NotFound => "not found".to_string(),
    };
    println!();
    println!(
        "{} steps, {} comparisons, {} swaps, {}",
        trace.total_steps(),
        totals.comparisons,
        totals.swaps,
        outcome
    );
}

fn print_algorithms() {
    for algorithm in AlgorithmId::all() {
        let c = algorithm.complexity();
        println!("{:<16} {}", algorithm.to_string(), algorithm.title());
        println!("{:<16} {}", "", algorithm.description());
        println!(
            "{:<16} best {}, average {}, worst {}, space {}",
            "", c.best, c.average, c.worst, c.space
        );
        println!();
    }
}
