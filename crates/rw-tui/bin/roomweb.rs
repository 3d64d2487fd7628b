//! roomweb: scatter rooms, connect them, and show the result
//!
//! Main entry point. Runs several generation passes, one seed apart, and
//! shows each in the terminal (or prints it as JSON with --dump).

use std::io;
use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::event;
use ratatui::Terminal;
use ratatui::backend::{Backend, CrosstermBackend};
use tracing_subscriber::EnvFilter;

use rw_core::{Anchor, GenOptions, Generator, MapRng, SizePolicy};
use rw_tui::{MapView, MarkerMode, RunInfo, TerminalSession, Theme, ViewOutcome};

/// Procedural room layouts with greedy nearest-first connections
#[derive(Parser, Debug)]
#[command(name = "roomweb")]
#[command(author, version, about = "Scatter rooms and connect them", long_about = None)]
struct Args {
    /// Canvas width
    #[arg(long)]
    width: Option<i32>,

    /// Canvas height
    #[arg(long)]
    height: Option<i32>,

    /// Number of anchor points per run
    #[arg(short = 'n', long)]
    rooms: Option<usize>,

    /// Number of generation runs
    #[arg(short = 'r', long, default_value_t = 5)]
    runs: u64,

    /// Seed for the first run; run N uses seed + N
    #[arg(short = 's', long)]
    seed: Option<u64>,

    /// Options file (rc-style OPTIONS= lines, or .json)
    #[arg(short = 'c', long)]
    config: Option<PathBuf>,

    /// Room placement around its anchor (center, topleft)
    #[arg(long)]
    anchor: Option<Anchor>,

    /// Room size policy (scaled, third)
    #[arg(long)]
    size_policy: Option<SizePolicy>,

    /// Canvas marker (braille, dot, block, halfblock)
    #[arg(long, default_value_t = MarkerMode::Braille)]
    marker: MarkerMode,

    /// Print each run as JSON instead of opening the viewer
    #[arg(long)]
    dump: bool,

    /// Log more (repeat for more detail); logs go to stderr
    #[arg(short = 'v', long = "verbose", action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(args.verbose, !args.dump);

    let options = build_options(&args)?;
    let mut generator = Generator::new(options).context("invalid generation options")?;
    let base_seed = args.seed.unwrap_or_else(|| MapRng::from_entropy().seed());
    tracing::info!(base_seed, runs = args.runs, "starting");

    if args.dump {
        return dump_runs(&mut generator, base_seed, args.runs);
    }

    let session = TerminalSession::enter()?;
    let backend = CrosstermBackend::new(io::stdout());
    let mut terminal = Terminal::new(backend)?;

    let result = view_runs(&mut terminal, &mut generator, base_seed, &args);

    drop(terminal);
    session.leave()?;
    result
}

fn init_logging(verbose: u8, interactive: bool) {
    let default_level = match (verbose, interactive) {
        (0, true) => "off",
        (0, false) => "warn",
        (1, _) => "info",
        (2, _) => "debug",
        _ => "trace",
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

/// Defaults, then the config file, then command-line flags
fn build_options(args: &Args) -> Result<GenOptions> {
    let mut options = match &args.config {
        Some(path) => GenOptions::load_from_file(path)
            .with_context(|| format!("loading options from {}", path.display()))?,
        None => GenOptions::default(),
    };

    if let Some(width) = args.width {
        options.width = width;
    }
    if let Some(height) = args.height {
        options.height = height;
    }
    if let Some(rooms) = args.rooms {
        options.rooms = rooms;
    }
    if let Some(anchor) = args.anchor {
        options.anchor = anchor;
    }
    if let Some(size_policy) = args.size_policy {
        options.size_policy = size_policy;
    }
    Ok(options)
}

fn dump_runs(generator: &mut Generator, base_seed: u64, runs: u64) -> Result<()> {
    for run in 0..runs {
        let seed = base_seed.wrapping_add(run);
        let map = generator.generate(&mut MapRng::new(seed))?;
        let record = serde_json::json!({
            "run": run,
            "seed": seed,
            "connected": map.is_connected(),
            "map": map,
        });
        println!("{}", serde_json::to_string(&record)?);
    }
    Ok(())
}

fn view_runs<B: Backend>(
    terminal: &mut Terminal<B>,
    generator: &mut Generator,
    base_seed: u64,
    args: &Args,
) -> Result<()> {
    let theme = Theme::detect();
    let canvas = (generator.options().width, generator.options().height);
    let mut marker = args.marker;

    for run in 0..args.runs {
        let seed = base_seed.wrapping_add(run);
        let map = generator.generate(&mut MapRng::new(seed))?;
        if !map.is_connected() {
            tracing::warn!(seed, "layout is not fully connected");
        }

        let info = RunInfo {
            index: run as usize,
            total: args.runs as usize,
            seed,
        };
        let mut view = MapView::new(map, canvas, info, theme).with_marker(marker);

        // Main loop
        let outcome = loop {
            terminal.draw(|frame| view.render(frame))?;

            if event::poll(Duration::from_millis(100))? {
                view.handle_event(event::read()?);
                if let Some(outcome) = view.outcome() {
                    break outcome;
                }
            }
        };

        marker = view.marker();
        if outcome == ViewOutcome::Quit {
            break;
        }
    }
    Ok(())
}
