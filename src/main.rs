use std::fs::File;
use std::io::{stdout, BufWriter, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::event::KeyCode;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super_trooper::display::{self, TerminalDisplay};
use super_trooper::game_loop::{GameLoop, SystemClock};
use super_trooper::highscores::{JsonScoreStore, MemoryScoreStore};
use super_trooper::input::TerminalInput;
use super_trooper::ports::ScoreStore;
use super_trooper::Settings;

#[derive(Parser)]
#[command(name = "super_trooper")]
#[command(about = "Terminal arcade shooter: dodge, catch power-ups, shoot what falls")]
struct Args {
    /// JSON settings file; flags below override its values
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Simulation updates per second
    #[arg(long)]
    ups: Option<u32>,

    /// Rendered frames per second
    #[arg(long)]
    fps: Option<u32>,

    /// RNG seed for a reproducible run
    #[arg(short, long)]
    seed: Option<u64>,

    /// Name recorded in the high-score table
    #[arg(short, long)]
    name: Option<String>,

    /// High-score file (in-memory table when omitted)
    #[arg(long)]
    scores: Option<PathBuf>,

    /// Write logs to this file instead of stderr
    #[arg(long)]
    log_file: Option<PathBuf>,
}

impl Args {
    fn into_settings(self) -> Result<Settings> {
        let mut settings = match &self.config {
            Some(path) => Settings::load(path)
                .with_context(|| format!("loading settings from {}", path.display()))?,
            None => Settings::default(),
        };
        if let Some(ups) = self.ups {
            settings.ups = ups;
        }
        if let Some(fps) = self.fps {
            settings.fps = fps;
        }
        if self.seed.is_some() {
            settings.seed = self.seed;
        }
        if let Some(name) = self.name {
            settings.player_name = name;
        }
        if self.scores.is_some() {
            settings.scores_path = self.scores;
        }
        if self.log_file.is_some() {
            settings.log_file = self.log_file;
        }
        settings.validate()?;
        Ok(settings)
    }
}

/// The alternate screen owns the terminal, so logs go to a file when one is
/// given and stderr (warnings only by default) otherwise.
fn init_logging(settings: &Settings) -> Result<()> {
    match &settings.log_file {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("creating log file {}", path.display()))?;
            env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
                .target(env_logger::Target::Pipe(Box::new(file)))
                .init();
        }
        None => {
            env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"))
                .init();
        }
    }
    Ok(())
}

fn score_store(settings: &Settings) -> Box<dyn ScoreStore> {
    match &settings.scores_path {
        Some(path) => {
            let store = JsonScoreStore::new(path);
            log::info!("high scores kept in {}", store.path().display());
            Box::new(store)
        }
        None => Box::new(MemoryScoreStore::new()),
    }
}

fn main() -> Result<()> {
    let settings = Args::parse().into_settings()?;
    init_logging(&settings)?;
    log::info!("Super Trooper starting with {:?}", settings);

    display::check_terminal_size().context("terminal unavailable")?;

    let mut out = BufWriter::new(stdout());
    display::enter(&mut out).context("entering raw mode")?;

    let result = run(&mut out, &settings);

    // Always restore the terminal
    display::leave(&mut out);
    let _ = out.flush();

    result
}

fn run<W: Write>(out: &mut W, settings: &Settings) -> Result<()> {
    let mut store = score_store(settings);
    let mut input = TerminalInput::new();
    let mut sink = TerminalDisplay::new(out);
    let mut clock = SystemClock::new();

    loop {
        let seed = settings.seed.unwrap_or_else(|| rand::thread_rng().gen());
        log::info!("new run with seed {}", seed);

        let mut game = GameLoop::new(settings, StdRng::seed_from_u64(seed));
        let summary = game.run(&mut input, &mut sink, &mut store, &mut clock);
        log::info!(
            "run finished: score {} level {} ({} ticks, {} frames, rank {:?})",
            summary.score,
            summary.level,
            summary.ticks,
            summary.frames,
            summary.rank
        );

        let key = input.wait_for_key()?;
        if !matches!(key.code, KeyCode::Char('r') | KeyCode::Char('R')) {
            break;
        }
    }
    Ok(())
}
