use anyhow::Context;
use clap::Parser;
use minefield_core::{
    Difficulty, EngineOptions, FlagResult, GameSession, Placement, PresetName, Presets, random_seed,
};
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::time::{Duration, Instant};

mod command;
mod render;

use command::Command;

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// What log level to use
    #[command(flatten)]
    verbose: clap_verbosity_flag::Verbosity,

    /// Difficulty to start with
    #[arg(short, long, default_value_t = PresetName::Easy)]
    preset: PresetName,

    /// Force a seed instead of random
    #[arg(short, long)]
    seed: Option<u64>,

    /// TOML file overriding the built-in presets
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Do not start the clock when flagging before the first reveal
    #[arg(long)]
    no_flag_clock: bool,

    /// Place mines by rejection sampling instead of shuffling
    #[arg(long)]
    rejection: bool,
}

/// Wall-clock source for the once-per-second engine tick.
struct Ticker {
    last: Instant,
}

impl Ticker {
    fn new() -> Self {
        Self {
            last: Instant::now(),
        }
    }

    /// Whole seconds elapsed since the previous call, the remainder is carried over.
    fn pending(&mut self) -> u64 {
        let elapsed = self.last.elapsed().as_secs();
        self.last += Duration::from_secs(elapsed);
        elapsed
    }
}

struct Driver {
    presets: Presets,
    seed: Option<u64>,
    session: GameSession,
}

impl Driver {
    fn new(presets: Presets, options: EngineOptions, seed: Option<u64>, preset: PresetName) -> Self {
        let session = Self::session(presets.get(preset), options, seed);
        Self {
            presets,
            seed,
            session,
        }
    }

    fn session(difficulty: Difficulty, options: EngineOptions, seed: Option<u64>) -> GameSession {
        let seed = seed.unwrap_or_else(random_seed);
        GameSession::with_options(difficulty, seed, options)
    }

    fn run(&mut self, command: Command) -> anyhow::Result<()> {
        match command {
            Command::Reveal(row, col) => {
                let result = self.session.reveal_cell(row, col)?;
                log::info!(
                    "reveal ({}, {}): {} cells changed, {:?}",
                    row,
                    col,
                    result.changed_cells.len(),
                    result.phase
                );
            }
            Command::Flag(row, col) => {
                if let FlagResult::Rejected = self.session.toggle_flag(row, col)? {
                    println!("cannot flag ({row}, {col})");
                }
            }
            Command::Tick => {
                self.session.tick();
            }
            Command::NewGame(name) => {
                let difficulty = name.map_or(self.session.difficulty(), |name| self.presets.get(name));
                self.session = Self::session(difficulty, self.session.options(), self.seed);
            }
            Command::Help => println!("{}", command::HELP),
            Command::Quit => {}
        }
        Ok(())
    }
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    env_logger::Builder::new()
        .filter_level(args.verbose.log_level_filter())
        .init();

    let presets = match &args.config {
        Some(path) => Presets::load(path)
            .with_context(|| format!("could not load presets from {}", path.display()))?,
        None => Presets::default(),
    };
    let options = EngineOptions {
        flag_starts_clock: !args.no_flag_clock,
        placement: if args.rejection {
            Placement::Rejection
        } else {
            Placement::Shuffle
        },
        ..EngineOptions::default()
    };
    log::debug!("seed: {:?}, options: {:?}", args.seed, options);

    let mut driver = Driver::new(presets, options, args.seed, args.preset);

    let mut ticker = Ticker::new();
    println!("{}", command::HELP);
    println!("{}", render::render(&driver.session));

    let stdin = io::stdin();
    for line in stdin.lock().lines() {
        let line = line.context("could not read stdin")?;
        for _ in 0..ticker.pending() {
            driver.session.tick();
        }

        let command = match line.parse::<Command>() {
            Ok(command) => command,
            Err(err) => {
                println!("{err:#}");
                continue;
            }
        };
        if command == Command::Quit {
            break;
        }
        if let Err(err) = driver.run(command) {
            println!("{err:#}");
        }

        println!("{}", render::render(&driver.session));
        io::stdout().flush()?;
    }

    Ok(())
}
