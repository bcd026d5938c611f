//! level-run: headless ALIEN level runner.
//!
//! Usage:
//!   level-run level.json --ticks 600 --hold right --hold space
//!   level-run old_level.json --ticks 0 --save upgraded.json
//!
//! Loads a version 1 or 2 level document, runs it for a number of ticks
//! with a fixed set of held keys and prints a JSON summary to stdout.
//! Logging goes to stderr and is controlled by `RUST_LOG`.

use std::fs;
use std::path::{Path, PathBuf};
use std::process;

use clap::Parser;
use serde::Serialize;
use thiserror::Error;

use alien_core::events::Notification;
use alien_core::input::{InputState, Key};
use alien_core::level::LevelError;
use alien_sim::tiles::CollisionTable;
use alien_sim::{ActorSnapshot, SimConfig, SimError, Simulation};

/// Run an ALIEN level without a window.
#[derive(Parser)]
#[command(version, about)]
struct Cli {
    /// Level document (JSON, version 1 or 2).
    level: PathBuf,

    /// Simulation config JSON; missing fields keep their defaults.
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Number of ticks to run.
    #[arg(long, default_value_t = 600)]
    ticks: u64,

    /// Key held for the whole run: left, right, up, down, space, p.
    #[arg(long = "hold", value_name = "KEY")]
    held: Vec<String>,

    /// Keep running after the player dies or finishes.
    #[arg(long)]
    keep_going: bool,

    /// Write the level back out as a version 2 document.
    #[arg(long, value_name = "PATH")]
    save: Option<PathBuf>,
}

#[derive(Debug, Error)]
enum RunError {
    #[error("{path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("unknown key {0:?}")]
    UnknownKey(String),
    #[error("invalid config: {0}")]
    Config(#[from] serde_json::Error),
    #[error(transparent)]
    Level(#[from] LevelError),
    #[error(transparent)]
    Sim(#[from] SimError),
}

#[derive(Serialize)]
struct Summary {
    ticks: u64,
    elapsed_secs: f64,
    finished: bool,
    /// Reason of the first death, if any.
    died: Option<String>,
    positions_reported: usize,
    actors: Vec<ActorSnapshot>,
}

fn read(path: &Path) -> Result<String, RunError> {
    fs::read_to_string(path).map_err(|source| RunError::Io {
        path: path.to_path_buf(),
        source,
    })
}

fn held_keys(names: &[String]) -> Result<InputState, RunError> {
    names
        .iter()
        .map(|name| Key::from_name(name).ok_or_else(|| RunError::UnknownKey(name.clone())))
        .collect()
}

fn run(cli: &Cli) -> Result<Summary, RunError> {
    let config = match &cli.config {
        Some(path) => serde_json::from_str(&read(path)?)?,
        None => SimConfig::default(),
    };
    let input = held_keys(&cli.held)?;

    let mut sim = Simulation::from_json(&read(&cli.level)?, CollisionTable::standard(), config)?;

    if let Some(path) = &cli.save {
        let text = sim.to_document().to_json()?;
        fs::write(path, text).map_err(|source| RunError::Io {
            path: path.clone(),
            source,
        })?;
        log::info!("level written to {}", path.display());
    }

    let mut finished = false;
    let mut died = None;
    let mut positions_reported = 0;
    let mut ticks = 0;

    while ticks < cli.ticks {
        let report = sim.tick(&input)?;
        ticks += 1;
        for notification in report.notifications {
            match notification {
                Notification::Died { reason, .. } => {
                    died.get_or_insert(reason);
                }
                Notification::Finished => finished = true,
                Notification::Position(_) => positions_reported += 1,
            }
        }
        if !cli.keep_going && (finished || died.is_some()) {
            log::info!("stopping after tick {ticks}");
            break;
        }
    }

    Ok(Summary {
        ticks,
        elapsed_secs: sim.time().elapsed_secs(),
        finished,
        died,
        positions_reported,
        actors: sim.snapshot(),
    })
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    let summary = match run(&cli) {
        Ok(summary) => summary,
        Err(e) => {
            eprintln!("Error: {e}");
            process::exit(1);
        }
    };

    match serde_json::to_string_pretty(&summary) {
        Ok(text) => println!("{text}"),
        Err(e) => {
            eprintln!("Error: {e}");
            process::exit(1);
        }
    }
}
