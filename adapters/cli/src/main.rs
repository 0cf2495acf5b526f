#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Command-line adapter that plays a scripted Treasure Hunt game.

mod board_text;
mod move_script;
mod snapshot_log;

use std::{fs, path::Path, path::PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use tracing_subscriber::EnvFilter;
use treasure_hunt_core::{BoardSnapshot, GameConfig};
use treasure_hunt_session::GameSession;

use crate::{move_script::MoveStep, snapshot_log::SnapshotLog};

/// Starts a two-player treasure hunt and applies the provided moves.
#[derive(Debug, Parser)]
#[command(name = "treasure-hunt", author, version, about, long_about = None)]
struct Args {
    /// Moves applied in order, written as NAME:DIRECTION (e.g. 1:UP 2:left)
    moves: Vec<MoveStep>,

    /// TOML file overriding the default game configuration
    #[arg(long)]
    config: Option<PathBuf>,

    /// Random seed for the board layout (default: random)
    #[arg(long)]
    seed: Option<u64>,

    /// Append every commit to this file as JSON lines
    #[arg(long)]
    snapshot_log: Option<PathBuf>,

    /// After the scripted moves, walk this player over every tile
    #[arg(long, value_name = "NAME")]
    sweep: Option<String>,

    /// Output format for the final board
    #[arg(long, default_value = "text")]
    format: OutputFormat,
}

/// Output format for the final board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    /// Grid of glyphs followed by player scores.
    Text,
    /// Board snapshot as pretty-printed JSON.
    Json,
}

/// Entry point for the Treasure Hunt command-line interface.
fn main() -> Result<()> {
    init_tracing();
    let args = Args::parse();
    let snapshot = run(&args)?;
    print!("{}", format_board(&snapshot, args.format)?);
    Ok(())
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact()
        .init();
}

fn run(args: &Args) -> Result<BoardSnapshot> {
    let config = match &args.config {
        Some(path) => load_config(path)?,
        None => GameConfig::default(),
    };

    let mut session = match args.seed {
        Some(seed) => GameSession::seeded(seed),
        None => GameSession::new(),
    };
    if let Some(path) = &args.snapshot_log {
        session = session.with_persistence(SnapshotLog::append_to(path)?);
    }

    let mut snapshot = session
        .start_new_game(&config)
        .context("failed to start a new game")?;

    for step in &args.moves {
        snapshot = session
            .attempt_move(&step.player, step.direction)
            .with_context(|| format!("move {}:{} failed", step.player, step.direction))?;
    }

    if let Some(player) = &args.sweep {
        for direction in move_script::serpentine_sweep(snapshot.grid_size) {
            snapshot = session
                .attempt_move(player, direction)
                .with_context(|| format!("sweep for {player} failed"))?;
        }
        tracing::info!(
            player = player.as_str(),
            remaining = snapshot.remaining_treasure(),
            "sweep finished"
        );
    }

    Ok(snapshot)
}

fn load_config(path: &Path) -> Result<GameConfig> {
    let contents = fs::read_to_string(path)
        .with_context(|| format!("failed to read config {}", path.display()))?;
    parse_config(&contents).with_context(|| format!("invalid config {}", path.display()))
}

fn parse_config(contents: &str) -> Result<GameConfig> {
    let config: GameConfig = toml::from_str(contents).context("failed to parse config toml")?;
    config.validate()?;
    Ok(config)
}

fn format_board(snapshot: &BoardSnapshot, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Text => Ok(board_text::render(snapshot)),
        OutputFormat::Json => {
            let mut json =
                serde_json::to_string_pretty(snapshot).context("failed to encode board")?;
            json.push('\n');
            Ok(json)
        }
    }
}
