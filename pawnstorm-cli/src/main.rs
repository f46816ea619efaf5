//! PAWNSTORM CLI - Command-line interface
//!
//! Commands:
//! - play: Bot-versus-bot game from the standard position
//! - search: Best move for a snapshot
//! - moves: Candidate moves for one piece
//! - replay: Step through a snapshot log

mod inspect_cmd;
mod play_cmd;
mod replay_cmd;

use std::path::Path;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use pawnstorm_core::{EngineConfig, Position};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "pawnstorm")]
#[command(about = "PAWNSTORM minimax chess engine")]
struct Cli {
    /// Debug logging (RUST_LOG takes precedence)
    #[arg(long, short, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Play a bot-versus-bot game
    Play(play_cmd::PlayArgs),
    /// Search a position for the best move
    Search(inspect_cmd::SearchArgs),
    /// List candidate moves for one piece
    Moves(inspect_cmd::MovesArgs),
    /// Step through a snapshot log
    Replay(replay_cmd::ReplayArgs),
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let default_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Play(args) => play_cmd::run(args),
        Commands::Search(args) => inspect_cmd::run_search(args),
        Commands::Moves(args) => inspect_cmd::run_moves(args),
        Commands::Replay(args) => replay_cmd::run(args),
    }
}

/// Load config file (or defaults) and apply a depth override
pub(crate) fn load_config(path: Option<&Path>, depth: Option<u32>) -> Result<EngineConfig> {
    let mut config = match path {
        Some(path) => EngineConfig::load(path)
            .with_context(|| format!("Failed to load config: {}", path.display()))?,
        None => EngineConfig::default(),
    };
    if let Some(depth) = depth {
        config.depth = depth;
    }
    Ok(config)
}

/// Position from a snapshot argument, or the standard setup
pub(crate) fn load_position(state: Option<&str>) -> Result<Position> {
    match state {
        Some(state) => Position::from_snapshot(state)
            .with_context(|| format!("Invalid snapshot: {state:?}")),
        None => Ok(Position::standard()),
    }
}
