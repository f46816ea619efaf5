//! Play command - bot-versus-bot game from the standard position
//!
//! ## Architecture (4-layer granularity)
//!
//! - Level 1: run() - orchestration
//! - Level 2: play_game(), save_history(), report_results()
//! - Level 3: play_random_opening(), apply()
//! - Level 4: rng and formatting utilities

use std::fs::File;
use std::io::BufWriter;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::Args;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::Serialize;

use pawnstorm_core::{
    team_moves, AlphaBetaAI, Move, MoveOutcome, Position, SnapshotLog, Team,
};

// ============================================================================
// COMMAND ARGUMENTS (Level 4 - Configuration)
// ============================================================================

#[derive(Args)]
pub struct PlayArgs {
    /// AI search depth (overrides the config file)
    #[arg(long)]
    pub depth: Option<u32>,

    /// Maximum moves (plies) before the game is stopped
    #[arg(long, default_value = "200")]
    pub max_moves: usize,

    /// Seed for the random opening plies
    #[arg(long)]
    pub seed: Option<u64>,

    /// Number of random plies played before the bots take over
    #[arg(long, default_value = "0")]
    pub random_plies: usize,

    /// Write the game history (one snapshot per line)
    #[arg(long, value_name = "FILE")]
    pub history: Option<PathBuf>,

    /// Append every explored search node to this snapshot log
    #[arg(long, value_name = "FILE")]
    pub search_log: Option<PathBuf>,

    /// Engine config JSON file
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Output results as JSON
    #[arg(long)]
    pub json: bool,
}

/// One ply of the game
#[derive(Clone, Debug, Serialize)]
struct PlyRecord {
    ply: usize,
    team: Team,
    notation: String,
    /// None for random opening plies
    score: Option<i32>,
    nodes: u64,
}

/// Result of a game
#[derive(Clone, Debug, Serialize)]
struct GameRecord {
    winner: Option<Team>,
    plies: Vec<PlyRecord>,
    total_nodes: u64,
    final_snapshot: String,
    #[serde(skip)]
    final_position: Position,
}

// ============================================================================
// LEVEL 1 - ORCHESTRATION
// ============================================================================

/// Run play command
///
/// 1. Load the engine config
/// 2. Play the game
/// 3. Save history and report
pub fn run(args: PlayArgs) -> Result<()> {
    let config = crate::load_config(args.config.as_deref(), args.depth)?;
    let ai = AlphaBetaAI::from_config(&config);

    tracing::info!(
        "Starting game: depth={}, max_moves={}, random_plies={}",
        ai.depth,
        args.max_moves,
        args.random_plies
    );

    let mut rng = create_rng(args.seed);
    let mut search_log = match &args.search_log {
        Some(path) => Some(
            SnapshotLog::append_to(path)
                .with_context(|| format!("Failed to open search log: {}", path.display()))?,
        ),
        None => None,
    };

    let record = play_game(
        &ai,
        args.max_moves,
        args.random_plies,
        &mut rng,
        search_log.as_mut(),
    )?;

    if let Some(log) = search_log.as_mut() {
        log.flush()?;
        tracing::info!("Search log: {} snapshots written", log.written());
    }

    if let Some(path) = &args.history {
        save_history(&record.final_position, path)?;
    }

    report_results(&record, args.json)
}

// ============================================================================
// LEVEL 2 - PHASES
// ============================================================================

/// Play one game, bots on both sides
fn play_game(
    ai: &AlphaBetaAI,
    max_moves: usize,
    random_plies: usize,
    rng: &mut ChaCha8Rng,
    mut search_log: Option<&mut SnapshotLog<BufWriter<File>>>,
) -> Result<GameRecord> {
    let mut position = Position::standard();
    let mut plies = play_random_opening(&mut position, random_plies.min(max_moves), rng)?;
    let mut total_nodes = 0;

    while !position.game_over() && plies.len() < max_moves {
        let team = position.current_player();
        let outcome = match search_log.as_deref_mut() {
            Some(log) => ai.search_logged(&position, ai.depth, team, log)?,
            None => ai.search(&position, ai.depth, team)?,
        };

        let Some(mv) = outcome.mv else {
            tracing::info!("{} has no moves", team);
            break;
        };

        apply(&mut position, &mv)?;
        total_nodes += outcome.nodes_explored;

        tracing::info!(
            "Ply {}: {} plays {} (score {}, {} nodes)",
            plies.len() + 1,
            team,
            mv,
            outcome.score,
            outcome.nodes_explored
        );

        plies.push(PlyRecord {
            ply: plies.len() + 1,
            team,
            notation: mv.to_string(),
            score: Some(outcome.score),
            nodes: outcome.nodes_explored,
        });
    }

    Ok(GameRecord {
        winner: position.winner(),
        plies,
        total_nodes,
        final_snapshot: position.serialize(),
        final_position: position,
    })
}

/// Write the game's history, one snapshot per line
fn save_history(position: &Position, path: &Path) -> Result<()> {
    let file = File::create(path)
        .with_context(|| format!("Failed to create history file: {}", path.display()))?;
    let mut log = SnapshotLog::new(BufWriter::new(file));
    for snapshot in position.history() {
        log.append_line(snapshot)?;
    }
    log.flush()?;

    tracing::info!("History: {} snapshots -> {}", log.written(), path.display());
    Ok(())
}

/// Report game results
fn report_results(record: &GameRecord, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(record)?);
    } else {
        print_text_results(record);
    }
    Ok(())
}

// ============================================================================
// LEVEL 3 - STEPS
// ============================================================================

/// Play seeded random plies to vary the opening
fn play_random_opening(
    position: &mut Position,
    plies: usize,
    rng: &mut ChaCha8Rng,
) -> Result<Vec<PlyRecord>> {
    let mut records = Vec::with_capacity(plies);

    for ply in 1..=plies {
        if position.game_over() {
            break;
        }
        let team = position.current_player();
        let candidates = team_moves(position, team);
        let Some(&(_, mv)) = candidates.choose(rng) else {
            break;
        };

        apply(position, &mv)?;
        tracing::debug!("Random ply {}: {} plays {}", ply, team, mv);

        records.push(PlyRecord {
            ply,
            team,
            notation: mv.to_string(),
            score: None,
            nodes: 0,
        });
    }

    Ok(records)
}

/// Apply an engine-generated move to the live position
fn apply(position: &mut Position, mv: &Move) -> Result<()> {
    match position.apply_move(mv.start, mv.end)? {
        MoveOutcome::Applied(_) => Ok(()),
        MoveOutcome::Rejected => bail!("Engine produced a rejected move: {}", mv),
    }
}

// ============================================================================
// LEVEL 4 - UTILITIES
// ============================================================================

/// Create RNG from seed or random
fn create_rng(seed: Option<u64>) -> ChaCha8Rng {
    match seed {
        Some(s) => ChaCha8Rng::seed_from_u64(s),
        None => ChaCha8Rng::from_entropy(),
    }
}

/// Print results as text
fn print_text_results(record: &GameRecord) {
    println!("\n=== Game Result ===");
    match record.winner {
        Some(team) => println!("Winner:      {} (king captured)", team),
        None => println!("Winner:      none (move limit reached)"),
    }
    println!("Plies:       {}", record.plies.len());
    println!("Nodes:       {}", record.total_nodes);

    println!("\nMoves:");
    for ply in &record.plies {
        match ply.score {
            Some(score) => println!("  {:>3}. {:<5} {:<14} {}", ply.ply, ply.team, ply.notation, score),
            None => println!("  {:>3}. {:<5} {:<14} (random)", ply.ply, ply.team, ply.notation),
        }
    }

    println!("\n{}", record.final_position);
    println!("Snapshot: {}", record.final_snapshot);
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_rng_deterministic() {
        let mut rng1 = create_rng(Some(42));
        let mut rng2 = create_rng(Some(42));

        use rand::Rng;
        assert_eq!(rng1.gen::<u64>(), rng2.gen::<u64>());
    }

    #[test]
    fn test_random_opening_is_seeded() {
        let mut a = Position::standard();
        let mut b = Position::standard();
        let ra = play_random_opening(&mut a, 6, &mut create_rng(Some(7))).unwrap();
        let rb = play_random_opening(&mut b, 6, &mut create_rng(Some(7))).unwrap();

        assert_eq!(ra.len(), 6);
        assert_eq!(a.serialize(), b.serialize());
        assert!(ra.iter().all(|p| p.score.is_none()));
        assert_eq!(a.history().len(), 7);
    }

    #[test]
    fn test_play_game_respects_move_limit() {
        let ai = AlphaBetaAI::new(1, Default::default());
        let record = play_game(&ai, 6, 2, &mut create_rng(Some(1)), None).unwrap();

        assert!(record.plies.len() <= 6);
        assert_eq!(record.plies[0].score, None);
        assert!(record.plies[2].score.is_some());
        assert_eq!(record.final_position.history().len(), record.plies.len() + 1);
        assert_eq!(record.final_snapshot, record.final_position.serialize());
    }
}
