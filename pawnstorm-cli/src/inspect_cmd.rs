//! Search and moves commands - inspect a single position

use std::path::PathBuf;

use anyhow::{anyhow, bail, Context, Result};
use clap::{Args, ValueEnum};
use serde::Serialize;

use pawnstorm_core::{moves_for, AlphaBetaAI, Move, MoveOutcome, Position, Square, Team};

/// Side selector for the command line
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum TeamArg {
    White,
    Black,
}

impl From<TeamArg> for Team {
    fn from(arg: TeamArg) -> Self {
        match arg {
            TeamArg::White => Team::White,
            TeamArg::Black => Team::Black,
        }
    }
}

#[derive(Args)]
pub struct SearchArgs {
    /// Snapshot to search (standard position if omitted)
    #[arg(long)]
    pub state: Option<String>,

    /// Search depth (overrides the config file)
    #[arg(long)]
    pub depth: Option<u32>,

    /// Maximizing side (side to move if omitted)
    #[arg(long, value_enum)]
    pub team: Option<TeamArg>,

    /// Plain minimax, no alpha-beta cutoffs
    #[arg(long)]
    pub no_pruning: bool,

    /// Engine config JSON file
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Output results as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Args)]
pub struct MovesArgs {
    /// Snapshot to inspect (standard position if omitted)
    #[arg(long)]
    pub state: Option<String>,

    /// Square of the piece, as "rank,file"
    #[arg(long)]
    pub square: String,

    /// Play the piece to this square and print the resulting snapshot
    #[arg(long, value_name = "SQUARE")]
    pub to: Option<String>,

    /// Output results as JSON
    #[arg(long)]
    pub json: bool,
}

/// Run search command
pub fn run_search(args: SearchArgs) -> Result<()> {
    let config = crate::load_config(args.config.as_deref(), args.depth)?;
    let position = crate::load_position(args.state.as_deref())?;
    let team = args.team.map(Team::from).unwrap_or(position.current_player());

    let mut ai = AlphaBetaAI::from_config(&config);
    if args.no_pruning {
        ai = ai.without_pruning();
    }

    tracing::info!("Searching depth {} for {}", ai.depth, team);
    let outcome = ai.search(&position, ai.depth, team)?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&outcome)?);
        return Ok(());
    }

    println!("{}\n", position);
    match (outcome.piece, outcome.mv) {
        (Some(piece), Some(mv)) => println!("Best move:   {} ({})", mv, piece),
        _ => println!("Best move:   none"),
    }
    println!("Score:       {}", outcome.score);
    println!("Nodes:       {}", outcome.nodes_explored);
    Ok(())
}

/// Run moves command
pub fn run_moves(args: MovesArgs) -> Result<()> {
    let mut position = crate::load_position(args.state.as_deref())?;
    let square = parse_square(&args.square)?;

    if let Some(to) = &args.to {
        return play_user_move(&mut position, square, parse_square(to)?);
    }

    let piece = position
        .piece_at(square)
        .ok_or_else(|| anyhow!("No piece on {}", square))?;

    let moves = moves_for(piece, &position);

    if args.json {
        let rows: Vec<MoveRow> = moves.iter().map(MoveRow::from).collect();
        println!("{}", serde_json::to_string_pretty(&rows)?);
        return Ok(());
    }

    println!("{}: {} moves", piece, moves.len());
    for mv in &moves {
        let tag = if mv.is_capture { "capture" } else { "" };
        println!("  {:<14} {:>6} {}", mv.to_string(), mv.heuristic, tag);
    }
    Ok(())
}

/// Apply one move the way an interactive front end would
fn play_user_move(position: &mut Position, start: Square, end: Square) -> Result<()> {
    match position.apply_move(start, end)? {
        MoveOutcome::Applied(applied) => {
            println!("Played {}", applied.mv);
            if let Some(captured) = applied.captured {
                println!("Captured {}", captured);
            }
            if let Some(winner) = position.winner() {
                println!("{} wins", winner);
            }
            println!("{}\n", position);
            println!("Snapshot: {}", position.serialize());
            Ok(())
        }
        MoveOutcome::Rejected => {
            tracing::warn!("Rejected move {} -> {}", start, end);
            bail!("{} -> {} is not a move of the piece on {}", start, end, start)
        }
    }
}

fn parse_square(text: &str) -> Result<Square> {
    text.parse()
        .with_context(|| format!("Invalid square: {}", text))
}

/// Flat move description for JSON output
#[derive(Serialize)]
struct MoveRow {
    end: Square,
    is_capture: bool,
    heuristic: i32,
}

impl From<&Move> for MoveRow {
    fn from(mv: &Move) -> Self {
        Self {
            end: mv.end,
            is_capture: mv.is_capture,
            heuristic: mv.heuristic,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_team_arg_conversion() {
        assert_eq!(Team::from(TeamArg::White), Team::White);
        assert_eq!(Team::from(TeamArg::Black), Team::Black);
    }

    #[test]
    fn test_move_row() {
        let position = crate::load_position(None).unwrap();
        let knight = position.piece_at("0,1".parse().unwrap()).unwrap();
        let rows: Vec<MoveRow> = moves_for(knight, &position).iter().map(MoveRow::from).collect();
        assert_eq!(rows.len(), 2);
        assert!(rows.iter().all(|r| !r.is_capture));
    }

    #[test]
    fn test_user_move() {
        let mut position = Position::standard();
        assert!(play_user_move(&mut position, "1,4".parse().unwrap(), "3,4".parse().unwrap()).is_ok());
        assert_eq!(position.current_player(), Team::Black);

        let before = position.serialize();
        assert!(play_user_move(&mut position, "7,0".parse().unwrap(), "5,0".parse().unwrap()).is_err());
        assert_eq!(position.serialize(), before);
    }

    #[test]
    fn test_parse_square() {
        assert!(parse_square("0,1").is_ok());
        assert!(parse_square("8,1").is_err());
        assert!(parse_square("a1").is_err());
    }
}
