//! PAWNSTORM Core - Game engine and AI
//!
//! This crate provides the core game logic for PAWNSTORM:
//! - Board geometry (8x8 grid with rank/file squares)
//! - Piece kinds, teams and movement tables
//! - Per-piece move generation and the position model
//! - Compact textual snapshots of a position
//! - Position evaluation with mobility heuristic
//! - CPU-based minimax AI with alpha-beta pruning
//! - Snapshot logs and replay for stepping through past positions

pub mod board;
pub mod error;
pub mod pieces;
pub mod movegen;
pub mod codec;
pub mod position;
pub mod eval;
pub mod ai;
pub mod replay;
pub mod config;

// Re-exports for convenient access
pub use board::{Square, BOARD_SIZE};
pub use error::{ChessError, Result};
pub use pieces::{Piece, PieceKind, Team};
pub use movegen::{mobility, moves_for, team_moves, Move};
pub use position::{AppliedMove, MoveOutcome, Position};
pub use eval::{evaluate, Heuristics};
pub use ai::{AlphaBetaAI, SearchOutcome, WIN_SCORE};
pub use replay::{read_snapshots, Replay, SnapshotLog, SnapshotSink};
pub use config::EngineConfig;
