//! Position model
//!
//! A `Position` owns the pieces in insertion order plus a 64-entry grid that
//! maps each square to the index of its occupant. Both are plain data, so
//! cloning is a structural copy.

use crate::board::{Square, BOARD_SIZE};
use crate::codec;
use crate::error::{ChessError, Result};
use crate::eval::{evaluate, Heuristics};
use crate::movegen::{moves_for, Move};
use crate::pieces::{Piece, PieceKind, Team};
use serde::{Deserialize, Serialize};
use std::fmt;

const GRID_LEN: usize = (BOARD_SIZE * BOARD_SIZE) as usize;

/// Back-rank layout from file 0 to file 7
const BACK_RANK: [PieceKind; 8] = [
    PieceKind::Rook,
    PieceKind::Knight,
    PieceKind::Bishop,
    PieceKind::Queen,
    PieceKind::King,
    PieceKind::Bishop,
    PieceKind::Knight,
    PieceKind::Rook,
];

/// Piece order of the standard setup
const SETUP_ORDER: [PieceKind; 6] = [
    PieceKind::King,
    PieceKind::Queen,
    PieceKind::Rook,
    PieceKind::Bishop,
    PieceKind::Knight,
    PieceKind::Pawn,
];

/// A move that was carried out
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppliedMove {
    pub mv: Move,
    pub captured: Option<Piece>,
}

/// Result of [`Position::apply_move`]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MoveOutcome {
    Applied(AppliedMove),
    /// The destination is not among the piece's generated moves, or the
    /// start square is empty. Nothing changed.
    Rejected,
}

impl MoveOutcome {
    pub fn is_applied(&self) -> bool {
        matches!(self, MoveOutcome::Applied(_))
    }
}

/// Board state (clone to branch)
#[derive(Clone, Debug)]
pub struct Position {
    /// Live pieces in insertion order
    pieces: Vec<Piece>,

    /// Square index -> index into `pieces`
    grid: [Option<u8>; GRID_LEN],

    /// Captured pieces, oldest first
    captured: Vec<Piece>,

    current_player: Team,
    game_over: bool,
    winner: Option<Team>,

    /// Serialized snapshots, one per applied move after the initial one
    history: Vec<String>,
    record_history: bool,
}

impl Position {
    // ========================================================================
    // CONSTRUCTORS
    // ========================================================================

    /// Standard chess setup, White to move
    pub fn standard() -> Self {
        let mut pieces = Vec::with_capacity(32);

        for kind in SETUP_ORDER {
            for team in Team::ALL {
                let (back, pawns) = match team {
                    Team::White => (0, 1),
                    Team::Black => (BOARD_SIZE - 1, BOARD_SIZE - 2),
                };
                for file in 0..BOARD_SIZE {
                    let rank = if kind == PieceKind::Pawn {
                        pawns
                    } else if BACK_RANK[file as usize] == kind {
                        back
                    } else {
                        continue;
                    };
                    let square = Square::from_index((rank * BOARD_SIZE + file) as usize);
                    pieces.push(Piece::new(kind, square, team));
                }
            }
        }

        Self::with_trusted_pieces(pieces, Team::White)
    }

    /// Create a position from piece placements
    pub fn from_pieces(pieces: Vec<Piece>, to_move: Team) -> Result<Self> {
        build_grid(&pieces)?;
        Ok(Self::with_trusted_pieces(pieces, to_move))
    }

    /// Restore a position from a snapshot string
    pub fn from_snapshot(state: &str) -> Result<Self> {
        let snapshot = codec::decode(state)?;
        Self::from_pieces(snapshot.pieces, snapshot.to_move)
    }

    fn with_trusted_pieces(pieces: Vec<Piece>, to_move: Team) -> Self {
        let mut grid = [None; GRID_LEN];
        for (i, piece) in pieces.iter().enumerate() {
            grid[piece.square.index()] = Some(i as u8);
        }

        let mut position = Self {
            pieces,
            grid,
            captured: Vec::new(),
            current_player: to_move,
            game_over: false,
            winner: None,
            history: Vec::new(),
            record_history: true,
        };
        position.record();
        position
    }

    /// Search-time copy: deep, but without history and without recording
    pub fn fork(&self) -> Self {
        Self {
            pieces: self.pieces.clone(),
            grid: self.grid,
            captured: self.captured.clone(),
            current_player: self.current_player,
            game_over: self.game_over,
            winner: self.winner,
            history: Vec::new(),
            record_history: false,
        }
    }

    // ========================================================================
    // ACCESSORS
    // ========================================================================

    pub fn current_player(&self) -> Team {
        self.current_player
    }

    /// True once a king has been captured
    pub fn game_over(&self) -> bool {
        self.game_over
    }

    pub fn winner(&self) -> Option<Team> {
        self.winner
    }

    /// Get piece at square
    pub fn piece_at(&self, square: Square) -> Option<&Piece> {
        self.grid[square.index()].map(|i| &self.pieces[i as usize])
    }

    /// All live pieces in insertion order
    pub fn pieces(&self) -> &[Piece] {
        &self.pieces
    }

    /// Pieces of one team, in insertion order
    pub fn pieces_of(&self, team: Team) -> impl Iterator<Item = &Piece> + '_ {
        self.pieces.iter().filter(move |p| p.team == team)
    }

    pub fn captured(&self) -> &[Piece] {
        &self.captured
    }

    /// Snapshots of this game, oldest first
    pub fn history(&self) -> &[String] {
        &self.history
    }

    /// Static score from `team`'s perspective with default heuristics
    pub fn score(&self, team: Team) -> i32 {
        evaluate(self, team, &Heuristics::default())
    }

    // ========================================================================
    // APPLY MOVE
    // ========================================================================

    /// Move the piece on `start` to `end`.
    ///
    /// Returns `Rejected` unless `end` is one of the generated moves of that
    /// piece. The side to move is not checked, and neither is `game_over`:
    /// callers stop play themselves once a king falls.
    pub fn apply_move(&mut self, start: Square, end: Square) -> Result<MoveOutcome> {
        let Some(mover_idx) = self.grid[start.index()] else {
            return Ok(MoveOutcome::Rejected);
        };
        let mover = self.occupant(mover_idx, start)?;

        let Some(mv) = moves_for(&mover, self).into_iter().find(|m| m.end == end) else {
            return Ok(MoveOutcome::Rejected);
        };

        let captured = match self.grid[end.index()] {
            Some(victim_idx) => {
                let victim = self.occupant(victim_idx, end)?;
                if victim.team == mover.team {
                    return Err(ChessError::IllegalOccupancy(end));
                }
                Some(self.remove_piece(victim_idx as usize))
            }
            None => None,
        };

        // Removal may have shifted the mover's index
        let mover_idx = self.grid[start.index()].ok_or(ChessError::IllegalOccupancy(start))?;
        self.pieces[mover_idx as usize].square = end;
        self.grid[start.index()] = None;
        self.grid[end.index()] = Some(mover_idx);

        if let Some(victim) = captured {
            if victim.is_king() {
                self.game_over = true;
                self.winner = Some(mover.team);
            }
        }

        self.current_player = self.current_player.opponent();
        self.record();

        Ok(MoveOutcome::Applied(AppliedMove { mv, captured }))
    }

    fn occupant(&self, idx: u8, square: Square) -> Result<Piece> {
        self.pieces
            .get(idx as usize)
            .copied()
            .filter(|p| p.square == square)
            .ok_or(ChessError::IllegalOccupancy(square))
    }

    fn remove_piece(&mut self, idx: usize) -> Piece {
        let piece = self.pieces.remove(idx);
        self.grid[piece.square.index()] = None;
        for slot in self.grid.iter_mut().flatten() {
            if *slot as usize > idx {
                *slot -= 1;
            }
        }
        self.captured.push(piece);
        piece
    }

    // ========================================================================
    // SNAPSHOTS
    // ========================================================================

    /// Encode piece placement and side to move
    pub fn serialize(&self) -> String {
        codec::encode(&self.pieces, self.current_player)
    }

    /// Replace pieces and side to move with a snapshot's contents.
    ///
    /// Captured pieces and the game-over state are cleared; history is left
    /// alone. On error the position is unchanged.
    pub fn deserialize(&mut self, state: &str) -> Result<()> {
        let snapshot = codec::decode(state)?;
        let grid = build_grid(&snapshot.pieces)?;

        self.pieces = snapshot.pieces;
        self.grid = grid;
        self.current_player = snapshot.to_move;
        self.captured.clear();
        self.game_over = false;
        self.winner = None;
        Ok(())
    }

    fn record(&mut self) {
        if self.record_history {
            let snapshot = self.serialize();
            self.history.push(snapshot);
        }
    }
}

impl Default for Position {
    fn default() -> Self {
        Self::standard()
    }
}

fn build_grid(pieces: &[Piece]) -> Result<[Option<u8>; GRID_LEN]> {
    let mut grid = [None; GRID_LEN];
    for (i, piece) in pieces.iter().enumerate() {
        let slot = &mut grid[piece.square.index()];
        if slot.is_some() {
            return Err(ChessError::IllegalOccupancy(piece.square));
        }
        *slot = Some(i as u8);
    }
    Ok(grid)
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for rank in (0..BOARD_SIZE).rev() {
            write!(f, "{rank} ")?;
            for file in 0..BOARD_SIZE {
                let square = Square::from_index((rank * BOARD_SIZE + file) as usize);
                let glyph = self.piece_at(square).map_or('.', Piece::glyph);
                write!(f, " {glyph}")?;
            }
            writeln!(f)?;
        }
        write!(f, "  ")?;
        for file in 0..BOARD_SIZE {
            write!(f, " {file}")?;
        }
        writeln!(f)?;
        write!(f, "{} to move", self.current_player)
    }
}

// ============================================================================
// TESTS
// ============================================================================
