//! Piece kind definitions

use crate::board::{Square, ALL_DIRECTIONS, DIAGONALS, KNIGHT_JUMPS, ORTHOGONALS};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Player side
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Team {
    White = 0,
    Black = 1,
}

impl Team {
    pub const ALL: [Team; 2] = [Team::White, Team::Black];

    pub fn opponent(self) -> Self {
        match self {
            Team::White => Team::Black,
            Team::Black => Team::White,
        }
    }

    /// Rank delta of a forward pawn step
    pub fn pawn_direction(self) -> i8 {
        match self {
            Team::White => 1,
            Team::Black => -1,
        }
    }

    /// Rank from which pawns may advance two squares
    pub fn home_rank(self) -> i8 {
        match self {
            Team::White => 1,
            Team::Black => 6,
        }
    }

    /// Snapshot letter: uppercase for White, lowercase for Black
    pub fn letter(self) -> char {
        match self {
            Team::White => 'W',
            Team::Black => 'b',
        }
    }

    pub fn from_letter(c: char) -> Option<Self> {
        match c {
            'W' => Some(Team::White),
            'b' => Some(Team::Black),
            _ => None,
        }
    }
}

impl fmt::Display for Team {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Team::White => f.pad("White"),
            Team::Black => f.pad("Black"),
        }
    }
}

/// Movement type
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MoveType {
    Step,  // One hop per offset, stops at the first occupant
    Slide, // Any distance along a direction, blocked by pieces
    Pawn,  // Forward pushes and capture-only forward diagonals
}

/// The six piece kinds
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PieceKind {
    King,
    Queen,
    Rook,
    Bishop,
    Knight,
    Pawn,
}

impl PieceKind {
    pub const ALL: [PieceKind; 6] = [
        PieceKind::King,
        PieceKind::Queen,
        PieceKind::Rook,
        PieceKind::Bishop,
        PieceKind::Knight,
        PieceKind::Pawn,
    ];

    /// Index for per-kind tables: King=0 .. Pawn=5
    pub const fn index(self) -> usize {
        self as usize
    }

    pub fn move_type(self) -> MoveType {
        match self {
            PieceKind::King | PieceKind::Knight => MoveType::Step,
            PieceKind::Queen | PieceKind::Rook | PieceKind::Bishop => MoveType::Slide,
            PieceKind::Pawn => MoveType::Pawn,
        }
    }

    /// Offsets (Step) or direction vectors (Slide); empty for pawns
    pub fn vectors(self) -> &'static [(i8, i8)] {
        match self {
            PieceKind::King | PieceKind::Queen => &ALL_DIRECTIONS,
            PieceKind::Rook => &ORTHOGONALS,
            PieceKind::Bishop => &DIAGONALS,
            PieceKind::Knight => &KNIGHT_JUMPS,
            PieceKind::Pawn => &[],
        }
    }

    /// Default material value used by the evaluator
    pub fn material(self) -> i32 {
        match self {
            PieceKind::King => 1000,
            PieceKind::Queen => 9,
            PieceKind::Rook => 5,
            PieceKind::Bishop | PieceKind::Knight => 3,
            PieceKind::Pawn => 1,
        }
    }

    /// Ordering weight of a non-capturing move by this kind
    pub fn quiet_weight(self) -> i32 {
        match self {
            PieceKind::Queen => 30,
            PieceKind::King | PieceKind::Rook => 10,
            PieceKind::Bishop => 5,
            PieceKind::Knight | PieceKind::Pawn => 0,
        }
    }

    /// Snapshot letter; bishop and knight are lowercase
    pub fn letter(self) -> char {
        match self {
            PieceKind::King => 'K',
            PieceKind::Queen => 'Q',
            PieceKind::Rook => 'R',
            PieceKind::Bishop => 'b',
            PieceKind::Knight => 'k',
            PieceKind::Pawn => 'P',
        }
    }

    pub fn from_letter(c: char) -> Option<Self> {
        PieceKind::ALL.into_iter().find(|kind| kind.letter() == c)
    }

    /// Board diagram glyph (standard algebraic letter)
    pub fn glyph(self) -> char {
        match self {
            PieceKind::King => 'K',
            PieceKind::Queen => 'Q',
            PieceKind::Rook => 'R',
            PieceKind::Bishop => 'B',
            PieceKind::Knight => 'N',
            PieceKind::Pawn => 'P',
        }
    }
}

impl fmt::Display for PieceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

/// A piece on the board
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Piece {
    pub kind: PieceKind,
    pub square: Square,
    pub team: Team,
}

impl Piece {
    pub fn new(kind: PieceKind, square: Square, team: Team) -> Self {
        Self { kind, square, team }
    }

    pub fn is_king(&self) -> bool {
        self.kind == PieceKind::King
    }

    /// Diagram glyph: uppercase White, lowercase Black
    pub fn glyph(&self) -> char {
        match self.team {
            Team::White => self.kind.glyph(),
            Team::Black => self.kind.glyph().to_ascii_lowercase(),
        }
    }
}

impl fmt::Display for Piece {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} at {}", self.team, self.kind, self.square)
    }
}
