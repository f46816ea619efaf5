//! Board geometry with rank/file squares

use crate::error::{ChessError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Board width and height
pub const BOARD_SIZE: i8 = 8;

/// A square on the 8x8 board, always in bounds
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "(i8, i8)", into = "(i8, i8)")]
pub struct Square {
    rank: i8,
    file: i8,
}

impl Square {
    /// Create a square, failing on coordinates outside 0..8
    pub fn new(rank: i8, file: i8) -> Result<Self> {
        if Self::in_bounds(rank, file) {
            Ok(Self { rank, file })
        } else {
            Err(ChessError::InvalidSquare { rank, file })
        }
    }

    /// Square from a grid index (rank * 8 + file)
    pub(crate) const fn from_index(index: usize) -> Self {
        Self {
            rank: (index / BOARD_SIZE as usize) as i8,
            file: (index % BOARD_SIZE as usize) as i8,
        }
    }

    pub const fn rank(&self) -> i8 {
        self.rank
    }

    pub const fn file(&self) -> i8 {
        self.file
    }

    /// Grid index (rank * 8 + file)
    pub const fn index(&self) -> usize {
        (self.rank * BOARD_SIZE + self.file) as usize
    }

    /// Step by (d_rank, d_file); None when that leaves the board
    pub fn offset(&self, d_rank: i8, d_file: i8) -> Option<Square> {
        let rank = self.rank + d_rank;
        let file = self.file + d_file;
        Self::in_bounds(rank, file).then_some(Self { rank, file })
    }

    /// Iterate all 64 squares, rank-major
    pub fn all() -> impl Iterator<Item = Square> {
        (0..(BOARD_SIZE * BOARD_SIZE) as usize).map(Square::from_index)
    }

    fn in_bounds(rank: i8, file: i8) -> bool {
        (0..BOARD_SIZE).contains(&rank) && (0..BOARD_SIZE).contains(&file)
    }
}

impl TryFrom<(i8, i8)> for Square {
    type Error = ChessError;

    fn try_from((rank, file): (i8, i8)) -> Result<Self> {
        Square::new(rank, file)
    }
}

impl From<Square> for (i8, i8) {
    fn from(sq: Square) -> Self {
        (sq.rank, sq.file)
    }
}

impl fmt::Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({},{})", self.rank, self.file)
    }
}

impl std::str::FromStr for Square {
    type Err = ChessError;

    /// Parse "rank,file" (parentheses optional)
    fn from_str(s: &str) -> Result<Self> {
        let trimmed = s.trim().trim_start_matches('(').trim_end_matches(')');
        let malformed = || ChessError::MalformedState(format!("bad square: {s:?}"));
        let (rank, file) = trimmed.split_once(',').ok_or_else(malformed)?;
        let rank = rank.trim().parse::<i8>().map_err(|_| malformed())?;
        let file = file.trim().parse::<i8>().map_err(|_| malformed())?;
        Square::new(rank, file)
    }
}

/// Orthogonal direction vectors (d_rank, d_file)
pub const ORTHOGONALS: [(i8, i8); 4] = [(1, 0), (-1, 0), (0, -1), (0, 1)];

/// Diagonal direction vectors (d_rank, d_file)
pub const DIAGONALS: [(i8, i8); 4] = [(1, -1), (1, 1), (-1, -1), (-1, 1)];

/// All eight king/queen directions
pub const ALL_DIRECTIONS: [(i8, i8); 8] = [
    (1, 0),
    (-1, 0),
    (0, -1),
    (0, 1),
    (1, -1),
    (1, 1),
    (-1, -1),
    (-1, 1),
];

/// Knight jump offsets
pub const KNIGHT_JUMPS: [(i8, i8); 8] = [
    (1, 2),
    (1, -2),
    (-1, 2),
    (-1, -2),
    (2, 1),
    (2, -1),
    (-2, 1),
    (-2, -1),
];
