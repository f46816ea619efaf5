//! Engine error type

use crate::board::Square;

pub type Result<T, E = ChessError> = std::result::Result<T, E>;

/// Faults raised by the engine.
///
/// A move that is simply not available is not an error; see
/// [`MoveOutcome::Rejected`](crate::position::MoveOutcome).
#[derive(Debug, thiserror::Error)]
pub enum ChessError {
    #[error("square ({rank},{file}) is outside the 8x8 board")]
    InvalidSquare { rank: i8, file: i8 },

    #[error("malformed state: {0}")]
    MalformedState(String),

    #[error("two pieces occupy square {0}")]
    IllegalOccupancy(Square),

    #[error("generated move {start} -> {end} was rejected by the position")]
    UnexpectedRejection { start: Square, end: Square },

    #[error("snapshot log I/O failed: {0}")]
    Io(#[from] std::io::Error),
}
