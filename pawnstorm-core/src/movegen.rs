//! Geometric move generation
//!
//! Moves are produced per piece against a [`Position`]. Nothing here checks
//! whether the mover's own king is left capturable; the only legality rules
//! are the movement geometry of each kind and occupancy.

use crate::board::{Square, BOARD_SIZE};
use crate::pieces::{MoveType, Piece, PieceKind, Team};
use crate::position::Position;
use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};
use std::hash::{Hash, Hasher};

/// Ordering bonus that lifts every capture above every quiet move
const CAPTURE_BASE: i32 = 1000;

/// Victim value multiplier (Most Valuable Victim)
const VICTIM_FACTOR: i32 = 10;

/// A candidate move.
///
/// Equality and hashing only look at `(start, end, is_capture)`, so two
/// structurally identical moves collapse to one in a set.
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct Move {
    /// The mover as it stood before the move
    pub piece: Piece,
    pub start: Square,
    pub end: Square,
    /// Ordering score for search, not an evaluation
    pub heuristic: i32,
    pub is_capture: bool,
    pub captured: Option<Piece>,
}

impl Move {
    fn key(&self) -> (Square, Square, bool) {
        (self.start, self.end, self.is_capture)
    }
}

impl PartialEq for Move {
    fn eq(&self, other: &Self) -> bool {
        self.key() == other.key()
    }
}

impl Eq for Move {}

impl Hash for Move {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.key().hash(state);
    }
}

impl std::fmt::Display for Move {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let sep = if self.is_capture { 'x' } else { '-' };
        write!(f, "{}{}{}{}", self.piece.kind.glyph(), self.start, sep, self.end)
    }
}

// ============================================================================
// MOVE ORDERING
// ============================================================================

/// Score a move for ordering (higher = search first).
///
/// Captures rank by victim value, then by cheapest attacker; a king capture
/// dwarfs everything else.
pub fn heuristic(attacker: PieceKind, victim: Option<PieceKind>) -> i32 {
    match victim {
        Some(victim) => {
            CAPTURE_BASE + VICTIM_FACTOR * victim.material() - attacker_cost(attacker)
        }
        None => attacker.quiet_weight(),
    }
}

/// Pawn = 0 .. King = 5
fn attacker_cost(kind: PieceKind) -> i32 {
    (PieceKind::ALL.len() - 1 - kind.index()) as i32
}

// ============================================================================
// GENERATION
// ============================================================================

/// De-duplicating move collector that keeps generation order
struct MoveList {
    moves: Vec<Move>,
    seen: FxHashSet<Move>,
}

impl MoveList {
    fn new() -> Self {
        Self {
            moves: Vec::new(),
            seen: FxHashSet::default(),
        }
    }

    fn push(&mut self, piece: &Piece, end: Square, captured: Option<Piece>) {
        let mv = Move {
            piece: *piece,
            start: piece.square,
            end,
            heuristic: heuristic(piece.kind, captured.map(|c| c.kind)),
            is_capture: captured.is_some(),
            captured,
        };
        if self.seen.insert(mv) {
            self.moves.push(mv);
        }
    }
}

/// Generate every geometrically valid move for `piece`
pub fn moves_for(piece: &Piece, position: &Position) -> Vec<Move> {
    let mut list = MoveList::new();

    match piece.kind.move_type() {
        MoveType::Step => generate_step_moves(piece, position, &mut list),
        MoveType::Slide => generate_slide_moves(piece, position, &mut list),
        MoveType::Pawn => generate_pawn_moves(piece, position, &mut list),
    }

    list.moves
}

/// All `(piece, move)` pairs for a team, in piece order
pub fn team_moves(position: &Position, team: Team) -> Vec<(Piece, Move)> {
    position
        .pieces_of(team)
        .flat_map(|piece| {
            moves_for(piece, position)
                .into_iter()
                .map(move |mv| (*piece, mv))
        })
        .collect()
}

/// Count moves for a team (mobility heuristic)
pub fn mobility(position: &Position, team: Team) -> usize {
    position
        .pieces_of(team)
        .map(|piece| moves_for(piece, position).len())
        .sum()
}

fn generate_step_moves(piece: &Piece, position: &Position, list: &mut MoveList) {
    for &(d_rank, d_file) in piece.kind.vectors() {
        let Some(dest) = piece.square.offset(d_rank, d_file) else {
            continue;
        };

        match position.piece_at(dest) {
            Some(occupant) if occupant.team != piece.team => {
                list.push(piece, dest, Some(*occupant));
            }
            Some(_) => {} // Own piece
            None => list.push(piece, dest, None),
        }
    }
}

fn generate_slide_moves(piece: &Piece, position: &Position, list: &mut MoveList) {
    for &(d_rank, d_file) in piece.kind.vectors() {
        for step in 1..BOARD_SIZE {
            let Some(dest) = piece.square.offset(d_rank * step, d_file * step) else {
                break;
            };

            if let Some(occupant) = position.piece_at(dest) {
                if occupant.team != piece.team {
                    list.push(piece, dest, Some(*occupant));
                }
                break; // Blocked
            }

            list.push(piece, dest, None);
        }
    }
}

fn generate_pawn_moves(piece: &Piece, position: &Position, list: &mut MoveList) {
    let dir = piece.team.pawn_direction();

    // Forward pushes; the double step needs the intermediate square empty too
    if let Some(one) = piece.square.offset(dir, 0) {
        if position.piece_at(one).is_none() {
            list.push(piece, one, None);

            if piece.square.rank() == piece.team.home_rank() {
                if let Some(two) = piece.square.offset(2 * dir, 0) {
                    if position.piece_at(two).is_none() {
                        list.push(piece, two, None);
                    }
                }
            }
        }
    }

    // Diagonals only when there is something to take
    for d_file in [-1, 1] {
        let Some(diag) = piece.square.offset(dir, d_file) else {
            continue;
        };
        if let Some(occupant) = position.piece_at(diag) {
            if occupant.team != piece.team {
                list.push(piece, diag, Some(*occupant));
            }
        }
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn sq(rank: i8, file: i8) -> Square {
        Square::new(rank, file).unwrap()
    }

    fn lone(kind: PieceKind, square: Square) -> (Position, Piece) {
        let piece = Piece::new(kind, square, Team::White);
        let position = Position::from_pieces(vec![piece], Team::White).unwrap();
        (position, piece)
    }

    fn ends(moves: &[Move]) -> Vec<Square> {
        let mut ends: Vec<_> = moves.iter().map(|m| m.end).collect();
        ends.sort();
        ends
    }

    #[test]
    fn test_knight_center_and_corner() {
        let (position, knight) = lone(PieceKind::Knight, sq(3, 3));
        assert_eq!(moves_for(&knight, &position).len(), 8);

        let (position, knight) = lone(PieceKind::Knight, sq(0, 0));
        assert_eq!(moves_for(&knight, &position).len(), 2);
    }

    #[test]
    fn test_start_knight_jumps() {
        let position = Position::standard();
        let knight = *position.piece_at(sq(0, 1)).unwrap();
        assert_eq!(knight.kind, PieceKind::Knight);
        let moves = moves_for(&knight, &position);
        assert_eq!(ends(&moves), vec![sq(2, 0), sq(2, 2)]);
    }

    #[test]
    fn test_slider_counts_on_empty_board() {
        let (position, rook) = lone(PieceKind::Rook, sq(3, 3));
        assert_eq!(moves_for(&rook, &position).len(), 14);

        let (position, bishop) = lone(PieceKind::Bishop, sq(3, 3));
        assert_eq!(moves_for(&bishop, &position).len(), 13);

        let (position, queen) = lone(PieceKind::Queen, sq(3, 3));
        assert_eq!(moves_for(&queen, &position).len(), 27);

        let (position, king) = lone(PieceKind::King, sq(0, 0));
        assert_eq!(moves_for(&king, &position).len(), 3);
    }

    #[test]
    fn test_slider_stops_at_blockers() {
        let rook = Piece::new(PieceKind::Rook, sq(0, 0), Team::White);
        let own = Piece::new(PieceKind::Pawn, sq(0, 2), Team::White);
        let enemy = Piece::new(PieceKind::Knight, sq(3, 0), Team::Black);
        let position = Position::from_pieces(vec![rook, own, enemy], Team::White).unwrap();

        let moves = moves_for(&rook, &position);
        assert_eq!(ends(&moves), vec![sq(0, 1), sq(1, 0), sq(2, 0), sq(3, 0)]);

        let capture = moves.iter().find(|m| m.end == sq(3, 0)).unwrap();
        assert!(capture.is_capture);
        assert_eq!(capture.captured, Some(enemy));
        assert!(moves.iter().filter(|m| m.is_capture).count() == 1);
    }

    #[test]
    fn test_pawn_home_rank_double_step() {
        let (position, pawn) = lone(PieceKind::Pawn, sq(1, 4));
        assert_eq!(ends(&moves_for(&pawn, &position)), vec![sq(2, 4), sq(3, 4)]);
    }

    #[test]
    fn test_pawn_double_step_blocked_by_intermediate() {
        for team in Team::ALL {
            let pawn = Piece::new(PieceKind::Pawn, sq(1, 4), Team::White);
            let blocker = Piece::new(PieceKind::Knight, sq(2, 4), team);
            let position = Position::from_pieces(vec![pawn, blocker], Team::White).unwrap();
            assert!(moves_for(&pawn, &position).is_empty());
        }
    }

    #[test]
    fn test_black_pawn_moves_down() {
        let pawn = Piece::new(PieceKind::Pawn, sq(6, 2), Team::Black);
        let position = Position::from_pieces(vec![pawn], Team::Black).unwrap();
        assert_eq!(ends(&moves_for(&pawn, &position)), vec![sq(4, 2), sq(5, 2)]);
    }

    #[test]
    fn test_pawn_off_home_rank_single_step() {
        let (position, pawn) = lone(PieceKind::Pawn, sq(3, 4));
        assert_eq!(ends(&moves_for(&pawn, &position)), vec![sq(4, 4)]);

        // A white pawn on black's home rank must not double-step
        let (position, pawn) = lone(PieceKind::Pawn, sq(6, 4));
        assert_eq!(ends(&moves_for(&pawn, &position)), vec![sq(7, 4)]);
    }

    #[test]
    fn test_pawn_diagonals_capture_only() {
        let pawn = Piece::new(PieceKind::Pawn, sq(3, 3), Team::White);
        let enemy = Piece::new(PieceKind::Rook, sq(4, 4), Team::Black);
        let friend = Piece::new(PieceKind::Rook, sq(4, 2), Team::White);
        let position = Position::from_pieces(vec![pawn, enemy, friend], Team::White).unwrap();

        let moves = moves_for(&pawn, &position);
        assert_eq!(ends(&moves), vec![sq(4, 3), sq(4, 4)]);
        assert!(moves.iter().any(|m| m.end == sq(4, 4) && m.is_capture));
    }

    #[test]
    fn test_moves_stay_on_board() {
        let position = Position::standard();
        for team in Team::ALL {
            for (_, mv) in team_moves(&position, team) {
                assert!((0..8).contains(&mv.end.rank()) && (0..8).contains(&mv.end.file()));
                assert!((0..8).contains(&mv.start.rank()) && (0..8).contains(&mv.start.file()));
            }
        }
    }

    #[test]
    fn test_start_position_mobility() {
        let position = Position::standard();
        assert_eq!(mobility(&position, Team::White), 20);
        assert_eq!(mobility(&position, Team::Black), 20);
    }

    #[test]
    fn test_move_equality_is_structural() {
        let piece = Piece::new(PieceKind::Queen, sq(0, 0), Team::White);
        let a = Move {
            piece,
            start: sq(0, 0),
            end: sq(0, 5),
            heuristic: 30,
            is_capture: false,
            captured: None,
        };
        let b = Move { heuristic: 999, ..a };
        let c = Move { is_capture: true, ..a };
        assert_eq!(a, b);
        assert_ne!(a, c);

        let set: FxHashSet<Move> = [a, b, c].into_iter().collect();
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn test_move_ordering() {
        let king_capture = heuristic(PieceKind::Pawn, Some(PieceKind::King));
        let queen_capture = heuristic(PieceKind::Pawn, Some(PieceKind::Queen));
        let pawn_by_king = heuristic(PieceKind::King, Some(PieceKind::Pawn));
        let pawn_by_pawn = heuristic(PieceKind::Pawn, Some(PieceKind::Pawn));
        let best_quiet = PieceKind::ALL.iter().map(|k| heuristic(*k, None)).max().unwrap();

        assert!(king_capture > queen_capture);
        assert!(queen_capture > pawn_by_pawn);
        assert!(pawn_by_pawn > pawn_by_king);
        assert!(pawn_by_king > best_quiet);
    }
}
