//! Position evaluation

use crate::movegen::mobility;
use crate::pieces::{PieceKind, Team};
use crate::position::Position;
use serde::{Deserialize, Serialize};

/// Heuristic weights for position evaluation
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Heuristics {
    /// Value of each piece kind, indexed by `PieceKind::index`
    pub material: [i32; 6],
    /// Weight for mobility (move count difference)
    pub mobility_weight: i32,
}

impl Default for Heuristics {
    fn default() -> Self {
        Self {
            material: PieceKind::ALL.map(PieceKind::material),
            mobility_weight: 2,
        }
    }
}

impl Heuristics {
    pub fn value(&self, kind: PieceKind) -> i32 {
        self.material[kind.index()]
    }
}

/// Evaluate position from `team`'s perspective.
///
/// Material difference plus weighted mobility difference. Mobility runs the
/// move generator for every piece on the board, so this dominates the cost
/// of a search leaf.
pub fn evaluate(position: &Position, team: Team, heuristics: &Heuristics) -> i32 {
    let opponent = team.opponent();

    let material: i32 = position
        .pieces()
        .iter()
        .map(|piece| {
            let value = heuristics.value(piece.kind);
            if piece.team == team {
                value
            } else {
                -value
            }
        })
        .sum();

    if heuristics.mobility_weight == 0 {
        return material;
    }

    let my_mobility = mobility(position, team) as i32;
    let opp_mobility = mobility(position, opponent) as i32;

    material + heuristics.mobility_weight * (my_mobility - opp_mobility)
}
