//! CPU-based Minimax AI with alpha-beta pruning
//!
//! The search is single-threaded and recursive. Every child node works on
//! its own [`Position::fork`], so sibling branches never observe each
//! other's moves. There is no time limit; depth is the only throttle.

use crate::config::EngineConfig;
use crate::error::{ChessError, Result};
use crate::eval::{evaluate, Heuristics};
use crate::movegen::{team_moves, Move};
use crate::pieces::{Piece, Team};
use crate::position::{MoveOutcome, Position};
use crate::replay::SnapshotSink;
use serde::Serialize;

// ============================================================================
// CONSTANTS
// ============================================================================

/// Score of a won game (stands in for +infinity)
pub const WIN_SCORE: i32 = i32::MAX;

// ============================================================================
// SEARCH RESULT
// ============================================================================

/// Best line found by a search
#[derive(Clone, Copy, Debug, Serialize)]
pub struct SearchOutcome {
    /// Score from the searching team's perspective
    pub score: i32,
    /// Piece to move, None at a terminal root or when there is no move
    pub piece: Option<Piece>,
    pub mv: Option<Move>,
    /// Nodes visited, root included
    pub nodes_explored: u64,
}

// ============================================================================
// ALPHA-BETA AI
// ============================================================================

/// Alpha-Beta AI player
#[derive(Clone, Debug)]
pub struct AlphaBetaAI {
    pub depth: u32,
    pub heuristics: Heuristics,
    /// Disable to run plain minimax over the same tree
    pub pruning: bool,
}

impl AlphaBetaAI {
    pub fn new(depth: u32, heuristics: Heuristics) -> Self {
        Self {
            depth,
            heuristics,
            pruning: true,
        }
    }

    pub fn from_config(config: &EngineConfig) -> Self {
        Self::new(config.depth, config.heuristics.clone())
    }

    /// Same search without the alpha-beta cutoffs
    pub fn without_pruning(mut self) -> Self {
        self.pruning = false;
        self
    }

    /// Search `depth` plies with `team` to move and maximizing.
    ///
    /// Callers check `position.game_over()` first; a finished position
    /// just returns its terminal score.
    pub fn search(&self, position: &Position, depth: u32, team: Team) -> Result<SearchOutcome> {
        self.run(position, depth, team, None)
    }

    /// Like [`search`](Self::search), appending every explored node to `log`
    pub fn search_logged(
        &self,
        position: &Position,
        depth: u32,
        team: Team,
        log: &mut dyn SnapshotSink,
    ) -> Result<SearchOutcome> {
        self.run(position, depth, team, Some(log))
    }

    /// Get best move for the side to move at the configured depth
    pub fn best_move(&self, position: &Position) -> Result<Option<Move>> {
        let outcome = self.search(position, self.depth, position.current_player())?;
        Ok(outcome.mv)
    }

    /// Play until a king falls or `max_moves` moves were made
    pub fn play_game(&self, initial: Position, max_moves: usize) -> Result<(Position, Vec<Move>)> {
        let mut position = initial;
        let mut moves = Vec::new();

        while !position.game_over() && moves.len() < max_moves {
            let Some(mv) = self.best_move(&position)? else {
                break;
            };
            if let MoveOutcome::Rejected = position.apply_move(mv.start, mv.end)? {
                return Err(ChessError::UnexpectedRejection {
                    start: mv.start,
                    end: mv.end,
                });
            }
            moves.push(mv);
        }

        Ok((position, moves))
    }

    /// Evaluate a position for `team`
    pub fn evaluate(&self, position: &Position, team: Team) -> i32 {
        evaluate(position, team, &self.heuristics)
    }

    fn run(
        &self,
        position: &Position,
        depth: u32,
        team: Team,
        log: Option<&mut dyn SnapshotSink>,
    ) -> Result<SearchOutcome> {
        let mut search = Search {
            maximizing: team,
            heuristics: &self.heuristics,
            pruning: self.pruning,
            nodes: 0,
            log,
        };

        let node = search.node(position, depth, team, -WIN_SCORE, WIN_SCORE)?;

        tracing::debug!(
            depth,
            team = %team,
            score = node.score,
            nodes = search.nodes,
            "search finished"
        );

        Ok(SearchOutcome {
            score: node.score,
            piece: node.best.map(|(piece, _)| piece),
            mv: node.best.map(|(_, mv)| mv),
            nodes_explored: search.nodes,
        })
    }
}

// ============================================================================
// MINIMAX WITH ALPHA-BETA
// ============================================================================

struct Node {
    score: i32,
    best: Option<(Piece, Move)>,
}

impl Node {
    fn leaf(score: i32) -> Self {
        Self { score, best: None }
    }
}

struct Search<'a, 'l> {
    maximizing: Team,
    heuristics: &'a Heuristics,
    pruning: bool,
    nodes: u64,
    log: Option<&'l mut dyn SnapshotSink>,
}

impl Search<'_, '_> {
    fn node(
        &mut self,
        position: &Position,
        depth: u32,
        to_move: Team,
        mut alpha: i32,
        mut beta: i32,
    ) -> Result<Node> {
        self.nodes += 1;
        if let Some(log) = self.log.as_deref_mut() {
            log.append(position)?;
        }

        // Terminal check
        if position.game_over() {
            return Ok(Node::leaf(match position.winner() {
                Some(winner) if winner == self.maximizing => WIN_SCORE,
                _ => -WIN_SCORE,
            }));
        }

        // Depth limit
        if depth == 0 {
            return Ok(Node::leaf(self.static_score(position)));
        }

        let mut moves = team_moves(position, to_move);
        if moves.is_empty() {
            return Ok(Node::leaf(self.static_score(position)));
        }

        // Sort moves by heuristic (descending, stable)
        moves.sort_by(|(_, a), (_, b)| b.heuristic.cmp(&a.heuristic));

        let maximizing = to_move == self.maximizing;
        let mut best_score = if maximizing { -WIN_SCORE } else { WIN_SCORE };
        let mut best = None;

        for (piece, mv) in moves {
            let mut child = position.fork();
            if let MoveOutcome::Rejected = child.apply_move(mv.start, mv.end)? {
                return Err(ChessError::UnexpectedRejection {
                    start: mv.start,
                    end: mv.end,
                });
            }

            let score = self
                .node(&child, depth - 1, to_move.opponent(), alpha, beta)?
                .score;

            // Equal scores keep the earlier move
            let improves = best.is_none()
                || (maximizing && score > best_score)
                || (!maximizing && score < best_score);
            if improves {
                best_score = score;
                best = Some((piece, mv));
            }

            if maximizing {
                alpha = alpha.max(best_score);
            } else {
                beta = beta.min(best_score);
            }

            if self.pruning && alpha >= beta {
                break;
            }
        }

        Ok(Node {
            score: best_score,
            best,
        })
    }

    fn static_score(&self, position: &Position) -> i32 {
        evaluate(position, self.maximizing, self.heuristics)
    }
}

// ============================================================================
// TESTS
// ============================================================================
