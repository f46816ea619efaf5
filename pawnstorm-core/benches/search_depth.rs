//! Alpha-Beta vs plain minimax benchmark
//!
//! Compares, per depth:
//! 1. Time to find a move
//! 2. Nodes explored with and without cutoffs

use pawnstorm_core::{AlphaBetaAI, Heuristics, Piece, PieceKind, Position, Square, Team};
use std::time::Instant;

// ============================================================================
// TEST POSITIONS
// ============================================================================

fn sq(rank: i8, file: i8) -> Square {
    Square::new(rank, file).expect("bench squares are on the board")
}

/// Sparse endgame: king, rook and pawns per side
fn test_position_endgame() -> Position {
    let pieces = vec![
        Piece::new(PieceKind::King, sq(0, 4), Team::White),
        Piece::new(PieceKind::Rook, sq(0, 0), Team::White),
        Piece::new(PieceKind::Pawn, sq(1, 3), Team::White),
        Piece::new(PieceKind::Pawn, sq(2, 6), Team::White),
        Piece::new(PieceKind::King, sq(7, 4), Team::Black),
        Piece::new(PieceKind::Rook, sq(7, 7), Team::Black),
        Piece::new(PieceKind::Pawn, sq(6, 5), Team::Black),
        Piece::new(PieceKind::Pawn, sq(5, 1), Team::Black),
    ];
    Position::from_pieces(pieces, Team::White).expect("bench position is valid")
}

// ============================================================================
// BENCHMARK STRUCTURES
// ============================================================================

#[derive(Clone, Debug)]
struct BenchmarkResult {
    position: &'static str,
    depth: u32,
    pruning: bool,
    nodes: u64,
    elapsed_ms: f64,
}

impl BenchmarkResult {
    fn to_table_row(&self) -> String {
        let mode = if self.pruning { "alpha-beta" } else { "minimax" };
        format!(
            "| {:<10} | {:>5} | {:<10} | {:>12} | {:>10.1}ms |",
            self.position, self.depth, mode, self.nodes, self.elapsed_ms
        )
    }
}

// ============================================================================
// BENCHMARKS
// ============================================================================

fn benchmark_search(
    position_name: &'static str,
    position: &Position,
    depths: &[u32],
    results: &mut Vec<BenchmarkResult>,
) {
    println!("\n=== SEARCH BENCHMARK: {} ===", position_name);

    for &depth in depths {
        for pruning in [true, false] {
            let mut ai = AlphaBetaAI::new(depth, Heuristics::default());
            if !pruning {
                ai = ai.without_pruning();
            }

            let start = Instant::now();
            let outcome = ai
                .search(position, depth, position.current_player())
                .expect("search on a valid position");
            let elapsed_ms = start.elapsed().as_secs_f64() * 1000.0;

            println!(
                "  depth {} {:<10} {:>10} nodes {:>10.1}ms",
                depth,
                if pruning { "alpha-beta" } else { "minimax" },
                outcome.nodes_explored,
                elapsed_ms
            );

            results.push(BenchmarkResult {
                position: position_name,
                depth,
                pruning,
                nodes: outcome.nodes_explored,
                elapsed_ms,
            });
        }
    }
}

// ============================================================================
// MAIN
// ============================================================================

fn main() {
    let mut results = Vec::new();

    benchmark_search("standard", &Position::standard(), &[1, 2, 3], &mut results);
    benchmark_search("endgame", &test_position_endgame(), &[1, 2, 3, 4], &mut results);

    println!("\n| Position   | Depth | Mode       |        Nodes |       Time |");
    println!("|------------|-------|------------|--------------|------------|");
    for result in &results {
        println!("{}", result.to_table_row());
    }

    println!("\nCutoff savings:");
    for pair in results.chunks(2) {
        if let [pruned, plain] = pair {
            let ratio = plain.nodes as f64 / pruned.nodes.max(1) as f64;
            println!(
                "  {} D{}: {:.1}x fewer nodes with alpha-beta",
                pruned.position, pruned.depth, ratio
            );
        }
    }
}
