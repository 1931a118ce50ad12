//! Exhaustive minimax search over the remaining empty cells.
//!
//! No pruning and no memoization: the 3x3 tree is small enough that a plain
//! depth-first walk finishes well under a millisecond in release builds.
//! Trial marks are written to a scratch copy of the board and cleared again
//! on the way back up.

use std::time::Instant;

use crate::engine::board::Board;
use crate::engine::models::{Player, Position};

/// Base value of a won position; the depth is subtracted so quicker wins
/// score higher and slower losses score less negative.
pub const WIN_SCORE: i32 = 10;

/// Best root move found by [`minimax_search`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchResult {
    /// `None` only when the root position is already terminal.
    pub best: Option<Position>,
    /// Minimax value of the root from the maximizer's point of view.
    pub score: i32,
    /// Positions visited, root included.
    pub nodes: u64,
}

/// Search for the best move for `maximizer`, assuming the opponent replies
/// perfectly. Equal scores keep the first move found in row-major order.
pub fn minimax_search(board: &Board, maximizer: Player) -> SearchResult {
    let t0 = Instant::now();
    let mut scratch = *board;
    let mut nodes = 0u64;
    let (score, best) = minimax(&mut scratch, maximizer, 0, true, &mut nodes);
    debug_assert_eq!(scratch, *board, "search must restore the board");

    tracing::debug!(
        player = %maximizer,
        score,
        nodes,
        best = ?best,
        elapsed_us = t0.elapsed().as_micros() as u64,
        "minimax search finished"
    );

    SearchResult { best, score, nodes }
}

fn minimax(
    board: &mut Board,
    maximizer: Player,
    depth: i32,
    is_max: bool,
    nodes: &mut u64,
) -> (i32, Option<Position>) {
    *nodes += 1;

    if board.has_won(maximizer) {
        return (WIN_SCORE - depth, None);
    }
    if board.has_won(maximizer.opponent()) {
        return (depth - WIN_SCORE, None);
    }
    if board.is_full() {
        return (0, None);
    }

    let mover = if is_max { maximizer } else { maximizer.opponent() };
    let mut best_score = if is_max { i32::MIN } else { i32::MAX };
    let mut best_move = None;

    for pos in Position::all() {
        if !board.is_empty_at(pos) {
            continue;
        }
        board.set(pos.row, pos.col, mover);
        let (score, _) = minimax(board, maximizer, depth + 1, !is_max, nodes);
        board.clear(pos.row, pos.col);

        let better = if is_max { score > best_score } else { score < best_score };
        if better {
            best_score = score;
            best_move = Some(pos);
        }
    }

    (best_score, best_move)
}
