//! Computer strategy trait and the three difficulty tiers.

use rand::rngs::StdRng;
use rand::seq::SliceRandom;

use crate::engine::board::Board;
use crate::engine::minimax::minimax_search;
use crate::engine::models::{Difficulty, Player, Position};

/// A strategy picks an empty cell for `computer` on the given board.
///
/// Returns `None` only when the board has no empty cell, which callers are
/// expected to rule out beforehand.
pub trait ComputerStrategy: Send + Sync {
    fn name(&self) -> &str;

    fn choose(&self, board: &Board, computer: Player, rng: &mut StdRng) -> Option<Position>;
}

/// Easy: the first empty cell in row-major order. Fully deterministic.
pub struct FirstEmptyStrategy;

impl ComputerStrategy for FirstEmptyStrategy {
    fn name(&self) -> &str {
        "first_empty"
    }

    fn choose(&self, board: &Board, _computer: Player, _rng: &mut StdRng) -> Option<Position> {
        Position::all().find(|p| board.is_empty_at(*p))
    }
}

/// Medium: win if possible, otherwise block the opponent's immediate win,
/// otherwise a uniformly random empty cell.
pub struct WinOrBlockStrategy;

/// First empty cell (row-major) where `player` would complete a line.
fn winning_cell(board: &Board, player: Player) -> Option<Position> {
    let mut scratch = *board;
    for pos in Position::all() {
        if !scratch.is_empty_at(pos) {
            continue;
        }
        scratch.set(pos.row, pos.col, player);
        let wins = scratch.has_won(player);
        scratch.clear(pos.row, pos.col);
        if wins {
            return Some(pos);
        }
    }
    None
}

impl ComputerStrategy for WinOrBlockStrategy {
    fn name(&self) -> &str {
        "win_or_block"
    }

    fn choose(&self, board: &Board, computer: Player, rng: &mut StdRng) -> Option<Position> {
        if let Some(pos) = winning_cell(board, computer) {
            tracing::debug!(%pos, "win_or_block: winning move");
            return Some(pos);
        }
        // The caller places the computer's own mark here, so the block never
        // leaves the opponent's trial mark behind.
        if let Some(pos) = winning_cell(board, computer.opponent()) {
            tracing::debug!(%pos, "win_or_block: blocking move");
            return Some(pos);
        }
        board.empty_cells().choose(rng).copied()
    }
}

/// Hard: full minimax search.
pub struct MinimaxStrategy;

impl ComputerStrategy for MinimaxStrategy {
    fn name(&self) -> &str {
        "minimax"
    }

    fn choose(&self, board: &Board, computer: Player, _rng: &mut StdRng) -> Option<Position> {
        minimax_search(board, computer).best
    }
}

static FIRST_EMPTY: FirstEmptyStrategy = FirstEmptyStrategy;
static WIN_OR_BLOCK: WinOrBlockStrategy = WinOrBlockStrategy;
static MINIMAX: MinimaxStrategy = MinimaxStrategy;

/// The strategy used for a difficulty tier.
pub fn strategy_for(difficulty: Difficulty) -> &'static dyn ComputerStrategy {
    match difficulty {
        Difficulty::Easy => &FIRST_EMPTY,
        Difficulty::Medium => &WIN_OR_BLOCK,
        Difficulty::Hard => &MINIMAX,
    }
}
