//! The 3x3 board: nine cells plus win/draw detection.
//!
//! The board does not enforce "no overwrite". That rule belongs to the
//! engine, and the search strategies rely on writing and clearing trial
//! marks on a scratch copy.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::engine::models::{Cell, Outcome, Player, Position, BOARD_SIZE};

const WIN_LINES: [[usize; 3]; 8] = [
    [0, 1, 2], [3, 4, 5], [6, 7, 8], // rows
    [0, 3, 6], [1, 4, 7], [2, 5, 8], // cols
    [0, 4, 8], [2, 4, 6],             // diagonals
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Board {
    cells: [Cell; BOARD_SIZE * BOARD_SIZE],
}

fn index(row: usize, col: usize) -> usize {
    assert!(
        row < BOARD_SIZE && col < BOARD_SIZE,
        "board coordinates ({}, {}) out of range",
        row,
        col
    );
    row * BOARD_SIZE + col
}

impl Board {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, row: usize, col: usize) -> Cell {
        self.cells[index(row, col)]
    }

    pub fn at(&self, pos: Position) -> Cell {
        self.get(pos.row, pos.col)
    }

    /// Write `player`'s mark, overwriting whatever was there.
    pub fn set(&mut self, row: usize, col: usize, player: Player) {
        self.cells[index(row, col)] = player.mark();
    }

    pub fn clear(&mut self, row: usize, col: usize) {
        self.cells[index(row, col)] = Cell::Empty;
    }

    /// Clear all nine cells.
    pub fn reset(&mut self) {
        self.cells = [Cell::Empty; BOARD_SIZE * BOARD_SIZE];
    }

    pub fn is_empty_at(&self, pos: Position) -> bool {
        self.at(pos) == Cell::Empty
    }

    pub fn is_full(&self) -> bool {
        self.cells.iter().all(|c| *c != Cell::Empty)
    }

    pub fn occupied_count(&self) -> usize {
        self.cells.iter().filter(|c| **c != Cell::Empty).count()
    }

    /// Empty cells in row-major order.
    pub fn empty_cells(&self) -> Vec<Position> {
        Position::all().filter(|p| self.is_empty_at(*p)).collect()
    }

    pub fn cells(&self) -> &[Cell; BOARD_SIZE * BOARD_SIZE] {
        &self.cells
    }

    /// True if `player` occupies any complete row, column or diagonal.
    pub fn has_won(&self, player: Player) -> bool {
        let mark = player.mark();
        WIN_LINES
            .iter()
            .any(|line| line.iter().all(|&i| self.cells[i] == mark))
    }

    /// The player holding a complete line. X is checked before O; a board
    /// where both hold a line is not reachable through legal play.
    pub fn winner(&self) -> Option<Player> {
        [Player::X, Player::O].into_iter().find(|p| self.has_won(*p))
    }

    pub fn outcome(&self) -> Outcome {
        match self.winner() {
            Some(p) => Outcome::Win(p),
            None if self.is_full() => Outcome::Draw,
            None => Outcome::InProgress,
        }
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in 0..BOARD_SIZE {
            let line: String = (0..BOARD_SIZE)
                .map(|col| self.get(row, col).to_char())
                .collect();
            if row + 1 < BOARD_SIZE {
                writeln!(f, "{}", line)?;
            } else {
                write!(f, "{}", line)?;
            }
        }
        Ok(())
    }
}
