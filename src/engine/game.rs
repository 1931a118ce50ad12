//! The game engine: sole owner of match state.
//!
//! A presentation layer reports cell clicks through
//! [`GameEngine::apply_human_move`] and renders from the read accessors.
//! In single player the computer's reply is applied synchronously inside
//! the same call; any reveal delay belongs to the presentation layer.
//!
//! The engine is not internally synchronized. Callers on several threads
//! must serialize access themselves.

use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::Serialize;

use crate::engine::board::Board;
use crate::engine::bot_strategy::strategy_for;
use crate::engine::config::EngineConfig;
use crate::engine::error::MoveError;
use crate::engine::models::*;

/// The side the computer plays in single player. The human is always X.
pub const COMPUTER: Player = Player::O;

#[derive(Debug, Clone)]
pub struct GameEngine {
    board: Board,
    turn: Player,
    mode: GameMode,
    difficulty: Difficulty,
    scores: ScoreBoard,
    locked: bool,
    last_computer_move: Option<Position>,
    rng: StdRng,
}

/// Read-only view of the engine for serialization.
#[derive(Debug, Clone, Serialize)]
pub struct Snapshot {
    pub board: Board,
    pub mode: GameMode,
    pub difficulty: Difficulty,
    pub current_turn: Player,
    pub locked: bool,
    pub outcome: Outcome,
    pub status: String,
    pub scores: ScoreBoard,
    pub last_computer_move: Option<Position>,
}

impl GameEngine {
    /// Fresh engine with zeroed scores and an entropy-seeded generator.
    pub fn new(mode: GameMode, difficulty: Difficulty) -> Self {
        Self::with_rng(mode, difficulty, StdRng::from_entropy())
    }

    /// Fresh engine whose random choices are reproducible.
    pub fn with_seed(mode: GameMode, difficulty: Difficulty, seed: u64) -> Self {
        Self::with_rng(mode, difficulty, StdRng::seed_from_u64(seed))
    }

    pub fn with_config(config: &EngineConfig) -> Self {
        match config.computer.seed {
            Some(seed) => Self::with_seed(config.game.mode, config.game.difficulty, seed),
            None => Self::new(config.game.mode, config.game.difficulty),
        }
    }

    fn with_rng(mode: GameMode, difficulty: Difficulty, rng: StdRng) -> Self {
        Self {
            board: Board::new(),
            turn: Player::X,
            mode,
            difficulty,
            scores: ScoreBoard::default(),
            locked: false,
            last_computer_move: None,
            rng,
        }
    }

    /// Switch mode. Always starts a new round, even for the current mode;
    /// an unfinished round is discarded without scoring. Scores are kept.
    pub fn set_mode(&mut self, mode: GameMode) {
        tracing::debug!(from = ?self.mode, to = ?mode, "mode change");
        self.mode = mode;
        self.reset_round();
    }

    /// Takes effect on the next computer move.
    pub fn set_difficulty(&mut self, difficulty: Difficulty) {
        tracing::debug!(from = %self.difficulty, to = %difficulty, "difficulty change");
        self.difficulty = difficulty;
    }

    /// Clear the board, unlock it and give X the move. Scores are untouched.
    pub fn reset_round(&mut self) {
        self.board.reset();
        self.turn = Player::X;
        self.locked = false;
        self.last_computer_move = None;
    }

    /// [`reset_round`](Self::reset_round) plus zeroed scores.
    pub fn reset_all(&mut self) {
        self.reset_round();
        self.scores = ScoreBoard::default();
    }

    /// Play a human move at `(row, col)`.
    ///
    /// In multiplayer the mark is whichever player's turn it is; in single
    /// player it is X, followed by the computer's O reply when the round is
    /// still open.
    pub fn apply_human_move(&mut self, row: usize, col: usize) -> Result<MoveOutcome, MoveError> {
        let pos = Position::new(row, col);
        if !pos.in_bounds() {
            return Err(MoveError::OutOfBounds { row, col });
        }
        if self.locked {
            return Err(MoveError::BoardLocked);
        }
        if !self.board.is_empty_at(pos) {
            return Err(MoveError::CellOccupied { row, col });
        }

        self.last_computer_move = None;
        let mover = match self.mode {
            GameMode::SinglePlayer => Player::X,
            GameMode::Multiplayer => self.turn,
        };
        self.board.set(row, col, mover);
        tracing::debug!(player = %mover, %pos, "human move");

        if let Some(outcome) = self.settle(mover) {
            return Ok(MoveOutcome::Decided(outcome));
        }

        match self.mode {
            GameMode::Multiplayer => {
                self.turn = mover.opponent();
                Ok(MoveOutcome::Continue)
            }
            GameMode::SinglePlayer => self.play_computer_reply(),
        }
    }

    fn play_computer_reply(&mut self) -> Result<MoveOutcome, MoveError> {
        let strategy = strategy_for(self.difficulty);
        // Not full here: settle() already caught the draw.
        let Some(reply) = strategy.choose(&self.board, COMPUTER, &mut self.rng) else {
            return Ok(MoveOutcome::Continue);
        };
        debug_assert!(self.board.is_empty_at(reply), "strategy chose occupied {}", reply);

        self.board.set(reply.row, reply.col, COMPUTER);
        self.last_computer_move = Some(reply);
        tracing::debug!(strategy = strategy.name(), pos = %reply, "computer move");

        Ok(match self.settle(COMPUTER) {
            Some(outcome) => MoveOutcome::Decided(outcome),
            None => MoveOutcome::Continue,
        })
    }

    /// Check terminal conditions after `mover` played: win first, then full
    /// board. A terminal result locks the board and is scored exactly once.
    fn settle(&mut self, mover: Player) -> Option<Outcome> {
        let outcome = if self.board.has_won(mover) {
            Outcome::Win(mover)
        } else if self.board.is_full() {
            Outcome::Draw
        } else {
            return None;
        };

        self.locked = true;
        self.scores.record(outcome);
        tracing::info!(?outcome, scores = %self.scores, "round decided");
        Some(outcome)
    }

    pub fn cell(&self, row: usize, col: usize) -> Cell {
        self.board.get(row, col)
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn is_locked(&self) -> bool {
        self.locked
    }

    pub fn scores(&self) -> ScoreBoard {
        self.scores
    }

    /// Whose move it is. Only meaningful in multiplayer.
    pub fn current_turn(&self) -> Player {
        self.turn
    }

    pub fn mode(&self) -> GameMode {
        self.mode
    }

    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    /// Where the computer replied during the last accepted human move.
    pub fn last_computer_move(&self) -> Option<Position> {
        self.last_computer_move
    }

    pub fn outcome(&self) -> Outcome {
        self.board.outcome()
    }

    pub fn status(&self) -> Status {
        match (self.mode, self.outcome()) {
            (_, Outcome::Draw) => Status::Draw,
            (GameMode::SinglePlayer, Outcome::Win(Player::X)) => Status::YouWin,
            (GameMode::SinglePlayer, Outcome::Win(Player::O)) => Status::ComputerWins,
            (GameMode::Multiplayer, Outcome::Win(p)) => Status::Wins(p),
            (GameMode::SinglePlayer, Outcome::InProgress) => Status::YourTurn,
            (GameMode::Multiplayer, Outcome::InProgress) => Status::Turn(self.turn),
        }
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            board: self.board,
            mode: self.mode,
            difficulty: self.difficulty,
            current_turn: self.turn,
            locked: self.locked,
            outcome: self.outcome(),
            status: self.status().to_string(),
            scores: self.scores,
            last_computer_move: self.last_computer_move,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn multiplayer() -> GameEngine {
        GameEngine::with_seed(GameMode::Multiplayer, Difficulty::Easy, 1)
    }

    #[test]
    fn test_multiplayer_turns_alternate() {
        let mut engine = multiplayer();
        assert_eq!(engine.current_turn(), Player::X);
        assert_eq!(engine.apply_human_move(1, 1), Ok(MoveOutcome::Continue));
        assert_eq!(engine.cell(1, 1), Cell::X);
        assert_eq!(engine.current_turn(), Player::O);
        assert_eq!(engine.status(), Status::Turn(Player::O));
        assert_eq!(engine.apply_human_move(0, 0), Ok(MoveOutcome::Continue));
        assert_eq!(engine.cell(0, 0), Cell::O);
        assert_eq!(engine.current_turn(), Player::X);
    }

    #[test]
    fn test_occupied_cell_rejected_without_side_effects() {
        let mut engine = multiplayer();
        engine.apply_human_move(1, 1).unwrap();
        let before = engine.snapshot();
        assert_eq!(
            engine.apply_human_move(1, 1),
            Err(MoveError::CellOccupied { row: 1, col: 1 })
        );
        assert_eq!(engine.current_turn(), before.current_turn);
        assert_eq!(*engine.board(), before.board);
    }

    #[test]
    fn test_out_of_bounds_rejected() {
        let mut engine = multiplayer();
        assert_eq!(
            engine.apply_human_move(0, 3),
            Err(MoveError::OutOfBounds { row: 0, col: 3 })
        );
        assert_eq!(engine.board().occupied_count(), 0);
    }

    #[test]
    fn test_locked_board_rejects_moves() {
        let mut engine = multiplayer();
        for (r, c) in [(0, 0), (1, 0), (0, 1), (1, 1)] {
            engine.apply_human_move(r, c).unwrap();
        }
        assert_eq!(
            engine.apply_human_move(0, 2),
            Ok(MoveOutcome::Decided(Outcome::Win(Player::X)))
        );
        assert!(engine.is_locked());
        assert_eq!(engine.apply_human_move(2, 2), Err(MoveError::BoardLocked));
        // Locked takes precedence over occupied.
        assert_eq!(engine.apply_human_move(0, 0), Err(MoveError::BoardLocked));
        assert_eq!(engine.scores().x_wins, 1);
    }

    #[test]
    fn test_multiplayer_draw_is_scored_once() {
        let mut engine = multiplayer();
        // X O X / X O O / O X X
        let moves = [(0, 0), (0, 1), (0, 2), (1, 1), (1, 0), (1, 2), (2, 1), (2, 0), (2, 2)];
        let mut last = None;
        for (r, c) in moves {
            last = Some(engine.apply_human_move(r, c).unwrap());
        }
        assert_eq!(last, Some(MoveOutcome::Decided(Outcome::Draw)));
        assert!(engine.is_locked());
        assert_eq!(engine.status(), Status::Draw);
        assert_eq!(engine.scores(), ScoreBoard { x_wins: 0, o_wins: 0, draws: 1 });
    }

    #[test]
    fn test_single_player_easy_reply() {
        let mut engine = GameEngine::with_seed(GameMode::SinglePlayer, Difficulty::Easy, 1);
        assert_eq!(engine.apply_human_move(0, 0), Ok(MoveOutcome::Continue));
        assert_eq!(engine.cell(0, 1), Cell::O);
        assert_eq!(engine.last_computer_move(), Some(Position::new(0, 1)));
        assert_eq!(engine.board().occupied_count(), 2);
        assert_eq!(engine.status(), Status::YourTurn);
    }

    #[test]
    fn test_single_player_human_win_skips_reply() {
        let mut engine = GameEngine::with_seed(GameMode::SinglePlayer, Difficulty::Easy, 1);
        // Easy fills row 0 left to right, so X builds row 2.
        engine.apply_human_move(2, 0).unwrap(); // O -> (0,0)
        engine.apply_human_move(2, 1).unwrap(); // O -> (0,1)
        assert_eq!(
            engine.apply_human_move(2, 2),
            Ok(MoveOutcome::Decided(Outcome::Win(Player::X)))
        );
        assert_eq!(engine.last_computer_move(), None);
        assert_eq!(engine.board().occupied_count(), 5);
        assert_eq!(engine.status(), Status::YouWin);
    }

    #[test]
    fn test_single_player_computer_win() {
        let mut engine = GameEngine::with_seed(GameMode::SinglePlayer, Difficulty::Easy, 1);
        engine.apply_human_move(1, 0).unwrap(); // O -> (0,0)
        engine.apply_human_move(2, 0).unwrap(); // O -> (0,1)
        assert_eq!(
            engine.apply_human_move(2, 2),
            Ok(MoveOutcome::Decided(Outcome::Win(Player::O)))
        );
        assert_eq!(engine.status(), Status::ComputerWins);
        assert_eq!(engine.scores().o_wins, 1);
    }

    #[test]
    fn test_difficulty_change_applies_to_next_reply() {
        let mut engine = GameEngine::with_seed(GameMode::SinglePlayer, Difficulty::Easy, 1);
        engine.apply_human_move(0, 0).unwrap(); // Easy: O -> (0,1)
        engine.set_difficulty(Difficulty::Hard);
        assert_eq!(engine.board().occupied_count(), 2);
        // X threatens the diagonal; Hard must block at (2,2).
        engine.apply_human_move(1, 1).unwrap();
        assert_eq!(engine.last_computer_move(), Some(Position::new(2, 2)));
    }

    #[test]
    fn test_reset_round_keeps_scores() {
        let mut engine = multiplayer();
        for (r, c) in [(0, 0), (1, 0), (0, 1), (1, 1), (0, 2)] {
            engine.apply_human_move(r, c).unwrap();
        }
        let scores = engine.scores();
        engine.reset_round();
        assert!(!engine.is_locked());
        assert_eq!(*engine.board(), Board::new());
        assert_eq!(engine.current_turn(), Player::X);
        assert_eq!(engine.scores(), scores);
    }

    #[test]
    fn test_reset_all_zeroes_scores() {
        let mut engine = multiplayer();
        for (r, c) in [(0, 0), (1, 0), (0, 1), (1, 1), (0, 2)] {
            engine.apply_human_move(r, c).unwrap();
        }
        engine.reset_all();
        assert_eq!(engine.scores(), ScoreBoard::default());
        assert!(!engine.is_locked());
    }

    #[test]
    fn test_set_mode_resets_round_but_not_scores() {
        let mut engine = multiplayer();
        for (r, c) in [(0, 0), (1, 0), (0, 1), (1, 1), (0, 2)] {
            engine.apply_human_move(r, c).unwrap();
        }
        engine.set_mode(GameMode::SinglePlayer);
        assert_eq!(engine.mode(), GameMode::SinglePlayer);
        assert!(!engine.is_locked());
        assert_eq!(engine.board().occupied_count(), 0);
        assert_eq!(engine.scores().x_wins, 1);
    }

    #[test]
    fn test_set_same_mode_clears_board() {
        let mut engine = multiplayer();
        engine.apply_human_move(1, 1).unwrap();
        engine.set_mode(GameMode::Multiplayer);
        assert_eq!(engine.board().occupied_count(), 0);
        assert_eq!(engine.current_turn(), Player::X);
        assert_eq!(engine.scores(), ScoreBoard::default());
    }

    #[test]
    fn test_with_config() {
        let mut config = EngineConfig::default();
        config.game.mode = GameMode::Multiplayer;
        config.game.difficulty = Difficulty::Hard;
        config.computer.seed = Some(3);
        let engine = GameEngine::with_config(&config);
        assert_eq!(engine.mode(), GameMode::Multiplayer);
        assert_eq!(engine.difficulty(), Difficulty::Hard);
    }

    #[test]
    fn test_snapshot_serializes() {
        let mut engine = GameEngine::with_seed(GameMode::SinglePlayer, Difficulty::Easy, 1);
        engine.apply_human_move(0, 0).unwrap();
        let json = serde_json::to_value(engine.snapshot()).unwrap();
        assert_eq!(json["status"], "Your Turn (X)");
        assert_eq!(json["mode"], "single_player");
        assert_eq!(json["locked"], false);
        assert_eq!(json["last_computer_move"]["col"], 1);
    }
}
