//! End-to-end engine scenarios as seen from a presentation layer.

use tictactoe_engine::{
    Board, Cell, Difficulty, GameEngine, GameMode, MoveError, MoveOutcome, Outcome, Player,
    Position, ScoreBoard, Status,
};

fn play_all(engine: &mut GameEngine, moves: &[(usize, usize)]) -> Vec<Result<MoveOutcome, MoveError>> {
    moves.iter().map(|&(r, c)| engine.apply_human_move(r, c)).collect()
}

#[test]
fn multiplayer_top_row_win_for_x() {
    let mut engine = GameEngine::new(GameMode::Multiplayer, Difficulty::Easy);
    let results = play_all(&mut engine, &[(0, 0), (2, 0), (0, 1), (2, 2), (0, 2)]);

    assert_eq!(results[..4], [Ok(MoveOutcome::Continue); 4]);
    assert_eq!(results[4], Ok(MoveOutcome::Decided(Outcome::Win(Player::X))));
    assert_eq!(engine.scores().x_wins, 1);
    assert_eq!(engine.scores().o_wins, 0);
    assert!(engine.is_locked());
    assert_eq!(engine.status().to_string(), "X Wins!");
}

#[test]
fn multiplayer_o_can_win_too() {
    let mut engine = GameEngine::new(GameMode::Multiplayer, Difficulty::Easy);
    let results = play_all(&mut engine, &[(0, 0), (1, 0), (0, 1), (1, 1), (2, 2), (1, 2)]);

    assert_eq!(results[5], Ok(MoveOutcome::Decided(Outcome::Win(Player::O))));
    assert_eq!(engine.scores(), ScoreBoard { x_wins: 0, o_wins: 1, draws: 0 });
    assert_eq!(engine.status(), Status::Wins(Player::O));
}

#[test]
fn single_player_easy_replies_first_empty() {
    let mut engine = GameEngine::new(GameMode::SinglePlayer, Difficulty::Easy);
    assert_eq!(engine.apply_human_move(0, 0), Ok(MoveOutcome::Continue));
    assert_eq!(engine.cell(0, 0), Cell::X);
    assert_eq!(engine.cell(0, 1), Cell::O);
    assert_eq!(engine.last_computer_move(), Some(Position::new(0, 1)));

    // Human is always X in single player, whatever the turn field says.
    assert_eq!(engine.apply_human_move(2, 2), Ok(MoveOutcome::Continue));
    assert_eq!(engine.cell(2, 2), Cell::X);
    assert_eq!(engine.cell(0, 2), Cell::O);
}

#[test]
fn single_player_occupied_click_is_ignored() {
    let mut engine = GameEngine::new(GameMode::SinglePlayer, Difficulty::Easy);
    engine.apply_human_move(1, 1).unwrap();
    let board = *engine.board();
    assert_eq!(
        engine.apply_human_move(0, 0),
        Err(MoveError::CellOccupied { row: 0, col: 0 })
    );
    assert_eq!(*engine.board(), board);
}

#[test]
fn reset_round_after_decided_game() {
    let mut engine = GameEngine::new(GameMode::Multiplayer, Difficulty::Easy);
    play_all(&mut engine, &[(0, 0), (2, 0), (0, 1), (2, 2), (0, 2)]);
    let before = engine.scores();

    engine.reset_round();

    for pos in Position::all() {
        assert_eq!(engine.cell(pos.row, pos.col), Cell::Empty);
    }
    assert!(!engine.is_locked());
    assert_eq!(engine.scores(), before);
    assert_eq!(engine.apply_human_move(1, 1), Ok(MoveOutcome::Continue));
}

#[test]
fn set_same_mode_clears_in_progress_board_only() {
    let mut engine = GameEngine::new(GameMode::Multiplayer, Difficulty::Easy);
    play_all(&mut engine, &[(0, 0), (2, 0), (0, 1), (2, 2), (0, 2)]);
    engine.reset_round();
    engine.apply_human_move(1, 1).unwrap();
    let scores = engine.scores();

    engine.set_mode(GameMode::Multiplayer);

    assert_eq!(*engine.board(), Board::new());
    assert_eq!(engine.scores(), scores);
    assert_eq!(engine.current_turn(), Player::X);
}

#[test]
fn mode_switch_mid_round_discards_without_scoring() {
    let mut engine = GameEngine::new(GameMode::SinglePlayer, Difficulty::Hard);
    engine.apply_human_move(1, 1).unwrap();
    engine.set_mode(GameMode::Multiplayer);
    assert_eq!(engine.scores().games_played(), 0);
    assert_eq!(engine.board().occupied_count(), 0);
    assert_eq!(engine.status(), Status::Turn(Player::X));
}

#[test]
fn scores_accumulate_across_rounds_until_reset_all() {
    let mut engine = GameEngine::new(GameMode::Multiplayer, Difficulty::Easy);
    for _ in 0..3 {
        play_all(&mut engine, &[(0, 0), (2, 0), (0, 1), (2, 2), (0, 2)]);
        engine.reset_round();
    }
    assert_eq!(engine.scores().x_wins, 3);
    assert_eq!(engine.scores().to_string(), "X Wins: 3 | O Wins: 0 | Draws: 0");

    engine.reset_all();
    assert_eq!(engine.scores(), ScoreBoard::default());
}

#[test]
fn hard_computer_never_loses_to_corner_opening() {
    let mut engine = GameEngine::with_seed(GameMode::SinglePlayer, Difficulty::Hard, 5);
    // Human tries the classic corner trap; Hard answers in the centre.
    engine.apply_human_move(0, 0).unwrap();
    assert_eq!(engine.last_computer_move(), Some(Position::new(1, 1)));
    engine.apply_human_move(2, 2).unwrap();
    let reply = engine.last_computer_move().unwrap();
    assert!(
        [(0, 1), (1, 0), (1, 2), (2, 1)].contains(&(reply.row, reply.col)),
        "expected an edge reply, got {}",
        reply
    );
}

#[test]
fn single_player_round_always_terminates() {
    for difficulty in Difficulty::ALL {
        let mut engine = GameEngine::with_seed(GameMode::SinglePlayer, difficulty, 11);
        let mut calls = 0;
        while !engine.is_locked() {
            let pos = engine.board().empty_cells()[0];
            engine.apply_human_move(pos.row, pos.col).unwrap();
            calls += 1;
            assert!(calls <= 5, "{} round did not finish", difficulty);
        }
        assert_eq!(engine.scores().games_played(), 1);
        assert!(engine.outcome().is_terminal());
    }
}
