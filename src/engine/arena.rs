//! Strategy-vs-strategy arena runner and exhaustive opponent search.

use std::collections::HashMap;
use std::time::Instant;

use rand::rngs::StdRng;
use rand::SeedableRng;
use rayon::prelude::*;

use crate::engine::board::Board;
use crate::engine::bot_strategy::ComputerStrategy;
use crate::engine::models::{Outcome, Player};

/// A named strategy taking part in an arena run.
#[derive(Clone, Copy)]
pub struct Contestant<'a> {
    pub name: &'a str,
    pub strategy: &'a dyn ComputerStrategy,
}

/// Aggregated results from an arena run.
pub struct ArenaResult {
    pub num_games: usize,
    pub wins: HashMap<String, usize>,
    pub draws: usize,
    pub game_lengths: Vec<usize>,
    pub game_durations_ms: Vec<f64>,
}

impl ArenaResult {
    pub fn win_rate(&self, name: &str) -> f64 {
        *self.wins.get(name).unwrap_or(&0) as f64 / self.num_games.max(1) as f64
    }

    pub fn avg_moves(&self) -> f64 {
        if self.game_lengths.is_empty() {
            return 0.0;
        }
        self.game_lengths.iter().sum::<usize>() as f64 / self.game_lengths.len() as f64
    }

    /// Wilson score interval for the win rate.
    pub fn confidence_interval_95(&self, name: &str) -> (f64, f64) {
        let n = self.num_games;
        if n == 0 {
            return (0.0, 0.0);
        }
        let p = self.win_rate(name);
        let z = 1.96_f64;
        let denom = 1.0 + z * z / n as f64;
        let center = (p + z * z / (2.0 * n as f64)) / denom;
        let margin = z * ((p * (1.0 - p) + z * z / (4.0 * n as f64)) / n as f64).sqrt() / denom;
        ((center - margin).max(0.0), (center + margin).min(1.0))
    }

    pub fn summary(&self) -> String {
        let mut lines = vec![format!("Arena Results ({} games)", self.num_games)];
        lines.push("=".repeat(60));
        let mut names: Vec<&String> = self.wins.keys().collect();
        names.sort();
        for name in names {
            let wr = self.win_rate(name);
            let (ci_lo, ci_hi) = self.confidence_interval_95(name);
            lines.push(format!(
                "  {:>12}: {:3} wins ({:5.1}%)  [95% CI: {:.1}%-{:.1}%]",
                name,
                self.wins[name],
                wr * 100.0,
                ci_lo * 100.0,
                ci_hi * 100.0,
            ));
        }
        lines.push(format!("  {:>12}: {}", "Draws", self.draws));
        lines.push(format!("  Avg moves per game: {:.1}", self.avg_moves()));
        if !self.game_durations_ms.is_empty() {
            let avg_ms = self.game_durations_ms.iter().sum::<f64>() / self.game_durations_ms.len() as f64;
            let total_s = self.game_durations_ms.iter().sum::<f64>() / 1000.0;
            lines.push(format!("  Avg game: {:.2}ms  |  Total: {:.2}s", avg_ms, total_s));
        }
        lines.join("\n")
    }
}

/// Run `num_games` between two strategies and return aggregated stats.
///
/// `first` plays X in even games; with `alternate_seats` the seats swap on
/// odd games, otherwise `first` is always X. Game `i` is seeded with
/// `base_seed + i`, wrapping at `u64::MAX`.
pub fn run_arena(
    first: Contestant<'_>,
    second: Contestant<'_>,
    num_games: usize,
    base_seed: u64,
    alternate_seats: bool,
    progress_callback: Option<&dyn Fn(usize, usize)>,
) -> ArenaResult {
    assert_ne!(first.name, second.name, "contestant names must differ");

    let mut result = ArenaResult {
        num_games,
        wins: [(first.name.to_string(), 0), (second.name.to_string(), 0)]
            .into_iter()
            .collect(),
        draws: 0,
        game_lengths: Vec::with_capacity(num_games),
        game_durations_ms: Vec::with_capacity(num_games),
    };

    for game_idx in 0..num_games {
        let seed = base_seed.wrapping_add(game_idx as u64);
        let (x, o) = if alternate_seats && game_idx % 2 == 1 {
            (second, first)
        } else {
            (first, second)
        };

        let t0 = Instant::now();
        let (outcome, moves) = play_one_game(x.strategy, o.strategy, seed);
        result.game_durations_ms.push(t0.elapsed().as_secs_f64() * 1000.0);
        result.game_lengths.push(moves);

        match outcome {
            Outcome::Win(Player::X) => *result.wins.entry(x.name.to_string()).or_default() += 1,
            Outcome::Win(Player::O) => *result.wins.entry(o.name.to_string()).or_default() += 1,
            _ => result.draws += 1,
        }
        tracing::debug!(game = game_idx, x = x.name, o = o.name, ?outcome, moves, "arena game finished");

        if let Some(cb) = progress_callback {
            cb(game_idx + 1, num_games);
        }
    }

    result
}

/// Play one game from an empty board, X first. Returns the outcome and the
/// number of moves made.
pub fn play_one_game(
    x: &dyn ComputerStrategy,
    o: &dyn ComputerStrategy,
    seed: u64,
) -> (Outcome, usize) {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut board = Board::new();
    let mut mover = Player::X;
    let mut moves = 0;

    loop {
        let strategy = match mover {
            Player::X => x,
            Player::O => o,
        };
        let Some(pos) = strategy.choose(&board, mover, &mut rng) else {
            return (board.outcome(), moves);
        };
        board.set(pos.row, pos.col, mover);
        moves += 1;

        if board.has_won(mover) {
            return (Outcome::Win(mover), moves);
        }
        if board.is_full() {
            return (Outcome::Draw, moves);
        }
        mover = mover.opponent();
    }
}

/// Tally of finished games from the computer's point of view.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct OutcomeCounts {
    pub computer_wins: u64,
    pub opponent_wins: u64,
    pub draws: u64,
}

impl OutcomeCounts {
    pub fn games(&self) -> u64 {
        self.computer_wins + self.opponent_wins + self.draws
    }

    fn record(&mut self, outcome: Outcome, computer: Player) {
        match outcome {
            Outcome::Win(p) if p == computer => self.computer_wins += 1,
            Outcome::Win(_) => self.opponent_wins += 1,
            Outcome::Draw => self.draws += 1,
            Outcome::InProgress => {}
        }
    }

    fn merge(self, other: OutcomeCounts) -> OutcomeCounts {
        OutcomeCounts {
            computer_wins: self.computer_wins + other.computer_wins,
            opponent_wins: self.opponent_wins + other.opponent_wins,
            draws: self.draws + other.draws,
        }
    }
}

/// Play `strategy` as `computer` against every possible opponent move
/// sequence and count the results. The opponent's first-ply branches run
/// in parallel; branch `i` gets its own generator seeded `seed + i + 1`.
pub fn exhaustive_outcomes(
    strategy: &dyn ComputerStrategy,
    computer: Player,
    seed: u64,
) -> OutcomeCounts {
    let mut board = Board::new();
    let opponent = computer.opponent();

    if computer == Player::X {
        let mut rng = StdRng::seed_from_u64(seed);
        match strategy.choose(&board, computer, &mut rng) {
            Some(pos) => board.set(pos.row, pos.col, computer),
            None => return OutcomeCounts::default(),
        }
    }

    let counts = board
        .empty_cells()
        .into_par_iter()
        .enumerate()
        .map(|(i, pos)| {
            let mut branch = board;
            branch.set(pos.row, pos.col, opponent);
            let mut rng = StdRng::seed_from_u64(seed.wrapping_add(i as u64 + 1));
            let mut counts = OutcomeCounts::default();
            explore(&branch, opponent, computer, strategy, &mut rng, &mut counts);
            counts
        })
        .reduce(OutcomeCounts::default, OutcomeCounts::merge);

    tracing::info!(
        strategy = strategy.name(),
        %computer,
        games = counts.games(),
        computer_wins = counts.computer_wins,
        opponent_wins = counts.opponent_wins,
        draws = counts.draws,
        "exhaustive run finished"
    );
    counts
}

fn explore(
    board: &Board,
    last_mover: Player,
    computer: Player,
    strategy: &dyn ComputerStrategy,
    rng: &mut StdRng,
    counts: &mut OutcomeCounts,
) {
    if board.has_won(last_mover) {
        counts.record(Outcome::Win(last_mover), computer);
        return;
    }
    if board.is_full() {
        counts.record(Outcome::Draw, computer);
        return;
    }

    let mover = last_mover.opponent();
    if mover == computer {
        if let Some(pos) = strategy.choose(board, computer, rng) {
            let mut next = *board;
            next.set(pos.row, pos.col, computer);
            explore(&next, computer, computer, strategy, rng, counts);
        }
        return;
    }

    for pos in board.empty_cells() {
        let mut next = *board;
        next.set(pos.row, pos.col, mover);
        explore(&next, mover, computer, strategy, rng, counts);
    }
}
