//! Arena CLI — pit difficulty tiers against each other from the command line.
//!
//! Usage:
//!   cargo run --release --bin arena -- --games 100 --p1 hard --p2 medium
//!   cargo run --release --bin arena -- --exhaustive --p1 hard --side o

use clap::Parser;
use tracing_subscriber::EnvFilter;

use tictactoe_engine::engine::arena::{exhaustive_outcomes, run_arena, Contestant};
use tictactoe_engine::engine::bot_strategy::strategy_for;
use tictactoe_engine::{Difficulty, Player};

#[derive(Parser)]
#[command(name = "arena", about = "Run computer-vs-computer Tic-Tac-Toe experiments")]
struct Cli {
    /// Number of games to play
    #[arg(long, default_value = "100")]
    games: usize,

    /// Random seed
    #[arg(long, default_value = "42", env = "TICTACTOE_SEED")]
    seed: u64,

    /// Alternate seat positions between games
    #[arg(long, default_value_t = true, action = clap::ArgAction::Set)]
    alternate_seats: bool,

    /// P1 difficulty: easy, medium or hard
    #[arg(long, default_value = "hard")]
    p1: Difficulty,

    /// P2 difficulty: easy, medium or hard
    #[arg(long, default_value = "medium")]
    p2: Difficulty,

    /// Play P1 against every possible opponent line instead of P2
    #[arg(long)]
    exhaustive: bool,

    /// Side P1 plays in exhaustive mode: x or o
    #[arg(long, default_value = "o")]
    side: String,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("warn".parse()?))
        .init();

    let cli = Cli::parse();

    if cli.exhaustive {
        let side = match cli.side.to_ascii_lowercase().as_str() {
            "x" => Player::X,
            "o" => Player::O,
            other => return Err(format!("unknown side '{}', expected x or o", other).into()),
        };
        let counts = exhaustive_outcomes(strategy_for(cli.p1), side, cli.seed);
        println!("Exhaustive: {} as {} against every opponent line", cli.p1, side);
        println!("{}", "=".repeat(60));
        println!("  {:>14}: {}", "Lines", counts.games());
        println!("  {:>14}: {}", "Computer wins", counts.computer_wins);
        println!("  {:>14}: {}", "Opponent wins", counts.opponent_wins);
        println!("  {:>14}: {}", "Draws", counts.draws);
        return Ok(());
    }

    // Same tier on both sides still needs distinct names.
    let (p1_name, p2_name) = if cli.p1 == cli.p2 {
        (format!("{}_1", cli.p1), format!("{}_2", cli.p2))
    } else {
        (cli.p1.to_string(), cli.p2.to_string())
    };

    eprintln!(
        "Arena: {} games, seed={}, alternate_seats={}",
        cli.games, cli.seed, cli.alternate_seats
    );
    eprintln!("  p1: {} ({})", p1_name, strategy_for(cli.p1).name());
    eprintln!("  p2: {} ({})", p2_name, strategy_for(cli.p2).name());
    eprintln!();

    let progress_cb = |done: usize, total: usize| {
        eprint!("\r  [{}/{}] games completed", done, total);
    };

    let result = run_arena(
        Contestant { name: &p1_name, strategy: strategy_for(cli.p1) },
        Contestant { name: &p2_name, strategy: strategy_for(cli.p2) },
        cli.games,
        cli.seed,
        cli.alternate_seats,
        Some(&progress_cb),
    );

    eprintln!("\r                                    "); // clear progress line
    println!("{}", result.summary());
    Ok(())
}
