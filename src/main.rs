use std::path::PathBuf;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use tictactoe_engine::engine::config::{load_config, load_default_config};
use tictactoe_engine::{Difficulty, GameEngine, GameMode, MoveOutcome, Position};

#[derive(Parser)]
#[command(
    name = "tictactoe-engine",
    about = "Feed a sequence of human moves to the Tic-Tac-Toe engine and print the result"
)]
struct Cli {
    /// Path to tictactoe.toml (default: auto-discover)
    #[arg(long, env = "TICTACTOE_CONFIG")]
    config: Option<PathBuf>,

    /// Game mode: single_player or multiplayer (overrides config)
    #[arg(long)]
    mode: Option<GameMode>,

    /// Computer difficulty: easy, medium or hard (overrides config)
    #[arg(long)]
    difficulty: Option<Difficulty>,

    /// Seed for the computer's random choices (overrides config)
    #[arg(long, env = "TICTACTOE_SEED")]
    seed: Option<u64>,

    /// Print a JSON snapshot instead of the text board
    #[arg(long)]
    json: bool,

    /// Human moves as row,col pairs, e.g. `1,1 0,2`
    #[arg(value_parser = parse_move)]
    moves: Vec<Position>,
}

fn parse_move(s: &str) -> Result<Position, String> {
    let (row, col) = s
        .split_once(',')
        .ok_or_else(|| format!("expected row,col but got '{}'", s))?;
    let row = row.trim().parse().map_err(|e| format!("bad row in '{}': {}", s, e))?;
    let col = col.trim().parse().map_err(|e| format!("bad col in '{}': {}", s, e))?;
    Ok(Position::new(row, col))
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("info".parse()?))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let mut config = match cli.config {
        Some(ref path) => load_config(path)?,
        None => load_default_config(),
    };
    if let Some(mode) = cli.mode {
        config.game.mode = mode;
    }
    if let Some(difficulty) = cli.difficulty {
        config.game.difficulty = difficulty;
    }
    if cli.seed.is_some() {
        config.computer.seed = cli.seed;
    }

    let mut engine = GameEngine::with_config(&config);
    tracing::info!(
        mode = ?engine.mode(),
        difficulty = %engine.difficulty(),
        moves = cli.moves.len(),
        "starting round"
    );

    for pos in &cli.moves {
        match engine.apply_human_move(pos.row, pos.col) {
            Ok(MoveOutcome::Continue) => {
                if let Some(reply) = engine.last_computer_move() {
                    tracing::info!(human = %pos, computer = %reply, "moves played");
                }
            }
            Ok(MoveOutcome::Decided(outcome)) => {
                tracing::info!(human = %pos, ?outcome, "round decided");
            }
            Err(e) => {
                tracing::warn!(human = %pos, error = %e, "move ignored");
            }
        }
    }

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&engine.snapshot())?);
    } else {
        println!("{}", engine.board());
        println!();
        println!("{}", engine.status());
        println!("{}", engine.scores());
    }

    Ok(())
}
