//! Tic-Tac-Toe game engine: board rules, turn and score management, and
//! three computer opponents (first-empty, win-or-block, full minimax).
//!
//! The engine is headless. A presentation layer reports cell clicks to
//! [`engine::game::GameEngine::apply_human_move`] and renders from its
//! read-only accessors afterwards.

pub mod engine;

pub use engine::board::Board;
pub use engine::config::{load_config, load_default_config, EngineConfig};
pub use engine::error::{ConfigError, MoveError};
pub use engine::game::GameEngine;
pub use engine::models::*;
