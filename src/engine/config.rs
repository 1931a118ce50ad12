//! Engine configuration loaded from TOML.
//!
//! ```toml
//! [game]
//! mode = "single_player"
//! difficulty = "hard"
//!
//! [computer]
//! seed = 42
//! ```

use std::path::Path;

use serde::Deserialize;

use crate::engine::error::ConfigError;
use crate::engine::models::{Difficulty, GameMode};

/// Starting mode and difficulty for a new engine.
#[derive(Debug, Deserialize, Clone, Copy, Default, PartialEq, Eq)]
#[serde(default)]
pub struct GameSection {
    pub mode: GameMode,
    pub difficulty: Difficulty,
}

#[derive(Debug, Deserialize, Clone, Copy, Default, PartialEq, Eq)]
#[serde(default)]
pub struct ComputerSection {
    /// Seed for the medium tier's random fallback. Entropy when absent.
    pub seed: Option<u64>,
}

/// Top-level TOML file structure.
#[derive(Debug, Deserialize, Clone, Copy, Default, PartialEq, Eq)]
pub struct EngineConfig {
    #[serde(default)]
    pub game: GameSection,
    #[serde(default)]
    pub computer: ComputerSection,
}

/// Load configuration from a TOML file at the given path.
pub fn load_config(path: &Path) -> Result<EngineConfig, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    toml::from_str(&content).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

/// Try well-known paths, returning defaults if none loads.
pub fn load_default_config() -> EngineConfig {
    let candidates = [
        "tictactoe.toml",
        "../tictactoe.toml",
        "/etc/tictactoe/tictactoe.toml",
    ];
    for path in &candidates {
        let p = Path::new(path);
        if p.exists() {
            match load_config(p) {
                Ok(config) => {
                    tracing::info!(
                        path = %p.display(),
                        mode = ?config.game.mode,
                        difficulty = %config.game.difficulty,
                        "loaded engine config"
                    );
                    return config;
                }
                Err(e) => {
                    tracing::warn!(path = %p.display(), error = %e, "failed to load engine config");
                }
            }
        }
    }
    tracing::info!("no tictactoe.toml found, using built-in defaults");
    EngineConfig::default()
}
