pub mod models;
pub mod error;
pub mod board;
pub mod minimax;
pub mod bot_strategy;
pub mod game;
pub mod config;
pub mod arena;
