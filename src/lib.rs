// Library exports for the Snakes and Ladders prediction game
// The CLI and the tournament runner both drive games through `engine::Game`

pub mod board;
pub mod config;
pub mod debug_logger;
pub mod dice;
pub mod engine;
pub mod error;
pub mod events;
pub mod search;
pub mod state;
pub mod strategy;
pub mod types;

pub use board::BoardLayout;
pub use config::Config;
pub use engine::Game;
pub use error::{GameError, Result};
pub use types::{Difficulty, InputRequest, Player, PlayerKind, RewardChoice, TurnOutcome};
