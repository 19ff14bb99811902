use thiserror::Error;

use crate::types::TurnPhase;

/// Errors returned by the game engine
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("Prediction must be between 1 and 6, got {0}")]
    InvalidPrediction(u8),

    #[error("Reward choice must be 1 (bonus roll) or 2 (tokens), got {0}")]
    InvalidRewardChoice(u8),

    #[error("Operation requires turn phase {expected:?}, engine is in {actual:?}")]
    WrongPhase {
        expected: TurnPhase,
        actual: TurnPhase,
    },

    #[error("Player {0} has no prediction outstanding")]
    NotAwaitingPlayer(usize),

    #[error("No player at index {0}")]
    UnknownPlayer(usize),

    #[error("At least {required} players are needed, found {actual}")]
    NotEnoughPlayers { required: usize, actual: usize },

    #[error("Game is over")]
    GameOver,

    #[error("Players cannot be added after the game has started")]
    GameInProgress,

    #[error("Snake at square {0} has no token cost")]
    MissingSnakeCost(u32),

    #[error("Invalid board layout: {0}")]
    InvalidBoard(String),
}

/// Convenience Result type for engine operations
pub type Result<T> = std::result::Result<T, GameError>;
