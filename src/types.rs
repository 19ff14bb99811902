// Core game types shared by the engine, strategies and search

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::GameError;

/// AI strength tiers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
    Expert,
}

impl Difficulty {
    /// Returns all tiers, weakest first
    pub fn all() -> [Difficulty; 4] {
        [
            Difficulty::Easy,
            Difficulty::Medium,
            Difficulty::Hard,
            Difficulty::Expert,
        ]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Easy => "easy",
            Difficulty::Medium => "medium",
            Difficulty::Hard => "hard",
            Difficulty::Expert => "expert",
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Difficulty {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "easy" => Ok(Difficulty::Easy),
            "medium" => Ok(Difficulty::Medium),
            "hard" => Ok(Difficulty::Hard),
            "expert" => Ok(Difficulty::Expert),
            other => Err(format!("Unknown difficulty '{}'", other)),
        }
    }
}

/// Who makes a player's decisions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlayerKind {
    Human,
    Ai(Difficulty),
}

/// Per-player mutable record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    pub name: String,
    pub kind: PlayerKind,
    pub position: u32,
    pub tokens: u32,
    pub skipped: bool,
    /// Guess for the roll of the turn in progress
    pub prediction: Option<u8>,
}

impl Player {
    pub fn new(name: impl Into<String>, kind: PlayerKind) -> Self {
        Player {
            name: name.into(),
            kind,
            position: 0,
            tokens: 0,
            skipped: false,
            prediction: None,
        }
    }

    pub fn human(name: impl Into<String>) -> Self {
        Self::new(name, PlayerKind::Human)
    }

    pub fn ai(name: impl Into<String>, difficulty: Difficulty) -> Self {
        Self::new(name, PlayerKind::Ai(difficulty))
    }

    pub fn is_ai(&self) -> bool {
        matches!(self.kind, PlayerKind::Ai(_))
    }

    pub fn difficulty(&self) -> Option<Difficulty> {
        match self.kind {
            PlayerKind::Ai(d) => Some(d),
            PlayerKind::Human => None,
        }
    }

    /// Back to the start square with an empty purse
    pub fn reset(&mut self) {
        self.position = 0;
        self.tokens = 0;
        self.skipped = false;
        self.prediction = None;
    }
}

impl fmt::Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} at position {} with {} tokens",
            self.name, self.position, self.tokens
        )
    }
}

/// Reward for the mover's own correct prediction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RewardChoice {
    /// Extra roll after the current move resolves
    BonusRoll,
    /// Tokens credited immediately
    Tokens,
}

impl RewardChoice {
    /// Numeric code shown to players: 1 = bonus roll, 2 = tokens
    pub fn code(&self) -> u8 {
        match self {
            RewardChoice::BonusRoll => 1,
            RewardChoice::Tokens => 2,
        }
    }
}

impl TryFrom<u8> for RewardChoice {
    type Error = GameError;

    fn try_from(code: u8) -> Result<Self, Self::Error> {
        match code {
            1 => Ok(RewardChoice::BonusRoll),
            2 => Ok(RewardChoice::Tokens),
            other => Err(GameError::InvalidRewardChoice(other)),
        }
    }
}

/// Lifecycle of a whole game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    Setup,
    Playing,
    GameOver,
}

/// Where the turn in progress is waiting
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum TurnPhase {
    /// No turn in progress
    #[default]
    Idle,
    AwaitingPredictions,
    ReadyToRoll,
    AwaitingRewardChoice,
    AwaitingSnakeDecision,
}

/// Decision the engine needs from outside before the turn can continue
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum InputRequest {
    Prediction { player: usize },
    RollDice { player: usize },
    RewardChoice { player: usize },
    SnakeDecision { player: usize, head: u32, cost: u32 },
}

impl InputRequest {
    pub fn player(&self) -> usize {
        match *self {
            InputRequest::Prediction { player }
            | InputRequest::RollDice { player }
            | InputRequest::RewardChoice { player }
            | InputRequest::SnakeDecision { player, .. } => player,
        }
    }
}

/// Result of advancing the engine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TurnOutcome {
    /// Turn finished, the game goes on
    Continues,
    /// Turn paused until the request is answered
    AwaitingInput(InputRequest),
    /// Player index that reached the last square
    Winner(usize),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reward_choice_codes() {
        assert_eq!(RewardChoice::try_from(1), Ok(RewardChoice::BonusRoll));
        assert_eq!(RewardChoice::try_from(2), Ok(RewardChoice::Tokens));
        assert_eq!(
            RewardChoice::try_from(3),
            Err(GameError::InvalidRewardChoice(3))
        );
        assert_eq!(RewardChoice::Tokens.code(), 2);
    }

    #[test]
    fn test_difficulty_parsing() {
        assert_eq!("Expert".parse::<Difficulty>(), Ok(Difficulty::Expert));
        assert_eq!(" easy ".parse::<Difficulty>(), Ok(Difficulty::Easy));
        assert!("grandmaster".parse::<Difficulty>().is_err());
    }

    #[test]
    fn test_player_reset_clears_progress() {
        let mut player = Player::ai("Bot", Difficulty::Hard);
        player.position = 57;
        player.tokens = 4;
        player.skipped = true;
        player.prediction = Some(3);

        player.reset();

        assert_eq!(player, Player::ai("Bot", Difficulty::Hard));
        assert_eq!(player.difficulty(), Some(Difficulty::Hard));
        assert!(player.is_ai());
    }
}
