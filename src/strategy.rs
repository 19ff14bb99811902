// Decision strategies: who answers the engine's three questions for a player
//
// Returning `None` means "not decided yet": the engine pauses the turn and
// waits for the answer to be submitted from outside (the human case).

use rand::rngs::StdRng;
use rand::Rng;

use crate::config::{Config, HeuristicsConfig, SearchConfig};
use crate::dice::DICE_FACES;
use crate::search::PredictionSearch;
use crate::state::GameState;
use crate::types::{Difficulty, PlayerKind, RewardChoice};

/// Decision maker for one seat at the table
pub trait Strategy: Send {
    /// Guess for the coming roll, 1..=6
    fn predict(&self, state: &GameState, me: usize, rng: &mut StdRng) -> Option<u8>;

    /// Reward after predicting one's own roll correctly
    fn choose_reward(&self, state: &GameState, me: usize, rng: &mut StdRng)
        -> Option<RewardChoice>;

    /// Whether to pay `cost` tokens to stay on the snake head at the player's position
    fn decide_use_tokens(
        &self,
        state: &GameState,
        me: usize,
        cost: u32,
        rng: &mut StdRng,
    ) -> Option<bool>;

    fn label(&self) -> &'static str;
}

/// Builds the strategy matching a player's kind
pub fn strategy_for(kind: PlayerKind, config: &Config) -> Box<dyn Strategy> {
    match kind {
        PlayerKind::Human => Box::new(HumanStrategy),
        PlayerKind::Ai(Difficulty::Easy) => Box::new(RandomStrategy),
        PlayerKind::Ai(difficulty) => Box::new(MinimaxStrategy::new(
            difficulty,
            config.search.clone(),
            config.heuristics.clone(),
        )),
    }
}

/// Defers every decision to input submitted through the engine
#[derive(Debug, Clone, Copy, Default)]
pub struct HumanStrategy;

impl Strategy for HumanStrategy {
    fn predict(&self, _state: &GameState, _me: usize, _rng: &mut StdRng) -> Option<u8> {
        None
    }

    fn choose_reward(
        &self,
        _state: &GameState,
        _me: usize,
        _rng: &mut StdRng,
    ) -> Option<RewardChoice> {
        None
    }

    fn decide_use_tokens(
        &self,
        _state: &GameState,
        _me: usize,
        _cost: u32,
        _rng: &mut StdRng,
    ) -> Option<bool> {
        None
    }

    fn label(&self) -> &'static str {
        "human"
    }
}

/// Easy tier: coin flips and uniform guesses
#[derive(Debug, Clone, Copy, Default)]
pub struct RandomStrategy;

impl Strategy for RandomStrategy {
    fn predict(&self, _state: &GameState, _me: usize, rng: &mut StdRng) -> Option<u8> {
        Some(rng.random_range(1..=DICE_FACES))
    }

    fn choose_reward(
        &self,
        _state: &GameState,
        _me: usize,
        rng: &mut StdRng,
    ) -> Option<RewardChoice> {
        if rng.random_bool(0.5) {
            Some(RewardChoice::BonusRoll)
        } else {
            Some(RewardChoice::Tokens)
        }
    }

    fn decide_use_tokens(
        &self,
        state: &GameState,
        me: usize,
        cost: u32,
        rng: &mut StdRng,
    ) -> Option<bool> {
        let tokens = state.player(me).map_or(0, |p| p.tokens);
        Some(tokens >= cost && rng.random_bool(0.5))
    }

    fn label(&self) -> &'static str {
        "easy"
    }
}

/// Medium, hard and expert tiers: minimax predictions, heuristic rewards and tokens
#[derive(Debug, Clone)]
pub struct MinimaxStrategy {
    difficulty: Difficulty,
    search: SearchConfig,
    heuristics: HeuristicsConfig,
}

impl MinimaxStrategy {
    pub fn new(difficulty: Difficulty, search: SearchConfig, heuristics: HeuristicsConfig) -> Self {
        MinimaxStrategy {
            difficulty,
            search,
            heuristics,
        }
    }

    pub fn depth(&self) -> u8 {
        self.search.depth_for(self.difficulty)
    }
}

impl Strategy for MinimaxStrategy {
    fn predict(&self, state: &GameState, me: usize, _rng: &mut StdRng) -> Option<u8> {
        let result = PredictionSearch::new(me, &self.search).best_prediction(state, self.depth());
        Some(result.prediction)
    }

    fn choose_reward(
        &self,
        state: &GameState,
        me: usize,
        _rng: &mut StdRng,
    ) -> Option<RewardChoice> {
        let player = state.player(me)?;
        let h = &self.heuristics;

        // Within two average rolls of home
        if state.board_size().saturating_sub(player.position) <= h.bonus_roll_distance {
            return Some(RewardChoice::BonusRoll);
        }

        if player.tokens <= h.low_token_threshold {
            return Some(RewardChoice::Tokens);
        }

        let snakes_ahead = state
            .board
            .snake_heads_ahead(player.position, h.snake_lookahead);
        if snakes_ahead >= h.snake_danger_count && player.tokens < h.snake_danger_tokens {
            return Some(RewardChoice::Tokens);
        }

        if player.position % 2 == 0 {
            Some(RewardChoice::BonusRoll)
        } else {
            Some(RewardChoice::Tokens)
        }
    }

    fn decide_use_tokens(
        &self,
        state: &GameState,
        me: usize,
        cost: u32,
        _rng: &mut StdRng,
    ) -> Option<bool> {
        let player = state.player(me)?;
        let h = &self.heuristics;
        let affordable = player.tokens >= cost;

        if player.tokens >= cost + h.token_surplus {
            return Some(true);
        }

        let snake_length = state.snake_length(player.position);
        if snake_length > h.long_snake_length && affordable {
            return Some(true);
        }

        let remaining = state.board_size().saturating_sub(player.position);
        if remaining < h.endgame_distance && affordable {
            return Some(true);
        }

        let leading = state
            .opponents(me)
            .all(|opp| player.position > state.players[opp].position);
        if leading && affordable {
            return Some(true);
        }

        Some(snake_length > h.medium_snake_length && affordable)
    }

    fn label(&self) -> &'static str {
        self.difficulty.as_str()
    }
}
