//! Shared helpers for integration tests
//!
//! `ScriptedStrategy` answers the engine's questions with fixed values so each
//! test controls predictions, rewards and snake decisions exactly.

#![allow(dead_code)]

use rand::rngs::StdRng;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use snakes_ladders::board::BoardLayout;
use snakes_ladders::dice::Dice;
use snakes_ladders::state::GameState;
use snakes_ladders::strategy::{HumanStrategy, Strategy};
use snakes_ladders::{Config, Game, Player, RewardChoice};

/// Predictions cycle through `predictions`, one per turn
#[derive(Debug, Clone)]
pub struct ScriptedStrategy {
    pub predictions: Vec<u8>,
    pub reward: Option<RewardChoice>,
    pub use_tokens: Option<bool>,
    pub predict_calls: Arc<AtomicUsize>,
}

impl ScriptedStrategy {
    pub fn predicting(predictions: &[u8]) -> Self {
        ScriptedStrategy {
            predictions: predictions.to_vec(),
            reward: Some(RewardChoice::Tokens),
            use_tokens: Some(false),
            predict_calls: Arc::new(AtomicUsize::new(0)),
        }
    }

    pub fn with_reward(mut self, reward: RewardChoice) -> Self {
        self.reward = Some(reward);
        self
    }

    pub fn with_tokens(mut self, use_tokens: bool) -> Self {
        self.use_tokens = Some(use_tokens);
        self
    }
}

impl Strategy for ScriptedStrategy {
    fn predict(&self, _state: &GameState, _me: usize, _rng: &mut StdRng) -> Option<u8> {
        let call = self.predict_calls.fetch_add(1, Ordering::SeqCst);
        self.predictions.get(call % self.predictions.len().max(1)).copied()
    }

    fn choose_reward(
        &self,
        _state: &GameState,
        _me: usize,
        _rng: &mut StdRng,
    ) -> Option<RewardChoice> {
        self.reward
    }

    fn decide_use_tokens(
        &self,
        _state: &GameState,
        _me: usize,
        _cost: u32,
        _rng: &mut StdRng,
    ) -> Option<bool> {
        self.use_tokens
    }

    fn label(&self) -> &'static str {
        "scripted"
    }
}

/// Player placed at `position` holding `tokens`
pub fn player_at(name: &str, position: u32, tokens: u32) -> Player {
    let mut player = Player::human(name);
    player.position = position;
    player.tokens = tokens;
    player
}

/// Game on `board` whose die yields `faces` in order
pub fn scripted_game(board: BoardLayout, faces: &[u8]) -> Game {
    let mut game = Game::with_board(board, Config::default_hardcoded(), 0);
    game.set_dice(Dice::scripted(faces.iter().copied()));
    game
}

pub fn seat(game: &mut Game, player: Player, strategy: ScriptedStrategy) {
    game.add_player_with_strategy(player, Box::new(strategy))
        .expect("players can be added during setup");
}

pub fn seat_human(game: &mut Game, player: Player) {
    game.add_player_with_strategy(player, Box::new(HumanStrategy))
        .expect("players can be added during setup");
}
