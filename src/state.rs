// Plain game state aggregate
//
// GameState holds no behaviour objects, so the AI can clone it freely and
// replay moves on the copy without touching the live game.

use std::sync::Arc;

use crate::board::BoardLayout;
use crate::types::{GamePhase, Player};

/// Complete mutable state of one game
#[derive(Debug, Clone, PartialEq)]
pub struct GameState {
    /// Shared: the layout never changes once play starts
    pub board: Arc<BoardLayout>,
    pub players: Vec<Player>,
    pub current_player_idx: usize,
    pub winner: Option<usize>,
    pub phase: GamePhase,
}

impl GameState {
    pub fn new(board: BoardLayout) -> Self {
        GameState {
            board: Arc::new(board),
            players: Vec::new(),
            current_player_idx: 0,
            winner: None,
            phase: GamePhase::Setup,
        }
    }

    pub fn board_size(&self) -> u32 {
        self.board.size()
    }

    pub fn current_player(&self) -> Option<&Player> {
        self.players.get(self.current_player_idx)
    }

    pub fn player(&self, idx: usize) -> Option<&Player> {
        self.players.get(idx)
    }

    /// Recorded prediction of a player for the turn in progress
    pub fn prediction(&self, idx: usize) -> Option<u8> {
        self.players.get(idx).and_then(|p| p.prediction)
    }

    /// Indices of every player except `idx`, in turn order
    pub fn opponents(&self, idx: usize) -> impl Iterator<Item = usize> + '_ {
        (0..self.players.len()).filter(move |&i| i != idx)
    }

    /// True only when the player stands exactly on the last square
    pub fn check_win(&self, idx: usize) -> bool {
        self.players
            .get(idx)
            .is_some_and(|p| p.position == self.board.size())
    }

    /// Length of the snake at `square`, 0 when there is none
    pub fn snake_length(&self, square: u32) -> u32 {
        self.board.snake_length(square)
    }

    /// Any player at or past the last square
    pub fn is_terminal(&self) -> bool {
        let size = self.board.size();
        self.players.iter().any(|p| p.position >= size)
    }

    pub fn clear_predictions(&mut self) {
        for player in &mut self.players {
            player.prediction = None;
        }
    }
}
