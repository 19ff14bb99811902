// Depth-limited minimax with alpha-beta pruning over simulated turns
//
// The searching AI only controls its prediction; dice rolls are enumerated.
// Every ply branches over all six faces, alternating maximizing (our ply) and
// minimizing (opponent ply) nodes. Each child value is scaled by the 1/6
// probability of its face and the node keeps the max (or min) of those scaled
// values. This is NOT an expectation: a proper chance node would sum the
// weighted children. Changing it changes which predictions the AI tiers pick.

use log::debug;

use crate::config::SearchConfig;
use crate::dice::DICE_FACES;
use crate::state::GameState;

const FACE_PROBABILITY: f64 = 1.0 / DICE_FACES as f64;

/// Best prediction found for one decision
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SearchResult {
    pub prediction: u8,
    pub score: f64,
    /// Simulated positions visited
    pub nodes: u64,
    pub cutoffs: u64,
}

/// Minimax searcher evaluating positions from one player's point of view
pub struct PredictionSearch<'a> {
    me: usize,
    config: &'a SearchConfig,
    nodes: u64,
    cutoffs: u64,
}

impl<'a> PredictionSearch<'a> {
    pub fn new(me: usize, config: &'a SearchConfig) -> Self {
        PredictionSearch {
            me,
            config,
            nodes: 0,
            cutoffs: 0,
        }
    }

    /// Scores every prediction 1..=6 and returns the first one with the highest score
    ///
    /// Ties resolve to the lowest prediction, so the result depends only on
    /// `state` and `depth`.
    pub fn best_prediction(&mut self, state: &GameState, depth: u8) -> SearchResult {
        let mut best_prediction = 1;
        let mut best_score = f64::NEG_INFINITY;

        for prediction in 1..=DICE_FACES {
            let score = self.minimax(
                state,
                prediction,
                depth,
                f64::NEG_INFINITY,
                f64::INFINITY,
                true,
            );
            if score > best_score {
                best_score = score;
                best_prediction = prediction;
            }
        }

        debug!(
            "Player {}: prediction {} (score: {:.2}, depth: {}, nodes: {}, cutoffs: {})",
            self.me, best_prediction, best_score, depth, self.nodes, self.cutoffs
        );

        SearchResult {
            prediction: best_prediction,
            score: best_score,
            nodes: self.nodes,
            cutoffs: self.cutoffs,
        }
    }

    /// Value of `state` when the current mover predicts `prediction` for the
    /// next `depth` plies
    pub fn minimax(
        &mut self,
        state: &GameState,
        prediction: u8,
        depth: u8,
        mut alpha: f64,
        mut beta: f64,
        maximizing: bool,
    ) -> f64 {
        self.nodes += 1;

        if depth == 0 || state.is_terminal() {
            return evaluate(state, self.me, self.config);
        }

        if maximizing {
            let mut value = f64::NEG_INFINITY;
            for roll in 1..=DICE_FACES {
                let next = simulate_move(state, prediction, roll);
                let child = self.minimax(&next, prediction, depth - 1, alpha, beta, false);
                value = value.max(FACE_PROBABILITY * child);
                alpha = alpha.max(value);
                if beta <= alpha {
                    self.cutoffs += 1;
                    break;
                }
            }
            value
        } else {
            let mut value = f64::INFINITY;
            for roll in 1..=DICE_FACES {
                let next = simulate_move(state, prediction, roll);
                let child = self.minimax(&next, prediction, depth - 1, alpha, beta, true);
                value = value.min(FACE_PROBABILITY * child);
                beta = beta.min(value);
                if beta <= alpha {
                    self.cutoffs += 1;
                    break;
                }
            }
            value
        }
    }
}

/// Convenience wrapper running a fresh search
pub fn best_prediction(
    state: &GameState,
    me: usize,
    depth: u8,
    config: &SearchConfig,
) -> SearchResult {
    PredictionSearch::new(me, config).best_prediction(state, depth)
}

/// Static score of `state` for player `me`
///
/// `position / size * position_weight + token_weight * sum(own - opponent tokens)
///  - distance_weight * (size - position)`, or `win_score` once `me` is home.
pub fn evaluate(state: &GameState, me: usize, config: &SearchConfig) -> f64 {
    let player = match state.players.get(me) {
        Some(p) => p,
        None => return 0.0,
    };

    let size = state.board_size();
    if player.position >= size {
        return config.win_score;
    }

    let position_score = player.position as f64 / size as f64 * config.position_weight;
    let token_advantage: i64 = state
        .opponents(me)
        .map(|opp| player.tokens as i64 - state.players[opp].tokens as i64)
        .sum();
    let distance_to_win = (size - player.position) as f64;

    position_score + token_advantage as f64 * config.token_weight
        - distance_to_win * config.distance_weight
}

/// Copy of `state` after the current mover predicts `prediction` and rolls `roll`
///
/// Simplified turn: a correct prediction earns one token, the move is clamped at
/// the last square instead of being rejected on overshoot, a snake is always
/// neutralized when affordable, ladders are always climbed, and play passes to
/// the next seat without skip handling.
pub fn simulate_move(state: &GameState, prediction: u8, roll: u8) -> GameState {
    let mut next = state.clone();
    if next.players.is_empty() {
        return next;
    }

    let idx = next.current_player_idx % next.players.len();
    let board = next.board.clone();
    let player = &mut next.players[idx];
    player.prediction = Some(prediction);

    if prediction == roll {
        player.tokens += 1;
    }

    player.position += roll as u32;

    if let (Some(tail), Some(cost)) = (
        board.snake_tail(player.position),
        board.snake_cost(player.position),
    ) {
        if player.tokens >= cost {
            player.tokens -= cost;
        } else {
            player.position = tail;
        }
    }

    if let Some(top) = board.ladder_top(player.position) {
        player.position = top;
    }

    player.position = player.position.min(board.size());
    next.current_player_idx = (idx + 1) % next.players.len();
    next
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::BoardLayout;
    use crate::config::Config;
    use crate::types::{Difficulty, Player};

    fn state_with(positions: &[(u32, u32)]) -> GameState {
        let mut state = GameState::new(BoardLayout::standard());
        for (i, &(position, tokens)) in positions.iter().enumerate() {
            let mut player = Player::ai(format!("P{}", i), Difficulty::Medium);
            player.position = position;
            player.tokens = tokens;
            state.players.push(player);
        }
        state
    }

    #[test]
    fn test_evaluate_start_position() {
        let config = Config::default_hardcoded().search;
        let state = state_with(&[(0, 0), (0, 0)]);
        assert_eq!(evaluate(&state, 0, &config), -200.0);
    }

    #[test]
    fn test_evaluate_weights() {
        let config = Config::default_hardcoded().search;
        let state = state_with(&[(50, 4), (30, 1), (10, 2)]);
        // 50 + 5 * ((4-1) + (4-2)) - 2 * 50
        assert_eq!(evaluate(&state, 0, &config), 50.0 + 25.0 - 100.0);
    }

    #[test]
    fn test_evaluate_win_overrides() {
        let config = Config::default_hardcoded().search;
        let state = state_with(&[(100, 0), (99, 9)]);
        assert_eq!(evaluate(&state, 0, &config), 1000.0);
        assert_eq!(evaluate(&state, 5, &config), 0.0);
    }

    #[test]
    fn test_simulate_plain_move_and_correct_prediction() {
        let state = state_with(&[(0, 0), (0, 0)]);
        let next = simulate_move(&state, 3, 3);
        assert_eq!(next.players[0].position, 3);
        assert_eq!(next.players[0].tokens, 1);
        assert_eq!(next.current_player_idx, 1);

        let missed = simulate_move(&state, 2, 3);
        assert_eq!(missed.players[0].tokens, 0);
    }

    #[test]
    fn test_simulate_takes_ladder() {
        let state = state_with(&[(0, 0), (0, 0)]);
        let next = simulate_move(&state, 1, 4);
        assert_eq!(next.players[0].position, 14);
    }

    #[test]
    fn test_simulate_snake_spends_tokens_when_affordable() {
        let poor = state_with(&[(44, 0), (0, 0)]);
        let next = simulate_move(&poor, 6, 1);
        assert_eq!(next.players[0].position, 15);

        let rich = state_with(&[(44, 3), (0, 0)]);
        let next = simulate_move(&rich, 6, 1);
        assert_eq!(next.players[0].position, 45);
        assert_eq!(next.players[0].tokens, 0);
    }

    #[test]
    fn test_simulate_clamps_overshoot() {
        let state = state_with(&[(97, 0), (0, 0)]);
        let next = simulate_move(&state, 1, 6);
        assert_eq!(next.players[0].position, 100);
        assert!(next.is_terminal());
    }

    #[test]
    fn test_simulation_never_touches_input() {
        let state = state_with(&[(20, 2), (40, 1)]);
        let before = state.clone();
        let config = Config::default_hardcoded().search;
        let _ = best_prediction(&state, 0, 3, &config);
        assert_eq!(state, before);
    }

    #[test]
    fn test_depth_zero_returns_static_evaluation() {
        let config = Config::default_hardcoded().search;
        let state = state_with(&[(10, 1), (20, 0)]);
        let result = best_prediction(&state, 0, 0, &config);
        assert_eq!(result.prediction, 1);
        assert_eq!(result.score, evaluate(&state, 0, &config));
    }

    #[test]
    fn test_terminal_state_returns_static_evaluation() {
        let config = Config::default_hardcoded().search;
        let state = state_with(&[(30, 0), (100, 0)]);
        let mut search = PredictionSearch::new(0, &config);
        let value = search.minimax(&state, 4, 3, f64::NEG_INFINITY, f64::INFINITY, true);
        assert_eq!(value, evaluate(&state, 0, &config));
    }

    #[test]
    fn test_search_is_deterministic() {
        let config = Config::default_hardcoded().search;
        let state = state_with(&[(37, 2), (52, 1)]);
        let first = best_prediction(&state, 0, 4, &config);
        for _ in 0..3 {
            let again = best_prediction(&state, 0, 4, &config);
            assert_eq!(again.prediction, first.prediction);
            assert_eq!(again.score, first.score);
        }
        assert!((1..=6).contains(&first.prediction));
    }

    #[test]
    fn test_node_value_is_max_of_weighted_children() {
        let config = Config::default_hardcoded().search;
        let state = state_with(&[(10, 0), (10, 0)]);
        let mut search = PredictionSearch::new(0, &config);
        let value = search.minimax(&state, 2, 1, f64::NEG_INFINITY, f64::INFINITY, true);

        let expected = (1..=6u8)
            .map(|roll| evaluate(&simulate_move(&state, 2, roll), 0, &config) / 6.0)
            .fold(f64::NEG_INFINITY, f64::max);
        assert!((value - expected).abs() < 1e-9);
    }
}
