// Game engine: turn sequencing, prediction resolution and movement
//
// A turn runs through these steps:
//   predictions -> roll -> mover's reward -> opponents' consequences ->
//   move (+ ladder) -> snake -> optional bonus move (+ snake) -> win check -> next player
//
// Strategies that return `None` (humans) pause the turn. The engine records
// where it stopped in `TurnPhase` and the matching `submit_*` call resumes it.
// `play_turn` drives a whole turn when no input is needed.

use log::{error, info, warn};
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::board::{BoardLayout, MIN_BOARD_SIZE, STANDARD_BOARD_SIZE};
use crate::config::Config;
use crate::debug_logger::DebugLogger;
use crate::dice::{Dice, DICE_FACES};
use crate::error::{GameError, Result};
use crate::events::{EventKind, EventLog};
use crate::state::GameState;
use crate::strategy::{strategy_for, Strategy};
use crate::types::{GamePhase, InputRequest, Player, RewardChoice, TurnOutcome, TurnPhase};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
enum MoveStage {
    #[default]
    Main,
    Bonus,
}

/// Bookkeeping for the turn in progress
#[derive(Debug, Clone, Default)]
struct TurnContext {
    phase: TurnPhase,
    roll: u8,
    bonus_roll: bool,
    stage: MoveStage,
    /// Players whose prediction is still outstanding, in asking order
    pending_predictions: Vec<usize>,
}

/// One game of Snakes and Ladders with dice predictions
pub struct Game {
    state: GameState,
    strategies: Vec<Box<dyn Strategy>>,
    config: Config,
    dice: Dice,
    rng: StdRng,
    log: EventLog,
    turn: TurnContext,
    turn_number: u64,
    trace: DebugLogger,
}

impl Game {
    /// New game on a `board_size` board with default rules and an OS-seeded generator
    ///
    /// The standard layout is used for 100 squares; any other size gets a
    /// procedurally generated board.
    pub fn new(board_size: u32) -> Self {
        let mut config = Config::default_hardcoded();
        config.board.size = board_size;
        Self::from_config(config, None)
    }

    /// Same as `new` but reproducible
    pub fn with_seed(board_size: u32, seed: u64) -> Self {
        let mut config = Config::default_hardcoded();
        config.board.size = board_size;
        Self::from_config(config, Some(seed))
    }

    pub fn from_config(mut config: Config, seed: Option<u64>) -> Self {
        let mut rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };

        if config.board.size < MIN_BOARD_SIZE {
            warn!(
                "Board size {} is too small, using {} squares",
                config.board.size, MIN_BOARD_SIZE
            );
            config.board.size = MIN_BOARD_SIZE;
        }

        let board = if config.board.size == STANDARD_BOARD_SIZE {
            BoardLayout::standard()
        } else {
            BoardLayout::generate(
                config.board.size,
                config.board.num_snakes,
                config.board.num_ladders,
                &mut rng,
            )
        };

        Self::assemble(board, config, rng)
    }

    /// Game on an explicit layout; the layout's size overrides `config.board.size`
    pub fn with_board(board: BoardLayout, config: Config, seed: u64) -> Self {
        Self::assemble(board, config, StdRng::seed_from_u64(seed))
    }

    fn assemble(board: BoardLayout, config: Config, rng: StdRng) -> Self {
        let trace = DebugLogger::new(config.debug.enabled, &config.debug.log_file_path);
        Game {
            state: GameState::new(board),
            strategies: Vec::new(),
            config,
            dice: Dice::new(),
            rng,
            log: EventLog::new(),
            turn: TurnContext::default(),
            turn_number: 0,
            trace,
        }
    }

    // ------------------------------------------------------------------
    // Setup
    // ------------------------------------------------------------------

    /// Adds a player in turn order, decided by the strategy matching its kind
    pub fn add_player(&mut self, player: Player) -> Result<()> {
        let strategy = strategy_for(player.kind, &self.config);
        self.add_player_with_strategy(player, strategy)
    }

    /// Adds a player whose decisions come from `strategy`
    pub fn add_player_with_strategy(
        &mut self,
        player: Player,
        strategy: Box<dyn Strategy>,
    ) -> Result<()> {
        if self.state.phase != GamePhase::Setup {
            return Err(GameError::GameInProgress);
        }
        info!("Added player {} ({})", player.name, strategy.label());
        self.state.players.push(player);
        self.strategies.push(strategy);
        Ok(())
    }

    /// Replaces the die, e.g. with a scripted one
    pub fn set_dice(&mut self, dice: Dice) {
        self.dice = dice;
    }

    /// Everyone back to square 0 with no tokens; players and board are kept
    pub fn reset(&mut self) {
        for player in &mut self.state.players {
            player.reset();
        }
        self.state.current_player_idx = 0;
        self.state.winner = None;
        self.state.phase = GamePhase::Setup;
        self.turn = TurnContext::default();
        self.turn_number = 0;
        self.log.clear();
        self.log.push(EventKind::GameReset, None, "Game reset");
    }

    // ------------------------------------------------------------------
    // Queries
    // ------------------------------------------------------------------

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn board(&self) -> &BoardLayout {
        &self.state.board
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn players(&self) -> &[Player] {
        &self.state.players
    }

    pub fn player(&self, idx: usize) -> Option<&Player> {
        self.state.player(idx)
    }

    pub fn current_player(&self) -> Option<&Player> {
        self.state.current_player()
    }

    pub fn current_player_index(&self) -> usize {
        self.state.current_player_idx
    }

    pub fn check_win(&self, idx: usize) -> bool {
        self.state.check_win(idx)
    }

    pub fn snake_length(&self, square: u32) -> u32 {
        self.state.snake_length(square)
    }

    pub fn phase(&self) -> GamePhase {
        self.state.phase
    }

    pub fn turn_phase(&self) -> TurnPhase {
        self.turn.phase
    }

    pub fn winner(&self) -> Option<&Player> {
        self.state.winner.and_then(|w| self.state.player(w))
    }

    pub fn events(&self) -> &EventLog {
        &self.log
    }

    /// Face of the most recent roll
    pub fn last_roll(&self) -> u8 {
        self.dice.value()
    }

    /// Turns started so far, skipped turns included
    pub fn turn_number(&self) -> u64 {
        self.turn_number
    }

    /// What the paused turn is waiting for, if anything
    pub fn pending_input(&self) -> Option<InputRequest> {
        let current = self.state.current_player_idx;
        match self.turn.phase {
            TurnPhase::Idle => None,
            TurnPhase::AwaitingPredictions => self
                .turn
                .pending_predictions
                .first()
                .map(|&player| InputRequest::Prediction { player }),
            TurnPhase::ReadyToRoll => Some(InputRequest::RollDice { player: current }),
            TurnPhase::AwaitingRewardChoice => Some(InputRequest::RewardChoice { player: current }),
            TurnPhase::AwaitingSnakeDecision => {
                let head = self.state.player(current).map_or(0, |p| p.position);
                Some(InputRequest::SnakeDecision {
                    player: current,
                    head,
                    cost: self.state.board.snake_cost(head).unwrap_or(0),
                })
            }
        }
    }

    // ------------------------------------------------------------------
    // Turn driving
    // ------------------------------------------------------------------

    /// Plays a full turn, rolling automatically once all predictions are in
    ///
    /// Stops early with `AwaitingInput` when a human decision is needed.
    pub fn play_turn(&mut self) -> Result<TurnOutcome> {
        match self.start_turn()? {
            TurnOutcome::AwaitingInput(InputRequest::RollDice { .. }) => self.resolve_dice(),
            other => Ok(other),
        }
    }

    /// Plays turns until someone wins, a decision is needed, or `max_turns` turns pass
    pub fn run_until_finished(&mut self, max_turns: usize) -> Result<TurnOutcome> {
        for _ in 0..max_turns {
            match self.play_turn()? {
                TurnOutcome::Continues => continue,
                other => return Ok(other),
            }
        }
        warn!("No winner after {} turns", max_turns);
        Ok(TurnOutcome::Continues)
    }

    /// Begins the current player's turn and collects predictions
    ///
    /// A player flagged as skipped loses this turn: the flag is cleared and play
    /// passes on without predictions or a roll.
    pub fn start_turn(&mut self) -> Result<TurnOutcome> {
        self.ensure_started()?;
        self.expect_phase(TurnPhase::Idle)?;

        let current = self.state.current_player_idx;
        let n = self.state.players.len();
        self.turn_number += 1;

        if self.state.players[current].skipped {
            self.state.players[current].skipped = false;
            let message = format!("{}'s turn is skipped!", self.state.players[current].name);
            self.log.push(EventKind::TurnSkipped, Some(current), message);
            self.state.current_player_idx = (current + 1) % n;
            self.trace
                .log_turn(self.turn_number, current, None, &self.state);
            return Ok(TurnOutcome::Continues);
        }

        let mover = &self.state.players[current];
        let message = format!(
            "{}'s turn (position {}, tokens {})",
            mover.name, mover.position, mover.tokens
        );
        self.log.push(EventKind::TurnStarted, Some(current), message);

        self.state.clear_predictions();
        self.turn = TurnContext {
            phase: TurnPhase::AwaitingPredictions,
            ..TurnContext::default()
        };

        let order: Vec<usize> = std::iter::once(current)
            .chain(self.state.opponents(current))
            .collect();
        for idx in order {
            match self.strategies[idx].predict(&self.state, idx, &mut self.rng) {
                Some(guess) => self.record_prediction(idx, guess.clamp(1, DICE_FACES)),
                None => self.turn.pending_predictions.push(idx),
            }
        }

        Ok(self.after_predictions())
    }

    /// Records an outstanding prediction; rejects values outside 1..=6
    pub fn submit_prediction(&mut self, player: usize, prediction: u8) -> Result<TurnOutcome> {
        self.expect_phase(TurnPhase::AwaitingPredictions)?;
        if player >= self.state.players.len() {
            return Err(GameError::UnknownPlayer(player));
        }
        if !(1..=DICE_FACES).contains(&prediction) {
            return Err(GameError::InvalidPrediction(prediction));
        }
        let slot = self
            .turn
            .pending_predictions
            .iter()
            .position(|&p| p == player)
            .ok_or(GameError::NotAwaitingPlayer(player))?;

        self.turn.pending_predictions.remove(slot);
        self.record_prediction(player, prediction);
        Ok(self.after_predictions())
    }

    /// Rolls for the mover and resolves the turn as far as possible
    pub fn resolve_dice(&mut self) -> Result<TurnOutcome> {
        self.expect_phase(TurnPhase::ReadyToRoll)?;

        let current = self.state.current_player_idx;
        let roll = self.dice.roll(&mut self.rng);
        self.turn.roll = roll;
        self.log
            .push(EventKind::DiceRolled, Some(current), format!("Dice roll: {}", roll));

        if self.state.prediction(current) == Some(roll) {
            let message = format!("Correct prediction by {}!", self.state.players[current].name);
            self.log
                .push(EventKind::CorrectPrediction, Some(current), message);

            match self.strategies[current].choose_reward(&self.state, current, &mut self.rng) {
                Some(choice) => self.apply_reward(current, choice),
                None => {
                    self.turn.phase = TurnPhase::AwaitingRewardChoice;
                    return Ok(TurnOutcome::AwaitingInput(InputRequest::RewardChoice {
                        player: current,
                    }));
                }
            }
        }

        Ok(self.after_reward())
    }

    /// Answers the mover's pending reward choice
    pub fn submit_reward_choice(&mut self, choice: RewardChoice) -> Result<TurnOutcome> {
        self.expect_phase(TurnPhase::AwaitingRewardChoice)?;
        let current = self.state.current_player_idx;
        self.apply_reward(current, choice);
        Ok(self.after_reward())
    }

    /// Answers the mover's pending snake decision
    ///
    /// Accepting only neutralizes the snake if the tokens are still there;
    /// otherwise the player slides.
    pub fn submit_snake_decision(&mut self, use_tokens: bool) -> Result<TurnOutcome> {
        self.expect_phase(TurnPhase::AwaitingSnakeDecision)?;

        let current = self.state.current_player_idx;
        let head = self.state.players[current].position;
        let outcome = match (
            self.state.board.snake_tail(head),
            self.state.board.snake_cost(head),
        ) {
            (Some(tail), Some(cost)) => {
                if use_tokens && self.state.players[current].tokens >= cost {
                    self.neutralize(current, cost);
                } else {
                    self.slide(current, tail);
                }
                self.after_movement()
            }
            _ => self.recover(GameError::MissingSnakeCost(head)),
        };
        Ok(outcome)
    }

    // ------------------------------------------------------------------
    // Turn steps
    // ------------------------------------------------------------------

    fn ensure_started(&mut self) -> Result<()> {
        match self.state.phase {
            GamePhase::GameOver => Err(GameError::GameOver),
            GamePhase::Playing => Ok(()),
            GamePhase::Setup => {
                let required = self.config.rules.min_players.max(1);
                let actual = self.state.players.len();
                if actual < required {
                    return Err(GameError::NotEnoughPlayers { required, actual });
                }

                self.state.phase = GamePhase::Playing;
                self.state.current_player_idx %= actual;

                let names: Vec<&str> = self.state.players.iter().map(|p| p.name.as_str()).collect();
                let message = format!(
                    "Game started on {} squares ({} snakes, {} ladders). Players: {}",
                    self.state.board_size(),
                    self.state.board.snakes().len(),
                    self.state.board.ladders().len(),
                    names.join(", ")
                );
                info!("{}", message);
                self.log.push(EventKind::GameStarted, None, message);
                Ok(())
            }
        }
    }

    fn expect_phase(&self, expected: TurnPhase) -> Result<()> {
        if self.state.phase == GamePhase::GameOver {
            return Err(GameError::GameOver);
        }
        if self.turn.phase != expected {
            return Err(GameError::WrongPhase {
                expected,
                actual: self.turn.phase,
            });
        }
        Ok(())
    }

    fn record_prediction(&mut self, idx: usize, guess: u8) {
        self.state.players[idx].prediction = Some(guess);
        let message = format!("{} predicts: {}", self.state.players[idx].name, guess);
        self.log.push(EventKind::Prediction, Some(idx), message);
    }

    fn after_predictions(&mut self) -> TurnOutcome {
        if let Some(&player) = self.turn.pending_predictions.first() {
            return TurnOutcome::AwaitingInput(InputRequest::Prediction { player });
        }
        self.turn.phase = TurnPhase::ReadyToRoll;
        TurnOutcome::AwaitingInput(InputRequest::RollDice {
            player: self.state.current_player_idx,
        })
    }

    fn apply_reward(&mut self, idx: usize, choice: RewardChoice) {
        let gain = self.config.rules.reward_token_gain;
        let player = &mut self.state.players[idx];
        let message = match choice {
            RewardChoice::BonusRoll => {
                self.turn.bonus_roll = true;
                format!("{} chose to get a bonus roll!", player.name)
            }
            RewardChoice::Tokens => {
                player.tokens += gain;
                format!("{} chose to gain {} tokens!", player.name, gain)
            }
        };
        self.log.push(EventKind::RewardChosen, Some(idx), message);
    }

    fn after_reward(&mut self) -> TurnOutcome {
        let roll = self.turn.roll;
        self.apply_opponent_predictions(roll);
        self.turn.stage = MoveStage::Main;
        self.run_movement(roll)
    }

    /// Correct opponents, in seating order: the first skips the mover's next
    /// turn, the second pushes the mover back by the roll, everyone gains tokens
    fn apply_opponent_predictions(&mut self, roll: u8) {
        let current = self.state.current_player_idx;
        let gain = self.config.rules.opponent_token_gain;
        let correct: Vec<usize> = self
            .state
            .opponents(current)
            .filter(|&i| self.state.players[i].prediction == Some(roll))
            .collect();

        for (rank, &opp) in correct.iter().enumerate() {
            self.state.players[opp].tokens += gain;
            let opp_name = self.state.players[opp].name.clone();
            let mover = &mut self.state.players[current];

            match rank {
                0 => {
                    mover.skipped = true;
                    let message = format!(
                        "{} predicted correctly! {}'s next turn will be skipped.",
                        opp_name, mover.name
                    );
                    self.log.push(EventKind::OpponentSkip, Some(opp), message);
                }
                1 => {
                    mover.position = mover.position.saturating_sub(roll as u32);
                    let message = format!(
                        "{} predicted correctly! {} moves back {} spaces to {}.",
                        opp_name, mover.name, roll, mover.position
                    );
                    self.log.push(EventKind::OpponentPushBack, Some(opp), message);
                }
                _ => {
                    let message = format!("{} predicted correctly and gained a token!", opp_name);
                    self.log.push(EventKind::OpponentToken, Some(opp), message);
                }
            }
        }
    }

    fn run_movement(&mut self, roll: u8) -> TurnOutcome {
        // A rejected move lands nowhere, so the square underfoot is not resolved again
        if self.move_current(roll) {
            self.resolve_snake()
        } else {
            self.after_movement()
        }
    }

    /// Exact roll needed: a move past the last square is not made at all
    ///
    /// Returns whether the player moved.
    fn move_current(&mut self, spaces: u8) -> bool {
        let idx = self.state.current_player_idx;
        let size = self.state.board_size();
        let position = self.state.players[idx].position;
        let target = position + spaces as u32;

        if target > size {
            let message = format!(
                "{} needs an exact roll to reach {}. Stayed at {}.",
                self.state.players[idx].name, size, position
            );
            info!("{}", message);
            self.log.push(EventKind::Overshoot, Some(idx), message);
            return false;
        }

        self.state.players[idx].position = target;
        let message = format!("{} moved to position {}", self.state.players[idx].name, target);
        self.log.push(EventKind::Moved, Some(idx), message);

        if let Some(top) = self.state.board.ladder_top(target) {
            self.state.players[idx].position = top.min(size);
            let message = format!(
                "{} climbed a ladder from {} to {}!",
                self.state.players[idx].name, target, top
            );
            self.log.push(EventKind::LadderClimbed, Some(idx), message);
        }
        true
    }

    fn resolve_snake(&mut self) -> TurnOutcome {
        match self.snake_encounter() {
            Ok(None) => self.after_movement(),
            Ok(Some(request)) => {
                self.turn.phase = TurnPhase::AwaitingSnakeDecision;
                TurnOutcome::AwaitingInput(request)
            }
            Err(e) => self.recover(e),
        }
    }

    /// Handles a landing on a snake head; returns the request when a human must decide
    ///
    /// `BoardLayout` derives a cost for every snake it holds, so `MissingSnakeCost`
    /// only surfaces from a corrupted layout; the caller then abandons the turn.
    fn snake_encounter(&mut self) -> Result<Option<InputRequest>> {
        let idx = self.state.current_player_idx;
        let head = self.state.players[idx].position;
        let tail = match self.state.board.snake_tail(head) {
            Some(tail) => tail,
            None => return Ok(None),
        };
        let cost = self
            .state
            .board
            .snake_cost(head)
            .ok_or(GameError::MissingSnakeCost(head))?;
        let tokens = self.state.players[idx].tokens;

        let message = format!(
            "{} landed on a snake at {}! Neutralizing it costs {} tokens, {} held.",
            self.state.players[idx].name, head, cost, tokens
        );
        self.log.push(EventKind::SnakeEncountered, Some(idx), message);

        if tokens >= cost {
            match self.strategies[idx].decide_use_tokens(&self.state, idx, cost, &mut self.rng) {
                Some(true) => {
                    self.neutralize(idx, cost);
                    return Ok(None);
                }
                Some(false) => {}
                None => {
                    return Ok(Some(InputRequest::SnakeDecision {
                        player: idx,
                        head,
                        cost,
                    }))
                }
            }
        }

        self.slide(idx, tail);
        Ok(None)
    }

    fn neutralize(&mut self, idx: usize, cost: u32) {
        let player = &mut self.state.players[idx];
        player.tokens -= cost;
        let message = format!("{} used {} tokens to neutralize the snake!", player.name, cost);
        self.log.push(EventKind::SnakeNeutralized, Some(idx), message);
    }

    fn slide(&mut self, idx: usize, tail: u32) {
        let player = &mut self.state.players[idx];
        player.position = tail;
        let message = format!("{} slid down to position {}!", player.name, tail);
        self.log.push(EventKind::SlidDown, Some(idx), message);
    }

    fn after_movement(&mut self) -> TurnOutcome {
        if self.turn.stage == MoveStage::Main && self.turn.bonus_roll {
            self.turn.stage = MoveStage::Bonus;
            let idx = self.state.current_player_idx;
            let message = format!("{} gets a bonus roll!", self.state.players[idx].name);
            self.log.push(EventKind::BonusRoll, Some(idx), message);

            let roll = self.dice.roll(&mut self.rng);
            self.turn.roll = roll;
            self.log
                .push(EventKind::DiceRolled, Some(idx), format!("Bonus dice roll: {}", roll));
            return self.run_movement(roll);
        }
        self.finish_turn()
    }

    fn finish_turn(&mut self) -> TurnOutcome {
        let idx = self.state.current_player_idx;
        let roll = self.turn.roll;
        self.turn = TurnContext::default();

        if self.state.check_win(idx) {
            self.state.winner = Some(idx);
            self.state.phase = GamePhase::GameOver;
            let message = format!(
                "{} reached {} and won the game!",
                self.state.players[idx].name,
                self.state.board_size()
            );
            info!("{}", message);
            self.log.push(EventKind::Won, Some(idx), message);
            self.trace
                .log_turn(self.turn_number, idx, Some(roll), &self.state);
            return TurnOutcome::Winner(idx);
        }

        self.advance_to_next_player();
        self.trace
            .log_turn(self.turn_number, idx, Some(roll), &self.state);
        TurnOutcome::Continues
    }

    /// Ends a turn that hit an internal error and hands play to the next player
    fn recover(&mut self, err: GameError) -> TurnOutcome {
        let idx = self.state.current_player_idx;
        error!("Turn of player {} abandoned: {}", idx, err);
        self.log
            .push(EventKind::Recovered, Some(idx), format!("Turn ended early: {}", err));
        self.turn = TurnContext::default();
        self.advance_to_next_player();
        TurnOutcome::Continues
    }

    /// Moves to the next seat, consuming skip flags on the way
    ///
    /// At most one full lap: every hop clears a flag, so even when every
    /// player is flagged the loop ends with all flags cleared.
    fn advance_to_next_player(&mut self) {
        let n = self.state.players.len();
        if n == 0 {
            return;
        }

        let mut idx = (self.state.current_player_idx + 1) % n;
        for _ in 0..n {
            if !self.state.players[idx].skipped {
                break;
            }
            self.state.players[idx].skipped = false;
            let message = format!("{}'s turn is skipped!", self.state.players[idx].name);
            self.log.push(EventKind::TurnSkipped, Some(idx), message);
            idx = (idx + 1) % n;
        }
        self.state.current_player_idx = idx;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Difficulty;

    fn two_ai_game(seed: u64) -> Game {
        let mut game = Game::with_seed(100, seed);
        game.add_player(Player::ai("Easy", Difficulty::Easy)).unwrap();
        game.add_player(Player::ai("Medium", Difficulty::Medium)).unwrap();
        game
    }

    #[test]
    fn test_new_game_uses_standard_board() {
        let game = Game::new(100);
        assert_eq!(game.board(), &BoardLayout::standard());
        assert_eq!(game.phase(), GamePhase::Setup);
        assert_eq!(game.turn_phase(), TurnPhase::Idle);
        assert!(game.pending_input().is_none());
    }

    #[test]
    fn test_other_sizes_generate_a_board() {
        let game = Game::with_seed(64, 9);
        assert_eq!(game.board().size(), 64);
        assert_ne!(game.board(), &BoardLayout::standard());
    }

    #[test]
    fn test_zero_square_board_is_enlarged() {
        let mut game = Game::with_seed(0, 5);
        assert_eq!(game.board().size(), MIN_BOARD_SIZE);
        game.add_player(Player::human("Ann")).unwrap();
        game.add_player(Player::human("Bob")).unwrap();
        game.set_dice(Dice::scripted([2]));

        game.play_turn().unwrap();
        game.submit_prediction(0, 1).unwrap();
        game.submit_prediction(1, 1).unwrap();
        assert_eq!(game.resolve_dice(), Ok(TurnOutcome::Continues));
        assert_eq!(game.players()[0].position, 0);
        assert!(game.winner().is_none());
    }

    #[test]
    fn test_snake_without_cost_abandons_turn() {
        let board = BoardLayout::standard().without_snake_costs();
        let mut game = Game::with_board(board, Config::default_hardcoded(), 0);
        let mut ann = Player::human("Ann");
        ann.position = 43;
        ann.tokens = 5;
        game.add_player(ann).unwrap();
        game.add_player(Player::human("Bob")).unwrap();
        game.set_dice(Dice::scripted([2]));

        game.play_turn().unwrap();
        game.submit_prediction(0, 1).unwrap();
        game.submit_prediction(1, 1).unwrap();
        assert_eq!(game.resolve_dice(), Ok(TurnOutcome::Continues));

        assert_eq!(game.events().count(EventKind::Recovered), 1);
        assert_eq!(game.players()[0].position, 45);
        assert_eq!(game.players()[0].tokens, 5);
        assert_eq!(game.turn_phase(), TurnPhase::Idle);
        assert_eq!(game.current_player_index(), 1);
        assert!(game.play_turn().is_ok());
    }

    #[test]
    fn test_not_enough_players() {
        let mut game = Game::with_seed(100, 1);
        game.add_player(Player::ai("Solo", Difficulty::Easy)).unwrap();
        assert_eq!(
            game.play_turn(),
            Err(GameError::NotEnoughPlayers {
                required: 2,
                actual: 1
            })
        );
        assert_eq!(game.phase(), GamePhase::Setup);
    }

    #[test]
    fn test_players_locked_after_start() {
        let mut game = two_ai_game(3);
        game.play_turn().unwrap();
        assert_eq!(game.phase(), GamePhase::Playing);
        assert_eq!(
            game.add_player(Player::human("Late")),
            Err(GameError::GameInProgress)
        );
    }

    #[test]
    fn test_step_calls_rejected_when_idle() {
        let mut game = two_ai_game(4);
        game.play_turn().unwrap();
        let idle = |expected| GameError::WrongPhase {
            expected,
            actual: TurnPhase::Idle,
        };
        assert_eq!(
            game.resolve_dice(),
            Err(idle(TurnPhase::ReadyToRoll))
        );
        assert_eq!(
            game.submit_reward_choice(RewardChoice::Tokens),
            Err(idle(TurnPhase::AwaitingRewardChoice))
        );
        assert_eq!(
            game.submit_snake_decision(true),
            Err(idle(TurnPhase::AwaitingSnakeDecision))
        );
        assert_eq!(
            game.submit_prediction(0, 3),
            Err(idle(TurnPhase::AwaitingPredictions))
        );
    }

    #[test]
    fn test_ai_game_runs_to_a_winner() {
        let mut game = two_ai_game(2024);
        let outcome = game.run_until_finished(5_000).unwrap();
        let winner = match outcome {
            TurnOutcome::Winner(idx) => idx,
            other => panic!("expected a winner, got {:?}", other),
        };
        assert_eq!(game.phase(), GamePhase::GameOver);
        assert_eq!(game.players()[winner].position, 100);
        assert!(game.check_win(winner));
        assert_eq!(game.winner().map(|p| p.name.as_str()), Some(game.players()[winner].name.as_str()));
        assert_eq!(game.events().count(EventKind::Won), 1);
        assert_eq!(game.play_turn(), Err(GameError::GameOver));
    }

    #[test]
    fn test_same_seed_same_game() {
        let mut a = two_ai_game(77);
        let mut b = two_ai_game(77);
        a.run_until_finished(5_000).unwrap();
        b.run_until_finished(5_000).unwrap();
        assert_eq!(a.state(), b.state());
        assert_eq!(a.events().events(), b.events().events());
    }

    #[test]
    fn test_reset_restores_setup() {
        let mut game = two_ai_game(8);
        game.run_until_finished(5_000).unwrap();
        game.reset();

        assert_eq!(game.phase(), GamePhase::Setup);
        assert!(game.winner().is_none());
        assert_eq!(game.current_player_index(), 0);
        assert_eq!(game.turn_number(), 0);
        for player in game.players() {
            assert_eq!(player.position, 0);
            assert_eq!(player.tokens, 0);
            assert!(!player.skipped);
        }
        assert_eq!(game.events().len(), 1);
        assert!(game.play_turn().is_ok());
    }
}
