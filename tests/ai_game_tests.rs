//! AI Game Tests
//!
//! Full seeded games between the built-in tiers. These check that games end,
//! that invariants hold along the way, and that seeding makes them repeatable.

use snakes_ladders::events::EventKind;
use snakes_ladders::types::GamePhase;
use snakes_ladders::{Config, Difficulty, Game, Player, TurnOutcome};

const TURN_LIMIT: usize = 5_000;

fn all_tiers_game(size: u32, seed: u64) -> Game {
    let mut config = Config::default_hardcoded();
    config.board.size = size;
    let mut game = Game::from_config(config, Some(seed));
    for difficulty in Difficulty::all() {
        game.add_player(Player::ai(format!("{} bot", difficulty), difficulty))
            .unwrap();
    }
    game
}

#[test]
fn test_every_tier_plays_to_completion() {
    let mut game = all_tiers_game(100, 11);
    let outcome = game.run_until_finished(TURN_LIMIT).unwrap();

    let winner = match outcome {
        TurnOutcome::Winner(idx) => idx,
        other => panic!("Expected a winner within {} turns, got {:?}", TURN_LIMIT, other),
    };
    assert_eq!(game.phase(), GamePhase::GameOver);
    assert_eq!(game.players()[winner].position, 100);
    assert!(game
        .players()
        .iter()
        .enumerate()
        .all(|(i, p)| i == winner || p.position < 100));
}

#[test]
fn test_invariants_hold_turn_by_turn() {
    let mut game = all_tiers_game(100, 3);

    for _ in 0..TURN_LIMIT {
        let outcome = game.play_turn().unwrap();
        for player in game.players() {
            assert!(player.position <= 100, "{} left the board", player.name);
            if let Some(guess) = player.prediction {
                assert!((1..=6).contains(&guess));
            }
        }
        assert!((1..=6).contains(&game.last_roll()));
        if let TurnOutcome::Winner(_) = outcome {
            return;
        }
        assert_eq!(outcome, TurnOutcome::Continues);
    }
    panic!("No winner within {} turns", TURN_LIMIT);
}

#[test]
fn test_generated_board_game_finishes() {
    for seed in 0..3 {
        let mut game = all_tiers_game(60, seed);
        assert_eq!(game.board().size(), 60);
        let outcome = game.run_until_finished(TURN_LIMIT).unwrap();
        assert!(
            matches!(outcome, TurnOutcome::Winner(_)),
            "seed {}: {:?}",
            seed,
            outcome
        );
    }
}

#[test]
fn test_seeded_games_replay_identically() {
    let mut first = all_tiers_game(100, 99);
    let mut second = all_tiers_game(100, 99);
    first.run_until_finished(TURN_LIMIT).unwrap();
    second.run_until_finished(TURN_LIMIT).unwrap();

    assert_eq!(first.state(), second.state());
    assert_eq!(first.turn_number(), second.turn_number());
    let messages = |g: &Game| -> Vec<String> {
        g.events().events().iter().map(|e| e.message.clone()).collect()
    };
    assert_eq!(messages(&first), messages(&second));
    assert_eq!(first.events().count(EventKind::Won), 1);
}
