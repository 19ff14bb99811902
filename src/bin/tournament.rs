//! Head-to-head tournament between two AI tiers
//!
//! Plays many seeded games in parallel and reports win rates and game length.
//! Seats alternate between games so neither tier always moves first.
//!
//! Usage: tournament <tier_a> <tier_b> [games] [base_seed] [board_size]

use rayon::prelude::*;
use snakes_ladders::{Config, Difficulty, Game, Player, TurnOutcome};
use std::env;
use std::time::Instant;

const MAX_TURNS: usize = 10_000;

#[derive(Debug)]
struct GameResult {
    /// 0 for tier A, 1 for tier B, None when the turn limit was hit
    winner: Option<usize>,
    turns: u64,
}

fn main() {
    env_logger::init();

    let args: Vec<String> = env::args().collect();
    if args.len() < 3 {
        eprintln!("Usage: {} <tier_a> <tier_b> [games] [base_seed] [board_size]", args[0]);
        eprintln!("Example: {} medium expert 200 42", args[0]);
        std::process::exit(1);
    }

    let tiers: [Difficulty; 2] = match (args[1].parse::<Difficulty>(), args[2].parse::<Difficulty>()) {
        (Ok(a), Ok(b)) => [a, b],
        (Err(e), _) | (_, Err(e)) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    };
    let games: u64 = parse_or_exit(args.get(3), 100, "game count");
    let base_seed: u64 = parse_or_exit(args.get(4), 0, "seed");

    let mut config = Config::load_or_default();
    config.board.size = parse_or_exit(args.get(5), config.board.size, "board size");
    // Parallel games must not share one trace file
    config.debug.enabled = false;

    println!("\n═══════════════════════════════════════════════════════════");
    println!("                 TIER TOURNAMENT");
    println!("═══════════════════════════════════════════════════════════");
    println!("Tier A:       {}", tiers[0]);
    println!("Tier B:       {}", tiers[1]);
    println!("Games:        {}", games);
    println!("Base seed:    {}", base_seed);
    println!("Board size:   {}", config.board.size);
    println!("═══════════════════════════════════════════════════════════\n");

    let start = Instant::now();
    let results: Vec<GameResult> = (0..games)
        .into_par_iter()
        .map(|i| play_one(&config, tiers, base_seed.wrapping_add(i), i % 2 == 1))
        .collect();
    let elapsed = start.elapsed();

    let wins_a = results.iter().filter(|r| r.winner == Some(0)).count();
    let wins_b = results.iter().filter(|r| r.winner == Some(1)).count();
    let unfinished = results.iter().filter(|r| r.winner.is_none()).count();
    let total_turns: u64 = results.iter().map(|r| r.turns).sum();
    let longest = results.iter().map(|r| r.turns).max().unwrap_or(0);
    let percent = |n: usize| {
        if games == 0 {
            0.0
        } else {
            n as f64 * 100.0 / games as f64
        }
    };

    println!("═══════════════════════════════════════════════════════════");
    println!("                      RESULTS");
    println!("═══════════════════════════════════════════════════════════");
    println!("{:<10} wins: {:>5} ({:.1}%)", tiers[0].as_str(), wins_a, percent(wins_a));
    println!("{:<10} wins: {:>5} ({:.1}%)", tiers[1].as_str(), wins_b, percent(wins_b));
    println!("Unfinished:      {:>5}", unfinished);
    println!(
        "Average turns:   {:>8.1}",
        if games == 0 { 0.0 } else { total_turns as f64 / games as f64 }
    );
    println!("Longest game:    {:>5} turns", longest);
    println!("Wall time:       {:.2?}", elapsed);
    println!("═══════════════════════════════════════════════════════════\n");
}

fn play_one(config: &Config, tiers: [Difficulty; 2], seed: u64, swap_seats: bool) -> GameResult {
    let mut game = Game::from_config(config.clone(), Some(seed));
    let seats: [usize; 2] = if swap_seats { [1, 0] } else { [0, 1] };

    for &tier_idx in &seats {
        let tier = tiers[tier_idx];
        let name = format!("{} ({})", if tier_idx == 0 { "A" } else { "B" }, tier);
        if let Err(e) = game.add_player(Player::ai(name, tier)) {
            log::error!("Seed {}: could not seat player: {}", seed, e);
            return GameResult {
                winner: None,
                turns: 0,
            };
        }
    }

    let winner = match game.run_until_finished(MAX_TURNS) {
        Ok(TurnOutcome::Winner(seat)) => Some(seats[seat]),
        Ok(_) => None,
        Err(e) => {
            log::error!("Seed {}: game aborted: {}", seed, e);
            None
        }
    };

    GameResult {
        winner,
        turns: game.turn_number(),
    }
}

fn parse_or_exit<T: std::str::FromStr>(arg: Option<&String>, default: T, what: &str) -> T {
    match arg {
        None => default,
        Some(raw) => raw.parse().unwrap_or_else(|_| {
            eprintln!("Error: invalid {} '{}'", what, raw);
            std::process::exit(1);
        }),
    }
}
