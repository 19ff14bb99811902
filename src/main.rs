// Terminal front end: sets up a table of AI and human players and narrates the game
//
// Usage: snakes-ladders [--seed N] [--size N] [--players easy,expert] [--human NAME]...
//                       [--max-turns N] [--config PATH]

use log::{error, info, warn};
use std::env;
use std::io::{self, BufRead, Write};

use snakes_ladders::{
    Config, Difficulty, Game, InputRequest, Player, RewardChoice, TurnOutcome,
};

#[derive(Debug)]
struct Options {
    seed: Option<u64>,
    size: Option<u32>,
    ai_players: Vec<Difficulty>,
    humans: Vec<String>,
    max_turns: usize,
    config_path: Option<String>,
}

impl Default for Options {
    fn default() -> Self {
        Options {
            seed: None,
            size: None,
            ai_players: Vec::new(),
            humans: Vec::new(),
            max_turns: 10_000,
            config_path: None,
        }
    }
}

fn parse_args(args: &[String]) -> Result<Options, String> {
    let mut options = Options::default();
    let mut iter = args.iter().skip(1);

    while let Some(flag) = iter.next() {
        let mut value = || {
            iter.next()
                .cloned()
                .ok_or_else(|| format!("Missing value for {}", flag))
        };

        match flag.as_str() {
            "--seed" => {
                options.seed = Some(value()?.parse().map_err(|e| format!("Bad seed: {}", e))?)
            }
            "--size" => {
                options.size = Some(value()?.parse().map_err(|e| format!("Bad size: {}", e))?)
            }
            "--max-turns" => {
                options.max_turns = value()?
                    .parse()
                    .map_err(|e| format!("Bad turn limit: {}", e))?
            }
            "--players" => {
                for tier in value()?.split(',').filter(|t| !t.trim().is_empty()) {
                    options.ai_players.push(tier.parse()?);
                }
            }
            "--human" => options.humans.push(value()?),
            "--config" => options.config_path = Some(value()?),
            other => return Err(format!("Unknown argument '{}'", other)),
        }
    }

    if options.ai_players.is_empty() && options.humans.is_empty() {
        options.ai_players = vec![Difficulty::Medium, Difficulty::Expert];
    }
    Ok(options)
}

fn print_usage(program: &str) {
    eprintln!(
        "Usage: {} [--seed N] [--size N] [--players easy,medium,hard,expert] [--human NAME]... [--max-turns N] [--config PATH]",
        program
    );
}

fn main() {
    // We default to 'info' level logging. But if the `RUST_LOG` environment variable is set,
    // we keep that value instead.
    if env::var("RUST_LOG").is_err() {
        env::set_var("RUST_LOG", "info");
    }
    env_logger::init();

    let args: Vec<String> = env::args().collect();
    let options = match parse_args(&args) {
        Ok(options) => options,
        Err(e) => {
            eprintln!("Error: {}", e);
            print_usage(&args[0]);
            std::process::exit(1);
        }
    };

    let mut config = match &options.config_path {
        Some(path) => Config::from_file(path).unwrap_or_else(|e| {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }),
        None => Config::load_or_default(),
    };
    if let Some(size) = options.size {
        config.board.size = size;
    }

    let mut game = Game::from_config(config, options.seed);
    for name in &options.humans {
        add_or_exit(&mut game, Player::human(name.as_str()));
    }
    for (i, difficulty) in options.ai_players.iter().enumerate() {
        let name = format!("AI {} ({})", i + 1, difficulty);
        add_or_exit(&mut game, Player::ai(name, *difficulty));
    }

    print_board(&game);

    let stdin = io::stdin();
    let mut input = stdin.lock().lines();
    let mut next_seq = 0;
    let mut turns = 0;

    loop {
        let outcome = match game.pending_input() {
            Some(request) => answer(&mut game, request, &mut input),
            None => {
                if turns >= options.max_turns {
                    warn!("Stopping after {} turns without a winner", turns);
                    break;
                }
                turns += 1;
                game.play_turn()
            }
        };

        for event in game.events().since(next_seq) {
            println!("{}", event.message);
        }
        next_seq = game.events().next_seq();

        match outcome {
            Ok(TurnOutcome::Winner(idx)) => {
                info!("Game finished after {} turns", game.turn_number());
                print_standings(&game, Some(idx));
                return;
            }
            Ok(_) => {}
            // Bad human input: the same request is asked again
            Err(e) if game.pending_input().is_some() => println!("{}", e),
            Err(e) => {
                error!("Game stopped: {}", e);
                std::process::exit(1);
            }
        }
    }

    print_standings(&game, None);
}

fn add_or_exit(game: &mut Game, player: Player) {
    if let Err(e) = game.add_player(player) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

/// Asks the terminal for the decision `request` names and submits it
fn answer<B: BufRead>(
    game: &mut Game,
    request: InputRequest,
    input: &mut io::Lines<B>,
) -> snakes_ladders::Result<TurnOutcome> {
    let name = game
        .player(request.player())
        .map(|p| p.name.clone())
        .unwrap_or_default();

    match request {
        InputRequest::Prediction { player } => {
            let line = prompt(input, &format!("{}, predict the next roll (1-6): ", name));
            game.submit_prediction(player, line.trim().parse().unwrap_or(0))
        }
        InputRequest::RollDice { .. } => game.resolve_dice(),
        InputRequest::RewardChoice { .. } => {
            let line = prompt(
                input,
                &format!("{}, choose a reward: 1 = bonus roll, 2 = two tokens: ", name),
            );
            let choice = RewardChoice::try_from(line.trim().parse::<u8>().unwrap_or(0))?;
            game.submit_reward_choice(choice)
        }
        InputRequest::SnakeDecision { head, cost, .. } => {
            let line = prompt(
                input,
                &format!(
                    "{}, spend {} tokens to neutralize the snake at {}? [y/n]: ",
                    name, cost, head
                ),
            );
            let accept = matches!(line.trim().to_lowercase().as_str(), "y" | "yes");
            game.submit_snake_decision(accept)
        }
    }
}

fn prompt<B: BufRead>(input: &mut io::Lines<B>, text: &str) -> String {
    print!("{}", text);
    let _ = io::stdout().flush();
    match input.next() {
        Some(Ok(line)) => line,
        _ => {
            eprintln!("\nInput closed, leaving the game");
            std::process::exit(0);
        }
    }
}

fn print_board(game: &Game) {
    let board = game.board();
    println!("\n═══════════════════════════════════════════════════════════");
    println!("                SNAKES AND LADDERS ({} squares)", board.size());
    println!("═══════════════════════════════════════════════════════════");
    for (bottom, top) in board.ladders() {
        println!("  Ladder  {:>3} -> {:>3}", bottom, top);
    }
    for (head, tail) in board.snakes() {
        println!(
            "  Snake   {:>3} -> {:>3}  (costs {} tokens)",
            head,
            tail,
            board.snake_cost(*head).unwrap_or(0)
        );
    }
    println!("═══════════════════════════════════════════════════════════\n");
}

fn print_standings(game: &Game, winner: Option<usize>) {
    println!("\n═══════════════════════════════════════════════════════════");
    match winner.and_then(|idx| game.player(idx)) {
        Some(player) => println!("  Winner: {}", player.name),
        None => println!("  No winner"),
    }
    println!("═══════════════════════════════════════════════════════════");
    for player in game.players() {
        println!("  {}", player);
    }
    println!();
}
