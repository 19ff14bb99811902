// Debug logging module for per-turn game traces
//
// When enabled, each finished turn is appended to a JSONL file: who moved,
// the roll, every player's position and tokens, and the winner if any.

use log::error;
use serde::Serialize;
use std::fs::{File, OpenOptions};
use std::io::Write;

use crate::state::GameState;
use crate::types::Player;

/// Represents a single debug log entry
#[derive(Debug, Serialize)]
struct TurnTraceEntry<'a> {
    turn: u64,
    mover: &'a str,
    roll: Option<u8>,
    players: &'a [Player],
    winner: Option<&'a str>,
    timestamp: String,
}

/// Writes turn traces when enabled, otherwise does nothing
#[derive(Debug)]
pub struct DebugLogger {
    file: Option<File>,
}

impl DebugLogger {
    /// Creates a new debug logger
    /// If enabled is true, initializes the log file (truncating if it exists)
    pub fn new(enabled: bool, log_file_path: &str) -> Self {
        if !enabled {
            return Self::disabled();
        }

        match OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(true)
            .open(log_file_path)
        {
            Ok(file) => {
                log::info!("Debug logging enabled: {}", log_file_path);
                DebugLogger { file: Some(file) }
            }
            Err(e) => {
                error!("Failed to create debug log file '{}': {}", log_file_path, e);
                Self::disabled()
            }
        }
    }

    /// Creates a disabled debug logger (no-op)
    pub fn disabled() -> Self {
        DebugLogger { file: None }
    }

    pub fn is_enabled(&self) -> bool {
        self.file.is_some()
    }

    /// Appends one line for a finished turn
    pub fn log_turn(&mut self, turn: u64, mover: usize, roll: Option<u8>, state: &GameState) {
        let file = match self.file.as_mut() {
            Some(file) => file,
            None => return,
        };

        let entry = TurnTraceEntry {
            turn,
            mover: state.player(mover).map_or("", |p| p.name.as_str()),
            roll,
            players: &state.players,
            winner: state
                .winner
                .and_then(|w| state.player(w))
                .map(|p| p.name.as_str()),
            timestamp: chrono::Utc::now().to_rfc3339(),
        };

        match serde_json::to_string(&entry) {
            Ok(json_line) => {
                if let Err(e) = writeln!(file, "{}", json_line) {
                    error!("Failed to write debug log entry: {}", e);
                } else if let Err(e) = file.flush() {
                    error!("Failed to flush debug log: {}", e);
                }
            }
            Err(e) => {
                error!("Failed to serialize debug log entry: {}", e);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::BoardLayout;
    use std::fs;

    #[test]
    fn test_disabled_logger_writes_nothing() {
        let mut logger = DebugLogger::disabled();
        assert!(!logger.is_enabled());
        let state = GameState::new(BoardLayout::standard());
        logger.log_turn(1, 0, Some(3), &state);
    }

    #[test]
    fn test_enabled_logger_writes_json_lines() {
        let path = std::env::temp_dir().join(format!(
            "snakes_ladders_trace_{}.jsonl",
            std::process::id()
        ));
        let path_str = path.to_string_lossy().to_string();

        let mut state = GameState::new(BoardLayout::standard());
        state.players.push(Player::human("Ann"));
        state.players[0].position = 14;

        {
            let mut logger = DebugLogger::new(true, &path_str);
            assert!(logger.is_enabled());
            logger.log_turn(1, 0, Some(4), &state);
            logger.log_turn(2, 0, None, &state);
        }

        let contents = fs::read_to_string(&path).expect("trace file should exist");
        let lines: Vec<&str> = contents.lines().collect();
        assert_eq!(lines.len(), 2);

        let first: serde_json::Value = serde_json::from_str(lines[0]).unwrap();
        assert_eq!(first["turn"], 1);
        assert_eq!(first["mover"], "Ann");
        assert_eq!(first["roll"], 4);
        assert_eq!(first["players"][0]["position"], 14);
        assert!(first["winner"].is_null());

        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_unwritable_path_disables_logger() {
        let logger = DebugLogger::new(true, "/nonexistent-dir/trace.jsonl");
        assert!(!logger.is_enabled());
    }
}
